//! Error types for the OpenCensus → OTEL conversion.
//!
//! Conversion never aborts a batch: every failure is recorded in a
//! [`ConvertErrors`] accumulator, attributed to the metric it came from, while
//! the remaining input keeps converting.

use std::fmt;

use crate::census::CensusMetricType;

/// A single conversion failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// The declared metric type has no OTEL mapping; the whole metric is
    /// dropped.
    #[error("unsupported OpenCensus metric type {0}")]
    UnsupportedMetricType(CensusMetricType),
    /// A point's value variant disagrees with the metric's declared type; only
    /// that point is dropped.
    #[error("wrong value type for data point: expected {expected}, found {found}")]
    MismatchedValueType {
        expected: &'static str,
        found: &'static str,
    },
    /// A series' label value count disagrees with the descriptor's label key
    /// count; the whole series is dropped.
    #[error("mismatched number of label keys ({keys}) and label values ({values})")]
    MismatchedLabelKeyValues { keys: usize, values: usize },
    /// A distribution's population count is negative; the point is dropped.
    #[error("distribution count is negative: {0}")]
    NegativeDistributionCount(i64),
    /// A distribution bucket count is negative; the whole histogram point is
    /// dropped, since partial bucket data is meaningless.
    #[error("distribution bucket count is negative: {0}")]
    NegativeBucketCount(i64),
}

/// A [`ConvertError`] attributed to the metric that produced it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("error converting metric {metric}: {source}")]
pub struct MetricConvertError {
    pub metric: String,
    pub source: ConvertError,
}

/// All failures joined over one conversion call.
///
/// Empty iff nothing in the batch failed. Individual failures stay
/// programmatically inspectable through [`iter`](Self::iter); `Display`
/// renders them all, so the value can also travel as an ordinary error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertErrors {
    errors: Vec<MetricConvertError>,
}

impl ConvertErrors {
    pub(crate) fn join(&mut self, metric: &str, source: ConvertError) {
        self.errors.push(MetricConvertError {
            metric: metric.to_string(),
            source,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricConvertError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[MetricConvertError] {
        &self.errors
    }
}

impl fmt::Display for ConvertErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error converting from OpenCensus to OpenTelemetry")?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConvertErrors {}

impl IntoIterator for ConvertErrors {
    type Item = MetricConvertError;
    type IntoIter = std::vec::IntoIter<MetricConvertError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConvertErrors {
    type Item = &'a MetricConvertError;
    type IntoIter = std::slice::Iter<'a, MetricConvertError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
