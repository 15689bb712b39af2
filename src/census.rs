//! OpenCensus metric data model
//!
//! These types mirror the `metricdata` structures the OpenCensus library
//! hands to an exporter, in the shape this crate consumes them: already
//! decoded, with timestamps as Unix nanoseconds. Deserializing whatever wire
//! or in-process format produced them is the caller's concern.

use std::collections::HashMap;
use std::fmt;

/// A single OpenCensus metric: descriptor plus its time series.
#[derive(Debug, Clone)]
pub struct CensusMetric {
    pub descriptor: CensusDescriptor,
    pub timeseries: Vec<CensusTimeSeries>,
}

/// Metric metadata shared by all time series of one metric.
#[derive(Debug, Clone)]
pub struct CensusDescriptor {
    pub name: String,
    pub description: String,
    /// Unit token (e.g. "ms", "By"). Carried verbatim, never converted.
    pub unit: String,
    pub metric_type: CensusMetricType,
    /// Label keys, positionally parallel to each series' label values.
    pub label_keys: Vec<String>,
}

/// OpenCensus metric types.
///
/// Cumulative types always carry cumulative, monotonic semantics; the legacy
/// model has no delta or non-monotonic notion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CensusMetricType {
    GaugeInt64,
    GaugeDouble,
    GaugeDistribution,
    CumulativeInt64,
    CumulativeDouble,
    CumulativeDistribution,
    Summary,
}

impl CensusMetricType {
    /// Stable lowercase name, used in diagnostics and metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            CensusMetricType::GaugeInt64 => "gauge_int64",
            CensusMetricType::GaugeDouble => "gauge_double",
            CensusMetricType::GaugeDistribution => "gauge_distribution",
            CensusMetricType::CumulativeInt64 => "cumulative_int64",
            CensusMetricType::CumulativeDouble => "cumulative_double",
            CensusMetricType::CumulativeDistribution => "cumulative_distribution",
            CensusMetricType::Summary => "summary",
        }
    }
}

impl fmt::Display for CensusMetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One time series: a start time, one label value per descriptor label key,
/// and the ordered points observed for that label combination.
#[derive(Debug, Clone)]
pub struct CensusTimeSeries {
    pub start_time_unix_nano: u64,
    /// Positionally parallel to the descriptor's `label_keys`. `None` marks a
    /// label value that was never set for this series.
    pub label_values: Vec<Option<String>>,
    pub points: Vec<CensusPoint>,
}

/// A single observation within a time series.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusPoint {
    pub time_unix_nano: u64,
    pub value: CensusValue,
}

/// The dynamically-typed value carried by a point.
///
/// The descriptor's metric type declares which variant every point of the
/// metric is expected to carry; the conversion verifies this per point.
#[derive(Debug, Clone, PartialEq)]
pub enum CensusValue {
    Int64(i64),
    Double(f64),
    Distribution(CensusDistribution),
}

impl CensusValue {
    /// Short name of the carried variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CensusValue::Int64(_) => "int64",
            CensusValue::Double(_) => "double",
            CensusValue::Distribution(_) => "distribution",
        }
    }
}

/// A distribution snapshot: population count and sum plus explicit buckets.
///
/// `count` and bucket counts are signed because the legacy model never
/// promises non-negativity; the conversion rejects negatives instead of
/// clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusDistribution {
    pub count: i64,
    pub sum: f64,
    /// Upper bucket boundaries, assumed strictly ascending.
    pub bounds: Vec<f64>,
    pub buckets: Vec<CensusBucket>,
}

/// Count of observations that fell into one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusBucket {
    pub count: i64,
    /// Sample observation recorded for this bucket, if any.
    pub exemplar: Option<CensusExemplar>,
}

/// An example observation attached to a distribution bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusExemplar {
    pub value: f64,
    pub time_unix_nano: u64,
    pub attachments: HashMap<String, String>,
}
