//! OpenCensus → OTEL metrics conversion
//!
//! Converts decoded OpenCensus metric records into OTEL `Metric` values for
//! pipelines that speak the OpenTelemetry protobuf data model.

use std::collections::BTreeMap;

use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
use opentelemetry_proto::tonic::metrics::v1::{
    AggregationTemporality, Gauge, Histogram, HistogramDataPoint, Metric, NumberDataPoint, Sum,
    metric::Data, number_data_point,
};
use tracing;

use super::error::{ConvertError, ConvertErrors};
use crate::census::{CensusBucket, CensusMetric, CensusMetricType, CensusTimeSeries, CensusValue};

/// Configuration options for OpenCensus to OTEL conversion.
#[derive(Debug, Clone, Default)]
pub struct CensusToOtelConfig {
    /// Preserve the legacy metric type as `opencensus.type` metric metadata
    /// (default: false).
    pub preserve_metric_type: bool,
}

impl CensusToOtelConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Result of converting a batch of OpenCensus metrics.
///
/// Conversion is partial-success: `metrics` holds everything that converted,
/// in input order, and `errors` holds every failure that occurred anywhere in
/// the batch. A batch where one metric fails still yields the others.
#[derive(Debug, Default)]
pub struct ConvertedMetrics {
    pub metrics: Vec<Metric>,
    pub errors: ConvertErrors,
}

impl ConvertedMetrics {
    /// True if any metric, series, or point failed to convert.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Convert OpenCensus metric records to OTEL metrics.
///
/// # Mapping Rules
///
/// | OpenCensus type | OTEL aggregation |
/// |-----------------|------------------|
/// | GaugeInt64 | Gauge (integer points) |
/// | GaugeDouble | Gauge (double points) |
/// | CumulativeInt64 | Sum (integer points), cumulative, monotonic |
/// | CumulativeDouble | Sum (double points), cumulative, monotonic |
/// | CumulativeDistribution | Histogram, cumulative |
/// | GaugeDistribution, Summary | unsupported, metric dropped with error |
///
/// # Error Handling
///
/// Absent (`None`) records are skipped silently. Every other failure is
/// joined into the returned [`ConvertErrors`], attributed to the metric that
/// produced it, and drops the smallest possible unit of data: one point for a
/// value-type mismatch or a bad distribution, one series for a label arity
/// mismatch, one metric for an unsupported type. Conversion never fails the
/// whole batch.
pub fn census_to_otel_metrics(
    metrics: &[Option<CensusMetric>],
    config: &CensusToOtelConfig,
) -> ConvertedMetrics {
    let mut converted = Vec::with_capacity(metrics.len());
    let mut errors = ConvertErrors::default();

    for ocm in metrics.iter().flatten() {
        let descriptor = &ocm.descriptor;
        match convert_aggregation(ocm) {
            Ok((data, dropped)) => {
                if !dropped.is_empty() {
                    tracing::warn!(
                        metric = %descriptor.name,
                        dropped = dropped.len(),
                        "dropped series or points during conversion"
                    );
                }
                for error in dropped {
                    errors.join(&descriptor.name, error);
                }
                converted.push(Metric {
                    name: descriptor.name.clone(),
                    description: descriptor.description.clone(),
                    unit: descriptor.unit.clone(),
                    data: Some(data),
                    metadata: type_metadata(descriptor.metric_type, config),
                });
            }
            Err(error) => {
                tracing::warn!(metric = %descriptor.name, %error, "dropping metric");
                errors.join(&descriptor.name, error);
            }
        }
    }

    ConvertedMetrics {
        metrics: converted,
        errors,
    }
}

/// Produce the OTEL aggregation for one legacy metric.
///
/// Dispatches on the declared metric type; the numeric sample type of the
/// projection is chosen statically per arm. Types without a mapping are a
/// hard error for the whole metric. Series- and point-level failures are
/// returned alongside the aggregation and never fail the metric itself.
fn convert_aggregation(metric: &CensusMetric) -> Result<(Data, Vec<ConvertError>), ConvertError> {
    let keys = &metric.descriptor.label_keys;
    match metric.descriptor.metric_type {
        CensusMetricType::GaugeInt64 => Ok(convert_gauge::<i64>(keys, &metric.timeseries)),
        CensusMetricType::GaugeDouble => Ok(convert_gauge::<f64>(keys, &metric.timeseries)),
        CensusMetricType::CumulativeInt64 => Ok(convert_sum::<i64>(keys, &metric.timeseries)),
        CensusMetricType::CumulativeDouble => Ok(convert_sum::<f64>(keys, &metric.timeseries)),
        CensusMetricType::CumulativeDistribution => {
            Ok(convert_histogram(keys, &metric.timeseries))
        }
        unsupported @ (CensusMetricType::GaugeDistribution | CensusMetricType::Summary) => {
            Err(ConvertError::UnsupportedMetricType(unsupported))
        }
    }
}

/// Numeric sample type a gauge or sum projection is instantiated with.
trait Sample: Copy {
    /// Name used in type-mismatch diagnostics.
    const KIND: &'static str;

    fn from_census(value: &CensusValue) -> Option<Self>;
    fn into_point_value(self) -> number_data_point::Value;
}

impl Sample for i64 {
    const KIND: &'static str = "int64";

    fn from_census(value: &CensusValue) -> Option<Self> {
        match value {
            CensusValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    fn into_point_value(self) -> number_data_point::Value {
        number_data_point::Value::AsInt(self)
    }
}

impl Sample for f64 {
    const KIND: &'static str = "double";

    fn from_census(value: &CensusValue) -> Option<Self> {
        match value {
            CensusValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    fn into_point_value(self) -> number_data_point::Value {
        number_data_point::Value::AsDouble(self)
    }
}

/// Convert numeric time series to an OTEL Gauge.
fn convert_gauge<N: Sample>(
    label_keys: &[String],
    timeseries: &[CensusTimeSeries],
) -> (Data, Vec<ConvertError>) {
    let (data_points, errors) = convert_number_data_points::<N>(label_keys, timeseries);
    (Data::Gauge(Gauge { data_points }), errors)
}

/// Convert numeric time series to an OTEL Sum.
///
/// OpenCensus cumulative metrics are always cumulative and monotonic; there
/// is no delta or non-monotonic variant to carry over.
fn convert_sum<N: Sample>(
    label_keys: &[String],
    timeseries: &[CensusTimeSeries],
) -> (Data, Vec<ConvertError>) {
    let (data_points, errors) = convert_number_data_points::<N>(label_keys, timeseries);
    (
        Data::Sum(Sum {
            data_points,
            aggregation_temporality: AggregationTemporality::Cumulative as i32,
            is_monotonic: true,
        }),
        errors,
    )
}

/// Project time series into OTEL number data points of sample type `N`.
///
/// A series whose labels fail to convert contributes no points at all; a
/// point whose value is not of type `N` is skipped while its siblings still
/// convert.
fn convert_number_data_points<N: Sample>(
    label_keys: &[String],
    timeseries: &[CensusTimeSeries],
) -> (Vec<NumberDataPoint>, Vec<ConvertError>) {
    let mut points = Vec::new();
    let mut errors = Vec::new();

    for series in timeseries {
        let attributes = match convert_attrs(label_keys, &series.label_values) {
            Ok(attributes) => attributes,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };
        for point in &series.points {
            let Some(value) = N::from_census(&point.value) else {
                errors.push(ConvertError::MismatchedValueType {
                    expected: N::KIND,
                    found: point.value.kind(),
                });
                continue;
            };
            points.push(NumberDataPoint {
                attributes: attributes.clone(),
                start_time_unix_nano: series.start_time_unix_nano,
                time_unix_nano: point.time_unix_nano,
                value: Some(value.into_point_value()),
                exemplars: vec![],
                flags: 0,
            });
        }
    }

    (points, errors)
}

/// Convert distribution time series to an OTEL Histogram.
///
/// Bucket exemplars carried by the legacy model are not converted; the OTEL
/// `exemplars` field is left empty.
fn convert_histogram(
    label_keys: &[String],
    timeseries: &[CensusTimeSeries],
) -> (Data, Vec<ConvertError>) {
    let mut data_points = Vec::with_capacity(timeseries.len());
    let mut errors = Vec::new();

    for series in timeseries {
        let attributes = match convert_attrs(label_keys, &series.label_values) {
            Ok(attributes) => attributes,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };
        for point in &series.points {
            let CensusValue::Distribution(dist) = &point.value else {
                errors.push(ConvertError::MismatchedValueType {
                    expected: "distribution",
                    found: point.value.kind(),
                });
                continue;
            };
            if dist.count < 0 {
                errors.push(ConvertError::NegativeDistributionCount(dist.count));
                continue;
            }
            let bucket_counts = match convert_bucket_counts(&dist.buckets) {
                Ok(bucket_counts) => bucket_counts,
                Err(error) => {
                    errors.push(error);
                    continue;
                }
            };
            data_points.push(HistogramDataPoint {
                attributes: attributes.clone(),
                start_time_unix_nano: series.start_time_unix_nano,
                time_unix_nano: point.time_unix_nano,
                count: dist.count as u64,
                sum: Some(dist.sum),
                bucket_counts,
                explicit_bounds: dist.bounds.clone(),
                exemplars: vec![],
                flags: 0,
                min: None,
                max: None,
            });
        }
    }

    (
        Data::Histogram(Histogram {
            data_points,
            aggregation_temporality: AggregationTemporality::Cumulative as i32,
        }),
        errors,
    )
}

/// Widen legacy bucket counts to `u64`.
///
/// Fails atomically on the first negative count; a histogram point with any
/// bad bucket carries no usable bucket data.
fn convert_bucket_counts(buckets: &[CensusBucket]) -> Result<Vec<u64>, ConvertError> {
    let mut counts = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        if bucket.count < 0 {
            return Err(ConvertError::NegativeBucketCount(bucket.count));
        }
        counts.push(bucket.count as u64);
    }
    Ok(counts)
}

/// Build a canonical OTEL attribute set from parallel label keys and values.
///
/// The result is sorted by key and deduplicated (last value wins for a
/// repeated key), so equal key/value pairs produce equal attribute lists
/// regardless of input order. Absent values emit no attribute.
fn convert_attrs(
    keys: &[String],
    values: &[Option<String>],
) -> Result<Vec<KeyValue>, ConvertError> {
    if keys.len() != values.len() {
        return Err(ConvertError::MismatchedLabelKeyValues {
            keys: keys.len(),
            values: values.len(),
        });
    }

    let mut set = BTreeMap::new();
    for (key, value) in keys.iter().zip(values) {
        if let Some(value) = value {
            set.insert(key.as_str(), value.as_str());
        }
    }

    Ok(set
        .into_iter()
        .map(|(key, value)| KeyValue {
            key: key.to_string(),
            value: Some(AnyValue {
                value: Some(any_value::Value::StringValue(value.to_string())),
            }),
        })
        .collect())
}

/// Build the `opencensus.type` metadata entry, if configured.
fn type_metadata(metric_type: CensusMetricType, config: &CensusToOtelConfig) -> Vec<KeyValue> {
    if !config.preserve_metric_type {
        return vec![];
    }
    vec![KeyValue {
        key: "opencensus.type".to_string(),
        value: Some(AnyValue {
            value: Some(any_value::Value::StringValue(
                metric_type.as_str().to_string(),
            )),
        }),
    }]
}
