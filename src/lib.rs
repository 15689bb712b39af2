//! census-bridge - Convert OpenCensus metrics to the OpenTelemetry data model
//!
//! This crate converts batches of decoded OpenCensus metric records into OTEL
//! `Metric` values from `opentelemetry_proto`, so existing OpenCensus
//! instrumentation can feed an OpenTelemetry export pipeline.
//!
//! # Design Principles
//!
//! - **No I/O**: the conversion never touches network or filesystem
//! - **No async**: pure synchronous, re-entrant transforms with no shared state
//! - **Partial success**: a bad metric, series, or point drops only itself;
//!   the rest of the batch converts, and every failure is reported
//!
//! # Example
//!
//! ```
//! use census_bridge::census::{
//!     CensusDescriptor, CensusMetric, CensusMetricType, CensusPoint, CensusTimeSeries,
//!     CensusValue,
//! };
//! use census_bridge::{CensusToOtelConfig, census_to_otel_metrics};
//!
//! let metric = CensusMetric {
//!     descriptor: CensusDescriptor {
//!         name: "queue.depth".to_string(),
//!         description: "Current queue depth".to_string(),
//!         unit: "1".to_string(),
//!         metric_type: CensusMetricType::GaugeInt64,
//!         label_keys: vec!["queue".to_string()],
//!     },
//!     timeseries: vec![CensusTimeSeries {
//!         start_time_unix_nano: 0,
//!         label_values: vec![Some("ingest".to_string())],
//!         points: vec![CensusPoint {
//!             time_unix_nano: 1_700_000_000_000_000_000,
//!             value: CensusValue::Int64(42),
//!         }],
//!     }],
//! };
//!
//! let result = census_to_otel_metrics(&[Some(metric)], &CensusToOtelConfig::default());
//! assert_eq!(result.metrics.len(), 1);
//! assert!(!result.has_errors());
//! ```

pub mod census;
pub mod convert;

pub use convert::{
    CensusToOtelConfig, ConvertError, ConvertErrors, ConvertedMetrics, MetricConvertError,
    census_to_otel_metrics,
};
