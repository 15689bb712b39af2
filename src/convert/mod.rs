//! OpenCensus → OTEL metrics conversion
//!
//! This module converts batches of decoded OpenCensus metric records into
//! OTEL `Metric` values.
//!
//! ## Conversion
//!
//! - Aggregation mapping (GaugeInt64/GaugeDouble → Gauge, Cumulative* → Sum,
//!   CumulativeDistribution → Histogram)
//! - Cumulative sums are always monotonic with cumulative temporality
//! - Label keys + positional label values → canonical OTEL attribute sets
//! - Distribution bucket counts widened to unsigned, rejecting negatives
//! - Unsupported types (gauge distributions, summaries) fail per metric
//!
//! ## Error policy
//!
//! Continue-on-error: a failure drops the smallest affected unit (point,
//! series, or metric) and is joined into a batch-scoped [`ConvertErrors`]
//! attributed to the metric name. Callers always receive the maximal valid
//! output alongside the full diagnostics.

mod error;
mod to_otel;

// Re-export public API

pub use error::{ConvertError, ConvertErrors, MetricConvertError};
pub use to_otel::{CensusToOtelConfig, ConvertedMetrics, census_to_otel_metrics};
