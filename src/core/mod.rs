// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod pipeline;

pub use distance::{haversine_distance, CoordinateInput, DistanceCalculator, DistanceError};
pub use filters::{format_report_line, within_threshold, DEFAULT_THRESHOLD_KM};
pub use pipeline::{Pipeline, PipelineError, RunSummary};
