//! Proximity Filter - lists records within a great-circle distance of a reference point
//!
//! Records are read one JSON object per line, sorted by id, measured from the
//! reference point with the haversine formula, and reported when closer than
//! the threshold.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Pipeline, PipelineError, RunSummary, DistanceCalculator, DistanceError, haversine_distance};
pub use models::{Entity, ReferencePoint, ValidationError};
pub use services::{parse_path, parse_reader, ParseError};
