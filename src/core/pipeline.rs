use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::{
    distance::{DistanceCalculator, DistanceError},
    filters::{format_report_line, format_report_line_with_distance, within_threshold, DEFAULT_THRESHOLD_KM},
};
use crate::models::Entity;
use crate::services::parser::{parse_path, ParseError};

/// Failures surfaced to the user by the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("File [{path}] not found")]
    NotFound {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("File [{path}] contains malformed data")]
    Malformed {
        path: String,
        #[source]
        source: ParseError,
    },

    #[error("No records in file [{path}]")]
    Empty { path: String },

    #[error("Record data is wrong type; was expecting numbers, got [{latitude}] and [{longitude}]")]
    TypeInput { latitude: String, longitude: String },

    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

impl PipelineError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        1
    }

    fn from_parse(path: &Path, error: ParseError) -> Self {
        let path = path.display().to_string();
        match error {
            ParseError::NotFound(_) => PipelineError::NotFound { path, source: error },
            ParseError::Malformed { .. } | ParseError::Invalid { .. } => {
                PipelineError::Malformed { path, source: error }
            }
        }
    }
}

impl From<DistanceError> for PipelineError {
    fn from(error: DistanceError) -> Self {
        match error {
            DistanceError::TypeInput { latitude, longitude } => {
                PipelineError::TypeInput { latitude, longitude }
            }
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub emitted: usize,
}

/// Load, sort, measure, filter and report.
///
/// # Pipeline Stages
/// 1. Load records from the source
/// 2. Reject an empty source
/// 3. Stable sort by id
/// 4. Compute distance, keep entities under the threshold, write report lines
#[derive(Debug, Clone)]
pub struct Pipeline {
    calculator: DistanceCalculator,
    threshold_km: f64,
    show_distance: bool,
}

impl Pipeline {
    pub fn new(calculator: DistanceCalculator, threshold_km: f64) -> Self {
        Self {
            calculator,
            threshold_km,
            show_distance: false,
        }
    }

    /// Append the computed distance to every report line
    pub fn with_distance(mut self, show_distance: bool) -> Self {
        self.show_distance = show_distance;
        self
    }

    pub fn threshold_km(&self) -> f64 {
        self.threshold_km
    }

    /// Stages 1 and 2: parse the source and require at least one record
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Entity>, PipelineError> {
        let path = path.as_ref();
        let entities = parse_path(path).map_err(|e| PipelineError::from_parse(path, e))?;

        if entities.is_empty() {
            warn!("No records in {}", path.display());
            return Err(PipelineError::Empty {
                path: path.display().to_string(),
            });
        }

        Ok(entities)
    }

    /// Stages 3 and 4: sort, measure and write qualifying entities to `out`.
    ///
    /// Stops at the first coordinate that cannot be measured; lines already
    /// written stay written.
    pub fn report<W: Write>(
        &self,
        mut entities: Vec<Entity>,
        out: &mut W,
    ) -> Result<RunSummary, PipelineError> {
        entities.sort_by(Entity::cmp_by_id);

        let mut emitted = 0;
        for entity in &entities {
            let distance_km = self
                .calculator
                .km_from_base(entity.latitude(), entity.longitude())?;
            debug!("{} is {:.3} km from base", entity, distance_km);

            if !within_threshold(distance_km, self.threshold_km) {
                continue;
            }

            let line = if self.show_distance {
                format_report_line_with_distance(entity, distance_km)
            } else {
                format_report_line(entity)
            };
            writeln!(out, "{}", line)?;
            emitted += 1;
        }

        out.flush()?;

        info!(
            "Reported {} of {} records within {} km",
            emitted,
            entities.len(),
            self.threshold_km
        );

        Ok(RunSummary {
            processed: entities.len(),
            emitted,
        })
    }

    /// Run every stage against the source at `path`
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        out: &mut W,
    ) -> Result<RunSummary, PipelineError> {
        let entities = self.load(path)?;
        self.report(entities, out)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DistanceCalculator::default(), DEFAULT_THRESHOLD_KM)
    }
}
