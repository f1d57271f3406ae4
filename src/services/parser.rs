use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Entity, RawRecord, ValidationError};

/// Errors that can occur while reading a record source
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("source could not be read: {0}")]
    NotFound(#[source] io::Error),

    #[error("line {line}: malformed record: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: invalid record: {source}")]
    Invalid {
        line: usize,
        #[source]
        source: ValidationError,
    },
}

/// Open `path` and parse every record in it.
///
/// The file handle is closed before this returns, on success and on error.
pub fn parse_path<P: AsRef<Path>>(path: P) -> Result<Vec<Entity>, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(ParseError::NotFound)?;

    info!("Parsing records from {}", path.display());
    parse_reader(BufReader::new(file))
}

/// Parse one JSON record per non-empty line, preserving input order.
///
/// A single bad line fails the whole parse; no partial list is returned.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Entity>, ParseError> {
    let mut entities = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| read_error(line_number, e))?;

        if line.trim().is_empty() {
            continue;
        }

        let record: RawRecord = serde_json::from_str(&line).map_err(|e| ParseError::Malformed {
            line: line_number,
            reason: e.to_string(),
        })?;

        let entity = Entity::try_from(record).map_err(|source| ParseError::Invalid {
            line: line_number,
            source,
        })?;

        debug!("Line {}: parsed {}", line_number, entity);
        entities.push(entity);
    }

    info!("Parsed {} records", entities.len());
    Ok(entities)
}

/// Undecodable bytes are a malformed record; anything else is an unreadable source
fn read_error(line: usize, error: io::Error) -> ParseError {
    if error.kind() == io::ErrorKind::InvalidData {
        ParseError::Malformed {
            line,
            reason: error.to_string(),
        }
    } else {
        ParseError::NotFound(error)
    }
}
