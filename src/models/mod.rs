// Model exports
pub mod domain;
pub mod records;

pub use domain::{Entity, ReferencePoint, ValidationError};
pub use records::{RawRecord, Scalar};
