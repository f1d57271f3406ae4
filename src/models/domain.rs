use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

use crate::models::records::{RawRecord, Scalar};

/// Errors raised while building an [`Entity`] from decoded fields
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("identifier is not an integer: {0}")]
    InvalidId(Scalar),

    #[error("latitude is not numeric: {0}")]
    InvalidLatitude(Scalar),

    #[error("longitude is not numeric: {0}")]
    InvalidLongitude(Scalar),
}

/// One record: a named entity at a coordinate.
///
/// Coordinate ranges are not checked here; out-of-range values go through to
/// the distance calculation as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Entity {
    pub fn new(id: i64, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Build an entity from loosely typed field values
    pub fn from_fields(
        id: &Scalar,
        name: impl Into<String>,
        latitude: &Scalar,
        longitude: &Scalar,
    ) -> Result<Self, ValidationError> {
        let id_value = id
            .as_id()
            .ok_or_else(|| ValidationError::InvalidId(id.clone()))?;
        let lat_value = latitude
            .as_degrees()
            .ok_or_else(|| ValidationError::InvalidLatitude(latitude.clone()))?;
        let lon_value = longitude
            .as_degrees()
            .ok_or_else(|| ValidationError::InvalidLongitude(longitude.clone()))?;

        Ok(Self::new(id_value, name, lat_value, lon_value))
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Three-way comparison on the identifier only.
    ///
    /// Entities sharing an id compare equal, so a stable sort keeps them in
    /// input order.
    pub fn cmp_by_id(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl TryFrom<RawRecord> for Entity {
    type Error = ValidationError;

    fn try_from(record: RawRecord) -> Result<Self, Self::Error> {
        Self::from_fields(
            &record.user_id,
            record.name,
            &record.latitude,
            &record.longitude,
        )
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity {}: {}", self.id, self.name)
    }
}

/// Origin for all distance calculations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl ReferencePoint {
    /// Default origin latitude in degrees
    pub const DEFAULT_LATITUDE: f64 = 53.3381985;
    /// Default origin longitude in degrees
    pub const DEFAULT_LONGITUDE: f64 = -6.2592576;

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl Default for ReferencePoint {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATITUDE, Self::DEFAULT_LONGITUDE)
    }
}
