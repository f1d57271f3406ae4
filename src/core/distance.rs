use serde_json::Value;
use thiserror::Error;

use crate::models::ReferencePoint;

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Errors from the distance calculation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    #[error("expected numeric coordinates, got [{latitude}] and [{longitude}]")]
    TypeInput { latitude: String, longitude: String },
}

/// A value that can be read as a coordinate in degrees.
///
/// `None` means the value is not numerically coercible: non-numeric text,
/// arrays, objects, null, booleans, or a non-finite number.
pub trait CoordinateInput {
    fn degrees(&self) -> Option<f64>;

    /// Representation used in error messages
    fn describe(&self) -> String;
}

impl CoordinateInput for f64 {
    fn degrees(&self) -> Option<f64> {
        self.is_finite().then_some(*self)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl CoordinateInput for f32 {
    fn degrees(&self) -> Option<f64> {
        f64::from(*self).degrees()
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl CoordinateInput for i32 {
    fn degrees(&self) -> Option<f64> {
        Some(f64::from(*self))
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl CoordinateInput for i64 {
    fn degrees(&self) -> Option<f64> {
        Some(*self as f64)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl CoordinateInput for str {
    fn degrees(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()?.degrees()
    }

    fn describe(&self) -> String {
        format!("{:?}", self)
    }
}

impl CoordinateInput for String {
    fn degrees(&self) -> Option<f64> {
        self.as_str().degrees()
    }

    fn describe(&self) -> String {
        self.as_str().describe()
    }
}

impl CoordinateInput for Value {
    fn degrees(&self) -> Option<f64> {
        match self {
            Value::Number(number) => number.as_f64()?.degrees(),
            Value::String(text) => text.degrees(),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl<T: CoordinateInput + ?Sized> CoordinateInput for &T {
    fn degrees(&self) -> Option<f64> {
        (**self).degrees()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distances from a fixed reference point
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceCalculator {
    reference: ReferencePoint,
}

impl DistanceCalculator {
    pub fn new(reference: ReferencePoint) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> ReferencePoint {
        self.reference
    }

    /// Distance in kilometers from the reference point to `(latitude, longitude)`
    ///
    /// Fails with [`DistanceError::TypeInput`] when either value cannot be read
    /// as a finite number of degrees.
    pub fn km_from_base<La, Lo>(&self, latitude: La, longitude: Lo) -> Result<f64, DistanceError>
    where
        La: CoordinateInput,
        Lo: CoordinateInput,
    {
        let (Some(lat), Some(lon)) = (latitude.degrees(), longitude.degrees()) else {
            return Err(DistanceError::TypeInput {
                latitude: latitude.describe(),
                longitude: longitude.describe(),
            });
        };

        Ok(haversine_distance(
            self.reference.latitude,
            self.reference.longitude,
            lat,
            lon,
        ))
    }
}
