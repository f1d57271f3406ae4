use crate::models::Entity;

/// Default cut-off for qualifying entities, in kilometers
pub const DEFAULT_THRESHOLD_KM: f64 = 100.0;

/// An entity is reported only when strictly closer than the threshold
#[inline]
pub fn within_threshold(distance_km: f64, threshold_km: f64) -> bool {
    distance_km < threshold_km
}

/// Format one report line: id right-aligned to 3, name left-aligned to 18
pub fn format_report_line(entity: &Entity) -> String {
    format!("{:>3} - {:<18}", entity.id(), entity.name())
}

/// Report line with the distance appended
pub fn format_report_line_with_distance(entity: &Entity, distance_km: f64) -> String {
    format!("{} ({:.2} km)", format_report_line(entity), distance_km)
}
