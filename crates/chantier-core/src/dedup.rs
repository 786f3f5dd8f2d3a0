//! Duplicate-report guard.

use crate::geo::distance_km;
use crate::models::{Coordinate, Located, Worksite, WorksiteId};

/// Two reports closer than this describe the same worksite, in kilometres
pub const DUPLICATE_RADIUS_KM: f64 = 0.2;

/// First worksite, in collection order, within `DUPLICATE_RADIUS_KM` of `point`.
///
/// `exclude` skips one worksite by id, for checks made on behalf of an
/// existing record.
pub fn find_nearby_worksite<'a>(
    point: Coordinate,
    worksites: &'a [Worksite],
    exclude: Option<&WorksiteId>,
) -> Option<&'a Worksite> {
    worksites
        .iter()
        .filter(|w| exclude != Some(&w.id))
        .find(|w| distance_km(point, w.coordinate()) <= DUPLICATE_RADIUS_KM)
}
