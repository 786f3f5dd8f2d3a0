//! Nearest-agency lookup and radius-bounded searches.
//!
//! All searches are linear scans over the collection in its stored order.
//! Ties keep that order: `nearest` returns the first of equally distant
//! candidates and the radius searches use a stable sort.

use crate::error::{ChantierError, Result};
use crate::geo::distance_km;
use crate::models::{Agency, AgencyId, Coordinate, Located, Worksite};
use serde::Serialize;

/// Default search radius for nearby agencies, in kilometres
pub const DEFAULT_AGENCY_RADIUS_KM: f64 = 50.0;

/// Default search radius for nearby worksites, in kilometres
pub const DEFAULT_WORKSITE_RADIUS_KM: f64 = 5.0;

/// Reject negative or non-finite search radii
pub fn validate_radius(radius_km: f64) -> Result<f64> {
    if radius_km.is_finite() && radius_km >= 0.0 {
        Ok(radius_km)
    } else {
        Err(ChantierError::InvalidRadius { radius: radius_km })
    }
}

/// An item paired with its distance from the search point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

impl<T> Ranked<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ranked<U> {
        Ranked { item: f(self.item), distance_km: self.distance_km }
    }
}

impl<T: Clone> Ranked<&T> {
    pub fn cloned(self) -> Ranked<T> {
        self.map(Clone::clone)
    }
}

/// Closest item to `point`, or `None` if `items` is empty
pub fn nearest<'a, T: Located>(point: Coordinate, items: &'a [T]) -> Option<Ranked<&'a T>> {
    let mut best: Option<Ranked<&T>> = None;

    for item in items {
        let distance = distance_km(point, item.coordinate());
        // Strict comparison keeps the first of equally distant items
        if best.as_ref().map_or(true, |b| distance < b.distance_km) {
            best = Some(Ranked { item, distance_km: distance });
        }
    }

    best
}

/// Items within `radius_km` of `point`, closest first
pub fn within_radius<'a, T: Located>(
    point: Coordinate,
    items: &'a [T],
    radius_km: f64,
) -> Vec<Ranked<&'a T>> {
    let mut ranked: Vec<Ranked<&T>> = items
        .iter()
        .map(|item| Ranked { item, distance_km: distance_km(point, item.coordinate()) })
        .filter(|r| r.distance_km <= radius_km)
        .collect();

    // sort_by is stable, so equal distances keep collection order
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

/// The agency a report at `point` is routed to
pub fn nearest_agency(point: Coordinate, agencies: &[Agency]) -> Option<Ranked<&Agency>> {
    nearest(point, agencies)
}

/// Agencies within `radius_km` of `point`, closest first
pub fn nearby_agencies(
    point: Coordinate,
    agencies: &[Agency],
    radius_km: f64,
) -> Vec<Ranked<&Agency>> {
    within_radius(point, agencies, radius_km)
}

/// Worksites within `radius_km` of `point`, closest first
pub fn nearby_worksites(
    point: Coordinate,
    worksites: &[Worksite],
    radius_km: f64,
) -> Vec<Ranked<&Worksite>> {
    within_radius(point, worksites, radius_km)
}

/// Worksites routed to the given agency, in collection order
pub fn worksites_for_agency<'a>(agency: &AgencyId, worksites: &'a [Worksite]) -> Vec<&'a Worksite> {
    worksites.iter().filter(|w| w.agency_id.as_ref() == Some(agency)).collect()
}
