use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, Located};
use super::ids::{AgencyId, UserId};

/// A fixed-location agency serving worksites in its vicinity.
///
/// Reference data: created by an external admin process and only read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    pub id: AgencyId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub lat: f64,
    pub lon: f64,
    /// Recipient of new-worksite notifications
    #[serde(default, alias = "directeurId")]
    pub director_id: Option<UserId>,
}

impl Located for Agency {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new_unchecked(self.lat, self.lon)
    }
}
