use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AgencyId, UserId};

/// Role of a user within the organisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Reports worksites
    #[serde(alias = "employe")]
    Employee,
    /// Assigns worksites for one agency and receives new-worksite notifications
    #[serde(alias = "directeur")]
    Director,
    /// Field staff eligible for assignment
    Ats,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Employee => "employee",
            Role::Director => "director",
            Role::Ats => "ats",
        };
        f.write_str(name)
    }
}

/// Public view of a user.
///
/// The persisted record also carries a credential; it never deserializes into
/// this type, so nothing holding a `User` can leak it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default, alias = "agenceId")]
    pub agency_id: Option<AgencyId>,
}

impl User {
    /// Field staff attached to the given agency
    pub fn is_staff_of(&self, agency: &AgencyId) -> bool {
        self.role == Role::Ats && self.agency_id.as_ref() == Some(agency)
    }
}
