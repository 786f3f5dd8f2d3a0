//! String identifiers shared by every collection.
//!
//! Records are keyed by opaque strings so that ids written by other tools
//! (e.g. `"CH1718034023"`, `"U9"`) load unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Unique identifier for an agency
    AgencyId
);
string_id!(
    /// Unique identifier for a user
    UserId
);
string_id!(
    /// Unique identifier for a worksite, `CH` prefixed when generated
    WorksiteId
);
string_id!(
    /// Unique identifier for a notification, `N` prefixed when generated
    NotificationId
);

impl WorksiteId {
    pub fn generate() -> Self {
        Self(format!("CH{}", Uuid::new_v4().simple()))
    }
}

impl NotificationId {
    pub fn generate() -> Self {
        Self(format!("N{}", Uuid::new_v4().simple()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = WorksiteId::generate();
        let b = WorksiteId::generate();
        assert!(a.as_str().starts_with("CH"));
        assert_ne!(a, b);

        assert!(NotificationId::generate().as_str().starts_with('N'));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = UserId::from("U9");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"U9\"");

        let parsed: AgencyId = serde_json::from_str("\"A1\"").unwrap();
        assert_eq!(parsed, "A1");
    }
}
