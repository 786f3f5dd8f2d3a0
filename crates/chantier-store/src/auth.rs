//! Credential checks against stored user records.

use chantier_core::error::{ChantierError, Result};
use chantier_core::models::User;
use pwhash::bcrypt;
use serde::Deserialize;

use crate::collections::Collections;
use crate::ports::Collection;

/// A user as persisted, including the bcrypt password hash
#[derive(Debug, Clone, Deserialize)]
struct UserRecord {
    #[serde(flatten)]
    user: User,
    #[serde(default)]
    password: Option<String>,
}

/// Checks email/password pairs against the users collection
#[derive(Clone)]
pub struct Authenticator {
    collections: Collections,
}

impl Authenticator {
    pub fn new(collections: Collections) -> Self {
        Self { collections }
    }

    /// Return the public view of the user whose email and password match.
    ///
    /// Unknown emails, records without a hash and wrong passwords all fail
    /// with the same `InvalidCredentials` error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let records: Vec<UserRecord> = self.collections.load_typed(Collection::Users).await?;

        let Some(record) = records.into_iter().find(|r| r.user.email == email) else {
            tracing::warn!(email, "Login attempt for unknown email");
            return Err(ChantierError::InvalidCredentials);
        };

        let Some(hash) = record.password else {
            tracing::warn!(user_id = %record.user.id, "User record has no password hash");
            return Err(ChantierError::InvalidCredentials);
        };

        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ChantierError::store(Collection::Users.as_str(), e))?;

        if valid {
            tracing::info!(user_id = %record.user.id, "User authenticated");
            Ok(record.user)
        } else {
            tracing::warn!(user_id = %record.user.id, "Wrong password");
            Err(ChantierError::InvalidCredentials)
        }
    }
}

/// Hash a password for storage in a user record
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password).map_err(|e| ChantierError::ConfigInvalid {
        key: "password".to_string(),
        reason: e.to_string(),
    })
}
