//! Signup and login against the admin credential store.

mod error;

pub use error::{
    error_response, CredentialError, ErrorBody, MSG_DUPLICATE, MSG_INVALID_CREDENTIALS,
    MSG_PROCESSING, MSG_VALIDATION,
};

use crate::{
    credential::{hash_secret, verify_record, CredentialRecord},
    store::{CredentialStore, NewCredential, StoreError},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};
use utoipa::ToSchema;

/// Public fields of an admin user. Never carries credential material.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CredentialSummary {
    pub email: String,
    pub name: String,
}

/// Display name used when signup does not provide one: the email local part.
#[must_use]
pub fn derive_display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialService").finish_non_exhaustive()
    }
}

impl CredentialService {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Create a new admin credential.
    ///
    /// # Errors
    /// `Validation` on empty input and `DuplicateIdentifier` when the email is
    /// taken, before or during insert. `Storage` when the existence check
    /// fails. Hashing and insert failures are both `CredentialProcessing`, so
    /// the response does not reveal which layer broke.
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        email: &str,
        password: &SecretString,
        name: Option<&str>,
    ) -> Result<CredentialSummary, CredentialError> {
        let email = email.trim();
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(CredentialError::Validation);
        }

        // Advisory only, the insert below is what enforces uniqueness.
        match self.store.find(email).await {
            Ok(_) => {
                warn!("signup rejected, email already in use");
                return Err(CredentialError::DuplicateIdentifier);
            }
            Err(StoreError::NotFound) => (),
            Err(StoreError::Duplicate) => return Err(CredentialError::DuplicateIdentifier),
            Err(StoreError::Backend(e)) => {
                error!("Error checking if admin exists: {e}");
                return Err(CredentialError::Storage(e));
            }
        }

        let record = match hash_secret(password.expose_secret(), None) {
            Ok(hashed) => hashed.into_record(),
            Err(e) => {
                error!("Error hashing password: {e:?}");
                return Err(CredentialError::CredentialProcessing);
            }
        };

        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| derive_display_name(email), ToString::to_string);

        let row = NewCredential {
            email: email.to_string(),
            name,
            password_hash: record.to_string(),
        };
        let summary = CredentialSummary {
            email: row.email.clone(),
            name: row.name.clone(),
        };

        match self.store.insert(row).await {
            Ok(()) => {
                debug!("admin created");
                Ok(summary)
            }
            Err(StoreError::Duplicate) => {
                warn!("signup lost race on unique email");
                Err(CredentialError::DuplicateIdentifier)
            }
            Err(e) => {
                error!("Error inserting admin: {e}");
                Err(CredentialError::CredentialProcessing)
            }
        }
    }

    /// Verify a password against the stored credential for `email`.
    ///
    /// An empty email or password is a malformed request and answers `400`
    /// through `Validation`, not `401`.
    ///
    /// # Errors
    /// `Validation` on empty input; every other failure is `InvalidCredentials`.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<CredentialSummary, CredentialError> {
        let email = email.trim();
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(CredentialError::Validation);
        }

        let stored = match self.store.find(email).await {
            Ok(stored) => stored,
            Err(StoreError::NotFound) => {
                warn!("login failed: unknown email");
                return Err(CredentialError::InvalidCredentials);
            }
            Err(e) => {
                error!("login failed: error reading admin: {e}");
                return Err(CredentialError::InvalidCredentials);
            }
        };

        let record = match stored.password_hash.parse::<CredentialRecord>() {
            Ok(record) => record,
            Err(e) => {
                error!("login failed: stored credential is malformed: {e}");
                return Err(CredentialError::InvalidCredentials);
            }
        };

        if !verify_record(password.expose_secret(), &record) {
            warn!("login failed: password mismatch");
            return Err(CredentialError::InvalidCredentials);
        }

        debug!("login successful");

        Ok(CredentialSummary {
            email: stored.email,
            name: stored.name,
        })
    }
}
