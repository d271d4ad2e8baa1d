//! Admin credential storage.
//!
//! The service only needs two calls: read a row by email and insert a new row.
//! Uniqueness of `email` is owned by the store, so a lost signup race surfaces
//! as [`StoreError::Duplicate`] from [`CredentialStore::insert`].

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Duplicate,
    #[error("{0}")]
    Backend(String),
}

/// A row of `admin_users` as read for login.
#[derive(Clone)]
pub struct StoredCredential {
    pub email: String,
    pub name: String,
    /// Raw `password_hash` column, parsed by the caller.
    pub password_hash: String,
}

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredential")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"***")
            .finish()
    }
}

/// A new row for `admin_users`.
pub type NewCredential = StoredCredential;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the credential row for `email`.
    async fn find(&self, email: &str) -> Result<StoredCredential, StoreError>;

    /// Insert a new row, failing with [`StoreError::Duplicate`] if `email` exists.
    async fn insert(&self, credential: NewCredential) -> Result<(), StoreError>;

    /// Cheap liveness check used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Map a sqlx error onto the store taxonomy.
pub(crate) fn from_sqlx(err: sqlx::Error) -> StoreError {
    if is_unique_violation(&err) {
        return StoreError::Duplicate;
    }

    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        e => StoreError::Backend(e.to_string()),
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct TestDbError {
        code: Option<&'static str>,
    }

    impl fmt::Display for TestDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test database error")
        }
    }

    impl StdError for TestDbError {}

    impl DatabaseError for TestDbError {
        fn message(&self) -> &'static str {
            "test database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.code == Some("23505") {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    #[test]
    fn unique_violation_maps_to_duplicate() {
        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("23505"),
        }));
        assert!(is_unique_violation(&err));
        assert!(matches!(from_sqlx(err), StoreError::Duplicate));
    }

    #[test]
    fn other_database_error_maps_to_backend() {
        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("42P01"),
        }));
        assert!(!is_unique_violation(&err));
        match from_sqlx(err) {
            StoreError::Backend(message) => assert!(message.contains("test database error")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            from_sqlx(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn stored_credential_debug_redacts_hash() {
        let row = StoredCredential {
            email: "admin@x.com".to_string(),
            name: "admin".to_string(),
            password_hash: "aa:bb".to_string(),
        };
        let debug = format!("{row:?}");
        assert!(debug.contains("admin@x.com"));
        assert!(!debug.contains("aa:bb"));
    }
}
