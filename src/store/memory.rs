use super::{CredentialStore, NewCredential, StoreError, StoredCredential};
use async_trait::async_trait;
use std::collections::{hash_map::Entry, HashMap};
use tokio::sync::RwLock;

/// Process-local store for tests and `--memory` runs. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<String, StoredCredential>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find(&self, email: &str) -> Result<StoredCredential, StoreError> {
        self.rows
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, credential: NewCredential) -> Result<(), StoreError> {
        match self.rows.write().await.entry(credential.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(credential);
                Ok(())
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
