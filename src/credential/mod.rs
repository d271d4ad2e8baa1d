//! Password hashing and verification for admin credentials.
//!
//! Hashes are a single SHA-256 pass over `secret || salt`, rendered as
//! lowercase hex. New salts are 16 bytes from the OS RNG, also hex encoded, so
//! neither component can ever contain the record separator. Older records may
//! carry base62 salts; any salt string verifies the same way.
//!
//! > **Warning:** there is no work factor here. This matches the format of
//! > records already stored by the website back-office; switching to a KDF
//! > needs a migration of existing `password_hash` values.

mod record;

pub use record::{CredentialRecord, RecordParseError, SEPARATOR};

use anyhow::{Context, Result};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Salt length in bytes before hex encoding.
pub const SALT_LEN: usize = 16;

/// Output of [`hash_secret`]: the hex digest and the salt that produced it.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedSecret {
    pub hash: String,
    pub salt: String,
}

impl HashedSecret {
    /// Pair the hash with its salt for persistence.
    #[must_use]
    pub fn into_record(self) -> CredentialRecord {
        CredentialRecord::new(self.salt, self.hash)
    }
}

impl std::fmt::Debug for HashedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashedSecret")
            .field("hash", &"***")
            .field("salt", &"***")
            .finish()
    }
}

/// Generate a fresh random salt, hex encoded.
///
/// # Errors
/// Returns an error if the OS random number generator fails.
pub fn generate_salt() -> Result<String> {
    let mut bytes = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate salt")?;
    Ok(hex::encode(bytes))
}

fn digest(secret: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash `secret` with `salt`, or with a freshly generated salt when `None`.
///
/// # Errors
/// Returns an error only when a new salt is needed and the RNG fails.
pub fn hash_secret(secret: &str, salt: Option<&str>) -> Result<HashedSecret> {
    let salt = match salt {
        Some(salt) => salt.to_string(),
        None => generate_salt()?,
    };

    Ok(HashedSecret {
        hash: digest(secret, &salt),
        salt,
    })
}

/// Check `secret` against a stored hash and salt.
///
/// Returns `false` for any mismatch, including empty or garbage inputs.
#[must_use]
pub fn verify_secret(secret: &str, stored_hash: &str, salt: &str) -> bool {
    if stored_hash.is_empty() || salt.is_empty() {
        return false;
    }

    let computed = digest(secret, salt);
    let stored_hash = stored_hash.to_ascii_lowercase();

    // ct_eq returns false on length mismatch
    computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

/// Verify `secret` against a full [`CredentialRecord`].
#[must_use]
pub fn verify_record(secret: &str, record: &CredentialRecord) -> bool {
    verify_secret(secret, record.hash(), record.salt())
}
