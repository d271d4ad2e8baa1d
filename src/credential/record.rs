//! The persisted `salt:hash` credential string.

use std::{fmt, str::FromStr};
use thiserror::Error;

/// Separator between salt and hash in the stored column.
pub const SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordParseError {
    #[error("credential record is empty")]
    Empty,
    #[error("credential record has no separator")]
    MissingSeparator,
    #[error("credential record has more than one separator")]
    ExtraSeparator,
    #[error("credential record has an empty component")]
    EmptyComponent,
    #[error("credential record hash is not hex")]
    NotHex,
}

/// Salt and hash persisted together as one opaque string.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    salt: String,
    hash: String,
}

impl CredentialRecord {
    #[must_use]
    pub fn new(salt: String, hash: String) -> Self {
        Self { salt, hash }
    }

    #[must_use]
    pub fn salt(&self) -> &str {
        &self.salt
    }

    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.salt, self.hash)
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialRecord(***)")
    }
}

fn is_hex(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_hexdigit())
}

impl FromStr for CredentialRecord {
    type Err = RecordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(RecordParseError::Empty);
        }

        let (salt, hash) = value
            .split_once(SEPARATOR)
            .ok_or(RecordParseError::MissingSeparator)?;

        if hash.contains(SEPARATOR) {
            return Err(RecordParseError::ExtraSeparator);
        }

        if salt.is_empty() || hash.is_empty() {
            return Err(RecordParseError::EmptyComponent);
        }

        // Salts from older records may be base62, only the digest is hex.
        if !is_hex(hash) {
            return Err(RecordParseError::NotHex);
        }

        Ok(Self::new(salt.to_string(), hash.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_then_parse_round_trip() {
        let record = CredentialRecord::new("a1b2c3".to_string(), "deadbeef".to_string());
        let stored = record.to_string();
        assert_eq!(stored, "a1b2c3:deadbeef");
        assert_eq!(stored.parse::<CredentialRecord>(), Ok(record));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(
            "".parse::<CredentialRecord>(),
            Err(RecordParseError::Empty)
        );
        assert_eq!(
            "a1b2c3deadbeef".parse::<CredentialRecord>(),
            Err(RecordParseError::MissingSeparator)
        );
        assert_eq!(
            "a1:b2:c3".parse::<CredentialRecord>(),
            Err(RecordParseError::ExtraSeparator)
        );
        assert_eq!(
            ":deadbeef".parse::<CredentialRecord>(),
            Err(RecordParseError::EmptyComponent)
        );
        assert_eq!(
            "a1b2:".parse::<CredentialRecord>(),
            Err(RecordParseError::EmptyComponent)
        );
        assert_eq!(
            "a1b2:hash".parse::<CredentialRecord>(),
            Err(RecordParseError::NotHex)
        );
    }

    #[test]
    fn parse_accepts_non_hex_salt() {
        let Ok(record) = "Ab9xYzQ7mN2pL0kR:DEADbeef".parse::<CredentialRecord>() else {
            panic!("record did not parse");
        };
        assert_eq!(record.salt(), "Ab9xYzQ7mN2pL0kR");
        assert_eq!(record.hash(), "DEADbeef");
    }

    #[test]
    fn debug_is_redacted() {
        let record = CredentialRecord::new("a1b2c3".to_string(), "deadbeef".to_string());
        let debug = format!("{record:?}");
        assert!(!debug.contains("a1b2c3"));
        assert!(!debug.contains("deadbeef"));
    }
}
