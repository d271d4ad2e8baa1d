//! # Custodian (admin credential verification)
//!
//! `custodian` guards the website back-office with a single credential check.
//! It exposes one endpoint, `POST /admin/auth`, that either creates an admin
//! (`"action": "signup"`) or verifies one (`"action": "login"`, the default).
//!
//! ## Credential records
//!
//! Passwords are stored as `salt:hash` in `admin_users.password_hash`, where
//! `salt` is 16 random bytes and `hash` is SHA-256 over `password || salt`,
//! both hex encoded. The raw password never reaches the database or the logs.
//!
//! ## Failure reporting
//!
//! Every login failure answers `401 {"error": "Invalid credentials"}`, whether
//! the email is unknown, the password is wrong or the stored row is corrupt.
//! Signup reports duplicates (`400`) and hashing failures (`500`) explicitly.

pub mod api;
pub mod cli;
pub mod credential;
pub mod service;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
