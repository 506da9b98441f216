//! # OKPets Core
//!
//! Shared building blocks for the OKPets relay: configuration, the
//! crate-wide error type, account/credential types, and the in-memory
//! credential store that the OAuth callback fills and the autopilot reads.

pub mod config;
pub mod credentials;
pub mod error;
pub mod types;

pub use config::OkpetsConfig;
pub use credentials::{AccountCredentials, CredentialStore};
pub use error::{OkpetsError, Result};
pub use types::{AccountId, SessionCredentials};
