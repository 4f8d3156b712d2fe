//! Configuration loading.
//!
//! Handles `.env` population and required/optional lookups of the
//! credential variables.

pub mod dotfile;
pub mod loader;

pub use dotfile::{DotfileLocation, DotfileStatus};
pub use loader::{
    ConfigurationError, CredentialLoader, Credentials, key_prefix, load_optional_project_id,
    load_required_credential,
};
