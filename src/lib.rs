//! agrosense-config — credential loading for Agro-Sense AI (library crate).
//!
//! Notebooks and scripts call [`load_required_credential`] before
//! configuring the Gemini client, and [`load_optional_project_id`] for an
//! optional Earth Engine project.

pub mod config;
pub mod constants;
pub mod env;

pub use config::{
    ConfigurationError, CredentialLoader, Credentials, load_optional_project_id,
    load_required_credential,
};
pub use env::Env;
