//! Clap argument types.

use clap::Parser;

/// Check that the Agro-Sense AI credentials are configured.
///
/// Reads GOOGLE_API_KEY and EE_PROJECT_ID from the environment (and a local
/// .env file, if present) and reports what it found.
#[derive(Parser, Debug)]
#[command(
    name = agrosense_config::constants::APP_NAME,
    version,
    about,
)]
pub struct Cli {}
