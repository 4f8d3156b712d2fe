//! App-wide constants.
//!
//! Centralises the tool name, dotfile names, environment variable names,
//! and URLs so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "agrosense-config";

/// Local dotfile holding developer credentials (never committed).
pub const ENV_FILENAME: &str = ".env";

/// Committed template that users copy to [`ENV_FILENAME`].
pub const ENV_EXAMPLE_FILENAME: &str = ".env.example";

/// Where to obtain a Gemini API key.
pub const API_KEY_URL: &str = "https://makersuite.google.com/app/apikey";

/// Number of characters of the API key shown by the self-check.
pub const KEY_PREFIX_LEN: usize = 10;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_EE_PROJECT_ID: &str = "EE_PROJECT_ID";
pub const ENV_LOG: &str = "AGROSENSE_LOG";
