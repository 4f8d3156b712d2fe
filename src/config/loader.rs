//! Credential loading and presence checks.
//!
//! Priority (highest to lowest):
//! 1. Variables already set in the environment
//! 2. `.env` dotfile entries
//!
//! Every call re-reads the environment; nothing is cached.

use thiserror::Error;

use crate::config::dotfile::{self, DotfileLocation, DotfileStatus};
use crate::constants::{
    API_KEY_URL, ENV_EE_PROJECT_ID, ENV_EXAMPLE_FILENAME, ENV_FILENAME, ENV_GOOGLE_API_KEY,
    KEY_PREFIX_LEN,
};
use crate::env::Env;

/// A required variable is missing or empty.
///
/// `Display` prints the remediation steps only, never the variable's value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ConfigurationError {
    /// Name of the variable that was looked up.
    pub variable: String,
    /// Fixed remediation text shown to the user.
    pub message: String,
}

impl ConfigurationError {
    fn missing(variable: &str) -> Self {
        Self {
            variable: variable.to_string(),
            message: remediation_message(),
        }
    }
}

/// The setup steps printed when the API key is missing.
pub fn remediation_message() -> String {
    format!(
        "Google API key not found!\n\
         Please follow these steps:\n\
         1. Copy {ENV_EXAMPLE_FILENAME} to {ENV_FILENAME}\n\
         2. Add your Google Gemini API key to {ENV_FILENAME}\n\
         3. Get your API key from: {API_KEY_URL}\n\
         4. NEVER commit the {ENV_FILENAME} file to git!"
    )
}

/// First [`KEY_PREFIX_LEN`] characters of `secret` followed by `...`.
///
/// Secrets no longer than the prefix are shown whole.
pub fn key_prefix(secret: &str) -> String {
    let prefix: String = secret.chars().take(KEY_PREFIX_LEN).collect();
    format!("{prefix}...")
}

/// Everything the loader resolves in one pass.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub project_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Resolves configuration values from an [`Env`] plus an optional dotfile.
#[derive(Debug, Clone, Default)]
pub struct CredentialLoader {
    env: Env,
    dotfile: DotfileLocation,
}

impl CredentialLoader {
    /// Loader over `env` that discovers `.env` from the current directory.
    pub fn new(env: Env) -> Self {
        Self {
            env,
            dotfile: DotfileLocation::Discover,
        }
    }

    /// Use a different dotfile location.
    pub fn with_dotfile(mut self, dotfile: DotfileLocation) -> Self {
        self.dotfile = dotfile;
        self
    }

    /// Populate from the dotfile and return the snapshot to read from.
    pub fn populate_environment(&self) -> (Env, DotfileStatus) {
        dotfile::populate(&self.env, &self.dotfile)
    }

    fn snapshot(&self) -> Env {
        self.populate_environment().0
    }

    /// Fetch a variable that must be present and non-empty.
    ///
    /// The value is returned verbatim.
    pub fn required(&self, key: &str) -> Result<String, ConfigurationError> {
        self.snapshot()
            .non_empty(key)
            .ok_or_else(|| ConfigurationError::missing(key))
    }

    /// Fetch a variable that may be absent. The value is returned as-is,
    /// including an empty string.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.snapshot().var(key).ok()
    }

    /// The Gemini API key (`GOOGLE_API_KEY`).
    pub fn google_api_key(&self) -> Result<String, ConfigurationError> {
        self.required(ENV_GOOGLE_API_KEY)
    }

    /// The Earth Engine project ID (`EE_PROJECT_ID`), if configured.
    pub fn earth_engine_project(&self) -> Option<String> {
        self.optional(ENV_EE_PROJECT_ID)
    }

    /// Resolve both values against a single snapshot.
    pub fn load(&self) -> Result<Credentials, ConfigurationError> {
        let snapshot = self.snapshot();
        let api_key = snapshot
            .non_empty(ENV_GOOGLE_API_KEY)
            .ok_or_else(|| ConfigurationError::missing(ENV_GOOGLE_API_KEY))?;
        Ok(Credentials {
            api_key,
            project_id: snapshot.var(ENV_EE_PROJECT_ID).ok(),
        })
    }
}

/// Load `GOOGLE_API_KEY` from the process environment and `.env`.
pub fn load_required_credential() -> Result<String, ConfigurationError> {
    CredentialLoader::new(Env::real()).google_api_key()
}

/// Load `EE_PROJECT_ID` from the process environment and `.env`.
pub fn load_optional_project_id() -> Option<String> {
    CredentialLoader::new(Env::real()).earth_engine_project()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loader(vars: &[(&str, &str)]) -> CredentialLoader {
        CredentialLoader::new(Env::mock(vars.iter().copied()))
            .with_dotfile(DotfileLocation::Disabled)
    }

    #[test]
    fn required_returns_value_verbatim() {
        let l = loader(&[("GOOGLE_API_KEY", "  AIza key with spaces ")]);
        assert_eq!(l.google_api_key().unwrap(), "  AIza key with spaces ");
    }

    #[test]
    fn required_missing_fails_with_remediation() {
        let err = loader(&[]).google_api_key().unwrap_err();
        assert_eq!(err.variable, "GOOGLE_API_KEY");
        let msg = err.to_string();
        assert!(msg.contains("Copy .env.example to .env"), "got: {msg}");
        assert!(msg.contains("NEVER commit the .env file to git!"), "got: {msg}");
        assert!(msg.contains(API_KEY_URL));
    }

    #[test]
    fn required_empty_counts_as_missing() {
        let err = loader(&[("GOOGLE_API_KEY", "")]).google_api_key().unwrap_err();
        assert_eq!(err, ConfigurationError::missing("GOOGLE_API_KEY"));
    }

    #[test]
    fn remediation_message_is_fixed_text() {
        assert_eq!(
            remediation_message(),
            "Google API key not found!\n\
             Please follow these steps:\n\
             1. Copy .env.example to .env\n\
             2. Add your Google Gemini API key to .env\n\
             3. Get your API key from: https://makersuite.google.com/app/apikey\n\
             4. NEVER commit the .env file to git!"
        );
    }

    #[test]
    fn optional_absent_and_present() {
        assert_eq!(loader(&[]).earth_engine_project(), None);
        assert_eq!(
            loader(&[("EE_PROJECT_ID", "ee-agrosense")]).earth_engine_project(),
            Some("ee-agrosense".to_string())
        );
        assert_eq!(
            loader(&[("EE_PROJECT_ID", "")]).earth_engine_project(),
            Some(String::new())
        );
    }

    #[test]
    fn generic_lookups_use_given_key() {
        let l = loader(&[("OTHER", "v")]);
        assert_eq!(l.required("OTHER").unwrap(), "v");
        assert_eq!(l.optional("OTHER"), Some("v".to_string()));
        assert_eq!(l.required("MISSING").unwrap_err().variable, "MISSING");
    }

    #[test]
    fn load_collects_both_values() {
        let creds = loader(&[("GOOGLE_API_KEY", "abc"), ("EE_PROJECT_ID", "p")])
            .load()
            .unwrap();
        assert_eq!(creds.api_key, "abc");
        assert_eq!(creds.project_id.as_deref(), Some("p"));

        let blank = loader(&[("GOOGLE_API_KEY", "abc"), ("EE_PROJECT_ID", "")])
            .load()
            .unwrap();
        assert_eq!(blank.project_id.as_deref(), Some(""));
    }

    #[test]
    fn loader_debug_hides_injected_values() {
        let l = loader(&[("GOOGLE_API_KEY", "AIzaSECRET123456")]);
        let debug = format!("{l:?}");
        assert!(!debug.contains("AIzaSECRET123456"), "got: {debug}");
        assert!(debug.contains("GOOGLE_API_KEY"), "got: {debug}");
    }

    #[test]
    fn credentials_debug_redacts_key() {
        let creds = Credentials {
            api_key: "AIzaSuperSecret".to_string(),
            project_id: None,
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("AIzaSuperSecret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn key_prefix_truncates_to_ten_chars() {
        assert_eq!(key_prefix("abcdefghijklmnop"), "abcdefghij...");
        assert_eq!(key_prefix("xyz"), "xyz...");
        assert_eq!(key_prefix("ééééééééééé"), "éééééééééé...");
    }

    #[test]
    fn reads_dotfile_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "GOOGLE_API_KEY=from-file\nEE_PROJECT_ID=proj\n").unwrap();
        let l = CredentialLoader::new(Env::mock(Vec::<(&str, &str)>::new()))
            .with_dotfile(DotfileLocation::Path(path));
        assert_eq!(l.google_api_key().unwrap(), "from-file");
        assert_eq!(l.earth_engine_project(), Some("proj".to_string()));
    }
}
