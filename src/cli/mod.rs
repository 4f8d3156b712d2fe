//! Self-check diagnostic printed by the binary.

pub mod args;

use std::io::{self, Write};

use colored::Colorize;

use agrosense_config::CredentialLoader;
use agrosense_config::config::key_prefix;

/// Report credential status. Returns `true` when the API key is present.
///
/// Status lines go to `out`; the remediation text for a missing key goes
/// to `err`. The full key is never written.
pub fn self_check(
    loader: &CredentialLoader,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    let api_key = match loader.google_api_key() {
        Ok(key) => key,
        Err(e) => {
            writeln!(err, "{} Configuration error:\n{e}", "✖".red().bold())?;
            return Ok(false);
        }
    };

    writeln!(out, "{} Google API key loaded successfully", "✔".green().bold())?;
    writeln!(out, "  Key prefix: {}", key_prefix(&api_key))?;

    match loader.earth_engine_project().filter(|p| !p.is_empty()) {
        Some(project_id) => {
            writeln!(out, "{} Earth Engine project ID: {project_id}", "✔".green().bold())?;
        }
        None => {
            writeln!(
                out,
                "{} {}",
                "ℹ".dimmed(),
                "Earth Engine project ID not set (optional)".dimmed(),
            )?;
        }
    }
    out.flush()?;

    Ok(true)
}
