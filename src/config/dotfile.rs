//! Best-effort population of the environment from a `.env` file.
//!
//! Variables that are already set always win over file entries. A missing
//! file is not an error; a malformed or unreadable one is logged and
//! otherwise ignored so that credential lookup still runs against whatever
//! the host environment provides.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants::ENV_FILENAME;
use crate::env::Env;

/// Where to look for the dotfile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DotfileLocation {
    /// Search for `.env` in the current directory and its ancestors.
    #[default]
    Discover,
    /// Read exactly this file.
    Path(PathBuf),
    /// Do not read any file.
    Disabled,
}

/// Outcome of a population attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotfileStatus {
    Loaded(PathBuf),
    NotFound,
    Skipped,
    /// The file exists but could not be read or parsed.
    Invalid(String),
}

/// Find the nearest `.env`, starting at `start` and walking up.
pub fn discover_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(ENV_FILENAME))
        .find(|candidate| candidate.is_file())
}

fn resolve(location: &DotfileLocation) -> Option<PathBuf> {
    match location {
        DotfileLocation::Discover => {
            let cwd = std::env::current_dir().ok()?;
            discover_from(&cwd)
        }
        DotfileLocation::Path(path) => Some(path.clone()),
        DotfileLocation::Disabled => None,
    }
}

/// Populate `env` from the dotfile at `location`.
///
/// Returns the snapshot to read from. For the real environment that is the
/// process table itself, written by `dotenvy` without overriding existing
/// keys. For an injected environment the file entries are layered under the
/// injected values in a fresh snapshot.
pub fn populate(env: &Env, location: &DotfileLocation) -> (Env, DotfileStatus) {
    if *location == DotfileLocation::Disabled {
        return (env.clone(), DotfileStatus::Skipped);
    }
    let Some(path) = resolve(location) else {
        tracing::debug!("no {ENV_FILENAME} file found");
        return (env.clone(), DotfileStatus::NotFound);
    };

    let result = if env.is_real() {
        dotenvy::from_path(&path).map(|()| env.clone())
    } else {
        read_entries(env, &path).map(|entries| env.layered(entries))
    };

    match result {
        Ok(snapshot) => {
            tracing::debug!(path = %path.display(), "loaded environment from dotfile");
            (snapshot, DotfileStatus::Loaded(path))
        }
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "dotfile not found");
            (env.clone(), DotfileStatus::NotFound)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unusable dotfile");
            (env.clone(), DotfileStatus::Invalid(e.to_string()))
        }
    }
}

/// Stands in for a `$` that dotenvy would expand.
const SUBSTITUTION_MARK: char = '\u{E000}';

/// Parse `path` for an injected environment.
///
/// `dotenvy` resolves `$VAR` against the process table, so every `$` it would
/// expand is marked before parsing and resolved here instead: first from
/// `env`, then from entries earlier in the file.
fn read_entries(env: &Env, path: &Path) -> Result<Vec<(String, String)>, dotenvy::Error> {
    let content = std::fs::read_to_string(path).map_err(dotenvy::Error::Io)?;
    let marked = mark_substitutions(&content);

    let mut resolved: HashMap<String, String> = HashMap::new();
    let mut entries = Vec::new();
    for item in dotenvy::from_read_iter(marked.as_bytes()) {
        let (key, raw) = item?;
        let value = expand_marks(&raw, |name| {
            env.var(name).ok().or_else(|| resolved.get(name).cloned())
        });
        resolved.insert(key.clone(), value.clone());
        entries.push((key, value));
    }
    Ok(entries)
}

/// Replace each `$` outside single quotes, escapes and comments with
/// [`SUBSTITUTION_MARK`].
fn mark_substitutions(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut strong_quote = false;
    let mut weak_quote = false;
    let mut escaped = false;
    let mut comment = false;
    let mut after_blank = true;

    for c in content.chars() {
        if comment {
            if c == '\n' {
                comment = false;
                after_blank = true;
            }
            out.push(c);
            continue;
        }
        if escaped {
            escaped = false;
            after_blank = false;
            out.push(c);
            continue;
        }
        match c {
            '#' if !strong_quote && !weak_quote && after_blank => comment = true,
            '\\' if !strong_quote => escaped = true,
            '\'' if !weak_quote => strong_quote = !strong_quote,
            '"' if !strong_quote => weak_quote = !weak_quote,
            '$' if !strong_quote => {
                out.push(SUBSTITUTION_MARK);
                after_blank = false;
                continue;
            }
            _ => {}
        }
        after_blank = c.is_whitespace();
        out.push(c);
    }
    out
}

/// Expand `MARK{NAME}` and `MARKNAME` with `lookup`; unknown names expand to
/// nothing, as in dotenvy.
fn expand_marks(raw: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != SUBSTITUTION_MARK {
            out.push(c);
            continue;
        }
        let mut name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                name.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if !c.is_alphanumeric() {
                    break;
                }
                name.push(c);
                chars.next();
            }
        }
        out.push_str(&lookup(&name).unwrap_or_default());
    }
    out
}
