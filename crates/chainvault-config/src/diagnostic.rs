// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config load failures as miette diagnostics.
//!
//! A figment error is split into one [`ConfigError`] per failing key. When the
//! key came from a TOML file we point at its line; keys set through
//! `CHAINVAULT_*` variables are reported with the variable name instead.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::{Error as FigmentError, Kind};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a known key must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// One problem found while loading `chainvault.toml`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown key `{key}` in {table}")]
    #[diagnostic(
        code(chainvault::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Human-readable table name, e.g. `[vault]`.
        table: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a chainvault setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that does not fit its key, including unknown enum variants
    /// such as `kdf = "scrypt"`.
    #[error("bad value for `{key}`: {detail}")]
    #[diagnostic(code(chainvault::config::invalid_value), help("{hint}"))]
    InvalidValue {
        key: String,
        detail: String,
        hint: String,
        #[label("rejected here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// Only `[[network.networks]]` entries have keys without defaults.
    #[error("`{key}` is required in {table}")]
    #[diagnostic(code(chainvault::config::missing_key))]
    MissingKey { key: String, table: String },

    /// Semantic check that failed after deserialization.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(chainvault::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(chainvault::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Where a failing value was read from.
enum Origin<'a> {
    /// A TOML file (or inline string) we hold the text of.
    Toml { name: &'a str, content: &'a str },
    /// A `CHAINVAULT_*` environment variable.
    Env,
    Unknown,
}

/// Break a figment error into per-key diagnostics.
///
/// `toml_sources` holds `(display path, content)` for every file that fed the
/// figment, used to attach source spans.
pub fn diagnose(err: FigmentError, toml_sources: &[(String, String)]) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| diagnose_one(&error, toml_sources))
        .collect()
}

fn diagnose_one(error: &FigmentError, toml_sources: &[(String, String)]) -> ConfigError {
    let origin = origin_of(error, toml_sources);
    // For bad values figment's path ends with the key itself.
    match &error.kind {
        Kind::UnknownField(key, expected) => {
            let table = table_path(enclosing(&error.path, key));
            let (span, src) = locate(&origin, &table, key);
            let suggestion = suggest_key(key, expected);
            ConfigError::UnknownKey {
                key: key.clone(),
                table: display_table(&table, &origin),
                suggestion,
                valid_keys: expected.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(key) => ConfigError::MissingKey {
            key: key.to_string(),
            table: display_table(&table_path(&error.path), &origin),
        },
        Kind::UnknownVariant(found, expected) => {
            let (table, key) = split_key(&error.path);
            let (span, src) = locate(&origin, &table, &key);
            let choices = expected
                .iter()
                .map(|v| format!("\"{v}\""))
                .collect::<Vec<_>>()
                .join(", ");
            ConfigError::InvalidValue {
                key: dotted(&table, &key),
                detail: format!("\"{found}\" is not a recognized option"),
                hint: format!("use one of {choices}"),
                span,
                src,
            }
        }
        Kind::InvalidType(actual, expected) | Kind::InvalidValue(actual, expected) => {
            let (table, key) = split_key(&error.path);
            let (span, src) = locate(&origin, &table, &key);
            let full = dotted(&table, &key);
            let hint = match origin {
                Origin::Env => format!("set {} to {expected}", env_var_name(&full)),
                _ => format!("`{full}` expects {expected}"),
            };
            ConfigError::InvalidValue {
                key: full,
                detail: format!("found {actual}, expected {expected}"),
                hint,
                span,
                src,
            }
        }
        _ => ConfigError::Other(error.to_string()),
    }
}

fn origin_of<'a>(error: &FigmentError, toml_sources: &'a [(String, String)]) -> Origin<'a> {
    let Some(metadata) = error.metadata.as_ref() else {
        return Origin::Unknown;
    };
    if metadata.name.contains("environment") {
        return Origin::Env;
    }
    let file = metadata.source.as_ref().and_then(|s| match s {
        figment::Source::File(path) => Some(path.display().to_string()),
        _ => None,
    });
    let found = match file {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        // Inline strings carry no file source.
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };
    match found {
        Some((name, content)) => Origin::Toml { name, content },
        None => Origin::Unknown,
    }
}

/// Path of the table holding `key`, whether or not figment appended the key.
fn enclosing<'p>(path: &'p [String], key: &str) -> &'p [String] {
    match path.split_last() {
        Some((last, table)) if last.eq_ignore_ascii_case(key) => table,
        _ => path,
    }
}

/// Table path with array indices dropped: `network.networks.0` -> `network.networks`.
fn table_path(path: &[String]) -> String {
    path.iter()
        .filter(|segment| segment.parse::<usize>().is_err())
        .cloned()
        .collect::<Vec<_>>()
        .join(".")
}

fn split_key(path: &[String]) -> (String, String) {
    match path.split_last() {
        Some((key, table)) => (table_path(table), key.clone()),
        None => (String::new(), String::new()),
    }
}

fn dotted(table: &str, key: &str) -> String {
    if table.is_empty() {
        key.to_string()
    } else {
        format!("{table}.{key}")
    }
}

fn display_table(table: &str, origin: &Origin<'_>) -> String {
    let name = match table {
        "" => "the top level".to_string(),
        "network.networks" => "[[network.networks]]".to_string(),
        other => format!("[{other}]"),
    };
    match origin {
        Origin::Env => format!("{name} (from CHAINVAULT_ environment)"),
        _ => name,
    }
}

/// `vault.kdf_iterations` -> `CHAINVAULT_VAULT_KDF_ITERATIONS`.
fn env_var_name(key: &str) -> String {
    format!("CHAINVAULT_{}", key.replace('.', "_").to_ascii_uppercase())
}

fn locate(
    origin: &Origin<'_>,
    table: &str,
    key: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Origin::Toml { name, content } = origin else {
        return (None, None);
    };
    match find_key_offset(content, table, key) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), key.len())),
            Some(NamedSource::new(*name, content.to_string())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `key` inside the TOML table named `table` (`""` for the
/// root, `network.networks` for the array-of-tables entries).
///
/// Tracks `[table]` and `[[table]]` headers line by line, so a key that
/// appears in several tables resolves to the right one.
pub fn find_key_offset(content: &str, table: &str, key: &str) -> Option<usize> {
    let mut current = String::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(header) = table_header(trimmed) {
            current = header;
        } else if current == table
            && let Some(rest) = trimmed.strip_prefix(key)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

fn table_header(line: &str) -> Option<String> {
    let inner = line
        .strip_prefix("[[")
        .and_then(|l| l.split_once("]]"))
        .or_else(|| line.strip_prefix('[').and_then(|l| l.split_once(']')))?
        .0;
    Some(inner.trim().to_string())
}

/// Closest known key to `unknown`, if any is close enough to be a typo.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Print every error to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}
