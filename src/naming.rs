use regex::Regex;
use std::sync::OnceLock;

use crate::error::{DepotError, Result};

/// Characters that are never allowed in a directory or file name segment
const RESERVED_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

fn valid_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid name pattern"))
}

/// Best-effort cleanup of a user supplied name.
///
/// Trims surrounding whitespace and replaces reserved path characters and
/// control characters with `_`. Never fails; whitespace-only input yields an
/// empty string.
pub fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Check that a name is one or more ASCII letters, digits, `_` or `-`
pub fn is_valid_name(name: &str) -> bool {
    valid_name_regex().is_match(name)
}

/// Directory names scaffolded beside assets in every `<Category>/<Subtype>`
const RESERVED_ASSET_NAMES: [&str; 2] = ["tools", "config"];

/// Trim a name and reject it unless it passes [`is_valid_name`].
///
/// `kind` is used in the error message ("project", "asset", ...).
pub fn validate_name(kind: &'static str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if !is_valid_name(trimmed) {
        return Err(DepotError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// [`validate_name`] for assets, also refusing `Tools` and `Config` in any case
pub fn validate_asset_name(kind: &'static str, name: &str) -> Result<String> {
    let trimmed = validate_name(kind, name)?;
    if RESERVED_ASSET_NAMES.contains(&trimmed.to_lowercase().as_str()) {
        return Err(DepotError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(trimmed)
}
