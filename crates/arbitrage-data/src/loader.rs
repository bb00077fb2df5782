//! Format detection, file discovery, and deserialization helpers.
//!
//! Scenario files may be written in RON, TOML, or JSON. The format is
//! detected from the extension; a base name present in two formats is an
//! error rather than a silent preference.

use arbitrage_core::catalog::CatalogError;
use arbitrage_core::financing::FinancingError;
use arbitrage_core::fixed::Fixed64;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A number cannot be represented as a fixed-point amount (NaN, infinite, or too large).
    #[error("invalid number for {field} of '{entry}' in {file}: {value}")]
    InvalidNumber {
        file: PathBuf,
        entry: String,
        field: &'static str,
        value: f64,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Financing(#[from] FinancingError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Deserialize a list from a file. RON and JSON files hold a bare `Vec<T>`;
/// TOML has no top-level arrays, so TOML files are read through the wrapper
/// table `W` (see [`crate::schema::TomlProjects`]).
pub fn deserialize_list<T, W>(path: &Path) -> Result<Vec<T>, DataLoadError>
where
    T: DeserializeOwned,
    W: DeserializeOwned + Into<Vec<T>>,
{
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str::<W>(&content)
            .map(Into::into)
            .map_err(|e| parse_error(path, e)),
    }
}

// ===========================================================================
// Number conversion
// ===========================================================================

/// Convert a data-file number into fixed-point, rejecting NaN, infinities
/// and values out of range.
pub fn to_fixed(
    value: f64,
    file: &Path,
    entry: &str,
    field: &'static str,
) -> Result<Fixed64, DataLoadError> {
    Fixed64::checked_from_num(value).ok_or_else(|| DataLoadError::InvalidNumber {
        file: file.to_path_buf(),
        entry: entry.to_string(),
        field,
        value,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
