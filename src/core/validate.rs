use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::error::ValidationError;
use super::filter::DEFAULT_THRESHOLD_MIB;

/// Plain decimal notation with `.` as separator and an optional exponent,
/// independent of locale.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid decimal pattern")
});

/// The root must be non-blank and name an existing directory.
pub fn validate_root_path(input: &str) -> Result<PathBuf, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyRoot);
    }

    let path = Path::new(input);
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(path.to_path_buf()),
        Ok(_) => Err(ValidationError::RootNotDirectory(path.to_path_buf())),
        Err(_) => Err(ValidationError::RootNotFound(path.to_path_buf())),
    }
}

/// Parse a threshold in mebibytes. Blank input selects the default.
pub fn parse_threshold(input: &str) -> Result<f64, ValidationError> {
    let text = input.trim();
    if text.is_empty() {
        return Ok(DEFAULT_THRESHOLD_MIB);
    }

    if !DECIMAL.is_match(text) {
        return Err(ValidationError::ThresholdNotNumber(text.to_owned()));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| ValidationError::ThresholdNotNumber(text.to_owned()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::ThresholdOutOfRange(text.to_owned()));
    }
    Ok(value)
}

/// A scan may start only when both inputs are valid. The root is checked
/// first and its error wins.
pub fn validate_inputs(root: &str, threshold: &str) -> Result<(PathBuf, f64), ValidationError> {
    let root = validate_root_path(root)?;
    let threshold = parse_threshold(threshold)?;
    Ok((root, threshold))
}
