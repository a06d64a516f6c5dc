//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! that nothing in the core reads process-wide environment variables while building trees.

use crate::constants::DEFAULT_LABEL_DATE_FORMAT;
use crate::{FolderError, FolderResult};
use chrono::format::{Item, StrftimeItems};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    label_date_format: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `label_date_format` is the strftime pattern used to render dates into the
    /// "Newer (After ...)" and "Older (Before ...)" folder labels.
    ///
    /// # Errors
    ///
    /// Returns `FolderError::InvalidInput` if the pattern is blank or contains a specifier
    /// chrono cannot render.
    pub fn new(label_date_format: impl Into<String>) -> FolderResult<Self> {
        let label_date_format = label_date_format.into();
        validate_label_date_format(&label_date_format)?;

        Ok(Self { label_date_format })
    }

    pub fn label_date_format(&self) -> &str {
        &self.label_date_format
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            label_date_format: DEFAULT_LABEL_DATE_FORMAT.to_owned(),
        }
    }
}

/// Validates a strftime pattern for folder labels.
///
/// Rendering an invalid pattern through chrono's `Display` panics, so patterns are rejected
/// here before they can reach the synthesizer.
pub fn validate_label_date_format(format: &str) -> FolderResult<()> {
    if format.trim().is_empty() {
        return Err(FolderError::InvalidInput(
            "label date format cannot be empty".into(),
        ));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(FolderError::InvalidInput(format!(
            "label date format '{}' contains an unsupported specifier",
            format
        )));
    }

    Ok(())
}

/// Resolve the label date format from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default format.
pub fn label_date_format_from_env_value(value: Option<String>) -> FolderResult<String> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(format) => {
            validate_label_date_format(&format)?;
            Ok(format)
        }
        None => Ok(DEFAULT_LABEL_DATE_FORMAT.to_owned()),
    }
}
