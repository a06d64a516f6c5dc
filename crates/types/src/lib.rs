//! Shared identifier types for medical folder hierarchies.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a [`ComponentId`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComponentIdError {
    /// The input text was empty or contained only whitespace
    #[error("component id cannot be empty")]
    Empty,
}

/// Identifier of a folder or record in a composite tree.
///
/// Records are identified numerically and folders textually (for example `"root"` or
/// `"folder-4-right"`), but either kind of component may carry either kind of id.
/// A numeric id never equals a textual one, even when they print the same: `1` and `"1"`
/// are distinct.
///
/// Serialises untagged, so the JSON form is a bare number or a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ComponentId {
    /// Numeric identifier (typically a record id).
    Number(i64),
    /// Textual identifier (typically a folder id).
    Text(String),
}

impl ComponentId {
    /// Returns the numeric value, if this is a numeric id.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            ComponentId::Number(n) => Some(*n),
            ComponentId::Text(_) => None,
        }
    }

    /// Returns the text value, if this is a textual id.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ComponentId::Number(_) => None,
            ComponentId::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Number(n) => write!(f, "{n}"),
            ComponentId::Text(s) => f.write_str(s),
        }
    }
}

/// Parses user-supplied ids (for example from the command line).
///
/// The input is trimmed. An optionally signed run of ASCII digits that fits in an `i64`
/// becomes [`ComponentId::Number`]; any other non-empty text becomes [`ComponentId::Text`].
impl FromStr for ComponentId {
    type Err = ComponentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ComponentIdError::Empty);
        }

        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(ComponentId::Number(n));
            }
        }

        Ok(ComponentId::Text(trimmed.to_owned()))
    }
}

impl From<i64> for ComponentId {
    fn from(value: i64) -> Self {
        ComponentId::Number(value)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        ComponentId::Text(value.to_owned())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        ComponentId::Text(value)
    }
}
