use std::fmt;

use serde::Serialize;
use tracing::error;

use super::error::{ValidationError, ValidationResult, ValidationRule};

/// 1-based positions of the signature hash that are reported.
const HASH_POSITIONS: [usize; 4] = [1, 11, 21, 31];

/// Hash control characters reported with each document.
///
/// Either the literal `"0"` (no signature, e.g. manually recovered documents)
/// or exactly four characters taken from positions 1, 11, 21 and 31 of the
/// document's signature hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HashCharacters(String);

impl HashCharacters {
    /// Sentinel for documents without a signature.
    pub const NOT_APPLICABLE: &'static str = "0";

    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        if value == Self::NOT_APPLICABLE || value.chars().count() == HASH_POSITIONS.len() {
            return Ok(Self(value));
        }
        let err = ValidationError::new(
            "hash_characters",
            format!("'{value}' must be \"0\" or exactly four characters"),
            ValidationRule::HashCharacters,
        );
        error!(rule = %err.rule, "hash characters rejected: {}", err.message);
        Err(err)
    }

    pub fn not_applicable() -> Self {
        Self(Self::NOT_APPLICABLE.to_string())
    }

    /// Extract the control characters from a full signature hash.
    pub fn from_signature(hash: &str) -> ValidationResult<Self> {
        let chars: Vec<char> = hash.chars().collect();
        let picked: Option<String> = HASH_POSITIONS
            .iter()
            .map(|&pos| chars.get(pos - 1).copied())
            .collect();
        picked.map(Self).ok_or_else(|| {
            let err = ValidationError::new(
                "hash_characters",
                format!(
                    "signature hash has {} characters, at least {} are required",
                    chars.len(),
                    HASH_POSITIONS[HASH_POSITIONS.len() - 1]
                ),
                ValidationRule::HashCharacters,
            );
            error!(rule = %err.rule, "signature hash rejected: {}", err.message);
            err
        })
    }

    pub fn is_not_applicable(&self) -> bool {
        self.0 == Self::NOT_APPLICABLE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HashCharacters {
    fn default() -> Self {
        Self::not_applicable()
    }
}

impl fmt::Display for HashCharacters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
