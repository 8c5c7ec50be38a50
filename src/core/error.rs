use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Business rule a document violated during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum ValidationRule {
    /// EAC/CAE activity code must be exactly five decimal digits.
    EacCode,
    /// Hash characters must be "0" or exactly four characters.
    HashCharacters,
    /// A required identifier was empty.
    RequiredField,
    /// Invoice or work document number must look like `series/sequence`.
    DocumentNumber,
    /// A document must carry at least one line.
    LinesPresent,
    /// At most one line per tax type, region, code and rate.
    DuplicateTaxRate,
    /// Tax percentage outside 0..=100.
    TaxPercentage,
    /// Exemption code must match `M` followed by two digits.
    ExemptionCode,
    /// Zero-rated VAT lines need an exemption code and reason.
    ExemptionRequired,
    /// Amounts must not be negative.
    NegativeAmount,
    /// Gross total must equal net total plus tax payable.
    TotalsArithmetic,
    /// Currency code must be three uppercase letters and the rate positive.
    Currency,
    /// Withholding tax, when given, must list at least one entry.
    WithholdingTaxPresent,
}

impl ValidationRule {
    /// Short stable identifier, used in messages and log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EacCode => "EAC-CODE",
            Self::HashCharacters => "HASH-CHARS",
            Self::RequiredField => "REQUIRED",
            Self::DocumentNumber => "DOC-NUMBER",
            Self::LinesPresent => "LINES",
            Self::DuplicateTaxRate => "LINE-TAX-UNIQUE",
            Self::TaxPercentage => "TAX-PERCENT",
            Self::ExemptionCode => "EXEMPTION-CODE",
            Self::ExemptionRequired => "EXEMPTION-REQUIRED",
            Self::NegativeAmount => "AMOUNT-SIGN",
            Self::TotalsArithmetic => "TOTALS",
            Self::Currency => "CURRENCY",
            Self::WithholdingTaxPresent => "WITHHOLDING",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A rule violation detected while constructing a document.
///
/// Construction is fail-fast: the first violated rule is reported and no
/// value is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{rule}] {field}: {message}")]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "lines[2].tax.percentage").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// The rule that was violated.
    pub rule: ValidationRule,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: ValidationRule,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule,
        }
    }

    /// Shorthand for an empty required identifier.
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{field} must not be empty");
        Self::new(field, message, ValidationRule::RequiredField)
    }
}

/// Result type for document construction.
pub type ValidationResult<T> = Result<T, ValidationError>;
