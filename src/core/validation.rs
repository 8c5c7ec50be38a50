//! Pure validation rules.
//!
//! Every function here takes plain inputs and returns the first violation
//! found. Nothing in this module logs; the builders wrap these checks and
//! trace their outcome.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::error::{ValidationError, ValidationResult, ValidationRule};
use super::invoice::InvoiceData;
use super::line::LineItem;
use super::totals::{DocumentTotals, WithholdingTax};
use super::types::{Currency, RecordChannel, TaxEntity, TaxType};
use super::work::WorkData;

static EAC_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("valid regex"));

// SAF-T PT document number: "<type and series>/<sequence>", e.g. "FT A/1".
static DOCUMENT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^ ]+ [^/ ]+/[0-9]+$").expect("valid regex"));

static EXEMPTION_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^M[0-9]{2}$").expect("valid regex"));

static CURRENCY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid regex"));

/// EAC/CAE activity code: exactly five decimal digits.
pub fn validate_eac_code(code: &str) -> ValidationResult<()> {
    if EAC_CODE.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "eac_code",
            format!("EAC code '{code}' must be exactly five digits"),
            ValidationRule::EacCode,
        ))
    }
}

/// Reject empty or whitespace-only identifiers.
pub fn validate_required(value: &str, field: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(())
    }
}

pub fn validate_document_number(number: &str, field: &str) -> ValidationResult<()> {
    validate_required(number, field)?;
    if DOCUMENT_NUMBER.is_match(number) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("'{number}' must have the form '<type> <series>/<sequence>'"),
            ValidationRule::DocumentNumber,
        ))
    }
}

pub fn validate_non_negative(amount: Decimal, field: &str) -> ValidationResult<()> {
    if amount < Decimal::ZERO {
        Err(ValidationError::new(
            field,
            format!("amount {amount} must not be negative"),
            ValidationRule::NegativeAmount,
        ))
    } else {
        Ok(())
    }
}

/// Line-level rules: amount sign, tax rate range, exemption format and presence.
pub fn validate_line(line: &LineItem, field: &str) -> ValidationResult<()> {
    validate_non_negative(line.amount().value(), &format!("{field}.amount"))?;

    let tax = line.tax();
    validate_required(&tax.country_region, &format!("{field}.tax.country_region"))?;
    if tax.percentage < Decimal::ZERO || tax.percentage > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new(
            format!("{field}.tax.percentage"),
            format!("tax percentage {} must be between 0 and 100", tax.percentage),
            ValidationRule::TaxPercentage,
        ));
    }

    match line.tax_exemption() {
        Some(exemption) => {
            if !EXEMPTION_CODE.is_match(&exemption.code) {
                return Err(ValidationError::new(
                    format!("{field}.tax_exemption.code"),
                    format!("exemption code '{}' must be 'M' followed by two digits", exemption.code),
                    ValidationRule::ExemptionCode,
                ));
            }
            validate_required(&exemption.reason, &format!("{field}.tax_exemption.reason"))
        }
        None if tax.tax_type == TaxType::Iva && tax.percentage.is_zero() => {
            Err(ValidationError::new(
                format!("{field}.tax_exemption"),
                "zero-rated IVA line requires an exemption code and reason",
                ValidationRule::ExemptionRequired,
            ))
        }
        None => Ok(()),
    }
}

/// Document lines: at least one, and one line per distinct tax rate.
///
/// The non-empty rule applies whether or not an EAC code is given; the
/// service rejects documents without lines.
pub fn validate_lines(lines: &[LineItem]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::new(
            "lines",
            "document must have at least one line",
            ValidationRule::LinesPresent,
        ));
    }

    let mut seen = HashSet::new();
    for (i, line) in lines.iter().enumerate() {
        let tax = line.tax();
        // normalize so 23 and 23.00 collide
        let key = (
            tax.tax_type,
            tax.country_region.as_str(),
            tax.code,
            tax.percentage.normalize(),
        );
        if !seen.insert(key) {
            return Err(ValidationError::new(
                format!("lines[{i}].tax"),
                format!(
                    "tax {} {} {} {}% already has a line",
                    tax.tax_type.code(),
                    tax.country_region,
                    tax.code.code(),
                    tax.percentage
                ),
                ValidationRule::DuplicateTaxRate,
            ));
        }
    }
    Ok(())
}

pub fn validate_currency(currency: &Currency) -> ValidationResult<()> {
    if !CURRENCY_CODE.is_match(&currency.code) {
        return Err(ValidationError::new(
            "totals.currency.code",
            format!("'{}' is not a three-letter ISO 4217 code", currency.code),
            ValidationRule::Currency,
        ));
    }
    if currency.exchange_rate <= Decimal::ZERO {
        return Err(ValidationError::new(
            "totals.currency.exchange_rate",
            format!("exchange rate {} must be positive", currency.exchange_rate),
            ValidationRule::Currency,
        ));
    }
    validate_non_negative(currency.amount, "totals.currency.amount")
}

/// Totals: non-negative amounts and gross = net + tax payable.
pub fn validate_totals(totals: &DocumentTotals) -> ValidationResult<()> {
    validate_non_negative(totals.tax_payable(), "totals.tax_payable")?;
    validate_non_negative(totals.net_total(), "totals.net_total")?;
    validate_non_negative(totals.gross_total(), "totals.gross_total")?;

    let Some(expected) = totals.net_total().checked_add(totals.tax_payable()) else {
        return Err(ValidationError::new(
            "totals.gross_total",
            format!(
                "net {} + tax {} exceeds the representable range",
                totals.net_total(),
                totals.tax_payable()
            ),
            ValidationRule::TotalsArithmetic,
        ));
    };
    if totals.gross_total() != expected {
        return Err(ValidationError::new(
            "totals.gross_total",
            format!(
                "gross total {} does not match net {} + tax {}",
                totals.gross_total(),
                totals.net_total(),
                totals.tax_payable()
            ),
            ValidationRule::TotalsArithmetic,
        ));
    }

    match totals.currency() {
        Some(currency) => validate_currency(currency),
        None => Ok(()),
    }
}

/// Withholding tax: `None` means none applies; a given list must not be empty.
pub fn validate_withholding_tax(entries: Option<&[WithholdingTax]>) -> ValidationResult<()> {
    let Some(entries) = entries else {
        return Ok(());
    };
    if entries.is_empty() {
        return Err(ValidationError::new(
            "withholding_tax",
            "withholding tax list is empty; omit it when none applies",
            ValidationRule::WithholdingTaxPresent,
        ));
    }
    for (i, entry) in entries.iter().enumerate() {
        validate_non_negative(entry.amount, &format!("withholding_tax[{i}].amount"))?;
    }
    Ok(())
}

/// Document-level invoice rules, in reporting order: EAC code, lines,
/// totals, withholding tax. Header and lines are validated by their own
/// builders.
pub fn validate_invoice_data(invoice: &InvoiceData) -> ValidationResult<()> {
    if let Some(code) = invoice.eac_code() {
        validate_eac_code(code)?;
    }
    validate_lines(invoice.lines())?;
    validate_totals(invoice.totals())?;
    validate_withholding_tax(invoice.withholding_tax())
}

/// Work document rules: EAC code, identification fields, lines, then totals.
pub fn validate_work_data(work: &WorkData) -> ValidationResult<()> {
    if let Some(code) = work.eac_code() {
        validate_eac_code(code)?;
    }
    validate_document_number(work.document_number(), "document_number")?;
    validate_required(work.atcud(), "atcud")?;
    validate_required(work.customer_tax_id(), "customer_tax_id")?;
    validate_required(work.customer_tax_id_country(), "customer_tax_id_country")?;
    validate_lines(work.lines())?;
    validate_totals(work.totals())
}

/// Submission identification: issuer TIN, establishment and record channel.
///
/// Only presence is checked; the TIN format is left to the service.
pub fn validate_submitter(
    tax_registration_number: &str,
    tax_entity: &TaxEntity,
    record_channel: Option<&RecordChannel>,
) -> ValidationResult<()> {
    validate_required(tax_registration_number, "tax_registration_number")?;
    if let TaxEntity::Establishment(name) = tax_entity {
        validate_required(name, "tax_entity")?;
    }
    if let Some(channel) = record_channel {
        validate_required(&channel.system, "record_channel.system")?;
        validate_required(&channel.version, "record_channel.version")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::core::line::LineItemBuilder;
    use crate::core::totals::DocumentTotalsBuilder;
    use crate::core::types::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn line(code: TaxCode, rate: Decimal) -> LineItem {
        LineItemBuilder::new(day(), LineAmount::Credit(dec!(10)))
            .tax(Tax::new(TaxType::Iva, "PT", code, rate))
            .build()
            .unwrap()
    }

    #[test]
    fn eac_code_pattern() {
        assert!(validate_eac_code("12345").is_ok());
        assert!(validate_eac_code("00000").is_ok());
        for bad in ["", "1234", "123456", "1234a", " 12345", "12345\n", "١٢٣٤٥"] {
            let err = validate_eac_code(bad).unwrap_err();
            assert_eq!(err.rule, ValidationRule::EacCode, "{bad:?}");
            assert_eq!(err.field, "eac_code");
        }
    }

    #[test]
    fn document_number_pattern() {
        assert!(validate_document_number("FT A/1", "invoice_no").is_ok());
        assert!(validate_document_number("FT 2024A/00042", "invoice_no").is_ok());
        assert_eq!(
            validate_document_number("", "invoice_no").unwrap_err().rule,
            ValidationRule::RequiredField
        );
        for bad in ["FT1", "FT A/", "FTA/1", "FT A/1x"] {
            let err = validate_document_number(bad, "invoice_no").unwrap_err();
            assert_eq!(err.rule, ValidationRule::DocumentNumber, "{bad}");
        }
    }

    #[test]
    fn negative_amounts_rejected() {
        assert!(validate_non_negative(dec!(0), "x").is_ok());
        assert!(validate_non_negative(dec!(-0.00), "x").is_ok());
        assert_eq!(
            validate_non_negative(dec!(-0.01), "x").unwrap_err().rule,
            ValidationRule::NegativeAmount
        );
    }

    #[test]
    fn duplicate_rates_rejected() {
        let lines = vec![line(TaxCode::Normal, dec!(23)), line(TaxCode::Normal, dec!(23.00))];
        let err = validate_lines(&lines).unwrap_err();
        assert_eq!(err.rule, ValidationRule::DuplicateTaxRate);
        assert_eq!(err.field, "lines[1].tax");
    }

    #[test]
    fn distinct_rates_accepted() {
        let lines = vec![line(TaxCode::Normal, dec!(23)), line(TaxCode::Reduced, dec!(6))];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn no_lines_rejected() {
        assert_eq!(validate_lines(&[]).unwrap_err().rule, ValidationRule::LinesPresent);
    }

    #[test]
    fn totals_arithmetic() {
        let ok = DocumentTotalsBuilder::new(dec!(23), dec!(100), dec!(123)).build_unchecked();
        assert!(validate_totals(&ok).is_ok());

        let off = DocumentTotalsBuilder::new(dec!(23), dec!(100), dec!(124)).build_unchecked();
        assert_eq!(validate_totals(&off).unwrap_err().rule, ValidationRule::TotalsArithmetic);
    }

    #[test]
    fn currency_rules() {
        let good = Currency {
            code: "USD".into(),
            amount: dec!(110),
            exchange_rate: dec!(0.91),
        };
        assert!(validate_currency(&good).is_ok());

        let bad_code = Currency { code: "usd".into(), ..good.clone() };
        assert_eq!(validate_currency(&bad_code).unwrap_err().rule, ValidationRule::Currency);

        let zero_rate = Currency { exchange_rate: dec!(0), ..good };
        assert_eq!(validate_currency(&zero_rate).unwrap_err().field, "totals.currency.exchange_rate");
    }

    #[test]
    fn withholding_tax_convention() {
        assert!(validate_withholding_tax(None).is_ok());
        assert_eq!(
            validate_withholding_tax(Some(&[])).unwrap_err().rule,
            ValidationRule::WithholdingTaxPresent
        );
        let entry = WithholdingTax::new(WithholdingTaxType::Irs, dec!(25));
        assert!(validate_withholding_tax(Some(&[entry])).is_ok());

        let negative = WithholdingTax::new(WithholdingTaxType::Irc, dec!(-1));
        let err = validate_withholding_tax(Some(&[negative])).unwrap_err();
        assert_eq!(err.field, "withholding_tax[0].amount");
    }
}
