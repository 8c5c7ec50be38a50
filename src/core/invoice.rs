use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use serde::Serialize;
use tracing::{debug, error, info};

use super::error::ValidationResult;
use super::hash::HashCharacters;
use super::line::LineItem;
use super::totals::{DocumentTotals, WithholdingTax};
use super::types::*;
use super::validation;

/// Identification of an invoice: number, ATCUD, type, date and customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceHeader {
    invoice_no: String,
    atcud: String,
    invoice_date: NaiveDate,
    invoice_type: InvoiceType,
    self_billing_indicator: bool,
    customer_tax_id: String,
    customer_tax_id_country: String,
}

impl InvoiceHeader {
    /// Document number, e.g. "FT A/1".
    pub fn invoice_no(&self) -> &str {
        &self.invoice_no
    }

    /// Unique document code printed on the invoice.
    pub fn atcud(&self) -> &str {
        &self.atcud
    }

    pub fn invoice_date(&self) -> NaiveDate {
        self.invoice_date
    }

    pub fn invoice_type(&self) -> InvoiceType {
        self.invoice_type
    }

    pub fn self_billing_indicator(&self) -> bool {
        self.self_billing_indicator
    }

    pub fn customer_tax_id(&self) -> &str {
        &self.customer_tax_id
    }

    pub fn customer_tax_id_country(&self) -> &str {
        &self.customer_tax_id_country
    }
}

/// Builder for InvoiceHeader.
///
/// The customer defaults to the anonymous final consumer in Portugal.
pub struct InvoiceHeaderBuilder {
    invoice_no: String,
    atcud: String,
    invoice_date: NaiveDate,
    invoice_type: InvoiceType,
    self_billing_indicator: bool,
    customer_tax_id: String,
    customer_tax_id_country: String,
}

impl InvoiceHeaderBuilder {
    pub fn new(
        invoice_no: impl Into<String>,
        atcud: impl Into<String>,
        invoice_date: NaiveDate,
        invoice_type: InvoiceType,
    ) -> Self {
        Self {
            invoice_no: invoice_no.into(),
            atcud: atcud.into(),
            invoice_date,
            invoice_type,
            self_billing_indicator: false,
            customer_tax_id: FINAL_CONSUMER_TAX_ID.to_string(),
            customer_tax_id_country: "PT".to_string(),
        }
    }

    pub fn self_billing(mut self, indicator: bool) -> Self {
        self.self_billing_indicator = indicator;
        self
    }

    pub fn customer(mut self, tax_id: impl Into<String>, country: impl Into<String>) -> Self {
        self.customer_tax_id = tax_id.into();
        self.customer_tax_id_country = country.into();
        self
    }

    fn check(&self) -> ValidationResult<()> {
        validation::validate_document_number(&self.invoice_no, "header.invoice_no")?;
        validation::validate_required(&self.atcud, "header.atcud")?;
        validation::validate_required(&self.customer_tax_id, "header.customer_tax_id")?;
        validation::validate_required(
            &self.customer_tax_id_country,
            "header.customer_tax_id_country",
        )
    }

    pub fn build(self) -> ValidationResult<InvoiceHeader> {
        if let Err(err) = self.check() {
            error!(
                invoice_no = %self.invoice_no,
                rule = %err.rule,
                field = %err.field,
                "invoice header rejected: {}",
                err.message
            );
            return Err(err);
        }

        Ok(InvoiceHeader {
            invoice_no: self.invoice_no,
            atcud: self.atcud,
            invoice_date: self.invoice_date,
            invoice_type: self.invoice_type,
            self_billing_indicator: self.self_billing_indicator,
            customer_tax_id: self.customer_tax_id,
            customer_tax_id_country: self.customer_tax_id_country,
        })
    }
}

/// An invoice as reported to e-Fatura.
///
/// Only obtainable through [`InvoiceDataBuilder::build`], so every value is
/// valid and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceData {
    header: InvoiceHeader,
    status: DocumentStatus<InvoiceStatus>,
    hash_characters: HashCharacters,
    cash_vat_scheme_indicator: bool,
    paperless_indicator: bool,
    eac_code: Option<String>,
    system_entry_date: NaiveDateTime,
    lines: Vec<LineItem>,
    totals: DocumentTotals,
    withholding_tax: Option<Vec<WithholdingTax>>,
}

impl InvoiceData {
    pub fn header(&self) -> &InvoiceHeader {
        &self.header
    }

    pub fn status(&self) -> &DocumentStatus<InvoiceStatus> {
        &self.status
    }

    pub fn hash_characters(&self) -> &HashCharacters {
        &self.hash_characters
    }

    /// Whether the issuer is under the cash-VAT accounting scheme.
    pub fn cash_vat_scheme_indicator(&self) -> bool {
        self.cash_vat_scheme_indicator
    }

    /// Whether the invoice was issued exclusively in electronic form.
    pub fn paperless_indicator(&self) -> bool {
        self.paperless_indicator
    }

    pub fn eac_code(&self) -> Option<&str> {
        self.eac_code.as_deref()
    }

    pub fn system_entry_date(&self) -> NaiveDateTime {
        self.system_entry_date
    }

    /// One line per tax rate, in the order they were added.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn totals(&self) -> &DocumentTotals {
        &self.totals
    }

    /// `None` when no withholding tax applies; otherwise a non-empty list.
    pub fn withholding_tax(&self) -> Option<&[WithholdingTax]> {
        self.withholding_tax.as_deref()
    }
}

/// Builder for [`InvoiceData`].
///
/// ```
/// use chrono::NaiveDate;
/// use efatura::*;
/// use rust_decimal_macros::dec;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let at = day.and_hms_opt(9, 0, 0).unwrap();
/// let header = InvoiceHeaderBuilder::new("FR 2024/17", "JJ3XY9-17", day, InvoiceType::InvoiceReceipt)
///     .build()
///     .unwrap();
/// let invoice = InvoiceDataBuilder::new(
///     header,
///     DocumentStatus::new(InvoiceStatus::Normal, at, SourceBilling::Produced),
///     at,
///     DocumentTotalsBuilder::new(dec!(2.30), dec!(10), dec!(12.30)).build().unwrap(),
/// )
/// .add_line(LineItemBuilder::new(day, LineAmount::Credit(dec!(10))).build().unwrap())
/// .add_withholding_tax(WithholdingTax::new(WithholdingTaxType::Irs, dec!(2.50)))
/// .build()
/// .unwrap();
///
/// assert_eq!(invoice.withholding_tax().map(<[_]>::len), Some(1));
/// ```
pub struct InvoiceDataBuilder {
    header: InvoiceHeader,
    status: DocumentStatus<InvoiceStatus>,
    hash_characters: HashCharacters,
    cash_vat_scheme_indicator: bool,
    paperless_indicator: bool,
    eac_code: Option<String>,
    system_entry_date: NaiveDateTime,
    lines: Vec<LineItem>,
    totals: DocumentTotals,
    withholding_tax: Option<Vec<WithholdingTax>>,
}

impl InvoiceDataBuilder {
    pub fn new(
        header: InvoiceHeader,
        status: DocumentStatus<InvoiceStatus>,
        system_entry_date: NaiveDateTime,
        totals: DocumentTotals,
    ) -> Self {
        Self {
            header,
            status,
            hash_characters: HashCharacters::not_applicable(),
            cash_vat_scheme_indicator: false,
            paperless_indicator: false,
            eac_code: None,
            system_entry_date,
            lines: Vec::new(),
            totals,
            withholding_tax: None,
        }
    }

    pub fn hash_characters(mut self, hash: HashCharacters) -> Self {
        self.hash_characters = hash;
        self
    }

    pub fn cash_vat_scheme_indicator(mut self, indicator: bool) -> Self {
        self.cash_vat_scheme_indicator = indicator;
        self
    }

    pub fn paperless_indicator(mut self, indicator: bool) -> Self {
        self.paperless_indicator = indicator;
        self
    }

    pub fn eac_code(mut self, code: impl Into<String>) -> Self {
        self.eac_code = Some(code.into());
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Replace the withholding tax entries. Passing an empty list is an
    /// error at build time; leave it unset when none applies.
    pub fn withholding_tax(mut self, entries: Vec<WithholdingTax>) -> Self {
        self.withholding_tax = Some(entries);
        self
    }

    pub fn add_withholding_tax(mut self, entry: WithholdingTax) -> Self {
        self.withholding_tax.get_or_insert_with(Vec::new).push(entry);
        self
    }

    /// Validate and freeze the invoice. Stops at the first violated rule,
    /// checking the EAC code first.
    pub fn build(self) -> ValidationResult<InvoiceData> {
        let invoice = InvoiceData {
            header: self.header,
            status: DocumentStatus {
                status_date: self.status.status_date.trunc_subsecs(0),
                ..self.status
            },
            hash_characters: self.hash_characters,
            cash_vat_scheme_indicator: self.cash_vat_scheme_indicator,
            paperless_indicator: self.paperless_indicator,
            eac_code: self.eac_code,
            system_entry_date: self.system_entry_date.trunc_subsecs(0),
            lines: self.lines,
            totals: self.totals,
            withholding_tax: self.withholding_tax,
        };

        if let Err(err) = validation::validate_invoice_data(&invoice) {
            error!(
                invoice_no = invoice.header.invoice_no(),
                rule = %err.rule,
                field = %err.field,
                "invoice data rejected: {}",
                err.message
            );
            return Err(err);
        }

        debug!(
            invoice_no = invoice.header.invoice_no(),
            invoice_type = invoice.header.invoice_type().code(),
            status = invoice.status.status.code(),
            hash_characters = %invoice.hash_characters,
            cash_vat_scheme = invoice.cash_vat_scheme_indicator,
            paperless = invoice.paperless_indicator,
            eac_code = invoice.eac_code.as_deref().unwrap_or("-"),
            system_entry_date = %invoice.system_entry_date.format("%Y-%m-%dT%H:%M:%S"),
            "invoice data values"
        );
        info!(
            invoice_no = invoice.header.invoice_no(),
            lines = invoice.lines.len(),
            gross_total = %invoice.totals.gross_total(),
            withholding = invoice.withholding_tax.as_ref().map_or(0, Vec::len),
            "invoice data accepted"
        );

        Ok(invoice)
    }
}
