use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;
use serde::Serialize;

/// Customer tax ID used for anonymous final consumers.
pub const FINAL_CONSUMER_TAX_ID: &str = "999999990";

/// Country value used when the customer's country is not known.
pub const UNKNOWN_COUNTRY: &str = "Desconhecido";

/// SAF-T PT invoice type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InvoiceType {
    /// FT: Invoice.
    Invoice,
    /// FS: Simplified invoice.
    SimplifiedInvoice,
    /// FR: Invoice-receipt.
    InvoiceReceipt,
    /// ND: Debit note.
    DebitNote,
    /// NC: Credit note.
    CreditNote,
}

impl InvoiceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "FT",
            Self::SimplifiedInvoice => "FS",
            Self::InvoiceReceipt => "FR",
            Self::DebitNote => "ND",
            Self::CreditNote => "NC",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FT" => Some(Self::Invoice),
            "FS" => Some(Self::SimplifiedInvoice),
            "FR" => Some(Self::InvoiceReceipt),
            "ND" => Some(Self::DebitNote),
            "NC" => Some(Self::CreditNote),
            _ => None,
        }
    }
}

/// Lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InvoiceStatus {
    /// N: Normal.
    Normal,
    /// S: Self-billing.
    SelfBilling,
    /// A: Cancelled.
    Cancelled,
    /// R: Summary document for other documents created in other applications.
    Summary,
    /// F: Invoiced (already covered by a summary invoice).
    Invoiced,
}

impl InvoiceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::SelfBilling => "S",
            Self::Cancelled => "A",
            Self::Summary => "R",
            Self::Invoiced => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Self::Normal),
            "S" => Some(Self::SelfBilling),
            "A" => Some(Self::Cancelled),
            "R" => Some(Self::Summary),
            "F" => Some(Self::Invoiced),
            _ => None,
        }
    }
}

/// SAF-T PT work document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WorkType {
    /// CM: Table consultation.
    TableConsultation,
    /// CC: Consignment credit note.
    ConsignmentCreditNote,
    /// FC: Consignment invoice.
    ConsignmentInvoice,
    /// FO: Worksheet.
    Worksheet,
    /// NE: Purchase order.
    PurchaseOrder,
    /// OU: Other.
    Other,
    /// OR: Budget / quotation.
    Budget,
    /// PF: Pro-forma invoice.
    ProForma,
    /// RP: Premium or premium receipt (insurance).
    Premium,
    /// RE: Reversal (insurance).
    Reversal,
    /// CS: Allocation to co-insurers.
    CoInsurers,
    /// LD: Allocation to leading co-insurer.
    LeadCoInsurer,
    /// RA: Accepted reinsurance.
    AcceptedReinsurance,
}

impl WorkType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TableConsultation => "CM",
            Self::ConsignmentCreditNote => "CC",
            Self::ConsignmentInvoice => "FC",
            Self::Worksheet => "FO",
            Self::PurchaseOrder => "NE",
            Self::Other => "OU",
            Self::Budget => "OR",
            Self::ProForma => "PF",
            Self::Premium => "RP",
            Self::Reversal => "RE",
            Self::CoInsurers => "CS",
            Self::LeadCoInsurer => "LD",
            Self::AcceptedReinsurance => "RA",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CM" => Some(Self::TableConsultation),
            "CC" => Some(Self::ConsignmentCreditNote),
            "FC" => Some(Self::ConsignmentInvoice),
            "FO" => Some(Self::Worksheet),
            "NE" => Some(Self::PurchaseOrder),
            "OU" => Some(Self::Other),
            "OR" => Some(Self::Budget),
            "PF" => Some(Self::ProForma),
            "RP" => Some(Self::Premium),
            "RE" => Some(Self::Reversal),
            "CS" => Some(Self::CoInsurers),
            "LD" => Some(Self::LeadCoInsurer),
            "RA" => Some(Self::AcceptedReinsurance),
            _ => None,
        }
    }
}

/// Lifecycle status of a work document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WorkStatus {
    /// N: Normal.
    Normal,
    /// A: Cancelled.
    Cancelled,
    /// F: Invoiced.
    Invoiced,
}

impl WorkStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::Cancelled => "A",
            Self::Invoiced => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Self::Normal),
            "A" => Some(Self::Cancelled),
            "F" => Some(Self::Invoiced),
            _ => None,
        }
    }
}

/// Origin of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceBilling {
    /// P: Produced in this application.
    Produced,
    /// I: Integrated from another application.
    Integrated,
    /// M: Manually recovered or issued on paper.
    Manual,
}

impl SourceBilling {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Produced => "P",
            Self::Integrated => "I",
            Self::Manual => "M",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(Self::Produced),
            "I" => Some(Self::Integrated),
            "M" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// Status block shared by invoices and work documents.
///
/// `S` is [`InvoiceStatus`] or [`WorkStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStatus<S> {
    pub status: S,
    /// When the status was last set (second precision).
    pub status_date: NaiveDateTime,
    /// Free-text reason, typically given for cancellations.
    pub reason: Option<String>,
    pub source_billing: SourceBilling,
}

impl<S> DocumentStatus<S> {
    /// Sub-second precision in `status_date` is dropped.
    pub fn new(status: S, status_date: NaiveDateTime, source_billing: SourceBilling) -> Self {
        Self {
            status,
            status_date: status_date.trunc_subsecs(0),
            reason: None,
            source_billing,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Tax regime a line is subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaxType {
    /// IVA: Value added tax.
    Iva,
    /// IS: Stamp duty.
    StampDuty,
    /// NS: Not subject to IVA or stamp duty.
    NotSubject,
}

impl TaxType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Iva => "IVA",
            Self::StampDuty => "IS",
            Self::NotSubject => "NS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "IVA" => Some(Self::Iva),
            "IS" => Some(Self::StampDuty),
            "NS" => Some(Self::NotSubject),
            _ => None,
        }
    }
}

/// IVA rate band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaxCode {
    /// RED: Reduced rate.
    Reduced,
    /// INT: Intermediate rate.
    Intermediate,
    /// NOR: Normal rate.
    Normal,
    /// ISE: Exempt.
    Exempt,
    /// OUT: Other.
    Other,
}

impl TaxCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Reduced => "RED",
            Self::Intermediate => "INT",
            Self::Normal => "NOR",
            Self::Exempt => "ISE",
            Self::Other => "OUT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RED" => Some(Self::Reduced),
            "INT" => Some(Self::Intermediate),
            "NOR" => Some(Self::Normal),
            "ISE" => Some(Self::Exempt),
            "OUT" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Tax applied to a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tax {
    pub tax_type: TaxType,
    /// ISO 3166-1 alpha-2 country, or `PT-AC` / `PT-MA` for the autonomous regions.
    pub country_region: String,
    pub code: TaxCode,
    /// Percentage, 0..=100.
    pub percentage: Decimal,
}

impl Tax {
    pub fn new(
        tax_type: TaxType,
        country_region: impl Into<String>,
        code: TaxCode,
        percentage: Decimal,
    ) -> Self {
        Self {
            tax_type,
            country_region: country_region.into(),
            code,
            percentage,
        }
    }
}

/// Legal basis for a zero-rated or exempt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxExemption {
    /// Exemption code, `M` followed by two digits (e.g. "M07").
    pub code: String,
    pub reason: String,
}

/// Reference to the originating document of a line (e.g. the invoice a
/// credit note corrects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReference {
    pub originating_on: String,
    pub order_date: Option<NaiveDate>,
}

/// Line amount, excluding tax. Sales are credits, returns are debits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineAmount {
    Debit(Decimal),
    Credit(Decimal),
}

impl LineAmount {
    pub fn value(&self) -> Decimal {
        match self {
            Self::Debit(v) | Self::Credit(v) => *v,
        }
    }
}

/// Foreign currency information for documents not issued in EUR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Currency {
    /// ISO 4217 code.
    pub code: String,
    /// Gross total in the foreign currency.
    pub amount: Decimal,
    /// Units of EUR per unit of foreign currency.
    pub exchange_rate: Decimal,
}

/// Withholding tax category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WithholdingTaxType {
    /// IRS: Personal income tax.
    Irs,
    /// IRC: Corporate income tax.
    Irc,
    /// IS: Stamp duty.
    StampDuty,
}

impl WithholdingTaxType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Irs => "IRS",
            Self::Irc => "IRC",
            Self::StampDuty => "IS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "IRS" => Some(Self::Irs),
            "IRC" => Some(Self::Irc),
            "IS" => Some(Self::StampDuty),
            _ => None,
        }
    }
}

/// Establishment the submission is made for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TaxEntity {
    /// "Global": the taxpayer as a whole.
    Global,
    /// "Sede": head office.
    HeadOffice,
    /// A named establishment.
    Establishment(String),
}

impl TaxEntity {
    pub fn code(&self) -> &str {
        match self {
            Self::Global => "Global",
            Self::HeadOffice => "Sede",
            Self::Establishment(name) => name,
        }
    }

    /// Parse a wire value. "Head Office" is accepted as an alias of "Sede";
    /// any other value names an establishment.
    pub fn from_code(code: &str) -> Self {
        match code {
            "Global" => Self::Global,
            "Sede" | "Head Office" => Self::HeadOffice,
            name => Self::Establishment(name.to_string()),
        }
    }
}

/// Software that produced the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordChannel {
    pub system: String,
    pub version: String,
}

impl RecordChannel {
    pub fn new(system: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            version: version.into(),
        }
    }
}
