use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use serde::Serialize;
use tracing::{debug, error, info};

use super::error::ValidationResult;
use super::hash::HashCharacters;
use super::line::LineItem;
use super::totals::DocumentTotals;
use super::types::*;
use super::validation;

/// A work document (quotation, pro-forma, worksheet, ...) as reported to
/// e-Fatura.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkData {
    document_number: String,
    atcud: String,
    status: DocumentStatus<WorkStatus>,
    hash_characters: HashCharacters,
    eac_code: Option<String>,
    work_date: NaiveDate,
    work_type: WorkType,
    customer_tax_id: String,
    customer_tax_id_country: String,
    system_entry_date: NaiveDateTime,
    lines: Vec<LineItem>,
    totals: DocumentTotals,
}

impl WorkData {
    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn atcud(&self) -> &str {
        &self.atcud
    }

    pub fn status(&self) -> &DocumentStatus<WorkStatus> {
        &self.status
    }

    pub fn hash_characters(&self) -> &HashCharacters {
        &self.hash_characters
    }

    pub fn eac_code(&self) -> Option<&str> {
        self.eac_code.as_deref()
    }

    pub fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    pub fn work_type(&self) -> WorkType {
        self.work_type
    }

    pub fn customer_tax_id(&self) -> &str {
        &self.customer_tax_id
    }

    pub fn customer_tax_id_country(&self) -> &str {
        &self.customer_tax_id_country
    }

    pub fn system_entry_date(&self) -> NaiveDateTime {
        self.system_entry_date
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn totals(&self) -> &DocumentTotals {
        &self.totals
    }
}

/// Builder for [`WorkData`].
pub struct WorkDataBuilder {
    document_number: String,
    atcud: String,
    status: DocumentStatus<WorkStatus>,
    hash_characters: HashCharacters,
    eac_code: Option<String>,
    work_date: NaiveDate,
    work_type: WorkType,
    customer_tax_id: String,
    customer_tax_id_country: String,
    system_entry_date: NaiveDateTime,
    lines: Vec<LineItem>,
    totals: DocumentTotals,
}

impl WorkDataBuilder {
    pub fn new(
        document_number: impl Into<String>,
        atcud: impl Into<String>,
        work_date: NaiveDate,
        work_type: WorkType,
        status: DocumentStatus<WorkStatus>,
        system_entry_date: NaiveDateTime,
        totals: DocumentTotals,
    ) -> Self {
        Self {
            document_number: document_number.into(),
            atcud: atcud.into(),
            status,
            hash_characters: HashCharacters::not_applicable(),
            eac_code: None,
            work_date,
            work_type,
            customer_tax_id: FINAL_CONSUMER_TAX_ID.to_string(),
            customer_tax_id_country: "PT".to_string(),
            system_entry_date,
            lines: Vec::new(),
            totals,
        }
    }

    pub fn hash_characters(mut self, hash: HashCharacters) -> Self {
        self.hash_characters = hash;
        self
    }

    pub fn eac_code(mut self, code: impl Into<String>) -> Self {
        self.eac_code = Some(code.into());
        self
    }

    pub fn customer(mut self, tax_id: impl Into<String>, country: impl Into<String>) -> Self {
        self.customer_tax_id = tax_id.into();
        self.customer_tax_id_country = country.into();
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn build(self) -> ValidationResult<WorkData> {
        let work = WorkData {
            document_number: self.document_number,
            atcud: self.atcud,
            status: DocumentStatus {
                status_date: self.status.status_date.trunc_subsecs(0),
                ..self.status
            },
            hash_characters: self.hash_characters,
            eac_code: self.eac_code,
            work_date: self.work_date,
            work_type: self.work_type,
            customer_tax_id: self.customer_tax_id,
            customer_tax_id_country: self.customer_tax_id_country,
            system_entry_date: self.system_entry_date.trunc_subsecs(0),
            lines: self.lines,
            totals: self.totals,
        };

        if let Err(err) = validation::validate_work_data(&work) {
            error!(
                document_number = %work.document_number,
                rule = %err.rule,
                field = %err.field,
                "work data rejected: {}",
                err.message
            );
            return Err(err);
        }

        debug!(
            document_number = %work.document_number,
            work_type = work.work_type.code(),
            status = work.status.status.code(),
            hash_characters = %work.hash_characters,
            eac_code = work.eac_code.as_deref().unwrap_or("-"),
            system_entry_date = %work.system_entry_date.format("%Y-%m-%dT%H:%M:%S"),
            "work data values"
        );
        info!(
            document_number = %work.document_number,
            lines = work.lines.len(),
            gross_total = %work.totals.gross_total(),
            "work data accepted"
        );

        Ok(work)
    }
}
