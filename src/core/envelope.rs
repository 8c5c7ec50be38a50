use serde::Serialize;
use tracing::{debug, error, info};

use super::error::ValidationResult;
use super::invoice::InvoiceData;
use super::types::{RecordChannel, TaxEntity};
use super::validation;
use super::work::WorkData;

/// A document that can be submitted inside an [`Envelope`].
pub trait ReportableDocument {
    /// Document family, used in log records.
    const KIND: &'static str;

    /// The document's own number, e.g. "FT A/1".
    fn document_number(&self) -> &str;
}

impl ReportableDocument for InvoiceData {
    const KIND: &'static str = "invoice";

    fn document_number(&self) -> &str {
        self.header().invoice_no()
    }
}

impl ReportableDocument for WorkData {
    const KIND: &'static str = "work";

    fn document_number(&self) -> &str {
        self.document_number()
    }
}

/// A document together with the identification of who submits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<D> {
    tax_registration_number: String,
    tax_entity: TaxEntity,
    software_certificate_number: u32,
    document: D,
    record_channel: Option<RecordChannel>,
}

/// Work document submission.
pub type WorkDocument = Envelope<WorkData>;

/// Invoice submission.
pub type InvoiceDocument = Envelope<InvoiceData>;

impl<D: ReportableDocument> Envelope<D> {
    /// Wrap a document for submission.
    ///
    /// `tax_registration_number` is the issuer's TIN without country prefix.
    /// `software_certificate_number` is 0 when no certified software was used.
    pub fn new(
        tax_registration_number: impl Into<String>,
        tax_entity: TaxEntity,
        software_certificate_number: u32,
        document: D,
        record_channel: Option<RecordChannel>,
    ) -> ValidationResult<Self> {
        let tax_registration_number = tax_registration_number.into();

        if let Err(err) = validation::validate_submitter(
            &tax_registration_number,
            &tax_entity,
            record_channel.as_ref(),
        ) {
            error!(
                kind = D::KIND,
                document_number = document.document_number(),
                rule = %err.rule,
                field = %err.field,
                "submission rejected: {}",
                err.message
            );
            return Err(err);
        }

        debug!(
            kind = D::KIND,
            tax_registration_number = %tax_registration_number,
            tax_entity = tax_entity.code(),
            software_certificate_number,
            record_channel = ?record_channel,
            "submission values"
        );
        info!(
            kind = D::KIND,
            document_number = document.document_number(),
            "submission accepted"
        );

        Ok(Self {
            tax_registration_number,
            tax_entity,
            software_certificate_number,
            document,
            record_channel,
        })
    }
}

impl<D> Envelope<D> {
    pub fn tax_registration_number(&self) -> &str {
        &self.tax_registration_number
    }

    pub fn tax_entity(&self) -> &TaxEntity {
        &self.tax_entity
    }

    /// 0 means not applicable.
    pub fn software_certificate_number(&self) -> u32 {
        self.software_certificate_number
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn record_channel(&self) -> Option<&RecordChannel> {
        self.record_channel.as_ref()
    }

    /// Take the document back out of the envelope.
    pub fn into_document(self) -> D {
        self.document
    }
}

impl Envelope<WorkData> {
    pub fn work_data(&self) -> &WorkData {
        &self.document
    }
}

impl Envelope<InvoiceData> {
    pub fn invoice_data(&self) -> &InvoiceData {
        &self.document
    }
}
