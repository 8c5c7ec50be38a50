use rust_decimal::Decimal;
use serde::Serialize;
use tracing::error;

use super::error::ValidationResult;
use super::types::{Currency, WithholdingTaxType};
use super::validation;

/// Document totals, in EUR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentTotals {
    tax_payable: Decimal,
    net_total: Decimal,
    gross_total: Decimal,
    currency: Option<Currency>,
}

impl DocumentTotals {
    pub fn tax_payable(&self) -> Decimal {
        self.tax_payable
    }

    pub fn net_total(&self) -> Decimal {
        self.net_total
    }

    pub fn gross_total(&self) -> Decimal {
        self.gross_total
    }

    /// Foreign currency details, when the document was not issued in EUR.
    pub fn currency(&self) -> Option<&Currency> {
        self.currency.as_ref()
    }
}

/// Builder for DocumentTotals.
pub struct DocumentTotalsBuilder {
    tax_payable: Decimal,
    net_total: Decimal,
    gross_total: Decimal,
    currency: Option<Currency>,
}

impl DocumentTotalsBuilder {
    pub fn new(tax_payable: Decimal, net_total: Decimal, gross_total: Decimal) -> Self {
        Self {
            tax_payable,
            net_total,
            gross_total,
            currency: None,
        }
    }

    pub fn currency(
        mut self,
        code: impl Into<String>,
        amount: Decimal,
        exchange_rate: Decimal,
    ) -> Self {
        self.currency = Some(Currency {
            code: code.into(),
            amount,
            exchange_rate,
        });
        self
    }

    /// Build the totals, checking signs and that gross = net + tax payable.
    pub fn build(self) -> ValidationResult<DocumentTotals> {
        let totals = self.build_unchecked();
        if let Err(err) = validation::validate_totals(&totals) {
            error!(
                gross_total = %totals.gross_total,
                rule = %err.rule,
                field = %err.field,
                "document totals rejected: {}",
                err.message
            );
            return Err(err);
        }
        Ok(totals)
    }

    /// Build without validation, for exercising the validators themselves.
    pub(crate) fn build_unchecked(self) -> DocumentTotals {
        DocumentTotals {
            tax_payable: self.tax_payable,
            net_total: self.net_total,
            gross_total: self.gross_total,
            currency: self.currency,
        }
    }
}

/// Tax withheld at source on the document.
///
/// The amount is checked when the owning invoice is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithholdingTax {
    pub tax_type: WithholdingTaxType,
    pub description: Option<String>,
    pub amount: Decimal,
}

impl WithholdingTax {
    pub fn new(tax_type: WithholdingTaxType, amount: Decimal) -> Self {
        Self {
            tax_type,
            description: None,
            amount,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
