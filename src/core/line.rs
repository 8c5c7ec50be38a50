use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::error;

use super::error::ValidationResult;
use super::types::*;
use super::validation;

/// A document line: the taxable amount for one tax rate.
///
/// Documents carry one line per distinct tax rate rather than one per item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    order_references: Vec<OrderReference>,
    tax_point_date: NaiveDate,
    amount: LineAmount,
    tax: Tax,
    tax_exemption: Option<TaxExemption>,
}

impl LineItem {
    pub fn order_references(&self) -> &[OrderReference] {
        &self.order_references
    }

    pub fn tax_point_date(&self) -> NaiveDate {
        self.tax_point_date
    }

    pub fn amount(&self) -> LineAmount {
        self.amount
    }

    pub fn tax(&self) -> &Tax {
        &self.tax
    }

    pub fn tax_exemption(&self) -> Option<&TaxExemption> {
        self.tax_exemption.as_ref()
    }
}

/// Builder for LineItem.
///
/// Defaults to mainland IVA at the normal 23% rate.
pub struct LineItemBuilder {
    order_references: Vec<OrderReference>,
    tax_point_date: NaiveDate,
    amount: LineAmount,
    tax: Tax,
    tax_exemption: Option<TaxExemption>,
}

impl LineItemBuilder {
    pub fn new(tax_point_date: NaiveDate, amount: LineAmount) -> Self {
        Self {
            order_references: Vec::new(),
            tax_point_date,
            amount,
            tax: Tax::new(TaxType::Iva, "PT", TaxCode::Normal, Decimal::new(23, 0)),
            tax_exemption: None,
        }
    }

    pub fn tax(mut self, tax: Tax) -> Self {
        self.tax = tax;
        self
    }

    pub fn exemption(mut self, code: impl Into<String>, reason: impl Into<String>) -> Self {
        self.tax_exemption = Some(TaxExemption {
            code: code.into(),
            reason: reason.into(),
        });
        self
    }

    pub fn order_reference(
        mut self,
        originating_on: impl Into<String>,
        order_date: Option<NaiveDate>,
    ) -> Self {
        self.order_references.push(OrderReference {
            originating_on: originating_on.into(),
            order_date,
        });
        self
    }

    pub fn build(self) -> ValidationResult<LineItem> {
        let line = LineItem {
            order_references: self.order_references,
            tax_point_date: self.tax_point_date,
            amount: self.amount,
            tax: self.tax,
            tax_exemption: self.tax_exemption,
        };
        if let Err(err) = validation::validate_line(&line, "line") {
            error!(
                tax_type = line.tax.tax_type.code(),
                rule = %err.rule,
                field = %err.field,
                "line rejected: {}",
                err.message
            );
            return Err(err);
        }
        Ok(line)
    }
}
