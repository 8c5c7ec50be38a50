//! # efatura
//!
//! Document model for the Portuguese tax authority's e-Fatura web service:
//! invoices ([`InvoiceData`]) and work documents ([`WorkData`]), wrapped in a
//! submission [`Envelope`] that identifies the issuer.
//!
//! Every document is assembled bottom-up through builders and validated once,
//! when `build()` (or [`Envelope::new`]) runs. A value that exists is valid;
//! there are no setters afterwards. Monetary values use
//! [`rust_decimal::Decimal`], dates use [`chrono`].
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use efatura::*;
//! use rust_decimal_macros::dec;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let entered = day.and_hms_opt(10, 30, 0).unwrap();
//!
//! let header = InvoiceHeaderBuilder::new("FT A/1", "CSDF7T5H-1", day, InvoiceType::Invoice)
//!     .customer("999999990", "PT")
//!     .build()
//!     .unwrap();
//! let status = DocumentStatus::new(InvoiceStatus::Normal, entered, SourceBilling::Produced);
//! let line = LineItemBuilder::new(day, LineAmount::Credit(dec!(100)))
//!     .tax(Tax::new(TaxType::Iva, "PT", TaxCode::Normal, dec!(23)))
//!     .build()
//!     .unwrap();
//! let totals = DocumentTotalsBuilder::new(dec!(23), dec!(100), dec!(123)).build().unwrap();
//!
//! let invoice = InvoiceDataBuilder::new(header, status, entered, totals)
//!     .hash_characters(HashCharacters::new("AbCd").unwrap())
//!     .eac_code("12345")
//!     .cash_vat_scheme_indicator(true)
//!     .add_line(line)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.eac_code(), Some("12345"));
//! assert!(invoice.cash_vat_scheme_indicator());
//! ```
//!
//! ## Logging
//!
//! Construction emits [`tracing`] events (`debug` for accepted values, `info`
//! per accepted aggregate, `error` for the violated rule before the error is
//! returned). The crate never installs a subscriber.

pub mod core;

// Re-export core types at crate root for convenience
pub use crate::core::*;
