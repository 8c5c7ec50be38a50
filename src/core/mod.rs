//! Core e-Fatura document types, construction-time validation and builders.
//!
//! Leaf value types ([`LineItem`], [`DocumentTotals`], [`WithholdingTax`],
//! [`HashCharacters`]) are composed into the [`InvoiceData`] and [`WorkData`]
//! aggregates, which an [`Envelope`] then ties to the issuing taxpayer.

mod envelope;
mod error;
mod hash;
mod invoice;
mod line;
mod totals;
mod types;
pub mod validation;
mod work;

pub use envelope::*;
pub use error::*;
pub use hash::*;
pub use invoice::*;
pub use line::*;
pub use totals::*;
pub use types::*;
pub use work::*;
