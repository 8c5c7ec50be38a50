use chrono::{NaiveDate, NaiveDateTime};
use efatura::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry_time() -> NaiveDateTime {
    date(2024, 1, 15).and_hms_opt(10, 30, 0).unwrap()
}

fn header() -> InvoiceHeader {
    InvoiceHeaderBuilder::new("FT A/1", "CSDF7T5H-1", date(2024, 1, 15), InvoiceType::Invoice)
        .customer("508332052", "PT")
        .build()
        .unwrap()
}

fn status() -> DocumentStatus<InvoiceStatus> {
    DocumentStatus::new(InvoiceStatus::Normal, entry_time(), SourceBilling::Produced)
}

fn normal_line() -> LineItem {
    LineItemBuilder::new(date(2024, 1, 15), LineAmount::Credit(dec!(100)))
        .tax(Tax::new(TaxType::Iva, "PT", TaxCode::Normal, dec!(23)))
        .build()
        .unwrap()
}

fn reduced_line() -> LineItem {
    LineItemBuilder::new(date(2024, 1, 15), LineAmount::Credit(dec!(50)))
        .tax(Tax::new(TaxType::Iva, "PT", TaxCode::Reduced, dec!(6)))
        .build()
        .unwrap()
}

fn totals() -> DocumentTotals {
    DocumentTotalsBuilder::new(dec!(26), dec!(150), dec!(176))
        .build()
        .unwrap()
}

fn builder() -> InvoiceDataBuilder {
    InvoiceDataBuilder::new(header(), status(), entry_time(), totals())
        .hash_characters(HashCharacters::new("Ab3+").unwrap())
        .add_line(normal_line())
        .add_line(reduced_line())
}

// --- End-to-end scenarios ---

#[test]
fn invoice_with_eac_code_and_cash_vat() {
    let inv = builder()
        .eac_code("12345")
        .cash_vat_scheme_indicator(true)
        .paperless_indicator(false)
        .build()
        .unwrap();

    assert_eq!(inv.eac_code(), Some("12345"));
    assert!(inv.cash_vat_scheme_indicator());
    assert!(!inv.paperless_indicator());
    assert_eq!(
        inv.system_entry_date().format("%Y-%m-%dT%H:%M:%S").to_string(),
        "2024-01-15T10:30:00"
    );
}

#[test]
fn four_digit_eac_code_rejected() {
    let err = builder()
        .eac_code("1234")
        .cash_vat_scheme_indicator(true)
        .build()
        .unwrap_err();

    assert_eq!(err.rule, ValidationRule::EacCode);
    assert_eq!(err.field, "eac_code");
    assert!(err.to_string().contains("EAC code '1234'"), "{err}");
}

#[test]
fn missing_eac_code_is_fine() {
    let inv = builder().build().unwrap();
    assert_eq!(inv.eac_code(), None);
}

// --- Accessor round trip ---

#[test]
fn accessors_return_supplied_values() {
    let withholding = vec![
        WithholdingTax::new(WithholdingTaxType::Irs, dec!(25)).with_description("Cat. B"),
        WithholdingTax::new(WithholdingTaxType::StampDuty, dec!(1.50)),
    ];
    let inv = builder()
        .eac_code("47190")
        .paperless_indicator(true)
        .withholding_tax(withholding.clone())
        .build()
        .unwrap();

    assert_eq!(inv.header(), &header());
    assert_eq!(inv.status(), &status());
    assert_eq!(inv.hash_characters().as_str(), "Ab3+");
    assert!(!inv.cash_vat_scheme_indicator());
    assert!(inv.paperless_indicator());
    assert_eq!(inv.system_entry_date(), entry_time());
    assert_eq!(inv.lines(), &[normal_line(), reduced_line()]);
    assert_eq!(inv.totals(), &totals());
    assert_eq!(inv.withholding_tax(), Some(withholding.as_slice()));
}

#[test]
fn header_accessors() {
    let h = header();
    assert_eq!(h.invoice_no(), "FT A/1");
    assert_eq!(h.atcud(), "CSDF7T5H-1");
    assert_eq!(h.invoice_date(), date(2024, 1, 15));
    assert_eq!(h.invoice_type(), InvoiceType::Invoice);
    assert!(!h.self_billing_indicator());
    assert_eq!(h.customer_tax_id(), "508332052");
    assert_eq!(h.customer_tax_id_country(), "PT");
}

#[test]
fn header_defaults_to_final_consumer() {
    let h = InvoiceHeaderBuilder::new("FS B/9", "X-9", date(2024, 1, 15), InvoiceType::SimplifiedInvoice)
        .build()
        .unwrap();
    assert_eq!(h.customer_tax_id(), FINAL_CONSUMER_TAX_ID);
}

#[test]
fn header_accepts_unknown_customer_country() {
    let h = InvoiceHeaderBuilder::new("FT A/2", "X-2", date(2024, 1, 15), InvoiceType::Invoice)
        .customer("AB1234567", UNKNOWN_COUNTRY)
        .build()
        .unwrap();
    assert_eq!(h.customer_tax_id_country(), "Desconhecido");
}

#[test]
fn header_rejects_bad_number_and_empty_atcud() {
    let err = InvoiceHeaderBuilder::new("FT-1", "X-1", date(2024, 1, 15), InvoiceType::Invoice)
        .build()
        .unwrap_err();
    assert_eq!(err.rule, ValidationRule::DocumentNumber);
    assert_eq!(err.field, "header.invoice_no");

    let err = InvoiceHeaderBuilder::new("FT A/1", "  ", date(2024, 1, 15), InvoiceType::Invoice)
        .build()
        .unwrap_err();
    assert_eq!(err.rule, ValidationRule::RequiredField);
    assert_eq!(err.field, "header.atcud");
}

// --- Withholding tax convention ---

#[test]
fn absent_withholding_tax_is_none() {
    let inv = builder().build().unwrap();
    assert!(inv.withholding_tax().is_none());
}

#[test]
fn empty_withholding_tax_list_rejected() {
    let err = builder().withholding_tax(Vec::new()).build().unwrap_err();
    assert_eq!(err.rule, ValidationRule::WithholdingTaxPresent);
}

#[test]
fn add_withholding_tax_accumulates() {
    let inv = builder()
        .add_withholding_tax(WithholdingTax::new(WithholdingTaxType::Irs, dec!(10)))
        .add_withholding_tax(WithholdingTax::new(WithholdingTaxType::Irc, dec!(5)))
        .build()
        .unwrap();
    let types: Vec<_> = inv
        .withholding_tax()
        .unwrap()
        .iter()
        .map(|w| w.tax_type)
        .collect();
    assert_eq!(types, [WithholdingTaxType::Irs, WithholdingTaxType::Irc]);
}

#[test]
fn negative_withholding_amount_rejected() {
    let err = builder()
        .add_withholding_tax(WithholdingTax::new(WithholdingTaxType::Irs, dec!(-1)))
        .build()
        .unwrap_err();
    assert_eq!(err.rule, ValidationRule::NegativeAmount);
}

// --- Lines ---

#[test]
fn invoice_without_lines_rejected_even_without_eac_code() {
    // a missing EAC code never relaxes the line requirement
    let err = InvoiceDataBuilder::new(header(), status(), entry_time(), totals())
        .build()
        .unwrap_err();
    assert_eq!(err.rule, ValidationRule::LinesPresent);
}

#[test]
fn duplicate_tax_rate_rejected() {
    let err = builder().add_line(normal_line()).build().unwrap_err();
    assert_eq!(err.rule, ValidationRule::DuplicateTaxRate);
    assert_eq!(err.field, "lines[2].tax");
}

#[test]
fn same_rate_in_other_region_is_a_separate_line() {
    let madeira = LineItemBuilder::new(date(2024, 1, 15), LineAmount::Credit(dec!(10)))
        .tax(Tax::new(TaxType::Iva, "PT-MA", TaxCode::Normal, dec!(23)))
        .build()
        .unwrap();
    assert!(builder().add_line(madeira).build().is_ok());
}

#[test]
fn eac_code_reported_before_line_errors() {
    let err = InvoiceDataBuilder::new(header(), status(), entry_time(), totals())
        .eac_code("abcde")
        .withholding_tax(Vec::new())
        .build()
        .unwrap_err();
    assert_eq!(err.rule, ValidationRule::EacCode);
}

// --- Misc ---

#[test]
fn system_entry_date_truncated_to_seconds() {
    let precise = date(2024, 1, 15).and_hms_milli_opt(10, 30, 0, 750).unwrap();
    let inv = InvoiceDataBuilder::new(header(), status(), precise, totals())
        .add_line(normal_line())
        .build()
        .unwrap();
    assert_eq!(inv.system_entry_date(), entry_time());
}

#[test]
fn status_date_truncated_to_seconds() {
    let precise = date(2024, 1, 15).and_hms_micro_opt(10, 30, 0, 123_456).unwrap();
    let status = DocumentStatus::new(InvoiceStatus::Normal, precise, SourceBilling::Produced);
    assert_eq!(status.status_date, entry_time());
}

#[test]
fn hash_characters_default_to_sentinel() {
    let inv = InvoiceDataBuilder::new(header(), status(), entry_time(), totals())
        .add_line(normal_line())
        .build()
        .unwrap();
    assert!(inv.hash_characters().is_not_applicable());
}

#[test]
fn cancelled_status_keeps_reason() {
    let cancelled = DocumentStatus::new(InvoiceStatus::Cancelled, entry_time(), SourceBilling::Produced)
        .with_reason("Erro de faturação");
    let inv = InvoiceDataBuilder::new(header(), cancelled, entry_time(), totals())
        .add_line(normal_line())
        .build()
        .unwrap();
    assert_eq!(inv.status().status, InvoiceStatus::Cancelled);
    assert_eq!(inv.status().reason.as_deref(), Some("Erro de faturação"));
}

#[test]
fn built_invoice_is_shareable_across_threads() {
    let inv = std::sync::Arc::new(builder().eac_code("12345").build().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let inv = std::sync::Arc::clone(&inv);
            std::thread::spawn(move || inv.eac_code().map(str::to_owned))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap().as_deref(), Some("12345"));
    }
}

#[test]
fn serializes_for_transport() {
    let inv = builder().eac_code("12345").build().unwrap();
    let json = serde_json::to_value(&inv).unwrap();
    assert_eq!(json["eac_code"], "12345");
    assert_eq!(json["hash_characters"], "Ab3+");
    assert_eq!(json["cash_vat_scheme_indicator"], false);
    assert_eq!(json["header"]["invoice_no"], "FT A/1");
    assert_eq!(json["totals"]["gross_total"], "176");
    assert!(json["withholding_tax"].is_null());
}

// --- Code tables ---

#[test]
fn status_codes_round_trip() {
    for status in [
        InvoiceStatus::Normal,
        InvoiceStatus::SelfBilling,
        InvoiceStatus::Cancelled,
        InvoiceStatus::Summary,
        InvoiceStatus::Invoiced,
    ] {
        assert_eq!(InvoiceStatus::from_code(status.code()), Some(status));
    }
    assert_eq!(InvoiceStatus::from_code("X"), None);
    assert_eq!(InvoiceType::from_code("NC"), Some(InvoiceType::CreditNote));
    assert_eq!(TaxType::from_code("IS"), Some(TaxType::StampDuty));
    assert_eq!(TaxCode::from_code("ISE"), Some(TaxCode::Exempt));
    assert_eq!(SourceBilling::from_code("M"), Some(SourceBilling::Manual));
    assert_eq!(WithholdingTaxType::from_code("IRC"), Some(WithholdingTaxType::Irc));
}
