use serde::Serialize;

use super::aggregate::{AggregatedInvoice, VatDetail};
use super::model::ClientRecord;
use super::parse::parse_date;
use crate::config::{Company, Config};
use crate::i18n::{Labels, Locale};

/// A line item on the printed invoice
#[derive(Debug, Serialize)]
pub struct PrintableLine {
    pub description: String,
    pub price: f64,
    pub units: f64,
    pub discount: f64,
    /// VAT rate as written in the sheet
    pub vat_rate: String,
    pub net: f64,
}

/// Everything the invoice renderers need, with labels already localized
#[derive(Debug, Serialize)]
pub struct PrintableInvoice {
    pub number: String,
    pub date: String,
    pub payment_method: String,
    pub company: Company,
    pub client: ClientRecord,
    pub lines: Vec<PrintableLine>,
    pub base: f64,
    pub vat_details: Vec<VatDetail>,
    pub total_vat: f64,
    pub final_total: f64,
    pub currency_symbol: String,
    pub legal_notice: String,
    pub labels: &'static Labels,
}

impl PrintableInvoice {
    pub fn new(invoice: &AggregatedInvoice, config: &Config, locale: Locale) -> Self {
        let labels = locale.labels();

        let lines = invoice
            .lines
            .iter()
            .map(|line| PrintableLine {
                description: line.description.clone(),
                price: line.price(),
                units: line.units(),
                discount: line.discount_rate(),
                vat_rate: line.vat_rate.trim().to_string(),
                net: line.net_total(),
            })
            .collect();

        Self {
            number: invoice.invoice_number.clone(),
            date: display_date(&invoice.date, locale),
            payment_method: invoice.payment_method.clone(),
            company: config.company.clone(),
            client: invoice.client.clone(),
            lines,
            base: invoice.totals.base,
            vat_details: invoice.totals.vat_details.clone(),
            total_vat: invoice.totals.total_vat,
            final_total: invoice.totals.final_total,
            currency_symbol: config.display.currency_symbol.clone(),
            legal_notice: config
                .company
                .legal_notice
                .clone()
                .unwrap_or_else(|| labels.legal_notice.to_string()),
            labels,
        }
    }
}

/// Date in the locale's usual numeric order; unreadable dates are shown as-is.
pub fn display_date(text: &str, locale: Locale) -> String {
    match parse_date(text) {
        Some(date) if locale == Locale::En => date.format("%m/%d/%Y").to_string(),
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => text.trim().to_string(),
    }
}

/// Two decimals followed by the currency symbol, e.g. `296.45 €`.
pub fn format_money(value: f64, currency_symbol: &str) -> String {
    format!("{:.2} {}", value, currency_symbol)
}

/// Rates print without a trailing `.0`: `21`, `5.5`.
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}", rate as i64)
    } else {
        format!("{}", rate)
    }
}
