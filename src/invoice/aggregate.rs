use std::collections::HashMap;

use serde::Serialize;

use super::model::{ClientRecord, DocumentLine};
use super::parse::parse_date;

/// Tax subtotal for a single VAT rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VatDetail {
    pub rate: f64,
    pub base: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Totals {
    pub base: f64,
    /// One entry per distinct rate, in order of first appearance.
    pub vat_details: Vec<VatDetail>,
    pub total_vat: f64,
    pub final_total: f64,
}

impl Totals {
    fn from_lines(lines: &[DocumentLine]) -> Self {
        let mut base = 0.0;
        let mut vat_details: Vec<VatDetail> = Vec::new();

        for line in lines {
            let net = line.net_total();
            let rate = line.vat();
            base += net;

            let amount = net * (rate / 100.0);
            match vat_details.iter_mut().find(|d| d.rate == rate) {
                Some(detail) => {
                    detail.base += net;
                    detail.amount += amount;
                }
                None => vat_details.push(VatDetail {
                    rate,
                    base: net,
                    amount,
                }),
            }
        }

        let total_vat = vat_details.iter().map(|d| d.amount).sum::<f64>();

        Self {
            base,
            vat_details,
            total_vat,
            final_total: base + total_vat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedInvoice {
    pub invoice_number: String,
    pub date: String,
    pub payment_method: String,
    pub client: ClientRecord,
    pub lines: Vec<DocumentLine>,
    pub totals: Totals,
}

/// Aggregated invoices keyed by number, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Invoices {
    entries: Vec<AggregatedInvoice>,
    index: HashMap<String, usize>,
}

impl Invoices {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, invoice_number: &str) -> Option<&AggregatedInvoice> {
        self.index.get(invoice_number).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatedInvoice> {
        self.entries.iter()
    }

    /// Newest first. Equal dates keep their relative order, and invoices
    /// whose date can't be read go to the end.
    pub fn sorted_by_date_desc(&self) -> Vec<&AggregatedInvoice> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            let (da, db) = (parse_date(&a.date), parse_date(&b.date));
            match (da, db) {
                (Some(da), Some(db)) => db.cmp(&da),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        sorted
    }
}

/// Group document lines by invoice number and compute tax-aware totals.
///
/// Lines with a blank invoice number are dropped. Each group takes its date
/// and payment method from its first line. A user id with no matching
/// client record gets a placeholder whose company is `unknown_client`.
/// Never fails: malformed numbers count as zero.
pub fn aggregate(
    lines: &[DocumentLine],
    clients: &[ClientRecord],
    unknown_client: &str,
) -> Invoices {
    let mut groups: Vec<(&str, Vec<DocumentLine>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for line in lines {
        let number = line.invoice_number.as_str();
        if number.trim().is_empty() {
            continue;
        }
        match positions.get(number) {
            Some(&i) => groups[i].1.push(line.clone()),
            None => {
                positions.insert(number, groups.len());
                groups.push((number, vec![line.clone()]));
            }
        }
    }

    let mut invoices = Invoices::default();

    for (number, group) in groups {
        let first = &group[0];
        let client = clients
            .iter()
            .find(|c| c.user == first.user)
            .cloned()
            .unwrap_or_else(|| ClientRecord::placeholder(&first.user, unknown_client));

        let invoice = AggregatedInvoice {
            invoice_number: number.to_string(),
            date: first.date.clone(),
            payment_method: first.payment_method.clone(),
            client,
            totals: Totals::from_lines(&group),
            lines: group,
        };

        invoices
            .index
            .insert(invoice.invoice_number.clone(), invoices.entries.len());
        invoices.entries.push(invoice);
    }

    tracing::debug!(
        lines = lines.len(),
        invoices = invoices.len(),
        "aggregated document lines"
    );

    invoices
}
