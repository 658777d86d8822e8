use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::parse::parse_or_zero;

/// One billable line as stored in the `documents` sheet.
///
/// Every column is kept as the raw cell text. Numeric accessors go through
/// [`parse_or_zero`] so a malformed cell never aborts aggregation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DocumentLine {
    #[serde(default, deserialize_with = "cell")]
    pub id: String,
    #[serde(alias = "num_factura", default, deserialize_with = "cell")]
    pub invoice_number: String,
    #[serde(alias = "data", default, deserialize_with = "cell")]
    pub date: String,
    #[serde(alias = "usuari", default, deserialize_with = "cell")]
    pub user: String,
    #[serde(alias = "fpagament", default, deserialize_with = "cell")]
    pub payment_method: String,
    #[serde(alias = "concepte", default, deserialize_with = "cell")]
    pub description: String,
    #[serde(alias = "preu_unitari", default, deserialize_with = "cell")]
    pub unit_price: String,
    #[serde(alias = "unitats", default, deserialize_with = "cell")]
    pub quantity: String,
    #[serde(alias = "iva", default, deserialize_with = "cell")]
    pub vat_rate: String,
    #[serde(alias = "dte", default, deserialize_with = "cell")]
    pub discount: String,
    #[serde(alias = "albara", default, deserialize_with = "cell")]
    pub delivery_note: String,
}

impl DocumentLine {
    pub fn price(&self) -> f64 {
        parse_or_zero(&self.unit_price)
    }

    pub fn units(&self) -> f64 {
        parse_or_zero(&self.quantity)
    }

    pub fn discount_rate(&self) -> f64 {
        parse_or_zero(&self.discount)
    }

    pub fn vat(&self) -> f64 {
        parse_or_zero(&self.vat_rate)
    }

    /// Taxable amount after discount: `price × quantity × (1 − discount/100)`.
    pub fn net_total(&self) -> f64 {
        self.price() * self.units() * (1.0 - self.discount_rate() / 100.0)
    }
}

/// A user/company row from the `usuaris` sheet.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ClientRecord {
    #[serde(alias = "usuari", default, deserialize_with = "cell")]
    pub user: String,
    #[serde(alias = "rol", default, deserialize_with = "cell")]
    pub role: String,
    #[serde(alias = "empresa", default, deserialize_with = "cell")]
    pub company: String,
    #[serde(alias = "fiscalid", default, deserialize_with = "cell")]
    pub fiscal_id: String,
    #[serde(alias = "adreca", default, deserialize_with = "cell")]
    pub address: String,
    #[serde(alias = "telefon", default, deserialize_with = "cell")]
    pub phone: String,
}

impl ClientRecord {
    /// Placeholder used when no record matches a line's user id.
    pub fn placeholder(user: &str, company_label: &str) -> Self {
        let user = user.trim();
        let company = if !company_label.trim().is_empty() {
            company_label.to_string()
        } else if !user.is_empty() {
            user.to_string()
        } else {
            NOT_AVAILABLE.to_string()
        };

        Self {
            user: if user.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                user.to_string()
            },
            role: "client".to_string(),
            company,
            fiscal_id: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
            phone: NOT_AVAILABLE.to_string(),
        }
    }
}

pub const NOT_AVAILABLE: &str = "N/A";

/// Sheet cells are usually strings, but a sheet with number casting enabled
/// hands back JSON numbers. Both end up as text; null becomes empty.
pub(crate) fn cell<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sheet_row() {
        let json = r#"{
            "id": "7",
            "num_factura": "F-100",
            "data": "2024-03-01",
            "usuari": "u1",
            "fpagament": "Transferència",
            "concepte": "Ports Barcelona - Lleida",
            "preu_unitari": "100",
            "unitats": 2,
            "iva": "21",
            "dte": null
        }"#;

        let line: DocumentLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.invoice_number, "F-100");
        assert_eq!(line.user, "u1");
        assert_eq!(line.quantity, "2");
        assert_eq!(line.discount, "");
        assert_eq!(line.delivery_note, "");
        assert_eq!(line.net_total(), 200.0);
    }

    #[test]
    fn test_net_total_with_discount() {
        let line = DocumentLine {
            unit_price: "50".into(),
            quantity: "1".into(),
            discount: "10".into(),
            ..Default::default()
        };
        assert!((line.net_total() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_client_record() {
        let json = r#"{"usuari":"u1","rol":"client","empresa":"Acme SL","fiscalid":"B123","adreca":"C/ Major 1","telefon":"600000000","contrasenya":"secret"}"#;
        let client: ClientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(client.company, "Acme SL");
        assert_eq!(client.fiscal_id, "B123");
    }

    #[test]
    fn test_placeholder_prefers_label() {
        let client = ClientRecord::placeholder("ghost", "Unknown client");
        assert_eq!(client.company, "Unknown client");
        assert_eq!(client.user, "ghost");
        assert_eq!(client.fiscal_id, NOT_AVAILABLE);
        assert_eq!(client.address, NOT_AVAILABLE);
        assert_eq!(client.phone, NOT_AVAILABLE);
    }

    #[test]
    fn test_placeholder_without_label_uses_user() {
        let client = ClientRecord::placeholder("ghost", "  ");
        assert_eq!(client.company, "ghost");

        let client = ClientRecord::placeholder("", "");
        assert_eq!(client.company, NOT_AVAILABLE);
        assert_eq!(client.user, NOT_AVAILABLE);
    }
}
