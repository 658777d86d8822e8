use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiSettings,
    pub company: Company,
    #[serde(default)]
    pub display: DisplaySettings,
    pub pdf: PdfSettings,
}

impl Config {
    /// Language from the config file, falling back to Catalan for unknown tags.
    pub fn locale(&self) -> Locale {
        self.display
            .language
            .as_deref()
            .and_then(Locale::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    pub url: String,
    /// Request timeout in seconds. Requests wait indefinitely when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Issuer details printed on the invoice header.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Company {
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub legal_notice: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            language: None,
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PdfSettings {
    pub output_dir: String,
}
