use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config directory not found at {0}. Run 'freightdocs init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Not logged in. Run 'freightdocs login --user <user> --password <password>' first.")]
    NotLoggedIn,

    #[error("{0}")]
    MissingCredentials(String),

    #[error("{0}")]
    IncorrectCredentials(String),

    #[error("Failed to fetch {what}: {reason}")]
    Fetch { what: String, reason: String },

    /// Localized message shown when either sheet could not be fetched
    #[error("{0}")]
    DocumentsUnavailable(String),

    /// Localized message shown when the credential search could not run
    #[error("{0}")]
    LoginUnavailable(String),

    /// Localized message shown when the shipment search could not run
    #[error("{0}")]
    TrackingUnavailable(String),

    #[error("Invoice '{0}' not found")]
    InvoiceNotFound(String),

    #[error("Invalid invoice index '{0}'. Use 'freightdocs list' to see available invoices.")]
    InvalidInvoiceIndex(String),

    #[error("Tracking code must not be empty")]
    MissingTrackingCode,

    #[error("{message}: {code}")]
    ShipmentNotFound { code: String, message: String },

    #[error("Unsupported language '{0}'. Use one of: en, ca, es, fr, pt")]
    UnsupportedLanguage(String),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn fetch(what: &str, reason: impl ToString) -> Self {
        AppError::Fetch {
            what: what.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
