pub mod auth;
pub mod config;
pub mod error;
pub mod i18n;
pub mod invoice;
pub mod pdf;
pub mod sheet;
pub mod tracking;

pub use config::{Config, Session};
pub use error::{AppError, Result};
pub use invoice::{aggregate, AggregatedInvoice, ClientRecord, DocumentLine, Invoices, Totals};
pub use sheet::{load_invoices, DataSource, SheetClient};
