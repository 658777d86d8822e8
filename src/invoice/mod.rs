mod aggregate;
mod model;
mod parse;
mod printable;

pub use aggregate::{aggregate, AggregatedInvoice, Invoices, Totals, VatDetail};
pub use model::{ClientRecord, DocumentLine, NOT_AVAILABLE};
pub(crate) use model::cell;
pub use parse::{parse_date, parse_or_zero};
pub use printable::{display_date, format_money, format_rate, PrintableInvoice, PrintableLine};
