use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::{AppError, Result};
use crate::invoice::PrintableInvoice;

/// Embedded Typst template for a printable invoice.
/// Uses a placeholder that gets replaced with the actual JSON file path
const INVOICE_TEMPLATE: &str = r##"// Invoice Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")
#let l = data.labels

#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
)

#set text(font: "Helvetica", size: 10pt)

#let fmt-money(amount) = {
  let parts = str(calc.round(amount, digits: 2)).split(".")
  let frac = if parts.len() > 1 { parts.at(1) } else { "00" }
  let frac2 = if frac.len() == 1 { frac + "0" } else { frac }
  parts.at(0) + "." + frac2 + " " + data.currency_symbol
}

#let fmt-pct(value) = {
  let parts = str(calc.round(value, digits: 2)).split(".")
  let frac = if parts.len() > 1 { parts.at(1) } else { "00" }
  let frac2 = if frac.len() == 1 { frac + "0" } else { frac }
  parts.at(0) + "." + frac2 + " %"
}

// Header with issuer and invoice details
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [
    #text(size: 16pt, weight: "bold")[#data.company.name]
    #v(0.3em)
    #data.company.address \
    #data.company.city
  ],
  [
    #text(size: 24pt, weight: "bold")[#upper(l.invoice)]
    #v(0.5em)
    *\# #data.number* \
    #l.date: #data.date
  ]
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

// Client block
#text(weight: "bold", size: 11pt)[#l.client_data]
#v(0.3em)
#text(weight: "bold")[#data.client.company] \
#data.client.address \
#l.fiscal_id: #data.client.fiscal_id \
#l.phone: #data.client.phone

#v(1.5em)

// Line items table
#table(
  columns: (1fr, auto, auto, auto, auto, auto),
  align: (left, right, right, right, right, right),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else if y > 0 { (bottom: 0.5pt + gray) },
  inset: 8pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },

  // Header
  [*#l.concept*], [*#l.price*], [*#l.units*], [*#l.discount*], [*#l.vat (%)*], [*#l.net*],

  // Items
  ..data.lines.map(line => (
    line.description,
    [#fmt-money(line.price)],
    [#line.units],
    [#fmt-pct(line.discount)],
    [#line.vat_rate %],
    [#fmt-money(line.net)],
  )).flatten()
)

#v(1em)

// Totals
#align(right)[
  #table(
    columns: (auto, auto),
    stroke: none,
    align: (right, right),
    inset: 6pt,

    [#l.base:], [#fmt-money(data.base)],

    ..data.vat_details.map(vat => (
      [#l.vat #vat.rate% (#fmt-money(vat.base)):], [#fmt-money(vat.amount)],
    )).flatten(),

    table.hline(stroke: 1pt),
    [*#l.total:*], [*#fmt-money(data.final_total)*],
  )
]

#v(2em)

#text(weight: "bold")[#l.payment_method:] #data.payment_method

#v(1fr)
#line(length: 100%, stroke: 0.5pt + gray)
#text(size: 8pt, fill: gray)[#data.legal_notice]
"##;

/// Write data.json and invoice.typ into a fresh temp dir.
/// The dir and its files are removed when the returned guard drops.
fn stage_sources(invoice: &PrintableInvoice) -> Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::Builder::new().prefix("freightdocs-").tempdir()?;

    let json_data =
        serde_json::to_string(invoice).map_err(|e| AppError::PdfGeneration(e.to_string()))?;

    // data.json sits next to the template so the relative path resolves
    std::fs::write(temp_dir.path().join("data.json"), &json_data)?;

    let template_content = INVOICE_TEMPLATE.replace("DATA_JSON_PATH", "data.json");
    let template_path = temp_dir.path().join("invoice.typ");
    std::fs::write(&template_path, &template_content)?;

    Ok((temp_dir, template_path))
}

/// Generate an invoice PDF using Typst CLI
pub fn generate_pdf(invoice: &PrintableInvoice, output_path: &Path) -> Result<()> {
    // Check if typst is available
    if Command::new("typst").arg("--version").output().is_err() {
        return Err(AppError::TypstNotFound);
    }

    let (temp_dir, template_path) = stage_sources(invoice)?;

    tracing::debug!(number = %invoice.number, output = %output_path.display(), "compiling invoice");

    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(temp_dir.path())
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::PdfGeneration(stderr.to_string()));
    }

    Ok(())
}
