use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::{builder::Builder, settings::Style};
use tracing_subscriber::EnvFilter;

use freightdocs::auth::{login, logout};
use freightdocs::config::{
    config_dir, load_config, load_session, resolve_output_dir, Config, CONFIG_TEMPLATE,
};
use freightdocs::error::{AppError, Result};
use freightdocs::i18n::{Labels, Locale};
use freightdocs::invoice::{
    display_date, format_money, format_rate, AggregatedInvoice, PrintableInvoice,
};
use freightdocs::pdf::generate_pdf;
use freightdocs::sheet::{load_invoices, DocumentView, SheetClient};
use freightdocs::tracking::{progress_bar, track};

#[derive(Parser)]
#[command(name = "freightdocs")]
#[command(version, about = "Client invoices and shipment tracking from the freight sheet API", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config or ~/.freightdocs)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Output language: en, ca, es, fr, pt (default: from config, else ca)
    #[arg(short = 'l', long, global = true)]
    lang: Option<Locale>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Log in with your client area credentials
    Login {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the saved login
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show configuration and login status
    Status,

    /// List invoices, newest first
    List {
        /// Number of invoices to show (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show an invoice in the terminal
    Show {
        /// Invoice number or index from 'list' (e.g., 1 or F-100)
        invoice: String,
    },

    /// Print an invoice to PDF
    Print {
        /// Invoice number or index from 'list' (e.g., 1 or F-100)
        invoice: String,

        /// Custom output file path (default: output_dir/<number>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Look up a shipment by tracking code
    Track {
        /// Tracking code printed on the delivery note
        code: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("freightdocs={level}"))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Login { user, password } => cmd_login(&cfg_dir, cli.lang, &user, &password),
        Commands::Logout => cmd_logout(&cfg_dir),
        Commands::Whoami => cmd_whoami(&cfg_dir, cli.lang),
        Commands::Status => cmd_status(&cfg_dir, cli.lang),
        Commands::List { limit } => cmd_list(&cfg_dir, cli.lang, limit),
        Commands::Show { invoice } => cmd_show(&cfg_dir, cli.lang, &invoice),
        Commands::Print {
            invoice,
            output,
            open,
        } => cmd_print(&cfg_dir, cli.lang, &invoice, output, open),
        Commands::Track { code } => cmd_track(&cfg_dir, cli.lang, &code),
    }
}

/// Loaded config plus the language chosen for this run
struct Context {
    config: Config,
    locale: Locale,
}

impl Context {
    fn load(cfg_dir: &Path, lang: Option<Locale>) -> Result<Self> {
        let config = load_config(cfg_dir)?;
        let locale = lang.unwrap_or_else(|| config.locale());
        Ok(Self { config, locale })
    }

    fn labels(&self) -> &'static Labels {
        self.locale.labels()
    }

    fn source(&self) -> SheetClient {
        SheetClient::new(
            &self.config.api.url,
            self.config.api.timeout_secs.map(Duration::from_secs),
        )
    }

    fn money(&self, value: f64) -> String {
        format_money(value, &self.config.display.currency_symbol)
    }

    /// Fetch and aggregate the invoices the session may see.
    fn documents(&self, cfg_dir: &Path) -> Result<DocumentView> {
        let session = load_session(cfg_dir)?;
        load_invoices(&self.source(), &session, self.labels().unknown_client).map_err(|e| {
            tracing::error!(error = %e, "could not load documents");
            AppError::DocumentsUnavailable(self.labels().fetch_error.to_string())
        })
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(AppError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized freightdocs config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set the API url and company details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Log in:  freightdocs login --user <user> --password <password>");
    println!();
    println!("Then list your invoices:");
    println!("  freightdocs list");

    Ok(())
}

fn cmd_login(cfg_dir: &Path, lang: Option<Locale>, user: &str, password: &str) -> Result<()> {
    let ctx = Context::load(cfg_dir, lang)?;
    let session = login(&ctx.source(), cfg_dir, user, password, ctx.labels())?;

    println!("{}, {}", ctx.labels().welcome, session.name);
    println!("  {}: {}", ctx.labels().company, session.company);
    Ok(())
}

fn cmd_logout(cfg_dir: &Path) -> Result<()> {
    if logout(cfg_dir)? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Dashboard: who is logged in
fn cmd_whoami(cfg_dir: &Path, lang: Option<Locale>) -> Result<()> {
    let ctx = Context::load(cfg_dir, lang)?;
    let session = load_session(cfg_dir)?;
    let labels = ctx.labels();

    println!("[{}] {}, {}", session.initials(), labels.welcome, session.name);
    println!("{}", "-".repeat(50));
    println!("{:<10} {}", format!("{}:", labels.name), session.name);
    println!("{:<10} {}", format!("{}:", labels.company), session.company);
    Ok(())
}

fn cmd_status(cfg_dir: &Path, lang: Option<Locale>) -> Result<()> {
    let ctx = Context::load(cfg_dir, lang)?;

    println!("Freightdocs Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("API:              {}", ctx.config.api.url);
    println!("Language:         {}", ctx.locale);
    println!(
        "Output directory: {}",
        resolve_output_dir(&ctx.config.pdf.output_dir, cfg_dir).display()
    );

    match load_session(cfg_dir) {
        Ok(session) => println!("Logged in as:     {} ({})", session.user, session.company),
        Err(AppError::NotLoggedIn) => println!("Logged in as:     -"),
        Err(e) => return Err(e),
    }

    Ok(())
}

/// List invoices sorted by date, newest first
fn cmd_list(cfg_dir: &Path, lang: Option<Locale>, limit: Option<usize>) -> Result<()> {
    let ctx = Context::load(cfg_dir, lang)?;
    let view = ctx.documents(cfg_dir)?;
    let labels = ctx.labels();

    println!(
        "{}",
        if view.is_staff() {
            labels.admin_title
        } else {
            labels.title
        }
    );

    if view.invoices.is_empty() {
        println!("{}", labels.no_invoices);
        return Ok(());
    }

    let sorted = view.invoices.sorted_by_date_desc();
    let shown = match limit {
        Some(n) => &sorted[..n.min(sorted.len())],
        None => &sorted[..],
    };

    let mut builder = Builder::default();
    builder.push_record([
        "#".to_string(),
        labels.invoice.to_uppercase(),
        labels.date.to_uppercase(),
        labels.client.to_uppercase(),
        labels.total.to_uppercase(),
    ]);
    for (idx, invoice) in shown.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            invoice.invoice_number.clone(),
            display_date(&invoice.date, ctx.locale),
            invoice.client.company.clone(),
            ctx.money(invoice.totals.final_total),
        ]);
    }

    let table = builder.build().with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} invoices", sorted.len());
    println!("Use index number with show/print (e.g., 'freightdocs show 1')");

    Ok(())
}

/// Resolve an invoice reference to one invoice.
/// Accepts either an index (1-based) from 'list' or the invoice number.
fn resolve_invoice<'a>(view: &'a DocumentView, reference: &str) -> Result<&'a AggregatedInvoice> {
    // Try to parse as an index first
    if let Ok(idx) = reference.parse::<usize>() {
        // Same order as 'list': newest first, 1-indexed
        let sorted = view.invoices.sorted_by_date_desc();
        if idx == 0 || idx > sorted.len() {
            return Err(AppError::InvalidInvoiceIndex(reference.to_string()));
        }
        return Ok(sorted[idx - 1]);
    }

    view.invoices
        .get(reference)
        .ok_or_else(|| AppError::InvoiceNotFound(reference.to_string()))
}

/// Render one invoice in the terminal
fn cmd_show(cfg_dir: &Path, lang: Option<Locale>, reference: &str) -> Result<()> {
    let ctx = Context::load(cfg_dir, lang)?;
    let view = ctx.documents(cfg_dir)?;
    let invoice = resolve_invoice(&view, reference)?;
    let doc = PrintableInvoice::new(invoice, &ctx.config, ctx.locale);
    let l = doc.labels;

    println!("{}", doc.company.name);
    println!("{}", doc.company.address);
    println!("{}", doc.company.city);
    println!();
    println!("{} # {}", l.invoice.to_uppercase(), doc.number);
    println!("{}: {}", l.date, doc.date);
    println!("{}", "-".repeat(50));
    println!("{}", l.client_data);
    println!("  {}", doc.client.company);
    println!("  {}", doc.client.address);
    println!("  {}: {}", l.fiscal_id, doc.client.fiscal_id);
    println!("  {}: {}", l.phone, doc.client.phone);
    println!();

    let mut builder = Builder::default();
    builder.push_record([
        l.concept.to_string(),
        l.price.to_string(),
        l.units.to_string(),
        l.discount.to_string(),
        format!("{} (%)", l.vat),
        l.net.to_string(),
    ]);
    for line in &doc.lines {
        builder.push_record([
            line.description.clone(),
            ctx.money(line.price),
            line.units.to_string(),
            format!("{:.2} %", line.discount),
            format!("{} %", line.vat_rate),
            ctx.money(line.net),
        ]);
    }
    println!("{}", builder.build().with(Style::rounded()));
    println!();

    let width = 40;
    println!("{:<width$} {:>14}", l.base, ctx.money(doc.base));
    for vat in &doc.vat_details {
        let label = format!("{} {}% ({})", l.vat, format_rate(vat.rate), ctx.money(vat.base));
        println!("{:<width$} {:>14}", label, ctx.money(vat.amount));
    }
    println!("{}", "-".repeat(width + 15));
    println!("{:<width$} {:>14}", l.total, ctx.money(doc.final_total));
    println!();
    println!("{}: {}", l.payment_method, doc.payment_method);
    println!();
    println!("{}", doc.legal_notice);

    Ok(())
}

/// Keep invoice numbers like "F/2024/1" usable as file names
fn pdf_file_name(invoice_number: &str) -> String {
    let safe: String = invoice_number
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}.pdf")
}

/// Print an invoice to PDF
fn cmd_print(
    cfg_dir: &Path,
    lang: Option<Locale>,
    reference: &str,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let ctx = Context::load(cfg_dir, lang)?;
    let view = ctx.documents(cfg_dir)?;
    let invoice = resolve_invoice(&view, reference)?;
    let doc = PrintableInvoice::new(invoice, &ctx.config, ctx.locale);

    let pdf_path = match output {
        Some(path) => path,
        None => {
            let output_dir = resolve_output_dir(&ctx.config.pdf.output_dir, cfg_dir);
            std::fs::create_dir_all(&output_dir)?;
            output_dir.join(pdf_file_name(&doc.number))
        }
    };

    generate_pdf(&doc, &pdf_path)?;

    println!("Printed {}", doc.number);
    println!("  {}:  {}", ctx.labels().client, doc.client.company);
    println!("  {}:  {}", ctx.labels().total, ctx.money(doc.final_total));
    println!("  Saved:  {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }
    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(pdf_path)
            .spawn()?;
    }
    Ok(())
}

/// Shipment tracking lookup
fn cmd_track(cfg_dir: &Path, lang: Option<Locale>, code: &str) -> Result<()> {
    let ctx = Context::load(cfg_dir, lang)?;
    let labels = ctx.labels();
    let shipment = track(&ctx.source(), code, labels)?;
    let status = shipment.status();

    println!("{}", shipment.tracking_code);
    println!("{}", "-".repeat(50));
    println!("{:<20} {}", format!("{}:", labels.origin), shipment.origin);
    println!("{:<20} {}", format!("{}:", labels.destination), shipment.destination);
    println!("{:<20} {}", format!("{}:", labels.eta), shipment.eta);
    println!(
        "{:<20} {}",
        format!("{}:", labels.current_location),
        shipment.current_location
    );
    println!("{:<20} {}", format!("{}:", labels.status), status.label(labels));
    println!("{}", progress_bar(status.progress(), 30));

    Ok(())
}
