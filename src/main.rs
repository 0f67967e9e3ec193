use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use feeledger::api::{read_json_file, ApiClient};
use feeledger::config::{
    config_dir, load_config, load_state, resolve_output_dir, save_state, Config, CONFIG_TEMPLATE,
};
use feeledger::error::{FeeLedgerError, Result};
use feeledger::ledger::{
    aggregate_payments, amount_in_words, build_summary_data, format_record_date,
    project_fee_lines, resolve_receipt_number, write_csv, PaymentDetail, PaymentRecord,
    ReceiptData, StudentAggregate, StudentRecord,
};
use feeledger::pdf::{generate_receipt_pdf, generate_summary_pdf};

#[derive(Parser)]
#[command(name = "feeledger")]
#[command(version, about = "School fee-payment tracking CLI", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.feeledger or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config file
    Init,

    /// Show configuration and ledger status
    Status,

    /// List enrolled students
    Students {
        /// Filter by class standard (1-10)
        #[arg(short, long)]
        standard: Option<String>,

        /// Read students from a local JSON snapshot instead of the backend
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the per-student payment summary
    Payments {
        /// Filter by roll number (exact match)
        #[arg(short, long)]
        roll_no: Option<String>,

        /// Read payment records from a local JSON snapshot instead of the backend
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Export the per-student payment summary
    Export {
        /// Export format: 'csv' or 'pdf'
        #[arg(short, long)]
        format: String,

        /// Filter by roll number (exact match)
        #[arg(short, long)]
        roll_no: Option<String>,

        /// Read payment records from a local JSON snapshot instead of the backend
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Custom output file path (default: output_dir/Student_Receipts.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the exported file with the system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Print a money receipt for a payment
    Receipt {
        /// Payment id from the backend
        payment: String,

        /// Read the payment from a local JSON snapshot instead of the backend
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Student name to print (overrides the payment's own)
        #[arg(long)]
        name: Option<String>,

        /// Student roll number to print (overrides the payment's own)
        #[arg(long)]
        roll_no: Option<String>,

        /// Custom output file path (default: output_dir/<receipt-number>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Students { standard, input } => {
            cmd_students(&cfg_dir, standard.as_deref(), input.as_deref())
        }
        Commands::Payments { roll_no, input } => {
            cmd_payments(&cfg_dir, roll_no.as_deref(), input.as_deref())
        }
        Commands::Export {
            format,
            roll_no,
            input,
            output,
            open,
        } => cmd_export(
            &cfg_dir,
            &format,
            roll_no.as_deref(),
            input.as_deref(),
            output,
            open,
        ),
        Commands::Receipt {
            payment,
            input,
            name,
            roll_no,
            output,
            open,
        } => cmd_receipt(&cfg_dir, &payment, input.as_deref(), name, roll_no, output, open),
    }
}

/// Initialize config directory with a template config file
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(FeeLedgerError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized feeledger config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your school details and API address:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then view the payment summary:");
    println!("  feeledger payments");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ROLL NO")]
    roll_no: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "STANDARD")]
    standard: String,
}

#[derive(Tabled)]
struct PaymentSummaryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ROLL NO")]
    roll_no: String,
    #[tabled(rename = "CLASS")]
    standard: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "RECEIPTS")]
    receipts: usize,
    #[tabled(rename = "TOTAL FEE")]
    total_fee: String,
    #[tabled(rename = "PAID")]
    paid: String,
    #[tabled(rename = "DUES")]
    dues: String,
}

#[derive(Tabled)]
struct FeeLineRow {
    #[tabled(rename = "SI NO")]
    si_no: usize,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

fn format_whole_money(value: f64, currency_symbol: &str) -> String {
    let rounded = value.round() as i64;
    let grouped = format_grouped_int(rounded);
    format!("{}{:>6}", currency_symbol, grouped)
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Splice a three-row financial summary (TOTAL FEE / PAID / DUES) under the
/// payments table by rewriting its bottom border.
fn add_financial_footer(table: &str, total_fee: &str, paid: &str, dues: &str) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let top = lines[0];
    let Some(inner) = top.strip_prefix('╭').and_then(|s| s.strip_suffix('╮')) else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if widths.len() < 8 {
        return table.to_string();
    }

    // Merge columns #, ROLL NO, CLASS, NAME, RECEIPTS into one label cell;
    // keep TOTAL FEE as the value column; drop PAID and DUES
    let left_width = widths[..5].iter().sum::<usize>() + 4; // +4 for the four ┴ replaced by spaces
    let value_width = widths[5];
    let paid_width = widths[6];
    let dues_width = widths[7];

    let rows = [
        ("TOTAL FEE", total_fee),
        ("(-) PAID", paid),
        ("(=) DUES", dues),
    ];

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    // First separator: merge left 5 columns, keep TOTAL FEE, close off PAID+DUES
    out.push_str(&format!(
        "├{}┴{}┴{}┴{}┴{}┼{}┼{}┴{}╯\n",
        "─".repeat(widths[0]),
        "─".repeat(widths[1]),
        "─".repeat(widths[2]),
        "─".repeat(widths[3]),
        "─".repeat(widths[4]),
        "─".repeat(value_width),
        "─".repeat(paid_width),
        "─".repeat(dues_width),
    ));

    // Summary rows with separators between them
    for (idx, (label, value)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>left$} │ {:>val$} │\n",
            label,
            value,
            left = left_width - 2,
            val = value_width - 2
        ));
        if idx < rows.len() - 1 {
            out.push_str(&format!(
                "├{}┼{}┤\n",
                "─".repeat(left_width),
                "─".repeat(value_width)
            ));
        }
    }

    // Bottom border
    out.push_str(&format!(
        "╰{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(value_width)
    ));

    out
}

/// Show configuration and ledger status
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(FeeLedgerError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let state = load_state(cfg_dir)?;

    println!("Fee Ledger Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("School:           {}", config.school.name);
    println!("Backend API:      {}", config.api.base_url);
    println!(
        "Total fee:        {}",
        format_whole_money(config.fees.total_fee, &config.fees.currency_symbol).trim_start()
    );
    println!("Receipts issued:  {}", state.receipt_numbers.len());
    println!(
        "Output directory: {}",
        resolve_output_dir(&config.pdf.output_dir, cfg_dir).display()
    );

    Ok(())
}

/// Validate a --standard value (classes run 1 through 10)
fn validate_standard(standard: &str) -> Result<()> {
    match standard.parse::<u32>() {
        Ok(n) if (1..=10).contains(&n) => Ok(()),
        _ => Err(FeeLedgerError::InvalidStandard(standard.to_string())),
    }
}

/// List enrolled students, optionally filtered by class standard
fn cmd_students(cfg_dir: &Path, standard: Option<&str>, input: Option<&Path>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(FeeLedgerError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    if let Some(s) = standard {
        validate_standard(s)?;
    }

    let config = load_config(cfg_dir)?;
    let students: Vec<StudentRecord> = match input {
        Some(path) => read_json_file(path)?,
        None => ApiClient::new(&config.api).fetch_students()?,
    };

    let filtered: Vec<&StudentRecord> = students
        .iter()
        .filter(|s| standard.map_or(true, |wanted| s.standard == wanted))
        .collect();

    if filtered.is_empty() {
        println!("No students found for this standard.");
        return Ok(());
    }

    let rows: Vec<StudentRow> = filtered
        .iter()
        .map(|s| StudentRow {
            roll_no: s.roll_no.clone(),
            name: s.name.clone(),
            standard: s.standard.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!("Total: {} students", filtered.len());

    Ok(())
}

/// Load payment records from a snapshot file or the backend
fn load_payment_records(config: &Config, input: Option<&Path>) -> Result<Vec<PaymentRecord>> {
    match input {
        Some(path) => read_json_file(path),
        None => ApiClient::new(&config.api).fetch_receipts(),
    }
}

/// Show the per-student payment summary table with a financial footer
fn cmd_payments(cfg_dir: &Path, roll_no: Option<&str>, input: Option<&Path>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(FeeLedgerError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let records = load_payment_records(&config, input)?;
    let aggregates = aggregate_payments(&records, roll_no, config.fees.total_fee)?;

    if aggregates.is_empty() {
        println!("No payment records found.");
        return Ok(());
    }

    let symbol = &config.fees.currency_symbol;
    let rows: Vec<PaymentSummaryRow> = aggregates
        .iter()
        .enumerate()
        .map(|(idx, agg)| PaymentSummaryRow {
            index: idx + 1,
            roll_no: agg.roll_no.clone(),
            standard: agg.standard.clone(),
            name: agg.name.clone(),
            receipts: agg.receipts.len(),
            total_fee: format_whole_money(agg.total_fee, symbol),
            paid: format_whole_money(agg.total_paid, symbol),
            dues: format_whole_money(agg.dues_fee, symbol),
        })
        .collect();

    let shown_fee: f64 = aggregates.iter().map(|a| a.total_fee).sum();
    let shown_paid: f64 = aggregates.iter().map(|a| a.total_paid).sum();
    let shown_dues = shown_fee - shown_paid;

    let table = Table::new(rows).with(Style::rounded()).to_string();
    let table = add_financial_footer(
        &table,
        &format_whole_money(shown_fee, symbol),
        &format_whole_money(shown_paid, symbol),
        &format_whole_money(shown_dues, symbol),
    );

    println!("{table}");

    println!();
    println!("Total: {} students", aggregates.len());
    println!("Use 'feeledger export --format csv|pdf' to export this summary");

    Ok(())
}

/// Export the per-student payment summary as CSV or PDF
fn cmd_export(
    cfg_dir: &Path,
    format: &str,
    roll_no: Option<&str>,
    input: Option<&Path>,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(FeeLedgerError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    if format != "csv" && format != "pdf" {
        return Err(FeeLedgerError::InvalidExportFormat(format.to_string()));
    }

    let config = load_config(cfg_dir)?;
    let records = load_payment_records(&config, input)?;
    let aggregates: Vec<StudentAggregate> =
        aggregate_payments(&records, roll_no, config.fees.total_fee)?;

    if aggregates.is_empty() {
        println!("No payment records found with the given filters.");
        return Ok(());
    }

    // Determine output path
    let output_dir = resolve_output_dir(&config.pdf.output_dir, cfg_dir);
    std::fs::create_dir_all(&output_dir)?;

    let out_path = output.unwrap_or_else(|| output_dir.join(format!("Student_Receipts.{format}")));

    match format {
        "csv" => write_csv(&aggregates, &out_path)?,
        _ => {
            let summary = build_summary_data(
                &config.school,
                &aggregates,
                &config.fees.currency_symbol,
                roll_no,
            );
            generate_summary_pdf(&summary, &out_path)?;
        }
    }

    let total_paid: f64 = aggregates.iter().map(|a| a.total_paid).sum();

    println!("Exported payment summary");
    println!("  Students: {}", aggregates.len());
    println!(
        "  Paid:     {}",
        format_whole_money(total_paid, &config.fees.currency_symbol).trim_start()
    );
    println!("  Saved:    {}", out_path.display());

    if open {
        open_path(&out_path)?;
    }

    Ok(())
}

/// Print a money receipt for a payment and generate its PDF
fn cmd_receipt(
    cfg_dir: &Path,
    payment_id: &str,
    input: Option<&Path>,
    name: Option<String>,
    roll_no: Option<String>,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(FeeLedgerError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;

    let payment: PaymentDetail = match input {
        Some(path) => {
            let payment: PaymentDetail = read_json_file(path)?;
            if payment.id != payment_id {
                return Err(FeeLedgerError::PaymentNotFound(payment_id.to_string()));
            }
            payment
        }
        None => ApiClient::new(&config.api).fetch_payment(payment_id)?,
    };

    let amount = payment.amount.ok_or_else(|| FeeLedgerError::MissingField {
        record: payment.id.clone(),
        field: "amount".to_string(),
    })?;

    let lines = project_fee_lines(amount);
    let in_words = amount_in_words(amount);

    // Receipt numbers are minted once per payment and persisted, so a
    // reprint shows the number from the first printout.
    let mut state = load_state(cfg_dir)?;
    let (number, issued) =
        resolve_receipt_number(&mut state, &payment.id, &config.receipt.number_prefix);
    if issued {
        save_state(cfg_dir, &state)?;
    }

    let symbol = &config.fees.currency_symbol;
    let rows: Vec<FeeLineRow> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| FeeLineRow {
            si_no: idx + 1,
            description: line.description.to_string(),
            amount: format!("{}{:.2}", symbol, line.amount),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Received Rupees (in words): {in_words}");

    let receipt_data = ReceiptData {
        school: config.school.clone(),
        receipt_number: number.clone(),
        date: format_record_date(&payment.date),
        student_name: name.or(payment.name).unwrap_or_default(),
        roll_no: roll_no.or(payment.roll_no).unwrap_or_default(),
        course: config.school.course.clone(),
        lines,
        amount_in_words: in_words,
        currency_symbol: symbol.clone(),
    };

    // Determine output path
    let output_dir = resolve_output_dir(&config.pdf.output_dir, cfg_dir);
    std::fs::create_dir_all(&output_dir)?;

    let pdf_path = output.unwrap_or_else(|| output_dir.join(format!("{number}.pdf")));

    generate_receipt_pdf(&receipt_data, &pdf_path)?;

    println!();
    if issued {
        println!("Issued receipt {number}");
    } else {
        println!("Reprinted receipt {number}");
    }
    println!("  Saved: {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }

    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .map_err(FeeLedgerError::Io)?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .map_err(FeeLedgerError::Io)?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", path.to_str().unwrap_or("")])
            .spawn()
            .map_err(FeeLedgerError::Io)?;
    }
    Ok(())
}
