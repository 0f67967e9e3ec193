use std::path::Path;
use std::process::Command;

use crate::error::{FeeLedgerError, Result};
use crate::ledger::{ReceiptData, SummaryData};

/// Embedded Typst template for the printable money receipt
/// Uses a placeholder that gets replaced with the actual JSON file path
const RECEIPT_TEMPLATE: &str = r##"// Money Receipt Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
)

#set text(font: "Helvetica", size: 10pt)

#let fmt-int(digits) = {
  let len = digits.len()
  let out = ""
  for (i, digit) in digits.clusters().enumerate() {
    if i > 0 and calc.rem(len - i, 3) == 0 {
      out += ","
    }
    out += digit
  }
  out
}

#let fmt-currency(amount) = {
  let parts = str(calc.round(amount, digits: 2)).split(".")
  let whole = fmt-int(parts.at(0))
  let frac = if parts.len() > 1 { parts.at(1) } else { "00" }
  let frac2 = if frac.len() == 1 { frac + "0" } else { frac }
  data.currency_symbol + whole + "." + frac2
}

// Letterhead
#align(center)[
  #text(size: 14pt, weight: "bold")[MONEY RECEIPT]
  #v(0.3em)
  #text(size: 12pt, weight: "bold")[#data.school.name]
  #v(0.2em)
  #data.school.address, #data.school.city - #data.school.zip (#upper(data.school.state)) \
  #if data.school.phone != none [
    Phone No: #data.school.phone
  ]
]

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

// Receipt header
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [*Receipt No:* #data.receipt_number],
  [*Date:* #data.date],
)
#v(0.5em)
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [*Name:* #data.student_name],
  [],
)
#v(0.5em)
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [*Roll No:* #data.roll_no],
  [*Course:* #data.course],
)

#v(1.5em)

// Fee lines table (last row is the Total line)
#table(
  columns: (auto, 1fr, auto),
  align: (center, left, right),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else if y > 0 { (bottom: 0.5pt + gray) },
  inset: 8pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },

  // Header
  [*SI No*], [*Description*], [*Amount*],

  // Lines
  ..data.lines.enumerate().map(((i, line)) => (
    str(i + 1),
    if line.description == "Total" [*#line.description*] else [#line.description],
    if line.description == "Total" [*#fmt-currency(line.amount)*] else [#fmt-currency(line.amount)],
  )).flatten()
)

#v(1em)

*Received Rupees (in words):* #data.amount_in_words

#v(3em)

// Signature block
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [*Thank You*],
  [*Authorized Signature*],
)
"##;

/// Embedded Typst template for the student payment summary
const SUMMARY_TEMPLATE: &str = r##"// Student Payment Summary Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "a4",
  flipped: true,
  margin: (top: 0.8in, bottom: 0.8in, left: 0.8in, right: 0.8in),
)

#set text(font: "Helvetica", size: 9pt)

#let fmt-int(digits) = {
  let len = digits.len()
  let out = ""
  for (i, digit) in digits.clusters().enumerate() {
    if i > 0 and calc.rem(len - i, 3) == 0 {
      out += ","
    }
    out += digit
  }
  out
}

#let fmt-currency(amount) = {
  let parts = str(calc.round(amount, digits: 2)).split(".")
  let whole = fmt-int(parts.at(0))
  let frac = if parts.len() > 1 { parts.at(1) } else { "00" }
  let frac2 = if frac.len() == 1 { frac + "0" } else { frac }
  data.currency_symbol + whole + "." + frac2
}

// Header with school info and summary title
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  [
    #text(size: 14pt, weight: "bold")[#data.school.name]
    #v(0.3em)
    #data.school.address, #data.school.city - #data.school.zip
    #if data.school.phone != none [
      \ Phone No: #data.school.phone
    ]
  ],
  [
    #text(size: 18pt, weight: "bold")[STUDENT PAYMENT SUMMARY]
    #v(0.5em)
    #text(size: 9pt, fill: gray)[Generated #data.generated_date]
    #if data.filter_roll_no != none [
      \ #text(size: 9pt, fill: gray)[Filtered by Roll No: #data.filter_roll_no]
    ]
  ]
)

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

// One row per student; receipt details stacked inside the last column
#table(
  columns: (auto, auto, 1fr, auto, auto, auto, 3fr),
  align: (left, center, left, right, right, right, left),
  stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else if y > 0 { (bottom: 0.5pt + gray) },
  inset: 6pt,
  fill: (x, y) => if y == 0 { luma(240) } else { none },

  // Header
  [*Roll No*], [*Class*], [*Name*], [*Total Fee*], [*Total Paid*], [*Dues Fee*], [*Receipt Details*],

  // Rows
  ..data.rows.map(row => (
    row.roll_no,
    row.standard,
    row.name,
    [#fmt-currency(row.total_fee)],
    [#fmt-currency(row.total_paid)],
    [#fmt-currency(row.dues_fee)],
    stack(spacing: 4pt, ..row.details.map(d => text(size: 7pt, d))),
  )).flatten()
)

#v(1.5em)

// Financial summary (right-aligned)
#align(right)[
  #table(
    columns: (auto, auto),
    stroke: none,
    align: (right, right),
    inset: 6pt,

    [Total Fee:], [#fmt-currency(data.total_fee)],
    [Total Paid:], [#fmt-currency(data.total_paid)],

    table.hline(stroke: 1pt),
    [*Dues:*], [*#fmt-currency(data.total_dues)*],
  )
]
"##;

/// Generate a money-receipt PDF using the Typst CLI
pub fn generate_receipt_pdf(receipt_data: &ReceiptData, output_path: &Path) -> Result<()> {
    let json_data = serde_json::to_string(receipt_data)
        .map_err(|e| FeeLedgerError::PdfGeneration(e.to_string()))?;
    compile_template(RECEIPT_TEMPLATE, "receipt_data.json", &json_data, output_path)
}

/// Generate a payment summary PDF using the Typst CLI
pub fn generate_summary_pdf(summary_data: &SummaryData, output_path: &Path) -> Result<()> {
    let json_data = serde_json::to_string(summary_data)
        .map_err(|e| FeeLedgerError::PdfGeneration(e.to_string()))?;
    compile_template(SUMMARY_TEMPLATE, "summary_data.json", &json_data, output_path)
}

/// Write the data JSON and template to a temp directory, then shell out to
/// `typst compile`.
fn compile_template(
    template: &str,
    json_name: &str,
    json_data: &str,
    output_path: &Path,
) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();
    if typst_check.is_err() {
        return Err(FeeLedgerError::TypstNotFound);
    }

    let temp_dir = std::env::temp_dir().join("feeledger");
    std::fs::create_dir_all(&temp_dir)?;

    let json_path = temp_dir.join(json_name);
    std::fs::write(&json_path, json_data)?;

    // Template references the JSON by relative path (same directory)
    let template_content = template.replace("DATA_JSON_PATH", json_name);
    let template_path = temp_dir.join("document.typ");
    std::fs::write(&template_path, &template_content)?;

    let output = Command::new("typst")
        .args([
            "compile",
            "--root",
            temp_dir.to_str().unwrap_or("."),
            template_path.to_str().unwrap_or(""),
            output_path.to_str().unwrap_or(""),
        ])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FeeLedgerError::PdfGeneration(stderr.to_string()));
    }

    let _ = std::fs::remove_file(&template_path);
    let _ = std::fs::remove_file(&json_path);

    Ok(())
}
