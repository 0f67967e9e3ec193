mod typst;

pub use typst::{generate_receipt_pdf, generate_summary_pdf};
