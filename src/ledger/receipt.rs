use rand::Rng;
use serde::Serialize;

use crate::config::{School, State};

/// One printable line on a money receipt.
#[derive(Debug, Clone, Serialize)]
pub struct FeeLineItem {
    pub id: &'static str,
    pub description: &'static str,
    pub amount: f64,
}

/// The fixed fee catalogue printed on every receipt, in print order.
pub const FEE_CATALOGUE: [(&str, &str); 9] = [
    ("admission", "Admission & Registration Fee"),
    ("fund", "Development Fund"),
    ("institute", "Tuition Fee"),
    ("library", "Library Fee"),
    ("laboratory", "Laboratory Fee"),
    ("lab", "Computer Laboratory Fee"),
    ("game", "Game Fee"),
    ("cultural", "Cultural Fee"),
    ("prospectus", "Prospectus Fee & Admission Form"),
];

/// Catalogue id of the line that carries the payment amount. The whole
/// payment is attributed to tuition; the richer per-category fields on the
/// underlying records are surfaced only in summary exports.
const TUITION_ID: &str = "institute";

/// Project a payment amount onto the fixed fee catalogue, appending a
/// synthetic Total line equal to the sum of the category lines.
pub fn project_fee_lines(amount: f64) -> Vec<FeeLineItem> {
    let mut lines: Vec<FeeLineItem> = FEE_CATALOGUE
        .iter()
        .map(|&(id, description)| FeeLineItem {
            id,
            description,
            amount: if id == TUITION_ID { amount } else { 0.0 },
        })
        .collect();

    let total: f64 = lines.iter().map(|l| l.amount).sum();
    lines.push(FeeLineItem {
        id: "--",
        description: "Total",
        amount: total,
    });

    lines
}

/// Mint a display receipt number: prefix plus a random suffix in 0..9999.
pub fn generate_receipt_number(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{prefix}-{suffix}")
}

/// Resolve the receipt number for a payment. A number is minted once per
/// payment id and persisted, so reprints carry the number from the first
/// printout. Returns the number and whether it was freshly issued.
pub fn resolve_receipt_number(state: &mut State, payment_id: &str, prefix: &str) -> (String, bool) {
    if let Some(number) = state.issued_number(payment_id) {
        return (number.to_string(), false);
    }
    let number = generate_receipt_number(prefix);
    state.record_number(payment_id, number.clone());
    (number, true)
}

/// Spell a rupee amount in words using the Indian numbering system,
/// for the "Received Rupees (in words)" line on receipts.
pub fn amount_in_words(amount: f64) -> String {
    let rupees = amount.round() as i64;
    if rupees == 0 {
        return "Zero rupees only".to_string();
    }

    let negative = rupees < 0;
    let mut words = words_indian(rupees.unsigned_abs());
    if negative {
        words = format!("minus {words}");
    }

    // Capitalize the first letter
    let mut chars = words.chars();
    let capitalized = match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => words,
    };

    format!("{capitalized} rupees only")
}

/// Spell an amount in the Indian system. The crore count can itself exceed
/// the crore threshold, so it goes back through the same decomposition
/// ("one lakh crore") rather than being capped.
fn words_indian(n: u64) -> String {
    if n >= 10_000_000 {
        let rest = n % 10_000_000;
        let crore = format!("{} crore", words_indian(n / 10_000_000));
        if rest > 0 {
            format!("{} {}", crore, words_indian(rest))
        } else {
            crore
        }
    } else if n >= 100_000 {
        let rest = n % 100_000;
        let lakh = format!("{} lakh", words_below_hundred(n / 100_000));
        if rest > 0 {
            format!("{} {}", lakh, words_indian(rest))
        } else {
            lakh
        }
    } else if n >= 1_000 {
        let rest = n % 1_000;
        let thousand = format!("{} thousand", words_below_hundred(n / 1_000));
        if rest > 0 {
            format!("{} {}", thousand, words_below_thousand(rest))
        } else {
            thousand
        }
    } else {
        words_below_thousand(n)
    }
}

fn words_below_hundred(n: u64) -> String {
    const ONES: [&str; 20] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen",
    ];
    const TENS: [&str; 10] = [
        "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    ];

    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn words_below_thousand(n: u64) -> String {
    if n < 100 {
        return words_below_hundred(n);
    }
    let hundreds = format!("{} hundred", words_below_hundred(n / 100));
    if n % 100 == 0 {
        hundreds
    } else {
        format!("{} {}", hundreds, words_below_hundred(n % 100))
    }
}

/// Complete data for rendering a money-receipt PDF.
#[derive(Debug, Serialize)]
pub struct ReceiptData {
    pub school: School,
    pub receipt_number: String,
    pub date: String,
    pub student_name: String,
    pub roll_no: String,
    pub course: String,
    pub lines: Vec<FeeLineItem>,
    pub amount_in_words: String,
    pub currency_symbol: String,
}
