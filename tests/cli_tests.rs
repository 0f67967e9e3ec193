use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn feeledger_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("feeledger"))
}

fn init_config(config_path: &std::path::Path) {
    feeledger_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

const RECEIPTS_SNAPSHOT: &str = r#"[
  {"rollno": "5", "name": "Asha", "std": "4", "receiptno": "R-1",
   "totalAmount": 3000.0, "tuitionFee": 3000.0, "admissionfee": 0.0,
   "prospectusFee": 0.0, "transportFee": 0.0, "other": 0.0,
   "date": "2026-01-10"},
  {"rollno": "5", "name": "Asha", "std": "4", "receiptno": "R-2",
   "totalAmount": 2000.0, "tuitionFee": 2000.0, "admissionfee": 0.0,
   "prospectusFee": 0.0, "transportFee": 0.0, "other": 0.0,
   "date": "2026-02-12"},
  {"rollno": "7", "name": "Rahul", "std": "6", "receiptno": "R-3",
   "totalAmount": 10000.0, "tuitionFee": 9000.0, "admissionfee": 500.0,
   "prospectusFee": 500.0, "transportFee": 0.0, "other": 0.0,
   "date": "2026-03-01"}
]"#;

const STUDENTS_SNAPSHOT: &str = r#"[
  {"rollNo": "5", "name": "Asha", "standard": "4"},
  {"rollNo": "7", "name": "Rahul", "standard": "6"},
  {"rollNo": "9", "name": "Meena", "standard": "4"}
]"#;

#[test]
fn test_help() {
    feeledger_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("School fee-payment tracking CLI"));
}

#[test]
fn test_version() {
    feeledger_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("feeledger"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");

    feeledger_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized feeledger config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("output").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");

    init_config(&config_path);

    feeledger_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    feeledger_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_status() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");

    init_config(&config_path);

    feeledger_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fee Ledger Status"))
        .stdout(predicate::str::contains("N.N. Ghosh"))
        .stdout(predicate::str::contains("Receipts issued:  0"));
}

#[test]
fn test_students_invalid_standard() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");

    init_config(&config_path);

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "students",
            "--standard",
            "11",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid standard"));
}

#[test]
fn test_students_filter_by_standard() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("students.json");
    fs::write(&snapshot, STUDENTS_SNAPSHOT).unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "students",
            "--standard",
            "4",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha"))
        .stdout(predicate::str::contains("Meena"))
        .stdout(predicate::str::contains("Rahul").not())
        .stdout(predicate::str::contains("Total: 2 students"));
}

#[test]
fn test_students_empty_standard() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("students.json");
    fs::write(&snapshot, STUDENTS_SNAPSHOT).unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "students",
            "--standard",
            "9",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No students found"));
}

#[test]
fn test_payments_summary_with_footer() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("receipts.json");
    fs::write(&snapshot, RECEIPTS_SNAPSHOT).unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "payments",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ROLL NO"))
        .stdout(predicate::str::contains("Asha"))
        .stdout(predicate::str::contains("Rahul"))
        .stdout(predicate::str::contains("TOTAL FEE"))
        .stdout(predicate::str::contains("(-) PAID"))
        .stdout(predicate::str::contains("(=) DUES"))
        .stdout(predicate::str::contains("20,000"))
        .stdout(predicate::str::contains("15,000"))
        .stdout(predicate::str::contains("Total: 2 students"));
}

#[test]
fn test_payments_filter_by_roll_no() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("receipts.json");
    fs::write(&snapshot, RECEIPTS_SNAPSHOT).unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "payments",
            "--roll-no",
            "5",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha"))
        .stdout(predicate::str::contains("Rahul").not())
        .stdout(predicate::str::contains("Total: 1 students"));
}

#[test]
fn test_payments_absent_roll_no() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("receipts.json");
    fs::write(&snapshot, RECEIPTS_SNAPSHOT).unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "payments",
            "--roll-no",
            "99",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No payment records found"));
}

#[test]
fn test_payments_missing_amount_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("receipts.json");
    fs::write(
        &snapshot,
        r#"[{"rollno": "5", "name": "Asha", "std": "4", "receiptno": "R-1",
            "date": "2026-01-10"}]"#,
    )
    .unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "payments",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing numeric field"));
}

#[test]
fn test_payments_unreadable_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "payments",
            "--input",
            temp_dir.path().join("missing.json").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read records"));
}

#[test]
fn test_export_invalid_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--format",
            "xlsx",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid export format"));
}

#[test]
fn test_export_csv() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("receipts.json");
    fs::write(&snapshot, RECEIPTS_SNAPSHOT).unwrap();

    let out_path = temp_dir.path().join("summary.csv");

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--format",
            "csv",
            "--input",
            snapshot.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported payment summary"))
        .stdout(predicate::str::contains("Students: 2"));

    let content = fs::read_to_string(&out_path).unwrap();
    assert!(content.starts_with("Roll No,Name,Total Fee,Total Paid,Dues Fee,Receipt Details"));
    assert!(content.contains("Asha"));
    assert!(content.contains("Receipt R-1: 3000.00"));
    assert!(content.contains("Receipt R-2: 2000.00"));
}

#[test]
fn test_export_csv_default_path_in_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("receipts.json");
    fs::write(&snapshot, RECEIPTS_SNAPSHOT).unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "--format",
            "csv",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(config_path.join("output").join("Student_Receipts.csv").exists());
}

#[test]
fn test_receipt_missing_amount_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("payment.json");
    fs::write(&snapshot, r#"{"_id": "p1", "date": "2026-01-10"}"#).unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "receipt",
            "p1",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing numeric field 'amount'"));
}

#[test]
fn test_receipt_input_id_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("feeledger-config");
    init_config(&config_path);

    let snapshot = temp_dir.path().join("payment.json");
    fs::write(
        &snapshot,
        r#"{"_id": "p1", "amount": 4500.0, "date": "2026-01-10"}"#,
    )
    .unwrap();

    feeledger_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "receipt",
            "p2",
            "--input",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Payment 'p2' not found"));
}
