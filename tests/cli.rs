use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "spendlog";

fn spendlog(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SPENDLOG_DATA_DIR", home.path());
    cmd.env_remove("SPENDLOG_LOG");
    cmd
}

/// Run `add` and return the new transaction's id
fn add(home: &TempDir, args: &[&str]) -> String {
    let output = spendlog(home)
        .arg("add")
        .args(args)
        .output()
        .expect("command runs");
    assert!(output.status.success(), "add failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Transaction: "))
        .map(|id| id.trim().to_string())
        .expect("id in output")
}

#[test]
fn add_then_list_shows_transaction() {
    let home = TempDir::new().unwrap();
    add(&home, &["42.50", "groceries", "Weekly shop", "--date", "2025-01-15"]);

    spendlog(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Weekly shop").and(contains("Groceries")))
        .stdout(contains("1 transaction(s)"));

    assert!(home.path().join("data").join("expenses.json").exists());
}

#[test]
fn add_rejects_invalid_input() {
    let home = TempDir::new().unwrap();

    spendlog(&home)
        .args(["add", "10", "Salary", "Not an expense"])
        .assert()
        .failure()
        .stderr(contains("not a valid expense category"));

    spendlog(&home)
        .args(["add", "0", "Rent", "Free month"])
        .assert()
        .failure()
        .stderr(contains("Amount must be greater than 0"));

    spendlog(&home)
        .args(["add", "10", "Rent", "ab"])
        .assert()
        .failure()
        .stderr(contains("at least 3 characters"));
}

#[test]
fn budget_tracks_spending_and_warns() {
    let home = TempDir::new().unwrap();
    add(&home, &["1000", "Salary", "Monthly pay", "--income", "--date", "2025-02-01"]);
    add(&home, &["85", "Travel", "Train tickets", "--date", "2025-02-03"]);

    spendlog(&home)
        .args(["budget", "set", "travel", "100"])
        .assert()
        .success()
        .stdout(contains("Created budget for Travel").and(contains("WARNING")));

    spendlog(&home)
        .args(["budget", "set", "Rent", "2000"])
        .assert()
        .success()
        .stdout(contains("exceed total income"));

    spendlog(&home)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(contains("Travel").and(contains("Rent")));

    spendlog(&home)
        .args(["add", "30", "Travel", "Taxi home", "--date", "2025-02-04"])
        .assert()
        .success()
        .stdout(contains("over budget"));

    spendlog(&home)
        .args(["budget", "available"])
        .assert()
        .success()
        .stdout(contains("Groceries").and(contains("  Travel").not()));
}

#[test]
fn budget_rejects_zero_limit() {
    let home = TempDir::new().unwrap();
    spendlog(&home)
        .args(["budget", "set", "Rent", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid budget limit"));
}

#[test]
fn edit_and_delete() {
    let home = TempDir::new().unwrap();
    let id = add(&home, &["12", "Shopping", "Socks", "--date", "2025-03-01"]);

    spendlog(&home)
        .args(["edit", &id[..8], "--amount", "15.25", "-D", "Wool socks"])
        .assert()
        .success()
        .stdout(contains("Wool socks").and(contains("15.25")));

    spendlog(&home)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Wool socks"));

    spendlog(&home).args(["delete", &id]).assert().success();

    spendlog(&home)
        .args(["delete", &id])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn export_ledger_and_summary() {
    let home = TempDir::new().unwrap();
    add(&home, &["500", "Freelance", "Logo design", "--income", "--date", "2025-04-01"]);
    add(&home, &["20", "Entertainment", "Movie \"night\"", "--date", "2025-04-02"]);

    spendlog(&home)
        .args(["export", "ledger"])
        .assert()
        .success()
        .stdout(contains("Date,Type,Category,Description,Amount"))
        .stdout(contains(
            "2025-04-02,expense,Entertainment,\"Movie \"\"night\"\"\",20.00",
        ));

    spendlog(&home)
        .args(["export", "summary"])
        .assert()
        .success()
        .stdout(contains("Net Worth,480.00").and(contains("Entertainment,20.00")));
}

#[test]
fn import_round_trips_export() {
    let source = TempDir::new().unwrap();
    add(&source, &["75", "Healthcare", "Dentist visit", "--date", "2025-05-05"]);
    add(&source, &["2500", "Salary", "May pay", "--income", "--date", "2025-05-01"]);

    let ledger = source.path().join("ledger.csv");
    spendlog(&source)
        .args(["export", "ledger", "--output"])
        .arg(&ledger)
        .assert()
        .success()
        .stdout(contains("Exported 2 transaction(s)"));

    let target = TempDir::new().unwrap();
    spendlog(&target)
        .arg("import")
        .arg(&ledger)
        .assert()
        .success()
        .stdout(contains("Imported:  2"));

    spendlog(&target)
        .args(["list", "--kind", "income"])
        .assert()
        .success()
        .stdout(contains("May pay").and(contains("Dentist visit").not()));
}

#[test]
fn import_reports_bad_rows() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("bad.csv");
    fs::write(
        &file,
        "Date,Type,Category,Description,Amount\n\
         2025-01-01,expense,Rent,\"January rent\",900.00\n\
         2025-01-02,expense,Rent,\"x\",10.00\n",
    )
    .unwrap();

    spendlog(&home)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Imported:  1").and(contains("line 3")));
}

#[test]
fn analytics_and_investment_reports() {
    let home = TempDir::new().unwrap();
    add(&home, &["1000", "Investment", "Index fund", "--date", "2025-01-10"]);
    add(&home, &["1100", "Investment", "Fund sale", "--income", "--date", "2025-02-10"]);

    spendlog(&home)
        .args(["report", "analytics", "--window", "all"])
        .assert()
        .success()
        .stdout(contains("Jan 2025").and(contains("ROI: 10.00%")));

    spendlog(&home)
        .args(["report", "investments"])
        .assert()
        .success()
        .stdout(contains("Investment Tracker").and(contains("ROI: 10.00%")));
}

#[test]
fn snapshot_export_is_json() {
    let home = TempDir::new().unwrap();
    add(&home, &["9.99", "Education", "Ebook purchase", "--date", "2025-06-01"]);

    let output = spendlog(&home)
        .args(["export", "snapshot", "--pretty"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["metadata"]["transaction_count"], 1);
    assert_eq!(value["transactions"][0]["type"], "expense");
}

#[test]
fn config_shows_paths() {
    let home = TempDir::new().unwrap();
    spendlog(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("expenses.json").and(contains("Default window:     6months")));
}

#[test]
fn budget_list_rederives_spend_from_ledger() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("expenses.json"),
        r#"[{"id":"f00dcafe","amount":40,"category":"Groceries","description":"Veg market","date":"2025-03-02","type":"expense"}]"#,
    )
    .unwrap();
    fs::write(
        data.join("budgets.json"),
        r#"[{"category":"Groceries","limit":100,"spent":0}]"#,
    )
    .unwrap();

    spendlog(&home)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(contains("40.00").and(contains("GOOD")));
}

#[test]
fn add_rejects_oversized_amount() {
    let home = TempDir::new().unwrap();
    spendlog(&home)
        .args(["add", "99999999999999999", "Rent", "Mansion deposit"])
        .assert()
        .failure()
        .stderr(contains("too large"));
}
