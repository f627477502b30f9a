//! End-to-end tests of the `linewise` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bets.json")
}

/// Binary pointed at a config path that does not exist, so defaults apply.
fn linewise(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("linewise");
    cmd.env_remove("LINEWISE_API_URL")
        .arg("--color")
        .arg("never")
        .arg("-c")
        .arg(dir.path().join("missing.toml"));
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run linewise");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

/// Decimal fields serialize as strings.
fn decimal(value: &serde_json::Value) -> f64 {
    value
        .as_str()
        .and_then(|text| text.parse().ok())
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
}

#[test]
fn test_help() {
    cargo_bin_cmd!("linewise")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("arb"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("linewise")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("linewise"));
}

#[test]
fn convert_american_line() {
    let dir = tempfile::tempdir().unwrap();
    linewise(&dir)
        .args(["convert", "+150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.5"))
        .stdout(predicate::str::contains("3/2"));
}

#[test]
fn convert_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(linewise(&dir).args(["--json", "convert", "-110", "--stake", "110"]));

    assert_eq!(value["command"], "convert");
    assert_eq!(value["american"], "-110");
    assert_eq!(value["decimal"], "1.909");
    assert_eq!(value["fractional"], "91/100");
    assert!(value["wager"].is_object());
}

#[test]
fn convert_rejects_invalid_line() {
    let dir = tempfile::tempdir().unwrap();
    linewise(&dir)
        .args(["convert", "+50"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn arb_finds_opportunity() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(linewise(&dir).args(["--json", "arb", "+120", "-110", "--stake", "1000"]));

    assert_eq!(value["command"], "arb");
    assert_eq!(value["result"]["is_arbitrage"], true);
    assert_eq!(value["result"]["legs"].as_array().map(Vec::len), Some(2));
}

#[test]
fn arb_table_output() {
    let dir = tempfile::tempdir().unwrap();
    linewise(&dir)
        .args(["arb", "+120", "-110", "--stake", "1000", "--book", "FanDuel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FanDuel"));
}

#[test]
fn quiet_suppresses_output() {
    let dir = tempfile::tempdir().unwrap();
    linewise(&dir)
        .args(["-q", "convert", "2.5"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn stats_summary_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(
        linewise(&dir)
            .args(["--json", "stats", "summary", "--file"])
            .arg(fixture()),
    );

    assert_eq!(value["command"], "stats.summary");
    // The player prop is dropped; pending bets stay in the summary.
    assert_eq!(value["summary"]["total_bets"], 4);
    assert_eq!(value["summary"]["pending_bets"], 2);
}

#[test]
fn stats_rejects_reversed_dates() {
    let dir = tempfile::tempdir().unwrap();
    linewise(&dir)
        .args(["stats", "ev", "--from", "2025-03-05", "--to", "2025-03-01", "--file"])
        .arg(fixture())
        .assert()
        .failure();
}

#[test]
fn bets_list_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(
        linewise(&dir)
            .args(["--json", "bets", "list", "--status", "pending", "--file"])
            .arg(fixture()),
    );
    let ids: Vec<_> = value["bets"]
        .as_array()
        .expect("bets array")
        .iter()
        .map(|bet| bet["id"].as_i64())
        .collect();
    assert_eq!(ids, [Some(3), Some(5)]);
}

#[test]
fn bets_unverified_from_file_skips_open_bets() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(
        linewise(&dir)
            .args(["--json", "bets", "unverified", "--file"])
            .arg(fixture()),
    );
    // Bet 3 is an unverified OddsJam bet that is still pending; bet 5 is Pikkit.
    let ids: Vec<_> = value["bets"]
        .as_array()
        .expect("bets array")
        .iter()
        .map(|bet| bet["id"].as_i64())
        .collect();
    assert_eq!(ids, [Some(4)]);
}

#[test]
fn sharp_json_recommendation() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(linewise(&dir).args([
        "--json",
        "sharp",
        "--odds",
        "+200",
        "--liquidity",
        "1000",
    ]));

    assert_eq!(value["command"], "sharp");
    assert_eq!(value["copy"]["policy"], "linear");
    assert_eq!(value["copy"]["recommendation"]["tier"], "scaled");
    assert_eq!(decimal(&value["copy"]["recommendation"]["stake"]), 15.0);
}

#[test]
fn sharp_threshold_reports_gray_area() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(linewise(&dir).args([
        "--json",
        "sharp",
        "--odds",
        "-100",
        "--liquidity",
        "500",
        "--policy",
        "threshold",
    ]));

    assert_eq!(value["copy"]["recommendation"]["tier"], "gray_area");
    assert_eq!(decimal(&value["copy"]["recommendation"]["stake"]), 0.0);
}

#[test]
fn sharp_rejects_negative_max_bet() {
    let dir = tempfile::tempdir().unwrap();
    let output = linewise(&dir)
        .args(["sharp", "--odds", "+200", "--liquidity", "1000", "--max-bet=-5"])
        .output()
        .expect("run linewise");

    assert!(!output.status.success(), "Expected nonzero exit code");
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(combined.contains("sharp.max_bet"), "got: {combined}");
}

#[test]
fn ev_beating_the_close() {
    let dir = tempfile::tempdir().unwrap();
    linewise(&dir)
        .args(["ev", "--odds", "+150", "--clv", "+120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High EV"))
        .stdout(predicate::str::contains("Beat the closing line"));
}

#[test]
fn ev_without_close_is_no_clv() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(linewise(&dir).args(["--json", "ev", "--odds", "-110"]));

    assert_eq!(value["command"], "ev");
    assert_eq!(value["analysis"]["category"], "No CLV");
    assert!(value["analysis"]["ev_percent"].is_null());
    assert!(value["analysis"]["expected_profit"].is_null());
}

#[test]
fn stats_ev_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(
        linewise(&dir)
            .args(["--json", "stats", "ev", "--file"])
            .arg(fixture()),
    );

    assert_eq!(value["command"], "stats.ev");
    let report = &value["report"];
    // Pending bets and the player prop are filtered out by default.
    assert_eq!(report["total_bets"], 2);
    assert_eq!(report["clv_bet_count"], 2);
    let books: Vec<_> = report["by_sportsbook"]
        .as_array()
        .expect("sportsbook groups")
        .iter()
        .map(|group| group["name"].as_str())
        .collect();
    assert_eq!(books, [Some("Bovada"), Some("Novig")]);
    assert_eq!(decimal(&report["by_sportsbook"][0]["roi"]), 100.0);
}

#[test]
fn stats_pending_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let value = json_stdout(
        linewise(&dir)
            .args(["--json", "stats", "pending", "--file"])
            .arg(fixture()),
    );

    assert_eq!(value["command"], "stats.pending");
    let report = &value["report"];
    assert_eq!(report["total_bets"], 2);
    assert_eq!(decimal(&report["total_stake"]), 50.0);
    let days: Vec<_> = report["daily"]
        .as_array()
        .expect("daily groups")
        .iter()
        .map(|day| day["date"].as_str())
        .collect();
    assert_eq!(days, [Some("2025-03-05"), None]);
}

#[test]
fn books_lists_exchanges() {
    let dir = tempfile::tempdir().unwrap();
    linewise(&dir)
        .arg("books")
        .assert()
        .success()
        .stdout(predicate::str::contains("Novig"));
}

#[test]
fn config_init_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    cargo_bin_cmd!("linewise")
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[sharp]"));

    cargo_bin_cmd!("linewise")
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn config_validate_reports_bad_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[sharp]\nlow_threshold = 3000\nhigh_threshold = 2000\n").unwrap();

    let output = cargo_bin_cmd!("linewise")
        .env_remove("LINEWISE_API_URL")
        .args(["config", "validate", "-c"])
        .arg(&path)
        .output()
        .expect("run linewise");

    assert!(!output.status.success(), "Expected nonzero exit code");
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.contains("sharp.low_threshold"),
        "Expected error about thresholds, got: {combined}"
    );
}
