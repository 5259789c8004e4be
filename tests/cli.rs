use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECORDS: &str = r#"{
  "auditLogs": [
    {
      "id": "log-create",
      "type": "FEATURE_CREATED",
      "entityData": "{\"id\":\"flag-a\",\"name\":\"Checkout\",\"enabled\":false}",
      "previousEntityData": "",
      "timestamp": "1700000000",
      "editor": {"name": "Ada", "email": "ada@example.com"},
      "entityType": "FEATURE",
      "entityId": "flag-a"
    },
    {
      "id": "log-enable",
      "type": "FEATURE_UPDATED",
      "entityData": "{\"id\":\"flag-a\",\"name\":\"Checkout\",\"enabled\":true}",
      "previousEntityData": "{\"id\":\"flag-a\",\"name\":\"Checkout\",\"enabled\":false}",
      "timestamp": "1700000100",
      "editor": {"name": "Bob", "email": "bob@example.com"},
      "entityType": "FEATURE",
      "entityId": "flag-a"
    },
    {
      "id": "log-goal-delete",
      "type": "GOAL_DELETED",
      "entityData": "{\"id\":\"goal-1\"}",
      "previousEntityData": "{\"id\":\"goal-1\"}",
      "timestamp": "1700000200",
      "editor": {"name": "", "email": "carol@example.com"},
      "entityType": 1,
      "entityId": "goal-1"
    },
    {
      "id": "log-archive",
      "type": "FEATURE_ARCHIVED",
      "entityData": "{\"id\":\"flag-b\"}",
      "previousEntityData": "{\"id\":\"flag-b\"}",
      "timestamp": "1700000300",
      "editor": {"name": "Ada", "email": "ada@example.com"},
      "entityType": "FEATURE",
      "entityId": "flag-b"
    }
  ],
  "cursor": "4",
  "totalCount": "4"
}"#;

fn flag_audit(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flag-audit").unwrap();
    cmd.env("FLAG_AUDIT_DATA_DIR", data_dir.path())
        .env_remove("FLAG_AUDIT_LOG");
    cmd
}

fn seeded() -> TempDir {
    let data_dir = TempDir::new().unwrap();
    let source = data_dir.path().join("records.json");
    std::fs::write(&source, RECORDS).unwrap();

    flag_audit(&data_dir)
        .arg("import")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 4 audit logs."));

    data_dir
}

#[test]
fn test_import_is_idempotent() {
    let data_dir = seeded();
    let source = data_dir.path().join("records.json");

    flag_audit(&data_dir)
        .arg("import")
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 0 audit logs."))
        .stdout(predicate::str::contains("Skipped 4"));
}

#[test]
fn test_list_newest_first() {
    let data_dir = seeded();

    let output = flag_audit(&data_dir).arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let archive = stdout.find("log-archive").unwrap();
    let create = stdout.find("log-create").unwrap();
    assert!(archive < create);
    assert!(stdout.contains("showing 4 of 4 records"));
    assert!(stdout.contains("enabled: false -> true"));
    assert!(stdout.contains("(no changes)"));
}

#[test]
fn test_list_filters() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["list", "--entity-type", "goal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log-goal-delete"))
        .stdout(predicate::str::contains("log-create").not());

    flag_audit(&data_dir)
        .args(["list", "--search", "BOB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log-enable"))
        .stdout(predicate::str::contains("showing 1 of 1 records"));
}

#[test]
fn test_list_pagination() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["list", "--page-size", "3", "--order", "asc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("showing 3 of 4 records"))
        .stdout(predicate::str::contains("--page 2"))
        .stdout(predicate::str::contains("log-archive").not());
}

#[test]
fn test_list_rejects_inverted_range() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["list", "--from", "2024-01-02", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn test_list_zero_means_default_or_unbounded() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["list", "--page-size", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("showing 4 of 4 records"));

    flag_audit(&data_dir)
        .args(["list", "--from", "0", "--to", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("showing 4 of 4 records"));
}

#[test]
fn test_list_huge_page_number() {
    let data_dir = seeded();
    let page = usize::MAX.to_string();

    flag_audit(&data_dir)
        .args(["list", "--page", page.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 records in total"));
}

#[test]
fn test_invalid_date_format_is_a_config_error() {
    let data_dir = seeded();
    std::fs::write(data_dir.path().join("config.json"), r#"{"date_format":"%Q"}"#).unwrap();

    flag_audit(&data_dir)
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("date_format"));
}

#[test]
fn test_show_creation() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["show", "log-create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada created a Feature Flag"))
        .stdout(predicate::str::contains("Shown as:    created"))
        .stdout(predicate::str::contains("+   \"enabled\": false"));
}

#[test]
fn test_show_legacy_deletion() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["show", "log-goal-delete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("carol@example.com deleted a Goal"))
        .stdout(predicate::str::contains("Shown as:    deleted"))
        .stdout(predicate::str::contains("-   \"id\": \"goal-1\""));
}

#[test]
fn test_show_update_with_fields() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["show", "log-enable", "--tab", "snapshot", "--fields"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[snapshot]"))
        .stdout(predicate::str::contains("\"name\": \"Checkout\""))
        .stdout(predicate::str::contains("enabled: false -> true"));
}

#[test]
fn test_show_unknown_id() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Audit log not found: nope"));
}

#[test]
fn test_history() {
    let data_dir = seeded();

    flag_audit(&data_dir)
        .args(["history", "flag-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History of flag-a"))
        .stdout(predicate::str::contains("showing 2 of 2 records"))
        .stdout(predicate::str::contains("log-archive").not());

    flag_audit(&data_dir)
        .args(["history", "flag-z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history found"));
}

#[test]
fn test_export_csv() {
    let data_dir = seeded();
    let target = data_dir.path().join("out.csv");

    flag_audit(&data_dir)
        .arg("export")
        .arg(&target)
        .args(["--entity-type", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 audit logs"));

    let csv = std::fs::read_to_string(&target).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("log-enable"));
}

#[test]
fn test_config_shows_paths() {
    let data_dir = TempDir::new().unwrap();

    flag_audit(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("audit_logs.jsonl"))
        .stdout(predicate::str::contains("Page size:          20"));

    assert!(data_dir.path().join("config.json").exists());
}

#[test]
fn test_list_empty_store() {
    let data_dir = TempDir::new().unwrap();

    flag_audit(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit logs found."));
}
