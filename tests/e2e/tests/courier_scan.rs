//! E2E тесты для CLI инструмента `courier_scan`.
//!
//! Проверяем классификацию одного кода, обработку сессии из файла и stdin,
//! экспорт в обе схемы CSV и запасной каталог сохранения.

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Получить путь к фикстуре.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// Создать команду для запуска courier_scan.
///
/// `cargo_bin` deprecated из-за edge case с custom build directories,
/// но это единственный способ для кросс-крейтовых бинарников.
#[expect(deprecated)]
fn courier_scan() -> Command {
    Command::cargo_bin("courier_scan").unwrap()
}

/// Найти экспортированный файл с указанным окончанием имени.
fn exported(dir: &Path, suffix: &str) -> String {
    let entry = fs::read_dir(dir.join("快递扫码助手"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.file_name().unwrap().to_str().unwrap().ends_with(suffix))
        .unwrap_or_else(|| panic!("нет файла *{suffix} в {}", dir.display()));
    fs::read_to_string(entry).unwrap()
}

// ============================================================================
// classify
// ============================================================================

#[test]
fn test_classify_sf_adds_prefix() {
    courier_scan()
        .args(["classify", "--carrier", "sf", "123456789012"])
        .assert()
        .success()
        .stdout("SF123456789012\n");
}

#[test]
fn test_classify_fedex_keeps_last_digits() {
    courier_scan()
        .args(["classify", "-c", "fedex", "FedEx-123456789012"])
        .assert()
        .success()
        .stdout("123456789012\n");
}

#[test]
fn test_classify_rejects_invalid_code() {
    courier_scan()
        .args(["classify", "--carrier", "ups", "bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid barcode format"));
}

#[test]
fn test_classify_generic_accepts_anything() {
    courier_scan()
        .args(["classify", "--carrier", "generic", "  bad  "])
        .assert()
        .success()
        .stdout("bad\n");
}

// ============================================================================
// scan
// ============================================================================

#[test]
fn test_scan_file_prints_summary_most_recent_first() {
    let output = courier_scan()
        .args(["scan", "--carrier", "ups", "--input"])
        .arg(fixture("ups_barcodes.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Accepted 3 scan(s), rejected 1"))
        .stderr(predicate::str::contains("not-a-ups-code"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "总计: 3 | UPS: 3");
    assert_eq!(lines.len(), 4);
    // последний отсканированный код — первым
    assert!(lines[1].ends_with("UPS: 1Z999AA10123456784"));
    assert!(lines[2].ends_with("UPS: 1Z12345E0205271688"));
}

#[test]
fn test_scan_from_stdin_with_directives() {
    courier_scan()
        .args(["scan"])
        .write_stdin(fs::read_to_string(fixture("mixed_session.txt")).unwrap())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("总计: 4 | 顺丰: 2 | FedEx: 1 | 中通: 1\n"))
        .stderr(predicate::str::contains("Records cleared"))
        .stderr(predicate::str::contains("Accepted 5 scan(s), rejected 1"));
}

#[test]
fn test_scan_exports_both_schemas() {
    let dir = tempdir().unwrap();

    courier_scan()
        .args(["scan", "--export", "both", "--input"])
        .arg(fixture("mixed_session.txt"))
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 4 record(s)"));

    let brief = exported(dir.path(), "_TrackingNumber.csv");
    assert_eq!(
        brief.lines().skip(1).map(|l| l.rsplit(',').next().unwrap()).collect::<Vec<_>>(),
        ["\"123456789012\"", "\"SF123456789012\"", "\"SF000000000001\"", "\"ZTO0000000000000\""]
    );
    assert!(brief.starts_with("时间,快递,处理后\n"));

    let full = exported(dir.path(), "_TrackingNumber_Full.csv");
    assert!(full.starts_with("时间,快递,原始,处理后\n"));
    assert!(full.contains(",\"FedEx\",\"FedEx-123456789012\",\"123456789012\"\n"));
    assert_eq!(full.lines().count(), 5);
}

#[test]
fn test_scan_exports_single_carrier() {
    let dir = tempdir().unwrap();

    courier_scan()
        .args(["scan", "--export", "brief", "--only", "sf", "--input"])
        .arg(fixture("mixed_session.txt"))
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 2 record(s)"));

    let brief = exported(dir.path(), "_TrackingNumber.csv");
    assert_eq!(brief.lines().count(), 3);
    assert!(brief.lines().skip(1).all(|l| l.contains("\"顺丰\"")));
}

#[test]
fn test_scan_empty_export_fails() {
    let dir = tempdir().unwrap();

    courier_scan()
        .args(["scan", "--export", "full", "--out-dir"])
        .arg(dir.path())
        .write_stdin("bad\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to export"));

    assert!(!dir.path().join("快递扫码助手").exists());
}

#[test]
fn test_scan_falls_back_when_primary_unwritable() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"").unwrap();
    let fallback = dir.path().join("private");

    courier_scan()
        .args(["scan", "--carrier", "dhl", "--export", "brief", "--out-dir"])
        .arg(&blocker)
        .arg("--fallback-dir")
        .arg(&fallback)
        .write_stdin("1234567890\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("private"));

    let brief = exported(&fallback, "_TrackingNumber.csv");
    assert!(brief.ends_with(",\"DHL\",\"1234567890\"\n"));
}

#[test]
fn test_scan_missing_input_file() {
    courier_scan()
        .args(["scan", "--input", "/nonexistent/barcodes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}
