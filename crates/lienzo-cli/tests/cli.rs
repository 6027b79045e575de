use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FORM: &str = "\
Ctto: 154251188
Solicitante: Jaime Roca
Teléfono: 774-19001
Fallecido: Rosa Vargas
Tamaño: 20x27
Modelo de Marco: a 1
Retoques: Recortar, nitidez
PRECIO Bs.: 350.-
";

/// Command isolated from any per-user configuration.
fn lienzo(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lienzo").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path());
    cmd
}

fn write_form(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn process_text_file_as_json() {
    let home = TempDir::new().unwrap();
    let input = write_form(home.path(), "orden.txt", FORM);

    lienzo(&home)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Size": "20*26""#))
        .stdout(predicate::str::contains(r#""FrameModel": "A1""#))
        .stdout(predicate::str::contains(r#""Phone": "77419001""#));
}

#[test]
fn process_text_format_uses_labels() {
    let home = TempDir::new().unwrap();
    let input = write_form(home.path(), "orden.txt", FORM);

    lienzo(&home)
        .args(["process", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Modelo de Marco: A1"))
        .stdout(predicate::str::contains("Ctto: 154251188"));
}

#[test]
fn process_writes_output_file() {
    let home = TempDir::new().unwrap();
    let input = write_form(home.path(), "orden.txt", FORM);
    let output = home.path().join("orden.csv");

    lienzo(&home)
        .args(["process", "--format", "csv", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with('\u{feff}'));
    assert!(csv.contains("\"RECORTAR NITIDEZ\"") || csv.contains(",RECORTAR NITIDEZ,"));
}

#[test]
fn process_rejects_unsupported_extension() {
    let home = TempDir::new().unwrap();
    let input = write_form(home.path(), "orden.pdf", FORM);

    lienzo(&home)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn process_missing_input_fails() {
    let home = TempDir::new().unwrap();

    lienzo(&home)
        .args(["process", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_exports_csv() {
    let home = TempDir::new().unwrap();
    let forms = home.path().join("forms");
    fs::create_dir(&forms).unwrap();
    write_form(&forms, "a.txt", FORM);
    write_form(&forms, "b.txt", "Ctto: 999\nSala: Aurora\n");
    write_form(&forms, "notes.md", "ignored");

    let output = home.path().join("datos.csv");
    let json_dir = home.path().join("json");
    let pattern = format!("{}/*", forms.display());

    lienzo(&home)
        .args(["batch", &pattern, "--output"])
        .arg(&output)
        .arg("--json-dir")
        .arg(&json_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records exported"));

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));

    let csv = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("Contract,Requester,Phone,Deceased,ServiceType,RequestDate,DeliveryDate,DeliveryPlace,DeliveryTime,Room,Coordinator,Size,FrameModel,Background,Retouches,Price"));
    assert!(lines[2].starts_with("999,"));

    assert!(json_dir.join("a.txt.json").exists());
    assert!(json_dir.join("b.txt.json").exists());
}

#[test]
fn batch_json_names_do_not_overwrite() {
    let home = TempDir::new().unwrap();
    let forms = home.path().join("forms");
    fs::create_dir_all(forms.join("one")).unwrap();
    fs::create_dir_all(forms.join("two")).unwrap();
    write_form(&forms.join("one"), "orden.txt", "Ctto: 111\n");
    write_form(&forms.join("two"), "orden.txt", "Ctto: 222\n");

    let json_dir = home.path().join("json");
    let pattern = format!("{}/*/orden.txt", forms.display());

    lienzo(&home)
        .args(["batch", &pattern, "--output"])
        .arg(home.path().join("datos.csv"))
        .arg("--json-dir")
        .arg(&json_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records exported"))
        .stderr(predicate::str::contains("already written in this batch"));

    let json = fs::read_to_string(json_dir.join("orden.txt.json")).unwrap();
    assert!(json.contains(r#""Contract": "111""#));
}

fn write_bytes(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// One good form, one undecodable image, one text file that is not UTF-8.
fn mixed_forms(home: &TempDir) -> std::path::PathBuf {
    let forms = home.path().join("forms");
    fs::create_dir(&forms).unwrap();
    write_form(&forms, "a.txt", FORM);
    write_bytes(&forms, "b.png", b"not a png");
    write_bytes(&forms, "c.txt", &[0xFF, 0xFE, 0x00]);
    forms
}

#[test]
fn batch_continues_after_failed_file() {
    let home = TempDir::new().unwrap();
    let forms = mixed_forms(&home);
    let output = home.path().join("datos.csv");
    let pattern = format!("{}/*", forms.display());

    let assert = lienzo(&home)
        .args(["batch", &pattern, "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records exported"))
        .stdout(predicate::str::contains("1 completed, 2 failed"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let (_, failed) = stdout.split_once("Failed files:").unwrap();
    assert!(failed.contains("b.png"));
    assert!(failed.contains("c.txt"));
    assert!(!failed.contains("a.txt"));

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().nth(1).unwrap().starts_with("154251188,"));
}

#[test]
fn batch_fail_fast_stops_without_export() {
    let home = TempDir::new().unwrap();
    let forms = mixed_forms(&home);
    let output = home.path().join("datos.csv");
    let pattern = format!("{}/*", forms.display());

    lienzo(&home)
        .args(["batch", &pattern, "--fail-fast", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    assert!(!output.exists());
}

#[test]
fn batch_without_matches_fails() {
    let home = TempDir::new().unwrap();
    let pattern = format!("{}/*.txt", home.path().display());

    lienzo(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_init_get_set() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");
    let config = config.to_str().unwrap();

    lienzo(&home)
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    lienzo(&home)
        .args(["--config", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    lienzo(&home)
        .args(["--config", config, "config", "get", "extraction.phone_digits"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8"));

    lienzo(&home)
        .args(["--config", config, "config", "set", "extraction.phone_digits", "7"])
        .assert()
        .success();

    lienzo(&home)
        .args(["--config", config, "config", "get", "extraction.phone_digits"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7"));

    lienzo(&home)
        .args(["--config", config, "config", "set", "extraction.no_such_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_applies_to_process() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");
    let config = config.to_str().unwrap();
    let input = write_form(home.path(), "orden.txt", FORM);

    lienzo(&home)
        .args(["--config", config, "config", "set", "extraction.phone_digits", "4"])
        .assert()
        .success();

    lienzo(&home)
        .args(["--config", config, "process"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Phone": "7741""#));
}
