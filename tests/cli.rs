use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn exam_file(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".exam").tempfile().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

#[test]
fn compile_fixture_to_stdout() {
    let mut cmd = cargo_bin_cmd!("examxml");
    cmd.arg(fixture_path("algebra.exam"));

    let output_pred = predicate::str::starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<exam ")
        .and(predicate::str::contains("name=\"Algebra practice\""))
        .and(predicate::str::contains("<gapfill reference=\"0\" />"))
        .and(predicate::str::ends_with("</exam>\n"));

    cmd.assert().success().stdout(output_pred).stderr(predicate::str::is_empty());
}

#[test]
fn no_declaration_flag() {
    let file = exam_file("name: Plain");
    let mut cmd = cargo_bin_cmd!("examxml");
    cmd.arg(file.path()).arg("--no-declaration");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<exam name=\"Plain\""));
}

#[test]
fn config_file_controls_output() {
    let file = exam_file("name: Flat");
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "[output]\npretty = false\nxml_declaration = false").unwrap();

    let mut cmd = cargo_bin_cmd!("examxml");
    cmd.arg(file.path()).arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<exam ").and(predicate::str::contains("\n").not()));
}

#[test]
fn local_config_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("examxml.toml"), "[output]\nxml_declaration = false\n").unwrap();
    std::fs::write(dir.path().join("quiz.exam"), "name: Local").unwrap();

    let mut cmd = cargo_bin_cmd!("examxml");
    cmd.current_dir(dir.path()).arg("quiz.exam");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<exam name=\"Local\""));
}

#[test]
fn invalid_part_type_exits_nonzero() {
    let file = exam_file("questions: [ { parts: [ { type: essay } ] } ]");
    let mut cmd = cargo_bin_cmd!("examxml");
    cmd.arg(file.path());

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid part type essay"))
        .stderr(predicate::str::contains("Possible fix: Valid part types are 1_n_2, gapfill"));
}

#[test]
fn parse_error_reports_position() {
    let file = exam_file("name: ok\nduration: [1, 2\n");
    let mut cmd = cargo_bin_cmd!("examxml");
    cmd.arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error at"));
}

#[test]
fn missing_file_exits_nonzero() {
    let mut cmd = cargo_bin_cmd!("examxml");
    cmd.arg("/nonexistent/exam.exam");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading /nonexistent/exam.exam"));
}
