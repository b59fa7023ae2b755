//! Integration tests for CLI infrastructure and the small utility commands

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use reportgen_testkit::ProjectFixture;
use std::fs;
use std::process::Command;

fn reportgen(project: &ProjectFixture) -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.current_dir(project.root());
    cmd
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reportgen"));
}

#[test]
fn test_cli_help_lists_commands() {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("lint"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let project = ProjectFixture::new();

    reportgen(&project)
        .args(["--config", "nope.toml", "specs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let project = ProjectFixture::new();
    project.config("[paths\n");

    reportgen(&project)
        .arg("specs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_PARSE_ERROR"));
}

#[test]
fn test_convert_yaml_to_json_and_back() {
    let project = ProjectFixture::new();
    project.file("job.yaml", "ProjectName: Ærø\nOperators:\n  PartyChief: Ana\n".as_bytes());

    reportgen(&project)
        .args(["convert", "job.yaml", "job.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted"));

    let json = fs::read_to_string(project.path("job.json")).unwrap();
    assert_eq!(
        json,
        "{\n  \"ProjectName\": \"Ærø\",\n  \"Operators\": {\n    \"PartyChief\": \"Ana\"\n  }\n}\n"
    );

    reportgen(&project)
        .args(["convert", "job.json", "copy.yml"])
        .assert()
        .success();
    let yaml = fs::read_to_string(project.path("copy.yml")).unwrap();
    assert!(yaml.starts_with("ProjectName:"), "got: {yaml}");
    assert!(yaml.contains("Operators:\n  PartyChief: Ana\n"), "got: {yaml}");
}

#[test]
fn test_convert_rejects_unknown_output_format() {
    let project = ProjectFixture::new();
    project.file("job.yaml", b"ProjectName: Alpha\n");

    reportgen(&project)
        .args(["convert", "job.yaml", "job.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JOB_FORMAT"));
    assert!(!project.path("job.csv").exists());
}

#[test]
fn test_sheets_rejects_non_workbook() {
    let project = ProjectFixture::new();
    project.file("nodes.xlsx", b"Node,X,Y,Z\n");

    reportgen(&project)
        .args(["sheets", "nodes.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SHEET_READ_ERROR"));
}

#[test]
fn test_nodes_missing_file() {
    let project = ProjectFixture::new();

    reportgen(&project)
        .args(["nodes", "missing.xlsx", "--sheet", "Nodes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read spreadsheet"));
}
