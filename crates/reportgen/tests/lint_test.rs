//! Integration tests for `reportgen lint`

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use reportgen_testkit::{ProjectFixture, docx_with_body};
use std::process::Command;

fn reportgen(project: &ProjectFixture) -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.current_dir(project.root());
    cmd
}

fn project_with_ghost_placeholder() -> ProjectFixture {
    let project = ProjectFixture::new();
    project
        .file(
            "templates/dpr.docx",
            &docx_with_body(&["{{ProjectName}}", "{{Ghost}}", "{{Equipment.MBES.Make}}"]),
        )
        .spec("dpr", "template_file: templates/dpr.docx\noutput_pattern: x.docx\n")
        .file(
            "job.yaml",
            b"ProjectName: Alpha\nEquipment:\n  MBES:\n    Make: Kongsberg\n",
        );
    project
}

#[test]
fn test_lint_reports_unresolved_but_succeeds() {
    let project = project_with_ghost_placeholder();

    reportgen(&project)
        .args(["lint", "--job", "job.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 unresolved placeholder(s)"))
        .stdout(predicate::str::contains("- Ghost"))
        .stdout(predicate::str::contains("0/1 spec(s) clean"));
}

#[test]
fn test_lint_json_output() {
    let project = project_with_ghost_placeholder();

    let output = reportgen(&project)
        .args(["lint", "--job", "job.yaml", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        serde_json::json!([{"template": "dpr", "unresolved": ["Ghost"], "blank": [], "error": null}])
    );
}

#[test]
fn test_lint_lists_placeholders_that_render_blank() {
    let project = ProjectFixture::new();
    project
        .file("templates/dpr.docx", &docx_with_body(&["{{ProjectName}}", "{{Notes}}"]))
        .spec("dpr", "template_file: templates/dpr.docx\noutput_pattern: x.docx\n")
        .file("job.yaml", b"ProjectName: Alpha\nNotes: null\n");

    reportgen(&project)
        .args(["lint", "--job", "job.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 placeholder(s) hold null and will render blank"))
        .stdout(predicate::str::contains("- Notes"))
        .stdout(predicate::str::contains("1/1 spec(s) clean"));
}

#[test]
fn test_lint_reports_per_spec_errors() {
    let project = ProjectFixture::new();
    project
        .spec("dpr", "template_file: templates/none.docx\noutput_pattern: x.docx\n")
        .file("job.yaml", b"ProjectName: Alpha\n");

    reportgen(&project)
        .args(["lint", "--job", "job.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TEMPLATE_NOT_FOUND"));
}

#[test]
fn test_lint_fails_when_spec_set_cannot_load() {
    let project = ProjectFixture::new();
    project
        .spec("broken", "output_pattern: x.docx\n")
        .file("job.yaml", b"ProjectName: Alpha\n");

    reportgen(&project)
        .args(["lint", "--job", "job.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SPEC_LOAD_ERROR"));
}
