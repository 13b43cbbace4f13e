use std::fs;

use assert_cmd::Command;

const BINARY: &str = "uwu";

#[test]
fn compiles_a_let_binding_to_a_const_declaration() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src_path = dir.path().join("main.uwu");
    fs::write(&src_path, "let x = 1\n").expect("write source");

    let mut cmd = Command::cargo_bin(BINARY).expect("binary must build");
    cmd.arg("compile").arg(dir.path().join("*.uwu"));
    cmd.assert().success();

    let js = fs::read_to_string(dir.path().join("main.uwu.js")).expect("js sibling must exist");
    assert!(js.contains("const x"));
    assert!(js.contains('1'));
}

#[test]
fn a_unify_failure_exits_non_zero_and_reports_to_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src_path = dir.path().join("bad.uwu");
    fs::write(&src_path, "do: Str 1 end\n").expect("write source");

    let mut cmd = Command::cargo_bin(BINARY).expect("binary must build");
    cmd.arg("compile").arg(dir.path().join("*.uwu"));
    let assert = cmd.assert().failure();
    let output = assert.get_output();
    assert!(!output.stderr.is_empty(), "a type error must be reported on stderr");
}

#[test]
fn a_non_exhaustive_match_still_exits_zero_and_emits_js() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = "case Some(None()) of Some(Some(a)) do a end None() do 6 end end\n";
    let src_path = dir.path().join("partial.uwu");
    fs::write(&src_path, src).expect("write source");

    let mut cmd = Command::cargo_bin(BINARY).expect("binary must build");
    cmd.arg("compile").arg(dir.path().join("*.uwu"));
    cmd.assert().success();

    assert!(dir.path().join("partial.uwu.js").exists());
}
