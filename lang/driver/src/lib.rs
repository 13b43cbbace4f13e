//! A glob-driven batch compiler driver: no database, no incremental
//! recompilation, no LSP surface -- each matched file is parsed, inferred,
//! hoisted, and emitted independently, synchronously, in the calling
//! thread, matching the core's single-threaded, stateless concurrency
//! model.

mod compile;
mod render_reports;
mod result;

pub use compile::{compile, CompileSummary, UnitReport, DEFAULT_GLOB};
pub use render_reports::{render_reports, render_reports_io};
pub use result::{DriverError, Error};

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn compiles_a_single_file_and_writes_its_js_sibling() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src_path = dir.path().join("main.uwu");
        fs::write(&src_path, "let x = 1\n").expect("write source");

        let pattern = dir.path().join("*.uwu");
        let summary = compile(Some(pattern.to_str().expect("utf8 path"))).expect("glob must be valid");

        assert_eq!(summary.units.len(), 1);
        assert!(!summary.any_failed(), "compilation must succeed");

        let js_path = dir.path().join("main.uwu.js");
        let js = fs::read_to_string(js_path).expect("js sibling must exist");
        assert!(js.contains("const x"));
    }

    #[test]
    fn a_parse_failure_is_reported_without_aborting_other_units() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("bad.uwu"), "let x = \n").expect("write bad source");
        fs::write(dir.path().join("good.uwu"), "let x = 1\n").expect("write good source");

        let pattern = dir.path().join("*.uwu");
        let summary = compile(Some(pattern.to_str().expect("utf8 path"))).expect("glob must be valid");

        assert_eq!(summary.units.len(), 2);
        assert!(summary.any_failed());
        let failed = summary.units.iter().filter(|u| u.failed()).count();
        assert_eq!(failed, 1);
    }

    #[test]
    fn a_non_exhaustive_match_is_a_warning_that_still_emits_js() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = "case Some(None()) of Some(Some(a)) do a end None() do 6 end end\n";
        let src_path = dir.path().join("partial.uwu");
        fs::write(&src_path, src).expect("write source");

        let pattern = dir.path().join("*.uwu");
        let summary = compile(Some(pattern.to_str().expect("utf8 path"))).expect("glob must be valid");

        assert_eq!(summary.units.len(), 1);
        assert!(!summary.units[0].failed(), "a non-exhaustive match must not abort the unit");
        assert_eq!(summary.units[0].warnings.len(), 1);

        let js_path = dir.path().join("partial.uwu.js");
        assert!(js_path.exists(), "js must still be emitted despite the warning");
    }
}
