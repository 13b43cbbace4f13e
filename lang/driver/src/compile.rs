//! The glob-driven batch driver: `compile [<glob>]` walks every matched
//! source file, compiles it independently, and writes `p + ".js"` next to
//! it. One unit's failure never aborts the others.

use std::fs;
use std::path::{Path, PathBuf};

use crate::result::{DriverError, Error};

/// The glob used when no pattern is given on the command line.
pub const DEFAULT_GLOB: &str = "**/*.uwu";

/// The outcome of compiling one matched path: a `None` error with one
/// warning per `NonExhaustiveMatch` compilation still proceeded through;
/// `Some` means the unit aborted and no `.js` file was written for it.
pub struct UnitReport {
    pub path: PathBuf,
    pub warnings: Vec<miette::Report>,
    pub error: Option<miette::Report>,
}

impl UnitReport {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

pub struct CompileSummary {
    pub units: Vec<UnitReport>,
}

impl CompileSummary {
    /// The driver's own exit-code contract: 0 if every unit succeeded,
    /// non-zero if any failed to parse, infer, or emit.
    pub fn any_failed(&self) -> bool {
        self.units.iter().any(UnitReport::failed)
    }

    /// Every report across every unit, warnings first within each unit,
    /// in the order units were compiled -- ready to hand to
    /// `render_reports`.
    pub fn reports(&self) -> Vec<&miette::Report> {
        self.units.iter().flat_map(|u| u.warnings.iter().chain(u.error.iter())).collect()
    }
}

/// Compiles every path matching `pattern` (or [`DEFAULT_GLOB`] if `None`).
pub fn compile(pattern: Option<&str>) -> Result<CompileSummary, DriverError> {
    let pattern = pattern.unwrap_or(DEFAULT_GLOB);
    let paths = glob::glob(pattern)
        .map_err(|source| DriverError::InvalidGlob { pattern: pattern.to_string(), source })?;

    let mut units = Vec::new();
    for entry in paths {
        let path = entry.map_err(DriverError::GlobEntry)?;
        units.push(compile_unit(&path));
    }
    Ok(CompileSummary { units })
}

fn compile_unit(path: &Path) -> UnitReport {
    log::debug!("compiling {}", path.display());
    match compile_unit_inner(path) {
        Ok(warnings) => {
            for _ in &warnings {
                log::warn!("{}: non-exhaustive pattern match, downgraded to a warning", path.display());
            }
            UnitReport { path: path.to_path_buf(), warnings, error: None }
        }
        Err(err) => UnitReport {
            path: path.to_path_buf(),
            warnings: Vec::new(),
            error: Some(miette::Report::new(err)),
        },
    }
}

fn compile_unit_inner(path: &Path) -> Result<Vec<miette::Report>, Error> {
    let source = fs::read_to_string(path)
        .map_err(|source| DriverError::ReadFailed { path: path.to_path_buf(), source })?;

    let program = uwu_parser::parse_program(&source)?;

    // Non-exhaustive matches are recoverable: the source language itself
    // only raises at runtime, not at compile time, so `infer_program` folds
    // past every one it finds and emission proceeds; the decision-tree
    // compiler's own missing-leaf throw (see `uwu_backend::tree`) carries
    // the same behavior forward into the generated code. Any other error
    // is fatal and aborts the unit before anything is hoisted or emitted.
    let warnings: Vec<miette::Report> = uwu_elaborator::infer_program(&program)?
        .into_iter()
        .map(miette::Report::new)
        .collect();

    let hoisted = uwu_transformations::hoist_program(program);
    let js = uwu_backend::program_to_js_string(&hoisted)?;

    let out_path = append_js_suffix(path);
    fs::write(&out_path, js)
        .map_err(|source| DriverError::WriteFailed { path: out_path.clone(), source })?;

    Ok(warnings)
}

/// `p` -> `p + ".js"`, an appended suffix rather than a swapped extension
/// (`foo.uwu` -> `foo.uwu.js`), per the driver contract.
fn append_js_suffix(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".js");
    PathBuf::from(name)
}
