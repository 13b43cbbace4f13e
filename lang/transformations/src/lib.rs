//! AST-to-AST rewrites that run between type inference and code generation.

mod hoist;

pub use hoist::hoist_program;
