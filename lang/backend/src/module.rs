//! Top-level driver: a hoisted `Program` to a JS module, then to text.

use std::io;
use std::rc::Rc;

use swc_common::SourceMap;
use swc_ecma_ast as js;
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_codegen::{Config as CodegenConfig, Emitter};
use uwu_ast::Program;

use crate::expr::block_to_js_stmts;
use crate::result::{BackendError, BackendResult};

/// Compiles an already-hoisted `Program` to a JS module. Top-level
/// statements are left bare (no wrapping IIFE, no implicit `return`) since a
/// whole compilation unit isn't itself used in expression position.
pub fn program_to_js_module(program: &Program) -> BackendResult<js::Module> {
    let stmts = block_to_js_stmts(&program.body, false)?;
    let body = stmts.into_iter().map(js::ModuleItem::Stmt).collect();
    Ok(js::Module { span: swc_common::DUMMY_SP, body, shebang: None })
}

/// Emits a JS module as host source text.
pub fn emit_js<W: io::Write>(module: &js::Module, mut writer: W) -> BackendResult {
    let cm = Rc::new(SourceMap::default());
    let js_writer = JsWriter::new(cm.clone(), "\n", &mut writer, None);
    let mut emitter =
        Emitter { cfg: CodegenConfig::default(), cm, comments: None, wr: Box::new(js_writer) };
    emitter
        .emit_module(module)
        .map_err(|e| BackendError::CodegenError(format!("failed to emit module: {e}")))
}

/// Compiles a hoisted `Program` straight to host source text.
pub fn program_to_js_string(program: &Program) -> BackendResult<String> {
    let module = program_to_js_module(program)?;
    let mut buf = Vec::new();
    emit_js(&module, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| BackendError::CodegenError(format!("emitted non-UTF-8 output: {e}")))
}
