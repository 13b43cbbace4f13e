//! JavaScript code generation for the uwu language: a mechanical
//! pretty-printer from a hoisted `Program` to host source text via
//! `swc_ecma_ast`/`swc_ecma_codegen`.

mod expr;
mod ident;
pub mod result;
mod tree;

mod module;

pub use module::{emit_js, program_to_js_module, program_to_js_string};
pub use result::{BackendError, BackendResult};

#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Javascript,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uwu_ast::{Ident, Let, NumLit, Program};

    #[test]
    fn let_binding_emits_a_const_declaration() {
        let program = Program {
            body: vec![uwu_ast::Expr::Let(Let {
                span: None,
                id: Ident::new("x"),
                init: Box::new(uwu_ast::Expr::Num(NumLit { span: None, value: 1 })),
                hint: None,
            })],
        };
        let js = program_to_js_string(&program).expect("must emit");
        assert!(js.contains("const x"));
        assert!(js.contains('1'));
    }

    #[test]
    fn empty_bare_variant_call_emits_a_string_literal() {
        let program = Program {
            body: vec![uwu_ast::Expr::VariantCall(uwu_ast::VariantCall {
                span: None,
                name: Ident::new("None"),
                args: vec![],
            })],
        };
        let js = program_to_js_string(&program).expect("must emit");
        assert!(js.contains("\"None\"") || js.contains("'None'"));
    }
}
