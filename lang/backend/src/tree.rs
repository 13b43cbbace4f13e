//! Lowers a compiled decision tree (see `uwu-matcher`) to nested
//! `if (cond) { .. } else { .. }` statements.

use swc_common::{SyntaxContext, DUMMY_SP};
use swc_ecma_ast as js;
use uwu_matcher::Tree;

use crate::expr::block_to_js_stmts;
use crate::ident::{bool_lit, const_decl, ident_expr, member, str_lit, throw_new_error};
use crate::result::{BackendError, BackendResult};

/// `Tree::MissingLeaf` -> `throw new Error(...)`, `Tree::Leaf` -> the
/// compiled body's statements (its last value becomes the IIFE's `return`),
/// `Tree::Node` -> a field-extracting binding block followed by an
/// `if`/`else` on the slot's discriminant.
pub fn tree_to_stmt(tree: &Tree) -> BackendResult<js::Stmt> {
    match tree {
        Tree::MissingLeaf => Ok(throw_new_error("Non-exhaustive pattern match")),

        Tree::Leaf(body) => match body.as_ref() {
            uwu_ast::Expr::Block(block) => {
                let stmts = block_to_js_stmts(&block.exprs, true)?;
                Ok(js::Stmt::Block(js::BlockStmt { span: DUMMY_SP, ctxt: SyntaxContext::empty(), stmts }))
            }
            other => Err(BackendError::Impossible(format!(
                "case arm body must be a Block after hoisting, got {other:?}"
            ))),
        },

        Tree::Node { var, pattern_name, vars, yes, no } => {
            let cond = match pattern_name.name.as_str() {
                "True" => eq(ident_expr(var), bool_lit(true)),
                "False" => eq(ident_expr(var), bool_lit(false)),
                name if vars.is_empty() => eq(ident_expr(var), str_lit(name)),
                name => eq(member(ident_expr(var), "TAG"), str_lit(name)),
            };

            let mut yes_stmts: Vec<js::Stmt> = vars
                .iter()
                .enumerate()
                .map(|(i, sub_var)| const_decl(sub_var, member(ident_expr(var), &format!("_{i}"))))
                .collect();
            yes_stmts.push(tree_to_stmt(yes)?);

            let cons = js::Stmt::Block(js::BlockStmt { span: DUMMY_SP, ctxt: SyntaxContext::empty(), stmts: yes_stmts });
            let alt = tree_to_stmt(no)?;

            Ok(js::Stmt::If(js::IfStmt {
                span: DUMMY_SP,
                test: Box::new(cond),
                cons: Box::new(cons),
                alt: Some(Box::new(alt)),
            }))
        }
    }
}

fn eq(left: js::Expr, right: js::Expr) -> js::Expr {
    js::Expr::Bin(js::BinExpr {
        span: DUMMY_SP,
        op: js::BinaryOp::EqEqEq,
        left: Box::new(left),
        right: Box::new(right),
    })
}
