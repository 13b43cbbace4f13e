//! Lowers a (already hoisted) `Expr` tree to SWC's JS AST.

use swc_common::{SyntaxContext, DUMMY_SP};
use swc_ecma_ast as js;
use uwu_ast::{BinaryExpr, Expr, UnaryExpr};

use crate::ident::{bool_lit, call, const_decl, ident_expr, iife, member, num_lit, return_stmt, str_lit};
use crate::result::{BackendError, BackendResult};
use crate::tree::tree_to_stmt;

/// Compiles a single node to a JS expression.
pub fn expr_to_js(expr: &Expr) -> BackendResult<js::Expr> {
    match expr {
        Expr::Num(lit) => Ok(num_lit(lit.value as f64)),
        Expr::Float(lit) => Ok(num_lit(lit.value)),
        Expr::Str(lit) => Ok(str_lit(&lit.value)),
        Expr::Identifier(id) => Ok(ident_expr(&id.name)),

        Expr::Let(_) | Expr::Def(_) => Err(BackendError::Impossible(
            "Let/Def reached in expression position; the hoist transform must run first".into(),
        )),

        Expr::Do(do_expr) => Ok(iife(block_to_js_stmts(&do_expr.block, true)?)),

        Expr::Block(block) => Ok(iife(block_to_js_stmts(&block.exprs, true)?)),

        Expr::If(if_expr) => {
            let test = expr_to_js(&if_expr.test)?;
            let then_stmts = block_body_stmts(&if_expr.then)?;
            let cons = js::Stmt::Block(js::BlockStmt {
                span: DUMMY_SP,
                ctxt: SyntaxContext::empty(),
                stmts: then_stmts,
            });
            let alt: js::Stmt = match &if_expr.or_else {
                Some(or_else) => js::Stmt::Block(js::BlockStmt {
                    span: DUMMY_SP,
                    ctxt: SyntaxContext::empty(),
                    stmts: block_body_stmts(or_else)?,
                }),
                None => js::Stmt::Return(js::ReturnStmt { span: DUMMY_SP, arg: None }),
            };
            let if_stmt = js::Stmt::If(js::IfStmt {
                span: DUMMY_SP,
                test: Box::new(test),
                cons: Box::new(cons),
                alt: Some(Box::new(alt)),
            });
            Ok(iife(vec![if_stmt]))
        }

        Expr::UnaryExpr(un) => unary_to_js(un),
        Expr::BinaryExpr(bin) => binary_to_js(bin),

        Expr::Call(call_expr) => {
            let mut callee = expr_to_js(&call_expr.callee)?;
            for arg in &call_expr.args {
                callee = call(callee, vec![expr_to_js(arg)?]);
            }
            Ok(callee)
        }

        Expr::VariantCall(variant) => {
            if variant.name.name == "True" {
                return Ok(bool_lit(true));
            }
            if variant.name.name == "False" {
                return Ok(bool_lit(false));
            }
            if variant.args.is_empty() {
                return Ok(str_lit(&variant.name.name));
            }
            let mut props = vec![js::PropOrSpread::Prop(Box::new(js::Prop::KeyValue(
                js::KeyValueProp {
                    key: js::PropName::Ident(js::IdentName { span: DUMMY_SP, sym: "TAG".into() }),
                    value: Box::new(str_lit(&variant.name.name)),
                },
            )))];
            for (i, arg) in variant.args.iter().enumerate() {
                props.push(js::PropOrSpread::Prop(Box::new(js::Prop::KeyValue(js::KeyValueProp {
                    key: js::PropName::Ident(js::IdentName { span: DUMMY_SP, sym: format!("_{i}").into() }),
                    value: Box::new(expr_to_js(arg)?),
                }))));
            }
            Ok(js::Expr::Object(js::ObjectLit { span: DUMMY_SP, props }))
        }

        Expr::EnumDeclaration(_) => Ok(js::Expr::Ident(js::Ident::new(
            "undefined".into(),
            DUMMY_SP,
            SyntaxContext::empty(),
        ))),

        Expr::Array(array) => {
            let elems = array
                .args
                .iter()
                .map(|e| expr_to_js(e).map(|expr| Some(js::ExprOrSpread { spread: None, expr: Box::new(expr) })))
                .collect::<BackendResult<Vec<_>>>()?;
            Ok(js::Expr::Array(js::ArrayLit { span: DUMMY_SP, elems }))
        }

        Expr::CaseOf(case_of) => {
            let scrutinee = expr_to_js(&case_of.scrutinee)?;
            let mut stmts = vec![const_decl("$", scrutinee)];
            let tree = uwu_matcher::gen_match(&case_of.cases);
            stmts.push(tree_to_stmt(&tree)?);
            Ok(iife(stmts))
        }

        Expr::External(ext) => Ok(js::Expr::Ident(js::Ident::new(
            ext.verbatim.clone().into(),
            DUMMY_SP,
            SyntaxContext::empty(),
        ))),
    }
}

/// Compiles an `If` branch: if it's a `Block` (the ordinary case, from
/// `if .. do .. end`), yield its statements directly so only one IIFE wraps
/// the whole `If`; otherwise treat it as a single tail expression.
fn block_body_stmts(expr: &Expr) -> BackendResult<Vec<js::Stmt>> {
    match expr {
        Expr::Block(block) => block_to_js_stmts(&block.exprs, true),
        other => Ok(vec![return_stmt(expr_to_js(other)?)]),
    }
}

/// Compiles a statement sequence: `Let`/`Def` become `const` declarations,
/// everything else an expression statement, with the final element
/// returned when `tail_return` (every non-top-level block) and left as a
/// bare expression statement at the top level of a compilation unit.
pub fn block_to_js_stmts(exprs: &[Expr], tail_return: bool) -> BackendResult<Vec<js::Stmt>> {
    let n = exprs.len();
    let mut stmts = Vec::with_capacity(n);
    for (i, expr) in exprs.iter().enumerate() {
        let is_last = i + 1 == n;
        match expr {
            Expr::Let(let_expr) => {
                let init = expr_to_js(&let_expr.init)?;
                stmts.push(const_decl(&let_expr.id.name, init));
            }
            Expr::Def(def) => {
                let func = def_to_js_arrow(def)?;
                stmts.push(const_decl(&def.id.name, func));
            }
            other => {
                let js_expr = expr_to_js(other)?;
                if is_last && tail_return {
                    stmts.push(return_stmt(js_expr));
                } else {
                    stmts.push(js::Stmt::Expr(js::ExprStmt { span: DUMMY_SP, expr: Box::new(js_expr) }));
                }
            }
        }
    }
    Ok(stmts)
}

/// `def id(p0, p1) do body end` -> `(p0) => (p1) => { body }`, curried one
/// parameter per arrow; a zero-parameter `def` still takes one placeholder
/// parameter so the call site's own zero-argument `Call` codegen lines up.
fn def_to_js_arrow(def: &uwu_ast::Def) -> BackendResult<js::Expr> {
    let body_stmts = block_body_stmts(&def.body)?;
    let body = Box::new(js::BlockStmtOrExpr::BlockStmt(js::BlockStmt {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        stmts: body_stmts,
    }));

    let param_names: Vec<String> = if def.params.is_empty() {
        vec!["_".to_string()]
    } else {
        def.params.iter().map(|p| p.id.name.clone()).collect()
    };

    let innermost = js::Expr::Arrow(js::ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: vec![param_pat(&param_names[param_names.len() - 1])],
        body,
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    });

    let curried = param_names[..param_names.len() - 1].iter().rev().fold(innermost, |acc, name| {
        js::Expr::Arrow(js::ArrowExpr {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            params: vec![param_pat(name)],
            body: Box::new(js::BlockStmtOrExpr::Expr(Box::new(acc))),
            is_async: false,
            is_generator: false,
            type_params: None,
            return_type: None,
        })
    });

    Ok(curried)
}

fn param_pat(name: &str) -> js::Pat {
    js::Pat::Ident(js::BindingIdent {
        id: js::Ident::new(crate::ident::js_safe_name(name).into(), DUMMY_SP, SyntaxContext::empty()),
        type_ann: None,
    })
}

fn unary_to_js(un: &UnaryExpr) -> BackendResult<js::Expr> {
    let arg = expr_to_js(&un.e)?;
    let op = match un.op.as_str() {
        "-" => js::UnaryOp::Minus,
        "+" => js::UnaryOp::Plus,
        "not" | "!" => js::UnaryOp::Bang,
        other => return Err(BackendError::Impossible(format!("unknown unary operator `{other}`"))),
    };
    Ok(js::Expr::Unary(js::UnaryExpr { span: DUMMY_SP, op, arg: Box::new(arg) }))
}

fn binary_to_js(bin: &BinaryExpr) -> BackendResult<js::Expr> {
    let left = expr_to_js(&bin.left)?;
    let right = expr_to_js(&bin.right)?;
    match bin.op.as_str() {
        "|" => Ok(call(member(left, "concat"), vec![right])),
        "/" => Ok(call(
            member(ident_expr("Math"), "floor"),
            vec![js::Expr::Bin(js::BinExpr {
                span: DUMMY_SP,
                op: js::BinaryOp::Div,
                left: Box::new(left),
                right: Box::new(right),
            })],
        )),
        other => {
            let stripped = other.strip_suffix('.').unwrap_or(other);
            let js_op = match stripped {
                "++" => js::BinaryOp::Add,
                "+" => js::BinaryOp::Add,
                "-" => js::BinaryOp::Sub,
                "*" => js::BinaryOp::Mul,
                "/" => js::BinaryOp::Div,
                "%" => js::BinaryOp::Mod,
                "<" => js::BinaryOp::Lt,
                ">" => js::BinaryOp::Gt,
                "==" => js::BinaryOp::EqEqEq,
                "!=" => js::BinaryOp::NotEqEq,
                _ => return Err(BackendError::Impossible(format!("unknown binary operator `{other}`"))),
            };
            Ok(js::Expr::Bin(js::BinExpr {
                span: DUMMY_SP,
                op: js_op,
                left: Box::new(left),
                right: Box::new(right),
            }))
        }
    }
}
