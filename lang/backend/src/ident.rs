//! Small SWC AST builders shared by [`crate::expr`] and [`crate::tree`].
//!
//! Every span is [`DUMMY_SP`]: the generated source has no meaningful
//! mapping back to input positions, matching the teacher's own
//! `ir2js` output (which never threads spans through either).

use swc_common::{SyntaxContext, DUMMY_SP};
use swc_ecma_ast as js;

/// Maps an AST identifier to a syntactically valid JS name.
///
/// User-written identifiers never contain `$` or `.`, so this is the
/// identity function for them; it only does real work on the synthetic
/// slot names the pattern-match compiler invents (`"$"`, `"$._0"`, ...),
/// letting every `Identifier` in the tree -- hand-written or
/// compiler-generated -- go through one code path.
pub fn js_safe_name(name: &str) -> String {
    name.replace('$', "scrutinee").replace('.', "_")
}

pub fn ident_expr(name: &str) -> js::Expr {
    js::Expr::Ident(js::Ident::new(js_safe_name(name).into(), DUMMY_SP, SyntaxContext::empty()))
}

pub fn str_lit(value: &str) -> js::Expr {
    js::Expr::Lit(js::Lit::Str(js::Str { span: DUMMY_SP, value: value.into(), raw: None }))
}

pub fn num_lit(value: f64) -> js::Expr {
    js::Expr::Lit(js::Lit::Num(js::Number { span: DUMMY_SP, value, raw: None }))
}

pub fn bool_lit(value: bool) -> js::Expr {
    js::Expr::Lit(js::Lit::Bool(js::Bool { span: DUMMY_SP, value }))
}

pub fn member(obj: js::Expr, prop_name: &str) -> js::Expr {
    js::Expr::Member(js::MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(obj),
        prop: js::MemberProp::Ident(js::IdentName { span: DUMMY_SP, sym: prop_name.into() }),
    })
}

pub fn call(callee: js::Expr, args: Vec<js::Expr>) -> js::Expr {
    js::Expr::Call(js::CallExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        callee: js::Callee::Expr(Box::new(callee)),
        args: args.into_iter().map(|expr| js::ExprOrSpread { spread: None, expr: Box::new(expr) }).collect(),
        type_args: None,
    })
}

/// `const <name> = <init>;`
pub fn const_decl(name: &str, init: js::Expr) -> js::Stmt {
    js::Stmt::Decl(js::Decl::Var(Box::new(js::VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: js::VarDeclKind::Const,
        declare: false,
        decls: vec![js::VarDeclarator {
            span: DUMMY_SP,
            name: js::Pat::Ident(js::BindingIdent {
                id: js::Ident::new(js_safe_name(name).into(), DUMMY_SP, SyntaxContext::empty()),
                type_ann: None,
            }),
            init: Some(Box::new(init)),
            definite: false,
        }],
    })))
}

/// `(() => { <stmts> })()`, the host shape every multi-statement body
/// (`Do`, `If`, `CaseOf`) is wrapped in so it can be used in expression
/// position.
pub fn iife(stmts: Vec<js::Stmt>) -> js::Expr {
    let arrow = js::Expr::Arrow(js::ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: vec![],
        body: Box::new(js::BlockStmtOrExpr::BlockStmt(js::BlockStmt {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            stmts,
        })),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    });
    call(js::Expr::Paren(js::ParenExpr { span: DUMMY_SP, expr: Box::new(arrow) }), vec![])
}

pub fn return_stmt(expr: js::Expr) -> js::Stmt {
    js::Stmt::Return(js::ReturnStmt { span: DUMMY_SP, arg: Some(Box::new(expr)) })
}

pub fn throw_new_error(message: &str) -> js::Stmt {
    js::Stmt::Throw(js::ThrowStmt {
        span: DUMMY_SP,
        arg: Box::new(js::Expr::New(js::NewExpr {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            callee: Box::new(ident_expr("Error")),
            args: Some(vec![js::ExprOrSpread { spread: None, expr: Box::new(str_lit(message)) }]),
            type_args: None,
        })),
    })
}
