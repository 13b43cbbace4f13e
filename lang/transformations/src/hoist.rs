use uwu_ast::{
    ArrayExpr, BinaryExpr, Block, Call, Case, CaseOf, Do, Expr, Ident, If, Let, Program, UnaryExpr,
    VariantCall,
};

/// Rewrites a whole compilation unit so that `Let` and `Def` never appear
/// nested inside a sub-expression position, as required before code
/// generation can emit them as host `const`/function declarations.
pub fn hoist_program(program: Program) -> Program {
    Program { body: hoist_block(program.body) }
}

/// Processes a sequence of statements (a block or program body): each
/// element is hoisted in "value position" first, its collected bindings are
/// inlined immediately before it, and the element's own replacement is kept
/// only if it isn't a bare identifier standing in for a binding that was
/// just inlined -- unless it's the block's final element, whose value the
/// whole block must still yield.
fn hoist_block(exprs: Vec<Expr>) -> Vec<Expr> {
    let n = exprs.len();
    let mut out = Vec::with_capacity(n);
    for (i, expr) in exprs.into_iter().enumerate() {
        let (hoisted, replaced) = hoist_value(expr);
        out.extend(hoisted);
        let is_last = i + 1 == n;
        if is_last || !matches!(replaced, Expr::Identifier(_)) {
            out.push(replaced);
        }
    }
    out
}

/// Hoists `expr` in value position: recursively hoists its children first
/// (bubbling their own hoisted bindings up into this call's list, except
/// across a `Block`/`Do` boundary, which resolves its statements' hoisting
/// locally and never bubbles anything past itself), then, if the rebuilt
/// node is itself a `Let` or `Def`, moves it into the hoisted list and
/// returns an `Identifier` referring to its bound name in its place.
fn hoist_value(expr: Expr) -> (Vec<Expr>, Expr) {
    let mut hoisted = Vec::new();
    let rebuilt = match expr {
        Expr::Num(_) | Expr::Float(_) | Expr::Str(_) | Expr::Identifier(_) | Expr::External(_) => {
            expr
        }

        Expr::Let(mut let_expr) => {
            let (h, init) = hoist_value(*let_expr.init);
            hoisted.extend(h);
            let_expr.init = Box::new(init);
            Expr::Let(let_expr)
        }

        Expr::Do(do_expr) => Expr::Do(Do { block: hoist_block(do_expr.block), ..do_expr }),

        Expr::Block(block) => Expr::Block(Block { exprs: hoist_block(block.exprs) }),

        Expr::If(if_expr) => {
            let If { span, test, then, or_else, hint } = if_expr;
            let (h, test) = hoist_value(*test);
            hoisted.extend(h);
            let (h, then) = hoist_value(*then);
            hoisted.extend(h);
            let or_else = or_else.map(|e| {
                let (h, e) = hoist_value(*e);
                hoisted.extend(h);
                Box::new(e)
            });
            Expr::If(If { span, test: Box::new(test), then: Box::new(then), or_else, hint })
        }

        Expr::UnaryExpr(un) => {
            let (h, e) = hoist_value(*un.e);
            hoisted.extend(h);
            Expr::UnaryExpr(UnaryExpr { e: Box::new(e), ..un })
        }

        Expr::BinaryExpr(bin) => {
            let (h, left) = hoist_value(*bin.left);
            hoisted.extend(h);
            let (h, right) = hoist_value(*bin.right);
            hoisted.extend(h);
            Expr::BinaryExpr(BinaryExpr { left: Box::new(left), right: Box::new(right), ..bin })
        }

        Expr::Def(mut def) => {
            let (h, body) = hoist_value(*def.body);
            hoisted.extend(h);
            def.body = Box::new(body);
            Expr::Def(def)
        }

        Expr::Call(call) => {
            let (h, callee) = hoist_value(*call.callee);
            hoisted.extend(h);
            let args = hoist_args(call.args, &mut hoisted);
            Expr::Call(Call { callee: Box::new(callee), args, ..call })
        }

        Expr::VariantCall(call) => {
            let args = hoist_args(call.args, &mut hoisted);
            Expr::VariantCall(VariantCall { args, ..call })
        }

        Expr::EnumDeclaration(decl) => Expr::EnumDeclaration(decl),

        Expr::Array(array) => {
            let args = hoist_args(array.args, &mut hoisted);
            Expr::Array(ArrayExpr { args, ..array })
        }

        Expr::CaseOf(case_of) => {
            let (h, scrutinee) = hoist_value(*case_of.scrutinee);
            hoisted.extend(h);
            let cases = case_of
                .cases
                .into_iter()
                .map(|case| {
                    let (h, body) = hoist_value(*case.body);
                    debug_assert!(h.is_empty(), "case arm body must be a Block, not a bare value");
                    // `uwu_matcher::subst_var_eqs` only rewrites a clause's
                    // body into a `Block` when the pattern binds at least one
                    // name; a nullary-variant arm (e.g. `None() do .. end`)
                    // reaches here as a bare `Do`. Codegen requires every
                    // case arm to be a `Block`, so wrap it uniformly here.
                    let body = match body {
                        Expr::Block(_) => body,
                        other => Expr::Block(Block { exprs: vec![other] }),
                    };
                    Case { pattern: case.pattern, body: Box::new(body) }
                })
                .collect();
            Expr::CaseOf(CaseOf { scrutinee: Box::new(scrutinee), cases, ..case_of })
        }
    };

    match rebuilt {
        Expr::Let(let_expr) => {
            let id = let_expr.id.clone();
            hoisted.push(Expr::Let(let_expr));
            (hoisted, Expr::Identifier(id))
        }
        Expr::Def(def) => {
            let id = def.id.clone();
            hoisted.push(Expr::Def(def));
            (hoisted, Expr::Identifier(id))
        }
        other => (hoisted, other),
    }
}

/// Hoists a right-to-left-inferred argument list. Hoisting itself has no
/// evaluation-order requirement of its own (the typed AST it runs over has
/// already been checked); bindings are collected in source (left-to-right)
/// order so the emitted `const`s read the way the source was written.
fn hoist_args(args: Vec<Expr>, hoisted: &mut Vec<Expr>) -> Vec<Expr> {
    args.into_iter()
        .map(|arg| {
            let (h, arg) = hoist_value(arg);
            hoisted.extend(h);
            arg
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uwu_ast::{Def, NumLit, Param};

    fn num(v: i64) -> Expr {
        Expr::Num(NumLit { span: None, value: v })
    }

    fn ident(name: &str) -> Expr {
        Expr::Identifier(Ident::new(name))
    }

    #[test]
    fn bare_let_statement_is_left_in_place() {
        let program = Program {
            body: vec![
                Expr::Let(Let { span: None, id: Ident::new("x"), init: Box::new(num(1)), hint: None }),
                ident("x"),
            ],
        };
        let hoisted = hoist_program(program);
        assert_eq!(hoisted.body.len(), 2);
        assert!(matches!(hoisted.body[0], Expr::Let(_)));
        assert!(matches!(hoisted.body[1], Expr::Identifier(_)));
    }

    #[test]
    fn let_nested_in_call_argument_is_lifted_before_the_call() {
        let nested_let =
            Expr::Let(Let { span: None, id: Ident::new("y"), init: Box::new(num(2)), hint: None });
        let call = Expr::Call(Call { span: None, callee: Box::new(ident("f")), args: vec![nested_let] });
        let program = Program { body: vec![call] };
        let hoisted = hoist_program(program);

        assert_eq!(hoisted.body.len(), 2);
        assert!(matches!(hoisted.body[0], Expr::Let(_)));
        match &hoisted.body[1] {
            Expr::Call(call) => assert!(matches!(call.args[0], Expr::Identifier(_))),
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn trailing_def_in_a_block_is_kept_as_the_blocks_final_value() {
        let inner_def = Expr::Def(Def {
            span: None,
            id: Ident::new("thunk"),
            params: vec![],
            body: Box::new(Expr::Block(Block { exprs: vec![ident("arg")] })),
            hint: None,
            generics: vec![],
        });
        let outer = Def {
            span: None,
            id: Ident::new("partial"),
            params: vec![Param { id: Ident::new("arg"), hint: None }],
            body: Box::new(Expr::Block(Block { exprs: vec![inner_def] })),
            hint: None,
            generics: vec![],
        };
        let program = Program { body: vec![Expr::Def(outer)] };
        let hoisted = hoist_program(program);

        match &hoisted.body[0] {
            Expr::Def(def) => match def.body.as_ref() {
                Expr::Block(block) => {
                    assert_eq!(block.exprs.len(), 2);
                    assert!(matches!(block.exprs[0], Expr::Def(_)));
                    assert!(matches!(block.exprs[1], Expr::Identifier(_)));
                }
                other => panic!("expected Block, got {other:?}"),
            },
            other => panic!("expected Def, got {other:?}"),
        }
    }

    #[test]
    fn non_exhaustive_bindings_preserve_source_order() {
        let a = Expr::Let(Let { span: None, id: Ident::new("a"), init: Box::new(num(1)), hint: None });
        let b = Expr::Let(Let { span: None, id: Ident::new("b"), init: Box::new(num(2)), hint: None });
        let bin = Expr::BinaryExpr(BinaryExpr {
            span: None,
            op: "+".to_string(),
            left: Box::new(a),
            right: Box::new(b),
        });
        let program = Program { body: vec![bin] };
        let hoisted = hoist_program(program);

        let names: Vec<&str> = hoisted.body[..2]
            .iter()
            .map(|e| match e {
                Expr::Let(l) => l.id.name.as_str(),
                other => panic!("expected Let, got {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
