//! Type inference for the uwu language: Algorithm J extended with kinds and
//! algebraic data types, a pattern-match exhaustiveness checker layered over
//! [`uwu_matcher`]'s decision trees, and the built-in prelude every
//! compilation unit starts from.

mod infer;
mod prelude;
mod result;
mod unify;

pub use infer::infer;
pub use prelude::seed_context;
pub use result::TypeError;
pub use unify::unify;

/// Type-checks a whole compilation unit against the built-in prelude,
/// folding the same way [`infer`] folds a `Block`: later top-level
/// statements see the bindings earlier ones installed.
///
/// A `NonExhaustiveMatch` doesn't abort the fold: the source language only
/// raises on a missing match arm at runtime, so checking continues past it
/// and it comes back as one entry of the returned `Vec` rather than an
/// `Err`, the same way every other statement's worth of checking continues
/// past it. Any other error is fatal and returned immediately.
pub fn infer_program(program: &uwu_ast::Program) -> Result<Vec<TypeError>, TypeError> {
    let gen = uwu_ast::VarGen::new();
    let mut ctx = seed_context(&gen)?;
    let mut s = uwu_ast::Subst::default();
    let mut warnings = Vec::new();
    for expr in &program.body {
        match infer(&gen, &s, &mut ctx, expr) {
            Ok((s1, _)) => s = s1,
            Err(err @ TypeError::NonExhaustiveMatch { .. }) => warnings.push(err),
            Err(err) => return Err(err),
        }
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uwu_ast::{Expr, NumLit, Subst, VarGen};

    #[test]
    fn literal_infers_its_primitive_type() {
        let gen = VarGen::new();
        let mut ctx = seed_context(&gen).expect("prelude must type-check");
        let expr = Expr::Num(NumLit { span: None, value: 42 });
        let (_, ty) = infer(&gen, &Subst::default(), &mut ctx, &expr).expect("literal must infer");
        assert_eq!(ty, uwu_ast::Type::simple_con("Num"));
    }

    #[test]
    fn unbound_identifier_is_reported() {
        let gen = VarGen::new();
        let mut ctx = seed_context(&gen).expect("prelude must type-check");
        let expr = Expr::Identifier(uwu_ast::Ident::new("nope"));
        let err = infer(&gen, &Subst::default(), &mut ctx, &expr).unwrap_err();
        assert!(matches!(err, TypeError::UnboundIdentifier { .. }));
    }

    #[test]
    fn program_folds_let_bindings_across_top_level_statements() {
        use uwu_ast::{Ident, Let, Program};

        let program = Program {
            body: vec![
                Expr::Let(Let {
                    span: None,
                    id: Ident::new("x"),
                    init: Box::new(Expr::Num(NumLit { span: None, value: 1 })),
                    hint: None,
                }),
                Expr::Identifier(Ident::new("x")),
            ],
        };
        let warnings =
            infer_program(&program).expect("bound identifier from an earlier statement must resolve");
        assert!(warnings.is_empty());
    }

    #[test]
    fn a_real_error_after_a_non_exhaustive_match_is_still_reported() {
        use uwu_ast::{Case, CaseOf, Ident, Pattern, Program, VariantCall};

        let non_exhaustive_match = Expr::CaseOf(CaseOf {
            span: None,
            scrutinee: Box::new(Expr::VariantCall(VariantCall {
                span: None,
                name: Ident::new("True"),
                args: vec![],
            })),
            cases: vec![Case {
                pattern: Pattern::MatchVariant(Ident::new("True"), vec![]),
                body: Box::new(Expr::Num(NumLit { span: None, value: 1 })),
            }],
        });
        let unify_fail = Expr::BinaryExpr(uwu_ast::BinaryExpr {
            span: None,
            op: "+".to_string(),
            left: Box::new(Expr::Num(NumLit { span: None, value: 1 })),
            right: Box::new(Expr::Identifier(Ident::new("True"))),
        });
        let program = Program { body: vec![non_exhaustive_match, unify_fail] };

        let err = infer_program(&program)
            .expect_err("a real type error past an earlier warning must still abort the unit");
        assert!(matches!(err, TypeError::UnifyFail { .. }));
    }
}
