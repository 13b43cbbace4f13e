mod case;
mod def;
mod hint;
mod variant;

pub use case::{infer_case_of, infer_case_tree};
pub use def::infer_def;
pub use hint::infer_hint;
pub use variant::{infer_enum_decl, infer_variant_call};

use uwu_ast::{apply, instantiate, Context, Expr, Subst, Type, VarGen};

use crate::result::TypeError;
use crate::unify::unify_subst;

/// Algorithm J, threading a running substitution through every node rather
/// than returning a constraint set to solve afterwards.
///
/// `ctx` is mutated in place by bindings that are meant to persist for later
/// siblings in the same block (`Let`, `Def`, `EnumDeclaration`); constructs
/// that introduce their own scope (`Block`, `Do`, a `Def`'s own body, an
/// `EnumDeclaration`'s generics, an `If`'s branches, a case tree's `yes` arm)
/// clone `ctx` first so those bindings don't leak back out.
pub fn infer(
    gen: &VarGen,
    s: &Subst,
    ctx: &mut Context,
    expr: &Expr,
) -> Result<(Subst, Type), TypeError> {
    match expr {
        Expr::Num(_) => Ok((s.clone(), Type::simple_con("Num"))),
        Expr::Float(_) => Ok((s.clone(), Type::simple_con("Float"))),
        Expr::Str(_) => Ok((s.clone(), Type::simple_con("Str"))),

        Expr::Identifier(id) => {
            let scheme = ctx
                .get(&id.name)
                .ok_or_else(|| TypeError::unbound_identifier(id.name.clone(), id.span))?;
            Ok((s.clone(), instantiate(gen, scheme)))
        }

        Expr::Let(let_expr) => {
            let (s1, t1) = infer(gen, s, ctx, &let_expr.init)?;
            let s2 = match &let_expr.hint {
                Some(h) => {
                    let (sh, th) = hint::infer_hint(gen, &s1, ctx, h)?;
                    unify_subst(&t1, &th, &sh, let_expr.span)?
                }
                None => s1,
            };
            let scheme = uwu_ast::Scheme::from_subst(&s2, ctx, &apply(&s2, &t1));
            ctx.insert(let_expr.id.name.clone(), scheme);
            Ok((s2.clone(), apply(&s2, &t1)))
        }

        Expr::Do(do_expr) => {
            let mut inner = ctx.clone();
            let (s1, t1) = infer_block(gen, s, &mut inner, &do_expr.block)?;
            match &do_expr.hint {
                Some(h) => {
                    let (sh, th) = hint::infer_hint(gen, &s1, &mut inner, h)?;
                    let s2 = unify_subst(&t1, &th, &sh, do_expr.span)?;
                    Ok((s2.clone(), apply(&s2, &th)))
                }
                None => Ok((s1, t1)),
            }
        }

        Expr::Block(block) => infer_block(gen, s, ctx, &block.exprs),

        Expr::If(if_expr) => {
            let (s1, t_test) = infer(gen, s, ctx, &if_expr.test)?;
            let s2 = unify_subst(&t_test, &Type::simple_con("Bool"), &s1, if_expr.span)?;

            let mut then_ctx = ctx.clone();
            let (s3, t_then) = infer(gen, &s2, &mut then_ctx, &if_expr.then)?;

            let (s4, t_result) = match &if_expr.or_else {
                Some(or_else) => {
                    let mut else_ctx = ctx.clone();
                    let (s5, t_else) = infer(gen, &s3, &mut else_ctx, or_else)?;
                    let s6 = unify_subst(&t_then, &t_else, &s5, if_expr.span)?;
                    (s6.clone(), apply(&s6, &t_then))
                }
                None => {
                    let s5 = unify_subst(&t_then, &Type::simple_con("Unit"), &s3, if_expr.span)?;
                    (s5.clone(), apply(&s5, &t_then))
                }
            };

            match &if_expr.hint {
                Some(h) => {
                    let (sh, th) = hint::infer_hint(gen, &s4, ctx, h)?;
                    let s_final = unify_subst(&t_result, &th, &sh, if_expr.span)?;
                    Ok((s_final.clone(), apply(&s_final, &th)))
                }
                None => Ok((s4, t_result)),
            }
        }

        Expr::UnaryExpr(un) => {
            let (s1, t_e) = infer(gen, s, ctx, &un.e)?;
            match un.op.as_str() {
                "-" | "+" => {
                    let s2 = unify_subst(&t_e, &Type::simple_con("Num"), &s1, un.span)?;
                    Ok((s2, Type::simple_con("Num")))
                }
                "not" => {
                    let s2 = unify_subst(&t_e, &Type::simple_con("Bool"), &s1, un.span)?;
                    Ok((s2, Type::simple_con("Bool")))
                }
                "!" => Ok((s1, Type::simple_con("Bool"))),
                other => Err(TypeError::compiler_invariant(
                    format!("unknown unary operator `{other}`"),
                    un.span,
                )),
            }
        }

        Expr::BinaryExpr(bin) => {
            let op_scheme = ctx
                .get(bin.op.as_str())
                .ok_or_else(|| TypeError::unbound_identifier(bin.op.clone(), bin.span))?;
            let t_op = instantiate(gen, op_scheme);

            let (s1, t_left) = infer(gen, s, ctx, &bin.left)?;
            let (s2, t_right) = infer(gen, &s1, ctx, &bin.right)?;

            let result = gen.fresh_star();
            let applied = Type::curry(vec![t_left, t_right], result.clone());
            let s3 = unify_subst(&t_op, &applied, &s2, bin.span)?;
            Ok((s3.clone(), apply(&s3, &result)))
        }

        Expr::Def(def) => def::infer_def(gen, s, ctx, def),

        Expr::Call(call) => {
            let (s1, t_callee) = infer(gen, s, ctx, &call.callee)?;

            let n = call.args.len();
            let mut arg_tys: Vec<Type> = vec![Type::simple_con("Unit"); n];
            let mut cur_s = s1;
            for i in (0..n).rev() {
                let (si, ti) = infer(gen, &cur_s, ctx, &call.args[i])?;
                cur_s = si;
                arg_tys[i] = ti;
            }

            let result = gen.fresh_star();
            let applied = Type::curry(arg_tys, result.clone());
            let s_final = unify_subst(&t_callee, &applied, &cur_s, call.span)?;
            Ok((s_final.clone(), apply(&s_final, &result)))
        }

        Expr::VariantCall(call) => variant::infer_variant_call(gen, s, ctx, call),

        Expr::EnumDeclaration(decl) => variant::infer_enum_decl(gen, s, ctx, decl),

        Expr::Array(array) => {
            let array_con = instantiate(
                gen,
                ctx.get("Array")
                    .ok_or_else(|| TypeError::unbound_identifier("Array", array.span))?,
            );
            let elem = gen.fresh_star();
            let mut cur_s = s.clone();
            for e in &array.args {
                let (s1, t1) = infer(gen, &cur_s, ctx, e)?;
                cur_s = unify_subst(&t1, &elem, &s1, array.span)?;
            }
            let result = Type::ap(array_con, elem);
            Ok((cur_s.clone(), apply(&cur_s, &result)))
        }

        Expr::CaseOf(case_of) => case::infer_case_of(
            gen,
            s,
            ctx,
            &case_of.scrutinee,
            &case_of.cases,
            case_of.span,
        ),

        Expr::External(_) => Ok((s.clone(), gen.fresh_star())),
    }
}

/// Folds a sequence of expressions through a shared, mutable `ctx`: later
/// siblings see the bindings earlier ones installed. Yields the last
/// expression's type, or `Unit` for an empty block.
fn infer_block(
    gen: &VarGen,
    s: &Subst,
    ctx: &mut Context,
    exprs: &[Expr],
) -> Result<(Subst, Type), TypeError> {
    let mut cur_s = s.clone();
    let mut result = Type::simple_con("Unit");
    for e in exprs {
        let (s1, t1) = infer(gen, &cur_s, ctx, e)?;
        cur_s = s1;
        result = t1;
    }
    Ok((cur_s, result))
}
