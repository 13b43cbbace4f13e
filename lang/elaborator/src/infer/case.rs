use codespan::Span;
use fxhash::FxHashMap;
use uwu_ast::{apply, instantiate, Context, Scheme, Subst, Type, VarGen};
use uwu_matcher::{gen_match, Tree};

use crate::infer::infer;
use crate::result::TypeError;
use crate::unify::unify_subst;

/// The constructors of a slot's sum type not yet ruled out along the
/// current path; a [`Tree::MissingLeaf`] under a slot whose list is still
/// non-empty signals a non-exhaustive match.
type RemainingAlts = FxHashMap<String, Vec<String>>;

/// `case scrutinee of cases end`. Binds the scrutinee under the reserved
/// slot `"$"`, compiles `cases` to a decision tree, then types that tree.
pub fn infer_case_of(
    gen: &VarGen,
    s: &Subst,
    ctx: &mut Context,
    scrutinee: &uwu_ast::Expr,
    cases: &[uwu_ast::Case],
    span: Option<Span>,
) -> Result<(Subst, Type), TypeError> {
    let (s1, te) = infer(gen, s, ctx, scrutinee)?;
    let mut case_ctx = ctx.clone();
    let scheme = Scheme::from_subst(&s1, ctx, &te);
    case_ctx.insert(uwu_matcher::ROOT_SLOT.to_string(), scheme);

    let tree = gen_match(cases);
    let mut remaining = RemainingAlts::default();
    infer_case_tree(gen, &s1, &mut case_ctx, &tree, &mut remaining, span)
}

/// Types a compiled decision tree (§4.4.4 of the pattern-match compiler):
/// each `Node` narrows `remaining_alts` for its slot, unifies the wrapping
/// constructor's type against the sub-slots it introduces, and unifies both
/// arms against one common result type.
pub fn infer_case_tree(
    gen: &VarGen,
    s: &Subst,
    ctx: &mut Context,
    tree: &Tree,
    remaining_alts: &mut RemainingAlts,
    span: Option<Span>,
) -> Result<(Subst, Type), TypeError> {
    match tree {
        Tree::MissingLeaf => {
            if remaining_alts.values().any(|alts| !alts.is_empty()) {
                let missing: Vec<String> = remaining_alts.values().flatten().cloned().collect();
                Err(TypeError::non_exhaustive_match(missing, span))
            } else {
                Ok((s.clone(), gen.fresh_star()))
            }
        }
        Tree::Leaf(body) => infer(gen, s, ctx, body),
        Tree::Node { var, pattern_name, vars, yes, no } => {
            let tv = instantiate(
                gen,
                ctx.get(var).ok_or_else(|| TypeError::unbound_identifier(var.clone(), span))?,
            );
            let tctor = instantiate(
                gen,
                ctx.get(&pattern_name.name)
                    .ok_or_else(|| TypeError::unbound_identifier(pattern_name.name.clone(), span))?,
            );

            remaining_alts
                .entry(var.clone())
                .or_insert_with(|| tv.head_con().map(|c| c.alts.clone()).unwrap_or_default());
            if let Some(alts) = remaining_alts.get_mut(var) {
                alts.retain(|a| a != &pattern_name.name);
            }

            let sub_tvars: Vec<Type> = vars.iter().map(|_| gen.fresh_star()).collect();
            let naked_key = pattern_name.ctor_key();
            let tctor_naked = instantiate(
                gen,
                ctx.get(&naked_key).ok_or_else(|| TypeError::unbound_identifier(naked_key, span))?,
            );
            let applied = sub_tvars.iter().cloned().fold(tctor_naked, Type::ap);
            let s1 = unify_subst(&tctor, &Type::fun(applied, tv.clone()), s, span)?;

            let mut yes_ctx = ctx.clone();
            let mut yes_alts = remaining_alts.clone();
            for (slot, sub_tvar) in vars.iter().zip(&sub_tvars) {
                let scheme = Scheme::from_subst(&s1, ctx, sub_tvar);
                yes_ctx.insert(slot.clone(), scheme);
                yes_alts.entry(slot.clone()).or_insert_with(|| {
                    apply(&s1, sub_tvar).head_con().map(|c| c.alts.clone()).unwrap_or_default()
                });
            }

            let (s_yes, t_yes) = infer_case_tree(gen, &s1, &mut yes_ctx, yes, &mut yes_alts, span)?;
            let (s_no, t_no) = infer_case_tree(gen, &s_yes, ctx, no, remaining_alts, span)?;

            let result = gen.fresh_star();
            let s_final = unify_subst(&t_yes, &result, &s_no, span)?;
            let s_final = unify_subst(&t_no, &result, &s_final, span)?;
            Ok((s_final.clone(), apply(&s_final, &result)))
        }
    }
}
