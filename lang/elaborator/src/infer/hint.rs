use uwu_ast::{apply, instantiate, Context, Hint, Subst, Type, VarGen};

use crate::result::TypeError;
use crate::unify::unify_subst;

/// Resolves a textual type annotation: instantiate `Γ[name]`, fold the
/// hint's own arguments onto it via `TAp`, then unify the result against a
/// fresh variable (so every hint, like every other node, yields a `τ` that
/// can itself be threaded into the caller's substitution).
pub fn infer_hint(
    gen: &VarGen,
    s: &Subst,
    ctx: &mut Context,
    hint: &Hint,
) -> Result<(Subst, Type), TypeError> {
    let scheme = ctx
        .get(&hint.id.name)
        .ok_or_else(|| TypeError::unbound_identifier(hint.id.name.clone(), hint.span))?
        .clone();
    let base = instantiate(gen, &scheme);

    let mut cur_s = s.clone();
    let mut arg_tys = Vec::with_capacity(hint.args.len());
    for arg in &hint.args {
        let (s1, t1) = infer_hint(gen, &cur_s, ctx, arg)?;
        cur_s = s1;
        arg_tys.push(t1);
    }

    let applied = arg_tys.into_iter().fold(base, Type::ap);
    let fresh = gen.fresh_star();
    let s_final = unify_subst(&fresh, &applied, &cur_s, hint.span)?;
    Ok((s_final.clone(), apply(&s_final, &fresh)))
}
