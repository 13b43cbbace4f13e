use uwu_ast::{apply, Context, Def, Scheme, Subst, Type, VarGen};

use crate::infer::hint::infer_hint;
use crate::infer::infer;
use crate::result::TypeError;
use crate::unify::unify_subst;

/// `def id<generics>(params): hint do body end`.
///
/// Generics and parameters are bound in a context cloned from the caller's
/// `Γ`; the final binding for `id` is generalized against the *outer*,
/// unextended `Γ` so the def's own type variables can be quantified.
pub fn infer_def(
    gen: &VarGen,
    s: &Subst,
    ctx: &mut Context,
    def: &Def,
) -> Result<(Subst, Type), TypeError> {
    let mut inner = ctx.clone();
    for g in &def.generics {
        inner.insert(g.name.clone(), Scheme::mono(gen.fresh_star()));
    }

    let (mut cur_s, t_hint) = match &def.hint {
        Some(h) => infer_hint(gen, s, &mut inner, h)?,
        None => (s.clone(), gen.fresh_star()),
    };

    let mut param_tys = Vec::with_capacity(def.params.len());
    for param in &def.params {
        let (s1, t1) = match &param.hint {
            Some(h) => infer_hint(gen, &cur_s, &mut inner, h)?,
            None => (cur_s.clone(), gen.fresh_star()),
        };
        cur_s = s1;
        inner.insert(param.id.name.clone(), Scheme::mono(apply(&cur_s, &t1)));
        param_tys.push(t1);
    }

    let fn_ty = Type::curry(param_tys, t_hint.clone());

    let (s_body, t_body) = infer(gen, &cur_s, &mut inner, &def.body)?;
    let s_final = unify_subst(&t_body, &t_hint, &s_body, def.span)?;

    let scheme = Scheme::from_subst(&s_final, ctx, &fn_ty);
    ctx.insert(def.id.name.clone(), scheme);

    Ok((s_final.clone(), apply(&s_final, &fn_ty)))
}
