use fxhash::{FxHashMap, FxHashSet};

use crate::subst::{apply, ftv, Subst};
use crate::ty::{Type, VarGen};

/// A type together with the set of variable ids universally quantified over
/// it. `vars` must be a subset of the free variables of `ty`; this is the
/// concrete representation of polymorphism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub vars: Vec<u32>,
    pub ty: Type,
}

impl Scheme {
    /// A scheme with no quantified variables, i.e. a monomorphic type.
    pub fn mono(ty: Type) -> Self {
        Scheme { vars: vec![], ty }
    }

    /// Generalizes `ty` against `ctx`: quantifies every variable free in
    /// `apply(subst, ty)` but not free in `apply_ctx(subst, ctx)`.
    ///
    /// This is the only place quantifiers are introduced -- at `let`
    /// bindings, `def` bindings, variant/type-constructor bindings, and the
    /// scrutinee binding `"$"` inside a `case .. of`.
    pub fn from_subst(subst: &Subst, ctx: &Context, ty: &Type) -> Self {
        let ty = apply(subst, ty);
        let mut free = ftv(&ty);
        let ctx_free = ftv_ctx(&apply_ctx(subst, ctx));
        for v in &ctx_free {
            free.remove(v);
        }
        let mut vars: Vec<u32> = free.into_iter().collect();
        vars.sort_unstable();
        Scheme { vars, ty }
    }
}

/// Removes the quantified variables from `subst` before applying it, so a
/// substitution can never capture a scheme's bound variables.
pub fn apply_scheme(subst: &Subst, scheme: &Scheme) -> Scheme {
    let mut narrowed = subst.clone();
    for v in &scheme.vars {
        narrowed.remove(v);
    }
    Scheme { vars: scheme.vars.clone(), ty: apply(&narrowed, &scheme.ty) }
}

pub fn ftv_scheme(scheme: &Scheme) -> FxHashSet<u32> {
    let mut free = ftv(&scheme.ty);
    for v in &scheme.vars {
        free.remove(v);
    }
    free
}

/// Replaces every quantified variable in `scheme` with a fresh `TVar` of the
/// same kind.
pub fn instantiate(gen: &VarGen, scheme: &Scheme) -> Type {
    let subst: Subst = scheme
        .vars
        .iter()
        .map(|id| {
            let kind = crate::ty::kind_of_var(&scheme.ty, *id).unwrap_or(crate::kind::Kind::Star);
            (*id, gen.fresh(kind))
        })
        .collect();
    apply(&subst, &scheme.ty)
}

/// A mapping from identifier to scheme. Term-level and type-level
/// identifiers share this one namespace, keyed by plain string; see
/// [`crate::ident::Ident::ctor_key`] for the `"$" + name` convention used to
/// look up a variant constructor's naked `TCon` independent of the wrapping
/// function type it is also bound under.
pub type Context = FxHashMap<String, Scheme>;

pub fn apply_ctx(subst: &Subst, ctx: &Context) -> Context {
    ctx.iter().map(|(name, scheme)| (name.clone(), apply_scheme(subst, scheme))).collect()
}

pub fn ftv_ctx(ctx: &Context) -> FxHashSet<u32> {
    let mut free = FxHashSet::default();
    for scheme in ctx.values() {
        free.extend(ftv_scheme(scheme));
    }
    free
}
