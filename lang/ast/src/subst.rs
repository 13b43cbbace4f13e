use fxhash::{FxHashMap, FxHashSet};

use crate::ty::Type;

/// A finite mapping from `TVar` id to the type it has been bound to.
///
/// Substitutions are plain values: `compose` builds a new map rather than
/// mutating either argument, and nothing holds on to a `Subst` after its
/// bindings have been folded into a `Scheme`.
pub type Subst = FxHashMap<u32, Type>;

/// Structural rewrite of `ty`, replacing every free `TVar` bound in `subst`.
pub fn apply(subst: &Subst, ty: &Type) -> Type {
    match ty {
        Type::TVar(id, kind) => subst.get(id).cloned().unwrap_or_else(|| Type::TVar(*id, kind.clone())),
        Type::TCon(_) => ty.clone(),
        Type::TAp(con, arg) => Type::ap(apply(subst, con), apply(subst, arg)),
    }
}

/// `s1 ∘ s2`: the substitution that first applies `s2`, then `s1`.
///
/// Concretely: push every binding of `s2` through `apply(s1, _)`, then union
/// the result with `s1`, with `s1` winning on key collisions.
pub fn compose(s1: &Subst, s2: &Subst) -> Subst {
    let mut result: Subst = s2.iter().map(|(id, ty)| (*id, apply(s1, ty))).collect();
    for (id, ty) in s1 {
        result.insert(*id, ty.clone());
    }
    result
}

/// The set of free (unbound) type variable ids occurring in `ty`.
pub fn ftv(ty: &Type) -> FxHashSet<u32> {
    match ty {
        Type::TVar(id, _) => {
            let mut set = FxHashSet::default();
            set.insert(*id);
            set
        }
        Type::TCon(_) => FxHashSet::default(),
        Type::TAp(con, arg) => {
            let mut set = ftv(con);
            set.extend(ftv(arg));
            set
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    fn tvar(id: u32) -> Type {
        Type::TVar(id, Kind::Star)
    }

    #[test]
    fn compose_matches_sequential_application() {
        let mut s1 = Subst::default();
        s1.insert(1, Type::simple_con("Num"));
        let mut s2 = Subst::default();
        s2.insert(2, tvar(1));

        let composed = compose(&s1, &s2);
        let direct = apply(&s1, &apply(&s2, &tvar(2)));
        assert_eq!(apply(&composed, &tvar(2)), direct);
    }

    #[test]
    fn apply_is_idempotent_on_idempotent_substitutions() {
        let mut s = Subst::default();
        s.insert(1, Type::simple_con("Num"));
        let once = apply(&s, &tvar(1));
        let twice = apply(&s, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn unify_of_identical_type_has_empty_ftv_gap() {
        let ty = Type::fun(tvar(1), Type::simple_con("Str"));
        let free = ftv(&ty);
        assert!(free.contains(&1));
        assert_eq!(free.len(), 1);
    }
}
