use codespan::Span;
use uwu_ast::{apply, compose, ftv, kind_of, Subst, Type};

use crate::result::TypeError;

/// First-order unification with an occurs check and a kind check.
///
/// `span` is attached to any error raised; callers pass the span of the
/// expression that triggered this particular unification, not of `a`/`b`
/// individually, matching how the inferencer reports unification failures at
/// the call site rather than at the type's point of origin.
pub fn unify(a: &Type, b: &Type, span: Option<Span>) -> Result<Subst, TypeError> {
    match (a, b) {
        (Type::TCon(c1), Type::TCon(c2)) if c1 == c2 => Ok(Subst::default()),
        (Type::TAp(c0, a0), Type::TAp(c1, a1)) => {
            let s0 = unify(c0, c1, span)?;
            let s1 = unify(&apply(&s0, a0), &apply(&s0, a1), span)?;
            Ok(compose(&s1, &s0))
        }
        (Type::TVar(u, kind), other) | (other, Type::TVar(u, kind)) => {
            if *kind != kind_of(other) {
                return Err(TypeError::kind_mismatch(a, b, span));
            }
            var_bind(*u, other, span)
        }
        _ => Err(TypeError::unify_fail(a, b, span)),
    }
}

fn var_bind(u: u32, t: &Type, span: Option<Span>) -> Result<Subst, TypeError> {
    if let Type::TVar(id, _) = t {
        if *id == u {
            return Ok(Subst::default());
        }
    }
    if ftv(t).contains(&u) {
        return Err(TypeError::occurs_check(u, t, span));
    }
    let mut s = Subst::default();
    s.insert(u, t.clone());
    Ok(s)
}

/// Threads a running substitution through a unification step: unifies
/// `apply(s,a)` with `apply(s,b)` and composes the result onto `s`.
pub fn unify_subst(a: &Type, b: &Type, s: &Subst, span: Option<Span>) -> Result<Subst, TypeError> {
    let step = unify(&apply(s, a), &apply(s, b), span)?;
    Ok(compose(&step, s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uwu_ast::Kind;

    #[test]
    fn identical_type_unifies_to_empty_substitution() {
        let ty = Type::fun(Type::simple_con("Num"), Type::simple_con("Str"));
        assert_eq!(unify(&ty, &ty, None).unwrap(), Subst::default());
    }

    #[test]
    fn unify_is_sound() {
        let var = Type::TVar(1, Kind::Star);
        let con = Type::simple_con("Num");
        let s = unify(&var, &con, None).unwrap();
        assert_eq!(apply(&s, &var), apply(&s, &con));
    }

    #[test]
    fn self_referential_binding_fails_occurs_check() {
        let var = Type::TVar(1, Kind::Star);
        let array = Type::ap(Type::simple_con("Array"), var.clone());
        assert!(matches!(unify(&var, &array, None), Err(TypeError::OccursCheck { .. })));
    }

    #[test]
    fn mismatched_constructors_fail() {
        let a = Type::simple_con("Num");
        let b = Type::simple_con("Str");
        assert!(matches!(unify(&a, &b, None), Err(TypeError::UnifyFail { .. })));
    }
}
