use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::kind::Kind;

/// Name of the built-in type constructor that encodes function types.
/// `a -> b` is represented as `TAp(TAp(Callable, a), b)`.
pub const CALLABLE: &str = "Callable";

/// A type, in the sense of the Hindley-Milner type universe extended with
/// higher-kinded constructors.
///
/// `TVar` identities are handed out by [`VarGen`] and are never reused once
/// bound by a substitution -- there is no arena or interning here, each
/// variable is a plain, freely clonable integer plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A unification variable, carrying the kind it was minted at.
    TVar(u32, Kind),
    /// A named type constructor. `alts` lists the variant constructor names
    /// for sum types (built by an `enum` declaration); it is empty for every
    /// other constructor, including the primitives.
    TCon(TCon),
    /// Left-associative application of a type constructor to an argument.
    TAp(Box<Type>, Box<Type>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TCon {
    pub name: String,
    pub kind: Kind,
    pub alts: Vec<String>,
}

impl Type {
    pub fn con(name: impl Into<String>, kind: Kind, alts: Vec<String>) -> Self {
        Type::TCon(TCon { name: name.into(), kind, alts })
    }

    pub fn simple_con(name: impl Into<String>) -> Self {
        Type::con(name, Kind::Star, vec![])
    }

    pub fn ap(con: Type, arg: Type) -> Self {
        Type::TAp(Box::new(con), Box::new(arg))
    }

    /// `TAp(TAp(Callable, arg), ret)`, i.e. `arg -> ret`.
    pub fn fun(arg: Type, ret: Type) -> Self {
        let callable = Type::con(
            CALLABLE,
            Kind::fun(Kind::Star, Kind::fun(Kind::Star, Kind::Star)),
            vec![],
        );
        Type::ap(Type::ap(callable, arg), ret)
    }

    /// Right-folds `params -> .. -> ret`. An empty parameter list yields
    /// `Unit -> ret`, matching the zero-arity `Def` rule in the inferencer.
    pub fn curry(params: Vec<Type>, ret: Type) -> Self {
        if params.is_empty() {
            return Type::fun(Type::simple_con("Unit"), ret);
        }
        params.into_iter().rev().fold(ret, |acc, param| Type::fun(param, acc))
    }

    /// Inverse of [`Type::curry`]: peels off `arity` arrow parameters,
    /// returning them in source (left-to-right) order plus the tail type.
    pub fn uncurry(&self, arity: usize) -> Option<(Vec<Type>, Type)> {
        let mut params = Vec::with_capacity(arity);
        let mut cur = self.clone();
        for _ in 0..arity {
            match cur {
                Type::TAp(con, ret) => match *con {
                    Type::TAp(callable, arg) if is_callable(&callable) => {
                        params.push(*arg);
                        cur = *ret;
                    }
                    _ => return None,
                },
                _ => return None,
            }
        }
        Some((params, cur))
    }

    pub fn is_tvar(&self) -> bool {
        matches!(self, Type::TVar(..))
    }

    /// The naked type constructor at the head of a (possibly applied) type,
    /// e.g. `Array<Num>` and `Array` both yield the `Array` TCon.
    pub fn head_con(&self) -> Option<&TCon> {
        match self {
            Type::TCon(c) => Some(c),
            Type::TAp(con, _) => con.head_con(),
            Type::TVar(..) => None,
        }
    }
}

fn is_callable(ty: &Type) -> bool {
    matches!(ty, Type::TCon(c) if c.name == CALLABLE)
}

/// Finds the kind a particular `TVar` id was minted at by scanning `ty`.
/// Used by `instantiate` to mint fresh replacements at the right kind.
pub fn kind_of_var(ty: &Type, id: u32) -> Option<Kind> {
    match ty {
        Type::TVar(found, kind) if *found == id => Some(kind.clone()),
        Type::TVar(..) | Type::TCon(_) => None,
        Type::TAp(con, arg) => kind_of_var(con, id).or_else(|| kind_of_var(arg, id)),
    }
}

/// The kind of a well-formed type. Every [`Type::TAp`] in a well-formed tree
/// satisfies `kind(con) = KFun(kind(arg), k)`; this function assumes that
/// invariant rather than re-checking it; use [`kind_checked`] at the points
/// where a caller-supplied type first enters the system.
pub fn kind_of(ty: &Type) -> Kind {
    match ty {
        Type::TVar(_, k) => k.clone(),
        Type::TCon(c) => c.kind.clone(),
        Type::TAp(con, _) => match kind_of(con) {
            Kind::Fun(_, ret) => *ret,
            Kind::Star => Kind::Star, // unreachable for a well-formed AST
        },
    }
}

/// A monotonically increasing source of fresh `TVar` ids.
///
/// A `VarGen` is threaded explicitly through a compilation unit rather than
/// drawing on process-wide mutable state, so that two independent
/// compilations (or two test cases) never observe interleaved numbering.
#[derive(Debug, Default)]
pub struct VarGen {
    next: AtomicU32,
}

impl VarGen {
    pub fn new() -> Self {
        VarGen { next: AtomicU32::new(1) }
    }

    pub fn fresh(&self, kind: Kind) -> Type {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        Type::TVar(id, kind)
    }

    pub fn fresh_star(&self) -> Type {
        self.fresh(Kind::Star)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::TVar(id, _) => write!(f, "t{id}"),
            Type::TCon(c) => write!(f, "{}", c.name),
            Type::TAp(con, arg) => write!(f, "{con}<{arg}>"),
        }
    }
}
