use std::fmt;

/// Kinds classify types the way types classify values.
///
/// `Star` is the kind of ordinary types; `Fun` is the kind of a type
/// constructor that still needs an argument of kind `arg` before it becomes
/// something of kind `ret`. Kind equality is purely structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Star,
    Fun(Box<Kind>, Box<Kind>),
}

impl Kind {
    pub fn fun(arg: Kind, ret: Kind) -> Self {
        Kind::Fun(Box::new(arg), Box::new(ret))
    }

    /// Builds `KFun(g_n, KFun(.., KFun(g_1, KStar)))` for a list of generic
    /// parameter kinds, right-folded so that the last generic is applied
    /// first -- the kind of a type constructor with `params.len()` type
    /// parameters.
    pub fn ctor_kind(params: &[Kind]) -> Self {
        params.iter().rev().cloned().fold(Kind::Star, |ret, arg| Kind::fun(arg, ret))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Star => write!(f, "*"),
            Kind::Fun(arg, ret) => write!(f, "({arg} -> {ret})"),
        }
    }
}
