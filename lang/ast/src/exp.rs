use codespan::Span;

use crate::ident::Ident;
use crate::traits::HasSpan;

/// A whole compilation unit: a flat list of top-level expressions,
/// declarations and definitions, in source order.
#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<Expr>,
}

/// The expression tree. Node payloads live in their own structs so that
/// `match`es on `Expr` read as a list of named cases rather than a wall of
/// tuple fields.
#[derive(Debug, Clone)]
pub enum Expr {
    Num(NumLit),
    Float(FloatLit),
    Str(StrLit),
    Identifier(Ident),
    Let(Let),
    Do(Do),
    Block(Block),
    If(If),
    UnaryExpr(UnaryExpr),
    BinaryExpr(BinaryExpr),
    Def(Def),
    Call(Call),
    VariantCall(VariantCall),
    EnumDeclaration(EnumDeclaration),
    Array(ArrayExpr),
    CaseOf(CaseOf),
    External(External),
}

#[derive(Debug, Clone)]
pub struct NumLit {
    pub span: Option<Span>,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub struct FloatLit {
    pub span: Option<Span>,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct StrLit {
    pub span: Option<Span>,
    pub value: String,
}

/// `let id = init` with an optional `: hint` type annotation.
#[derive(Debug, Clone)]
pub struct Let {
    pub span: Option<Span>,
    pub id: Ident,
    pub init: Box<Expr>,
    pub hint: Option<Hint>,
}

/// A scoped block introducing its own context frame, written `do .. end` in
/// source, with an optional leading `: hint` type annotation (e.g.
/// `do: Str 1 end`).
#[derive(Debug, Clone)]
pub struct Do {
    pub span: Option<Span>,
    pub block: Vec<Expr>,
    pub hint: Option<Hint>,
}

/// An ordered sequence of expressions whose value is its last element, or
/// `Unit` if empty. Used for `def`/`if` bodies, which fold the same way a
/// top-level `Program` does but without introducing a new context frame of
/// their own (the caller already cloned `Γ`).
#[derive(Debug, Clone)]
pub struct Block {
    pub exprs: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct If {
    pub span: Option<Span>,
    pub test: Box<Expr>,
    pub then: Box<Expr>,
    pub or_else: Option<Box<Expr>>,
    pub hint: Option<Hint>,
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub span: Option<Span>,
    pub op: String,
    pub e: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub span: Option<Span>,
    pub op: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub id: Ident,
    pub hint: Option<Hint>,
}

#[derive(Debug, Clone)]
pub struct Def {
    pub span: Option<Span>,
    pub id: Ident,
    pub params: Vec<Param>,
    pub body: Box<Expr>,
    pub hint: Option<Hint>,
    pub generics: Vec<Ident>,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub span: Option<Span>,
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

/// Application of a variant constructor. `name` denotes both the wrapping
/// constructor function (bound under `name`) and its underlying naked
/// `TCon` (bound under `"$" + name`, see [`Ident::ctor_key`]).
#[derive(Debug, Clone)]
pub struct VariantCall {
    pub span: Option<Span>,
    pub name: Ident,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct VariantDecl {
    pub id: Ident,
    pub fields: Vec<Hint>,
}

#[derive(Debug, Clone)]
pub struct EnumDeclaration {
    pub span: Option<Span>,
    pub id: Ident,
    pub generics: Vec<Ident>,
    pub variants: Vec<VariantDecl>,
}

#[derive(Debug, Clone)]
pub struct ArrayExpr {
    pub span: Option<Span>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct CaseOf {
    pub span: Option<Span>,
    pub scrutinee: Box<Expr>,
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub pattern: Pattern,
    pub body: Box<Expr>,
}

/// A pattern matched against one scrutinee slot.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Binds the slot's value to `name`; always matches.
    MatchAs(Ident),
    /// Matches when the slot holds a value built by the `name` constructor,
    /// recursively matching its fields against `sub_patterns`.
    MatchVariant(Ident, Vec<Pattern>),
}

impl Pattern {
    pub fn ctor_name(&self) -> Option<&Ident> {
        match self {
            Pattern::MatchVariant(name, _) => Some(name),
            Pattern::MatchAs(_) => None,
        }
    }
}

/// A textual type annotation: a named type (constructor or generic
/// variable) applied to zero or more argument hints, e.g. `Array<Num>`.
#[derive(Debug, Clone)]
pub struct Hint {
    pub span: Option<Span>,
    pub id: Ident,
    pub args: Vec<Hint>,
}

/// An escape hatch carrying a verbatim fragment of host-language source.
/// Its type is an unconstrained fresh variable.
#[derive(Debug, Clone)]
pub struct External {
    pub span: Option<Span>,
    pub verbatim: String,
}

impl HasSpan for Expr {
    fn span(&self) -> Option<Span> {
        match self {
            Expr::Num(e) => e.span,
            Expr::Float(e) => e.span,
            Expr::Str(e) => e.span,
            Expr::Identifier(e) => e.span,
            Expr::Let(e) => e.span,
            Expr::Do(e) => e.span,
            Expr::Block(_) => None,
            Expr::If(e) => e.span,
            Expr::UnaryExpr(e) => e.span,
            Expr::BinaryExpr(e) => e.span,
            Expr::Def(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::VariantCall(e) => e.span,
            Expr::EnumDeclaration(e) => e.span,
            Expr::Array(e) => e.span,
            Expr::CaseOf(e) => e.span,
            Expr::External(e) => e.span,
        }
    }
}
