use std::fmt;

use codespan::Span;
use derivative::Derivative;

use crate::traits::HasSpan;

/// A source identifier: a name together with the span it was written at.
///
/// Spans are excluded from `Eq`/`Hash` so that two occurrences of the same
/// name compare equal regardless of where they were written; this is what
/// lets the context use `Ident` as a lookup key.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Ident {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Option<Span>,
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident { span: None, name: name.into() }
    }

    pub fn with_span(name: impl Into<String>, span: Span) -> Self {
        Ident { span: Some(span), name: name.into() }
    }

    /// The name under which a variant's naked type constructor is looked up,
    /// as opposed to the constructor function which shares the plain name.
    pub fn ctor_key(&self) -> String {
        format!("${}", self.name)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl HasSpan for Ident {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name)
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::new(name)
    }
}
