use codespan::Span;

/// Implemented by every AST node that carries source information.
///
/// Mirrors the traversal-boilerplate pattern of bigger ASTs in this family,
/// kept to a single trait because this AST has no De Bruijn bookkeeping to
/// thread through.
pub trait HasSpan {
    fn span(&self) -> Option<Span>;
}

impl<T: HasSpan> HasSpan for Box<T> {
    fn span(&self) -> Option<Span> {
        (**self).span()
    }
}

impl<T: HasSpan> HasSpan for Option<T> {
    fn span(&self) -> Option<Span> {
        self.as_ref().and_then(HasSpan::span)
    }
}
