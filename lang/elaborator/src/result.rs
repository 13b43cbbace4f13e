use codespan::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use uwu_ast::Type;

/// Converts the external `codespan` crate's `Span` to a `miette::SourceSpan`.
///
/// Not `uwu_miette_util::ToMiette`: that trait is implemented for
/// `uwu_miette_util`'s own bundled `codespan` submodule type, a distinct type
/// from the external `codespan::Span` this crate's AST actually carries.
pub(crate) trait ToMiette {
    fn to_miette(self) -> Option<SourceSpan>;
}

impl ToMiette for Option<Span> {
    fn to_miette(self) -> Option<SourceSpan> {
        self.map(|span| {
            SourceSpan::new(span.start.to_usize().into(), (span.end - span.start).to_usize())
        })
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum TypeError {
    #[error("cannot unify `{a}` with `{b}`")]
    #[diagnostic(code("T-001"))]
    UnifyFail {
        a: String,
        b: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("kind mismatch: `{a}` has kind `{a_kind}`, but `{b}` has kind `{b_kind}`")]
    #[diagnostic(code("T-002"))]
    KindMismatch {
        a: String,
        a_kind: String,
        b: String,
        b_kind: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("occurs check failed: `t{var}` occurs in `{ty}`")]
    #[diagnostic(code("T-003"))]
    OccursCheck {
        var: u32,
        ty: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("unbound identifier `{name}`")]
    #[diagnostic(code("T-004"))]
    UnboundIdentifier {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("non-exhaustive pattern match, missing: {}", .remaining_alts.join(", "))]
    #[diagnostic(code("T-005"), severity(Warning))]
    NonExhaustiveMatch {
        remaining_alts: Vec<String>,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("an unexpected internal error occurred: {msg}")]
    #[diagnostic(code("T-XXX"))]
    /// Should not occur; indicates an invariant of the inferencer was
    /// violated (e.g. a constructor missing from its own enum's alts).
    CompilerInvariant {
        msg: String,
        #[label]
        span: Option<SourceSpan>,
    },
}

impl TypeError {
    pub fn unify_fail(a: &Type, b: &Type, span: Option<Span>) -> Self {
        TypeError::UnifyFail { a: a.to_string(), b: b.to_string(), span: span.to_miette() }
    }

    pub fn kind_mismatch(a: &Type, b: &Type, span: Option<Span>) -> Self {
        TypeError::KindMismatch {
            a: a.to_string(),
            a_kind: uwu_ast::kind_of(a).to_string(),
            b: b.to_string(),
            b_kind: uwu_ast::kind_of(b).to_string(),
            span: span.to_miette(),
        }
    }

    pub fn occurs_check(var: u32, ty: &Type, span: Option<Span>) -> Self {
        TypeError::OccursCheck { var, ty: ty.to_string(), span: span.to_miette() }
    }

    pub fn unbound_identifier(name: impl Into<String>, span: Option<Span>) -> Self {
        TypeError::UnboundIdentifier { name: name.into(), span: span.to_miette() }
    }

    pub fn non_exhaustive_match(remaining_alts: Vec<String>, span: Option<Span>) -> Self {
        TypeError::NonExhaustiveMatch { remaining_alts, span: span.to_miette() }
    }

    pub fn compiler_invariant(msg: impl Into<String>, span: Option<Span>) -> Self {
        TypeError::CompilerInvariant { msg: msg.into(), span: span.to_miette() }
    }
}
