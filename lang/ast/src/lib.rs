//! Kinds, types, schemes and the typed AST shared by every stage of the
//! compiler: the parser produces [`exp::Program`], the elaborator consumes
//! and annotates it against [`scheme::Context`], the matcher and hoist
//! passes rewrite it, and the backend lowers it to host source.

pub mod exp;
pub mod ident;
pub mod kind;
pub mod scheme;
pub mod subst;
pub mod traits;
pub mod ty;

pub use exp::*;
pub use ident::Ident;
pub use kind::Kind;
pub use scheme::{apply_ctx, apply_scheme, ftv_ctx, ftv_scheme, instantiate, Context, Scheme};
pub use subst::{apply, compose, ftv, Subst};
pub use traits::HasSpan;
pub use ty::{kind_of, kind_of_var, Type, VarGen, CALLABLE};
