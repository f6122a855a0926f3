//! `wrapgen` — the language-independent core of a multi-target C/C++ binding
//! generator.
//!
//! Target emitters hand this crate the sibling chain of one overloaded
//! symbol, already annotated with typemap facts (per-parameter typecheck
//! precedence, input counts, check templates). [`overload::rank`] produces
//! the deterministic order in which candidates are tried and flags
//! shadowed/duplicate declarations; [`overload::emit_dispatch`] turns the
//! ranked list into the runtime dispatch cascade embedded in the generated
//! wrapper source.

pub mod emitter;
pub mod model;
pub mod overload;

pub use emitter::{EmitterConfig, Target};
pub use model::{Declaration, Parameter, TranslationUnitContext, TypeDesc, precedence};
pub use overload::{DispatchMode, RankError, emit_dispatch, rank};
pub use wrapc_span::{SourceLoc, Span};
pub use wrapc_utils::{Diagnostic, DiagnosticSink};
