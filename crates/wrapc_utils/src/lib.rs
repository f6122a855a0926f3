//! Shared diagnostics and logging plumbing for `wrapgen`.

pub mod errors;
pub mod logging;

pub use errors::{Diagnostic, DiagnosticSeverity, DiagnosticSink, emit_diagnostics};
pub use logging::init_tracing;
