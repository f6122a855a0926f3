use ariadne::{Color, Label, Report, ReportKind, Source};
use wrapc_span::SourceLoc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: DiagnosticSeverity,
    loc: SourceLoc,
    message: String,
    label: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: DiagnosticSeverity, loc: SourceLoc, message: impl Into<String>) -> Self {
        Self {
            severity,
            loc,
            message: message.into(),
            label: None,
            help: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(loc: SourceLoc, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, loc, message)
    }

    /// Create a warning diagnostic
    pub fn warning(loc: SourceLoc, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, loc, message)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    pub fn loc(&self) -> &SourceLoc {
        &self.loc
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn report_kind(&self) -> ReportKind<'_> {
        match self.severity {
            DiagnosticSeverity::Error => ReportKind::Error,
            DiagnosticSeverity::Warning => ReportKind::Warning,
        }
    }
}

/// Collects diagnostics produced while processing one translation unit.
///
/// The warning/error tallies only ever grow; components report into the sink
/// and never read their own diagnostics back.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    warning_count: usize,
    error_count: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            DiagnosticSeverity::Warning => {
                self.warning_count += 1;
                tracing::warn!("{}: {}", diagnostic.loc(), diagnostic.message());
            }
            DiagnosticSeverity::Error => {
                self.error_count += 1;
                tracing::error!("{}: {}", diagnostic.loc(), diagnostic.message());
            }
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub fn emit_diagnostics(diagnostics: &[Diagnostic], source: &str) {
    for diagnostic in diagnostics {
        let color = match diagnostic.severity() {
            DiagnosticSeverity::Error => Color::Red,
            DiagnosticSeverity::Warning => Color::Yellow,
        };

        let file = diagnostic.loc().file().to_string();
        let span: std::ops::Range<usize> = diagnostic.loc().span().into();
        let mut report = Report::build(diagnostic.report_kind(), file.clone(), span.start)
            .with_message(diagnostic.message());

        if let Some(label_text) = diagnostic.label() {
            report = report.with_label(
                Label::new((file.clone(), span.clone()))
                    .with_message(label_text)
                    .with_color(color),
            );
        } else {
            report = report.with_label(Label::new((file.clone(), span.clone())).with_color(color));
        }

        if let Some(help) = diagnostic.help() {
            report = report.with_note(help);
        }

        let _ = report.finish().print((file, Source::from(source)));
    }
}
