//! Source positions shared across the `wrapgen` components.

use std::fmt;

/// Byte range inside one interface file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Where a declaration came from: interface file, line, and byte span.
///
/// Line numbers are 1-based; diagnostics quote them directly, so a
/// `SourceLoc` with line 0 means "location unknown".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLoc {
    file: String,
    line: usize,
    span: Span,
}

impl SourceLoc {
    pub fn new(file: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            file: file.into(),
            line,
            span,
        }
    }

    pub fn unknown() -> Self {
        Self {
            file: String::from("<unknown>"),
            line: 0,
            span: Span::default(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
