use crate::{SourceFile, Span};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of errors stored in a [`CompileErrors`] report.
pub const MAX_ERRORS: usize = 20;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Production,
    Source,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Production => "production",
            Self::Source => "source",
            Self::Internal => "internal",
        })
    }
}

/// Numeric error code (E100–E999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Node production (E100–E199) ──
    pub const PRODUCTION_FAILED: Self = Self(100);

    // ── Source access (E200–E299) ──
    pub const SOURCE_NOT_FOUND: Self = Self(200);
    pub const SOURCE_UNREADABLE: Self = Self(201);

    // ── Internal (E900–E999) ──
    pub const INVALID_NODE_KIND: Self = Self(900);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Production,
            200..=299 => ErrorCategory::Source,
            _ => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Misuse of a raw node kind ordinal or name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeKindError {
    /// An ordinal outside the declared kinds.
    #[error("node kind index {index} is out of range (expected 0..{count})")]
    OutOfRange { index: usize, count: usize },

    /// A name that is not one of the canonical kind names.
    #[error("unknown node kind name: {0:?}")]
    UnknownName(String),
}

impl From<NodeKindError> for VoidError {
    fn from(err: NodeKindError) -> Self {
        VoidError::new("", ErrorCode::INVALID_NODE_KIND, err.to_string(), None)
    }
}

/// A structured Void compiler diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidError {
    /// Source file name; empty when the failure is not tied to a file.
    pub file: String,
    pub code: ErrorCode,
    /// Derived from `code`.
    pub category: ErrorCategory,
    pub message: String,
    /// Source location, when the failure can be pinned to one.
    #[serde(flatten)]
    pub span: Option<Span>,
    /// The source line `span` starts on; empty without a span.
    pub source_line: String,
}

impl VoidError {
    /// Create a new error without source line context.
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            category: code.category(),
            message: message.into(),
            span,
            source_line: String::new(),
        }
    }

    /// The failure reported when a producer emits the Error sentinel.
    ///
    /// `after` is the location of the last node produced before the failure,
    /// `None` if the stream failed on its first request.
    pub fn production_failed(after: Option<Span>) -> Self {
        Self::new("", ErrorCode::PRODUCTION_FAILED, "node production failed", after)
    }

    /// Attach the exact source line for context.
    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = line.into();
        self
    }

    /// Fill in the file name and source line from `source`.
    ///
    /// Fields that are already set are left untouched. Without a span no
    /// source line is attached.
    pub fn attach_source(mut self, source: &SourceFile) -> Self {
        if self.file.is_empty() {
            self.file = source.name.clone();
        }
        if self.source_line.is_empty() {
            if let Some(line) = self.span.and_then(|span| source.line(span.start_line)) {
                self.source_line = line.to_string();
            }
        }
        self
    }
}

impl fmt::Display for VoidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.file.is_empty() {
            write!(f, "{}:", self.file)?;
        }
        if let Some(span) = self.span {
            write!(f, "{span}:")?;
        }
        if !self.file.is_empty() || self.span.is_some() {
            f.write_str(" ")?;
        }
        write!(f, "{} [{}] {}", self.code, self.category, self.message)
    }
}

impl std::error::Error for VoidError {}

/// Errors collected over a compilation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompileErrors {
    pub errors: Vec<VoidError>,
    pub total_errors: usize,
}

impl CompileErrors {
    /// Create an empty report.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Add an error. Only the first [`MAX_ERRORS`] are stored, all are counted.
    pub fn push_error(&mut self, error: VoidError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }
}
