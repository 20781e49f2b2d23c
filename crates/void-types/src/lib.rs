//! Shared types for the Void compiler.
//!
//! This crate defines the node kinds and node sum type every compiler
//! stage produces or consumes, together with source spans and the
//! structured error types used for diagnostics.

mod error;
mod span;
pub mod node;

pub use error::{
    CompileErrors, ErrorCategory, ErrorCode, NodeKindError, VoidError, MAX_ERRORS,
};
pub use node::{node_kind_name, ErrorNode, FinishNode, Node, NodeKind, PendingNode, Render};
pub use span::{SourceFile, Span};

/// Result type used throughout the Void compiler.
pub type Result<T> = std::result::Result<T, VoidError>;
