//! Node kinds and the node sum type.
//!
//! A producer hands out [`Node`] values one at a time. Two payload-free
//! sentinels end the stream: [`ErrorNode`] when production cannot continue
//! and [`FinishNode`] when the input is exhausted. Consumers inspect
//! [`Node::kind`] (or [`Node::has_next`]) before using a node.

use crate::{NodeKindError, Span};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Canonical diagnostic names, indexed by [`NodeKind::index`].
const NAMES: [&str; NodeKind::COUNT] = [
    "Method",
    "Package",
    "Import",
    "Type",
    "Local",
    "SingleValue",
    "Operation",
    "Error",
    "Finish",
];

// ══════════════════════════════════════════════════════════════════════════════
// NodeKind
// ══════════════════════════════════════════════════════════════════════════════

/// The category a node represents.
///
/// The ordinal is only used to look up the name; compare kinds directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Method,
    Package,
    Import,
    Type,
    Local,
    SingleValue,
    Operation,
    Error,
    Finish,
}

impl NodeKind {
    pub const COUNT: usize = 9;

    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; NodeKind::COUNT] = [
        NodeKind::Method,
        NodeKind::Package,
        NodeKind::Import,
        NodeKind::Type,
        NodeKind::Local,
        NodeKind::SingleValue,
        NodeKind::Operation,
        NodeKind::Error,
        NodeKind::Finish,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Bounds-checked conversion from a raw ordinal.
    pub fn from_index(index: usize) -> Result<Self, NodeKindError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(NodeKindError::OutOfRange {
                index,
                count: Self::COUNT,
            })
    }

    /// The canonical diagnostic name of this kind.
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// `true` for the kinds that end a node stream.
    pub fn is_sentinel(self) -> bool {
        matches!(self, NodeKind::Error | NodeKind::Finish)
    }
}

/// Name of the kind with ordinal `index`.
///
/// Fails with [`NodeKindError::OutOfRange`] for anything past the last kind.
pub fn node_kind_name(index: usize) -> Result<&'static str, NodeKindError> {
    NodeKind::from_index(index).map(NodeKind::name)
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = NodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| NodeKindError::UnknownName(s.to_string()))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Rendering
// ══════════════════════════════════════════════════════════════════════════════

/// Human-readable diagnostic output of a node.
pub trait Render {
    /// Kinds without their own rendering yield `"None"`.
    fn render(&self) -> Cow<'static, str> {
        Cow::Borrowed("None")
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Node variants
// ══════════════════════════════════════════════════════════════════════════════

/// A node of a declared kind whose payload has not been designed yet.
///
/// Only the source location is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNode {
    span: Span,
}

impl PendingNode {
    /// Create a node at `span`.
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Where the node was found.
    pub fn span(&self) -> Span {
        self.span
    }
}

impl Render for PendingNode {}

/// Sentinel: node production failed and cannot continue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorNode;

impl ErrorNode {
    /// Create the error sentinel.
    pub fn new() -> Self {
        ErrorNode
    }

    /// Always [`NodeKind::Error`].
    pub fn kind(&self) -> NodeKind {
        NodeKind::Error
    }
}

impl Render for ErrorNode {
    fn render(&self) -> Cow<'static, str> {
        Cow::Borrowed("Error")
    }
}

/// Sentinel: the node stream is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinishNode;

impl FinishNode {
    /// Create the end-of-stream sentinel.
    pub fn new() -> Self {
        FinishNode
    }

    /// Always [`NodeKind::Finish`].
    pub fn kind(&self) -> NodeKind {
        NodeKind::Finish
    }
}

impl Render for FinishNode {
    fn render(&self) -> Cow<'static, str> {
        Cow::Borrowed("Finish")
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Node
// ══════════════════════════════════════════════════════════════════════════════

/// One element of the tree built while compiling a source unit.
///
/// There is one variant per [`NodeKind`]; the variant is the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Method(PendingNode),
    Package(PendingNode),
    Import(PendingNode),
    Type(PendingNode),
    Local(PendingNode),
    SingleValue(PendingNode),
    Operation(PendingNode),
    Error(ErrorNode),
    Finish(FinishNode),
}

impl Node {
    /// Create a node of `kind` at `span`.
    ///
    /// The sentinel kinds carry no payload, so `span` is dropped for them.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        let pending = PendingNode::new(span);
        match kind {
            NodeKind::Method => Node::Method(pending),
            NodeKind::Package => Node::Package(pending),
            NodeKind::Import => Node::Import(pending),
            NodeKind::Type => Node::Type(pending),
            NodeKind::Local => Node::Local(pending),
            NodeKind::SingleValue => Node::SingleValue(pending),
            NodeKind::Operation => Node::Operation(pending),
            NodeKind::Error => Node::Error(ErrorNode),
            NodeKind::Finish => Node::Finish(FinishNode),
        }
    }

    /// The error sentinel as a node.
    pub fn error() -> Self {
        Node::Error(ErrorNode)
    }

    /// The end-of-stream sentinel as a node.
    pub fn finish() -> Self {
        Node::Finish(FinishNode)
    }

    /// The kind this node was created as.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Method(_) => NodeKind::Method,
            Node::Package(_) => NodeKind::Package,
            Node::Import(_) => NodeKind::Import,
            Node::Type(_) => NodeKind::Type,
            Node::Local(_) => NodeKind::Local,
            Node::SingleValue(_) => NodeKind::SingleValue,
            Node::Operation(_) => NodeKind::Operation,
            Node::Error(node) => node.kind(),
            Node::Finish(node) => node.kind(),
        }
    }

    /// Location of the node, `None` for sentinels.
    pub fn span(&self) -> Option<Span> {
        match self {
            Node::Method(node)
            | Node::Package(node)
            | Node::Import(node)
            | Node::Type(node)
            | Node::Local(node)
            | Node::SingleValue(node)
            | Node::Operation(node) => Some(node.span()),
            Node::Error(_) | Node::Finish(_) => None,
        }
    }

    /// `true` while more nodes may follow this one.
    pub fn has_next(&self) -> bool {
        !self.kind().is_sentinel()
    }
}

impl Render for Node {
    fn render(&self) -> Cow<'static, str> {
        match self {
            Node::Method(node)
            | Node::Package(node)
            | Node::Import(node)
            | Node::Type(node)
            | Node::Local(node)
            | Node::SingleValue(node)
            | Node::Operation(node) => node.render(),
            Node::Error(node) => node.render(),
            Node::Finish(node) => node.render(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<ErrorNode> for Node {
    fn from(node: ErrorNode) -> Self {
        Node::Error(node)
    }
}

impl From<FinishNode> for Node {
    fn from(node: FinishNode) -> Self {
        Node::Finish(node)
    }
}
