//! The single return channel between a node producer and its consumer.

use log::debug;
use void_types::{Node, Span, VoidError};

/// Result of asking a producer for its next node.
#[derive(Debug, Clone, PartialEq)]
pub enum Production {
    /// A regular node; more may follow.
    Produced(Node),
    /// The stream ended successfully.
    Done,
    /// Production cannot continue.
    Failed(VoidError),
}

impl Production {
    /// Map a node onto the protocol.
    ///
    /// The Error sentinel becomes [`Production::Failed`], anchored at `after`,
    /// the location of the last node produced before it, if any. The Finish
    /// sentinel becomes [`Production::Done`].
    pub fn from_node(node: Node, after: Option<Span>) -> Self {
        match node {
            Node::Error(_) => Production::Failed(VoidError::production_failed(after)),
            Node::Finish(_) => Production::Done,
            node => Production::Produced(node),
        }
    }

    /// `true` for [`Production::Done`] and [`Production::Failed`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Production::Produced(_))
    }
}

/// Anything that can be asked for nodes one at a time, e.g. a parser.
pub trait NodeProducer {
    /// Produce the next node.
    ///
    /// Called again only while the previous result was
    /// [`Production::Produced`].
    fn next_production(&mut self) -> Production;
}

impl<F> NodeProducer for F
where
    F: FnMut() -> Production,
{
    fn next_production(&mut self) -> Production {
        self()
    }
}

/// A producer backed by an iterator of nodes, sentinels included.
///
/// Running out of nodes without a sentinel counts as a Finish.
pub struct NodeStream<I> {
    nodes: I,
    last_span: Option<Span>,
}

impl<I> NodeStream<I>
where
    I: Iterator<Item = Node>,
{
    /// Wrap `nodes`.
    pub fn new(nodes: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            nodes: nodes.into_iter(),
            last_span: None,
        }
    }
}

impl<I> NodeProducer for NodeStream<I>
where
    I: Iterator<Item = Node>,
{
    fn next_production(&mut self) -> Production {
        match self.nodes.next() {
            Some(node) => {
                if let Some(span) = node.span() {
                    self.last_span = Some(span);
                }
                Production::from_node(node, self.last_span)
            }
            None => {
                debug!("node stream ran out without a sentinel, treating it as finished");
                Production::Done
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_types::{ErrorCode, NodeKind};

    fn local(line: u32) -> Node {
        Node::new(NodeKind::Local, Span::point(line, 1))
    }

    #[test]
    fn test_from_node_regular() {
        let node = local(1);
        assert_eq!(
            Production::from_node(node.clone(), None),
            Production::Produced(node)
        );
    }

    #[test]
    fn test_from_node_sentinels() {
        assert_eq!(
            Production::from_node(Node::finish(), None),
            Production::Done
        );
        match Production::from_node(Node::error(), Some(Span::point(4, 2))) {
            Production::Failed(err) => {
                assert_eq!(err.code, ErrorCode::PRODUCTION_FAILED);
                assert_eq!(err.span, Some(Span::point(4, 2)));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_is_terminal() {
        assert!(!Production::Produced(local(1)).is_terminal());
        assert!(Production::Done.is_terminal());
        assert!(Production::Failed(VoidError::production_failed(None)).is_terminal());
    }

    #[test]
    fn test_stream_anchors_failure_at_last_node() {
        let mut stream = NodeStream::new([local(1), local(7), Node::error()]);
        assert!(matches!(stream.next_production(), Production::Produced(_)));
        assert!(matches!(stream.next_production(), Production::Produced(_)));
        match stream.next_production() {
            Production::Failed(err) => assert_eq!(err.span, Some(Span::point(7, 1))),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_stream_failing_first_has_no_location() {
        let mut stream = NodeStream::new([Node::error()]);
        match stream.next_production() {
            Production::Failed(err) => assert_eq!(err.span, None),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_stream_exhaustion_is_done() {
        let mut stream = NodeStream::new(vec![local(1)]);
        assert!(matches!(stream.next_production(), Production::Produced(_)));
        assert_eq!(stream.next_production(), Production::Done);
    }

    #[test]
    fn test_closure_producer() {
        let mut remaining = 2;
        let mut producer = move || {
            if remaining == 0 {
                return Production::Done;
            }
            remaining -= 1;
            Production::Produced(Node::new(NodeKind::Operation, Span::START))
        };
        assert!(matches!(producer.next_production(), Production::Produced(_)));
        assert!(matches!(producer.next_production(), Production::Produced(_)));
        assert_eq!(producer.next_production(), Production::Done);
    }
}
