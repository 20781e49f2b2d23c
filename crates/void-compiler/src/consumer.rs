//! Pull loop over a [`NodeProducer`].

use crate::{NodeProducer, Production, TextSink};
use log::{debug, trace, warn};
use void_types::{ErrorNode, FinishNode, Node, SourceFile, VoidError};

/// Where a [`Consumer`] is in the production protocol.
///
/// ```text
/// Running ──produced──▶ Running
///    │
///    ├──failed──▶ HaltedError
///    └──done────▶ HaltedFinish
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    Running,
    HaltedError,
    HaltedFinish,
}

impl ConsumerState {
    pub fn is_halted(self) -> bool {
        !matches!(self, ConsumerState::Running)
    }
}

/// Outcome of a stream that reached its Finish sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeSummary {
    /// Regular nodes handed to the visitor.
    pub processed: usize,
}

/// Pulls nodes from a producer until it reports Done or Failed.
///
/// Both halted states are terminal: once reached, the producer is never
/// asked for another node.
pub struct Consumer<'src, P> {
    producer: P,
    state: ConsumerState,
    processed: usize,
    /// Used to attach file name and source line to failures.
    source: Option<&'src SourceFile>,
    failure: Option<VoidError>,
}

impl<'src, P: NodeProducer> Consumer<'src, P> {
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            state: ConsumerState::Running,
            processed: 0,
            source: None,
            failure: None,
        }
    }

    /// Attach the source unit being consumed, for failure diagnostics.
    pub fn with_source(mut self, source: &'src SourceFile) -> Self {
        self.source = Some(source);
        self
    }

    pub fn state(&self) -> ConsumerState {
        self.state
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// The failure that halted this consumer, if any.
    pub fn failure(&self) -> Option<&VoidError> {
        self.failure.as_ref()
    }

    pub fn into_producer(self) -> P {
        self.producer
    }

    /// Request one production and hand a produced node to `visit`.
    ///
    /// Does nothing once halted.
    pub fn step(&mut self, mut visit: impl FnMut(Node)) -> ConsumerState {
        if self.state.is_halted() {
            return self.state;
        }

        match self.producer.next_production() {
            Production::Produced(node) => {
                trace!("consumed {} node #{}", node.kind(), self.processed);
                self.processed += 1;
                visit(node);
            }
            Production::Done => {
                debug!("node stream finished after {} nodes", self.processed);
                self.state = ConsumerState::HaltedFinish;
            }
            Production::Failed(err) => {
                let err = match self.source {
                    Some(source) => err.attach_source(source),
                    None => err,
                };
                warn!(
                    "node production failed after {} nodes: {err}",
                    self.processed
                );
                self.failure = Some(err);
                self.state = ConsumerState::HaltedError;
            }
        }
        self.state
    }

    /// Pull until halted, handing every regular node to `visit`.
    pub fn run(&mut self, mut visit: impl FnMut(Node)) -> Result<ConsumeSummary, VoidError> {
        loop {
            match self.step(&mut visit) {
                ConsumerState::Running => continue,
                ConsumerState::HaltedFinish => {
                    return Ok(ConsumeSummary {
                        processed: self.processed,
                    })
                }
                ConsumerState::HaltedError => {
                    return Err(self
                        .failure
                        .clone()
                        .unwrap_or_else(|| VoidError::production_failed(None)))
                }
            }
        }
    }

    /// Pull until halted and return the regular nodes in order.
    pub fn collect(&mut self) -> Result<Vec<Node>, VoidError> {
        let mut nodes = Vec::new();
        self.run(|node| nodes.push(node))?;
        Ok(nodes)
    }

    /// Pull until halted, writing one rendered line per node to `sink`.
    ///
    /// The line for the terminating sentinel is written as well.
    pub fn dump(&mut self, sink: &mut dyn TextSink) -> Result<ConsumeSummary, VoidError> {
        let result = self.run(|node| sink.println_render(&node));
        match &result {
            Ok(_) => sink.println_render(&FinishNode::new()),
            Err(_) => sink.println_render(&ErrorNode::new()),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferSink, NodeStream};
    use test_log::test;
    use void_types::{ErrorCode, NodeKind, Span};

    fn method(line: u32) -> Node {
        Node::new(NodeKind::Method, Span::new(line, 1, line, 12))
    }

    #[test]
    fn test_starts_running() {
        let consumer = Consumer::new(NodeStream::new(Vec::<Node>::new()));
        assert_eq!(consumer.state(), ConsumerState::Running);
        assert_eq!(consumer.processed(), 0);
        assert!(consumer.failure().is_none());
    }

    #[test]
    fn test_step_transitions() {
        let mut consumer = Consumer::new(NodeStream::new([method(1), Node::finish()]));
        assert_eq!(consumer.step(|_| {}), ConsumerState::Running);
        assert_eq!(consumer.step(|_| {}), ConsumerState::HaltedFinish);
        assert_eq!(consumer.processed(), 1);
    }

    #[test]
    fn test_halted_consumer_never_pulls_again() {
        let mut pulls = 0;
        let producer = || {
            pulls += 1;
            Production::Done
        };
        let mut consumer = Consumer::new(producer);
        assert_eq!(consumer.step(|_| {}), ConsumerState::HaltedFinish);
        assert_eq!(consumer.step(|_| {}), ConsumerState::HaltedFinish);
        assert!(consumer.run(|_| {}).is_ok());
        drop(consumer);
        assert_eq!(pulls, 1);
    }

    #[test]
    fn test_failed_production_passes_reason_through() {
        let reason = VoidError::new(
            "main.void",
            ErrorCode::PRODUCTION_FAILED,
            "unexpected token `}`",
            Some(Span::point(3, 5)),
        )
        .with_source_line("}");
        let mut sent = Some(reason.clone());
        let mut consumer =
            Consumer::new(move || sent.take().map_or(Production::Done, Production::Failed));
        assert_eq!(consumer.run(|_| {}), Err(reason));
        assert_eq!(consumer.state(), ConsumerState::HaltedError);
    }

    #[test]
    fn test_failure_gets_source_context() {
        let source = SourceFile::new("main.void", "package main\nimport io\nbroken");
        let nodes = [
            Node::new(NodeKind::Package, Span::new(1, 1, 1, 12)),
            Node::new(NodeKind::Import, Span::new(2, 1, 2, 9)),
            Node::error(),
        ];
        let mut consumer = Consumer::new(NodeStream::new(nodes)).with_source(&source);
        let err = consumer.run(|_| {}).unwrap_err();
        assert_eq!(err.file, "main.void");
        assert_eq!(err.span, Some(Span::new(2, 1, 2, 9)));
        assert_eq!(err.source_line, "import io");
        assert_eq!(consumer.failure(), Some(&err));
    }

    #[test]
    fn test_collect() {
        let mut consumer =
            Consumer::new(NodeStream::new([method(1), method(2), Node::finish()]));
        let nodes = consumer.collect().unwrap();
        assert_eq!(nodes, [method(1), method(2)]);
    }

    #[test]
    fn test_dump_success() {
        let mut sink = BufferSink::new();
        let mut consumer = Consumer::new(NodeStream::new([
            method(1),
            Node::new(NodeKind::Type, Span::point(2, 1)),
            Node::finish(),
        ]));
        let summary = consumer.dump(&mut sink).unwrap();
        assert_eq!(summary.processed, 2);
        assert_eq!(sink.as_str(), "None\nNone\nFinish\n");
    }

    #[test]
    fn test_dump_failure() {
        let mut sink = BufferSink::new();
        let mut consumer = Consumer::new(NodeStream::new([method(1), Node::error(), method(3)]));
        assert!(consumer.dump(&mut sink).is_err());
        assert_eq!(sink.as_str(), "None\nError\n");
    }
}
