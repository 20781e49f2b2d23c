//! Void compiler: node production protocol and its consumers.
//!
//! ```text
//! Void Source → [Lexer → Parser] → NodeProducer → Consumer → ...
//! ```
//!
//! Producers hand out one [`Production`] at a time. A [`Consumer`] pulls
//! until the producer reports that it is done or has failed; both are
//! terminal. Failure travels as an ordinary value, never as a panic or a
//! process exit.

mod consumer;
mod error;
mod production;
mod sink;
mod source;

pub use consumer::{ConsumeSummary, Consumer, ConsumerState};
pub use error::SourceError;
pub use production::{NodeProducer, NodeStream, Production};
pub use sink::{BufferSink, ConsoleSink, TextSink, WriteSink};
pub use source::{load_source, read_lines, SourceSet, SOURCE_EXTENSION};
