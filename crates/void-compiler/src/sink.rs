//! Text sinks for diagnostic output.

use log::warn;
use std::io::{self, Write};
use void_types::{NodeKind, Render};

/// Accepts text fragments for display or storage.
pub trait TextSink {
    /// Write `text` as is, without any separator.
    fn print(&mut self, text: &str);

    fn println(&mut self, text: &str) {
        self.print(text);
        self.print("\n");
    }

    /// Write the canonical name of `kind`.
    fn print_kind(&mut self, kind: NodeKind) {
        self.print(kind.name());
    }

    fn print_render(&mut self, node: &dyn Render) {
        self.print(&node.render());
    }

    fn println_render(&mut self, node: &dyn Render) {
        self.println(&node.render());
    }
}

/// Writes to the process standard output.
///
/// Every write takes the stdout lock, so concurrent writers never
/// interleave within a fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl TextSink for ConsoleSink {
    fn print(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!("failed to write to stdout: {err}");
        }
    }
}

/// Writes to any [`io::Write`].
pub struct WriteSink<W: Write> {
    inner: io::BufWriter<W>,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: io::BufWriter::new(inner),
        }
    }

    /// Flush buffered text and return the writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.inner.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

impl<W: Write> TextSink for WriteSink<W> {
    fn print(&mut self, text: &str) {
        if let Err(err) = self.inner.write_all(text.as_bytes()) {
            warn!("failed to write to sink: {err}");
        }
    }
}

/// Collects everything written into a string.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    buf: String,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl TextSink for BufferSink {
    fn print(&mut self, text: &str) {
        self.buf.push_str(text);
    }
}
