//! Incremental delivery of rule text into a live style sheet.

use crate::error::Result;
use crate::registry::{hash_text, RuleHashes};
use log::{debug, trace, warn};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A live, append-only destination for CSS rule text.
pub trait StyleSink {
    /// Whether this environment has a destination at all. Streaming into a
    /// sink that is not live is a silent no-op.
    fn is_live(&self) -> bool {
        true
    }

    /// Called once, the first time streaming is enabled.
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Appends one complete `selector { declarations }` block at the end.
    fn append(&mut self, css_text: &str) -> io::Result<()>;
}

/// Stands in for an environment with no style sheet to write to.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StyleSink for NullSink {
    fn is_live(&self) -> bool {
        false
    }

    fn append(&mut self, _css_text: &str) -> io::Result<()> {
        Ok(())
    }
}

/// An in-memory style sheet. Clones share the same rule list, so a caller
/// can keep one handle and give the other to a library.
#[derive(Debug, Default, Clone)]
pub struct SharedSheet {
    rules: Rc<RefCell<Vec<String>>>,
}

impl SharedSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the inserted rules, in insertion order.
    pub fn rules(&self) -> Vec<String> {
        self.rules.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.rules.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.borrow().is_empty()
    }
}

impl StyleSink for SharedSheet {
    fn append(&mut self, css_text: &str) -> io::Result<()> {
        self.rules.borrow_mut().push(css_text.to_string());
        Ok(())
    }
}

/// Writes every inserted rule as one line to an `io::Write`.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StyleSink for WriterSink<W> {
    fn append(&mut self, css_text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", css_text)?;
        self.writer.flush()
    }
}

/// Streaming state: the on/off flag, the sink and the hashes of what it has
/// already received.
pub struct StreamChannel {
    sink: Box<dyn StyleSink>,
    enabled: bool,
    opened: bool,
    hashes: RuleHashes,
}

impl StreamChannel {
    pub fn new(sink: Box<dyn StyleSink>) -> Self {
        StreamChannel {
            sink,
            enabled: false,
            opened: false,
            hashes: RuleHashes::new(),
        }
    }

    /// Turns streaming on or off. Without a live sink this does nothing.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if !self.sink.is_live() {
            if enabled {
                warn!("streaming requested but no live style sheet is available");
            }
            return Ok(());
        }
        if enabled && !self.opened {
            self.sink.open()?;
            self.opened = true;
        }
        self.enabled = enabled;
        debug!("streaming {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.opened
    }

    /// Appends each line not seen before. Returns how many were appended.
    pub fn publish<I, S>(&mut self, lines: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.is_enabled() {
            return Ok(0);
        }
        let mut appended = 0;
        for line in lines {
            let line = line.as_ref();
            let hash = hash_text(line);
            if self.hashes.contains(hash) {
                trace!("skipping already streamed rule: {}", line);
                continue;
            }
            self.sink.append(line)?;
            self.hashes.record(hash);
            appended += 1;
            trace!("streamed rule: {}", line);
        }
        Ok(appended)
    }

    pub fn hashes(&self) -> &RuleHashes {
        &self.hashes
    }
}
