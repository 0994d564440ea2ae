//! JSON-lines game event log.
//!
//! Each [`GameEvent`] becomes one JSON object on its own line, e.g.
//! `{"type":"locked","rowsCleared":1,"score":3}`. The log is best-effort: the
//! first write error disables it and the game carries on.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::GameEvent;

pub struct EventLog {
    out: Option<Box<dyn Write>>,
    buf: Vec<u8>,
    written: u64,
}

impl EventLog {
    /// A log that drops everything
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
            written: 0,
        }
    }

    /// Append to the file at `path`, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self::with_writer(BufWriter::new(file)))
    }

    /// Open the log when a non-blank path is given, otherwise disable it
    pub fn from_path(path: Option<&str>) -> Result<Self> {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => Self::open(p),
            None => Ok(Self::disabled()),
        }
    }

    pub fn with_writer(out: impl Write + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
            buf: Vec::with_capacity(256),
            written: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Lines successfully written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn record(&mut self, event: &GameEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, event).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).is_err() {
            self.out = None;
            return;
        }
        self.written += 1;
    }

    pub fn record_all(&mut self, events: &[GameEvent]) {
        for event in events {
            self.record(event);
        }
    }

    /// Flush buffered lines; a failure disables the log
    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.flush();
    }
}
