//! Append-only log of applied events.
//!
//! Each event the session applies is written as one JSON line, the format
//! the `seamark` binary reads back, so a journal replays into a fresh session.
//! Events that failed are never published and so never journaled.

use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use seamark_core::{AppEvent, EventBus, Interest, ObserverId};

/// A journal file shared with the bus observer that writes to it.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
    out: Arc<Mutex<LineWriter<File>>>,
}

impl Journal {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            out: Arc::new(Mutex::new(LineWriter::new(file))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record every event on `bus` matching `interest`.
    ///
    /// Write failures are logged; they do not affect the session.
    pub fn attach(&self, bus: &EventBus, interest: Interest) -> ObserverId {
        let journal = self.clone();
        bus.observe(interest, move |event| {
            if let Err(e) = journal.record(event) {
                tracing::warn!("Could not journal to {}: {}", journal.path.display(), e);
            }
        })
    }

    /// Append one event.
    pub fn record(&self, event: &AppEvent) -> io::Result<()> {
        let mut out = self.out.lock();
        serde_json::to_writer(&mut *out, event)?;
        out.write_all(b"\n")
    }
}
