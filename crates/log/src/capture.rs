//! In-memory log capture for tests.
//!
//! [`capture_dispatch`] builds a level-filtered JSON subscriber whose output
//! lands in a [`LogCapture`]. Pass the dispatcher to code that takes an
//! injected logger, or install it with `tracing::dispatcher::with_default`.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt};

/// Shared buffer of written log events, one string per event.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    /// An empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw lines in write order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Lines parsed as JSON; lines that are not JSON are skipped.
    pub fn events(&self) -> Vec<Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// The `message` of every JSON event, in order.
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|event| {
                event
                    .get("message")
                    .or_else(|| event.get("fields").and_then(|f| f.get("message")))
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .collect()
    }

    /// `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drops everything captured so far.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// Writer handed out per event; the event is committed on drop.
#[derive(Debug)]
pub struct CaptureWriter {
    buf: Vec<u8>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for CaptureWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end_matches('\n');
        if !line.is_empty() {
            self.lines.lock().push(line.to_owned());
        }
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: Vec::new(),
            lines: Arc::clone(&self.lines),
        }
    }
}

/// A dispatcher that records events at `level` and above as flattened JSON.
pub fn capture_dispatch(level: tracing::Level) -> (Dispatch, LogCapture) {
    let capture = LogCapture::new();
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .without_time()
        .with_ansi(false)
        .with_writer(capture.clone())
        .with_filter(LevelFilter::from_level(level));

    let dispatch = Dispatch::new(Registry::default().with(layer));
    (dispatch, capture)
}
