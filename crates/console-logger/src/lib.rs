//! Console Logger
//!
//! `tracing` layer for browser builds. Each event becomes one line,
//! `HH:MM:SS.mmm LEVEL [app] target: message key=value`, sent to the console
//! method matching its level.

use std::fmt::{self, Write as _};

use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("a global logger is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Destination for formatted lines
pub trait Sink: Send + Sync + 'static {
    fn write(&self, level: &Level, line: &str);
}

/// Writes to `console.debug/info/warn/error`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConsole;

impl Sink for BrowserConsole {
    fn write(&self, level: &Level, line: &str) {
        let line = JsValue::from_str(line);
        match *level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Layer that formats events and hands them to a [`Sink`]
pub struct ConsoleLayer<W: Sink = BrowserConsole> {
    app_name: String,
    sink: W,
}

impl ConsoleLayer<BrowserConsole> {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self::with_sink(app_name, BrowserConsole)
    }
}

impl<W: Sink> ConsoleLayer<W> {
    pub fn with_sink(app_name: impl Into<String>, sink: W) -> Self {
        Self {
            app_name: app_name.into(),
            sink,
        }
    }
}

impl<S, W> Layer<S> for ConsoleLayer<W>
where
    S: Subscriber,
    W: Sink,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let meta = event.metadata();
        let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        let line = format_line(&time, &self.app_name, meta.level(), meta.target(), &fields);
        self.sink.write(meta.level(), &line);
    }
}

/// Message plus `key=value` pairs of one event
#[derive(Debug, Default)]
pub struct FieldCollector {
    message: String,
    pairs: String,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.pairs, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.pairs, " {}={:?}", field.name(), value);
        }
    }
}

/// Render one record
pub fn format_line(time: &str, app_name: &str, level: &Level, target: &str, fields: &FieldCollector) -> String {
    format!(
        "{time} {:>5} [{app_name}] {target}: {}{}",
        level.to_string(),
        fields.message,
        fields.pairs
    )
}

/// Install the console layer as the global subscriber.
///
/// # Errors
///
/// Fails if another global subscriber was installed first.
pub fn init_logger(app_name: &str, max_level: Level) -> Result<(), LoggerError> {
    Registry::default()
        .with(ConsoleLayer::new(app_name).with_filter(LevelFilter::from_level(max_level)))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

    impl Sink for Capture {
        fn write(&self, level: &Level, line: &str) {
            self.0.lock().unwrap().push((*level, line.to_string()));
        }
    }

    fn captured<F: FnOnce()>(max_level: Level, f: F) -> Vec<(Level, String)> {
        let capture = Capture::default();
        let subscriber = Registry::default().with(
            ConsoleLayer::with_sink("TodoApp", capture.clone()).with_filter(LevelFilter::from_level(max_level)),
        );
        tracing::subscriber::with_default(subscriber, f);
        let lines = capture.0.lock().unwrap().clone();
        lines
    }

    #[test]
    fn test_format_line_layout() {
        let mut fields = FieldCollector::default();
        fields.message.push_str("todo added");
        fields.pairs.push_str(" id=todo-1");
        let line = format_line("12:00:00.000", "TodoApp", &Level::INFO, "todo_core::commands", &fields);
        assert_eq!(line, "12:00:00.000  INFO [TodoApp] todo_core::commands: todo added id=todo-1");
    }

    #[test]
    fn test_event_fields_are_rendered() {
        let lines = captured(Level::DEBUG, || {
            tracing::warn!(target: "store", id = "todo-7", attempts = 2, "write failed");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::WARN);
        assert!(lines[0].1.contains("store: write failed"));
        assert!(lines[0].1.contains(" id=todo-7"));
        assert!(lines[0].1.contains(" attempts=2"));
    }

    #[test]
    fn test_level_filter_applies() {
        let lines = captured(Level::INFO, || {
            tracing::debug!("hidden");
            tracing::info!("shown");
            tracing::error!("also shown");
        });
        let levels: Vec<Level> = lines.iter().map(|(l, _)| *l).collect();
        assert_eq!(levels, [Level::INFO, Level::ERROR]);
    }
}
