//! crates/logging/src/tracing_bridge.rs
//! Subscriber setup and an in-memory capture layer.
//!
//! The mirror never installs a global subscriber on its own. Binaries and
//! tests call [`init_tracing`], or compose [`CaptureLayer`] into a
//! scoped subscriber to observe which subsystems emitted events.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{CaptureLayer, Subsystem};
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let capture = CaptureLayer::new();
//! let subscriber = tracing_subscriber::registry().with(capture.clone());
//! tracing::subscriber::with_default(subscriber, || {
//!     logging::trace_del!("removed stale file");
//! });
//! assert_eq!(capture.count(Subsystem::Delete), 1);
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::subsystem::Subsystem;

/// Filter directives applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "dirmirror=info";

/// A single event recorded by [`CaptureLayer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Category derived from the event target.
    pub subsystem: Subsystem,
    /// Level the event was emitted at.
    pub level: Level,
    /// Rendered `message` field, if the event carried one.
    pub message: Option<String>,
}

/// A tracing layer that records dirmirror events in memory.
///
/// Events whose target does not belong to a [`Subsystem`] are ignored. Clones
/// share the same buffer, so a test can keep one handle and install the other.
#[derive(Clone, Debug, Default)]
pub struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    /// Creates a layer with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every event captured so far.
    pub fn drain(&self) -> Vec<CapturedEvent> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }

    /// Returns a copy of the captured events without clearing the buffer.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Counts captured events that belong to `subsystem`.
    #[must_use]
    pub fn count(&self, subsystem: Subsystem) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| event.subsystem == subsystem)
            .count()
    }

    fn push(&self, event: CapturedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(subsystem) = Subsystem::from_target(metadata.target()) else {
            return;
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.push(CapturedEvent {
            subsystem,
            level: *metadata.level(),
            message: visitor.message,
        });
    }
}

/// Visitor to extract the message from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Builds the filter used by [`init_tracing`].
///
/// `RUST_LOG` takes precedence; otherwise `directives` is parsed, falling back
/// to [`DEFAULT_FILTER`] when the directives are malformed.
#[must_use]
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a formatted stderr subscriber filtered by [`env_filter`].
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(directives: &str) -> bool {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
