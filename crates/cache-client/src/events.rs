//! # Connection Events
//!
//! Observability hooks for the connection lifecycle. Events are side
//! effects only; they never change the outcome of an operation.

use std::fmt;
use std::sync::Arc;

/// A connection lifecycle event reported by the driver.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// The connection reached a ready state
    Ready,
    /// A transport-level error occurred
    Error(String),
    /// The driver is about to retry the connection
    Reconnecting { delay_ms: u64, attempt: u32 },
    /// The session ended
    End,
}

/// Caller-supplied event listener.
pub type EventListener = Arc<dyn Fn(&ConnectionEvent) + Send + Sync>;

/// How connection events are handled.
///
/// The two variants are mutually exclusive: a caller-supplied listener
/// replaces the built-in handlers entirely rather than augmenting them.
#[derive(Clone, Default)]
pub enum EventHandling {
    /// Built-in handlers that log each event via `tracing`
    #[default]
    Default,
    /// Full override; the built-in handlers are not invoked
    Listener(EventListener),
}

impl fmt::Debug for EventHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("EventHandling::Default"),
            Self::Listener(_) => f.write_str("EventHandling::Listener(..)"),
        }
    }
}

impl EventHandling {
    /// Dispatch a single event.
    pub fn emit(&self, event: &ConnectionEvent) {
        match self {
            Self::Default => match event {
                ConnectionEvent::Ready => tracing::info!("Connected to Redis"),
                ConnectionEvent::Error(err) => tracing::error!(error = %err, "Redis error"),
                ConnectionEvent::Reconnecting { delay_ms, attempt } => {
                    tracing::info!(delay_ms, attempt, "Attempting to reconnect to Redis");
                }
                ConnectionEvent::End => tracing::info!("Disconnected from Redis"),
            },
            Self::Listener(listener) => listener(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_listener_override_receives_events() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let handling = EventHandling::Listener(Arc::new(move |event| {
            sink.lock().unwrap().push(format!("{event:?}"));
        }));

        handling.emit(&ConnectionEvent::Ready);
        handling.emit(&ConnectionEvent::Reconnecting {
            delay_ms: 200,
            attempt: 1,
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].contains("Ready"));
        assert!(seen[1].contains("Reconnecting"));
    }

    #[test]
    fn test_default_handling_does_not_panic() {
        let handling = EventHandling::default();
        handling.emit(&ConnectionEvent::Error("boom".to_string()));
        handling.emit(&ConnectionEvent::End);
    }
}
