//! Outbound application events.
//!
//! The control loops emit these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to the console, record for a test
//! assertion, etc.

/// Structured events emitted by the control loops.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A sample finished startup and entered its loop.
    Started {
        sample: &'static str,
        peripheral: &'static str,
    },

    /// The blinker drove the output line to a new level.
    LevelSet {
        peripheral: &'static str,
        level: bool,
    },

    /// A falling edge was delivered and acknowledged on the input line.
    EdgeDetected { peripheral: &'static str },

    /// The frequency sweep exceeded its upper bound and restarted at the
    /// base note.
    FrequencyWrapped {
        peripheral: &'static str,
        to_hz: f64,
    },
}
