//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade. The demo binaries route this to the console; a test sink
//! would implement the same trait and record instead.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { sample, peripheral } => {
                info!("START | {sample} on {peripheral}");
            }
            AppEvent::LevelSet { peripheral, level } => {
                info!("GPIO  | {peripheral} <- {}", if *level { "high" } else { "low" });
            }
            AppEvent::EdgeDetected { peripheral } => {
                info!("GPIO  | {peripheral} falling edge");
            }
            AppEvent::FrequencyWrapped { peripheral, to_hz } => {
                info!("PWM   | {peripheral} sweep wrapped to {to_hz:.1} Hz");
            }
        }
    }
}
