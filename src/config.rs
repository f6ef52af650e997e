//! Sample configuration parameters.
//!
//! All tunable parameters for the three control loops, injected at loop
//! construction rather than held as process-wide globals so that tests can
//! instantiate independent loops side by side.

use serde::{Deserialize, Serialize};

/// Control-loop configuration shared by the three samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    // --- Blink ---
    /// Upper bound on each event-loop wait, and therefore the approximate
    /// toggle period of the output line (milliseconds).
    pub blink_interval_ms: u32,

    // --- Speaker ---
    /// PWM duty cycle (percent of each period active).
    pub pwm_duty_percent: f64,
    /// Sweep start frequency (Hz).
    pub base_frequency_hz: f64,
    /// Sweep rate: Hz added per elapsed millisecond of wall-clock time.
    pub frequency_step_hz_per_ms: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            blink_interval_ms: 1000,

            pwm_duty_percent: 50.0,
            base_frequency_hz: 440.0, // note A4
            frequency_step_hz_per_ms: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SampleConfig::default();
        assert!(c.blink_interval_ms > 0);
        assert!(c.pwm_duty_percent > 0.0 && c.pwm_duty_percent <= 100.0);
        assert!(c.base_frequency_hz > 0.0);
        assert!(c.frequency_step_hz_per_ms > 0.0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SampleConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SampleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.blink_interval_ms, c2.blink_interval_ms);
        assert!((c.base_frequency_hz - c2.base_frequency_hz).abs() < 0.001);
        assert!((c.frequency_step_hz_per_ms - c2.frequency_step_hz_per_ms).abs() < 0.001);
    }

    #[test]
    fn sweep_spans_one_octave() {
        let c = SampleConfig::default();
        // The ramp wraps at twice the base frequency — one octave up.
        assert!((c.base_frequency_hz * 2.0 - 880.0).abs() < 0.001);
    }
}
