//! Timed state evolver for the speaker's frequency sweep.
//!
//! The next frequency is a pure function of the current value and the
//! wall-clock milliseconds elapsed since the last successful update. Keying
//! the ramp off real elapsed time rather than iteration count keeps the
//! sweep rate independent of how fast the non-blocking loop spins.

/// Linear frequency ramp over the closed range `[base_hz, 2 * base_hz]`.
///
/// Wraps back to `base_hz` strictly when the candidate *exceeds* the upper
/// bound — a candidate exactly equal to `2 * base_hz` is kept.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyRamp {
    base_hz: f64,
    step_hz_per_ms: f64,
}

impl FrequencyRamp {
    pub fn new(base_hz: f64, step_hz_per_ms: f64) -> Self {
        Self {
            base_hz,
            step_hz_per_ms,
        }
    }

    pub fn base_hz(&self) -> f64 {
        self.base_hz
    }

    /// Advance `current` by `elapsed_ms` worth of sweep, wrapping past the
    /// upper bound. No hidden state: current value and elapsed time are the
    /// entire input.
    pub fn next(&self, current: f64, elapsed_ms: i64) -> f64 {
        let candidate = current + self.step_hz_per_ms * elapsed_ms as f64;
        if candidate > self.base_hz * 2.0 {
            self.base_hz
        } else {
            candidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn a4_ramp() -> FrequencyRamp {
        FrequencyRamp::new(440.0, 0.1)
    }

    #[test]
    fn rate_is_tenth_hz_per_ms() {
        // 4 seconds at 0.1 Hz/ms climbs 400 Hz, still inside [440, 880].
        let next = a4_ramp().next(440.0, 4000);
        assert!((next - 840.0).abs() < EPS, "got {next}");
    }

    #[test]
    fn accumulated_sweep_wraps_once() {
        // Five seconds fed in sub-wrap steps: 440 → 590 → 740 → 880,
        // then the next step overshoots and the sweep restarts at the base.
        let ramp = a4_ramp();
        let mut hz = 440.0;
        for _ in 0..3 {
            hz = ramp.next(hz, 1500);
        }
        assert!((hz - 880.0).abs() < EPS, "got {hz}");
        let wrapped = ramp.next(hz, 500);
        assert!((wrapped - 440.0).abs() < EPS, "got {wrapped}");
    }

    #[test]
    fn zero_elapsed_is_identity() {
        assert!((a4_ramp().next(523.25, 0) - 523.25).abs() < EPS);
    }

    #[test]
    fn wraps_past_upper_bound() {
        // 860 + 0.1 * 500 = 910 > 880, so the sweep restarts at the base.
        let next = a4_ramp().next(860.0, 500);
        assert!((next - 440.0).abs() < EPS, "got {next}");
    }

    #[test]
    fn upper_bound_itself_does_not_wrap() {
        // Exactly 2 * base is inside the closed range; wrap is strict.
        let ramp = FrequencyRamp::new(440.0, 1.0);
        let next = ramp.next(870.0, 10);
        assert!((next - 880.0).abs() < EPS, "got {next}");
        // One more millisecond pushes it over.
        let wrapped = ramp.next(880.0, 1);
        assert!((wrapped - 440.0).abs() < EPS, "got {wrapped}");
    }
}
