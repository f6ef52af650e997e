//! The three sample control loops and the pure ramp they share.
//!
//! One skeleton, three timeout policies:
//!
//! | Sample    | Wait policy        | Per-iteration step                  |
//! |-----------|--------------------|-------------------------------------|
//! | `blink`   | up to 1000 ms      | read output level, write negation   |
//! | `button`  | indefinite         | ack interrupt, report edge          |
//! | `speaker` | none (spin)        | set frequency, advance time ramp    |
//!
//! Each loop owns exactly one peripheral handle for its whole run, services
//! pending host events before its hardware step, honours the termination
//! signal at the top of each iteration, and retries transient I/O failures
//! on the next iteration with no backoff.

pub mod blink;
pub mod button;
pub mod ramp;
pub mod speaker;

pub use ramp::FrequencyRamp;
