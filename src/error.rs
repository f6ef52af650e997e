//! Unified error types for the pinloop samples.
//!
//! Two classes, mirrored from the control-loop contract: **fatal** errors
//! (unsupported device, broker/open/configure failures, a broken interrupt
//! channel) abort startup or the loop, while **transient** errors (a single
//! read, write, or frequency-set on an already-open peripheral) are logged
//! and retried on the next iteration without backoff.

use core::fmt;

use crate::profile::DeviceId;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The device identity has no entry in the profile table for the
    /// requested peripheral role. Terminal configuration error: the caller
    /// must return cleanly without retrying (no handle was acquired).
    UnsupportedDevice(DeviceId),
    /// The peripheral-access broker could not be reached.
    Broker(&'static str),
    /// The broker refused to open the named peripheral.
    Open { name: &'static str },
    /// An initial configuration call (direction, edge trigger, duty cycle,
    /// enable) failed. Indicates a broken peripheral binding.
    Configure {
        name: &'static str,
        what: &'static str,
    },
    /// A per-iteration hardware I/O call failed. Transient: the loop skips
    /// the rest of the iteration and retries.
    Io { name: &'static str, op: IoOp },
    /// The interrupt delivery channel broke: registering or deregistering
    /// the polling descriptor, or acknowledging a delivered interrupt.
    InterruptChannel {
        name: &'static str,
        what: &'static str,
    },
}

/// Which hardware I/O operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Read,
    Write,
    SetFrequency,
}

impl Error {
    /// Transient errors are retried by the control loop; everything else is
    /// fatal and propagates out of the sample's entry function.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDevice(id) => write!(f, "unsupported device: {id}"),
            Self::Broker(msg) => write!(f, "peripheral broker: {msg}"),
            Self::Open { name } => write!(f, "failed to open peripheral: {name}"),
            Self::Configure { name, what } => {
                write!(f, "failed to set {what} for peripheral: {name}")
            }
            Self::Io { name, op } => write!(f, "failed to {op} peripheral: {name}"),
            Self::InterruptChannel { name, what } => {
                write!(f, "interrupt channel: failed to {what} for {name}")
            }
        }
    }
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read value of"),
            Self::Write => write!(f, "set value of"),
            Self::SetFrequency => write!(f, "set frequency of"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::device_id;

    #[test]
    fn only_io_is_transient() {
        assert!(
            Error::Io {
                name: "BCM6",
                op: IoOp::Write
            }
            .is_transient()
        );
        assert!(!Error::UnsupportedDevice(device_id("qemu")).is_transient());
        assert!(!Error::Open { name: "PWM1" }.is_transient());
        assert!(
            !Error::InterruptChannel {
                name: "BCM21",
                what: "ack interrupt"
            }
            .is_transient()
        );
    }

    #[test]
    fn display_carries_peripheral_name() {
        let e = Error::Configure {
            name: "BCM6",
            what: "direction",
        };
        assert_eq!(e.to_string(), "failed to set direction for peripheral: BCM6");
    }
}
