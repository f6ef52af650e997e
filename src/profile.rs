//! Device profile resolver — maps a device identity to a peripheral name.
//!
//! Single source of truth for the identity→pin tables; every sample resolves
//! through here rather than hard-coding names. The same physical device
//! exposes a different peripheral per role, so each role carries its own
//! independent table.
//!
//! Resolution is a pure, total function over a fixed set of identities. An
//! identity outside the table is a terminal configuration error, never a
//! retryable fault.

use crate::error::{Error, Result};

/// Fixed-capacity device identity string, as delivered by the host's
/// identity service.
pub type DeviceId = heapless::String<32>;

/// Which kind of peripheral a sample needs opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralRole {
    /// Digital output line (blink sample).
    GpioOutput,
    /// Digital input line with edge interrupts (button sample).
    GpioInput,
    /// PWM channel (speaker sample).
    Pwm,
}

// ---------------------------------------------------------------------------
// Identity → peripheral-name tables
// ---------------------------------------------------------------------------

const OUTPUT_GPIO_BY_DEVICE: &[(&str, &str)] = &[
    ("rpi3", "BCM6"),
    ("edison", "IO13"),
    ("imx7d_pico", "GPIO2_IO02"),
];

const INPUT_GPIO_BY_DEVICE: &[(&str, &str)] = &[
    ("rpi3", "BCM21"),
    ("edison", "IO12"),
    ("imx7d_pico", "GPIO_174"),
];

const PWM_BY_DEVICE: &[(&str, &str)] = &[
    ("rpi3", "PWM1"),
    ("imx6ul_pico", "PWM8"),
    ("imx7d_pico", "PWM2"),
];

impl PeripheralRole {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::GpioOutput => OUTPUT_GPIO_BY_DEVICE,
            Self::GpioInput => INPUT_GPIO_BY_DEVICE,
            Self::Pwm => PWM_BY_DEVICE,
        }
    }
}

/// Resolve a device identity to the symbolic peripheral name for `role`.
///
/// Exact-match lookup; no fuzzy matching, no fallback. An unknown identity
/// yields [`Error::UnsupportedDevice`] carrying the identity for diagnostics.
pub fn resolve(role: PeripheralRole, identity: &str) -> Result<&'static str> {
    role.table()
        .iter()
        .find(|(device, _)| *device == identity)
        .map(|(_, name)| *name)
        .ok_or_else(|| Error::UnsupportedDevice(device_id(identity)))
}

/// Copy an arbitrary identity string into the fixed-capacity [`DeviceId`],
/// truncating on overflow (diagnostics only, never used for lookup).
pub fn device_id(identity: &str) -> DeviceId {
    let mut id = DeviceId::new();
    for ch in identity.chars() {
        if id.push(ch).is_err() {
            break;
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_per_role() {
        assert_eq!(resolve(PeripheralRole::GpioOutput, "rpi3"), Ok("BCM6"));
        assert_eq!(resolve(PeripheralRole::GpioInput, "rpi3"), Ok("BCM21"));
        assert_eq!(resolve(PeripheralRole::Pwm, "rpi3"), Ok("PWM1"));
    }

    #[test]
    fn roles_have_independent_tables() {
        // edison has GPIO but no PWM channel; imx6ul_pico only PWM.
        assert_eq!(resolve(PeripheralRole::GpioOutput, "edison"), Ok("IO13"));
        assert!(resolve(PeripheralRole::Pwm, "edison").is_err());
        assert_eq!(resolve(PeripheralRole::Pwm, "imx6ul_pico"), Ok("PWM8"));
        assert!(resolve(PeripheralRole::GpioOutput, "imx6ul_pico").is_err());
    }

    #[test]
    fn resolution_is_idempotent() {
        let a = resolve(PeripheralRole::GpioInput, "imx7d_pico");
        let b = resolve(PeripheralRole::GpioInput, "imx7d_pico");
        assert_eq!(a, b);
        assert_eq!(a, Ok("GPIO_174"));
    }

    #[test]
    fn unknown_identity_is_unsupported() {
        let err = resolve(PeripheralRole::GpioOutput, "qemu").unwrap_err();
        assert_eq!(err, Error::UnsupportedDevice(device_id("qemu")));
        // Same outcome every time — not retryable.
        let again = resolve(PeripheralRole::GpioOutput, "qemu").unwrap_err();
        assert_eq!(err, again);
    }

    #[test]
    fn device_id_truncates_long_identities() {
        let long = "x".repeat(100);
        let id = device_id(&long);
        assert_eq!(id.len(), 32);
    }
}
