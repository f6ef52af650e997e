//! Port traits — the hexagonal boundary between the control loops and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ control loop (domain)
//! ```
//!
//! The external collaborators of every sample — the device identity service,
//! the privileged peripheral-access broker, and the host lifecycle/event
//! dispatcher — live behind these traits. The loops consume them via
//! generics, so the domain core never touches a concrete broker, and the
//! whole system runs against the in-memory simulation in
//! [`adapters::sim`](crate::adapters::sim).

use crate::app::events::AppEvent;
use crate::error::Result;
use crate::profile::DeviceId;

/// Pollable file-descriptor-like token for interrupt delivery.
pub type PollFd = i32;

// ───────────────────────────────────────────────────────────────
// Device identity (driven adapter: host → domain)
// ───────────────────────────────────────────────────────────────

/// Identity of the device the host is running on, queried once at startup
/// and fed to the profile resolver.
pub trait DeviceInfo {
    fn build_device(&self) -> DeviceId;
}

// ───────────────────────────────────────────────────────────────
// Peripheral access broker (domain → privileged broker)
// ───────────────────────────────────────────────────────────────

/// GPIO line direction.
///
/// Carries the full line contract of the peripheral broker so a
/// hardware-backed adapter can map it one-to-one, even though the shipped
/// control loops only drive `In` and `OutInitiallyLow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    OutInitiallyLow,
    OutInitiallyHigh,
}

/// Edge-trigger type for interrupt-driven input lines. Like [`Direction`],
/// the full broker contract; the button loop itself only arms `Falling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTrigger {
    None,
    Rising,
    Falling,
    Both,
}

/// Connection to the peripheral-access broker. Opened once at startup;
/// dropping the value releases the connection. Open failures are fatal —
/// they indicate a misconfigured environment, not a transient fault.
pub trait PeripheralBroker {
    type Gpio: GpioPort;
    type Pwm: PwmPort;

    fn open_gpio(&mut self, name: &'static str) -> Result<Self::Gpio>;
    fn open_pwm(&mut self, name: &'static str) -> Result<Self::Pwm>;
}

/// An open GPIO line, exclusively owned by one control loop. Dropping the
/// handle releases the line — the scoped-ownership rendition of
/// close-on-every-exit-path.
///
/// Configuration calls (`set_direction`, `set_edge_trigger`) are fatal on
/// failure; per-iteration `read`/`write` failures are transient.
pub trait GpioPort {
    fn set_direction(&mut self, direction: Direction) -> Result<()>;
    fn set_edge_trigger(&mut self, edge: EdgeTrigger) -> Result<()>;
    fn read(&mut self) -> Result<bool>;
    fn write(&mut self, level: bool) -> Result<()>;

    /// Descriptor to register with the host loop for interrupt delivery.
    fn polling_fd(&self) -> Result<PollFd>;

    /// Re-arm the interrupt after a delivery. Must succeed before the edge
    /// is reported anywhere; a failure means the interrupt channel is broken.
    fn ack_interrupt(&mut self) -> Result<()>;
}

/// An open PWM channel. Dropping the handle releases the channel.
pub trait PwmPort {
    fn set_duty_cycle(&mut self, percent: f64) -> Result<()>;
    fn set_frequency_hz(&mut self, hz: f64) -> Result<()>;
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Host lifecycle / event dispatcher (domain → host)
// ───────────────────────────────────────────────────────────────

/// How long one event-loop wait may block. Each loop variant has a fixed
/// policy: the blinker a finite interval, the button forever, the speaker
/// not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTimeout {
    NoWait,
    Millis(u32),
    Forever,
}

/// Opaque token for a pending host event source. The loop hands it straight
/// back to [`HostLoop::process_source`] without inspecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSource(u32);

impl HostSource {
    pub const fn new(token: u32) -> Self {
        Self(token)
    }

    pub const fn token(self) -> u32 {
        self.0
    }
}

/// Why a wait returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The timeout elapsed with nothing pending.
    Timeout,
    /// A host lifecycle/input event is pending; it must be processed before
    /// the iteration's hardware step runs.
    Source(HostSource),
    /// A registered descriptor became readable (interrupt fired).
    Fd(PollFd),
}

/// The host application's event dispatcher and lifecycle owner.
///
/// Owns the termination signal: `destroy_requested` becomes true exactly
/// once and never resets. The loops poll it at the top of every iteration,
/// so cancellation is cooperative — an in-flight hardware step always
/// completes before termination is honoured.
pub trait HostLoop {
    /// Wait for the next wake-up, at most `timeout` long.
    fn poll_once(&mut self, timeout: PollTimeout) -> Wake;

    /// Service a pending host event synchronously. May flip the
    /// termination signal.
    fn process_source(&mut self, source: HostSource);

    /// Register a peripheral descriptor for interrupt delivery.
    fn register_fd(&mut self, fd: PollFd) -> Result<()>;

    /// Remove a registration. Must happen before the owning handle is
    /// released so no stale registration can fire into a closed peripheral.
    fn deregister_fd(&mut self, fd: PollFd) -> Result<()>;

    /// The termination signal, read-only from the loop's perspective.
    fn destroy_requested(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Time (driven adapter: clock → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source. Injected so the speaker's elapsed-time-keyed
/// frequency ramp is deterministic under test.
pub trait Clock {
    /// Monotonic milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> i64;
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The loops emit structured [`AppEvent`]s through this port. Adapters
/// decide where they go (serial log, test recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
