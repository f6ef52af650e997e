//! Deterministic in-memory simulation of the external collaborators.
//!
//! Stands in for the privileged peripheral-access broker, the host event
//! dispatcher, and the device identity service, so the three samples run
//! and test on any host with no hardware.
//!
//! Everything shares one [`SimState`]: an ordered operation log (so tests
//! can assert open/close pairing and teardown ordering across components)
//! plus a fault plan for injecting transient and fatal failures.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::app::ports::{
    DeviceInfo, Direction, EdgeTrigger, GpioPort, HostLoop, HostSource, PeripheralBroker, PollFd,
    PollTimeout, PwmPort, Wake,
};
use crate::error::{Error, IoOp, Result};
use crate::profile::{device_id, DeviceId};

/// Polling descriptor handed out for the simulated GPIO line.
const SIM_GPIO_FD: PollFd = 64;

/// Source token whose processing flips the termination signal.
const SOURCE_DESTROY: u32 = 1;

// ───────────────────────────────────────────────────────────────
// Operation log
// ───────────────────────────────────────────────────────────────

/// One recorded call against the simulated world, in global order.
#[derive(Debug, Clone, PartialEq)]
pub enum SimOp {
    OpenGpio(&'static str),
    OpenPwm(&'static str),
    SetDirection(&'static str, Direction),
    SetEdgeTrigger(&'static str, EdgeTrigger),
    Read(&'static str, bool),
    ReadFailed(&'static str),
    Write(&'static str, bool),
    WriteFailed(&'static str),
    SetDutyCycle(&'static str, f64),
    SetFrequency(&'static str, f64),
    SetFrequencyFailed(&'static str),
    SetEnabled(&'static str, bool),
    AckInterrupt(&'static str),
    CloseGpio(&'static str),
    ClosePwm(&'static str),
    CloseBroker,
    Poll(PollTimeout),
    RegisterFd(PollFd),
    DeregisterFd(PollFd),
}

#[derive(Debug, Default)]
struct FaultPlan {
    fail_reads: u32,
    fail_writes: u32,
    fail_frequency_sets: u32,
    fail_gpio_open: bool,
    fail_pwm_open: bool,
    fail_configure: bool,
    fail_ack: bool,
    fail_register: bool,
    fail_deregister: bool,
}

#[derive(Debug, Default)]
struct Inner {
    ops: Vec<SimOp>,
    faults: FaultPlan,
    /// Last level written to the GPIO line (lines open initially low).
    gpio_level: bool,
}

/// Shared state behind every simulated component.
#[derive(Clone, Default)]
pub struct SimState(Arc<Mutex<Inner>>);

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, op: SimOp) {
        self.0.lock().unwrap().ops.push(op);
    }

    /// Snapshot of the full operation log.
    pub fn ops(&self) -> Vec<SimOp> {
        self.0.lock().unwrap().ops.clone()
    }

    /// Position of the first occurrence of `op`, if any.
    pub fn index_of(&self, op: &SimOp) -> Option<usize> {
        self.0.lock().unwrap().ops.iter().position(|o| o == op)
    }

    fn count(&self, pred: impl Fn(&SimOp) -> bool) -> usize {
        self.0.lock().unwrap().ops.iter().filter(|o| pred(o)).count()
    }

    pub fn gpio_opens(&self) -> usize {
        self.count(|o| matches!(o, SimOp::OpenGpio(_)))
    }

    pub fn gpio_closes(&self) -> usize {
        self.count(|o| matches!(o, SimOp::CloseGpio(_)))
    }

    pub fn pwm_opens(&self) -> usize {
        self.count(|o| matches!(o, SimOp::OpenPwm(_)))
    }

    pub fn pwm_closes(&self) -> usize {
        self.count(|o| matches!(o, SimOp::ClosePwm(_)))
    }

    /// Levels of all successful GPIO writes, in order.
    pub fn written_levels(&self) -> Vec<bool> {
        self.0
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter_map(|o| match o {
                SimOp::Write(_, level) => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// Frequencies of all successful PWM sets, in order.
    pub fn set_frequencies(&self) -> Vec<f64> {
        self.0
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter_map(|o| match o {
                SimOp::SetFrequency(_, hz) => Some(*hz),
                _ => None,
            })
            .collect()
    }

    // ── Fault injection ───────────────────────────────────────

    /// Fail the next `n` GPIO reads (transient).
    pub fn fail_next_reads(&self, n: u32) {
        self.0.lock().unwrap().faults.fail_reads = n;
    }

    /// Fail the next `n` GPIO writes (transient).
    pub fn fail_next_writes(&self, n: u32) {
        self.0.lock().unwrap().faults.fail_writes = n;
    }

    /// Fail the next `n` PWM frequency sets (transient).
    pub fn fail_next_frequency_sets(&self, n: u32) {
        self.0.lock().unwrap().faults.fail_frequency_sets = n;
    }

    /// Fail every GPIO open (fatal).
    pub fn fail_gpio_open(&self) {
        self.0.lock().unwrap().faults.fail_gpio_open = true;
    }

    /// Fail every PWM open (fatal).
    pub fn fail_pwm_open(&self) {
        self.0.lock().unwrap().faults.fail_pwm_open = true;
    }

    /// Fail every configuration call (fatal).
    pub fn fail_configure(&self) {
        self.0.lock().unwrap().faults.fail_configure = true;
    }

    /// Fail every interrupt acknowledgment (fatal).
    pub fn fail_ack(&self) {
        self.0.lock().unwrap().faults.fail_ack = true;
    }

    /// Fail descriptor registration with the host loop (fatal).
    pub fn fail_register(&self) {
        self.0.lock().unwrap().faults.fail_register = true;
    }

    /// Fail descriptor deregistration at teardown (fatal).
    pub fn fail_deregister(&self) {
        self.0.lock().unwrap().faults.fail_deregister = true;
    }

    /// Consume one pending transient fault from `counter`, if armed.
    fn take_transient(&self, which: fn(&mut FaultPlan) -> &mut u32) -> bool {
        let mut inner = self.0.lock().unwrap();
        let counter = which(&mut inner.faults);
        if *counter > 0 {
            *counter -= 1;
            true
        } else {
            false
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Device identity
// ───────────────────────────────────────────────────────────────

/// Simulated identity service returning a fixed build-device string.
pub struct SimDeviceInfo {
    identity: DeviceId,
}

impl SimDeviceInfo {
    pub fn new(identity: &str) -> Self {
        Self {
            identity: device_id(identity),
        }
    }
}

impl DeviceInfo for SimDeviceInfo {
    fn build_device(&self) -> DeviceId {
        self.identity.clone()
    }
}

// ───────────────────────────────────────────────────────────────
// Broker and peripheral handles
// ───────────────────────────────────────────────────────────────

/// Simulated peripheral-access broker connection.
pub struct SimBroker {
    state: SimState,
}

impl SimBroker {
    pub fn new(state: &SimState) -> Self {
        Self {
            state: state.clone(),
        }
    }
}

impl PeripheralBroker for SimBroker {
    type Gpio = SimGpio;
    type Pwm = SimPwm;

    fn open_gpio(&mut self, name: &'static str) -> Result<Self::Gpio> {
        if self.state.0.lock().unwrap().faults.fail_gpio_open {
            return Err(Error::Open { name });
        }
        self.state.push(SimOp::OpenGpio(name));
        Ok(SimGpio {
            state: self.state.clone(),
            name,
        })
    }

    fn open_pwm(&mut self, name: &'static str) -> Result<Self::Pwm> {
        if self.state.0.lock().unwrap().faults.fail_pwm_open {
            return Err(Error::Open { name });
        }
        self.state.push(SimOp::OpenPwm(name));
        Ok(SimPwm {
            state: self.state.clone(),
            name,
        })
    }
}

impl Drop for SimBroker {
    fn drop(&mut self) {
        self.state.push(SimOp::CloseBroker);
    }
}

/// Simulated GPIO line. Reads return the last written level.
pub struct SimGpio {
    state: SimState,
    name: &'static str,
}

impl GpioPort for SimGpio {
    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.state.0.lock().unwrap().faults.fail_configure {
            return Err(Error::Configure {
                name: self.name,
                what: "direction",
            });
        }
        match direction {
            Direction::OutInitiallyLow => self.state.0.lock().unwrap().gpio_level = false,
            Direction::OutInitiallyHigh => self.state.0.lock().unwrap().gpio_level = true,
            Direction::In => {}
        }
        self.state.push(SimOp::SetDirection(self.name, direction));
        Ok(())
    }

    fn set_edge_trigger(&mut self, edge: EdgeTrigger) -> Result<()> {
        if self.state.0.lock().unwrap().faults.fail_configure {
            return Err(Error::Configure {
                name: self.name,
                what: "edge trigger",
            });
        }
        self.state.push(SimOp::SetEdgeTrigger(self.name, edge));
        Ok(())
    }

    fn read(&mut self) -> Result<bool> {
        if self.state.take_transient(|f| &mut f.fail_reads) {
            self.state.push(SimOp::ReadFailed(self.name));
            return Err(Error::Io {
                name: self.name,
                op: IoOp::Read,
            });
        }
        let level = self.state.0.lock().unwrap().gpio_level;
        self.state.push(SimOp::Read(self.name, level));
        Ok(level)
    }

    fn write(&mut self, level: bool) -> Result<()> {
        if self.state.take_transient(|f| &mut f.fail_writes) {
            self.state.push(SimOp::WriteFailed(self.name));
            return Err(Error::Io {
                name: self.name,
                op: IoOp::Write,
            });
        }
        self.state.0.lock().unwrap().gpio_level = level;
        self.state.push(SimOp::Write(self.name, level));
        Ok(())
    }

    fn polling_fd(&self) -> Result<PollFd> {
        Ok(SIM_GPIO_FD)
    }

    fn ack_interrupt(&mut self) -> Result<()> {
        if self.state.0.lock().unwrap().faults.fail_ack {
            return Err(Error::InterruptChannel {
                name: self.name,
                what: "ack interrupt",
            });
        }
        self.state.push(SimOp::AckInterrupt(self.name));
        Ok(())
    }
}

impl Drop for SimGpio {
    fn drop(&mut self) {
        self.state.push(SimOp::CloseGpio(self.name));
    }
}

/// Simulated PWM channel.
pub struct SimPwm {
    state: SimState,
    name: &'static str,
}

impl PwmPort for SimPwm {
    fn set_duty_cycle(&mut self, percent: f64) -> Result<()> {
        if self.state.0.lock().unwrap().faults.fail_configure {
            return Err(Error::Configure {
                name: self.name,
                what: "duty cycle",
            });
        }
        self.state.push(SimOp::SetDutyCycle(self.name, percent));
        Ok(())
    }

    fn set_frequency_hz(&mut self, hz: f64) -> Result<()> {
        if self.state.take_transient(|f| &mut f.fail_frequency_sets) {
            self.state.push(SimOp::SetFrequencyFailed(self.name));
            return Err(Error::Io {
                name: self.name,
                op: IoOp::SetFrequency,
            });
        }
        self.state.push(SimOp::SetFrequency(self.name, hz));
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.state.0.lock().unwrap().faults.fail_configure {
            return Err(Error::Configure {
                name: self.name,
                what: "enabled",
            });
        }
        self.state.push(SimOp::SetEnabled(self.name, enabled));
        Ok(())
    }
}

impl Drop for SimPwm {
    fn drop(&mut self) {
        self.state.push(SimOp::ClosePwm(self.name));
    }
}

// ───────────────────────────────────────────────────────────────
// Host loop
// ───────────────────────────────────────────────────────────────

/// What the simulated host delivers on one `poll_once` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    /// The wait elapses (or, for `NoWait`, returns immediately) with
    /// nothing pending.
    Timeout,
    /// The first registered descriptor becomes readable.
    FdReadable,
    /// A lifecycle source whose processing requests destruction.
    RequestDestroy,
}

/// Scripted host event dispatcher. Runs its steps in order; once the script
/// is exhausted every poll delivers a destroy request, so a driven loop
/// always terminates.
pub struct SimHostLoop {
    state: SimState,
    script: VecDeque<ScriptStep>,
    registered: Vec<PollFd>,
    destroy: bool,
    realtime: bool,
}

impl SimHostLoop {
    pub fn with_script(state: &SimState, steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            state: state.clone(),
            script: steps.into_iter().collect(),
            registered: Vec::new(),
            destroy: false,
            realtime: false,
        }
    }

    /// Convenience: `iterations` plain wake-ups, then destroy.
    pub fn run_for(state: &SimState, iterations: usize) -> Self {
        Self::with_script(state, std::iter::repeat_n(ScriptStep::Timeout, iterations))
    }

    /// Actually sleep out finite timeouts instead of returning at once.
    /// The demo binaries use this so a blink period feels like one; tests
    /// keep the default instant mode.
    pub fn realtime(mut self) -> Self {
        self.realtime = true;
        self
    }
}

impl HostLoop for SimHostLoop {
    fn poll_once(&mut self, timeout: PollTimeout) -> Wake {
        self.state.push(SimOp::Poll(timeout));
        if self.realtime {
            if let PollTimeout::Millis(ms) = timeout {
                std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
            }
        }
        match self.script.pop_front() {
            Some(ScriptStep::Timeout) => Wake::Timeout,
            Some(ScriptStep::FdReadable) => self
                .registered
                .first()
                .map_or(Wake::Timeout, |fd| Wake::Fd(*fd)),
            Some(ScriptStep::RequestDestroy) | None => {
                Wake::Source(HostSource::new(SOURCE_DESTROY))
            }
        }
    }

    fn process_source(&mut self, source: HostSource) {
        if source.token() == SOURCE_DESTROY {
            self.destroy = true;
        }
    }

    fn register_fd(&mut self, fd: PollFd) -> Result<()> {
        if self.state.0.lock().unwrap().faults.fail_register {
            return Err(Error::InterruptChannel {
                name: "host loop",
                what: "register fd",
            });
        }
        self.state.push(SimOp::RegisterFd(fd));
        self.registered.push(fd);
        Ok(())
    }

    fn deregister_fd(&mut self, fd: PollFd) -> Result<()> {
        if self.state.0.lock().unwrap().faults.fail_deregister {
            return Err(Error::InterruptChannel {
                name: "host loop",
                what: "deregister fd",
            });
        }
        self.state.push(SimOp::DeregisterFd(fd));
        self.registered.retain(|r| *r != fd);
        Ok(())
    }

    fn destroy_requested(&self) -> bool {
        self.destroy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpio_reads_back_written_level() {
        let state = SimState::new();
        let mut broker = SimBroker::new(&state);
        let mut gpio = broker.open_gpio("BCM6").unwrap();
        assert_eq!(gpio.read(), Ok(false));
        gpio.write(true).unwrap();
        assert_eq!(gpio.read(), Ok(true));
    }

    #[test]
    fn initially_high_direction_presets_the_level() {
        let state = SimState::new();
        let mut broker = SimBroker::new(&state);
        let mut gpio = broker.open_gpio("BCM6").unwrap();
        gpio.set_direction(Direction::OutInitiallyHigh).unwrap();
        assert_eq!(gpio.read(), Ok(true));
        gpio.set_direction(Direction::OutInitiallyLow).unwrap();
        assert_eq!(gpio.read(), Ok(false));
    }

    #[test]
    fn transient_faults_are_consumed() {
        let state = SimState::new();
        state.fail_next_writes(1);
        let mut broker = SimBroker::new(&state);
        let mut gpio = broker.open_gpio("BCM6").unwrap();
        assert!(gpio.write(true).is_err());
        assert!(gpio.write(true).is_ok());
    }

    #[test]
    fn drops_record_closes_in_order() {
        let state = SimState::new();
        {
            let mut broker = SimBroker::new(&state);
            let _gpio = broker.open_gpio("BCM6").unwrap();
        }
        let ops = state.ops();
        // Handle closes before the broker connection.
        assert_eq!(
            ops,
            vec![
                SimOp::OpenGpio("BCM6"),
                SimOp::CloseGpio("BCM6"),
                SimOp::CloseBroker
            ]
        );
    }

    #[test]
    fn exhausted_script_requests_destroy() {
        let state = SimState::new();
        let mut host = SimHostLoop::run_for(&state, 0);
        let wake = host.poll_once(PollTimeout::NoWait);
        let Wake::Source(source) = wake else {
            panic!("expected a source wake, got {wake:?}");
        };
        assert!(!host.destroy_requested());
        host.process_source(source);
        assert!(host.destroy_requested());
    }
}
