//! Speaker demo — sweeps the simulated PWM channel from A4 up one octave,
//! wrapping, until the scripted host requests destruction.

use anyhow::Result;
use log::{error, info};

use pinloop::adapters::log_sink::LogEventSink;
use pinloop::adapters::sim::{SimBroker, SimDeviceInfo, SimHostLoop, SimState};
use pinloop::adapters::time::MonotonicClock;
use pinloop::app::ports::DeviceInfo;
use pinloop::config::SampleConfig;
use pinloop::control::speaker;
use pinloop::error::Error;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("pinloop speaker v{}", env!("CARGO_PKG_VERSION"));

    let config = SampleConfig::default();
    let state = SimState::new();
    let identity = SimDeviceInfo::new("rpi3").build_device();

    let broker = SimBroker::new(&state);
    // The sweep loop spins without blocking; give it a generous script so
    // the ramp covers a few octave wraps of real time before shutdown.
    let mut host = SimHostLoop::run_for(&state, 2_000_000);
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    let outcome = speaker::run(
        broker,
        &mut host,
        &mut sink,
        &clock,
        identity.as_str(),
        &config,
    );
    match outcome {
        Ok(()) => {
            info!("swept {} frequency updates", state.set_frequencies().len());
            Ok(())
        }
        Err(Error::UnsupportedDevice(id)) => {
            error!("unsupported device: {id}, no PWM channel to drive");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
