//! Blink demo — toggles a simulated output line once per second.

use anyhow::Result;
use log::{error, info};

use pinloop::adapters::log_sink::LogEventSink;
use pinloop::adapters::sim::{SimBroker, SimDeviceInfo, SimHostLoop, SimState};
use pinloop::app::ports::DeviceInfo;
use pinloop::config::SampleConfig;
use pinloop::control::blink;
use pinloop::error::Error;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("pinloop blink v{}", env!("CARGO_PKG_VERSION"));

    let config = SampleConfig::default();
    let state = SimState::new();
    let identity = SimDeviceInfo::new("rpi3").build_device();

    let broker = SimBroker::new(&state);
    // Ten toggle periods, then the host delivers a destroy request.
    let mut host = SimHostLoop::run_for(&state, 10).realtime();
    let mut sink = LogEventSink::new();

    match blink::run(broker, &mut host, &mut sink, identity.as_str(), &config) {
        Ok(()) => Ok(()),
        Err(Error::UnsupportedDevice(id)) => {
            error!("unsupported device: {id}, nothing to blink");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
