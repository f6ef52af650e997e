//! Button demo — delivers three simulated falling edges, then shuts down.

use anyhow::Result;
use log::{error, info};

use pinloop::adapters::log_sink::LogEventSink;
use pinloop::adapters::sim::{ScriptStep, SimBroker, SimDeviceInfo, SimHostLoop, SimState};
use pinloop::app::ports::DeviceInfo;
use pinloop::control::button;
use pinloop::error::Error;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("pinloop button v{}", env!("CARGO_PKG_VERSION"));

    let state = SimState::new();
    let identity = SimDeviceInfo::new("rpi3").build_device();

    let broker = SimBroker::new(&state);
    let mut host = SimHostLoop::with_script(
        &state,
        [
            ScriptStep::FdReadable,
            ScriptStep::FdReadable,
            ScriptStep::FdReadable,
        ],
    );
    let mut sink = LogEventSink::new();

    match button::run(broker, &mut host, &mut sink, identity.as_str()) {
        Ok(()) => Ok(()),
        Err(Error::UnsupportedDevice(id)) => {
            error!("unsupported device: {id}, no button to watch");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
