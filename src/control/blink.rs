//! Blink sample — timeout-driven output toggling.
//!
//! Timeout policy: each iteration blocks for at most `blink_interval_ms`
//! waiting for a host event, then unconditionally performs one I/O step —
//! read the current output level, write its negation. Polling with a finite
//! timeout approximates a fixed-period toggle without a dedicated timer;
//! drift from event-handling latency is accepted.

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::{
    Direction, EventSink, GpioPort, HostLoop, PeripheralBroker, PollTimeout, Wake,
};
use crate::config::SampleConfig;
use crate::error::Result;
use crate::profile::{self, PeripheralRole};

/// Run the blinker until the host requests destruction.
///
/// Returns [`Error::UnsupportedDevice`](crate::error::Error::UnsupportedDevice)
/// before any peripheral is opened if `identity` has no output pin mapping;
/// the caller turns that into a clean early exit.
pub fn run<B, H, S>(
    mut broker: B,
    host: &mut H,
    sink: &mut S,
    identity: &str,
    config: &SampleConfig,
) -> Result<()>
where
    B: PeripheralBroker,
    H: HostLoop,
    S: EventSink,
{
    let name = profile::resolve(PeripheralRole::GpioOutput, identity)?;
    let mut gpio = broker.open_gpio(name)?;
    gpio.set_direction(Direction::OutInitiallyLow)?;
    sink.emit(&AppEvent::Started {
        sample: "blink",
        peripheral: name,
    });

    while !host.destroy_requested() {
        match host.poll_once(PollTimeout::Millis(config.blink_interval_ms)) {
            Wake::Source(source) => host.process_source(source),
            Wake::Timeout | Wake::Fd(_) => {}
        }

        // One toggle step per iteration. A transient failure skips the rest
        // of the step: after a failed write, the read is retried before any
        // write is attempted again.
        let level = match gpio.read() {
            Ok(level) => level,
            Err(e) => {
                error!("{e}, retrying next iteration");
                continue;
            }
        };
        if let Err(e) = gpio.write(!level) {
            error!("{e}, retrying next iteration");
            continue;
        }
        sink.emit(&AppEvent::LevelSet {
            peripheral: name,
            level: !level,
        });
    }

    info!("blink: destroy requested, releasing {name}");
    Ok(())
}
