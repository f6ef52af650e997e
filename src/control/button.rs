//! Button sample — interrupt-driven input with indefinite waits.
//!
//! Timeout policy: block forever. A button has no periodic obligation, so
//! the loop only wakes for a host event or for the line's polling descriptor
//! becoming readable (falling edge fired). Every delivered interrupt must be
//! acknowledged before anything is reported, or it will not re-arm.

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::{
    Direction, EdgeTrigger, EventSink, GpioPort, HostLoop, PeripheralBroker, PollTimeout, Wake,
};
use crate::error::Result;
use crate::profile::{self, PeripheralRole};

/// Run the button reader until the host requests destruction.
///
/// Teardown order is load-bearing: the descriptor is deregistered from the
/// host loop first, then the line handle drops, then the broker connection —
/// so no stale registration can fire into a released peripheral.
pub fn run<B, H, S>(mut broker: B, host: &mut H, sink: &mut S, identity: &str) -> Result<()>
where
    B: PeripheralBroker,
    H: HostLoop,
    S: EventSink,
{
    let name = profile::resolve(PeripheralRole::GpioInput, identity)?;
    let mut gpio = broker.open_gpio(name)?;
    gpio.set_direction(Direction::In)?;
    gpio.set_edge_trigger(EdgeTrigger::Falling)?;
    let fd = gpio.polling_fd()?;
    host.register_fd(fd)?;
    sink.emit(&AppEvent::Started {
        sample: "button",
        peripheral: name,
    });

    let mut outcome = Ok(());
    while !host.destroy_requested() {
        match host.poll_once(PollTimeout::Forever) {
            Wake::Source(source) => host.process_source(source),
            Wake::Fd(woken) if woken == fd => {
                // Ack must succeed before the edge is observable anywhere;
                // a failure means the interrupt channel is broken.
                if let Err(e) = gpio.ack_interrupt() {
                    error!("{e}");
                    outcome = Err(e);
                    break;
                }
                info!("GPIO \"{name}\" changed: button pressed");
                sink.emit(&AppEvent::EdgeDetected { peripheral: name });
            }
            Wake::Timeout | Wake::Fd(_) => {}
        }
    }

    info!("button: releasing {name}");
    let deregistered = host.deregister_fd(fd);
    drop(gpio);
    drop(broker);
    outcome.and(deregistered)
}
