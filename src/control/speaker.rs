//! Speaker sample — non-blocking loop driving a PWM frequency sweep.
//!
//! Timeout policy: zero wait. The loop spins as fast as the host allows
//! because the sweep is keyed off *elapsed wall-clock time*, not iteration
//! count — a blocking wait would quantise the ramp, and an iteration-counted
//! ramp would sweep at whatever speed the host happens to run.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{Clock, EventSink, HostLoop, PeripheralBroker, PollTimeout, PwmPort, Wake};
use crate::config::SampleConfig;
use crate::control::ramp::FrequencyRamp;
use crate::error::Result;
use crate::profile::{self, PeripheralRole};

/// Run the tone sweep until the host requests destruction.
pub fn run<B, H, S, C>(
    mut broker: B,
    host: &mut H,
    sink: &mut S,
    clock: &C,
    identity: &str,
    config: &SampleConfig,
) -> Result<()>
where
    B: PeripheralBroker,
    H: HostLoop,
    S: EventSink,
    C: Clock,
{
    let name = profile::resolve(PeripheralRole::Pwm, identity)?;
    let mut pwm = broker.open_pwm(name)?;
    pwm.set_duty_cycle(config.pwm_duty_percent)?;
    pwm.set_enabled(true)?;
    sink.emit(&AppEvent::Started {
        sample: "speaker",
        peripheral: name,
    });

    let ramp = FrequencyRamp::new(config.base_frequency_hz, config.frequency_step_hz_per_ms);
    let mut frequency = config.base_frequency_hz;
    let mut last_ms = clock.now_ms();

    while !host.destroy_requested() {
        match host.poll_once(PollTimeout::NoWait) {
            Wake::Source(source) => host.process_source(source),
            Wake::Timeout | Wake::Fd(_) => {}
        }

        if let Err(e) = pwm.set_frequency_hz(frequency) {
            // Transient: neither the frequency nor the timestamp advances,
            // so the next successful set resumes from the same note and the
            // elapsed time spans the failed spins.
            error!("{e}, retrying next iteration");
            continue;
        }

        let now_ms = clock.now_ms();
        let next = ramp.next(frequency, now_ms - last_ms);
        if next < frequency {
            sink.emit(&AppEvent::FrequencyWrapped {
                peripheral: name,
                to_hz: next,
            });
        }
        frequency = next;
        last_ms = now_ms;
    }

    info!("speaker: destroy requested, releasing {name}");
    // Best-effort quiesce before the handle drops; the channel is being
    // released either way.
    if let Err(e) = pwm.set_enabled(false) {
        warn!("{e}");
    }
    Ok(())
}
