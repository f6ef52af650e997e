//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                          | Connects to            |
//! |------------|-------------------------------------|------------------------|
//! | `log_sink` | `EventSink`                         | console log output     |
//! | `time`     | `Clock`                             | `std::time::Instant`   |
//! | `sim`      | `PeripheralBroker`, `GpioPort`,     | in-memory simulation   |
//! |            | `PwmPort`, `HostLoop`, `DeviceInfo` | with fault injection   |

pub mod log_sink;
pub mod sim;
pub mod time;
