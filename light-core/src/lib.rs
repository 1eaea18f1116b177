//! Light Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert den Ramp-Controller, Traits und Pure Functions,
//! damit alles auf dem Host testbar bleibt.

#![no_std]

pub mod attention;
pub mod clock;
pub mod keepalive;
pub mod logic;
#[cfg(feature = "serde")]
pub mod protocol;
pub mod ramp;
pub mod server;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use attention::{AttentionBlinker, BLINK_PERIOD_MS, MAX_INDICATOR_LEDS};
pub use clock::{CLOCK_PRINT_INTERVAL_SECS, LocalClock, LocalTime};
pub use keepalive::KeepAlive;
pub use logic::{level_distance, level_to_rgb, step_toward};
pub use ramp::{RampController, STEP_SIZE, TickHandle, TickOutcome, TickSchedule};
pub use server::LightnessServer;
pub use traits::{IndicatorLeds, LightOutput, NO_LEDS, OutputError, StatusPublisher};
pub use types::{LightCommand, LightnessSet, LightnessStatus, StatusEvent, Transition};
