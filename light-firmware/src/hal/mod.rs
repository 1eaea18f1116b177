// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus light-core für die echte Hardware.
// Tests laufen gegen Mocks im light-tests Crate.

pub mod indicator_leds;
pub mod light_output;

pub use indicator_leds::GpioIndicatorLeds;
pub use light_output::RmtLightOutput;
