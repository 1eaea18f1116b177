// Indikator-LEDs an GPIO-Ausgängen (Attention-Blinken)

use esp_hal::gpio::{Level, Output};

use crate::IndicatorLeds;
use crate::config::INDICATOR_LED_COUNT;

/// Bis zu vier LEDs, LED i entspricht Bit i der Maske
pub struct GpioIndicatorLeds<'a> {
    leds: [Output<'a>; INDICATOR_LED_COUNT],
}

impl<'a> GpioIndicatorLeds<'a> {
    pub fn new(leds: [Output<'a>; INDICATOR_LED_COUNT]) -> Self {
        Self { leds }
    }
}

impl IndicatorLeds for GpioIndicatorLeds<'_> {
    fn set_leds(&mut self, mask: u8) {
        for (i, led) in self.leds.iter_mut().enumerate() {
            let level = if mask & (1 << i) != 0 {
                Level::High
            } else {
                Level::Low
            };
            led.set_level(level);
        }
    }
}
