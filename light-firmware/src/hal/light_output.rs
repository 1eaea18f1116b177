// Licht-Ausgang über WS2812 (RMT Peripheral)
//
// Das Helligkeits-Level (0..=65535) wird als weiße Farbe ausgegeben,
// begrenzt auf LIGHT_MAX_BRIGHTNESS.

use defmt::error;
use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use light_core::level_to_rgb;
use smart_leds_trait::SmartLedsWrite;

use crate::config::LIGHT_MAX_BRIGHTNESS;
use crate::{LightOutput, OutputError};

// Buffer-Größe für 1 LED (3 Farben * 8 Bits + 1 Reset)
pub const LIGHT_BUFFER_SIZE: usize = 25;

/// Real Hardware Licht-Ausgang
///
/// Hinweis: Der Buffer muss 'static sein, daher wird er im Task erstellt
/// und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtLightOutput<'a> {
    led: SmartLedsAdapter<'a, LIGHT_BUFFER_SIZE>,
}

impl<'a> RmtLightOutput<'a> {
    /// Erstellt einen neuen RmtLightOutput
    ///
    /// # Parameter
    /// - `gpio8`: GPIO8 Peripheral für die Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(1) Macro)
    pub fn new(
        gpio8: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; LIGHT_BUFFER_SIZE],
    ) -> Result<Self, OutputError> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| OutputError::WriteFailed)?;

        let led = SmartLedsAdapter::new(rmt.channel0, gpio8, buffer);

        Ok(Self { led })
    }

    /// Schreibt ein Helligkeits-Level auf die LED
    pub fn write_level(&mut self, level: u16) -> Result<(), OutputError> {
        let color = level_to_rgb(level, LIGHT_MAX_BRIGHTNESS);
        self.led
            .write([color].into_iter())
            .map_err(|_| OutputError::WriteFailed)
    }
}

impl LightOutput for RmtLightOutput<'_> {
    fn apply(&mut self, level: u16) {
        // Fehler werden nur geloggt, die Rampe läuft weiter
        if let Err(e) = self.write_level(level) {
            error!("Light: failed to apply level {}: {}", level, e);
        }
    }
}
