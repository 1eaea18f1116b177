//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die externen Kollaborateure des Ramp-Controllers
//! ohne konkrete Implementierung.

use crate::types::LightnessStatus;

/// Bitmaske: alle Indikator-LEDs aus
pub const NO_LEDS: u8 = 0;

/// Fehler-Typ für Ausgabe-Treiber
///
/// Wird vom Treiber selbst geloggt und nicht an den Ramp-Controller
/// zurückgegeben.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    WriteFailed,
}

/// Trait für den physischen Licht-Ausgang
///
/// # Implementierungen
/// - **Production:** RmtLightOutput (WS2812 über ESP32 RMT Peripheral)
/// - **Testing:** MockLightOutput (in-memory Mock)
pub trait LightOutput {
    /// Setzt die Helligkeit (0..=65535) am Ausgang
    fn apply(&mut self, level: u16);
}

/// Trait für den ausgehenden Status-Kanal
///
/// Wird genau einmal pro abgeschlossener Rampe aufgerufen.
pub trait StatusPublisher {
    fn publish(&mut self, status: LightnessStatus);
}

/// Trait für die Indikator-LEDs (Attention-Blinken)
pub trait IndicatorLeds {
    /// Setzt die LEDs gemäß Bitmaske (Bit 0 = LED 0)
    fn set_leds(&mut self, mask: u8);
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutputError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OutputError::WriteFailed => defmt::write!(fmt, "Write failed"),
        }
    }
}
