//! Attention-Blinken
//!
//! Lässt die Indikator-LEDs reihum aufleuchten, solange Attention aktiv ist.
//! Ein Muster-Eintrag pro vorhandener LED (Bit 0 = LED 0).

use crate::traits::{IndicatorLeds, NO_LEDS};

/// Anzahl unterstützter Indikator-LEDs
pub const MAX_INDICATOR_LEDS: usize = 4;

/// Intervall zwischen zwei Muster-Schritten
pub const BLINK_PERIOD_MS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AttentionBlinker {
    pattern: [u8; MAX_INDICATOR_LEDS],
    len: usize,
    idx: usize,
    active: bool,
}

impl AttentionBlinker {
    /// Erstellt das Muster für `led_count` LEDs (geklemmt auf 1..=4)
    pub fn new(led_count: usize) -> Self {
        let len = led_count.clamp(1, MAX_INDICATOR_LEDS);
        let mut pattern = [0u8; MAX_INDICATOR_LEDS];
        for (i, slot) in pattern.iter_mut().enumerate().take(len) {
            *slot = 1 << i;
        }

        Self {
            pattern,
            len,
            idx: 0,
            active: false,
        }
    }

    pub fn on(&mut self) {
        self.active = true;
    }

    pub fn off(&mut self) {
        self.active = false;
    }

    pub fn set(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Nächste LED-Maske, oder `None` wenn Attention aus ist
    ///
    /// Der Index läuft über An/Aus-Wechsel hinweg weiter.
    pub fn next_mask(&mut self) -> Option<u8> {
        if !self.active {
            return None;
        }

        let mask = self.pattern[self.idx % self.len];
        self.idx = self.idx.wrapping_add(1);
        Some(mask)
    }

    /// Ein Blink-Schritt auf `leds`
    ///
    /// Gibt `true` zurück, solange weitergeblinkt werden soll. Ist Attention
    /// aus, werden alle LEDs gelöscht.
    pub fn step<L: IndicatorLeds>(&mut self, leds: &mut L) -> bool {
        match self.next_mask() {
            Some(mask) => {
                leds.set_leds(mask);
                true
            }
            None => {
                leds.set_leds(NO_LEDS);
                false
            }
        }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_single_bits() {
        let blinker = AttentionBlinker::new(4);
        assert_eq!(blinker.pattern(), &[0b0001, 0b0010, 0b0100, 0b1000]);
    }

    #[test]
    fn test_led_count_is_clamped() {
        assert_eq!(AttentionBlinker::new(0).pattern(), &[0b0001]);
        assert_eq!(AttentionBlinker::new(9).pattern().len(), MAX_INDICATOR_LEDS);
    }

    #[test]
    fn test_inactive_yields_none() {
        let mut blinker = AttentionBlinker::new(2);
        assert_eq!(blinker.next_mask(), None);
    }
}
