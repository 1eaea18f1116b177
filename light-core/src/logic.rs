//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

/// Absoluter Abstand zweier Helligkeits-Level
pub fn level_distance(a: u16, b: u16) -> u16 {
    a.abs_diff(b)
}

/// Bewegt `current` um höchstens `step` in Richtung `target`
///
/// Überschießt nie: liegt das Ziel näher als `step`, wird es direkt erreicht.
///
/// # Beispiele
///
/// ```
/// # use light_core::step_toward;
/// assert_eq!(step_toward(0, 2048, 512), 512);
/// assert_eq!(step_toward(2048, 0, 512), 1536);
/// assert_eq!(step_toward(1000, 1100, 512), 1100);
/// ```
pub fn step_toward(current: u16, target: u16, step: u16) -> u16 {
    if level_distance(current, target) <= step {
        target
    } else if target > current {
        current + step
    } else {
        current - step
    }
}

/// Rechnet ein Helligkeits-Level (0..=65535) in eine weiße RGB-Farbe um
///
/// `max_brightness` begrenzt den Kanalwert (WS2812 sind sehr hell).
pub fn level_to_rgb(level: u16, max_brightness: u8) -> RGB8 {
    let value = (u32::from(level) * u32::from(max_brightness) / u32::from(u16::MAX)) as u8;
    RGB8 {
        r: value,
        g: value,
        b: value,
    }
}
