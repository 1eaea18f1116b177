//! Core Types für die Helligkeits-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies. Alle Zeiten in Millisekunden,
//! alle Helligkeiten im Bereich 0..=65535.

/// Übergangs-Parameter einer Set-Anfrage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// Gesamtdauer der Rampe (0 = sofortiger Sprung)
    pub time_ms: u32,
    /// Wartezeit bevor die Rampe startet
    pub delay_ms: u32,
}

/// Set-Anfrage: Ziel-Helligkeit plus optionaler Übergang
///
/// Ohne Übergang springt das Licht beim ersten Tick auf das Ziel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightnessSet {
    pub level: u16,
    pub transition: Option<Transition>,
}

impl LightnessSet {
    /// Sofortiger Sprung auf `level`
    pub const fn instant(level: u16) -> Self {
        Self {
            level,
            transition: None,
        }
    }

    /// Rampe auf `level` über `time_ms`, Start nach `delay_ms`
    pub const fn with_transition(level: u16, time_ms: u32, delay_ms: u32) -> Self {
        Self {
            level,
            transition: Some(Transition { time_ms, delay_ms }),
        }
    }

    pub fn time_ms(&self) -> u32 {
        self.transition.map_or(0, |t| t.time_ms)
    }

    pub fn delay_ms(&self) -> u32 {
        self.transition.map_or(0, |t| t.delay_ms)
    }
}

/// Status-Report: (current, target, remaining)
///
/// Wird als Antwort auf Set/Get und beim Abschluss einer Rampe verschickt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightnessStatus {
    pub current: u16,
    pub target: u16,
    pub remaining_ms: u32,
}

/// Kommando an den Lightness-Task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    /// Neue Rampe starten (ersetzt eine laufende Rampe)
    Set(LightnessSet),
    /// Aktuellen Status abfragen
    Get,
}

/// Status-Event vom Lightness-Task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// Direkte Antwort auf ein Set- oder Get-Kommando
    Response(LightnessStatus),
    /// Unaufgeforderte Publikation nach Abschluss einer Rampe
    Published(LightnessStatus),
}

impl StatusEvent {
    pub fn status(&self) -> LightnessStatus {
        match self {
            StatusEvent::Response(status) | StatusEvent::Published(status) => *status,
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for LightnessStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "LightnessStatus {{ current: {}, target: {}, remaining: {}ms }}",
            self.current,
            self.target,
            self.remaining_ms
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LightCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LightCommand::Set(set) => {
                defmt::write!(
                    fmt,
                    "Set {{ lvl: {}, time: {}ms, delay: {}ms }}",
                    set.level,
                    set.time_ms(),
                    set.delay_ms()
                )
            }
            LightCommand::Get => defmt::write!(fmt, "Get"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            StatusEvent::Response(status) => defmt::write!(fmt, "Response({})", status),
            StatusEvent::Published(status) => defmt::write!(fmt, "Published({})", status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_set_has_zero_timing() {
        let set = LightnessSet::instant(1000);
        assert_eq!(set.time_ms(), 0);
        assert_eq!(set.delay_ms(), 0);
    }

    #[test]
    fn test_transition_set_timing() {
        let set = LightnessSet::with_transition(2048, 1000, 50);
        assert_eq!(set.time_ms(), 1000);
        assert_eq!(set.delay_ms(), 50);
    }

    #[test]
    fn test_status_event_unwraps_status() {
        let status = LightnessStatus {
            current: 1,
            target: 2,
            remaining_ms: 3,
        };
        assert_eq!(StatusEvent::Response(status).status(), status);
        assert_eq!(StatusEvent::Published(status).status(), status);
    }
}
