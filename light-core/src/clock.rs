//! Lokale Uhrzeit und Datums-Formatierung
//!
//! [`LocalClock`] verankert eine Wanduhr-Zeit (Unix-Sekunden + UTC-Offset)
//! an der Geräte-Uptime. Solange keine Zeit synchronisiert wurde, gibt es
//! keine lokale Zeit.

use core::fmt::Write;

use chrono::{DateTime, Datelike, Timelike};
use heapless::String;

/// Intervall für die periodische Zeit-Ausgabe
pub const CLOCK_PRINT_INTERVAL_SECS: u64 = 10;

/// Maximale Länge einer formatierten Zeile
///
/// Längste mögliche Zeile: "Today is Wednesday 262143-12-31" (31 Zeichen,
/// chrono erlaubt maximal sechsstellige Jahre).
pub const LINE_CAPACITY: usize = 40;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Zerlegte lokale Zeit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub year: i32,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    /// 0 = Sonntag
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl LocalTime {
    /// Zerlegt Sekunden seit der Epoche (bereits in Lokalzeit verschoben)
    pub fn from_local_secs(secs: i64) -> Option<Self> {
        if secs < 0 {
            return None;
        }
        let dt = DateTime::from_timestamp(secs, 0)?;

        Some(Self {
            year: dt.year(),
            month: dt.month() as u8,
            day: dt.day() as u8,
            weekday: dt.weekday().num_days_from_sunday() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
        })
    }

    pub fn weekday_name(&self) -> &'static str {
        WEEKDAYS[usize::from(self.weekday) % WEEKDAYS.len()]
    }

    /// "Today is Monday 2026-10-19"
    pub fn date_line(&self) -> String<LINE_CAPACITY> {
        let mut line = String::new();
        let written = write!(
            line,
            "Today is {} {:04}-{:02}-{:02}",
            self.weekday_name(),
            self.year,
            self.month,
            self.day
        );
        debug_assert!(written.is_ok(), "date line exceeds LINE_CAPACITY");
        line
    }

    /// "The time is 14:03:09"
    pub fn time_line(&self) -> String<LINE_CAPACITY> {
        let mut line = String::new();
        let written = write!(
            line,
            "The time is {:02}:{:02}:{:02}",
            self.hour, self.minute, self.second
        );
        debug_assert!(written.is_ok(), "time line exceeds LINE_CAPACITY");
        line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockAnchor {
    unix_secs: i64,
    utc_offset_mins: i16,
    uptime_ms: u64,
}

/// Wanduhr relativ zur Uptime
#[derive(Debug, Clone, Default)]
pub struct LocalClock {
    anchor: Option<ClockAnchor>,
}

impl LocalClock {
    pub const fn new() -> Self {
        Self { anchor: None }
    }

    /// Setzt die Wanduhr: zum Zeitpunkt `uptime_ms` gilt `unix_secs`
    pub fn sync(&mut self, unix_secs: i64, utc_offset_mins: i16, uptime_ms: u64) {
        self.anchor = Some(ClockAnchor {
            unix_secs,
            utc_offset_mins,
            uptime_ms,
        });
    }

    pub fn is_synced(&self) -> bool {
        self.anchor.is_some()
    }

    /// Unix-Zeit (UTC) zum Zeitpunkt `uptime_ms`
    pub fn unix_time(&self, uptime_ms: u64) -> Option<i64> {
        let anchor = self.anchor?;
        let elapsed_secs = uptime_ms.saturating_sub(anchor.uptime_ms) / 1000;
        let elapsed_secs = i64::try_from(elapsed_secs).ok()?;
        anchor.unix_secs.checked_add(elapsed_secs)
    }

    /// Lokale Zeit zum Zeitpunkt `uptime_ms`, `None` wenn unbekannt
    pub fn localtime(&self, uptime_ms: u64) -> Option<LocalTime> {
        let anchor = self.anchor?;
        let local = self
            .unix_time(uptime_ms)?
            .checked_add(i64::from(anchor.utc_offset_mins) * 60)?;
        LocalTime::from_local_secs(local)
    }
}
