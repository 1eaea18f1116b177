//! Keep-Alive Deadline für die Broker-Verbindung
//!
//! Der Broker trennt einen Client, der länger als das Keep-Alive Intervall
//! nichts gesendet hat. Nur ausgehende Pakete zählen, daher verschiebt
//! ausschließlich [`KeepAlive::record_sent`] die Deadline. Eingehende
//! Nachrichten lassen sie unverändert.
//!
//! Alle Zeiten sind absolute Uptime-Werte in Millisekunden.

/// Absolute Deadline für das nächste ausgehende Paket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive {
    interval_ms: u64,
    deadline_ms: u64,
}

impl KeepAlive {
    pub const fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            deadline_ms: now_ms.saturating_add(interval_ms),
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }

    /// Ein Paket wurde gesendet, Deadline neu setzen
    pub fn record_sent(&mut self, now_ms: u64) {
        self.deadline_ms = now_ms.saturating_add(self.interval_ms);
    }

    /// Spätester Zeitpunkt zum Aufwachen: Deadline oder nächster Poll
    pub fn next_wake_ms(&self, now_ms: u64, poll_ms: u64) -> u64 {
        self.deadline_ms.min(now_ms.saturating_add(poll_ms))
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeepAlive {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "KeepAlive {{ interval: {}ms, deadline: {}ms }}",
            self.interval_ms,
            self.deadline_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_exactly_at_deadline() {
        let keep_alive = KeepAlive::new(15_000, 1_000);
        assert!(!keep_alive.is_due(15_999));
        assert!(keep_alive.is_due(16_000));
    }

    #[test]
    fn test_wake_is_capped_by_deadline() {
        let keep_alive = KeepAlive::new(100, 0);
        assert_eq!(keep_alive.next_wake_ms(90, 50), 100);
        assert_eq!(keep_alive.next_wake_ms(10, 50), 60);
    }
}
