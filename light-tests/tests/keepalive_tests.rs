//! Integration Tests für die Keep-Alive Deadline der Broker-Verbindung

use light_core::KeepAlive;

/// Halbes Broker Keep-Alive (30 s)
const INTERVAL_MS: u64 = 15_000;

/// Poll-Intervall des MQTT-Loops
const POLL_MS: u64 = 50;

/// Simuliert den MQTT-Loop: eingehende Nachrichten alle `inbound_every_ms`,
/// ausgehende nur wenn die Deadline fällig ist.
/// Gibt die Zeitpunkte der gesendeten Heartbeats zurück.
fn simulate(inbound_every_ms: u64, until_ms: u64) -> Vec<u64> {
    let mut keep_alive = KeepAlive::new(INTERVAL_MS, 0);
    let mut sent = Vec::new();
    let mut now = 0;

    while now < until_ms {
        if keep_alive.is_due(now) {
            keep_alive.record_sent(now);
            sent.push(now);
        }

        let next_inbound = (now / inbound_every_ms + 1) * inbound_every_ms;
        now = keep_alive.next_wake_ms(now, POLL_MS).min(next_inbound);
    }

    sent
}

// ============================================================================
// Tests: Deadline
// ============================================================================

#[test]
fn test_first_heartbeat_due_after_interval() {
    let keep_alive = KeepAlive::new(INTERVAL_MS, 2_000);
    assert_eq!(keep_alive.deadline_ms(), 17_000);
    assert!(!keep_alive.is_due(16_999));
    assert!(keep_alive.is_due(17_000));
}

#[test]
fn test_outbound_publish_moves_deadline() {
    let mut keep_alive = KeepAlive::new(INTERVAL_MS, 0);
    keep_alive.record_sent(10_000);

    assert!(!keep_alive.is_due(15_000));
    assert_eq!(keep_alive.deadline_ms(), 25_000);
}

#[test]
fn test_wake_never_later_than_deadline() {
    let keep_alive = KeepAlive::new(INTERVAL_MS, 0);
    assert_eq!(keep_alive.next_wake_ms(0, POLL_MS), 50);
    assert_eq!(keep_alive.next_wake_ms(14_990, POLL_MS), 15_000);
    assert_eq!(keep_alive.next_wake_ms(20_000, POLL_MS), 15_000);
}

// ============================================================================
// Tests: Eingehender Traffic
// ============================================================================

#[test]
fn test_steady_inbound_traffic_does_not_postpone_heartbeat() {
    // Alle 10 ms eine Attention- oder Zeit-Nachricht, eine Minute lang
    let sent = simulate(10, 60_000);

    assert_eq!(sent, vec![15_000, 30_000, 45_000]);
}

#[test]
fn test_gap_between_heartbeats_stays_within_interval() {
    let sent = simulate(7, 120_000);

    let mut last = 0;
    for at in sent {
        assert!(at - last <= INTERVAL_MS, "gap {}ms too long", at - last);
        last = at;
    }
    assert!(120_000 - last <= INTERVAL_MS);
}
