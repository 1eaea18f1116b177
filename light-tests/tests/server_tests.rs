//! Integration Tests für den Lightness Server
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockLightOutput
//! und MockStatusPublisher

use light_core::{
    LightOutput, LightnessServer, LightnessSet, LightnessStatus, StatusPublisher, TickSchedule,
};

// ============================================================================
// Mocks
// ============================================================================

#[derive(Default)]
pub struct MockLightOutput {
    pub levels: Vec<u16>,
}

impl LightOutput for MockLightOutput {
    fn apply(&mut self, level: u16) {
        self.levels.push(level);
    }
}

#[derive(Default)]
pub struct MockStatusPublisher {
    pub published: Vec<LightnessStatus>,
}

impl StatusPublisher for MockStatusPublisher {
    fn publish(&mut self, status: LightnessStatus) {
        self.published.push(status);
    }
}

type TestServer = LightnessServer<MockLightOutput, MockStatusPublisher>;

fn server(initial_level: u16) -> TestServer {
    LightnessServer::new(
        initial_level,
        MockLightOutput::default(),
        MockStatusPublisher::default(),
    )
}

/// Führt alle Ticks aus, gibt die Anzahl zurück
fn run_ticks(server: &mut TestServer, schedule: TickSchedule) -> usize {
    let mut ticks = 0;
    let mut pending = Some(schedule);
    while let Some(schedule) = pending {
        ticks += 1;
        assert!(ticks <= 1000, "ramp did not finish");
        pending = server.tick(schedule.handle);
    }
    ticks
}

// ============================================================================
// Tests: Set / Get
// ============================================================================

#[test]
fn test_new_applies_initial_level() {
    let server = server(1234);
    assert_eq!(server.output().levels, vec![1234]);
    assert!(server.publisher().published.is_empty());
}

#[test]
fn test_set_response_reflects_state_before_first_tick() {
    let mut server = server(0);
    let (response, schedule) = server.set(LightnessSet::with_transition(2048, 1000, 100));

    assert_eq!(
        response,
        LightnessStatus {
            current: 0,
            target: 2048,
            remaining_ms: 1000,
        }
    );
    assert_eq!(schedule.delay_ms, 100);
    // Set allein ändert den Ausgang nicht
    assert_eq!(server.output().levels, vec![0]);
}

#[test]
fn test_set_without_transition_reports_zero_remaining() {
    let mut server = server(500);
    let (response, schedule) = server.set(LightnessSet::instant(60000));

    assert_eq!(response.remaining_ms, 0);
    assert_eq!(response.target, 60000);
    assert_eq!(schedule.delay_ms, 0);
}

#[test]
fn test_get_during_ramp_returns_live_state() {
    let mut server = server(0);
    let (_, schedule) = server.set(LightnessSet::with_transition(2048, 1000, 0));

    let next = server.tick(schedule.handle).expect("ramp should continue");
    assert_eq!(next.delay_ms, 250);

    assert_eq!(
        server.get(),
        LightnessStatus {
            current: 512,
            target: 2048,
            remaining_ms: 750,
        }
    );
}

// ============================================================================
// Tests: Ticks und Seiteneffekte
// ============================================================================

#[test]
fn test_full_ramp_drives_output_and_publishes_once() {
    let mut server = server(0);
    let (_, schedule) = server.set(LightnessSet::with_transition(2048, 1000, 0));

    let ticks = run_ticks(&mut server, schedule);

    assert_eq!(ticks, 3);
    assert_eq!(server.output().levels, vec![0, 512, 1024, 2048]);
    assert_eq!(
        server.publisher().published,
        vec![LightnessStatus {
            current: 2048,
            target: 2048,
            remaining_ms: 0,
        }]
    );
    assert_eq!(server.get().remaining_ms, 0);
    assert!(!server.ramp().is_active());
}

#[test]
fn test_instant_set_completes_in_one_tick() {
    let mut server = server(65535);
    let (_, schedule) = server.set(LightnessSet::instant(0));

    assert_eq!(server.tick(schedule.handle), None);
    assert_eq!(server.output().levels, vec![65535, 0]);
    assert_eq!(server.publisher().published.len(), 1);
}

#[test]
fn test_stale_tick_has_no_side_effects() {
    let mut server = server(0);
    let (_, old) = server.set(LightnessSet::with_transition(8192, 1600, 0));
    let (_, _new) = server.set(LightnessSet::with_transition(1024, 200, 0));

    assert_eq!(server.tick(old.handle), None);
    assert_eq!(server.output().levels, vec![0]);
    assert!(server.publisher().published.is_empty());

    // Die neue Rampe bleibt vom veralteten Tick unberührt
    assert!(server.ramp().is_active());
    assert_eq!(server.ramp().target_level(), 1024);
}

#[test]
fn test_preemption_converges_to_newest_target() {
    let mut server = server(0);
    let (_, first) = server.set(LightnessSet::with_transition(16384, 3200, 0));

    // Zwei Schritte der ersten Rampe
    let pending = server.tick(first.handle).expect("first ramp continues");
    let pending = server.tick(pending.handle).expect("first ramp continues");
    assert_eq!(server.get().current, 1024);

    // Neues Kommando mitten in der Rampe
    let (response, second) = server.set(LightnessSet::with_transition(3072, 400, 0));
    assert_eq!(response.current, 1024);
    assert_eq!(response.target, 3072);

    // Der alte Tick feuert noch, wird aber ignoriert
    assert_eq!(server.tick(pending.handle), None);

    run_ticks(&mut server, second);

    assert_eq!(server.get().current, 3072);
    assert_eq!(
        server.publisher().published,
        vec![LightnessStatus {
            current: 3072,
            target: 3072,
            remaining_ms: 0,
        }]
    );
    assert!(server.output().levels.iter().all(|&level| level <= 3072));
}
