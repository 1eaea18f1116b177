//! Integration Tests für den Ramp-Controller
//!
//! Diese Tests laufen auf dem Host (x86_64) und simulieren den Scheduler
//! mit einer virtuellen Uhr.

use light_core::{RampController, STEP_SIZE, TickOutcome, TickSchedule};

// ============================================================================
// Simulierter Scheduler
// ============================================================================

/// Ein ausgeführter Tick mit Zeitpunkt (virtuelle Millisekunden)
#[derive(Debug)]
struct TickRecord {
    at_ms: u64,
    outcome: TickOutcome,
}

/// Führt Ticks aus bis die Rampe fertig ist (max. `limit` Ticks)
fn drive(ramp: &mut RampController, schedule: TickSchedule, limit: usize) -> Vec<TickRecord> {
    let mut records = Vec::new();
    let mut now_ms = 0u64;
    let mut pending = Some(schedule);

    while let Some(schedule) = pending.take() {
        assert!(records.len() < limit, "ramp did not finish in {limit} ticks");
        now_ms += u64::from(schedule.delay_ms);

        let outcome = ramp.on_tick(schedule.handle);
        if let TickOutcome::Stepped { next, .. } = outcome {
            pending = Some(next);
        }
        records.push(TickRecord {
            at_ms: now_ms,
            outcome,
        });
    }

    records
}

fn levels(records: &[TickRecord]) -> Vec<u16> {
    records
        .iter()
        .filter_map(|r| match r.outcome {
            TickOutcome::Stepped { level, .. } | TickOutcome::Completed { level, .. } => {
                Some(level)
            }
            TickOutcome::Stale => None,
        })
        .collect()
}

// ============================================================================
// Tests: Beispiele
// ============================================================================

#[test]
fn test_ramp_0_to_2048_in_1000ms() {
    let mut ramp = RampController::new(0);
    let schedule = ramp.begin_transition(2048, 1000, 0);
    assert_eq!(ramp.per_step_ms(), 250);

    let records = drive(&mut ramp, schedule, 4);

    assert_eq!(levels(&records), vec![512, 1024, 2048]);
    assert_eq!(
        records.iter().map(|r| r.at_ms).collect::<Vec<_>>(),
        vec![0, 250, 500]
    );

    match records.last().unwrap().outcome {
        TickOutcome::Completed { level, status } => {
            assert_eq!(level, 2048);
            assert_eq!(status.current, 2048);
            assert_eq!(status.target, 2048);
            assert_eq!(status.remaining_ms, 0);
        }
        other => panic!("Expected Completed, got {other:?}"),
    }
}

#[test]
fn test_small_gap_completes_on_first_tick() {
    let mut ramp = RampController::new(1000);
    let schedule = ramp.begin_transition(1100, 500, 0);
    assert_eq!(ramp.per_step_ms(), 0);

    let records = drive(&mut ramp, schedule, 1);

    assert_eq!(levels(&records), vec![1100]);
    assert_eq!(ramp.status().remaining_ms, 0);
}

#[test]
fn test_start_delay_postpones_first_tick() {
    let mut ramp = RampController::new(0);
    let schedule = ramp.begin_transition(4096, 800, 300);

    let records = drive(&mut ramp, schedule, 16);

    assert_eq!(records[0].at_ms, 300);
    assert_eq!(ramp.current_level(), 4096);
}

// ============================================================================
// Tests: Eigenschaften
// ============================================================================

#[test]
fn test_every_ramp_converges() {
    let cases: [(u16, u16, u32); 8] = [
        (0, 65535, 5000),
        (65535, 0, 5000),
        (0, 65535, 100),
        (30000, 30001, 1000),
        (12345, 54321, 7),
        (40000, 1000, 0),
        (500, 500, 1000),
        (65535, 65535, 0),
    ];

    for (start, target, duration) in cases {
        let mut ramp = RampController::new(start);
        let schedule = ramp.begin_transition(target, duration, 0);
        drive(&mut ramp, schedule, 1000);

        assert_eq!(ramp.current_level(), target, "start {start} target {target}");
        assert_eq!(ramp.remaining_ms(), 0);
        assert!(!ramp.is_active());
    }
}

#[test]
fn test_zero_per_step_delay_still_steps() {
    // 100ms / 127 Schritte = 0ms pro Schritt
    let mut ramp = RampController::new(0);
    let schedule = ramp.begin_transition(65535, 100, 0);
    assert_eq!(ramp.per_step_ms(), 0);

    let records = drive(&mut ramp, schedule, 1000);

    assert_eq!(records.len(), 128);
    assert!(records.iter().all(|r| r.at_ms == 0));
}

#[test]
fn test_levels_move_monotonically_without_overshoot() {
    for (start, target) in [(0u16, 20000u16), (60000, 3000)] {
        let mut ramp = RampController::new(start);
        let schedule = ramp.begin_transition(target, 10_000, 0);
        let records = drive(&mut ramp, schedule, 1000);

        let mut previous = start;
        for level in levels(&records) {
            let before = previous.abs_diff(target);
            let after = level.abs_diff(target);
            assert!(after < before, "level {level} did not approach {target}");
            if level != target {
                assert_eq!(previous.abs_diff(level), STEP_SIZE);
            }
            previous = level;
        }
        assert_eq!(previous, target);
    }
}

#[test]
fn test_instant_transition_from_any_level() {
    for start in [0u16, 511, 32768, 65535] {
        for target in [0u16, 1, 40000, 65535] {
            let mut ramp = RampController::new(start);
            let schedule = ramp.begin_transition(target, 0, 0);

            match ramp.on_tick(schedule.handle) {
                TickOutcome::Completed { level, .. } => assert_eq!(level, target),
                other => panic!("Expected Completed, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_target_equal_current_completes_immediately() {
    let mut ramp = RampController::new(7000);
    let schedule = ramp.begin_transition(7000, 3000, 0);

    assert!(matches!(
        ramp.on_tick(schedule.handle),
        TickOutcome::Completed { level: 7000, .. }
    ));
}

// ============================================================================
// Tests: Preemption
// ============================================================================

#[test]
fn test_new_transition_preempts_running_ramp() {
    let mut ramp = RampController::new(0);
    let first = ramp.begin_transition(10240, 2000, 0);

    // Zwei Schritte der ersten Rampe
    let next = match ramp.on_tick(first.handle) {
        TickOutcome::Stepped { next, .. } => next,
        other => panic!("Expected Stepped, got {other:?}"),
    };
    assert!(matches!(ramp.on_tick(next.handle), TickOutcome::Stepped { .. }));
    assert_eq!(ramp.current_level(), 1024);

    // Neues Ziel überholt die laufende Rampe
    let second = ramp.begin_transition(0, 400, 0);
    assert_eq!(ramp.target_level(), 0);
    assert_eq!(ramp.remaining_ms(), 400);

    // Noch ausstehender Tick der ersten Rampe wird verworfen
    assert_eq!(ramp.on_tick(next.handle), TickOutcome::Stale);
    assert_eq!(ramp.current_level(), 1024);

    drive(&mut ramp, second, 16);
    assert_eq!(ramp.current_level(), 0);
    assert_eq!(ramp.target_level(), 0);
}

#[test]
fn test_status_is_side_effect_free() {
    let mut ramp = RampController::new(0);
    ramp.begin_transition(2048, 1000, 0);

    let first = ramp.status();
    let second = ramp.status();

    assert_eq!(first, second);
    assert_eq!(first.current, 0);
    assert_eq!(first.target, 2048);
    assert_eq!(first.remaining_ms, 1000);
}
