//! Lighting Ramp Controller
//!
//! Bewegt die aktuelle Helligkeit in festen Schritten (`STEP_SIZE`) zum Ziel.
//! Die Wartezeit zwischen zwei Ticks ergibt sich aus Gesamtdauer / Schrittzahl.
//!
//! Der Controller plant selbst keine Timer. `begin_transition()` und
//! `on_tick()` liefern einen [`TickSchedule`], den der Aufrufer (Embassy-Task
//! oder Test-Scheduler) ausführt. Jeder neue Übergang erhöht die Generation,
//! Ticks mit einem alten [`TickHandle`] werden als [`TickOutcome::Stale`]
//! verworfen. So ist immer höchstens ein Tick pro Licht aktiv.

use crate::logic::{level_distance, step_toward};
use crate::types::LightnessStatus;

/// Maximale Helligkeits-Änderung pro Tick
pub const STEP_SIZE: u16 = 512;

/// Handle eines geplanten Ticks (Generation des Übergangs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    generation: u32,
}

/// Auftrag an den Scheduler: `handle` nach `delay_ms` zurückgeben
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub handle: TickHandle,
    pub delay_ms: u32,
}

/// Ergebnis eines Ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ein Schritt wurde ausgeführt, nächster Tick ist geplant
    Stepped { level: u16, next: TickSchedule },
    /// Ziel erreicht, kein weiterer Tick
    Completed { level: u16, status: LightnessStatus },
    /// Tick gehört zu einem überholten Übergang (oder Controller ist idle)
    Stale,
}

/// Zustand einer Rampe (ein Exemplar pro Licht)
#[derive(Debug, Clone)]
pub struct RampController {
    current_level: u16,
    target_level: u16,
    per_step_ms: u32,
    remaining_ms: u32,
    generation: u32,
    active: bool,
}

impl RampController {
    /// Erstellt einen ruhenden Controller auf `initial_level`
    pub const fn new(initial_level: u16) -> Self {
        Self {
            current_level: initial_level,
            target_level: initial_level,
            per_step_ms: 0,
            remaining_ms: 0,
            generation: 0,
            active: false,
        }
    }

    /// Startet einen neuen Übergang und ersetzt einen laufenden
    ///
    /// Schrittzahl = |target - current| / STEP_SIZE (ganzzahlig).
    /// Bei Schrittzahl 0 ist die Wartezeit pro Schritt 0 und der erste Tick
    /// schließt die Rampe ab.
    pub fn begin_transition(
        &mut self,
        target_level: u16,
        total_ms: u32,
        start_delay_ms: u32,
    ) -> TickSchedule {
        let step_count =
            u32::from(level_distance(target_level, self.current_level)) / u32::from(STEP_SIZE);

        self.target_level = target_level;
        self.per_step_ms = if step_count > 0 {
            total_ms / step_count
        } else {
            0
        };
        self.remaining_ms = total_ms;
        self.generation = self.generation.wrapping_add(1);
        self.active = true;

        TickSchedule {
            handle: self.handle(),
            delay_ms: start_delay_ms,
        }
    }

    /// Führt einen Tick aus
    ///
    /// Abschluss wenn entweder die Restzeit nur noch einen Schritt umfasst
    /// oder der Abstand zum Ziel höchstens `STEP_SIZE` beträgt. Beide
    /// Bedingungen bleiben erhalten (ODER-verknüpft).
    pub fn on_tick(&mut self, handle: TickHandle) -> TickOutcome {
        if !self.active || handle.generation != self.generation {
            return TickOutcome::Stale;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(self.per_step_ms);

        if self.remaining_ms <= self.per_step_ms
            || level_distance(self.target_level, self.current_level) <= STEP_SIZE
        {
            self.current_level = self.target_level;
            self.remaining_ms = 0;
            self.active = false;

            return TickOutcome::Completed {
                level: self.current_level,
                status: self.status(),
            };
        }

        self.current_level = step_toward(self.current_level, self.target_level, STEP_SIZE);

        TickOutcome::Stepped {
            level: self.current_level,
            next: TickSchedule {
                handle,
                delay_ms: self.per_step_ms,
            },
        }
    }

    /// Snapshot (current, target, remaining) ohne Seiteneffekte
    pub fn status(&self) -> LightnessStatus {
        LightnessStatus {
            current: self.current_level,
            target: self.target_level,
            remaining_ms: self.remaining_ms,
        }
    }

    pub fn current_level(&self) -> u16 {
        self.current_level
    }

    pub fn target_level(&self) -> u16 {
        self.target_level
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn per_step_ms(&self) -> u32 {
        self.per_step_ms
    }

    /// `true` solange ein Tick aussteht
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn handle(&self) -> TickHandle {
        TickHandle {
            generation: self.generation,
        }
    }
}
