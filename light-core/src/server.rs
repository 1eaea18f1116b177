//! Lightness Server
//!
//! Verbindet den [`RampController`] mit seinen externen Kollaborateuren:
//! dem physischen Ausgang ([`LightOutput`]) und dem Status-Kanal
//! ([`StatusPublisher`]). Das Timing übernimmt der Aufrufer anhand der
//! zurückgegebenen [`TickSchedule`]s.

use crate::ramp::{RampController, TickHandle, TickOutcome, TickSchedule};
use crate::traits::{LightOutput, StatusPublisher};
use crate::types::{LightnessSet, LightnessStatus};

pub struct LightnessServer<O: LightOutput, P: StatusPublisher> {
    ramp: RampController,
    output: O,
    publisher: P,
}

impl<O: LightOutput, P: StatusPublisher> LightnessServer<O, P> {
    /// Erstellt den Server und setzt den Ausgang auf `initial_level`
    pub fn new(initial_level: u16, mut output: O, publisher: P) -> Self {
        output.apply(initial_level);
        Self {
            ramp: RampController::new(initial_level),
            output,
            publisher,
        }
    }

    /// Set-Kommando: startet eine neue Rampe (last-writer-wins)
    ///
    /// Die Antwort spiegelt den Zustand direkt nach Annahme der Anfrage,
    /// noch bevor ein Tick gelaufen ist.
    pub fn set(&mut self, set: LightnessSet) -> (LightnessStatus, TickSchedule) {
        let schedule = self
            .ramp
            .begin_transition(set.level, set.time_ms(), set.delay_ms());

        let response = LightnessStatus {
            current: self.ramp.current_level(),
            target: self.ramp.target_level(),
            remaining_ms: set.time_ms(),
        };

        (response, schedule)
    }

    /// Get-Kommando: Live-Snapshot
    pub fn get(&self) -> LightnessStatus {
        self.ramp.status()
    }

    /// Führt einen fälligen Tick aus
    ///
    /// Gibt den nächsten Tick zurück oder `None`, wenn die Rampe
    /// abgeschlossen bzw. der Tick veraltet war.
    pub fn tick(&mut self, handle: TickHandle) -> Option<TickSchedule> {
        match self.ramp.on_tick(handle) {
            TickOutcome::Stepped { level, next } => {
                self.output.apply(level);
                Some(next)
            }
            TickOutcome::Completed { level, status } => {
                self.publisher.publish(status);
                self.output.apply(level);
                None
            }
            TickOutcome::Stale => None,
        }
    }

    pub fn ramp(&self) -> &RampController {
        &self.ramp
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}
