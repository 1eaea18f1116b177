// Attention Task - Lässt die Indikator-LEDs reihum blinken
use defmt::info;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};
use light_core::{BLINK_PERIOD_MS, NO_LEDS};

use crate::config::INDICATOR_LED_COUNT;
use crate::hal::GpioIndicatorLeds;
use crate::{AttentionBlinker, AttentionSignal, IndicatorLeds};

/// Attention Logic
///
/// Wartet auf das Signal; solange Attention an ist, wird alle
/// BLINK_PERIOD_MS die nächste LED gesetzt. Aus löscht alle LEDs.
pub async fn attention_logic<L: IndicatorLeds>(mut leds: L, signal: &'static AttentionSignal) {
    let mut blinker = AttentionBlinker::new(INDICATOR_LED_COUNT);
    leds.set_leds(NO_LEDS);

    loop {
        let active = signal.wait().await;
        info!("Attention: {}", if active { "on" } else { "off" });
        blinker.set(active);

        while blinker.step(&mut leds) {
            let period = Timer::after(Duration::from_millis(BLINK_PERIOD_MS));
            if let Either::Second(active) = select(period, signal.wait()).await {
                info!("Attention: {}", if active { "on" } else { "off" });
                blinker.set(active);
            }
        }
    }
}

#[embassy_executor::task]
pub async fn attention_task(leds: GpioIndicatorLeds<'static>, signal: &'static AttentionSignal) {
    attention_logic(leds, signal).await;
}
