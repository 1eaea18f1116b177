// Clock Task - Gibt Datum und Uhrzeit periodisch und auf Knopfdruck aus
use defmt::info;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Ticker};
use esp_hal::gpio::Input;
use light_core::CLOCK_PRINT_INTERVAL_SECS;

use crate::SharedClock;

/// Loggt die lokale Zeit, oder dass sie (noch) unbekannt ist
pub fn print_datetime(clock: &SharedClock) {
    let uptime_ms = Instant::now().as_millis();

    match clock.lock(|clock| clock.borrow().localtime(uptime_ms)) {
        Some(today) => {
            info!("{}", today.date_line().as_str());
            info!("{}", today.time_line().as_str());
        }
        // Noch keine Zeit-Synchronisation erhalten
        None => info!("Local time is not available"),
    }
}

/// Clock Task
///
/// - Alle CLOCK_PRINT_INTERVAL_SECS eine Ausgabe
/// - Zusätzliche Ausgabe bei jedem Druck auf den Boot-Button
#[embassy_executor::task]
pub async fn clock_task(mut button: Input<'static>, clock: &'static SharedClock) {
    let mut ticker = Ticker::every(Duration::from_secs(CLOCK_PRINT_INTERVAL_SECS));

    loop {
        match select(ticker.next(), button.wait_for_falling_edge()).await {
            Either::First(()) => {}
            Either::Second(()) => info!("Clock: button pressed"),
        }
        print_datetime(clock);
    }
}
