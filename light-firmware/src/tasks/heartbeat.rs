// Heartbeat Task - Lebenszeichen auf der Konsole
use defmt::info;
use embassy_time::{Duration, Ticker};

use crate::config::{BOARD_NAME, HEARTBEAT_INTERVAL_MS};

#[embassy_executor::task]
pub async fn heartbeat_task() {
    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_INTERVAL_MS));
    loop {
        info!("Hello World! {}", BOARD_NAME);
        ticker.next().await;
    }
}
