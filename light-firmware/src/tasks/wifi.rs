// WiFi Tasks - Station-Modus, Netzwerk-Stack und DHCP
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{
    ClientConfig, ModeConfig, WifiController, WifiDevice, WifiError, WifiEvent,
};

use crate::config::{WIFI_PASSWORD, WIFI_RETRY_DELAY_SECS, WIFI_SSID};

/// Schritt, an dem der Verbindungsaufbau gescheitert ist
#[derive(Debug, Clone, Copy)]
enum LinkStage {
    Configure,
    Start,
    Associate,
}

impl defmt::Format for LinkStage {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LinkStage::Configure => defmt::write!(fmt, "configure"),
            LinkStage::Start => defmt::write!(fmt, "start"),
            LinkStage::Associate => defmt::write!(fmt, "associate"),
        }
    }
}

/// Station-Konfiguration aus den Build-Zeit Credentials
fn station_config() -> ModeConfig {
    ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(WIFI_SSID.into())
            .with_password(WIFI_PASSWORD.into()),
    )
}

/// Startet den Radio-Treiber (falls nötig) und verbindet mit dem AP
async fn associate(
    controller: &mut WifiController<'static>,
) -> Result<(), (LinkStage, WifiError)> {
    // Nach einem Disconnect läuft der Treiber weiter, nur neu verbinden
    if matches!(controller.is_started(), Ok(false)) {
        controller
            .set_config(&station_config())
            .map_err(|e| (LinkStage::Configure, e))?;
        controller
            .start_async()
            .await
            .map_err(|e| (LinkStage::Start, e))?;
        info!("WiFi: Radio started in station mode");
    }

    controller
        .connect_async()
        .await
        .map_err(|e| (LinkStage::Associate, e))
}

/// WiFi Connection Task
///
/// Hält die Station-Verbindung zum AP aufrecht. Jeder Fehlschlag und jeder
/// Disconnect führt nach `WIFI_RETRY_DELAY_SECS` zu einem neuen Versuch.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    let mut attempt: u32 = 0;

    loop {
        attempt = attempt.wrapping_add(1);
        info!("WiFi: Associating with '{}' (attempt {})", WIFI_SSID, attempt);

        match associate(&mut controller).await {
            Ok(()) => {
                info!("WiFi: Associated with '{}'", WIFI_SSID);
                attempt = 0;
                controller.wait_for_event(WifiEvent::StaDisconnected).await;
                warn!("WiFi: Lost association");
            }
            Err((stage, e)) => {
                error!("WiFi: Failed to {}: {}", stage, Debug2Format(&e));
            }
        }

        Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
    }
}

/// Network Task - treibt den embassy-net Stack (Pakete, Timer, Sockets)
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Task
///
/// Meldet die per DHCP bezogene Konfiguration. Wartet dazu auf den Stack
/// statt ihn zu pollen.
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    stack.wait_link_up().await;
    info!("WiFi: Link up, requesting DHCP lease");

    stack.wait_config_up().await;
    match stack.config_v4() {
        Some(lease) => info!(
            "WiFi: Lease {} via {} (DNS {})",
            Debug2Format(&lease.address),
            Debug2Format(&lease.gateway),
            Debug2Format(&lease.dns_servers)
        ),
        None => warn!("WiFi: Stack is up without an IPv4 configuration"),
    }
}
