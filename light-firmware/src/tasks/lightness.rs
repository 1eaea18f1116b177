// Lightness Task - Führt Helligkeits-Rampen auf dem WS2812 Ausgang aus
use defmt::{error, info};
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Timer};
use esp_hal_smartled::smart_led_buffer;
use light_core::{TickHandle, TickSchedule};

use crate::config::{INITIAL_LIGHT_LEVEL, RMT_CLOCK_MHZ};
use crate::hal::RmtLightOutput;
use crate::{
    LightCommand, LightCommandReceiver, LightOutput, LightnessServer, LightnessStatus,
    StatusEvent, StatusEventChannel, StatusEventPublisher, StatusPublisher,
};

/// Leitet abgeschlossene Rampen als `StatusEvent::Published` weiter
struct ChannelStatusPublisher {
    publisher: StatusEventPublisher,
}

impl StatusPublisher for ChannelStatusPublisher {
    fn publish(&mut self, status: LightnessStatus) {
        self.publisher
            .publish_immediate(StatusEvent::Published(status));
    }
}

/// Ereignis im Lightness-Loop
enum LightEvent {
    Tick(TickHandle),
    Command(LightCommand),
}

/// Lightness Logic - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// - Empfängt Set/Get-Kommandos vom MQTT-Task
/// - Wartet auf den Deadline des einzigen ausstehenden Ticks
/// - Ein neues Set ersetzt den ausstehenden Tick (last-writer-wins)
/// - Antworten und Publikationen gehen über den Status-Channel
///
/// # Parameter
/// - `output`: Licht-Ausgang (Hardware oder Mock)
/// - `status_channel`: PubSub Channel für Status-Events
/// - `command_receiver`: Channel Receiver für Kommandos
pub async fn lightness_logic<O: LightOutput>(
    output: O,
    status_channel: &'static StatusEventChannel,
    command_receiver: LightCommandReceiver,
) {
    let mut server = LightnessServer::new(
        INITIAL_LIGHT_LEVEL,
        output,
        ChannelStatusPublisher {
            publisher: status_channel.immediate_publisher(),
        },
    );
    let responder = status_channel.immediate_publisher();

    // Höchstens ein Tick steht aus: (Handle, Deadline)
    let mut pending: Option<(TickHandle, Instant)> = None;

    info!("Light: started at lvl {}/65535", INITIAL_LIGHT_LEVEL);

    loop {
        let event = match pending {
            Some((handle, deadline)) => {
                match select(Timer::at(deadline), command_receiver.receive()).await {
                    Either::First(()) => LightEvent::Tick(handle),
                    Either::Second(command) => LightEvent::Command(command),
                }
            }
            None => LightEvent::Command(command_receiver.receive().await),
        };

        match event {
            LightEvent::Tick(handle) => {
                pending = server.tick(handle).map(arm);
                info!("Current light lvl: {}/65535", server.get().current);
                if pending.is_none() {
                    info!("Light: transition complete");
                }
            }
            LightEvent::Command(LightCommand::Set(set)) => {
                info!(
                    "New light transition-> Lvl: {}, Time: {}, Delay: {}",
                    set.level,
                    set.time_ms(),
                    set.delay_ms()
                );
                let (response, schedule) = server.set(set);
                pending = Some(arm(schedule));
                responder.publish_immediate(StatusEvent::Response(response));
            }
            LightEvent::Command(LightCommand::Get) => {
                let status = server.get();
                info!("Light: get -> {}", status);
                responder.publish_immediate(StatusEvent::Response(status));
            }
        }
    }
}

/// Rechnet einen TickSchedule in eine absolute Deadline um
fn arm(schedule: TickSchedule) -> (TickHandle, Instant) {
    let deadline = Instant::now() + Duration::from_millis(u64::from(schedule.delay_ms));
    (schedule.handle, deadline)
}

/// Lightness Task - Embassy Task für parallele Ausführung
///
/// Übernimmt die Hardware-Initialisierung und ruft dann die testbare
/// `lightness_logic()` Funktion auf.
#[embassy_executor::task]
pub async fn lightness_task(
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    status_channel: &'static StatusEventChannel,
    command_receiver: LightCommandReceiver,
) {
    // Buffer für SmartLED Daten (1 LED)
    let mut rmt_buffer = smart_led_buffer!(1);

    let output = match RmtLightOutput::new(gpio8, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer)
    {
        Ok(output) => output,
        Err(e) => {
            error!("Light: failed to initialize RMT output: {}", e);
            return;
        }
    };

    lightness_logic(output, status_channel, command_receiver).await;
}
