// MQTT Task - Nimmt Steuer-Kommandos entgegen und published Status-Reports
use defmt::{Debug2Format, error, info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Instant, Timer, with_timeout};
use light_core::KeepAlive;
use light_core::protocol::{ControlMessage, ControlTopics, encode_heartbeat, encode_status};

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use crate::config::*;
use crate::{AttentionSignal, LightCommandSender, SharedClock, StatusEvent, StatusEventSubscriber};

/// Eingehende Topics
const TOPICS: ControlTopics<'static> = ControlTopics {
    set: MQTT_TOPIC_SET,
    get: MQTT_TOPIC_GET,
    attention: MQTT_TOPIC_ATTENTION,
    time: MQTT_TOPIC_TIME,
};

/// Verbindungen zu den anderen Tasks
pub struct MqttLinks {
    pub command_sender: LightCommandSender,
    pub status_subscriber: StatusEventSubscriber,
    pub attention: &'static AttentionSignal,
    pub clock: &'static SharedClock,
}

/// MQTT Client über einen embassy-net TCP Socket
type Client<'a, 's> = MqttClient<'a, TcpSocket<'s>, 5, CountingRng>;

/// MQTT Task - läuft parallel zu anderen Tasks
///
/// - Wartet auf Netzwerk-Verbindung
/// - Verbindet sich mit MQTT Broker und abonniert die Steuer-Topics
/// - Leitet Set/Get an den Lightness Task, Attention und Zeit weiter
/// - Published Status-Reports **sofort** (event-basiert) und Heartbeats
/// - Automatisches Reconnect bei Fehlern
#[embassy_executor::task]
pub async fn mqtt_task(stack: &'static Stack<'static>, mut links: MqttLinks) {
    info!("MQTT: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("MQTT: Network ready");

    loop {
        match mqtt_connect_and_serve(stack, &mut links).await {
            Ok(_) => warn!("MQTT: Connection closed normally"),
            Err(e) => error!("MQTT: Error: {}", e),
        }
        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Wartet bis Link und IP-Konfiguration stehen
async fn wait_for_network(stack: &'static Stack<'static>) {
    stack.wait_link_up().await;
    stack.wait_config_up().await;
}

/// Verbindet mit dem Broker und bedient Kommandos und Status-Reports
///
/// Bei jedem Fehler wird die Funktion beendet und der Haupt-Loop
/// startet automatisch einen Reconnect-Versuch.
async fn mqtt_connect_and_serve(
    stack: &'static Stack<'static>,
    links: &mut MqttLinks,
) -> Result<(), MqttError> {
    info!("MQTT: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = resolve_hostname(stack, MQTT_BROKER).await?;
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    let mut rx_buffer = [0u8; TCP_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_BUFFER_SIZE];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(u64::from(MQTT_KEEP_ALIVE_SECS) * 2)));

    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected");

    let rng = CountingRng(20000);
    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];

    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    client
        .connect_to_broker()
        .await
        .map_err(|_| MqttError::ProtocolError)?;
    info!("MQTT: Connected to broker");

    for topic in [TOPICS.set, TOPICS.get, TOPICS.attention, TOPICS.time] {
        client
            .subscribe_to_topic(topic)
            .await
            .map_err(|_| MqttError::SubscribeFailed)?;
        info!("MQTT: Subscribed to '{}'", topic);
    }

    let mut keep_alive = KeepAlive::new(
        u64::from(MQTT_KEEP_ALIVE_SECS) * 1000 / 2,
        Instant::now().as_millis(),
    );

    loop {
        // 1. Eingehend: nur lesen wenn Daten anliegen, dann bis zum Ende des
        //    Pakets. Ein abgebrochenes Lesen würde den Stream zerstören.
        //    Die Payload leiht den Client-Buffer und wird sofort geparst.
        let control = match client.receive_message_if_ready().await {
            Ok(Some((topic, payload))) => Some(TOPICS.parse(topic, payload)),
            Ok(None) => None,
            Err(_) => return Err(MqttError::ReceiveFailed),
        };

        match control {
            Some(Ok(message)) => {
                dispatch(message, links).await;
                continue;
            }
            Some(Err(e)) => {
                warn!("MQTT: Dropping message: {}", e);
                continue;
            }
            None => {}
        }

        // 2. Ausgehend: anstehender Status-Report oder fälliger Heartbeat
        let now_ms = Instant::now().as_millis();
        if let Some(event) = links.status_subscriber.try_next_message_pure() {
            publish_status(&mut client, event).await?;
            keep_alive.record_sent(now_ms);
            continue;
        }
        if keep_alive.is_due(now_ms) {
            publish_heartbeat(&mut client, now_ms / 1000).await?;
            keep_alive.record_sent(now_ms);
            continue;
        }

        // 3. Leerlauf: der Client ist hier nicht beteiligt, nur der
        //    Subscriber (cancel-safe) und ein Timer bis zum nächsten Poll
        let wake = Instant::from_millis(keep_alive.next_wake_ms(now_ms, MQTT_POLL_INTERVAL_MS));
        if let Either::First(event) =
            select(links.status_subscriber.next_message_pure(), Timer::at(wake)).await
        {
            publish_status(&mut client, event).await?;
            keep_alive.record_sent(Instant::now().as_millis());
        }
    }
}

/// Published einen Status-Report (QoS0, ohne Antwort vom Broker)
async fn publish_status(client: &mut Client<'_, '_>, event: StatusEvent) -> Result<(), MqttError> {
    let mut json_buffer = [0u8; JSON_STATUS_BUFFER_SIZE];
    let n = encode_status(&event.status(), &mut json_buffer).map_err(|_| MqttError::EncodeFailed)?;

    client
        .send_message(MQTT_TOPIC_STATUS, &json_buffer[..n], QualityOfService::QoS0, false)
        .await
        .map_err(|_| MqttError::PublishFailed)?;

    info!("MQTT: Published {}", event);
    Ok(())
}

/// Published einen Heartbeat
///
/// Ersetzt PINGREQ: `send_ping` wartet auf PINGRESP und verwirft dabei
/// eine dazwischen eintreffende PUBLISH-Nachricht.
async fn publish_heartbeat(client: &mut Client<'_, '_>, uptime_secs: u64) -> Result<(), MqttError> {
    let mut json_buffer = [0u8; JSON_STATUS_BUFFER_SIZE];
    let n = encode_heartbeat(uptime_secs, &mut json_buffer).map_err(|_| MqttError::EncodeFailed)?;

    client
        .send_message(MQTT_TOPIC_HEARTBEAT, &json_buffer[..n], QualityOfService::QoS0, false)
        .await
        .map_err(|_| MqttError::HeartbeatFailed)?;

    info!("MQTT: Heartbeat (uptime {}s)", uptime_secs);
    Ok(())
}

/// Leitet eine geparste Nachricht an den zuständigen Task weiter
async fn dispatch(message: ControlMessage, links: &MqttLinks) {
    match message {
        ControlMessage::Light(command) => {
            info!("MQTT: Forwarding {}", command);
            links.command_sender.send(command).await;
        }
        ControlMessage::Attention(active) => {
            links.attention.signal(active);
        }
        ControlMessage::Time(sync) => {
            let uptime_ms = Instant::now().as_millis();
            links.clock.lock(|clock| {
                clock
                    .borrow_mut()
                    .sync(sync.unix_secs, sync.utc_offset_mins, uptime_ms)
            });
            info!(
                "MQTT: Clock synced to {} (offset {} min)",
                sync.unix_secs, sync.utc_offset_mins
            );
        }
    }
}

/// Löst Hostname zu IPv4-Adresse auf
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(ipv4) => Some(*ipv4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(MqttError::DnsResolutionFailed),
        Ok(Err(_)) => Err(MqttError::DnsResolutionFailed),
        Err(_) => Err(MqttError::DnsTimeout),
    }
}

/// MQTT Fehler-Typen
#[derive(Debug)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    SubscribeFailed,
    ReceiveFailed,
    EncodeFailed,
    PublishFailed,
    HeartbeatFailed,
}

impl defmt::Format for MqttError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MqttError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            MqttError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            MqttError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            MqttError::ProtocolError => defmt::write!(fmt, "Protocol error"),
            MqttError::SubscribeFailed => defmt::write!(fmt, "Subscribe failed"),
            MqttError::ReceiveFailed => defmt::write!(fmt, "Receive failed"),
            MqttError::EncodeFailed => defmt::write!(fmt, "Status encoding failed"),
            MqttError::PublishFailed => defmt::write!(fmt, "Publish failed"),
            MqttError::HeartbeatFailed => defmt::write!(fmt, "Heartbeat failed"),
        }
    }
}
