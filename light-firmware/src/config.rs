// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

// ============================================================================
// Licht-Ausgang
// ============================================================================

/// GPIO-Pin für den WS2812 Licht-Ausgang
pub const LIGHT_GPIO_PIN: u8 = 8;

/// Maximaler Kanalwert bei Level 65535
/// Gedimmt für Augenschonung
pub const LIGHT_MAX_BRIGHTNESS: u8 = 64;

/// Start-Helligkeit nach dem Boot (0..=65535)
pub const INITIAL_LIGHT_LEVEL: u16 = 0;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Kapazität des Kommando-Channels (MQTT → Lightness Task)
pub const COMMAND_QUEUE_SIZE: usize = 4;

// ============================================================================
// Indikator-LEDs, Button, Konsole
// ============================================================================

/// Anzahl der Indikator-LEDs für Attention (GPIO0..GPIO3)
pub const INDICATOR_LED_COUNT: usize = 4;

/// Boot-Button (GPIO9, active low) löst eine Zeit-Ausgabe aus
pub const BUTTON_GPIO_PIN: u8 = 9;

/// Board-Name für die Heartbeat-Ausgabe
pub const BOARD_NAME: &str = "esp32c6";

/// Heartbeat-Intervall in Millisekunden
pub const HEARTBEAT_INTERVAL_MS: u64 = 1000;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Heap-Größe für WiFi (Bytes)
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

/// Wartezeit nach einem WiFi-Fehler in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Anzahl Sockets im embassy-net Stack (MQTT + DNS)
pub const NET_SOCKET_COUNT: usize = 4;

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port (1883 unverschlüsselt)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Set-Kommandos: `{"level":..,"time_ms":..,"delay_ms":..}`
pub const MQTT_TOPIC_SET: &str = concat!(
    env!(
        "MQTT_TOPIC_PREFIX",
        "MQTT Topic Prefix nicht gesetzt! Erstelle .env file (siehe .env.example)"
    ),
    "/set"
);

/// Get-Kommandos (Payload wird ignoriert)
pub const MQTT_TOPIC_GET: &str = concat!(env!("MQTT_TOPIC_PREFIX"), "/get");

/// Attention an/aus (`on` / `off`)
pub const MQTT_TOPIC_ATTENTION: &str = concat!(env!("MQTT_TOPIC_PREFIX"), "/attention");

/// Zeit-Synchronisation: `{"unix_secs":..,"utc_offset_mins":..}`
pub const MQTT_TOPIC_TIME: &str = concat!(env!("MQTT_TOPIC_PREFIX"), "/time");

/// Status-Reports (Antworten und Publikationen)
pub const MQTT_TOPIC_STATUS: &str = concat!(env!("MQTT_TOPIC_PREFIX"), "/status");

/// Topic für Heartbeats (halten die Broker-Verbindung am Leben)
pub const MQTT_TOPIC_HEARTBEAT: &str = concat!(env!("MQTT_TOPIC_PREFIX"), "/heartbeat");

/// MQTT Reconnect Delay in Sekunden
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Keep-Alive in Sekunden (Heartbeat spätestens nach der Hälfte)
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// Abstand zwischen zwei Prüfungen auf eingehende Pakete
pub const MQTT_POLL_INTERVAL_MS: u64 = 50;

/// MQTT Buffer-Größe in Bytes
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// TCP Buffer-Größe (RX und TX) in Bytes
pub const TCP_BUFFER_SIZE: usize = 4096;

/// JSON-Buffer für Status-Reports
/// Für {"current":65535,"target":65535,"remaining_ms":4294967295}
pub const JSON_STATUS_BUFFER_SIZE: usize = 64;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;
