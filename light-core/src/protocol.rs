//! Steuer-Protokoll (JSON über MQTT)
//!
//! Definiert die Nachrichten für Broker ↔ Gerät Kommunikation.
//! Nur mit Feature `serde` verfügbar.
//!
//! Hinweis: einfache Structs mit optionalen Feldern für
//! serde-json-core Kompatibilität

use serde::{Deserialize, Serialize};

use crate::types::{LightCommand, LightnessSet, LightnessStatus, Transition};

/// Fehler beim Parsen oder Serialisieren von Nachrichten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    InvalidJson,
    BufferTooSmall,
    UnknownValue,
    UnknownTopic,
}

/// Set-Payload: `{"level":2048,"time_ms":1000,"delay_ms":0}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
struct SetPayload {
    level: u16,
    #[serde(default)]
    time_ms: Option<u32>,
    #[serde(default)]
    delay_ms: Option<u32>,
}

/// Status-Payload: `{"current":..,"target":..,"remaining_ms":..}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct StatusPayload {
    current: u16,
    target: u16,
    remaining_ms: u32,
}

/// Heartbeat-Payload: `{"uptime_secs":..}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct HeartbeatPayload {
    uptime_secs: u64,
}

/// Zeit-Synchronisation: `{"unix_secs":..,"utc_offset_mins":..}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimeSync {
    pub unix_secs: i64,
    #[serde(default)]
    pub utc_offset_mins: i16,
}

/// Geparste eingehende Nachricht
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    Light(LightCommand),
    Attention(bool),
    Time(TimeSync),
}

/// Topic-Zuordnung für eingehende Nachrichten
#[derive(Debug, Clone, Copy)]
pub struct ControlTopics<'a> {
    pub set: &'a str,
    pub get: &'a str,
    pub attention: &'a str,
    pub time: &'a str,
}

impl ControlTopics<'_> {
    /// Ordnet `topic` zu und parst `payload`
    pub fn parse(&self, topic: &str, payload: &[u8]) -> Result<ControlMessage, ProtocolError> {
        if topic == self.set {
            parse_set(payload).map(|set| ControlMessage::Light(LightCommand::Set(set)))
        } else if topic == self.get {
            Ok(ControlMessage::Light(LightCommand::Get))
        } else if topic == self.attention {
            parse_attention(payload).map(ControlMessage::Attention)
        } else if topic == self.time {
            parse_time(payload).map(ControlMessage::Time)
        } else {
            Err(ProtocolError::UnknownTopic)
        }
    }
}

/// Parst eine Set-Anfrage
///
/// Fehlen `time_ms` und `delay_ms`, gibt es keinen Übergang (Sofort-Sprung).
pub fn parse_set(payload: &[u8]) -> Result<LightnessSet, ProtocolError> {
    let (msg, _) = serde_json_core::from_slice::<SetPayload>(payload)
        .map_err(|_| ProtocolError::InvalidJson)?;

    let transition = match (msg.time_ms, msg.delay_ms) {
        (None, None) => None,
        (time_ms, delay_ms) => Some(Transition {
            time_ms: time_ms.unwrap_or(0),
            delay_ms: delay_ms.unwrap_or(0),
        }),
    };

    Ok(LightnessSet {
        level: msg.level,
        transition,
    })
}

/// Parst `on`/`off` (auch `true`/`false`, `1`/`0`, optional in Anführungszeichen)
pub fn parse_attention(payload: &[u8]) -> Result<bool, ProtocolError> {
    let value = payload.trim_ascii();
    let value = value
        .strip_prefix(b"\"")
        .and_then(|v| v.strip_suffix(b"\""))
        .unwrap_or(value);

    match value {
        b"on" | b"true" | b"1" => Ok(true),
        b"off" | b"false" | b"0" => Ok(false),
        _ => Err(ProtocolError::UnknownValue),
    }
}

/// Parst eine Zeit-Synchronisation
pub fn parse_time(payload: &[u8]) -> Result<TimeSync, ProtocolError> {
    serde_json_core::from_slice::<TimeSync>(payload)
        .map(|(sync, _)| sync)
        .map_err(|_| ProtocolError::InvalidJson)
}

/// Serialisiert einen Status-Report, gibt die Länge zurück
pub fn encode_status(status: &LightnessStatus, buf: &mut [u8]) -> Result<usize, ProtocolError> {
    let payload = StatusPayload {
        current: status.current,
        target: status.target,
        remaining_ms: status.remaining_ms,
    };
    serde_json_core::to_slice(&payload, buf).map_err(|_| ProtocolError::BufferTooSmall)
}

/// Serialisiert einen Heartbeat, gibt die Länge zurück
pub fn encode_heartbeat(uptime_secs: u64, buf: &mut [u8]) -> Result<usize, ProtocolError> {
    serde_json_core::to_slice(&HeartbeatPayload { uptime_secs }, buf)
        .map_err(|_| ProtocolError::BufferTooSmall)
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProtocolError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ProtocolError::InvalidJson => defmt::write!(fmt, "Invalid JSON"),
            ProtocolError::BufferTooSmall => defmt::write!(fmt, "Buffer too small"),
            ProtocolError::UnknownValue => defmt::write!(fmt, "Unknown value"),
            ProtocolError::UnknownTopic => defmt::write!(fmt, "Unknown topic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_without_transition() {
        let set = parse_set(br#"{"level":300}"#).unwrap();
        assert_eq!(set, LightnessSet::instant(300));
    }

    #[test]
    fn test_parse_attention_quoted() {
        assert_eq!(parse_attention(b"\"on\"\n"), Ok(true));
    }
}
