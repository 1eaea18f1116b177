// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von light-core
pub use light_core::{
    AttentionBlinker, IndicatorLeds, LightCommand, LightOutput, LightnessServer, LightnessSet,
    LightnessStatus, LocalClock, OutputError, StatusEvent, StatusPublisher,
};

use core::cell::RefCell;

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::pubsub::{ImmediatePublisher, PubSubChannel, Subscriber};
use embassy_sync::signal::Signal;

use crate::config::COMMAND_QUEUE_SIZE;

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Statt:  ImmediatePublisher<'static, NoopRawMutex, StatusEvent, 4, 2, 1>
// Nutze:  StatusEventPublisher

/// Channel für Licht-Kommandos (MQTT → Lightness Task)
pub type LightCommandChannel = Channel<NoopRawMutex, LightCommand, COMMAND_QUEUE_SIZE>;

/// Sender für Licht-Kommandos
pub type LightCommandSender = Sender<'static, NoopRawMutex, LightCommand, COMMAND_QUEUE_SIZE>;

/// Receiver für Licht-Kommandos (Lightness Task empfängt)
pub type LightCommandReceiver = Receiver<'static, NoopRawMutex, LightCommand, COMMAND_QUEUE_SIZE>;

/// PubSubChannel für Status-Events (Lightness Task → MQTT)
/// - 4: Nachrichten-Kapazität im Queue
/// - 2: Maximale Anzahl Subscribers
/// - 1: Publisher-Slots (der Lightness Task nutzt ImmediatePublisher)
pub type StatusEventChannel = PubSubChannel<NoopRawMutex, StatusEvent, 4, 2, 1>;

/// Publisher für Status-Events, blockiert nie
pub type StatusEventPublisher = ImmediatePublisher<'static, NoopRawMutex, StatusEvent, 4, 2, 1>;

/// Subscriber für Status-Events
pub type StatusEventSubscriber = Subscriber<'static, NoopRawMutex, StatusEvent, 4, 2, 1>;

/// Attention an/aus (MQTT → Attention Task)
pub type AttentionSignal = Signal<NoopRawMutex, bool>;

/// Geteilte Wanduhr (MQTT setzt, Clock Task liest)
pub type SharedClock = Mutex<NoopRawMutex, RefCell<LocalClock>>;
