// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels und Signals
// (MQTT → Lightness/Attention/Clock, Lightness → MQTT).

pub mod attention;
pub mod clock;
pub mod heartbeat;
pub mod lightness;
pub mod mqtt;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use attention::attention_task;
pub use clock::clock_task;
pub use heartbeat::heartbeat_task;
pub use lightness::lightness_task;
pub use mqtt::mqtt_task;
pub use wifi::{connection_task, dhcp_task, net_task};
