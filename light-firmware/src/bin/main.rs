// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

use core::cell::RefCell;

use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;

use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

use esp_light_ctrl::config::{EXTRA_HEAP_SIZE, NET_SOCKET_COUNT, WIFI_HEAP_SIZE};
use esp_light_ctrl::hal::GpioIndicatorLeds;
use esp_light_ctrl::tasks::mqtt::MqttLinks;
use esp_light_ctrl::tasks::{
    attention_task, clock_task, connection_task, dhcp_task, heartbeat_task, lightness_task,
    mqtt_task, net_task,
};
use esp_light_ctrl::{
    AttentionSignal, LightCommandChannel, LocalClock, SharedClock, StatusEventChannel,
};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Zwei Heap-Bereiche: reclaimed RAM (64 KB) + extra (36 KB)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // ------------------------------------------------------------------------
    // Licht, Attention, Uhr
    // ------------------------------------------------------------------------

    static COMMAND_CHANNEL: StaticCell<LightCommandChannel> = StaticCell::new();
    let command_channel = &*COMMAND_CHANNEL.init(LightCommandChannel::new());

    static STATUS_CHANNEL: StaticCell<StatusEventChannel> = StaticCell::new();
    let status_channel = &*STATUS_CHANNEL.init(StatusEventChannel::new());

    static ATTENTION: StaticCell<AttentionSignal> = StaticCell::new();
    let attention = &*ATTENTION.init(AttentionSignal::new());

    static CLOCK: StaticCell<SharedClock> = StaticCell::new();
    let clock = &*CLOCK.init(Mutex::new(RefCell::new(LocalClock::new())));

    spawner
        .spawn(lightness_task(
            peripherals.GPIO8,
            peripherals.RMT,
            status_channel,
            command_channel.receiver(),
        ))
        .unwrap();

    let indicator_leds = GpioIndicatorLeds::new([
        Output::new(peripherals.GPIO0, Level::Low, OutputConfig::default()),
        Output::new(peripherals.GPIO1, Level::Low, OutputConfig::default()),
        Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default()),
        Output::new(peripherals.GPIO3, Level::Low, OutputConfig::default()),
    ]);
    spawner
        .spawn(attention_task(indicator_leds, attention))
        .unwrap();

    // Boot-Button ist active low
    let button = Input::new(
        peripherals.GPIO9,
        InputConfig::default().with_pull(Pull::Up),
    );
    spawner.spawn(clock_task(button, clock)).unwrap();

    spawner.spawn(heartbeat_task()).unwrap();

    // ------------------------------------------------------------------------
    // WiFi + MQTT
    // ------------------------------------------------------------------------

    static RADIO_INIT: StaticCell<esp_radio::Controller> = StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    static RESOURCES: StaticCell<StackResources<NET_SOCKET_COUNT>> = StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    static STACK: StaticCell<Stack<'static>> = StaticCell::new();
    let stack = &*STACK.init(stack);

    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    let links = MqttLinks {
        command_sender: command_channel.sender(),
        status_subscriber: status_channel.subscriber().unwrap(),
        attention,
        clock,
    };
    spawner.spawn(mqtt_task(stack, links)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
