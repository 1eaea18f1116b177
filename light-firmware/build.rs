// Build-Script: Wird vor dem Kompilieren ausgeführt
// Backt die .env-Konfiguration ein und konfiguriert den Linker für ESP32-C6

/// Variablen die aus .env an den Compiler weitergereicht werden
const FORWARDED_ENV: [&str; 5] = [
    "WIFI_SSID",
    "WIFI_PASSWORD",
    "MQTT_BROKER",
    "MQTT_CLIENT_ID",
    "MQTT_TOPIC_PREFIX",
];

fn main() {
    // Fehler ignorieren wenn .env nicht existiert (dann müssen ENV vars gesetzt sein)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   Setze {} als Environment-Variablen", FORWARDED_ENV.join(", "));
    }

    for name in FORWARDED_ENV {
        println!("cargo:rerun-if-env-changed={}", name);
        if let Ok(value) = std::env::var(name) {
            println!("cargo:rustc-env={}={}", name, value);
        }
    }

    linker_be_nice();

    // defmt.x - Symbole für defmt's binäres Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // linkall.x - ESP32 Memory-Layout, muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Error-Handler: Zeigt Tipps bei Linker-Fehlern
// Wird vom Linker als "--error-handling-script" aufgerufen
fn linker_be_nice() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 {
        let kind = &args[1];
        let what = &args[2];

        if kind != "undefined-symbol" {
            std::process::exit(1);
        }

        let hint = match what.as_str() {
            what if what.starts_with("_defmt_") => Some(
                "`defmt` not found - make sure `defmt.x` is added as a linker script and you have included `use esp_println as _;`",
            ),
            "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
            what if what.starts_with("esp_rtos_") => Some(
                "`esp-radio` has no scheduler enabled. Make sure you have initialized `esp-rtos`.",
            ),
            "free" | "malloc" | "calloc" | "malloc_internal" | "free_internal" => {
                Some("Did you forget the `esp-alloc` dependency?")
            }
            _ => None,
        };

        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {}", hint);
            eprintln!();
        }

        std::process::exit(0);
    }

    if let Ok(exe) = std::env::current_exe() {
        println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        );
    }
}
