//! Build script for softuart-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates link.toml at compile time
//! - Generates `link_config.rs` constants from link.toml

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Soft UART baud range, kept in step with `LinkConfig` in softuart-hal
const MIN_BAUDRATE: i64 = 300;
const MAX_BAUDRATE: i64 = 57_600;

/// Bank 0 GPIO count on RP2040
const GPIO_COUNT: i64 = 30;

/// GPIOs taken by the hardware bridge UART0
const BRIDGE_PINS: [i64; 2] = [0, 1];

/// Baud rates the bridge UART is allowed to run at
const BRIDGE_BAUDRATES: [i64; 8] = [9600, 19200, 38400, 57600, 115200, 230400, 460800, 921600];

/// Validated link.toml contents
struct LinkToml {
    baudrate: i64,
    rx_pin: i64,
    tx_pin: i64,
    rx_capacity: i64,
    tx_capacity: i64,
    bridge_baudrate: i64,
}

fn main() {
    setup_linker();
    let link = validate_config();
    generate_config(&link);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate link.toml configuration at compile time
fn validate_config() -> LinkToml {
    // Re-run if link.toml changes
    println!("cargo:rerun-if-changed=link.toml");

    let config_path = Path::new("link.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: link.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a link.toml configuration file.           ║\n\
            ║  Please create one in the softuart-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read link.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in link.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let baudrate = require_int(&config, "link", "baudrate", &mut errors);
    let rx_pin = require_int(&config, "pins", "rx", &mut errors);
    let tx_pin = require_int(&config, "pins", "tx", &mut errors);
    let rx_capacity = require_int(&config, "buffers", "rx_capacity", &mut errors);
    let tx_capacity = require_int(&config, "buffers", "tx_capacity", &mut errors);
    let bridge_baudrate = require_int(&config, "bridge", "baudrate", &mut errors);

    fail_if_any("Missing or mistyped fields in link.toml", &errors);

    let link = LinkToml {
        baudrate: baudrate.unwrap_or_default(),
        rx_pin: rx_pin.unwrap_or_default(),
        tx_pin: tx_pin.unwrap_or_default(),
        rx_capacity: rx_capacity.unwrap_or_default(),
        tx_capacity: tx_capacity.unwrap_or_default(),
        bridge_baudrate: bridge_baudrate.unwrap_or_default(),
    };

    validate_link(&link, &mut errors);
    validate_pins(&link, &mut errors);
    validate_buffers(&link, &mut errors);

    fail_if_any("Invalid link configuration", &errors);

    println!("cargo:warning=link.toml validated successfully");
    link
}

/// Look up an integer field, recording an error if it is absent
fn require_int(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) => Some(*value),
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            None
        }
    }
}

/// Validate baud rates
fn validate_link(link: &LinkToml, errors: &mut Vec<String>) {
    if link.baudrate < MIN_BAUDRATE || link.baudrate > MAX_BAUDRATE {
        errors.push(format!(
            "[link] baudrate must be {}-{}",
            MIN_BAUDRATE, MAX_BAUDRATE
        ));
    }

    if !BRIDGE_BAUDRATES.contains(&link.bridge_baudrate) {
        errors.push("[bridge] baudrate must be a standard rate 9600-921600".to_string());
    }
}

/// Validate pin assignments
fn validate_pins(link: &LinkToml, errors: &mut Vec<String>) {
    for (name, pin) in [("rx", link.rx_pin), ("tx", link.tx_pin)] {
        if pin < 0 || pin >= GPIO_COUNT {
            errors.push(format!("[pins] {} must be 0-{}", name, GPIO_COUNT - 1));
        }
        if BRIDGE_PINS.contains(&pin) {
            errors.push(format!("[pins] {} conflicts with the bridge UART (GPIO 0/1)", name));
        }
    }

    if link.rx_pin == link.tx_pin {
        errors.push("[pins] rx and tx must be different GPIOs".to_string());
    }
}

/// Validate ring buffer capacities
fn validate_buffers(link: &LinkToml, errors: &mut Vec<String>) {
    for (name, capacity) in [
        ("rx_capacity", link.rx_capacity),
        ("tx_capacity", link.tx_capacity),
    ] {
        if !(1..=1024).contains(&capacity) {
            errors.push(format!("[buffers] {} must be 1-1024", name));
        }
    }
}

/// Write `link_config.rs` into OUT_DIR
fn generate_config(link: &LinkToml) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("link_config.rs")).unwrap();

    write!(
        f,
        "// Generated by build.rs from link.toml. Do not edit.\n\
        \n\
        /// Soft UART baud rate\n\
        pub const SOFT_BAUDRATE: u32 = {baudrate};\n\
        /// Soft UART RX GPIO\n\
        pub const RX_PIN: u8 = {rx_pin};\n\
        /// Soft UART TX GPIO\n\
        pub const TX_PIN: u8 = {tx_pin};\n\
        /// RX ring capacity in bytes\n\
        pub const RX_CAPACITY: usize = {rx_capacity};\n\
        /// TX ring capacity in bytes\n\
        pub const TX_CAPACITY: usize = {tx_capacity};\n\
        /// Hardware bridge UART baud rate\n\
        pub const BRIDGE_BAUDRATE: u32 = {bridge_baudrate};\n\
        \n\
        /// Move the soft UART pins `(rx, tx)` out of the peripherals\n\
        macro_rules! take_link_pins {{\n\
            ($p:expr) => {{\n\
                ($p.PIN_{rx_pin}, $p.PIN_{tx_pin})\n\
            }};\n\
        }}\n",
        baudrate = link.baudrate,
        rx_pin = link.rx_pin,
        tx_pin = link.tx_pin,
        rx_capacity = link.rx_capacity,
        tx_capacity = link.tx_capacity,
        bridge_baudrate = link.bridge_baudrate,
    )
    .unwrap();
}

/// Panic with a boxed list of errors if there are any
fn fail_if_any(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
