//! Build script for unoio-firmware
//!
//! - Validates board.toml at compile time
//! - Generates the board constants included by `src/main.rs`

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Highest routable board pin (A5)
const MAX_PIN: i64 = 19;
/// Must match `unoio_core::config::MAX_LEDS`
const MAX_LEDS: usize = 16;
/// Must match `unoio_core::config::MAX_BUTTONS`
const MAX_BUTTONS: usize = 8;

struct Board {
    cpu_hz: u32,
    blink_speed_ms: u32,
    led_pins: Vec<u8>,
    button_pins: Vec<u8>,
}

fn main() {
    println!("cargo:rerun-if-changed=board.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let board = validate_config(Path::new("board.toml"));
    generate(&board);

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(errors: &[String]) -> String {
    errors
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(errors)
    );
}

/// Parse and validate board.toml
fn validate_config(path: &Path) -> Board {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in board.toml", &lines)
        }
    };

    let mut errors = Vec::new();

    let cpu_hz = positive_u32(&config, "cpu_hz", 16_000_000, &mut errors);
    let blink_speed_ms = positive_u32(&config, "blink_speed_ms", 100, &mut errors);
    let led_pins = pin_list(&config, "led_pins", MAX_LEDS, &mut errors);
    let button_pins = pin_list(&config, "button_pins", MAX_BUTTONS, &mut errors);

    if led_pins.is_empty() {
        errors.push("'led_pins' must name at least one pin".to_string());
    }

    // A pin can only belong to one device
    let mut seen = Vec::new();
    for pin in led_pins.iter().chain(button_pins.iter()) {
        if seen.contains(pin) {
            errors.push(format!("pin {} is assigned more than once", pin));
        }
        seen.push(*pin);
    }

    if !errors.is_empty() {
        fail("Invalid board.toml", &errors);
    }

    Board {
        cpu_hz,
        blink_speed_ms,
        led_pins,
        button_pins,
    }
}

fn positive_u32(config: &toml::Value, key: &str, default: u32, errors: &mut Vec<String>) -> u32 {
    match config.get(key) {
        None => default,
        Some(toml::Value::Integer(v)) if *v > 0 && *v <= i64::from(u32::MAX) => *v as u32,
        Some(_) => {
            errors.push(format!("'{}' must be a positive integer", key));
            default
        }
    }
}

fn pin_list(config: &toml::Value, key: &str, max: usize, errors: &mut Vec<String>) -> Vec<u8> {
    let items = match config.get(key) {
        Some(toml::Value::Array(items)) => items,
        Some(_) => {
            errors.push(format!("'{}' must be an array of pin numbers", key));
            return Vec::new();
        }
        None => {
            errors.push(format!("missing '{}'", key));
            return Vec::new();
        }
    };

    if items.len() > max {
        errors.push(format!("'{}' holds at most {} pins", key, max));
    }

    let mut pins = Vec::new();
    for item in items {
        match item {
            toml::Value::Integer(pin) if (0..=MAX_PIN).contains(pin) => pins.push(*pin as u8),
            toml::Value::Integer(pin) => {
                errors.push(format!("'{}': pin {} is not 0-{}", key, pin, MAX_PIN));
            }
            _ => errors.push(format!("'{}': pins must be integers", key)),
        }
    }
    pins.truncate(max);
    pins
}

/// Write the board constants to OUT_DIR/board.rs
fn generate(board: &Board) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    let list = |pins: &[u8]| {
        pins.iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let code = format!(
        "// Generated from board.toml by build.rs\n\
         pub const CPU_HZ: u32 = {};\n\
         pub const BLINK_SPEED_MS: u32 = {};\n\
         pub const LED_PINS: &[u8] = &[{}];\n\
         pub const BUTTON_PINS: &[u8] = &[{}];\n",
        board.cpu_hz,
        board.blink_speed_ms,
        list(&board.led_pins),
        list(&board.button_pins),
    );

    fs::write(out_dir.join("board.rs"), code).expect("failed to write board.rs");
}
