//! Build script for quartz-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates stopwatch.toml at compile time
//! - Generates board constants and the pin-taking macro

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use quartz_core::config::{ButtonPolarity, DisplayGeometry, StopwatchConfig};
use quartz_core::{DebounceConfig, Timebase};

fn main() {
    setup_linker();
    let board = load_board();
    generate_board_config(&board);
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

/// Validated board description
struct Board {
    config: StopwatchConfig,
    /// Pin role -> GPIO number, in declaration order of `PIN_ROLES`
    pins: Vec<(&'static str, u8)>,
    pwm_slice: u8,
    divider: u8,
}

/// Pin roles: (section, key, BoardPins field)
const PIN_ROLES: [(&str, &str, &str); 9] = [
    ("lcd", "rs", "lcd_rs"),
    ("lcd", "rw", "lcd_rw"),
    ("lcd", "en", "lcd_en"),
    ("lcd", "d4", "lcd_d4"),
    ("lcd", "d5", "lcd_d5"),
    ("lcd", "d6", "lcd_d6"),
    ("lcd", "d7", "lcd_d7"),
    ("buttons", "start_stop", "start_stop"),
    ("buttons", "reset", "reset"),
];

/// Read and validate stopwatch.toml
fn load_board() -> Board {
    // Re-run if stopwatch.toml changes
    println!("cargo:rerun-if-changed=stopwatch.toml");

    let config_path = Path::new("stopwatch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: stopwatch.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a stopwatch.toml board file.              ║\n\
            ║  Please create one in the quartz-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read stopwatch.toml                            ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let value: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in stopwatch.toml                    ║\n\
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
    let board = parse_board(&value, &mut errors);

    if let Some(board) = &board {
        if let Err(e) = board.config.validate() {
            errors.push(format!("configuration rejected: {:?}", e));
        }
    }

    if !errors.is_empty() {
        fail("Invalid board configuration", &errors);
    }

    println!("cargo:warning=stopwatch.toml validated successfully");
    // Errors were checked above, so a board was parsed
    board.unwrap()
}

fn parse_board(value: &toml::Value, errors: &mut Vec<String>) -> Option<Board> {
    for section in ["lcd", "buttons", "timer", "debounce"] {
        if value.get(section).and_then(|s| s.as_table()).is_none() {
            errors.push(format!("Missing [{}] section", section));
        }
    }
    if !errors.is_empty() {
        return None;
    }

    let mut pins = Vec::new();
    let mut used: BTreeMap<u8, &str> = BTreeMap::new();
    for (section, key, field) in PIN_ROLES {
        let gpio = int(value, section, key, 0, 29, errors) as u8;
        if let Some(other) = used.insert(gpio, field) {
            errors.push(format!("gpio{} used for both {} and {}", gpio, other, field));
        }
        pins.push((field, gpio));
    }

    let polarity = match value["buttons"].get("polarity").and_then(|p| p.as_str()) {
        None | Some("active_low") => ButtonPolarity::ActiveLow,
        Some("active_high") => ButtonPolarity::ActiveHigh,
        Some(other) => {
            errors.push(format!(
                "[buttons] polarity must be 'active_low' or 'active_high', not '{}'",
                other
            ));
            ButtonPolarity::ActiveLow
        }
    };

    let divider = int(value, "timer", "divider", 1, 255, errors) as u8;
    let clock_hz = int(value, "timer", "clock_hz", 1, u32::MAX as i64, errors) as u32;

    let config = StopwatchConfig {
        timebase: Timebase {
            clock_hz,
            cycles_per_tick: 1,
            prescale: u32::from(divider),
            counter_bits: 16,
        },
        debounce: DebounceConfig {
            sample_interval_us: int(value, "debounce", "sample_interval_us", 1, 100_000, errors)
                as u32,
            stable_samples: int(value, "debounce", "stable_samples", 1, 255, errors) as u8,
            max_samples: int(value, "debounce", "max_samples", 1, 65_535, errors) as u16,
        },
        display: DisplayGeometry {
            cols: int(value, "lcd", "cols", 1, 40, errors) as u8,
            rows: int(value, "lcd", "rows", 1, 2, errors) as u8,
        },
        polarity,
    };

    Some(Board {
        config,
        pins,
        pwm_slice: int(value, "timer", "pwm_slice", 0, 7, errors) as u8,
        divider,
    })
}

/// Read an integer in `min..=max`, recording an error otherwise
fn int(
    value: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match value[section].get(key) {
        Some(toml::Value::Integer(n)) if (min..=max).contains(n) => *n,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

/// Write board_config.rs into OUT_DIR
fn generate_board_config(board: &Board) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let c = &board.config;

    let mut code = String::new();
    code.push_str("// Generated by build.rs from stopwatch.toml. Do not edit.\n\n");

    code.push_str(&format!(
        "pub const LCD_GEOMETRY: quartz_core::config::DisplayGeometry = \
         quartz_core::config::DisplayGeometry {{ cols: {}, rows: {} }};\n",
        c.display.cols, c.display.rows
    ));
    code.push_str(&format!(
        "pub const TIMEBASE: quartz_core::Timebase = quartz_core::Timebase {{ \
         clock_hz: {}, cycles_per_tick: {}, prescale: {}, counter_bits: {} }};\n",
        c.timebase.clock_hz, c.timebase.cycles_per_tick, c.timebase.prescale, c.timebase.counter_bits
    ));
    code.push_str(&format!("pub const PWM_DIVIDER: u8 = {};\n", board.divider));
    code.push_str(&format!(
        "pub const DEBOUNCE: quartz_core::DebounceConfig = quartz_core::DebounceConfig {{ \
         sample_interval_us: {}, stable_samples: {}, max_samples: {} }};\n",
        c.debounce.sample_interval_us, c.debounce.stable_samples, c.debounce.max_samples
    ));
    code.push_str(&format!(
        "pub const POLARITY: quartz_core::config::ButtonPolarity = \
         quartz_core::config::ButtonPolarity::{:?};\n\n",
        c.polarity
    ));

    code.push_str("/// Move the configured peripherals out of `Peripherals`\n");
    code.push_str("macro_rules! take_board {\n    ($p:ident) => {\n        $crate::board::BoardPins {\n");
    for (field, gpio) in &board.pins {
        code.push_str(&format!("            {}: $p.PIN_{}.into(),\n", field, gpio));
    }
    code.push_str(&format!(
        "            timer: quartz_hal_rp2040::PwmOverflowTimer::new(\n                $p.PWM_SLICE{},\n                $crate::board::PWM_DIVIDER,\n            ),\n",
        board.pwm_slice
    ));
    code.push_str("        }\n    };\n}\n");

    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();
    f.write_all(code.as_bytes()).unwrap();
}

/// Abort the build with a framed error list
fn fail(title: &str, errors: &[String]) -> ! {
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
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
