//! Config command handler

use crate::args::ConfigSubcommand;
use std::io::{self, Write};
use study_sync::config::Config;
use study_sync::{error, info};

/// Keys accepted by `config get/set/unset`
const CONFIG_KEYS: [&str; 8] = [
    "level",
    "file",
    "verbose",
    "hours_per_day",
    "max_days",
    "horizon",
    "store_file",
    "reports_dir",
];

/// Dispatch config subcommands. Returns `false` on failure.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> bool {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

fn unknown_key(key: &str) {
    eprintln!("✗ Unknown config key: '{key}'");
    eprintln!("  Known keys: {}", CONFIG_KEYS.join(", "));
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) -> bool {
    let Some(k) = key else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        println!("\nConfig file: {}", Config::get_config_file_path().display());
        return true;
    };

    match config.get(&k) {
        Some(value) => {
            println!("{value}");
            true
        }
        None => {
            unknown_key(&k);
            false
        }
    }
}

fn save(config: &Config) -> bool {
    match config.save() {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to save config: {e}");
            eprintln!("✗ Failed to save config: {e}");
            false
        }
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) -> bool {
    if let Err(e) = config.set(key, value) {
        if config.get(key).is_none() {
            unknown_key(key);
        } else {
            eprintln!("✗ {e}");
        }
        return false;
    }

    if !save(config) {
        return false;
    }

    info!("Config updated: {key} = {value}");
    println!("✓ Set {key} = {value}");
    true
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) -> bool {
    if config.unset(key, defaults).is_err() {
        unknown_key(key);
        return false;
    }

    if !save(config) {
        return false;
    }

    info!("Config key reset: {key}");
    println!("✓ Reset {key} to default");
    true
}

/// Handle the config reset subcommand
pub fn handle_config_reset() -> bool {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return true;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            error!("Failed to remove config file: {e}");
            eprintln!("✗ Failed to remove config file: {e}");
            return false;
        }
        info!("Config reset to defaults");
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    true
}
