//! Config command handler

use crate::args::ConfigSubcommand;
use pathway_advisor::config::Config;
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands
///
/// # Errors
/// Returns a message for unknown keys, invalid values and I/O failures.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> Result<(), String> {
    match subcommand {
        None => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => {
            let value = config
                .get(&key)
                .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
            println!("{value}");
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value)?;
            config.save().map_err(|e| format!("Failed to save config: {e}"))?;
            let shown = config.get(&key).unwrap_or(value);
            println!("✓ Set {key} = {shown}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults)?;
            config.save().map_err(|e| format!("Failed to save config: {e}"))?;
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ({}) ===\n", Config::get_config_file_path().display());
    print!("{config}");
}

/// Delete the config file after a y/n confirmation read from `input`
fn reset(input: &mut impl BufRead) -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();

    if confirmed(&response) {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

fn confirmed(response: &str) -> bool {
    matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
