use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let settings = config.deck_settings();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let durations: Vec<String> = settings
        .durations
        .iter()
        .map(|d| d.as_secs().to_string())
        .collect();
    let rows = [
        ("defaults.duration", settings.duration.as_secs().to_string()),
        ("defaults.durations", durations.join(",")),
        ("defaults.autoplay", settings.autoplay.to_string()),
        ("defaults.auto_hide", settings.auto_hide.to_string()),
        ("defaults.hide_delay", settings.hide_delay.as_secs().to_string()),
        ("defaults.theme", config.theme().to_string()),
    ];
    for (key, value) in rows {
        println!("  {:<22} {}", key.cyan(), value);
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key.cyan(),
        value,
        path.display()
    );
    Ok(())
}
