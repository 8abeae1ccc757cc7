use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let (config, from_file) = if path.is_file() {
        (Config::load_from(&path)?, true)
    } else {
        (Config::default(), false)
    };

    if from_file {
        eprintln!("{} {}", "Config:".bold(), path.display());
    } else {
        eprintln!(
            "{} {} {}",
            "Config:".bold(),
            path.display(),
            "(not created yet, showing defaults)".dimmed()
        );
    }

    let settings = config.deck_settings();
    println!("defaults.theme                = {}", config.theme_name());
    println!("defaults.thumbnail_width      = {}", settings.thumbnail_width);
    println!("defaults.projection_width     = {}", settings.projection_size[0]);
    println!("defaults.projection_height    = {}", settings.projection_size[1]);
    println!(
        "defaults.projector_fullscreen = {}",
        config.projector_fullscreen()
    );
    println!("defaults.start_mode           = {}", config.start_mode().name());
    println!("defaults.fit                  = {}", settings.fit.name());
    match config.library_dir() {
        Some(dir) => println!("pdfium.library_dir            = {}", dir.display()),
        None => println!(
            "pdfium.library_dir            = {}",
            "(search executable dir, working dir, system)".dimmed()
        ),
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    eprintln!(
        "{} {key} = {value} ({})",
        "Saved".green().bold(),
        path.display()
    );
    Ok(())
}
