use anyhow::Result;
use colored::Colorize;

use crate::cli::NotesCommands;
use crate::notes::NotesStore;
use crate::paths::{normalize_input, notes_path_for};

pub fn run(command: NotesCommands) -> Result<()> {
    match command {
        NotesCommands::Show { file } => show(&file),
        NotesCommands::Path { file } => {
            let path = notes_path_for(&normalize_input(&file));
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn show(file: &str) -> Result<()> {
    let path = notes_path_for(&normalize_input(file));
    let store = NotesStore::read(&path)?;
    if store.is_empty() {
        eprintln!("{} {}", "No notes in".dimmed(), path.display());
        return Ok(());
    }
    for (id, text) in store.iter() {
        println!("{}", format!("Slide {id}").bold());
        for line in text.lines() {
            println!("  {line}");
        }
    }
    Ok(())
}
