use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::paths::normalize_input;
use crate::pdf::PdfEngine;
use crate::pdf::pdfium::PdfiumEngine;

/// Print every slide the files would contribute, numbered the way the
/// organizer and `export --order` number them.
pub fn run(files: &[String]) -> Result<()> {
    let config = Config::load_or_default();
    let engine = PdfiumEngine::new(config.library_dir())?;

    let mut position = 0;
    for input in files {
        let path = normalize_input(input);
        let info = match engine.open(&path) {
            Ok(info) => info,
            Err(e) => {
                eprintln!("{} {e}", "Skipping:".yellow().bold());
                continue;
            }
        };
        let name = info
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| info.path.display().to_string());
        println!("{} ({} pages)", name.bold(), info.page_count());
        for (index, size) in info.page_sizes.iter().enumerate() {
            position += 1;
            println!(
                "  {:>4}  page {:<4} {} x {} pt",
                position.to_string().cyan(),
                index + 1,
                size.width.round(),
                size.height.round()
            );
        }
    }
    if position == 0 {
        anyhow::bail!("No slides found.");
    }
    Ok(())
}
