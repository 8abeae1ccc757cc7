use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::paths::normalize_input;
use crate::pdf::export::{PageSelection, export_pages, page_count};

pub fn run(
    files: &[String],
    output: &Path,
    order: &[usize],
    drop: &[usize],
    quiet: bool,
) -> Result<()> {
    let sequence = collect_pages(files)?;
    let plan = select(&sequence, order, drop)?;

    if !quiet {
        eprintln!(
            "Exporting {} of {} slides to {}",
            plan.len(),
            sequence.len(),
            output.display()
        );
    }
    let written = export_pages(&plan, output)
        .with_context(|| format!("Failed to export {}", output.display()))?;
    if !quiet {
        eprintln!("{} {written} slides", "Exported".green().bold());
    }
    Ok(())
}

/// Every page of every file, in import order.
fn collect_pages(files: &[String]) -> Result<Vec<PageSelection>> {
    let mut sequence = Vec::new();
    for input in files {
        let path = normalize_input(input);
        let count = page_count(&path)?;
        tracing::debug!(file = %path.display(), pages = count, "counted pages");
        sequence.extend((0..count as u32).map(|page| PageSelection::new(&path, page)));
    }
    Ok(sequence)
}

/// Pick slides out of `sequence` by 1-based position. An empty `order`
/// keeps the import order; `drop` removes positions afterwards.
pub fn select(
    sequence: &[PageSelection],
    order: &[usize],
    drop: &[usize],
) -> Result<Vec<PageSelection>> {
    let len = sequence.len();
    for &position in order.iter().chain(drop) {
        if position == 0 || position > len {
            anyhow::bail!("Slide {position} is out of range (1-{len})");
        }
    }

    let positions: Vec<usize> = if order.is_empty() {
        (1..=len).collect()
    } else {
        order.to_vec()
    };
    let plan: Vec<PageSelection> = positions
        .into_iter()
        .filter(|p| !drop.contains(p))
        .map(|p| sequence[p - 1].clone())
        .collect();

    if plan.is_empty() {
        anyhow::bail!("No slides to export.");
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> Vec<PageSelection> {
        vec![
            PageSelection::new("a.pdf", 0),
            PageSelection::new("a.pdf", 1),
            PageSelection::new("b.pdf", 0),
            PageSelection::new("b.pdf", 1),
        ]
    }

    fn labels(plan: &[PageSelection]) -> Vec<String> {
        plan.iter()
            .map(|p| format!("{}:{}", p.path.display(), p.page_index))
            .collect()
    }

    #[test]
    fn no_options_keeps_everything() {
        let plan = select(&sequence(), &[], &[]).unwrap();
        assert_eq!(plan, sequence());
    }

    #[test]
    fn order_picks_positions() {
        let plan = select(&sequence(), &[4, 1, 3], &[]).unwrap();
        assert_eq!(labels(&plan), vec!["b.pdf:1", "a.pdf:0", "b.pdf:0"]);
    }

    #[test]
    fn drop_removes_positions() {
        let plan = select(&sequence(), &[], &[2, 3]).unwrap();
        assert_eq!(labels(&plan), vec!["a.pdf:0", "b.pdf:1"]);

        let plan = select(&sequence(), &[3, 2, 1], &[2]).unwrap();
        assert_eq!(labels(&plan), vec!["b.pdf:0", "a.pdf:0"]);
    }

    #[test]
    fn out_of_range_positions_are_rejected() {
        let err = select(&sequence(), &[5], &[]).unwrap_err();
        assert_eq!(err.to_string(), "Slide 5 is out of range (1-4)");
        assert!(select(&sequence(), &[], &[0]).is_err());
    }

    #[test]
    fn dropping_everything_is_an_error() {
        let err = select(&sequence(), &[1], &[1]).unwrap_err();
        assert_eq!(err.to_string(), "No slides to export.");
    }

    #[test]
    fn export_through_lopdf() {
        use lopdf::{Document, Object, dictionary};

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("talk.pdf");
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let kids: Vec<Object> = (0..3)
            .map(|_| {
                Object::Reference(doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(100),
                        Object::Integer(100),
                    ],
                }))
            })
            .collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => 3i64 }),
        );
        let catalog = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog);
        doc.save(&input).unwrap();

        let output = dir.path().join("out.pdf");
        let files = vec![input.to_string_lossy().to_string()];
        run(&files, &output, &[3, 1], &[], true).unwrap();
        assert_eq!(page_count(&output).unwrap(), 2);
    }
}
