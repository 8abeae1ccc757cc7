use std::fs;

use super::*;
use crate::notes::NotesStore;

/// A fake deck whose primary file lives in a real directory, so the notes
/// file can be written and read back.
fn deck_in(dir: &Path) -> (Deck, PathBuf) {
    let pdf = dir.join("talk.pdf");
    let engine = engine().with(&pdf.to_string_lossy(), &[LANDSCAPE, LANDSCAPE, PORTRAIT]);
    let mut deck = deck_with(engine, DeckSettings::default());
    deck.import_file(&pdf);
    deck.take_events();
    (deck, pdf)
}

#[test]
fn notes_are_loaded_from_the_primary_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("talk.pdf.notes"),
        "==XXslide0\nWelcome\n==XXslide2\nQuestions?\n",
    )
    .unwrap();

    let (mut deck, _) = deck_in(dir.path());
    assert_eq!(deck.current_notes(), "Welcome");
    deck.last_slide();
    assert_eq!(deck.current_notes(), "Questions?");
    deck.prev_slide();
    assert_eq!(deck.current_notes(), "");
}

#[test]
fn editing_notes_raises_event_once() {
    let dir = tempfile::tempdir().unwrap();
    let (mut deck, _) = deck_in(dir.path());

    deck.set_current_notes("Say hello");
    assert_eq!(deck.take_events(), vec![DeckEvent::CurrentNotesChanged]);
    deck.set_current_notes("Say hello");
    assert!(deck.take_events().is_empty());
    assert_eq!(deck.current_notes(), "Say hello");
}

#[test]
fn notes_follow_their_slide_through_reordering() {
    let dir = tempfile::tempdir().unwrap();
    let (mut deck, _) = deck_in(dir.path());

    deck.jump_to_slide(2);
    deck.set_current_notes("closing remarks");
    deck.move_slide(2, 0);
    assert_eq!(deck.current_position(), 0);
    assert_eq!(deck.current_notes(), "closing remarks");

    deck.jump_to_slide(2);
    assert_eq!(deck.current_notes(), "");
}

#[test]
fn notes_survive_slide_removal() {
    let dir = tempfile::tempdir().unwrap();
    let (mut deck, _) = deck_in(dir.path());

    deck.jump_to_slide(1);
    deck.set_current_notes("about to be deleted");
    deck.remove_slide(1);
    assert_eq!(deck.notes().get(SlideId(1)), Some("about to be deleted"));
}

#[test]
fn save_writes_next_to_the_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let (mut deck, pdf) = deck_in(dir.path());

    // Nothing to write yet
    assert!(!deck.save_notes());

    deck.set_current_notes("Intro");
    deck.jump_to_slide(2);
    deck.set_current_notes("Outro\nwith two lines");
    assert!(deck.save_notes());

    let notes_path = dir.path().join("talk.pdf.notes");
    assert_eq!(deck.notes().path(), Some(notes_path.as_path()));
    let written = fs::read_to_string(&notes_path).unwrap();
    assert_eq!(written, "==XXslide0\nIntro\n==XXslide2\nOutro\nwith two lines\n");

    // A fresh deck over the same file sees the same notes
    let (mut reopened, reopened_pdf) = deck_in(dir.path());
    assert_eq!(reopened_pdf, pdf);
    reopened.jump_to_slide(2);
    assert_eq!(reopened.current_notes(), "Outro\nwith two lines");
}

#[test]
fn clearing_a_note_removes_it_from_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let (mut deck, _) = deck_in(dir.path());

    deck.set_current_notes("temporary");
    deck.jump_to_slide(1);
    deck.set_current_notes("kept");
    deck.jump_to_slide(0);
    deck.set_current_notes("");
    assert!(deck.save_notes());

    let store = NotesStore::read(&dir.path().join("talk.pdf.notes")).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(SlideId(1)), Some("kept"));
}

#[test]
fn second_file_does_not_replace_notes() {
    let dir = tempfile::tempdir().unwrap();
    let (mut deck, _) = deck_in(dir.path());
    deck.set_current_notes("first file note");
    deck.import_file("/fake/a.pdf");

    assert_eq!(deck.slide_count(), 6);
    assert_eq!(deck.current_notes(), "first file note");
    assert_eq!(
        deck.notes().path(),
        Some(dir.path().join("talk.pdf.notes").as_path())
    );
}

#[test]
fn unreadable_notes_file_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("talk.pdf");
    let notes_path = dir.path().join("talk.pdf.notes");
    let original: &[u8] = b"==XXslide0\nprecious \xff\xfe notes\n==XXslide1\nmore\n";
    fs::write(&notes_path, original).unwrap();

    let engine = engine().with(&pdf.to_string_lossy(), &[LANDSCAPE, LANDSCAPE]);
    let mut deck = deck_with(engine, DeckSettings::default());
    deck.import_file(&pdf);
    let events = deck.take_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, DeckEvent::Error { title, .. } if title == "Notes"))
    );
    assert_eq!(deck.primary_file(), Some(pdf.as_path()));
    assert!(deck.notes().path().is_none());

    deck.set_current_notes("new");
    assert!(!deck.save_notes());
    assert_eq!(fs::read(&notes_path).unwrap(), original);
}
