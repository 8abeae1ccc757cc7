use super::*;
use crate::deck::FitMode;

const SCREEN: [f32; 2] = [1920.0, 1080.0];

fn width_fit_deck(file: &str) -> Deck {
    let settings = DeckSettings {
        fit: FitMode::Width,
        ..DeckSettings::default()
    };
    let mut deck = deck_with(engine(), settings);
    deck.import_file(file);
    deck.take_events();
    deck
}

#[test]
fn next_and_prev_stop_at_the_ends() {
    let mut deck = five_slide_deck();
    assert!(!deck.prev_slide());
    for expected in 1..5 {
        assert!(deck.next_slide());
        assert_eq!(deck.current_position(), expected);
    }
    assert!(!deck.next_slide());
    assert_eq!(deck.current_position(), 4);
    assert!(deck.prev_slide());
    assert_eq!(deck.current_position(), 3);
}

#[test]
fn moving_the_cursor_raises_page_and_notes_events() {
    let mut deck = five_slide_deck();
    deck.next_slide();
    let events = deck.take_events();
    assert_eq!(
        events,
        vec![DeckEvent::CurrentPageChanged, DeckEvent::CurrentNotesChanged]
    );

    // Jumping to where we already are is silent
    assert!(deck.jump_to_slide(1));
    assert!(deck.take_events().is_empty());
}

#[test]
fn jump_home_and_end() {
    let mut deck = five_slide_deck();
    assert!(deck.last_slide());
    assert_eq!(deck.current_position(), 4);
    assert!(deck.first_slide());
    assert_eq!(deck.current_position(), 0);
    assert!(!deck.jump_to_slide(5));
    assert_eq!(deck.current_position(), 0);
}

#[test]
fn advance_on_regular_pages_just_moves_on() {
    let mut deck = five_slide_deck();
    assert!(deck.advance(SCREEN));
    assert_eq!(deck.current_position(), 1);
    assert_eq!(deck.vertical_offset(), 0.0);
    assert!(deck.retreat(SCREEN));
    assert_eq!(deck.current_position(), 0);
}

#[test]
fn tall_page_scrolls_before_advancing() {
    let mut deck = width_fit_deck("/fake/tall.pdf");

    assert!(deck.advance(SCREEN));
    assert_eq!(deck.current_position(), 0);
    assert_eq!(deck.vertical_offset(), 1.0);
    assert!(has_event(&deck.take_events(), &DeckEvent::CurrentPageChanged));

    assert!(deck.advance(SCREEN));
    assert_eq!(deck.current_position(), 1);
    assert_eq!(deck.vertical_offset(), 0.0);

    assert!(deck.advance(SCREEN));
    assert_eq!(deck.vertical_offset(), 1.0);
    assert!(!deck.advance(SCREEN));
    assert_eq!(deck.current_position(), 1);
}

#[test]
fn retreat_goes_to_top_then_to_bottom_of_previous() {
    let mut deck = width_fit_deck("/fake/tall.pdf");
    deck.jump_to_slide(1);
    deck.advance(SCREEN);
    assert_eq!(deck.vertical_offset(), 1.0);

    assert!(deck.retreat(SCREEN));
    assert_eq!(deck.current_position(), 1);
    assert_eq!(deck.vertical_offset(), 0.0);

    assert!(deck.retreat(SCREEN));
    assert_eq!(deck.current_position(), 0);
    assert_eq!(deck.vertical_offset(), 1.0);

    assert!(deck.retreat(SCREEN));
    assert_eq!(deck.vertical_offset(), 0.0);
    assert!(!deck.retreat(SCREEN));
}

#[test]
fn page_fit_never_scrolls() {
    let mut deck = deck_with(engine(), DeckSettings::default());
    deck.import_file("/fake/tall.pdf");
    assert!(deck.advance(SCREEN));
    assert_eq!(deck.current_position(), 1);
    assert_eq!(deck.vertical_offset(), 0.0);
}

#[test]
fn plain_navigation_resets_the_scroll() {
    let mut deck = width_fit_deck("/fake/tall.pdf");
    deck.advance(SCREEN);
    assert_eq!(deck.vertical_offset(), 1.0);
    deck.next_slide();
    assert_eq!(deck.vertical_offset(), 0.0);
}
