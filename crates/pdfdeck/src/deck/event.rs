/// Change notifications raised by [`super::Deck`]. The UI drains them once
/// per frame with [`super::Deck::take_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    SlideOrderChanged,
    CurrentPageChanged,
    CurrentFileChanged,
    PresentationModeChanged,
    CurrentNotesChanged,
    TimerTextChanged,
    Error { title: String, message: String },
}

impl DeckEvent {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    #[cfg(test)]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
