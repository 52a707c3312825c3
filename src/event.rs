use serde::{Deserialize, Serialize};

use crate::capabilities::HttpResult;

/// Everything that can happen to the widget: user intents plus the
/// completions of the two remote calls. Capability results are boxed to keep
/// the enum small.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Dispatched by the shell once, when the widget mounts.
    AppStarted,
    QuotesFetched(Box<HttpResult>),

    NextQuote,
    PreviousQuote,
    SaveRequested,

    ComposerOpened,
    ComposerClosed,
    DraftTextChanged(String),
    DraftAuthorChanged(String),
    DraftCategoryChanged(String),
    SubmitDraft,
    QuoteCreated(Box<HttpResult>),

    DarkModeToggled,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::AppStarted => "app_started",
            Event::QuotesFetched(_) => "quotes_fetched",
            Event::NextQuote => "next_quote",
            Event::PreviousQuote => "previous_quote",
            Event::SaveRequested => "save_requested",
            Event::ComposerOpened => "composer_opened",
            Event::ComposerClosed => "composer_closed",
            Event::DraftTextChanged(_) => "draft_text_changed",
            Event::DraftAuthorChanged(_) => "draft_author_changed",
            Event::DraftCategoryChanged(_) => "draft_category_changed",
            Event::SubmitDraft => "submit_draft",
            Event::QuoteCreated(_) => "quote_created",
            Event::DarkModeToggled => "dark_mode_toggled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_size_is_reasonable() {
        // Boxing the capability results keeps the enum small.
        let size = std::mem::size_of::<Event>();
        assert!(size <= 64, "Event enum is {size} bytes, box more variants");
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(Event::AppStarted.name(), "app_started");
        assert_eq!(Event::SubmitDraft.name(), "submit_draft");
    }
}
