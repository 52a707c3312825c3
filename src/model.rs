use serde::{Deserialize, Serialize};

use crate::AppError;

/// Gradient tags handed out to newly composed quotes. The backend seeds its
/// sample data from the same set, so server-assigned and client-assigned
/// quotes are visually indistinguishable.
pub const GRADIENT_PALETTE: [&str; 6] = [
    "from-purple-500 to-pink-500",
    "from-blue-500 to-cyan-400",
    "from-green-400 to-teal-500",
    "from-yellow-400 to-orange-500",
    "from-red-500 to-pink-500",
    "from-indigo-500 to-purple-500",
];

/// Neutral tag reserved for the placeholder card.
pub const NEUTRAL_GRADIENT: &str = "from-gray-400 to-gray-500";

/// Server-assigned quote identifier. Fallback-created quotes synthesize one
/// as `quotes.len() + 1`; see `PendingSubmission::into_local_quote`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub u64);

/// Opaque gradient tag. Values from the server are accepted verbatim; values
/// minted client-side come from `GRADIENT_PALETTE`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient(String);

impl Gradient {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Gradient {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for Gradient {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// A displayable quotation, as served by `GET /api/quotes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    pub author: String,
    pub category: String,
    pub color: Gradient,
    /// RFC3339 creation timestamp, assigned by the server. Absent on
    /// fallback-created quotes.
    #[serde(rename = "addedAt", default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
}

/// Body for `POST /api/quotes`. The server assigns the id and timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuoteRequest {
    pub text: String,
    pub author: String,
    pub category: String,
    pub color: Gradient,
}

/// In-progress composer state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub text: String,
    pub author: String,
    pub category: String,
}

impl Draft {
    /// A draft submits only when every field is non-empty.
    pub fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.author.is_empty() && !self.category.is_empty()
    }
}

/// A validated draft with its assigned gradient, held while the create call
/// is in flight. Its presence doubles as the submission busy flag, and it
/// preserves the gradient so the remote and local-fallback paths append an
/// identically colored quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSubmission {
    pub text: String,
    pub author: String,
    pub category: String,
    pub color: Gradient,
}

impl PendingSubmission {
    pub fn request_body(&self) -> CreateQuoteRequest {
        CreateQuoteRequest {
            text: self.text.clone(),
            author: self.author.clone(),
            category: self.category.clone(),
            color: self.color.clone(),
        }
    }

    /// Synthesize the quote appended when the create call fails.
    /// `current_len` is the list length before the append.
    pub fn into_local_quote(self, current_len: usize) -> Quote {
        Quote {
            id: QuoteId(current_len as u64 + 1),
            text: self.text,
            author: self.author,
            category: self.category,
            color: self.color,
            added_at: None,
        }
    }
}

/// The working state behind the widget. Mutated only by `App::update`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Model {
    pub quotes: Vec<Quote>,
    pub current_index: usize,
    pub saved: Vec<Quote>,
    pub draft: Draft,
    pub pending_submission: Option<PendingSubmission>,
    pub is_loading: bool,
    pub load_error: Option<AppError>,
    pub composer_open: bool,
    pub dark_mode: bool,
}

impl Model {
    /// Advance the carousel, wrapping at the end. No-op on an empty list.
    pub fn next_quote(&mut self) {
        let len = self.quotes.len();
        if len > 0 {
            self.current_index = (self.current_index + 1) % len;
        }
    }

    /// Step the carousel backwards, wrapping at the start. No-op on an empty
    /// list. Never underflows, whatever the prior index was.
    pub fn previous_quote(&mut self) {
        let len = self.quotes.len();
        if len > 0 {
            self.current_index = (self.current_index + len - 1) % len;
        }
    }

    /// The quote under the carousel cursor, if any.
    pub fn current_quote(&self) -> Option<&Quote> {
        self.quotes.get(self.current_index)
    }

    /// Bookmark a quote. Idempotent per id.
    pub fn save(&mut self, quote: Quote) {
        if !self.saved.iter().any(|q| q.id == quote.id) {
            self.saved.push(quote);
        }
    }

    pub fn is_saved(&self, id: QuoteId) -> bool {
        self.saved.iter().any(|q| q.id == id)
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_submission.is_some()
    }
}

/// The fixed sample set installed when the list fetch fails, so the session
/// still has content to browse. Values mirror the backend's seed data.
pub fn fallback_quotes() -> Vec<Quote> {
    let literals: [(&str, &str, &str, &str); 5] = [
        (
            "The only way to do great work is to love what you do.",
            "Steve Jobs",
            "Motivation",
            "from-purple-500 to-pink-500",
        ),
        (
            "Innovation distinguishes between a leader and a follower.",
            "Steve Jobs",
            "Leadership",
            "from-blue-500 to-cyan-400",
        ),
        (
            "Design is not just what it looks like and feels like. Design is how it works.",
            "Steve Jobs",
            "Design",
            "from-green-400 to-teal-500",
        ),
        (
            "Your time is limited, so don't waste it living someone else's life.",
            "Steve Jobs",
            "Life",
            "from-yellow-400 to-orange-500",
        ),
        ("Think different.", "Apple Inc.", "Innovation", "from-red-500 to-pink-500"),
    ];

    literals
        .iter()
        .enumerate()
        .map(|(i, (text, author, category, color))| Quote {
            id: QuoteId(i as u64 + 1),
            text: (*text).to_string(),
            author: (*author).to_string(),
            category: (*category).to_string(),
            color: Gradient::from(*color),
            added_at: None,
        })
        .collect()
}

/// Rendered whenever the list is empty, so shells never index out of range.
pub fn placeholder_quote() -> Quote {
    Quote {
        id: QuoteId(0),
        text: "Loading quotes...".to_string(),
        author: String::new(),
        category: String::new(),
        color: Gradient::from(NEUTRAL_GRADIENT),
        added_at: None,
    }
}
