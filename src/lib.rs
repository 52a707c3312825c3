//! Application core for a quote-browsing widget: a card carousel backed by a
//! remote collection, a local bookmark list, and a composer for new quotes.
//! The core is headless; shells drive it with [`Event`]s, execute the HTTP
//! requests it emits, and render from the [`ViewModel`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod event;
pub mod model;

use serde::{Deserialize, Serialize};

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::{
    fallback_quotes, placeholder_quote, CreateQuoteRequest, Draft, Gradient, Model,
    PendingSubmission, Quote, QuoteId, GRADIENT_PALETTE, NEUTRAL_GRADIENT,
};

pub const QUOTES_ENDPOINT: &str = "/api/quotes";
pub const LIST_QUOTES_TIMEOUT_MS: u64 = 10_000;
pub const CREATE_QUOTE_TIMEOUT_MS: u64 = 15_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Timeout,
    Validation,
    NotFound,
    Deserialization,
    Internal,
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::Internal => "INTERNAL_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }
}

/// Application-level error. Both recognized failures (list fetch, create)
/// recover locally; this type only ever reaches the shell as a message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Map a non-2xx response, using the backend's `{"error": ...}` body for
    /// the message when it parses.
    #[must_use]
    pub fn from_http_status(status: u16, body: Option<&[u8]>) -> Self {
        let kind = match status {
            400 => ErrorKind::Validation,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::Timeout,
            500..=599 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        };

        let message = body
            .and_then(|b| serde_json::from_slice::<ApiErrorResponse>(b).ok())
            .map(|e| e.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error: {status}"));

        Self::new(kind, message)
    }

    #[must_use]
    pub fn from_http_error(error: &capabilities::HttpError) -> Self {
        use crate::capabilities::HttpError;

        let kind = match error {
            HttpError::Connection { .. } => ErrorKind::Network,
            HttpError::Timeout { .. } => ErrorKind::Timeout,
            HttpError::InvalidResponse { .. } => ErrorKind::Deserialization,
            HttpError::InvalidUrl { .. }
            | HttpError::InvalidRequest { .. }
            | HttpError::Serialization { .. } => ErrorKind::Internal,
        };

        Self::new(kind, error.to_string())
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Unable to connect. Please check your internet connection and try again.".into()
            }
            ErrorKind::Timeout => "The request timed out. Please try again.".into(),
            ErrorKind::Validation => self.message.clone(),
            ErrorKind::NotFound => "The requested item could not be found.".into(),
            ErrorKind::Deserialization => {
                "A data error occurred. Please contact support if this persists.".into()
            }
            ErrorKind::Internal | ErrorKind::Unknown => {
                "An unexpected error occurred. Please try again.".into()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: String,
}

/// One card's worth of quote data, plus the bookmark affordance state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteCard {
    pub id: u64,
    pub text: String,
    pub author: String,
    pub category: String,
    pub color: String,
    pub is_saved: bool,
}

impl QuoteCard {
    fn from_quote(quote: &Quote, model: &Model) -> Self {
        Self {
            id: quote.id.0,
            text: quote.text.clone(),
            author: quote.author.clone(),
            category: quote.category.clone(),
            color: quote.color.as_str().to_string(),
            is_saved: model.is_saved(quote.id),
        }
    }
}

/// Which of the four mutually exclusive screen states to present. Fixed
/// precedence: loading > error > empty > content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Screen {
    Loading,
    Error { message: String },
    Empty,
    Content { position: usize, total: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerView {
    pub is_open: bool,
    pub text: String,
    pub author: String,
    pub category: String,
    pub can_submit: bool,
    pub is_submitting: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub screen: Screen,
    /// Always present, falling back to the placeholder card on an empty
    /// list, so shells never index out of range.
    pub current_quote: QuoteCard,
    pub saved_quotes: Vec<QuoteCard>,
    pub composer: ComposerView,
    pub dark_mode: bool,
}

pub mod app {
    use rand::Rng;
    use tracing::{debug, warn};

    use super::{
        AppError, ComposerView, ErrorKind, Event, Model, QuoteCard, Screen, ViewModel,
        CREATE_QUOTE_TIMEOUT_MS, LIST_QUOTES_TIMEOUT_MS, QUOTES_ENDPOINT,
    };
    use crate::capabilities::{Capabilities, HttpRequest, HttpResult};
    use crate::model::{self, Draft, Gradient, PendingSubmission, Quote};

    #[derive(Default)]
    pub struct App;

    impl App {
        fn random_gradient() -> Gradient {
            let index = rand::thread_rng().gen_range(0..model::GRADIENT_PALETTE.len());
            Gradient::from(model::GRADIENT_PALETTE[index])
        }

        fn send_list_quotes(caps: &Capabilities) {
            let request = match HttpRequest::get(QUOTES_ENDPOINT) {
                Ok(request) => request.with_timeout_ms(LIST_QUOTES_TIMEOUT_MS),
                Err(e) => {
                    warn!(error = %e, "failed to build list request");
                    return;
                }
            };

            debug!(request_id = request.request_id(), "fetching quote list");
            caps.http
                .send(request, |result| Event::QuotesFetched(Box::new(result)));
        }

        fn send_create_quote(submission: &PendingSubmission, caps: &Capabilities) {
            let request = match HttpRequest::post(QUOTES_ENDPOINT)
                .and_then(|request| request.with_json(&submission.request_body()))
            {
                Ok(request) => request.with_timeout_ms(CREATE_QUOTE_TIMEOUT_MS),
                Err(e) => {
                    warn!(error = %e, "failed to build create request");
                    return;
                }
            };

            debug!(request_id = request.request_id(), "creating quote");
            caps.http
                .send(request, |result| Event::QuoteCreated(Box::new(result)));
        }

        /// Collapse a shell result into either the decoded 2xx body or an
        /// [`AppError`]; transport failures, non-2xx statuses, and
        /// unparseable bodies all land in the error arm.
        fn parse_response<T: serde::de::DeserializeOwned>(
            result: HttpResult,
        ) -> Result<T, AppError> {
            match result {
                Ok(response) if response.is_success() => response
                    .json::<T>()
                    .map_err(|e| AppError::new(ErrorKind::Deserialization, e.to_string())),
                Ok(response) => Err(AppError::from_http_status(
                    response.status(),
                    Some(response.body()),
                )),
                Err(e) => Err(AppError::from_http_error(&e)),
            }
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            debug!(event = event.name(), "handling event");

            match event {
                Event::AppStarted => {
                    model.is_loading = true;
                    model.load_error = None;
                    Self::send_list_quotes(caps);
                    caps.render.render();
                }

                Event::QuotesFetched(result) => {
                    model.is_loading = false;
                    match Self::parse_response::<Vec<Quote>>(*result) {
                        Ok(quotes) => {
                            debug!(count = quotes.len(), "quote list loaded");
                            model.quotes = quotes;
                            model.current_index = 0;
                        }
                        Err(error) => {
                            warn!(code = error.code(), "list fetch failed, installing fallback set");
                            model.load_error = Some(error);
                            model.quotes = model::fallback_quotes();
                            model.current_index = 0;
                        }
                    }
                    caps.render.render();
                }

                Event::NextQuote => {
                    model.next_quote();
                    caps.render.render();
                }

                Event::PreviousQuote => {
                    model.previous_quote();
                    caps.render.render();
                }

                Event::SaveRequested => {
                    if let Some(quote) = model.current_quote().cloned() {
                        model.save(quote);
                    }
                    caps.render.render();
                }

                Event::ComposerOpened => {
                    model.composer_open = true;
                    caps.render.render();
                }

                Event::ComposerClosed => {
                    model.composer_open = false;
                    caps.render.render();
                }

                Event::DraftTextChanged(text) => {
                    model.draft.text = text;
                    caps.render.render();
                }

                Event::DraftAuthorChanged(author) => {
                    model.draft.author = author;
                    caps.render.render();
                }

                Event::DraftCategoryChanged(category) => {
                    model.draft.category = category;
                    caps.render.render();
                }

                Event::SubmitDraft => {
                    if model.is_submitting() {
                        debug!("submission already in flight, ignoring");
                        return;
                    }
                    if !model.draft.is_complete() {
                        debug!("draft incomplete, ignoring submission");
                        return;
                    }

                    let submission = PendingSubmission {
                        text: model.draft.text.clone(),
                        author: model.draft.author.clone(),
                        category: model.draft.category.clone(),
                        color: Self::random_gradient(),
                    };
                    Self::send_create_quote(&submission, caps);
                    model.pending_submission = Some(submission);
                    caps.render.render();
                }

                Event::QuoteCreated(result) => {
                    let Some(submission) = model.pending_submission.take() else {
                        warn!("create response with no pending submission, dropping");
                        return;
                    };

                    match Self::parse_response::<Quote>(*result) {
                        Ok(quote) => {
                            debug!(id = quote.id.0, "quote created remotely");
                            model.quotes.push(quote);
                        }
                        Err(error) => {
                            warn!(code = error.code(), "create failed, appending locally");
                            let local = submission.into_local_quote(model.quotes.len());
                            model.quotes.push(local);
                        }
                    }

                    model.draft = Draft::default();
                    model.composer_open = false;
                    caps.render.render();
                }

                Event::DarkModeToggled => {
                    model.dark_mode = !model.dark_mode;
                    caps.render.render();
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            let screen = if model.is_loading {
                Screen::Loading
            } else if let Some(error) = &model.load_error {
                Screen::Error {
                    message: error.user_facing_message(),
                }
            } else if model.quotes.is_empty() {
                Screen::Empty
            } else {
                Screen::Content {
                    position: model.current_index + 1,
                    total: model.quotes.len(),
                }
            };

            let current_quote = model.current_quote().map_or_else(
                || QuoteCard::from_quote(&model::placeholder_quote(), model),
                |quote| QuoteCard::from_quote(quote, model),
            );

            ViewModel {
                screen,
                current_quote,
                saved_quotes: model
                    .saved
                    .iter()
                    .map(|quote| QuoteCard::from_quote(quote, model))
                    .collect(),
                composer: ComposerView {
                    is_open: model.composer_open,
                    text: model.draft.text.clone(),
                    author: model.draft.author.clone(),
                    category: model.draft.category.clone(),
                    can_submit: model.draft.is_complete() && !model.is_submitting(),
                    is_submitting: model.is_submitting(),
                },
                dark_mode: model.dark_mode,
            }
        }
    }
}
