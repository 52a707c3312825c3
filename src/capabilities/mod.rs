mod http;

pub use self::http::{
    Http, HttpError, HttpMethod, HttpOperation, HttpRequest, HttpResponse, HttpResult, RequestUrl,
    DEFAULT_TIMEOUT_MS,
};

// Crux's built-in Render capability covers view updates; no custom one needed.
pub use crux_core::render::Render;

use crate::{App, Event};

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
