use crux_core::testing::AppTester;

use quotes_core::capabilities::{HttpError, HttpMethod, HttpOperation, HttpResponse, HttpResult};
use quotes_core::{
    fallback_quotes, App, CruxApp, Effect, Event, Gradient, Model, Quote, QuoteId, Screen,
};

fn quotes_fixture() -> Vec<Quote> {
    vec![
        Quote {
            id: QuoteId(10),
            text: "First".to_string(),
            author: "Ada".to_string(),
            category: "Computing".to_string(),
            color: Gradient::from("from-blue-500 to-cyan-400"),
            added_at: Some("2024-05-01T12:00:00Z".to_string()),
        },
        Quote {
            id: QuoteId(11),
            text: "Second".to_string(),
            author: "Grace".to_string(),
            category: "Computing".to_string(),
            color: Gradient::from("from-green-400 to-teal-500"),
            added_at: Some("2024-05-02T12:00:00Z".to_string()),
        },
        Quote {
            id: QuoteId(12),
            text: "Third".to_string(),
            author: "Edsger".to_string(),
            category: "Computing".to_string(),
            color: Gradient::from("from-red-500 to-pink-500"),
            added_at: None,
        },
    ]
}

/// Drive `AppStarted`, then resolve the resulting list request with
/// `outcome` and feed the completion back into the app.
fn load(app: &AppTester<App, Effect>, model: &mut Model, outcome: HttpResult) {
    let update = app.update(Event::AppStarted, model);
    assert!(model.is_loading);

    let mut request = update
        .effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .expect("expected an HTTP effect");

    let update = app.resolve(&mut request, outcome).expect("request resolves");
    let event = update.events.into_iter().next().expect("a follow-up event");
    assert!(matches!(event, Event::QuotesFetched(_)));
    app.update(event, model);
}

#[test]
fn start_issues_list_request_and_shows_loading() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    assert!(model.is_loading);
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));

    let request = update
        .effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .expect("expected an HTTP effect");

    let HttpOperation::Execute(http) = &request.operation;
    assert_eq!(http.method(), HttpMethod::Get);
    assert_eq!(http.url().as_str(), "/api/quotes");

    let view = App::default().view(&model);
    assert_eq!(view.screen, Screen::Loading);
    assert_eq!(view.current_quote.text, "Loading quotes...");
}

#[test]
fn successful_fetch_replaces_quotes_in_order() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let body = serde_json::to_vec(&quotes_fixture()).unwrap();
    load(&app, &mut model, Ok(HttpResponse::new(200, body)));

    assert!(!model.is_loading);
    assert!(model.load_error.is_none());
    assert_eq!(model.quotes, quotes_fixture());

    let view = App::default().view(&model);
    assert_eq!(view.screen, Screen::Content { position: 1, total: 3 });
    assert_eq!(view.current_quote.text, "First");

    app.update(Event::NextQuote, &mut model);
    assert_eq!(App::default().view(&model).current_quote.text, "Second");
}

#[test]
fn failed_fetch_installs_fallback_and_surfaces_error() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    load(
        &app,
        &mut model,
        Err(HttpError::Connection {
            message: "connection refused".to_string(),
        }),
    );

    assert!(!model.is_loading);
    assert_eq!(model.quotes, fallback_quotes());
    assert!(model.load_error.is_some());

    let view = App::default().view(&model);
    assert_eq!(
        view.screen,
        Screen::Error {
            message: "Unable to connect. Please check your internet connection and try again."
                .to_string()
        }
    );
}

#[test]
fn non_2xx_fetch_reports_the_server_message() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    load(
        &app,
        &mut model,
        Ok(HttpResponse::new(500, br#"{"error":"boom"}"#.to_vec())),
    );

    assert_eq!(model.quotes, fallback_quotes());
    let error = model.load_error.as_ref().expect("an error");
    assert_eq!(error.message, "boom");
}

#[test]
fn empty_list_shows_empty_state_not_placeholder_text() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    load(&app, &mut model, Ok(HttpResponse::new(200, b"[]".to_vec())));

    let view = App::default().view(&model);
    assert_eq!(view.screen, Screen::Empty);
    // The placeholder card is still populated for shells that render it.
    assert_eq!(view.current_quote.text, "Loading quotes...");
}

#[test]
fn navigation_wraps_both_ways() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let body = serde_json::to_vec(&quotes_fixture()).unwrap();
    load(&app, &mut model, Ok(HttpResponse::new(200, body)));

    for _ in 0..3 {
        app.update(Event::NextQuote, &mut model);
    }
    assert_eq!(model.current_index, 0);

    app.update(Event::PreviousQuote, &mut model);
    assert_eq!(model.current_index, 2);
}

#[test]
fn save_bookmarks_current_quote_once() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let body = serde_json::to_vec(&quotes_fixture()).unwrap();
    load(&app, &mut model, Ok(HttpResponse::new(200, body)));

    app.update(Event::SaveRequested, &mut model);
    app.update(Event::SaveRequested, &mut model);

    assert_eq!(model.saved.len(), 1);
    assert_eq!(model.saved[0].id, QuoteId(10));

    let view = App::default().view(&model);
    assert!(view.current_quote.is_saved);
    assert_eq!(view.saved_quotes.len(), 1);
}

#[test]
fn save_on_empty_list_is_a_noop() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    app.update(Event::SaveRequested, &mut model);
    assert!(model.saved.is_empty());
}

#[test]
fn dark_mode_toggles() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    app.update(Event::DarkModeToggled, &mut model);
    assert!(App::default().view(&model).dark_mode);
    app.update(Event::DarkModeToggled, &mut model);
    assert!(!App::default().view(&model).dark_mode);
}
