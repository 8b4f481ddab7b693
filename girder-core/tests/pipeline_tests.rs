// End-to-end tests for the decorator + encoder rendering pipeline

use girder_core::{
    AppError, Application, Content, FilterSensitiveError, Handler, HttpStatusDecorator, Response,
    ResponseDecorator, SENSITIVE_ERROR_MESSAGE,
};
use girder_log::{Logger, Severity};
use std::sync::{Arc, Mutex};

struct MemoryLogger {
    records: Mutex<Vec<(Severity, String)>>,
}

impl MemoryLogger {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
        })
    }

    fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, severity: Severity, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }

    fn log_with(&self, severity: Severity, message: &str, _context: &serde_json::Value) {
        self.log(severity, message);
    }
}

fn production_chain() -> Handler {
    Handler::new(vec![
        Arc::new(FilterSensitiveError::new(false)),
        Arc::new(HttpStatusDecorator::with_default(500)),
    ])
}

fn development_chain() -> Handler {
    Handler::new(vec![
        Arc::new(FilterSensitiveError::new(true)),
        Arc::new(HttpStatusDecorator::with_default(500)),
    ])
}

#[test]
fn production_hides_internal_error_detail() {
    let response = Response::json(
        Application::new(),
        AppError::new("incorrect database credentials"),
    );
    let mut response = production_chain().decorate(response);

    assert_eq!(response.status(), 500);
    assert_eq!(
        response.body().unwrap(),
        r#"{"jsonapi":{"version":"1.0"},"errors":[{"title":"An error has occurred"}]}"#
    );
}

#[test]
fn development_passes_internal_error_detail_through() {
    let response = Response::json(
        Application::new(),
        AppError::new("incorrect database credentials"),
    );
    let mut response = development_chain().decorate(response);

    assert_eq!(response.status(), 500);
    assert_eq!(
        response.body().unwrap(),
        r#"{"jsonapi":{"version":"1.0"},"errors":[{"title":"Incorrect database credentials"}]}"#
    );
}

#[test]
fn user_facing_error_keeps_its_message_in_production() {
    let response = Response::json(
        Application::new(),
        AppError::new("invalid user id").status(404),
    );
    let mut response = production_chain().decorate(response);

    assert_eq!(response.status(), 404);
    assert_eq!(
        response.body().unwrap(),
        r#"{"jsonapi":{"version":"1.0"},"errors":[{"title":"Invalid user id"}]}"#
    );
}

#[test]
fn user_facing_error_is_identical_in_development() {
    let response = Response::json(
        Application::new(),
        AppError::new("invalid user id").status(404),
    );
    let mut response = development_chain().decorate(response);

    assert_eq!(response.status(), 404);
    assert_eq!(
        response.body().unwrap(),
        r#"{"jsonapi":{"version":"1.0"},"errors":[{"title":"Invalid user id"}]}"#
    );
}

#[test]
fn production_filter_strips_error_context() {
    let response = Response::json(
        Application::new(),
        AppError::new("constraint violated").context(serde_json::json!({"table": "users"})),
    );
    let mut response = production_chain().decorate(response);

    let body = response.body().unwrap();
    assert!(!body.contains("users"));
    assert!(!body.contains("meta"));
}

#[test]
fn explicit_server_status_survives_the_production_filter() {
    let response = Response::json(
        Application::new(),
        AppError::new("upstream timed out").status(503),
    );
    let mut response = production_chain().decorate(response);

    assert_eq!(response.status(), 503);
    assert_eq!(
        response.body().unwrap(),
        r#"{"jsonapi":{"version":"1.0"},"errors":[{"title":"An error has occurred"}]}"#
    );
}

#[test]
fn decorators_leave_non_error_responses_untouched() {
    let original_content = Content::from("<h1>Welcome</h1>");
    let response =
        Response::html(Application::new(), original_content.clone()).with_header("X-Custom", "1");
    let mut response = production_chain().decorate(response);

    assert_eq!(response.status(), 200);
    assert_eq!(response.content(), &original_content);
    assert_eq!(response.header("X-Custom"), Some("1"));
    assert_eq!(response.body().unwrap(), "<h1>Welcome</h1>");
}

#[test]
fn status_without_default_leaves_status_alone() {
    let chain = Handler::new(vec![Arc::new(HttpStatusDecorator::new())]);
    let response = Response::json(Application::new(), AppError::new("boom"));
    let response = chain.decorate(response);

    assert_eq!(response.status(), 200);
}

#[test]
fn replacement_error_message_is_the_generic_one() {
    let filter = FilterSensitiveError::new(false);
    let response = filter.decorate(Response::json(
        Application::new(),
        AppError::new("secret detail"),
    ));

    let err = response.content().as_error().unwrap();
    assert_eq!(err.message(), SENSITIVE_ERROR_MESSAGE);
}

#[test]
fn encoding_failure_is_logged_and_surfaced() {
    let logger = MemoryLogger::new();
    let app = Application::new().with_loggers(vec![logger.clone()]);

    // No encoder handles structured data in an empty list.
    let mut response =
        Response::new(app, Vec::new()).with_content(serde_json::json!({"id": 1}));

    assert!(response.body().is_err());
    let messages = logger.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("no encoder can handle content of type Data"));
}

#[test]
fn empty_content_encodes_to_empty_body() {
    let mut response = Response::json(Application::new(), ());
    assert_eq!(response.body().unwrap(), "");
    assert_eq!(response.status(), 200);
}
