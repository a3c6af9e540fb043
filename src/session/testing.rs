//! Scripted in-memory transport for unit tests

use crate::{
    Result,
    session::transport::{HttpRequest, HttpResponse, HttpTransport},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<HttpResponse>,
    requests: Vec<HttpRequest>,
}

/// Answers requests from a queue of canned responses and records them.
///
/// Clones share the same queue, so a test can keep a handle after moving the
/// transport into a session.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the next response
    pub(crate) fn push(&self, response: HttpResponse) -> &Self {
        self.state.lock().unwrap().responses.push_back(response);
        self
    }

    /// Every request sent so far
    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Paths of every request sent so far
    pub(crate) fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        let response = state
            .responses
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for {}", request.path));
        state.requests.push(request);
        Ok(response)
    }
}

/// Login page carrying an app version and an anonymous CSRF cookie
pub(crate) fn login_page(app_version: &str, csrf_token: &str) -> HttpResponse {
    HttpResponse::ok(format!(
        r#"<html><script>P.main.start({{"context": {{"app_version": "{}"}}}});</script></html>"#,
        app_version
    ))
    .with_header("Set-Cookie", format!("csrftoken={}; Path=/", csrf_token))
}

/// JSON resource response, optionally setting a CSRF cookie
pub(crate) fn resource(body: serde_json::Value, csrf_token: Option<&str>) -> HttpResponse {
    let response = HttpResponse::ok(body.to_string());
    match csrf_token {
        Some(token) => response.with_header("Set-Cookie", format!("csrftoken={}; Path=/", token)),
        None => response,
    }
}

/// Profile page embedding the given resource cache data
pub(crate) fn profile_page(data: serde_json::Value) -> HttpResponse {
    let app_json = serde_json::json!({ "resourceDataCache": [{ "data": data }] });
    HttpResponse::ok(format!(
        "<html><script>P.main.start({});</script></html>",
        app_json
    ))
}
