//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

/// Test helper functions
pub mod helpers {
    use pinterest_pinner::{Pinner, config::Settings};
    use serde_json::{Value, json};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    pub const LOGIN_RESOURCE: &str = "/resource/UserSessionResource/create/";
    pub const PIN_RESOURCE: &str = "/resource/PinResource/create/";
    pub const BOARDS_RESOURCE: &str = "/resource/BoardPickerBoardsResource/get/";

    /// Settings pointing both hosts at local mock servers
    pub fn create_test_settings(site: &MockServer, api: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.endpoints.site_url = site.uri();
        settings.endpoints.api_url = api.uri();
        settings.http.timeout_secs = 5;
        settings.account.login = Some("alice@example.com".to_string());
        settings.account.password = Some("hunter2".to_string());
        settings
    }

    /// Create a session against the mock servers
    pub fn create_test_pinner(site: &MockServer, api: &MockServer) -> Pinner {
        Pinner::new(&create_test_settings(site, api)).expect("test settings are valid")
    }

    /// HTML page bootstrapping the given JSON through `P.main.start`
    pub fn bootstrap_page(app_json: Value) -> String {
        format!(
            "<!DOCTYPE html><html><body><script>P.main.start({});</script></body></html>",
            app_json
        )
    }

    /// Mount the login page and a successful login on `site`
    pub async fn mount_login(site: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/login/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(bootstrap_page(json!({"context": {"app_version": "v1"}})))
                    .insert_header("set-cookie", "csrftoken=anon; Path=/"),
            )
            .expect(1)
            .mount(site)
            .await;

        Mock::given(method("POST"))
            .and(path(LOGIN_RESOURCE))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(
                        json!({"resource_response": {"data": {"id": "user-1"}}}).to_string(),
                    )
                    .append_header("set-cookie", "csrftoken=auth; Path=/")
                    .append_header("set-cookie", "_pinterest_sess=s1; Path=/; HttpOnly"),
            )
            .expect(1)
            .mount(site)
            .await;
    }

    /// Mount the profile page for `username` on `site`
    pub async fn mount_profile(site: &MockServer, username: &str) {
        Mock::given(method("GET"))
            .and(path("/me/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(bootstrap_page(json!({
                "resourceDataCache": [{"data": {
                    "username": username,
                    "repins_from": [{"id": "9"}],
                }}],
            }))))
            .expect(1)
            .mount(site)
            .await;
    }
}
