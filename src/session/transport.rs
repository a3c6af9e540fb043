//! HTTP transport used by the session
//!
//! The session never talks to `reqwest` directly. It builds [`HttpRequest`]s
//! against a logical [`Host`] and hands them to an [`HttpTransport`], which
//! keeps the cookie jar and default headers for the lifetime of the session.

use crate::{
    Error, Result,
    config::{Settings, settings::HttpSettings},
};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use url::Url;

/// Logical host a request is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// Main website
    Site,
    /// Separate API host
    Api,
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Transport-agnostic request description
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub host: Host,
    /// Path relative to the host, query string included
    pub path: String,
    /// Extra headers on top of the transport defaults
    pub headers: Vec<(String, String)>,
    /// Site path sent as the `Referer`, resolved against the site URL
    pub referer: Option<String>,
    /// Form fields, sent `application/x-www-form-urlencoded`
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    /// Create a GET request
    pub fn get(host: Host, path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            host,
            path: path.into(),
            headers: Vec::new(),
            referer: None,
            form: None,
        }
    }

    /// Create a form-encoded POST request
    pub fn post_form(host: Host, path: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            form: Some(form),
            ..Self::get(host, path)
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the referer path
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// First header with the given name, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First form field with the given name
    pub fn form_field(&self, name: &str) -> Option<&str> {
        self.form
            .as_ref()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Response as seen by the session
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    /// Header pairs in arrival order, repeated names kept
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Create a response with no headers
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// 200 OK with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, "OK", body)
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to send requests with a persistent cookie jar
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and return whatever the server answered.
    ///
    /// Non-2xx statuses are returned as responses; only transport failures
    /// are errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `reqwest`-backed transport with a cookie store shared by both hosts
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    site_url: Url,
    api_url: Url,
}

impl ReqwestTransport {
    /// Build a transport from explicit base URLs
    pub fn new(http: &HttpSettings, site_url: Url, api_url: Url) -> Result<Self> {
        if http.accept_invalid_certs {
            tracing::debug!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .default_headers(default_headers(http)?)
            .cookie_store(true)
            .danger_accept_invalid_certs(http.accept_invalid_certs)
            .timeout(http.timeout())
            .build()?;

        Ok(Self {
            client,
            site_url,
            api_url,
        })
    }

    /// Build a transport from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.http, settings.site_url()?, settings.api_url()?)
    }

    fn base(&self, host: Host) -> &Url {
        match host {
            Host::Site => &self.site_url,
            Host::Api => &self.api_url,
        }
    }

    fn resolve(&self, host: Host, path: &str) -> Result<Url> {
        self.base(host)
            .join(path)
            .map_err(|e| Error::config(format!("Invalid request path {}: {}", path, e)))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.resolve(request.host, &request.path)?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(referer) = &request.referer {
            let referer = self.resolve(Host::Site, referer)?;
            builder = builder.header(header::REFERER, referer.as_str());
        }

        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// Header preset shared by every request to either host
fn default_headers(http: &HttpSettings) -> Result<HeaderMap> {
    let pairs: [(HeaderName, &str); 5] = [
        (header::CONNECTION, "keep-alive"),
        (header::PRAGMA, "no-cache"),
        (header::CACHE_CONTROL, "no-cache"),
        (header::ACCEPT_LANGUAGE, &http.accept_language),
        (header::USER_AGENT, &http.user_agent),
    ];

    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("Invalid {} header: {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = HttpRequest::post_form(
            Host::Site,
            "/resource/PinResource/create/",
            vec![("source_url".into(), "/".into())],
        )
        .with_header("X-CSRFToken", "tok")
        .with_referer("/");

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.header("x-csrftoken"), Some("tok"));
        assert_eq!(request.form_field("source_url"), Some("/"));
        assert_eq!(request.referer.as_deref(), Some("/"));

        let get = HttpRequest::get(Host::Api, "/v3/x/");
        assert_eq!(get.method, Method::Get);
        assert!(get.form.is_none());
        assert_eq!(get.form_field("data"), None);
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::ok("").is_success());
        assert!(HttpResponse::new(204, "No Content", "").is_success());
        assert!(!HttpResponse::new(302, "Found", "").is_success());
        assert!(!HttpResponse::new(404, "Not Found", "").is_success());
    }

    #[test]
    fn test_default_headers() {
        let headers = default_headers(&HttpSettings::default()).unwrap();
        assert_eq!(headers["pragma"], "no-cache");
        assert_eq!(headers["cache-control"], "no-cache");
        assert_eq!(headers["accept-language"], "en-US,en;q=0.5");
        assert!(
            headers["user-agent"]
                .to_str()
                .unwrap()
                .contains("Chrome/31.0.1700.0")
        );
    }

    #[test]
    fn test_resolve_paths_per_host() {
        let settings = Settings::default();
        let transport = ReqwestTransport::from_settings(&settings).unwrap();

        assert_eq!(
            transport.resolve(Host::Site, "/login/").unwrap().as_str(),
            "https://www.pinterest.com/login/"
        );
        assert_eq!(
            transport
                .resolve(Host::Api, "/v3/pidgets/users/alice/pins/")
                .unwrap()
                .as_str(),
            "https://api.pinterest.com/v3/pidgets/users/alice/pins/"
        );
    }

    #[test]
    fn test_rejects_bad_user_agent() {
        let http = HttpSettings {
            user_agent: "bad\nagent".to_string(),
            ..HttpSettings::default()
        };
        assert!(matches!(default_headers(&http), Err(Error::Config(_))));
    }
}
