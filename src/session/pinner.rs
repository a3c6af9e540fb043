//! # Pinner Session
//!
//! A [`PinnerGeneric`] drives one logged-in browser session against the site's
//! private resource endpoints. Every public operation lazily runs the steps it
//! depends on and remembers their results for the lifetime of the value:
//!
//! ```text
//! login page ──► app version ──► CSRF token ──► login ──► fresh CSRF token ──► create pin
//!                                                   └──► /me/ ──► boards / pins
//! ```
//!
//! Operations take `&mut self`, so requests go out strictly one after another
//! and a session cannot be shared between concurrent callers. Use one session
//! per account.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use pinterest_pinner::{Pinner, Settings, types::PinDraft};
//!
//! # tokio_test::block_on(async {
//! let mut pinner = Pinner::new(&Settings::default())?;
//! pinner
//!     .configure_credentials("me@example.com", "secret")
//!     .configure_pin(
//!         PinDraft::new()
//!             .with_board_id("123456789")
//!             .with_image_url("https://example.com/cat.jpg")
//!             .with_link("https://example.com/cats")
//!             .with_description("A cat"),
//!     );
//!
//! let pin_id = pinner.create_pin().await?;
//! println!("Created pin {}", pin_id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

use crate::{
    Error, Result,
    config::Settings,
    session::{
        scrape,
        transport::{Host, HttpRequest, HttpTransport, ReqwestTransport},
    },
    types::{
        Boards, Credentials, LastResponse, PinDraft, ResponseBody, UserData, is_truthy, loose_eq,
        scalar_to_string,
    },
    utils::cache_buster,
};
use serde_json::{Value, json};
use url::form_urlencoded;

const LOGIN_PAGE: &str = "/login/";
const PROFILE_PAGE: &str = "/me/";
const LOGIN_RESOURCE: &str = "/resource/UserSessionResource/create/";
const PIN_RESOURCE: &str = "/resource/PinResource/create/";
const BOARDS_RESOURCE: &str = "/resource/BoardPickerBoardsResource/get/";

const LOGIN_MODULE_PATH: &str =
    "App()>LoginPage()>Login()>Button(class_name=primary, text=Log In, type=submit, size=large)";
const BOARDS_MODULE_PATH: &str = "App>FooterButtons>DropdownButton>Dropdown>AddPin>ShowModalButton(module=PinUploader)#Modal(showCloseModal=true, mouseDownInModal=false)";

const AJAX_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// Profile field that is dropped before user data is cached
const SENSITIVE_USER_FIELD: &str = "repins_from";

/// Convenience type alias for a session over the real HTTP transport
pub type Pinner = PinnerGeneric<ReqwestTransport>;

/// How `issue_request` sends a request. Plain page loads go through
/// `fetch_page` instead.
#[derive(Debug)]
enum Payload {
    /// GET with the AJAX header set
    Ajax,
    /// Form-encoded POST with AJAX, CSRF and referer headers
    Form(Vec<(String, String)>),
}

/// Session state for one account
#[derive(Debug)]
pub struct PinnerGeneric<T: HttpTransport = ReqwestTransport> {
    transport: T,
    credentials: Credentials,
    draft: PinDraft,
    is_logged_in: bool,
    csrf_token: Option<String>,
    app_version: Option<String>,
    last_response: Option<LastResponse>,
    pin_id: Option<String>,
    user_data: Option<UserData>,
    boards: Option<Boards>,
}

impl PinnerGeneric<ReqwestTransport> {
    /// Creates a session over the real site using the given settings.
    ///
    /// Credentials from `settings.account` are applied when both are present.
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut pinner = Self::with_transport(ReqwestTransport::from_settings(settings)?);
        if let (Some(login), Some(password)) = (&settings.account.login, &settings.account.password)
        {
            pinner.configure_credentials(login.as_str(), password.as_str());
        }
        Ok(pinner)
    }
}

impl<T: HttpTransport> PinnerGeneric<T> {
    /// Creates a session over any transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            credentials: Credentials::default(),
            draft: PinDraft::default(),
            is_logged_in: false,
            csrf_token: None,
            app_version: None,
            last_response: None,
            pin_id: None,
            user_data: None,
            boards: None,
        }
    }

    /// Set login and password
    pub fn configure_credentials(
        &mut self,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> &mut Self {
        self.credentials = Credentials::new(login, password);
        self
    }

    /// Set all fields of the next pin
    pub fn configure_pin(&mut self, draft: PinDraft) -> &mut Self {
        self.draft = draft;
        self
    }

    /// Set account login
    pub fn set_login(&mut self, login: impl Into<String>) -> &mut Self {
        self.credentials.login = login.into();
        self
    }

    /// Set account password
    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.credentials.password = password.into();
        self
    }

    /// Set board id to add the pin to
    pub fn set_board_id(&mut self, board_id: impl Into<String>) -> &mut Self {
        self.draft.board_id = Some(board_id.into());
        self
    }

    /// Set pin image URL
    pub fn set_image(&mut self, image_url: impl Into<String>) -> &mut Self {
        self.draft.image_url = Some(image_url.into());
        self
    }

    /// Set pin description
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.draft.description = Some(description.into());
        self
    }

    /// Set pin link
    pub fn set_link(&mut self, link: impl Into<String>) -> &mut Self {
        self.draft.link = Some(link.into());
        self
    }

    /// Set 'Share on Facebook' option
    pub fn set_share_facebook(&mut self, share: bool) -> &mut Self {
        self.draft.share_facebook = share;
        self
    }

    /// Id of the pin created by the last successful [`create_pin`](Self::create_pin)
    pub fn created_pin_id(&self) -> Option<&str> {
        self.pin_id.as_deref()
    }

    /// Whether login has succeeded on this session
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    /// Current CSRF token, if derived
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// App version reported by the site, if derived
    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }

    /// Create a new pin from the configured draft and return its id.
    ///
    /// The previous pin id is forgotten before anything else happens, so a
    /// failed attempt leaves [`created_pin_id`](Self::created_pin_id) empty.
    pub async fn create_pin(&mut self) -> Result<String> {
        self.pin_id = None;

        self.ensure_login().await?;
        let pin_id = self.submit_pin().await?;

        self.last_response = None;
        self.pin_id = Some(pin_id.clone());

        tracing::info!("Created pin {}", pin_id);
        Ok(pin_id)
    }

    /// Profile data of the logged-in user, fetched once per session.
    ///
    /// The `repins_from` field is removed before the data is cached.
    pub async fn fetch_user_data(&mut self) -> Result<UserData> {
        if let Some(user_data) = &self.user_data {
            tracing::debug!("Returning cached user data");
            return Ok(user_data.clone());
        }

        self.ensure_login().await?;
        self.fetch_page(PROFILE_PAGE).await?;

        let mut user_data = self
            .last_app_json()
            .and_then(|app_json| {
                let mut root = Value::Object(app_json);
                match root.pointer_mut("/resourceDataCache/0/data")?.take() {
                    Value::Object(data) => Some(data),
                    _ => None,
                }
            })
            .ok_or(Error::UserData)?;

        user_data.remove(SENSITIVE_USER_FIELD);
        self.user_data = Some(user_data.clone());
        Ok(user_data)
    }

    /// Boards of the logged-in user as id to name, fetched once per session.
    ///
    /// Boards without a name are skipped.
    pub async fn fetch_boards(&mut self) -> Result<Boards> {
        if let Some(boards) = &self.boards {
            tracing::debug!("Returning cached boards");
            return Ok(boards.clone());
        }

        let user_data = self.fetch_user_data().await?;
        let username = username_of(&user_data).ok_or(Error::MissingUsername)?;

        let data = json!({
            "options": {
                "allow_stale": true,
                "field_set_key": "board_picker",
                "filter": "all",
                "shortlist_length": 1,
            },
            "context": {},
        });
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("source_url", &format!("/{}/", username))
            .append_pair("data", &data.to_string())
            .append_pair("module_path", BOARDS_MODULE_PATH)
            .append_pair("_", &cache_buster())
            .finish();

        self.issue_request(&format!("{}?{}", BOARDS_RESOURCE, query), Payload::Ajax, "")
            .await?;

        let mut boards = Boards::new();
        if let Some(Value::Array(all_boards)) =
            self.last_pointer("/resource_response/data/all_boards")
        {
            for board in all_boards {
                let id = board.get("id").and_then(scalar_to_string);
                let name = board.get("name").and_then(scalar_to_string);
                if let (Some(id), Some(name)) = (id, name) {
                    boards.insert(id, name);
                }
            }
        }

        tracing::debug!("Fetched {} boards", boards.len());
        self.boards = Some(boards.clone());
        Ok(boards)
    }

    /// Pins of the logged-in user, optionally only those on `board_id`.
    ///
    /// Board ids are compared loosely, so `"5"` matches a numeric `5`.
    pub async fn fetch_pins(&mut self, board_id: Option<&str>) -> Result<Vec<Value>> {
        let user_data = self.fetch_user_data().await?;
        let username = username_of(&user_data).ok_or(Error::Pins)?;

        let encoded: String = form_urlencoded::byte_serialize(username.as_bytes()).collect();
        let path = format!("/v3/pidgets/users/{}/pins/", encoded);
        tracing::debug!("GET {} (api)", path);

        let response = self.transport.send(HttpRequest::get(Host::Api, path)).await?;
        if response.status != 200 {
            tracing::warn!("Pin listing answered {} {}", response.status, response.reason);
            return Err(Error::Pins);
        }

        let collection: Value = serde_json::from_str(&response.body).map_err(|e| {
            tracing::warn!("Pin listing is not JSON: {}", e);
            Error::Pins
        })?;

        let pins = match collection.pointer("/data/pins") {
            Some(Value::Array(pins)) => pins.clone(),
            _ => return Ok(Vec::new()),
        };

        match board_id.filter(|id| is_truthy(&Value::String(id.to_string()))) {
            Some(board_id) => Ok(pins
                .into_iter()
                .filter(|pin| {
                    pin.pointer("/board/id")
                        .is_some_and(|id| loose_eq(id, board_id))
                })
                .collect()),
            None => Ok(pins),
        }
    }

    /// Log in unless this session already has.
    ///
    /// The CSRF token is dropped and re-derived right after the login request,
    /// before its response is checked, because the site hands out a new token
    /// to authenticated sessions.
    async fn ensure_login(&mut self) -> Result<()> {
        if self.is_logged_in {
            return Ok(());
        }

        tracing::debug!("Logging in as {}", self.credentials.login);

        let data = json!({
            "options": {
                "username_or_email": self.credentials.login,
                "password": self.credentials.password,
            },
            "context": {},
        });
        let form = vec![
            ("data".to_string(), data.to_string()),
            ("source_url".to_string(), LOGIN_PAGE.to_string()),
            ("module_path".to_string(), LOGIN_MODULE_PATH.to_string()),
        ];
        self.issue_request(LOGIN_RESOURCE, Payload::Form(form), LOGIN_PAGE)
            .await?;

        self.csrf_token = None;
        self.ensure_csrf_token("/").await?;

        if let Some(message) = self.server_error() {
            return Err(Error::rejected(message));
        }
        if !self
            .last_pointer("/resource_response/data")
            .is_some_and(is_truthy)
        {
            return Err(Error::Login);
        }

        self.is_logged_in = true;
        tracing::info!("Logged in as {}", self.credentials.login);
        Ok(())
    }

    /// Submit the pin creation form and return the new pin id
    async fn submit_pin(&mut self) -> Result<String> {
        let draft = &self.draft;
        let link = draft.link.as_deref().unwrap_or_default();
        let image = draft.image_url.as_deref().unwrap_or_default();

        let data = json!({
            "options": {
                "board_id": draft.board_id,
                "description": draft.description,
                "link": draft.link,
                "share_facebook": draft.share_facebook,
                "image_url": draft.image_url,
                "method": "scraped",
            },
            "context": {},
        });
        let module_path = format!(
            "App()>ImagesFeedPage(resource=FindPinImagesResource(url={link}))>Grid()>GridItems()>Pinnable(url={image}, type=pinnable, link={link})#Modal(module=PinCreate())"
        );
        let form = vec![
            ("data".to_string(), data.to_string()),
            ("source_url".to_string(), "/".to_string()),
            ("module_path".to_string(), module_path),
        ];

        self.issue_request(PIN_RESOURCE, Payload::Form(form), "/")
            .await?;

        if let Some(message) = self.server_error() {
            return Err(Error::rejected(message));
        }

        self.last_pointer("/resource_response/data/id")
            .filter(|id| is_truthy(id))
            .and_then(scalar_to_string)
            .ok_or(Error::PinCreation)
    }

    /// App version from the page bootstrap JSON, fetched once per session
    async fn ensure_app_version(&mut self) -> Result<String> {
        if let Some(app_version) = &self.app_version {
            return Ok(app_version.clone());
        }

        if !self.has_last_response() {
            self.fetch_page(LOGIN_PAGE).await?;
        }

        let app_version = self
            .last_app_json()
            .and_then(|app_json| {
                app_json
                    .get("context")?
                    .get("app_version")
                    .filter(|version| is_truthy(version))
                    .and_then(scalar_to_string)
            })
            .ok_or(Error::AppVersionNotFound)?;

        tracing::debug!("App version {}", app_version);
        self.app_version = Some(app_version.clone());
        Ok(app_version)
    }

    /// CSRF token from the last response cookies, fetching `referer` if
    /// nothing has been fetched yet
    async fn ensure_csrf_token(&mut self, referer: &str) -> Result<String> {
        if let Some(token) = &self.csrf_token {
            return Ok(token.clone());
        }

        if !self.has_last_response() {
            self.fetch_page(referer).await?;
        }

        let token = self
            .last_response
            .as_ref()
            .and_then(|response| scrape::extract_csrf_token(response.set_cookies()))
            .ok_or(Error::CsrfTokenNotFound)?;

        self.csrf_token = Some(token.clone());
        Ok(token)
    }

    /// Send a site request, adding whatever headers the payload kind needs
    async fn issue_request(&mut self, path: &str, payload: Payload, referer: &str) -> Result<()> {
        let request = match payload {
            Payload::Form(form) => {
                let app_version = self.ensure_app_version().await?;
                let csrf_token = self.ensure_csrf_token(LOGIN_PAGE).await?;
                ajax_headers(HttpRequest::post_form(Host::Site, path, form), app_version)
                    .with_header("X-CSRFToken", csrf_token)
                    .with_referer(referer)
            }
            Payload::Ajax => {
                let app_version = self.ensure_app_version().await?;
                ajax_headers(HttpRequest::get(Host::Site, path), app_version)
                    .with_header("X-Pinterest-AppState", "active")
            }
        };

        self.dispatch(request).await
    }

    /// Plain GET of a site page
    async fn fetch_page(&mut self, path: &str) -> Result<()> {
        self.dispatch(HttpRequest::get(Host::Site, path)).await
    }

    /// Send a request and store its response as the last response
    async fn dispatch(&mut self, request: HttpRequest) -> Result<()> {
        let path = request.path.clone();
        tracing::debug!("{:?} {}", request.method, path);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(Error::http(path, response.status, response.reason));
        }

        self.last_response = Some(LastResponse::new(
            ResponseBody::parse(response.body),
            response.headers,
        ));
        Ok(())
    }

    fn has_last_response(&self) -> bool {
        self.last_response
            .as_ref()
            .is_some_and(|response| !response.body.is_empty())
    }

    fn last_pointer(&self, pointer: &str) -> Option<&Value> {
        self.last_response.as_ref()?.body.pointer(pointer)
    }

    fn last_app_json(&self) -> Option<serde_json::Map<String, Value>> {
        let raw = self.last_response.as_ref()?.body.raw()?;
        scrape::extract_app_json(raw)
    }

    /// `resource_response.error` of the last response, when set
    fn server_error(&self) -> Option<String> {
        let error = self
            .last_pointer("/resource_response/error")
            .filter(|error| is_truthy(error))?;
        Some(match error {
            Value::String(message) => message.clone(),
            Value::Object(fields) => fields
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
            other => other.to_string(),
        })
    }
}

fn ajax_headers(request: HttpRequest, app_version: String) -> HttpRequest {
    request
        .with_header("X-NEW-APP", "1")
        .with_header("X-APP-VERSION", app_version)
        .with_header("X-Requested-With", "XMLHttpRequest")
        .with_header("Accept", AJAX_ACCEPT)
}

fn username_of(user_data: &UserData) -> Option<String> {
    user_data.get("username").and_then(scalar_to_string)
}
