use crate::models::{FileUpload, JournalEntry, Media, MediaKind, NewJournal, PersonalInfo};
use crate::storage::{load_token, remove_token, save_token};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
    Request,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub body: String,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn new(kind: ApiErrorKind, message: String) -> Self {
        Self {
            kind,
            status: None,
            body: String::new(),
            message,
        }
    }

    fn network(e: reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Network, e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::new(ApiErrorKind::Parse, e.to_string())
    }

    pub(crate) fn request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Request, message.into())
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn timed_out(after: Duration) -> Self {
        Self::new(
            ApiErrorKind::Network,
            format!("Request timed out after {} ms", after.as_millis()),
        )
    }

    pub(crate) fn unauthorized(body: String) -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            status: Some(401),
            body,
            message: "Unauthorized".to_string(),
        }
    }

    pub(crate) fn http(status: u16, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            status: Some(status),
            message: format!("{ctx} ({status}): {body}"),
            body,
        }
    }

    /// 401, or a 403 from a backend that rejects stale tokens that way.
    pub(crate) fn is_auth_failure(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized || self.status == Some(403)
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub timeout_ms: u64,
}

/// Read `window.ENV[key]`, trying each spelling in order.
#[cfg(target_arch = "wasm32")]
fn env_value(keys: &[&str]) -> Option<wasm_bindgen::JsValue> {
    let env = web_sys::window()?.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }
    keys.iter()
        .filter_map(|k| js_sys::Reflect::get(&env, &(*k).into()).ok())
        .find(|v| !v.is_undefined() && !v.is_null())
}

// There is no `window` off the browser; native builds use the defaults.
#[cfg(not(target_arch = "wasm32"))]
fn env_value(_keys: &[&str]) -> Option<wasm_bindgen::JsValue> {
    None
}

impl EnvConfig {
    pub fn new() -> Self {
        // `window.ENV.API_URL` is the documented form; `api_url` is accepted too.
        let api_url = env_value(&["API_URL", "api_url"])
            .and_then(|v| v.as_string())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_ms = env_value(&["API_TIMEOUT_MS", "api_timeout_ms"])
            .and_then(|v| v.as_f64().or_else(|| v.as_string()?.parse().ok()))
            .filter(|ms| *ms > 0.0)
            .map(|ms| ms as u64)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            api_url,
            timeout_ms,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub nickname: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// Resolve `fut`, or fail with a network error once `timeout` has passed.
///
/// Browser fetch has no deadline of its own, so on wasm the whole exchange
/// (headers and body) races a timer. Native builds rely on reqwest's
/// per-request timeout set in `ApiClient::builder`.
pub(crate) async fn within<T>(
    timeout: Duration,
    fut: impl std::future::Future<Output = ApiResult<T>>,
) -> ApiResult<T> {
    #[cfg(target_arch = "wasm32")]
    {
        use futures::future::{select, Either};

        let timer = gloo_timers::future::sleep(timeout);
        match select(Box::pin(fut), Box::pin(timer)).await {
            Either::Left((res, _)) => res,
            Either::Right(_) => Err(ApiError::timed_out(timeout)),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = timeout;
        fut.await
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
    pub(crate) timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn load_from_storage() -> Self {
        let config = EnvConfig::new();
        let mut client = Self::new(config.api_url);
        client.timeout = Duration::from_millis(config.timeout_ms);
        client.token = load_token();
        client
    }

    pub fn save_to_storage(&self) {
        if let Some(token) = &self.token {
            save_token(token);
        }
    }

    pub fn clear_storage() {
        remove_token();
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    pub(crate) fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    pub fn logout(&mut self) {
        self.token = None;
        Self::clear_storage();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn journal_path(id: i64) -> String {
        format!("/travel-journals/{}", urlencoding::encode(&id.to_string()))
    }

    fn builder(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let client = reqwest::Client::new();
        let mut req = client.request(method, self.url(path));
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        // reqwest ignores this on wasm; `within` covers that target.
        #[cfg(not(target_arch = "wasm32"))]
        {
            req = req.timeout(self.timeout);
        }
        req
    }

    async fn send(&self, req: reqwest::RequestBuilder, ctx: &str) -> ApiResult<reqwest::Response> {
        within(self.timeout, Self::dispatch(req, ctx)).await
    }

    async fn dispatch(req: reqwest::RequestBuilder, ctx: &str) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        if status.as_u16() == 401 {
            Err(ApiError::unauthorized(body))
        } else {
            Err(ApiError::http(status.as_u16(), body, ctx))
        }
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        ctx: &str,
    ) -> ApiResult<T> {
        within(self.timeout, async {
            Self::dispatch(req, ctx)
                .await?
                .json()
                .await
                .map_err(ApiError::parse)
        })
        .await
    }

    fn file_part(upload: FileUpload) -> ApiResult<reqwest::multipart::Part> {
        let FileUpload {
            file_name,
            mime,
            bytes,
        } = upload;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        if mime.trim().is_empty() {
            return Ok(part);
        }
        part.mime_str(&mime)
            .map_err(|e| ApiError::request(format!("invalid file type {mime:?}: {e}")))
    }

    pub async fn list_journals(&self) -> ApiResult<Vec<JournalEntry>> {
        let req = self.builder(reqwest::Method::GET, "/travel-journals");
        self.send_json(req, "List journals failed").await
    }

    pub async fn get_journal(&self, id: i64) -> ApiResult<JournalEntry> {
        let req = self.builder(reqwest::Method::GET, &Self::journal_path(id));
        self.send_json(req, "Load journal failed").await
    }

    pub async fn create_journal(&self, body: &NewJournal) -> ApiResult<JournalEntry> {
        let req = self
            .builder(reqwest::Method::POST, "/travel-journals")
            .json(body);
        self.send_json(req, "Create journal failed").await
    }

    pub async fn update_journal(&self, id: i64, entry: &JournalEntry) -> ApiResult<JournalEntry> {
        let req = self
            .builder(reqwest::Method::PUT, &Self::journal_path(id))
            .json(entry);
        self.send_json(req, "Save journal failed").await
    }

    pub async fn delete_journals(&self, ids: &[i64]) -> ApiResult<()> {
        let req = self
            .builder(reqwest::Method::DELETE, "/travel-journals")
            .json(ids);
        self.send(req, "Delete journals failed").await?;
        Ok(())
    }

    pub async fn upload_media(
        &self,
        journal_id: i64,
        upload: FileUpload,
        kind: MediaKind,
    ) -> ApiResult<Media> {
        let form = reqwest::multipart::Form::new()
            .part("file", Self::file_part(upload)?)
            .text("type", kind.as_str());
        let path = format!("{}/media", Self::journal_path(journal_id));
        let req = self.builder(reqwest::Method::POST, &path).multipart(form);
        self.send_json(req, "Upload media failed").await
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        let req = self
            .builder(reqwest::Method::POST, "/user/login")
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            });
        self.send_json(req, "Login failed").await
    }

    pub async fn register(
        &self,
        username: &str,
        nickname: &str,
        password: &str,
    ) -> ApiResult<TokenResponse> {
        let req = self
            .builder(reqwest::Method::POST, "/user/register")
            .json(&RegisterRequest {
                username: username.to_string(),
                nickname: nickname.to_string(),
                password: password.to_string(),
            });
        self.send_json(req, "Register failed").await
    }

    pub async fn get_personal_info(&self) -> ApiResult<PersonalInfo> {
        let req = self.builder(reqwest::Method::GET, "/user/personal-info");
        self.send_json(req, "Load personal info failed").await
    }

    pub async fn update_personal_info(&self, info: &PersonalInfo) -> ApiResult<PersonalInfo> {
        let req = self
            .builder(reqwest::Method::PUT, "/user/personal-info")
            .json(info);
        self.send_json(req, "Save personal info failed").await
    }

    pub async fn upload_avatar(&self, upload: FileUpload) -> ApiResult<String> {
        let form = reqwest::multipart::Form::new().part("file", Self::file_part(upload)?);
        let req = self
            .builder(reqwest::Method::POST, "/user/upload-avatar")
            .multipart(form);
        let text = within(self.timeout, async {
            Self::dispatch(req, "Upload avatar failed")
                .await?
                .text()
                .await
                .map_err(ApiError::parse)
        })
        .await?;
        Ok(Self::parse_avatar_url(&text))
    }

    /// The avatar endpoint answers with a bare URL, sometimes JSON-quoted.
    pub(crate) fn parse_avatar_url(text: &str) -> String {
        serde_json::from_str::<String>(text).unwrap_or_else(|_| text.trim().to_string())
    }
}
