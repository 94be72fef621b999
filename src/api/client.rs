use crate::api::types::ErrorBody;
use crate::config::Config;
use crate::error::ApiError;
use anyhow::{Context, Result};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Tokens issued by the auth endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Shared HTTP client for every backend service.
///
/// Cloning is cheap and clones share the same session, so a login through
/// one service authorizes the others.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<RwLock<Session>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("estate-desk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to create HTTP client")?;

        debug!("API base URL: {}", config.api_url);

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session: Arc::new(RwLock::new(Session {
                token: config.api_token.clone(),
                refresh_token: None,
            })),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn session(&self) -> Session {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_session(&self, session: Session) {
        match self.session.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    pub fn clear_session(&self) {
        self.set_session(Session::default());
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().token.is_some()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.patch(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.delete(self.url(path))).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ApiError> {
        self.send(self.http.post(self.url(path)).multipart(form)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let token = self.session().token;
        let authorized = token.is_some();
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response: {}", e);
            ApiError::Network(e)
        })?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.bytes().await.map_err(ApiError::Network)?;
        debug!("{} -> {} ({} bytes)", url, status, body.len());

        // a 401 on an anonymous request (e.g. bad login) carries its own message
        if status == StatusCode::UNAUTHORIZED && authorized {
            warn!("Backend returned 401 for {}, clearing stored credentials", url);
            self.clear_session();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            warn!("Backend returned status: {}", status);
            let error: ErrorBody = serde_json::from_slice(&body).unwrap_or_default();
            return Err(error.into_error(status.as_u16()));
        }

        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }
}
