use crate::api::client::{ApiClient, Session};
use crate::api::traits::AuthApi;
use crate::api::types::{Envelope, UserData};
use crate::error::ApiError;
use crate::models::{AuthSession, Credentials, Registration, User};
use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

/// `/auth` endpoints. Successful logins are stored in the shared session.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn store(&self, session: &AuthSession) {
        self.client.set_session(Session {
            token: Some(session.token.clone()),
            refresh_token: session.refresh_token.clone(),
        });
    }

    fn unwrap_session(envelope: Envelope<AuthSession>) -> Result<AuthSession, ApiError> {
        envelope.data.ok_or_else(|| ApiError::Server {
            status: 200,
            message: envelope.message.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl AuthApi for AuthService {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        info!("Logging in as {}", credentials.email);
        let envelope: Envelope<AuthSession> = self.client.post("auth/login", credentials).await?;
        let session = Self::unwrap_session(envelope)?;
        self.store(&session);
        Ok(session)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession, ApiError> {
        info!("Registering {} as {}", registration.email, registration.role);
        let envelope: Envelope<AuthSession> = self.client.post("auth/register", registration).await?;
        let session = Self::unwrap_session(envelope)?;
        self.store(&session);
        Ok(session)
    }

    async fn profile(&self) -> Result<User, ApiError> {
        let envelope: Envelope<UserData<User>> = self.client.get("auth/profile", &[]).await?;
        envelope.data.map(|data| data.user).ok_or_else(|| ApiError::Server {
            status: 200,
            message: "Profile unavailable".to_string(),
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let result: Result<serde_json::Value, ApiError> = self.client.post("auth/logout", &json!({})).await;
        // local credentials go regardless of what the backend says
        self.client.clear_session();
        if let Err(e) = &result {
            warn!("Logout request failed: {}", e);
        }
        result.map(|_| ())
    }

    async fn refresh(&self) -> Result<AuthSession, ApiError> {
        let refresh_token = self.client.session().refresh_token.ok_or(ApiError::Unauthorized)?;
        let envelope: Envelope<AuthSession> = self
            .client
            .post("auth/refresh-token", &json!({ "refreshToken": refresh_token }))
            .await?;
        let session = Self::unwrap_session(envelope)?;
        self.store(&session);
        Ok(session)
    }
}
