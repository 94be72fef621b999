use crate::api::types::Ack;
use crate::error::ApiError;
use crate::models::{
    AdminQuery, AuthSession, ContactForm, Credentials, InquiryType, Listing, ListingFilters,
    ListingPage, Pagination, Registration, User,
};
use crate::wizard::SubmissionPayload;
use async_trait::async_trait;

/// Public and owner-facing property endpoints
#[async_trait]
pub trait PropertyApi: Send + Sync {
    async fn list(&self, filters: &ListingFilters, pagination: &Pagination) -> Result<ListingPage, ApiError>;

    async fn get(&self, id: &str) -> Result<Listing, ApiError>;

    /// Properties owned by the signed-in user
    async fn mine(&self) -> Result<Vec<Listing>, ApiError>;

    /// Send a completed submission as one multipart request
    async fn create(&self, payload: SubmissionPayload) -> Result<Ack, ApiError>;

    async fn delete(&self, id: &str) -> Result<Ack, ApiError>;

    async fn express_interest(&self, id: &str, message: &str) -> Result<Ack, ApiError>;
}

/// Admin review endpoints
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_properties(&self, query: &AdminQuery) -> Result<Vec<Listing>, ApiError>;

    async fn approve(&self, id: &str) -> Result<Ack, ApiError>;

    async fn reject(&self, id: &str, reason: &str) -> Result<Ack, ApiError>;

    async fn delete(&self, id: &str) -> Result<Ack, ApiError>;

    async fn dashboard(&self) -> Result<serde_json::Value, ApiError>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<AuthSession, ApiError>;

    async fn profile(&self) -> Result<User, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    async fn refresh(&self) -> Result<AuthSession, ApiError>;
}

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<Ack, ApiError>;

    async fn inquiry_types(&self) -> Result<Vec<InquiryType>, ApiError>;
}
