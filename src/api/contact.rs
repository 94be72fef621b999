use crate::api::client::ApiClient;
use crate::api::traits::ContactApi;
use crate::api::types::{Ack, Envelope};
use crate::error::ApiError;
use crate::models::{ContactForm, InquiryType};
use async_trait::async_trait;
use tracing::info;

/// `/contact` endpoints (no authentication required)
#[derive(Debug, Clone)]
pub struct ContactService {
    client: ApiClient,
}

impl ContactService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactApi for ContactService {
    async fn submit(&self, form: &ContactForm) -> Result<Ack, ApiError> {
        info!("Sending contact form '{}' from {}", form.subject, form.email);
        self.client.post("contact/submit", form).await
    }

    async fn inquiry_types(&self) -> Result<Vec<InquiryType>, ApiError> {
        let envelope: Envelope<Vec<InquiryType>> = self.client.get("contact/types", &[]).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}
