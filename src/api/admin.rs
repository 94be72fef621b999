use crate::api::client::ApiClient;
use crate::api::traits::AdminApi;
use crate::api::types::{Ack, Envelope};
use crate::error::ApiError;
use crate::models::{AdminQuery, Listing, ListingPage};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

/// `/admin` endpoints
#[derive(Debug, Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminApi for AdminService {
    async fn list_properties(&self, query: &AdminQuery) -> Result<Vec<Listing>, ApiError> {
        debug!("Fetching admin properties with {:?}", query);
        let envelope: Envelope<ListingPage> = self.client.get("admin/properties", &query.to_query()).await?;
        Ok(envelope.data.unwrap_or_default().properties)
    }

    async fn approve(&self, id: &str) -> Result<Ack, ApiError> {
        info!("Approving property {}", id);
        self.client
            .patch(&format!("admin/properties/{}/approve", id), &json!({}))
            .await
    }

    async fn reject(&self, id: &str, reason: &str) -> Result<Ack, ApiError> {
        info!("Rejecting property {}: {}", id, reason);
        self.client
            .patch(&format!("admin/properties/{}/reject", id), &json!({ "reason": reason }))
            .await
    }

    async fn delete(&self, id: &str) -> Result<Ack, ApiError> {
        info!("Deleting property {}", id);
        self.client.delete(&format!("admin/properties/{}", id)).await
    }

    async fn dashboard(&self) -> Result<serde_json::Value, ApiError> {
        let envelope: Envelope<serde_json::Value> = self.client.get("admin/dashboard", &[]).await?;
        Ok(envelope.data.unwrap_or(serde_json::Value::Null))
    }
}
