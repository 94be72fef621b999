use crate::api::client::ApiClient;
use crate::api::traits::PropertyApi;
use crate::api::types::{Ack, Envelope, PropertyData};
use crate::error::ApiError;
use crate::models::{Listing, ListingFilters, ListingPage, Pagination};
use crate::wizard::SubmissionPayload;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

/// `/properties` endpoints
#[derive(Debug, Clone)]
pub struct PropertyService {
    client: ApiClient,
}

impl PropertyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PropertyApi for PropertyService {
    async fn list(&self, filters: &ListingFilters, pagination: &Pagination) -> Result<ListingPage, ApiError> {
        let query = filters.to_query(pagination);
        debug!("Fetching listings with {:?}", query);

        let envelope: Envelope<ListingPage> = self.client.get("properties", &query).await?;
        let page = envelope.data.unwrap_or_default();

        info!("Fetched {} listings (page {})", page.properties.len(), page.pagination.page);
        Ok(page)
    }

    async fn get(&self, id: &str) -> Result<Listing, ApiError> {
        let envelope: Envelope<PropertyData<Listing>> = self.client.get(&format!("properties/{}", id), &[]).await?;
        envelope
            .data
            .map(|data| data.property)
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Property not found".to_string(),
            })
    }

    async fn mine(&self) -> Result<Vec<Listing>, ApiError> {
        let envelope: Envelope<ListingPage> = self.client.get("properties/user/my-properties", &[]).await?;
        Ok(envelope.data.unwrap_or_default().properties)
    }

    async fn create(&self, payload: SubmissionPayload) -> Result<Ack, ApiError> {
        info!(
            "Submitting property with {} fields and {} images",
            payload.fields.len(),
            payload.images.len()
        );
        let form = payload
            .into_form()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        self.client.post_multipart("properties", form).await
    }

    async fn delete(&self, id: &str) -> Result<Ack, ApiError> {
        self.client.delete(&format!("properties/{}", id)).await
    }

    async fn express_interest(&self, id: &str, message: &str) -> Result<Ack, ApiError> {
        self.client
            .post(&format!("properties/{}/interest", id), &json!({ "message": message }))
            .await
    }
}
