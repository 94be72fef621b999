use super::{Category, Furnished, PropertyStatus, PropertyType, SortKey, SortOrder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Property record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: Option<PropertyStatus>,
    #[serde(default)]
    pub price: ListingPrice,
    #[serde(default)]
    pub area: ListingArea,
    #[serde(default)]
    pub location: ListingLocation,
    #[serde(default)]
    pub features: serde_json::Value,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<ListingImage>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingPrice {
    pub amount: f64,
    pub currency: String,
    pub negotiable: bool,
}

impl Default for ListingPrice {
    fn default() -> Self {
        Self {
            amount: 0.0,
            currency: "INR".to_string(),
            negotiable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingArea {
    pub size: f64,
    pub unit: String,
}

impl Default for ListingArea {
    fn default() -> Self {
        Self {
            size: 0.0,
            unit: "sqft".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub landmark: String,
    pub neighborhood: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingImage {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Owner {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Property Owner")
    }

    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("Contact via form")
    }
}

/// Page metadata returned alongside listing collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 12,
            total: 0,
            total_pages: 0,
        }
    }
}

/// `data` payload of a listing collection response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingPage {
    pub properties: Vec<Listing>,
    pub pagination: Pagination,
}

/// Search filters for the public listing view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilters {
    pub kind: Option<PropertyType>,
    pub location: String,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub bedrooms: Option<u32>,
    pub furnished: Option<Furnished>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl ListingFilters {
    /// Query parameters for `GET /properties`. Unset filters are omitted.
    pub fn to_query(&self, pagination: &Pagination) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(kind) = self.kind {
            query.push(("type", kind.as_str().to_string()));
        }
        if !self.location.trim().is_empty() {
            query.push(("location", self.location.trim().to_string()));
        }
        if let Some(min) = self.min_price {
            query.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            query.push(("maxPrice", max.to_string()));
        }
        if let Some(bedrooms) = self.bedrooms {
            query.push(("bedrooms", bedrooms.to_string()));
        }
        if let Some(furnished) = self.furnished {
            query.push(("furnished", furnished.as_str().to_string()));
        }
        query.push(("sortBy", self.sort_by.as_str().to_string()));
        query.push(("sortOrder", self.sort_order.as_str().to_string()));
        query.push(("page", pagination.page.to_string()));
        query.push(("limit", pagination.limit.to_string()));

        query
    }

    /// Rejects a price range whose minimum is not below its maximum
    pub fn check_price_range(&self) -> Result<(), &'static str> {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min >= max => {
                Err("Minimum price should be less than maximum price")
            }
            _ => Ok(()),
        }
    }
}

/// Filters accepted by `GET /admin/properties`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminQuery {
    pub status: Option<PropertyStatus>,
    pub category: Option<Category>,
}

impl AdminQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(category) = self.category {
            query.push(("category", category.as_str().to_string()));
        }
        query
    }
}
