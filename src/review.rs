use crate::api::AdminApi;
use crate::error::ApiError;
use crate::models::{AdminQuery, Category, Listing, PropertyStatus};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Reason sent when an admin rejects without typing one
pub const DEFAULT_REJECT_REASON: &str = "Property does not meet our standards";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewAction {
    Approve,
    Reject,
    Delete,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
            ReviewAction::Delete => "delete",
        })
    }
}

/// Where a listing stands from the admin view's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Listed(PropertyStatus),
    Deleted,
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("cannot {action} property {id}")]
    Unavailable { id: String, action: ReviewAction },

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
}

/// Admin dashboard's local copy of backend listings.
///
/// Statuses live on the backend; after each successful action the board
/// relabels or drops the item to match what the backend now holds.
#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    listings: Vec<Listing>,
    deleted: HashSet<String>,
}

impl ReviewBoard {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            deleted: HashSet::new(),
        }
    }

    pub async fn load(api: &dyn AdminApi, query: &AdminQuery) -> Result<Self, ApiError> {
        let listings = api.list_properties(query).await?;
        info!("Loaded {} properties for review", listings.len());
        Ok(Self::new(listings))
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Listings without a status are treated as awaiting review
    pub fn status_of(&self, id: &str) -> Option<ReviewStatus> {
        if self.deleted.contains(id) {
            return Some(ReviewStatus::Deleted);
        }
        self.get(id)
            .map(|l| ReviewStatus::Listed(l.status.unwrap_or(PropertyStatus::Pending)))
    }

    pub fn available_actions(&self, id: &str) -> Vec<ReviewAction> {
        match self.status_of(id) {
            Some(ReviewStatus::Listed(PropertyStatus::Pending)) => {
                vec![ReviewAction::Approve, ReviewAction::Reject, ReviewAction::Delete]
            }
            Some(ReviewStatus::Listed(_)) => vec![ReviewAction::Delete],
            Some(ReviewStatus::Deleted) | None => Vec::new(),
        }
    }

    pub fn pending(&self) -> Vec<&Listing> {
        self.filtered(Some(PropertyStatus::Pending), None)
    }

    pub fn filtered(&self, status: Option<PropertyStatus>, category: Option<Category>) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|l| status.map_or(true, |s| l.status.unwrap_or(PropertyStatus::Pending) == s))
            .filter(|l| category.map_or(true, |c| l.category == c.as_str()))
            .collect()
    }

    pub fn counts(&self) -> ReviewCounts {
        let mut counts = ReviewCounts {
            total: self.listings.len(),
            ..ReviewCounts::default()
        };
        for listing in &self.listings {
            match listing.status.unwrap_or(PropertyStatus::Pending) {
                PropertyStatus::Pending => counts.pending += 1,
                PropertyStatus::Approved => counts.approved += 1,
                PropertyStatus::Rejected => counts.rejected += 1,
                _ => {}
            }
        }
        counts
    }

    pub async fn approve(&mut self, api: &dyn AdminApi, id: &str) -> Result<(), ReviewError> {
        self.ensure_available(id, ReviewAction::Approve)?;
        api.approve(id).await?;
        self.record(id, ReviewAction::Approve);
        Ok(())
    }

    /// An empty `reason` is replaced by [`DEFAULT_REJECT_REASON`]
    pub async fn reject(&mut self, api: &dyn AdminApi, id: &str, reason: &str) -> Result<(), ReviewError> {
        self.ensure_available(id, ReviewAction::Reject)?;
        let reason = if reason.trim().is_empty() {
            DEFAULT_REJECT_REASON
        } else {
            reason
        };
        api.reject(id, reason).await?;
        self.record(id, ReviewAction::Reject);
        Ok(())
    }

    pub async fn delete(&mut self, api: &dyn AdminApi, id: &str) -> Result<(), ReviewError> {
        self.ensure_available(id, ReviewAction::Delete)?;
        api.delete(id).await?;
        self.record(id, ReviewAction::Delete);
        Ok(())
    }

    /// Reflect an action the backend has acknowledged
    pub fn record(&mut self, id: &str, action: ReviewAction) {
        match action {
            ReviewAction::Approve => self.relabel(id, PropertyStatus::Approved),
            ReviewAction::Reject => self.relabel(id, PropertyStatus::Rejected),
            ReviewAction::Delete => {
                self.listings.retain(|l| l.id != id);
                self.deleted.insert(id.to_string());
            }
        }
    }

    fn relabel(&mut self, id: &str, status: PropertyStatus) {
        if let Some(listing) = self.listings.iter_mut().find(|l| l.id == id) {
            listing.status = Some(status);
        }
    }

    fn ensure_available(&self, id: &str, action: ReviewAction) -> Result<(), ReviewError> {
        if self.available_actions(id).contains(&action) {
            Ok(())
        } else {
            warn!("Refusing to {} property {}", action, id);
            Err(ReviewError::Unavailable {
                id: id.to_string(),
                action,
            })
        }
    }
}
