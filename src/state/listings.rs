use crate::api::PropertyApi;
use crate::models::{Furnished, Listing, ListingFilters, Pagination, PropertyType, SortKey, SortOrder};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingState {
    pub listings: Vec<Listing>,
    pub current: Option<Listing>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: ListingFilters,
    pub pagination: Pagination,
}

/// One filter field change
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Type(Option<PropertyType>),
    Location(String),
    MinPrice(Option<u64>),
    MaxPrice(Option<u64>),
    Bedrooms(Option<u32>),
    Furnished(Option<Furnished>),
    Sort(SortKey, SortOrder),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingAction {
    SetLoading(bool),
    SetError(String),
    SetListings(Vec<Listing>),
    SetCurrent(Listing),
    Add(Listing),
    Update(Listing),
    Delete(String),
    SetFilter(FilterUpdate),
    ClearFilters,
    SetPagination(Pagination),
    ClearCurrent,
}

pub fn reduce(mut state: ListingState, action: ListingAction) -> ListingState {
    match action {
        ListingAction::SetLoading(loading) => state.loading = loading,
        ListingAction::SetError(message) => {
            state.error = Some(message);
            state.loading = false;
        }
        ListingAction::SetListings(listings) => {
            state.listings = listings;
            state.loading = false;
            state.error = None;
        }
        ListingAction::SetCurrent(listing) => {
            state.current = Some(listing);
            state.loading = false;
            state.error = None;
        }
        ListingAction::Add(listing) => state.listings.insert(0, listing),
        ListingAction::Update(listing) => {
            if let Some(slot) = state.listings.iter_mut().find(|l| l.id == listing.id) {
                *slot = listing.clone();
            }
            if state.current.as_ref().map_or(false, |c| c.id == listing.id) {
                state.current = Some(listing);
            }
        }
        ListingAction::Delete(id) => {
            state.listings.retain(|l| l.id != id);
            if state.current.as_ref().map_or(false, |c| c.id == id) {
                state.current = None;
            }
        }
        ListingAction::SetFilter(update) => apply_filter(&mut state.filters, update),
        ListingAction::ClearFilters => state.filters = ListingFilters::default(),
        ListingAction::SetPagination(pagination) => state.pagination = pagination,
        ListingAction::ClearCurrent => state.current = None,
    }
    state
}

fn apply_filter(filters: &mut ListingFilters, update: FilterUpdate) {
    match update {
        FilterUpdate::Type(v) => filters.kind = v,
        FilterUpdate::Location(v) => filters.location = v,
        FilterUpdate::MinPrice(v) => filters.min_price = v,
        FilterUpdate::MaxPrice(v) => filters.max_price = v,
        FilterUpdate::Bedrooms(v) => filters.bedrooms = v,
        FilterUpdate::Furnished(v) => filters.furnished = v,
        FilterUpdate::Sort(key, order) => {
            filters.sort_by = key;
            filters.sort_order = order;
        }
    }
}

impl ListingState {
    pub fn dispatch(&mut self, action: ListingAction) {
        *self = reduce(std::mem::take(self), action);
    }

    /// Fetch the page described by the current filters and pagination
    pub async fn refresh(&mut self, api: &dyn PropertyApi) {
        if let Err(message) = self.filters.check_price_range() {
            self.dispatch(ListingAction::SetError(message.to_string()));
            return;
        }

        self.dispatch(ListingAction::SetLoading(true));
        match api.list(&self.filters, &self.pagination).await {
            Ok(page) => {
                self.dispatch(ListingAction::SetListings(page.properties));
                self.dispatch(ListingAction::SetPagination(page.pagination));
            }
            Err(e) => {
                warn!("Failed to load listings: {}", e);
                self.dispatch(ListingAction::SetError(e.notification("Failed to load properties")));
            }
        }
    }

    pub async fn open(&mut self, api: &dyn PropertyApi, id: &str) {
        self.dispatch(ListingAction::SetLoading(true));
        match api.get(id).await {
            Ok(listing) => self.dispatch(ListingAction::SetCurrent(listing)),
            Err(e) => self.dispatch(ListingAction::SetError(e.notification("Property not found"))),
        }
    }
}
