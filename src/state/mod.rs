//! Application state as plain values with tagged-union actions.
//!
//! Each state type has a pure `reduce(state, action)` and a `dispatch`
//! convenience; views own their state and pass it where it is needed.

pub mod auth;
pub mod listings;

pub use auth::{AuthAction, AuthState};
pub use listings::{FilterUpdate, ListingAction, ListingState};
