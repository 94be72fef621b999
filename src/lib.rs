//! Client side of a real-estate listing platform: the property submission
//! wizard, admin review board, application state and a typed REST client
//! for the listing backend.

pub mod api;
pub mod config;
pub mod contact;
pub mod error;
pub mod format;
pub mod models;
pub mod review;
pub mod state;
pub mod wizard;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::ApiError;
