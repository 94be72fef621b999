pub mod admin;
pub mod auth;
pub mod client;
pub mod contact;
pub mod property;
pub mod traits;
pub mod types;

pub use admin::AdminService;
pub use auth::AuthService;
pub use client::{ApiClient, Session};
pub use contact::ContactService;
pub use property::PropertyService;
pub use traits::{AdminApi, AuthApi, ContactApi, PropertyApi};
pub use types::Ack;
