pub mod client;
pub mod traits;
pub mod types;

pub use client::ApiClient;
pub use traits::{EnvToken, ListingApi, StaticToken, TokenProvider};
