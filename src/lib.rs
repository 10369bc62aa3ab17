//! Listing promotion checkout core for a real-estate marketplace:
//! plan/duration selection, price computation, draft normalization,
//! property submission and post-submit routing, on top of a REST API
//! client and a slice-style client state store.

pub mod api;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod plans;
pub mod store;

pub use checkout::{CheckoutFlow, CheckoutRoute};
pub use error::{ApiError, CheckoutError};
pub use plans::{PlanSelection, PromotionPlan};
