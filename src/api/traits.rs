use crate::api::types::{
    AuthSession, CreatePropertyRequest, LoginRequest, PaymentSession, PaymentSessionRequest,
    UploadedMedia,
};
use crate::error::ApiError;
use crate::models::SavedProperty;
use async_trait::async_trait;

/// Backend surface the marketplace front-end consumes.
/// The checkout flow and the store are generic over this so they can be
/// exercised against an in-memory fake without a live server.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Exchange credentials for a session token
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, ApiError>;

    /// Listings shown on the home screen
    async fn list_properties(&self) -> Result<Vec<SavedProperty>, ApiError>;

    /// Single property for the detail screen
    async fn get_property(&self, id: &str) -> Result<SavedProperty, ApiError>;

    /// Create a property from a normalized payload; the response is
    /// normalized into exactly one `SavedProperty` shape at this boundary.
    async fn create_property(
        &self,
        request: &CreatePropertyRequest,
    ) -> Result<SavedProperty, ApiError>;

    /// Upload one media file, returning its hosted URL
    async fn upload_image(&self, filename: &str, bytes: Vec<u8>)
        -> Result<UploadedMedia, ApiError>;

    /// Open a hosted payment session for a promoted listing
    async fn create_payment_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> Result<PaymentSession, ApiError>;
}

/// Source of the bearer token attached to authenticated calls.
/// Injected into the client instead of read from ambient storage.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Fixed token, or none for anonymous calls
pub struct StaticToken(pub Option<String>);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Token read from an environment variable on each call
pub struct EnvToken {
    pub var: String,
}

impl TokenProvider for EnvToken {
    fn token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|t| !t.is_empty())
    }
}
