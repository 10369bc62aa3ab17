use crate::api::types::{AuthSession, LoginRequest};
use crate::api::ListingApi;
use crate::models::SavedProperty;
use std::sync::Arc;
use tracing::warn;

/// One async-fetched piece of state: pending/data/error, plus the idle
/// state before the first fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Slice<T> {
    #[default]
    Idle,
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Slice<T> {
    /// Mark a fetch as started
    pub fn begin(&mut self) {
        *self = Slice::Pending;
    }

    pub fn resolve(&mut self, data: T) {
        *self = Slice::Ready(data);
    }

    pub fn reject(&mut self, message: impl Into<String>) {
        *self = Slice::Failed(message.into());
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slice::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Slice::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Slice::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Client-side store: one slice per async-fetched domain concern
pub struct AppStore<A: ListingApi> {
    api: Arc<A>,
    pub listings: Slice<Vec<SavedProperty>>,
    pub detail: Slice<SavedProperty>,
    pub auth: Slice<AuthSession>,
}

impl<A: ListingApi> AppStore<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            listings: Slice::Idle,
            detail: Slice::Idle,
            auth: Slice::Idle,
        }
    }

    /// Fetch the home-screen listings into the `listings` slice
    pub async fn load_home(&mut self) {
        self.listings.begin();
        match self.api.list_properties().await {
            Ok(properties) => self.listings.resolve(properties),
            Err(e) => {
                warn!("failed to load home listings: {}", e);
                self.listings.reject(e.to_string());
            }
        }
    }

    /// Fetch one property into the `detail` slice
    pub async fn load_property(&mut self, id: &str) {
        self.detail.begin();
        match self.api.get_property(id).await {
            Ok(property) => self.detail.resolve(property),
            Err(e) => {
                warn!("failed to load property {}: {}", id, e);
                self.detail.reject(e.to_string());
            }
        }
    }

    /// Sign in and hold the session in the `auth` slice
    pub async fn sign_in(&mut self, request: LoginRequest) {
        self.auth.begin();
        match self.api.login(request).await {
            Ok(session) => self.auth.resolve(session),
            Err(e) => {
                warn!("sign-in failed: {}", e);
                self.auth.reject(e.to_string());
            }
        }
    }

    /// Current session token, if signed in
    pub fn session_token(&self) -> Option<&str> {
        self.auth.data().map(|session| session.token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{
        CreatePropertyRequest, PaymentSession, PaymentSessionRequest, UploadedMedia,
    };
    use crate::error::ApiError;
    use async_trait::async_trait;

    struct FixtureApi {
        listings: Vec<SavedProperty>,
        fail: bool,
    }

    fn sample(id: &str) -> SavedProperty {
        SavedProperty {
            id: id.to_string(),
            title: Some("House in Bole".to_string()),
            property_type: Some("House".to_string()),
            total_price: Some(100_000),
            address: None,
            images: Vec::new(),
            created_at: None,
        }
    }

    #[async_trait]
    impl ListingApi for FixtureApi {
        async fn login(&self, _request: LoginRequest) -> Result<AuthSession, ApiError> {
            if self.fail {
                return Err(ApiError::Status {
                    code: 401,
                    message: "bad credentials".to_string(),
                });
            }
            Ok(AuthSession {
                token: "tok-1".to_string(),
                user_id: Some("u-1".to_string()),
                display_name: None,
            })
        }

        async fn list_properties(&self) -> Result<Vec<SavedProperty>, ApiError> {
            if self.fail {
                return Err(ApiError::Status {
                    code: 500,
                    message: "listings unavailable".to_string(),
                });
            }
            Ok(self.listings.clone())
        }

        async fn get_property(&self, id: &str) -> Result<SavedProperty, ApiError> {
            Ok(sample(id))
        }

        async fn create_property(
            &self,
            _request: &CreatePropertyRequest,
        ) -> Result<SavedProperty, ApiError> {
            unimplemented!("not used by store tests")
        }

        async fn upload_image(
            &self,
            _filename: &str,
            _bytes: Vec<u8>,
        ) -> Result<UploadedMedia, ApiError> {
            unimplemented!("not used by store tests")
        }

        async fn create_payment_session(
            &self,
            _request: &PaymentSessionRequest,
        ) -> Result<PaymentSession, ApiError> {
            unimplemented!("not used by store tests")
        }
    }

    #[test]
    fn slice_walks_idle_pending_ready() {
        let mut slice: Slice<u32> = Slice::Idle;
        assert!(slice.data().is_none());
        slice.begin();
        assert!(slice.is_pending());
        slice.resolve(7);
        assert_eq!(slice.data(), Some(&7));
        assert!(slice.error().is_none());
    }

    #[test]
    fn slice_holds_the_rejection_message() {
        let mut slice: Slice<u32> = Slice::Pending;
        slice.reject("timeout");
        assert_eq!(slice.error(), Some("timeout"));
        assert!(!slice.is_pending());
    }

    #[tokio::test]
    async fn load_home_resolves_the_listings_slice() {
        let api = Arc::new(FixtureApi {
            listings: vec![sample("p-1"), sample("p-2")],
            fail: false,
        });
        let mut store = AppStore::new(api);
        store.load_home().await;
        assert_eq!(store.listings.data().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn load_home_failure_lands_in_the_error_state() {
        let api = Arc::new(FixtureApi {
            listings: Vec::new(),
            fail: true,
        });
        let mut store = AppStore::new(api);
        store.load_home().await;
        assert_eq!(store.listings.error(), Some("server returned 500: listings unavailable"));
    }

    #[tokio::test]
    async fn sign_in_exposes_the_session_token() {
        let api = Arc::new(FixtureApi {
            listings: Vec::new(),
            fail: false,
        });
        let mut store = AppStore::new(api);
        assert!(store.session_token().is_none());
        store.sign_in(LoginRequest {
            email: "a@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await;
        assert_eq!(store.session_token(), Some("tok-1"));
    }
}
