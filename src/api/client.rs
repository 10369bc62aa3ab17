use crate::api::traits::{ListingApi, TokenProvider};
use crate::api::types::{
    AuthSession, CreatePropertyRequest, CreatePropertyResponse, LoginRequest, PaymentSession,
    PaymentSessionRequest, UploadedMedia,
};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::SavedProperty;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// reqwest-backed implementation of the marketplace backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a client from connection settings and an injected token source
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Attach the bearer token when one is available
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn a non-2xx response into a status error carrying the server's
    /// message field when the body is JSON, or the raw body otherwise.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);

        warn!("API returned {}: {}", status, message);
        Err(ApiError::Status {
            code: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ListingApi for ApiClient {
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, ApiError> {
        debug!("POST auth/login for {}", request.email);
        let response = self
            .client
            .post(self.url("auth/login"))
            .json(&request)
            .send()
            .await?;
        Self::decode(Self::check_status(response).await?).await
    }

    async fn list_properties(&self) -> Result<Vec<SavedProperty>, ApiError> {
        debug!("GET properties");
        let response = self
            .authed(self.client.get(self.url("properties")))
            .send()
            .await?;
        Self::decode(Self::check_status(response).await?).await
    }

    async fn get_property(&self, id: &str) -> Result<SavedProperty, ApiError> {
        debug!("GET properties/{}", id);
        let response = self
            .authed(self.client.get(self.url(&format!("properties/{}", id))))
            .send()
            .await?;
        Self::decode(Self::check_status(response).await?).await
    }

    async fn create_property(
        &self,
        request: &CreatePropertyRequest,
    ) -> Result<SavedProperty, ApiError> {
        debug!(
            "POST properties ({} images, package {:?})",
            request.images.len(),
            request.promotion_package
        );
        let response = self
            .authed(self.client.post(self.url("properties")).json(request))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        // All tolerated response shapes collapse to one canonical record
        // here; callers never see the raw body.
        let raw: CreatePropertyResponse = Self::decode(response).await?;
        raw.normalize()
    }

    async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedMedia, ApiError> {
        debug!("POST media ({} bytes)", bytes.len());
        let response = self
            .authed(
                self.client
                    .post(self.url("media"))
                    .query(&[("filename", filename)])
                    .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                    .body(bytes),
            )
            .send()
            .await?;
        Self::decode(Self::check_status(response).await?).await
    }

    async fn create_payment_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> Result<PaymentSession, ApiError> {
        debug!(
            "POST payments/sessions for property {} ({} x {} days)",
            request.property_id, request.amount, request.duration_days
        );
        let response = self
            .authed(self.client.post(self.url("payments/sessions")).json(request))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::UnexpectedShape {
                message: "payment provider returned an empty session".to_string(),
            });
        }
        Self::decode(response).await
    }
}
