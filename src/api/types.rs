use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::{NormalizedAddress, PropertyImage, SavedProperty};

/// Credentials for the auth endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session returned by a successful login; the token is attached as a
/// bearer header on subsequent calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Normalized property payload sent to `POST properties`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertyRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub offering_type: Option<crate::models::OfferingType>,
    #[serde(default)]
    pub total_price: Option<u64>,
    #[serde(default)]
    pub property_size: Option<f64>,
    #[serde(default)]
    pub number_of_bedrooms: Option<u32>,
    #[serde(default)]
    pub number_of_bathrooms: Option<u32>,
    #[serde(default)]
    pub furnishing: Option<String>,
    pub address: NormalizedAddress,
    pub images: Vec<PropertyImage>,
    #[serde(default)]
    pub amenities: HashMap<String, serde_json::Value>,
    /// Plan key the listing is being promoted under
    #[serde(default)]
    pub promotion_package: Option<String>,
}

/// Property record as the server may return it: the identifier shows up
/// under several historical names and may be a string or a number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WirePropertyRecord {
    #[serde(default, alias = "_id", alias = "propertyId")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub total_price: Option<u64>,
    #[serde(default)]
    pub address: Option<NormalizedAddress>,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WirePropertyRecord {
    fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn into_saved(self, id: String) -> SavedProperty {
        SavedProperty {
            id,
            title: self.title,
            property_type: self.property_type,
            total_price: self.total_price,
            address: self.address,
            images: self.images,
            created_at: self.created_at,
        }
    }
}

/// Raw create-property response. Some backend versions return the record
/// at the top level, others wrap it in a `data` field; both may carry a
/// `message`. Callers never see this shape: `normalize` maps it into one
/// canonical `SavedProperty` or an error.
#[derive(Debug, Deserialize)]
pub struct CreatePropertyResponse {
    #[serde(flatten)]
    pub record: WirePropertyRecord,
    #[serde(default)]
    pub data: Option<WirePropertyRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CreatePropertyResponse {
    /// Collapse the tolerated wire shapes into the one typed record.
    /// A response with no recognizable identifier is a failure even though
    /// the HTTP call succeeded.
    pub fn normalize(self) -> Result<SavedProperty, ApiError> {
        if let Some(inner) = self.data {
            if let Some(id) = inner.id_string() {
                return Ok(inner.into_saved(id));
            }
        }
        if let Some(id) = self.record.id_string() {
            return Ok(self.record.into_saved(id));
        }
        Err(ApiError::UnexpectedShape {
            message: self
                .message
                .unwrap_or_else(|| "the server did not confirm the listing".to_string()),
        })
    }
}

/// Request to start a payment for a promoted listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSessionRequest {
    pub property_id: String,
    pub plan: String,
    pub duration_days: u32,
    pub amount: u64,
    /// Where the payment provider sends the user afterwards
    pub return_url: String,
}

/// Hosted payment session the user is redirected to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub id: String,
    pub checkout_url: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Result of a media upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
}
