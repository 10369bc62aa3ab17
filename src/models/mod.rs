use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a property is offered on the marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OfferingType {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Rent")]
    ForRent,
}

/// Address as entered in the upstream property form.
///
/// Newer drafts carry this nested object; older drafts carry the same
/// fields flat on the draft itself (see `PropertyDraft`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftAddress {
    #[serde(default, alias = "subCity")]
    pub sub_city: Option<String>,
    #[serde(default, alias = "regionalState")]
    pub regional_state: Option<String>,
    #[serde(default)]
    pub woreda: Option<String>,
    #[serde(default, alias = "specificAddress")]
    pub street: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Uniform image shape used on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyImage {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

/// Legacy media entry: older drafts stored bare path strings, partially
/// migrated ones stored objects with a url or path and maybe a caption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaPath {
    Path(String),
    Entry {
        #[serde(default, alias = "path")]
        url: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
}

impl MediaPath {
    /// Map a legacy entry into the uniform image shape. Entries with no
    /// usable url are dropped.
    pub fn into_image(self) -> Option<PropertyImage> {
        match self {
            MediaPath::Path(url) if !url.is_empty() => Some(PropertyImage {
                url,
                caption: String::new(),
            }),
            MediaPath::Path(_) => None,
            MediaPath::Entry { url, caption } => {
                let url = url.filter(|u| !u.is_empty())?;
                Some(PropertyImage {
                    url,
                    caption: caption.unwrap_or_default(),
                })
            }
        }
    }
}

/// Unsaved property record produced by the upstream form and handed to the
/// checkout flow via navigation state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub offering_type: Option<OfferingType>,
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
    /// Nested address object (newer drafts)
    #[serde(default)]
    pub address: Option<DraftAddress>,
    /// Flat legacy address fields (older drafts)
    #[serde(default)]
    pub sub_city: Option<String>,
    #[serde(default)]
    pub regional_state: Option<String>,
    #[serde(default)]
    pub woreda: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub images: Vec<PropertyImage>,
    #[serde(default)]
    pub media_paths: Vec<MediaPath>,
    /// Feature/amenity toggles keyed by name
    #[serde(default)]
    pub amenities: HashMap<String, serde_json::Value>,
}

impl PropertyDraft {
    /// A draft with nothing filled in is treated the same as a missing one.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.property_type.is_none()
            && self.total_price.is_none()
            && self.address.is_none()
            && self.images.is_empty()
            && self.media_paths.is_empty()
    }
}

/// Address after normalization, ready for the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedAddress {
    pub sub_city: String,
    pub regional_state: String,
    #[serde(default)]
    pub woreda: Option<String>,
    pub country: String,
}

/// Country used when the draft does not name one
pub const DEFAULT_COUNTRY: &str = "Ethiopia";

/// Server-confirmed property record returned after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProperty {
    pub id: String,
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

/// Fixed placeholder set substituted when a draft carries no images, so a
/// submission never goes out with an empty image list. Also re-attached to
/// a saved record the server returns imageless, for display only.
pub fn default_images() -> Vec<PropertyImage> {
    vec![
        PropertyImage {
            url: "https://images.listing-promoter.example/placeholder-exterior.jpg".to_string(),
            caption: "Exterior view".to_string(),
        },
        PropertyImage {
            url: "https://images.listing-promoter.example/placeholder-interior.jpg".to_string(),
            caption: "Interior view".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_path_accepts_bare_strings_and_partial_objects() {
        let raw = r#"["a.jpg", {"url": "b.jpg", "caption": "front"}, {"path": "c.jpg"}]"#;
        let paths: Vec<MediaPath> = serde_json::from_str(raw).unwrap();
        let images: Vec<PropertyImage> =
            paths.into_iter().filter_map(MediaPath::into_image).collect();
        assert_eq!(
            images,
            vec![
                PropertyImage {
                    url: "a.jpg".to_string(),
                    caption: String::new()
                },
                PropertyImage {
                    url: "b.jpg".to_string(),
                    caption: "front".to_string()
                },
                PropertyImage {
                    url: "c.jpg".to_string(),
                    caption: String::new()
                },
            ]
        );
    }

    #[test]
    fn media_path_drops_entries_without_a_url() {
        let paths: Vec<MediaPath> = serde_json::from_str(r#"["", {"caption": "x"}]"#).unwrap();
        assert!(paths
            .into_iter()
            .filter_map(MediaPath::into_image)
            .next()
            .is_none());
    }

    #[test]
    fn draft_accepts_nested_camel_case_address() {
        let raw = r#"{
            "property_type": "House",
            "total_price": 100000,
            "address": {"subCity": "Bole", "regionalState": "Addis Ababa City Administration"}
        }"#;
        let draft: PropertyDraft = serde_json::from_str(raw).unwrap();
        let addr = draft.address.unwrap();
        assert_eq!(addr.sub_city.as_deref(), Some("Bole"));
        assert_eq!(
            addr.regional_state.as_deref(),
            Some("Addis Ababa City Administration")
        );
    }

    #[test]
    fn empty_draft_is_detected() {
        assert!(PropertyDraft::default().is_empty());
        let draft = PropertyDraft {
            title: Some("3BR house in Bole".to_string()),
            ..Default::default()
        };
        assert!(!draft.is_empty());
    }
}
