use crate::api::types::CreatePropertyRequest;
use crate::api::ListingApi;
use crate::error::{ApiError, CheckoutError};
use crate::models::{
    default_images, NormalizedAddress, PropertyDraft, PropertyImage, SavedProperty,
    DEFAULT_COUNTRY,
};
use crate::notify::{Notice, Notifier};
use crate::plans::{PlanSelection, PromotionPlan};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Where the payment screen sends the user once payment completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    Account { show_property_alert: bool },
}

/// Navigation outcome of a successful submission
#[derive(Debug, Clone)]
pub enum CheckoutRoute {
    /// Free plan: straight to the account screen with a new-listing notice
    Account {
        saved: SavedProperty,
        plan: PromotionPlan,
        show_property_alert: bool,
    },
    /// Paid plan: to the payment screen, then back to the account screen
    Payment {
        saved: SavedProperty,
        plan: PromotionPlan,
        duration_days: u32,
        total_price: u64,
        redirect: RedirectTarget,
    },
}

/// Routing after a successful save is a pure function of the chosen plan.
pub fn route_for(
    plan: PromotionPlan,
    duration_days: u32,
    total_price: u64,
    saved: SavedProperty,
) -> CheckoutRoute {
    if plan.is_paid() {
        CheckoutRoute::Payment {
            saved,
            plan,
            duration_days,
            total_price,
            redirect: RedirectTarget::Account {
                show_property_alert: true,
            },
        }
    } else {
        CheckoutRoute::Account {
            saved,
            plan,
            show_property_alert: true,
        }
    }
}

/// Resolve sub-city and regional-state from the nested address object or
/// the flat legacy fields; country falls back to a fixed default.
pub fn normalize_address(draft: &PropertyDraft) -> Result<NormalizedAddress, CheckoutError> {
    let nested = draft.address.as_ref();

    let sub_city = nested
        .and_then(|a| a.sub_city.clone())
        .or_else(|| draft.sub_city.clone())
        .filter(|s| !s.is_empty())
        .ok_or(CheckoutError::IncompleteAddress { field: "sub_city" })?;

    let regional_state = nested
        .and_then(|a| a.regional_state.clone())
        .or_else(|| draft.regional_state.clone())
        .filter(|s| !s.is_empty())
        .ok_or(CheckoutError::IncompleteAddress {
            field: "regional_state",
        })?;

    let woreda = nested
        .and_then(|a| a.woreda.clone())
        .or_else(|| draft.woreda.clone())
        .filter(|s| !s.is_empty());

    let country = nested
        .and_then(|a| a.country.clone())
        .or_else(|| draft.country.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

    Ok(NormalizedAddress {
        sub_city,
        regional_state,
        woreda,
        country,
    })
}

/// Prefer the explicit image list, fall back to mapped legacy media paths,
/// and finally to the fixed default set so the payload never carries zero
/// images.
pub fn normalize_images(draft: &PropertyDraft) -> Vec<PropertyImage> {
    if !draft.images.is_empty() {
        return draft.images.clone();
    }

    let mapped: Vec<PropertyImage> = draft
        .media_paths
        .iter()
        .cloned()
        .filter_map(|path| path.into_image())
        .collect();
    if !mapped.is_empty() {
        return mapped;
    }

    default_images()
}

fn build_request(
    draft: &PropertyDraft,
    address: NormalizedAddress,
    images: Vec<PropertyImage>,
    plan: PromotionPlan,
) -> CreatePropertyRequest {
    CreatePropertyRequest {
        title: draft.title.clone(),
        description: draft.description.clone(),
        property_type: draft.property_type.clone(),
        offering_type: draft.offering_type,
        total_price: draft.total_price,
        property_size: draft.property_size,
        number_of_bedrooms: draft.number_of_bedrooms,
        number_of_bathrooms: draft.number_of_bathrooms,
        furnishing: draft.furnishing.clone(),
        address,
        images,
        amenities: draft.amenities.clone(),
        promotion_package: Some(plan.key().to_string()),
    }
}

/// Handle for discarding a submission that is still in flight, e.g. when
/// the screen is torn down before the server answers.
#[derive(Clone)]
pub struct CancelHandle(Arc<AtomicU64>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Promotion checkout flow: plan/duration selection plus the submission
/// orchestrator. Selection state lives only here; the saved property flows
/// forward in the returned route.
pub struct CheckoutFlow<A: ListingApi, N: Notifier> {
    api: Arc<A>,
    notifier: N,
    selection: PlanSelection,
    saving: AtomicBool,
    generation: Arc<AtomicU64>,
}

impl<A: ListingApi, N: Notifier> CheckoutFlow<A, N> {
    pub fn new(api: Arc<A>, notifier: N) -> Self {
        Self {
            api,
            notifier,
            selection: PlanSelection::new(),
            saving: AtomicBool::new(false),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn select_plan(&mut self, plan: PromotionPlan) {
        if self.selection.select_plan(plan) {
            self.notifier.notify(Notice::PlanSelected(plan));
        }
    }

    pub fn select_duration(&mut self, plan: PromotionPlan, days: u32) {
        self.selection.select_duration(plan, days);
        self.notifier.notify(Notice::DurationSelected { plan, days });
    }

    pub fn selected_plan(&self) -> Option<PromotionPlan> {
        self.selection.selected_plan()
    }

    pub fn selected_duration(&self) -> Option<u32> {
        self.selection.selected_duration()
    }

    pub fn total_price(&self) -> u64 {
        self.selection.total_price()
    }

    /// True while a save is in flight; the submit action is disabled then.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Handle that, once cancelled, makes the in-flight submission resolve
    /// as `Stale` instead of routing anywhere.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.generation))
    }

    /// Validate, normalize and submit the draft, then compute the route
    /// from the chosen plan. Fully succeeds or fully fails; on failure the
    /// user stays on the current screen and may retry manually.
    pub async fn submit(
        &self,
        draft: Option<&PropertyDraft>,
    ) -> Result<CheckoutRoute, CheckoutError> {
        let draft = match draft {
            Some(d) if !d.is_empty() => d,
            _ => {
                self.notifier.notify(Notice::MissingDraft);
                return Err(CheckoutError::MissingDraft);
            }
        };

        let plan = match self.selection.selected_plan() {
            Some(plan) => plan,
            None => {
                self.notifier.notify(Notice::MissingPlan);
                return Err(CheckoutError::NoPlanSelected);
            }
        };
        let Some(duration_days) = self.selection.selected_duration() else {
            self.notifier.notify(Notice::MissingPlan);
            return Err(CheckoutError::NoPlanSelected);
        };
        let total_price = self.selection.total_price();

        let address = match normalize_address(draft) {
            Ok(address) => address,
            Err(CheckoutError::IncompleteAddress { field }) => {
                self.notifier.notify(Notice::MissingAddress { field });
                return Err(CheckoutError::IncompleteAddress { field });
            }
            Err(e) => return Err(e),
        };
        let images = normalize_images(draft);
        let request = build_request(draft, address, images, plan);

        if self.saving.swap(true, Ordering::SeqCst) {
            warn!("submit ignored: a save is already in progress");
            return Err(CheckoutError::SaveInFlight);
        }
        let generation = self.generation.load(Ordering::SeqCst);

        debug!(
            "saving listing under the {} plan for {} days (total {})",
            plan.display_name(),
            duration_days,
            total_price
        );
        let result = self.api.create_property(&request).await;
        self.saving.store(false, Ordering::SeqCst);

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding response for a cancelled submission");
            return Err(CheckoutError::Stale);
        }

        match result {
            Ok(mut saved) => {
                // The server may strip images; re-attach the default set
                // for downstream display only.
                if saved.images.is_empty() {
                    saved.images = default_images();
                }
                self.notifier.notify(Notice::SubmissionSucceeded);
                Ok(route_for(plan, duration_days, total_price, saved))
            }
            Err(ApiError::UnexpectedShape { message }) => {
                error!("property was not saved: {}", message);
                self.notifier
                    .notify(Notice::SubmissionFailed(message.clone()));
                Err(CheckoutError::UnexpectedResponse { message })
            }
            Err(e) => {
                error!("property submission failed: {}", e);
                self.notifier.notify(Notice::SubmissionFailed(e.to_string()));
                Err(CheckoutError::Api(e))
            }
        }
    }
}
