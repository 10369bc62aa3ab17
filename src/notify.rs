use crate::plans::PromotionPlan;
use tracing::{info, warn};

/// User-facing toast events emitted by the checkout flow
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    PlanSelected(PromotionPlan),
    DurationSelected { plan: PromotionPlan, days: u32 },
    MissingDraft,
    MissingPlan,
    MissingAddress { field: &'static str },
    SubmissionFailed(String),
    SubmissionSucceeded,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::PlanSelected(plan) => format!("{} plan selected", plan.display_name()),
            Notice::DurationSelected { plan, days } => {
                format!("{} plan for {} days", plan.display_name(), days)
            }
            Notice::MissingDraft => {
                "No property data was provided; returning to the listing form".to_string()
            }
            Notice::MissingPlan => "Select a promotion plan before continuing".to_string(),
            Notice::MissingAddress { field } => {
                format!("Address is incomplete: missing {}", field)
            }
            Notice::SubmissionFailed(message) => format!("Could not save the listing: {}", message),
            Notice::SubmissionSucceeded => "Listing saved".to_string(),
        }
    }

    fn is_warning(&self) -> bool {
        matches!(
            self,
            Notice::MissingDraft
                | Notice::MissingPlan
                | Notice::MissingAddress { .. }
                | Notice::SubmissionFailed(_)
        )
    }
}

/// Sink for toast-style notifications. The checkout flow is generic over
/// this so tests can record what the user would have seen.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default sink: notices become log lines
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_warning() {
            warn!("{}", notice.message());
        } else {
            info!("{}", notice.message());
        }
    }
}
