use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Promotion tier for a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPlan {
    Basic,
    Vip,
    Diamond,
}

impl PromotionPlan {
    /// Wire key used by the API and navigation state
    pub fn key(&self) -> &'static str {
        match self {
            PromotionPlan::Basic => "basic",
            PromotionPlan::Vip => "vip",
            PromotionPlan::Diamond => "diamond",
        }
    }

    /// Human-readable plan name
    pub fn display_name(&self) -> &'static str {
        match self {
            PromotionPlan::Basic => "Basic",
            PromotionPlan::Vip => "VIP",
            PromotionPlan::Diamond => "Diamond",
        }
    }

    /// Basic is the free tier; everything else goes through payment.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PromotionPlan::Basic)
    }

    pub fn all() -> [PromotionPlan; 3] {
        [
            PromotionPlan::Basic,
            PromotionPlan::Vip,
            PromotionPlan::Diamond,
        ]
    }
}

/// One duration option under a plan, with its listed price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationPrice {
    pub days: u32,
    pub price: u64,
}

/// Duration/price options configured for a plan. Static configuration,
/// not persisted; prices are opaque integers in one implied currency.
pub fn durations_for(plan: PromotionPlan) -> &'static [DurationPrice] {
    match plan {
        PromotionPlan::Basic => &[
            DurationPrice { days: 30, price: 0 },
            DurationPrice { days: 60, price: 0 },
            DurationPrice { days: 90, price: 0 },
        ],
        PromotionPlan::Vip => &[
            DurationPrice {
                days: 15,
                price: 500,
            },
            DurationPrice {
                days: 30,
                price: 900,
            },
        ],
        PromotionPlan::Diamond => &[
            DurationPrice {
                days: 15,
                price: 1500,
            },
            DurationPrice {
                days: 30,
                price: 2500,
            },
        ],
    }
}

/// Price listed for (plan, days), or 0 when the pair is not configured.
pub fn price_for(plan: PromotionPlan, days: u32) -> u64 {
    durations_for(plan)
        .iter()
        .find(|entry| entry.days == days)
        .map(|entry| entry.price)
        .unwrap_or(0)
}

/// Local selection state for the plan/duration picker.
///
/// At most one plan is selected at a time; each plan remembers the last
/// duration chosen for it so switching back restores it.
#[derive(Debug, Clone, Default)]
pub struct PlanSelection {
    selected: Option<PromotionPlan>,
    durations: HashMap<PromotionPlan, u32>,
}

impl PlanSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_plan(&self) -> Option<PromotionPlan> {
        self.selected
    }

    /// Duration remembered for the currently selected plan
    pub fn selected_duration(&self) -> Option<u32> {
        self.selected.and_then(|p| self.durations.get(&p).copied())
    }

    /// Select a plan. Re-selecting the active plan is a no-op so a second
    /// click does not deselect it. First-time selection auto-assigns the
    /// plan's first configured duration.
    ///
    /// Returns true when the selection actually changed.
    pub fn select_plan(&mut self, plan: PromotionPlan) -> bool {
        if self.selected == Some(plan) {
            return false;
        }
        self.selected = Some(plan);
        self.durations
            .entry(plan)
            .or_insert_with(|| durations_for(plan).first().map(|d| d.days).unwrap_or(0));
        true
    }

    /// Choose a duration for a plan. If that plan is not the active one it
    /// becomes selected first, then the duration is applied.
    pub fn select_duration(&mut self, plan: PromotionPlan, days: u32) {
        if self.selected != Some(plan) {
            self.select_plan(plan);
        }
        self.durations.insert(plan, days);
    }

    /// Total recomputed from the current (plan, duration) pair; 0 when the
    /// selection is incomplete or the pair is not configured.
    pub fn total_price(&self) -> u64 {
        match (self.selected, self.selected_duration()) {
            (Some(plan), Some(days)) => price_for(plan, days),
            _ => 0,
        }
    }
}
