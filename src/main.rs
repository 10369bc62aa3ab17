use anyhow::Context;
use listing_promoter::api::{ApiClient, StaticToken};
use listing_promoter::checkout::{CheckoutFlow, CheckoutRoute};
use listing_promoter::config::ApiConfig;
use listing_promoter::models::PropertyDraft;
use listing_promoter::notify::TracingNotifier;
use listing_promoter::plans::PromotionPlan;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber;

fn parse_plan(key: &str) -> anyhow::Result<PromotionPlan> {
    match key.to_lowercase().as_str() {
        "basic" => Ok(PromotionPlan::Basic),
        "vip" => Ok(PromotionPlan::Vip),
        "diamond" => Ok(PromotionPlan::Diamond),
        other => anyhow::bail!("unknown plan '{}'; expected basic, vip or diamond", other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Listing Promoter - property promotion checkout");
    info!("=================================================");
    info!("");

    let mut args = std::env::args().skip(1);
    let draft_path = args
        .next()
        .context("usage: listing-promoter <draft.json> [plan] [duration-days]")?;
    let plan = parse_plan(&args.next().unwrap_or_else(|| "basic".to_string()))?;
    let duration: Option<u32> = match args.next() {
        Some(days) => Some(days.parse().context("duration must be a number of days")?),
        None => None,
    };

    let config = ApiConfig::from_env();
    info!("Using API at {}", config.base_url);

    let client = Arc::new(ApiClient::new(
        &config,
        Arc::new(StaticToken(config.token.clone())),
    )?);
    let mut flow = CheckoutFlow::new(client, TracingNotifier);

    flow.select_plan(plan);
    if let Some(days) = duration {
        flow.select_duration(plan, days);
    }
    info!(
        "Selected {} plan, {} days, total {}",
        plan.display_name(),
        flow.selected_duration().unwrap_or(0),
        flow.total_price()
    );

    let raw = tokio::fs::read_to_string(&draft_path)
        .await
        .with_context(|| format!("failed to read draft file {}", draft_path))?;
    let draft: PropertyDraft =
        serde_json::from_str(&raw).context("draft file is not a valid property draft")?;

    info!("Submitting listing from {}...", draft_path);
    let route = flow.submit(Some(&draft)).await?;

    match route {
        CheckoutRoute::Account {
            saved,
            plan,
            show_property_alert,
        } => {
            println!("Saved property {} under the {} plan", saved.id, plan.display_name());
            println!("→ account screen (new listing notice: {})", show_property_alert);
        }
        CheckoutRoute::Payment {
            saved,
            plan,
            duration_days,
            total_price,
            ..
        } => {
            println!("Saved property {} under the {} plan", saved.id, plan.display_name());
            println!(
                "→ payment screen: {} days, total {}",
                duration_days, total_price
            );
        }
    }

    Ok(())
}
