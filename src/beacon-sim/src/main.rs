//! Beacon Sim — drives the tracking SDK through a simulated page session
//! against a real collection endpoint.

use std::sync::Arc;
use std::time::Duration;

use beacon_core::context::MemoryContext;
use beacon_core::types::{ElementInfo, Interaction};
use beacon_core::TrackerConfig;
use beacon_sdk::{EventTracker, HttpDispatcher, SimulatedPage};
use clap::Parser;
use tracing::info;

const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Parser, Debug)]
#[command(name = "beacon-sim")]
#[command(about = "Simulated page session driving the Beacon tracking SDK")]
#[command(version)]
struct Cli {
    /// Collection endpoint (overrides config)
    #[arg(long, env = "BEACON__API_ENDPOINT")]
    endpoint: Option<String>,

    /// Role reported with each event (overrides config)
    #[arg(long, env = "BEACON__USER_ROLE")]
    role: Option<String>,

    /// Number of simulated clicks
    #[arg(long, default_value_t = 3)]
    clicks: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beacon_sim=info,beacon_sdk=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = TrackerConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        TrackerConfig::default()
    });
    config.track_clicks = true;
    config.track_views = true;
    config.track_searches = true;
    if config.search_button_id.is_none() {
        config.search_button_id = Some("search-button".to_string());
    }
    if let Some(endpoint) = cli.endpoint {
        config.api_endpoint = endpoint;
    }
    if let Some(role) = cli.role {
        config.user_role = role;
    }

    info!(endpoint = %config.api_endpoint, "Beacon sim starting");

    let context = Arc::new(
        MemoryContext::new()
            .with_page("https://shop.example/products", "Products")
            .with_referrer("https://www.google.com/")
            .with_user_agent(CHROME_WINDOWS),
    );
    let dispatcher = Arc::new(HttpDispatcher::new(&config.api_endpoint)?);
    let search_button = config
        .search_button_id
        .clone()
        .unwrap_or_else(|| "search-button".to_string());
    let tracker = Arc::new(EventTracker::new(config, context.clone(), dispatcher));
    info!(user_id = %tracker.user_id(), "tracker initialized");

    let page = SimulatedPage::new().with_element(search_button.as_str());
    tracker.bind(&page);

    page.fire_load(Interaction::default());

    for n in 0..cli.clicks {
        page.fire_click(Interaction {
            target: ElementInfo {
                id: format!("cta-{n}"),
                class: "btn btn-primary".into(),
                text: "Buy Now".into(),
            },
            detail: serde_json::json!({ "x": 420, "y": 87 }),
        });
    }

    context.set_page("https://shop.example/search", "Search");
    page.fire_element_click(
        &search_button,
        Interaction {
            target: ElementInfo {
                id: search_button.clone(),
                class: "btn".into(),
                text: "Search".into(),
            },
            detail: serde_json::Value::Null,
        },
    );

    // Sends are fire-and-forget; give in-flight deliveries a moment
    tokio::time::sleep(Duration::from_millis(500)).await;

    info!("session complete");
    Ok(())
}
