//! End-to-end delivery tests: simulated page interactions flowing through
//! the tracker and out over HTTP to a mock collection endpoint.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use beacon_core::context::MemoryContext;
use beacon_core::types::{ElementInfo, Interaction};
use beacon_core::TrackerConfig;
use beacon_sdk::{EventTracker, HttpDispatcher, SimulatedPage};

const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

fn make_context() -> Arc<MemoryContext> {
    Arc::new(
        MemoryContext::new()
            .with_page("https://shop.example/checkout", "Checkout")
            .with_referrer("https://www.google.com/")
            .with_user_agent(CHROME_WINDOWS),
    )
}

/// Delivery is fire-and-forget; poll the mock server until the expected
/// number of requests arrives or the deadline passes.
async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<Request> {
    for _ in 0..100 {
        if let Some(requests) = server.received_requests().await {
            if requests.len() >= count {
                return requests;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.received_requests().await.unwrap_or_default()
}

#[tokio::test]
async fn posts_one_json_record_per_interaction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collect"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let endpoint = format!("{}/collect", server.uri());
    let config = TrackerConfig {
        api_endpoint: endpoint.clone(),
        track_clicks: true,
        track_searches: true,
        search_button_id: Some("search-button".into()),
        ..Default::default()
    };
    let dispatcher = Arc::new(HttpDispatcher::new(&endpoint).unwrap());
    let tracker = Arc::new(EventTracker::new(config, make_context(), dispatcher));

    let page = SimulatedPage::new().with_element("search-button");
    tracker.bind(&page);

    page.fire_click(Interaction {
        target: ElementInfo {
            id: "buy-btn".into(),
            class: "btn".into(),
            text: "Buy Now".into(),
        },
        detail: serde_json::Value::Null,
    });
    page.fire_element_click("search-button", Interaction::default());

    let requests = wait_for_requests(&server, 2).await;
    assert_eq!(requests.len(), 2);

    let bodies: Vec<serde_json::Value> = requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    let click = bodies
        .iter()
        .find(|b| b["event_type"] == "click")
        .expect("click record delivered");
    let search = bodies
        .iter()
        .find(|b| b["event_type"] == "search")
        .expect("search record delivered");

    assert_eq!(click["page_url"], "https://shop.example/checkout");
    assert_eq!(click["page_title"], "Checkout");
    assert_eq!(click["source"], "https://www.google.com/");
    assert_eq!(click["device_type"], "desktop");
    assert_eq!(click["operating_system"], "Windows");
    assert_eq!(click["browser"], "Chrome");
    assert_eq!(click["user_role"], "guest");
    assert_eq!(click["event_params"]["target"]["id"], "buy-btn");
    assert!(chrono::DateTime::parse_from_rfc3339(click["event_time"].as_str().unwrap()).is_ok());

    // Both records carry the same persisted identifier
    assert_eq!(click["user_id"], search["user_id"]);
    let user_id = click["user_id"].as_str().unwrap();
    assert_eq!(uuid::Uuid::parse_str(user_id).unwrap().get_version_num(), 4);
}

#[tokio::test]
async fn rejected_events_are_dropped_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dispatcher = Arc::new(HttpDispatcher::new(&server.uri()).unwrap());
    let tracker = EventTracker::new(TrackerConfig::default(), make_context(), dispatcher);

    tracker.track_view(Interaction::default());

    let requests = wait_for_requests(&server, 1).await;
    assert_eq!(requests.len(), 1);

    // No retry shows up after the failure is logged and dropped
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn network_failure_never_reaches_the_handler() {
    // Bind-then-drop a listener to get a port with nothing behind it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/collect", listener.local_addr().unwrap());
    drop(listener);

    let config = TrackerConfig {
        track_clicks: true,
        ..Default::default()
    };
    let dispatcher = Arc::new(HttpDispatcher::new(&endpoint).unwrap());
    let tracker = Arc::new(EventTracker::new(config, make_context(), dispatcher));

    let page = SimulatedPage::new();
    tracker.bind(&page);

    // Firing through a dead endpoint must not panic or propagate
    page.fire_click(Interaction::default());
    page.fire_click(Interaction::default());
    tokio::time::sleep(Duration::from_millis(200)).await;
}
