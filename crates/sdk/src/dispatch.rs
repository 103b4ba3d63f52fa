//! Delivery — fire-and-forget forwarding of event records to the
//! collection endpoint. Records flow through a bounded channel into a
//! background task that issues one JSON POST per record; failures are
//! logged and dropped, never surfaced and never retried.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, error, warn};
use url::Url;

use beacon_core::types::{EventRecord, EventType};
use beacon_core::{BeaconError, BeaconResult};

/// Accepts assembled event records for delivery.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, record: EventRecord);
}

const CHANNEL_CAPACITY: usize = 1024;

/// HTTP dispatcher posting each record to the configured endpoint.
///
/// Must be constructed inside a tokio runtime: the forwarding task is
/// spawned here. There is no request timeout — the delivery model has no
/// cancellation — and a full channel drops the record with a warning.
pub struct HttpDispatcher {
    sender: mpsc::Sender<EventRecord>,
}

impl HttpDispatcher {
    pub fn new(api_endpoint: &str) -> BeaconResult<Self> {
        let endpoint = Url::parse(api_endpoint).map_err(|e| {
            BeaconError::Config(format!("invalid api_endpoint `{api_endpoint}`: {e}"))
        })?;

        let client = reqwest::Client::new();
        let (sender, mut receiver) = mpsc::channel::<EventRecord>(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(record) = receiver.recv().await {
                // One task per record: in-flight sends are independent and
                // unordered.
                let client = client.clone();
                let endpoint = endpoint.clone();
                tokio::spawn(async move {
                    send_one(client, endpoint, record).await;
                });
            }
        });

        Ok(Self { sender })
    }
}

async fn send_one(client: reqwest::Client, endpoint: Url, record: EventRecord) {
    match client.post(endpoint).json(&record).send().await {
        Ok(response) if response.status().is_success() => {
            debug!(event_type = ?record.event_type, "event delivered");
        }
        Ok(response) => {
            warn!(
                status = %response.status(),
                event_type = ?record.event_type,
                "collection endpoint rejected event"
            );
        }
        Err(e) => {
            error!(error = %e, event_type = ?record.event_type, "failed to deliver event");
        }
    }
}

impl Dispatcher for HttpDispatcher {
    fn dispatch(&self, record: EventRecord) {
        if let Err(e) = self.sender.try_send(record) {
            warn!("event dropped: {e}");
        }
    }
}

/// In-memory dispatcher that captures records for testing.
#[derive(Default)]
pub struct CaptureDispatcher {
    records: Mutex<Vec<EventRecord>>,
}

impl CaptureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().expect("dispatcher mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().expect("dispatcher mutex poisoned").len()
    }

    pub fn count_type(&self, event_type: EventType) -> usize {
        self.records
            .lock()
            .expect("dispatcher mutex poisoned")
            .iter()
            .filter(|r| r.event_type == event_type)
            .count()
    }
}

impl Dispatcher for CaptureDispatcher {
    fn dispatch(&self, record: EventRecord) {
        self.records
            .lock()
            .expect("dispatcher mutex poisoned")
            .push(record);
    }
}

/// Convenience: create a capture dispatcher for tests.
pub fn capture_dispatcher() -> Arc<CaptureDispatcher> {
    Arc::new(CaptureDispatcher::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::types::{Browser, DeviceType, OperatingSystem};
    use chrono::Utc;

    fn make_record(event_type: EventType) -> EventRecord {
        EventRecord {
            event_type,
            event_time: Utc::now(),
            user_id: "u-1".into(),
            user_role: "guest".into(),
            page_url: "https://example.com".into(),
            page_title: "Example".into(),
            device_type: DeviceType::Desktop,
            operating_system: OperatingSystem::Linux,
            browser: Browser::Firefox,
            event_params: serde_json::Value::Null,
            source: String::new(),
        }
    }

    #[test]
    fn test_capture_dispatcher() {
        let dispatcher = capture_dispatcher();
        assert_eq!(dispatcher.count(), 0);

        dispatcher.dispatch(make_record(EventType::Click));
        dispatcher.dispatch(make_record(EventType::View));
        dispatcher.dispatch(make_record(EventType::Click));

        assert_eq!(dispatcher.count(), 3);
        assert_eq!(dispatcher.count_type(EventType::Click), 2);
        assert_eq!(dispatcher.count_type(EventType::Search), 0);
        assert_eq!(dispatcher.records()[1].event_type, EventType::View);
    }

    #[test]
    fn test_invalid_endpoint_is_a_config_error() {
        let result = HttpDispatcher::new("not a url");
        assert!(matches!(result, Err(BeaconError::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_does_not_panic() {
        // RFC 5737 TEST-NET address; the send fails and is dropped
        let dispatcher = HttpDispatcher::new("http://192.0.2.1:9/events").unwrap();
        dispatcher.dispatch(make_record(EventType::Click));
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}
