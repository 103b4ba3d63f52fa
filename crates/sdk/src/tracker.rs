//! Caller-owned event tracker — binds handlers for the configured
//! interaction kinds, assembles one event record per observed interaction
//! (reading the client context at call time), and hands records to the
//! dispatcher. Tracking never returns an error to the host.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use beacon_core::classify;
use beacon_core::config::{PayloadShape, TrackerConfig};
use beacon_core::context::ClientContext;
use beacon_core::types::{ElementParams, EventRecord, EventType, Interaction};

use crate::dispatch::Dispatcher;
use crate::identity;
use crate::source::InteractionSource;

pub struct EventTracker {
    config: TrackerConfig,
    user_id: String,
    context: Arc<dyn ClientContext>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl EventTracker {
    /// Build a tracker. The identifier is resolved once here: a
    /// caller-supplied `user_id` wins over the persisted cookie.
    pub fn new(
        config: TrackerConfig,
        context: Arc<dyn ClientContext>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        let user_id = config
            .user_id
            .clone()
            .unwrap_or_else(|| identity::resolve_user_id(context.as_ref()));
        Self {
            config,
            user_id,
            context,
            dispatcher,
        }
    }

    /// Attach handlers to the source per the configured toggles. A search
    /// target that does not exist is skipped, never an error.
    pub fn bind(self: &Arc<Self>, source: &dyn InteractionSource) {
        if self.config.track_clicks {
            let tracker = Arc::clone(self);
            source.bind_click(Arc::new(move |interaction| {
                tracker.track_click(interaction)
            }));
        }
        if self.config.track_views {
            let tracker = Arc::clone(self);
            source.bind_load(Arc::new(move |interaction| tracker.track_view(interaction)));
        }
        if self.config.track_searches {
            match self.config.search_button_id.as_deref() {
                Some(element_id) => {
                    let tracker = Arc::clone(self);
                    let bound = source.bind_element_click(
                        element_id,
                        Arc::new(move |interaction| tracker.track_search(interaction)),
                    );
                    if !bound {
                        debug!(element_id, "search target not present, binding skipped");
                    }
                }
                None => {
                    debug!("search tracking enabled without search_button_id, binding skipped")
                }
            }
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn track_click(&self, interaction: Interaction) {
        self.track(EventType::Click, interaction);
    }

    pub fn track_view(&self, interaction: Interaction) {
        self.track(EventType::View, interaction);
    }

    pub fn track_search(&self, interaction: Interaction) {
        self.track(EventType::Search, interaction);
    }

    fn track(&self, event_type: EventType, interaction: Interaction) {
        let record = self.record(event_type, &interaction);
        debug!(
            event_type = ?event_type,
            page_url = %record.page_url,
            "interaction tracked"
        );
        self.dispatcher.dispatch(record);
    }

    /// Assemble the record from the current client context. Context is
    /// read per event so page navigation between events is reflected.
    fn record(&self, event_type: EventType, interaction: &Interaction) -> EventRecord {
        let user_agent = self.context.user_agent();
        let ua = user_agent.as_deref();
        EventRecord {
            event_type,
            event_time: Utc::now(),
            user_id: self.user_id.clone(),
            user_role: self.config.user_role.clone(),
            page_url: self.context.page_url().unwrap_or_default(),
            page_title: self.context.page_title().unwrap_or_default(),
            device_type: classify::device_type(ua),
            operating_system: classify::operating_system(ua),
            browser: classify::browser(ua),
            event_params: self.event_params(interaction),
            source: self.context.referrer().unwrap_or_default(),
        }
    }

    fn event_params(&self, interaction: &Interaction) -> serde_json::Value {
        let params = match self.config.payload_shape {
            PayloadShape::Raw => serde_json::to_value(interaction),
            PayloadShape::Element => serde_json::to_value(ElementParams::from(&interaction.target)),
        };
        match params {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to serialize interaction payload");
                serde_json::Value::Null
            }
        }
    }
}
