use serde::Deserialize;

/// Shape of the `event_params` payload attached to each event record.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// Forward the raw interaction payload as received from the source.
    #[default]
    Raw,
    /// Reduce to the target element id/class/text.
    Element,
}

/// Tracker configuration. Loaded from environment variables with the
/// prefix `BEACON__`, or constructed directly by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Collection endpoint receiving one JSON POST per event.
    #[serde(default)]
    pub api_endpoint: String,
    /// Caller-supplied identifier; overrides cookie resolution when set.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_user_role")]
    pub user_role: String,
    #[serde(default)]
    pub track_clicks: bool,
    #[serde(default)]
    pub track_views: bool,
    #[serde(default)]
    pub track_searches: bool,
    /// Element id the search handler is bound to. A missing element is
    /// tolerated as a skipped binding.
    #[serde(default)]
    pub search_button_id: Option<String>,
    #[serde(default)]
    pub payload_shape: PayloadShape,
}

fn default_user_role() -> String {
    "guest".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            user_id: None,
            user_role: default_user_role(),
            track_clicks: false,
            track_views: false,
            track_searches: false,
            search_button_id: None,
            payload_shape: PayloadShape::default(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("BEACON")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.user_role, "guest");
        assert!(!config.track_clicks);
        assert!(!config.track_views);
        assert!(!config.track_searches);
        assert!(config.user_id.is_none());
        assert!(config.search_button_id.is_none());
        assert_eq!(config.payload_shape, PayloadShape::Raw);
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: TrackerConfig = serde_json::from_str(
            r#"{"api_endpoint":"https://collect.example/events","track_clicks":true}"#,
        )
        .unwrap();
        assert_eq!(config.api_endpoint, "https://collect.example/events");
        assert!(config.track_clicks);
        assert!(!config.track_searches);
        assert_eq!(config.user_role, "guest");
        assert_eq!(config.payload_shape, PayloadShape::Raw);
    }

    #[test]
    fn test_payload_shape_deserialize() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"payload_shape":"element"}"#).unwrap();
        assert_eq!(config.payload_shape, PayloadShape::Element);
    }
}
