//! Event record types — the structured payload describing one tracked
//! interaction, plus the raw interaction shape handed in by the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of tracked interaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Click,
    View,
    Search,
}

/// Coarse device class derived from the user-agent string.
///
/// `Unknown` is reported only for detached (non-client) contexts; an
/// attached context with no matching token falls back to `Desktop`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
    Unknown,
}

/// Operating system derived from the user-agent string.
///
/// `Unknown` means an attached context whose user-agent matched no token;
/// `Unavailable` means no client context at all. The two serialize to the
/// distinct wire values `"Unknown"` and `"unknown"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OperatingSystem {
    Windows,
    #[serde(rename = "macOS")]
    MacOs,
    Linux,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    Unknown,
    #[serde(rename = "unknown")]
    Unavailable,
}

/// Browser family derived from the user-agent string. Same
/// `Unknown`/`Unavailable` split as [`OperatingSystem`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    #[serde(rename = "Internet Explorer")]
    InternetExplorer,
    Edge,
    Unknown,
    #[serde(rename = "unknown")]
    Unavailable,
}

/// Target element of an interaction. Fields are empty strings when the
/// host has nothing to report, matching the wire convention.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElementInfo {
    pub id: String,
    pub class: String,
    pub text: String,
}

/// Raw interaction payload handed to the SDK by an interaction source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interaction {
    pub target: ElementInfo,
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// Reduced element shape carried in `event_params` when the tracker is
/// configured with the element payload variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementParams {
    pub element_id: String,
    pub element_class: String,
    pub element_text: String,
}

impl From<&ElementInfo> for ElementParams {
    fn from(target: &ElementInfo) -> Self {
        Self {
            element_id: target.id.clone(),
            element_class: target.class.clone(),
            element_text: target.text.clone(),
        }
    }
}

/// One tracked interaction, fully enriched and ready for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_type: EventType,
    pub event_time: DateTime<Utc>,
    pub user_id: String,
    pub user_role: String,
    pub page_url: String,
    pub page_title: String,
    pub device_type: DeviceType,
    pub operating_system: OperatingSystem,
    pub browser: Browser,
    pub event_params: serde_json::Value,
    pub source: String,
}
