//! User-agent classification heuristics — fixed-priority, case-insensitive
//! substring tests. First match wins and the order is significant: tokens
//! overlap across real user-agents (every Chrome UA also carries "Safari",
//! Android UAs carry "Linux"), so reordering changes results.
//!
//! A `None` user-agent means the execution context is detached from any
//! client; all classifiers then report the unavailable value.

use crate::types::{Browser, DeviceType, OperatingSystem};

/// Coarse device class. Checked: mobile, then tablet, then the desktop
/// fallback — "Mobile" wins even when other tokens are also present.
pub fn device_type(user_agent: Option<&str>) -> DeviceType {
    let Some(ua) = user_agent else {
        return DeviceType::Unknown;
    };
    let ua = ua.to_ascii_lowercase();
    if ua.contains("mobile") {
        DeviceType::Mobile
    } else if ua.contains("tablet") {
        DeviceType::Tablet
    } else {
        DeviceType::Desktop
    }
}

/// Operating system. Checked: windows, macintosh, linux, android,
/// iphone/ipad.
pub fn operating_system(user_agent: Option<&str>) -> OperatingSystem {
    let Some(ua) = user_agent else {
        return OperatingSystem::Unavailable;
    };
    let ua = ua.to_ascii_lowercase();
    if ua.contains("windows") {
        OperatingSystem::Windows
    } else if ua.contains("macintosh") {
        OperatingSystem::MacOs
    } else if ua.contains("linux") {
        OperatingSystem::Linux
    } else if ua.contains("android") {
        OperatingSystem::Android
    } else if ua.contains("iphone") || ua.contains("ipad") {
        OperatingSystem::Ios
    } else {
        OperatingSystem::Unknown
    }
}

/// Browser family. Checked: chrome, firefox, safari, msie/trident, edge —
/// chrome must precede safari because Chrome UAs carry both tokens.
pub fn browser(user_agent: Option<&str>) -> Browser {
    let Some(ua) = user_agent else {
        return Browser::Unavailable;
    };
    let ua = ua.to_ascii_lowercase();
    if ua.contains("chrome") {
        Browser::Chrome
    } else if ua.contains("firefox") {
        Browser::Firefox
    } else if ua.contains("safari") {
        Browser::Safari
    } else if ua.contains("msie") || ua.contains("trident") {
        Browser::InternetExplorer
    } else if ua.contains("edge") {
        Browser::Edge
    } else {
        Browser::Unknown
    }
}
