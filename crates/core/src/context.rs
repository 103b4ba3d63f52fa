//! Client-context seam — the host environment's cookie store, page
//! location, and user-agent source consumed as a black box.
//!
//! The tracker reads the context at event time, never at bind time, so
//! implementations must reflect the current state of the host on every
//! call.

use std::collections::HashMap;
use std::sync::Mutex;

/// Host environment the tracker observes. `None`/empty answers are always
/// tolerated; they surface as empty strings or unavailable classifications
/// in the event record.
pub trait ClientContext: Send + Sync {
    /// Whether a live client (page, cookie store, user-agent) is present.
    /// Detached contexts never persist anything and report placeholders.
    fn is_attached(&self) -> bool;

    fn page_url(&self) -> Option<String>;

    fn page_title(&self) -> Option<String>;

    /// Referrer of the current page.
    fn referrer(&self) -> Option<String>;

    fn user_agent(&self) -> Option<String>;

    fn cookie(&self, name: &str) -> Option<String>;

    fn set_cookie(&self, name: &str, value: &str, max_age_days: u32);
}

/// Context for non-client execution (server-side rendering, batch jobs).
/// Everything is absent and cookie writes are dropped.
#[derive(Debug, Default)]
pub struct DetachedContext;

impl ClientContext for DetachedContext {
    fn is_attached(&self) -> bool {
        false
    }

    fn page_url(&self) -> Option<String> {
        None
    }

    fn page_title(&self) -> Option<String> {
        None
    }

    fn referrer(&self) -> Option<String> {
        None
    }

    fn user_agent(&self) -> Option<String> {
        None
    }

    fn cookie(&self, _name: &str) -> Option<String> {
        None
    }

    fn set_cookie(&self, _name: &str, _value: &str, _max_age_days: u32) {}
}

/// In-memory context for tests and simulated sessions. Page fields are
/// mutable behind a mutex so tests can change the page between events.
#[derive(Default)]
pub struct MemoryContext {
    cookies: Mutex<HashMap<String, String>>,
    page_url: Mutex<Option<String>>,
    page_title: Mutex<Option<String>>,
    referrer: Mutex<Option<String>>,
    user_agent: Mutex<Option<String>>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, title: impl Into<String>) -> Self {
        self.set_page(url, title);
        self
    }

    pub fn with_referrer(self, referrer: impl Into<String>) -> Self {
        *self.referrer.lock().expect("context mutex poisoned") = Some(referrer.into());
        self
    }

    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        *self.user_agent.lock().expect("context mutex poisoned") = Some(user_agent.into());
        self
    }

    /// Move the simulated session to a new page.
    pub fn set_page(&self, url: impl Into<String>, title: impl Into<String>) {
        *self.page_url.lock().expect("context mutex poisoned") = Some(url.into());
        *self.page_title.lock().expect("context mutex poisoned") = Some(title.into());
    }
}

impl ClientContext for MemoryContext {
    fn is_attached(&self) -> bool {
        true
    }

    fn page_url(&self) -> Option<String> {
        self.page_url.lock().expect("context mutex poisoned").clone()
    }

    fn page_title(&self) -> Option<String> {
        self.page_title.lock().expect("context mutex poisoned").clone()
    }

    fn referrer(&self) -> Option<String> {
        self.referrer.lock().expect("context mutex poisoned").clone()
    }

    fn user_agent(&self) -> Option<String> {
        self.user_agent.lock().expect("context mutex poisoned").clone()
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies
            .lock()
            .expect("cookie store mutex poisoned")
            .get(name)
            .cloned()
    }

    // The in-memory store has no expiry; max_age only matters to real
    // cookie stores.
    fn set_cookie(&self, name: &str, value: &str, _max_age_days: u32) {
        self.cookies
            .lock()
            .expect("cookie store mutex poisoned")
            .insert(name.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_context_cookie_roundtrip() {
        let ctx = MemoryContext::new();
        assert!(ctx.cookie("user_id").is_none());

        ctx.set_cookie("user_id", "abc-123", 365);
        assert_eq!(ctx.cookie("user_id").as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_memory_context_page_updates() {
        let ctx = MemoryContext::new().with_page("https://example.com/a", "A");
        assert_eq!(ctx.page_url().as_deref(), Some("https://example.com/a"));

        ctx.set_page("https://example.com/b", "B");
        assert_eq!(ctx.page_url().as_deref(), Some("https://example.com/b"));
        assert_eq!(ctx.page_title().as_deref(), Some("B"));
    }

    #[test]
    fn test_detached_context_reports_nothing() {
        let ctx = DetachedContext;
        assert!(!ctx.is_attached());
        assert!(ctx.page_url().is_none());
        assert!(ctx.user_agent().is_none());

        // Writes are dropped, reads stay empty
        ctx.set_cookie("user_id", "abc", 365);
        assert!(ctx.cookie("user_id").is_none());
    }
}
