//! Interaction-dispatch seam — the host's event dispatch consumed as a
//! black box. The tracker binds handlers through [`InteractionSource`];
//! what fires them (a real UI loop, a test, a simulator) is the host's
//! business.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use beacon_core::types::Interaction;

/// Callback invoked with the raw interaction payload.
pub type InteractionHandler = Arc<dyn Fn(Interaction) + Send + Sync>;

/// Host-side event dispatch. Binding to a specific element may fail when
/// the element does not exist; that is reported, not raised.
pub trait InteractionSource {
    /// Bind a handler to every click in the client.
    fn bind_click(&self, handler: InteractionHandler);

    /// Bind a handler to the client's load event.
    fn bind_load(&self, handler: InteractionHandler);

    /// Bind a click handler to one element. Returns `false` when no
    /// element with this id exists; the caller treats that as a no-op.
    fn bind_element_click(&self, element_id: &str, handler: InteractionHandler) -> bool;
}

/// In-memory interaction source for tests and simulated sessions:
/// registers handlers and fires them on demand.
#[derive(Default)]
pub struct SimulatedPage {
    click_handlers: Mutex<Vec<InteractionHandler>>,
    load_handlers: Mutex<Vec<InteractionHandler>>,
    element_handlers: Mutex<HashMap<String, Vec<InteractionHandler>>>,
    elements: Mutex<HashSet<String>>,
}

impl SimulatedPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an element as present on the simulated page.
    pub fn with_element(self, element_id: impl Into<String>) -> Self {
        self.elements
            .lock()
            .expect("page mutex poisoned")
            .insert(element_id.into());
        self
    }

    /// Fire a page-wide click.
    pub fn fire_click(&self, interaction: Interaction) {
        for handler in self.click_handlers.lock().expect("page mutex poisoned").iter() {
            handler(interaction.clone());
        }
    }

    /// Fire the load event.
    pub fn fire_load(&self, interaction: Interaction) {
        for handler in self.load_handlers.lock().expect("page mutex poisoned").iter() {
            handler(interaction.clone());
        }
    }

    /// Fire a click on one element. Unknown ids fire nothing.
    pub fn fire_element_click(&self, element_id: &str, interaction: Interaction) {
        if let Some(handlers) = self
            .element_handlers
            .lock()
            .expect("page mutex poisoned")
            .get(element_id)
        {
            for handler in handlers {
                handler(interaction.clone());
            }
        }
    }

    pub fn click_handler_count(&self) -> usize {
        self.click_handlers.lock().expect("page mutex poisoned").len()
    }

    pub fn load_handler_count(&self) -> usize {
        self.load_handlers.lock().expect("page mutex poisoned").len()
    }

    pub fn element_handler_count(&self, element_id: &str) -> usize {
        self.element_handlers
            .lock()
            .expect("page mutex poisoned")
            .get(element_id)
            .map(|handlers| handlers.len())
            .unwrap_or(0)
    }
}

impl InteractionSource for SimulatedPage {
    fn bind_click(&self, handler: InteractionHandler) {
        self.click_handlers
            .lock()
            .expect("page mutex poisoned")
            .push(handler);
    }

    fn bind_load(&self, handler: InteractionHandler) {
        self.load_handlers
            .lock()
            .expect("page mutex poisoned")
            .push(handler);
    }

    fn bind_element_click(&self, element_id: &str, handler: InteractionHandler) -> bool {
        if !self
            .elements
            .lock()
            .expect("page mutex poisoned")
            .contains(element_id)
        {
            return false;
        }
        self.element_handlers
            .lock()
            .expect("page mutex poisoned")
            .entry(element_id.to_string())
            .or_default()
            .push(handler);
        true
    }
}
