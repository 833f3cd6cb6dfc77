//! In-process host for headless use.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the browser contract closely enough to drive the controller
//! end-to-end without a DOM: a key-value store that can be disabled or made
//! read-only, a root attribute map, an optional toggle control, a simulated
//! `prefers-color-scheme` query, and a document that may still be loading.
//! Ready notifications and OS subscriptions can be made to fail the way a
//! broken browser API would throw.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{HostError, HostResult};
use crate::host::{ClickHandler, ColorSchemeSource, PreferenceStore, ReadyHandler, SchemeHandler, ThemeDocument};
use crate::label::ToggleLabel;

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// Snapshot of the toggle control's rendered state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToggleControl {
    pub id: String,
    pub text: String,
    pub title: Option<String>,
    pub aria_pressed: Option<String>,
    /// Set once a click listener is attached (the host's bound marker).
    pub bound: bool,
}

pub struct MemoryHost {
    storage: RefCell<HashMap<String, String>>,
    storage_available: Cell<bool>,
    storage_writable: Cell<bool>,
    storage_writes: Cell<usize>,
    /// `None` models a host without `matchMedia`.
    prefers_dark: Cell<Option<bool>>,
    loading: Cell<bool>,
    ready_fails: Cell<bool>,
    subscribe_fails: Cell<bool>,
    root_attributes: RefCell<HashMap<String, String>>,
    toggle: RefCell<Option<ToggleControl>>,
    click_handlers: RefCell<Vec<Rc<dyn Fn()>>>,
    scheme_handlers: RefCell<Vec<Rc<dyn Fn(bool)>>>,
    ready_handlers: RefCell<Vec<ReadyHandler>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// A ready document with working storage, a light OS preference, and a
    /// toggle control under the default id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: RefCell::new(HashMap::new()),
            storage_available: Cell::new(true),
            storage_writable: Cell::new(true),
            storage_writes: Cell::new(0),
            prefers_dark: Cell::new(Some(false)),
            loading: Cell::new(false),
            ready_fails: Cell::new(false),
            subscribe_fails: Cell::new(false),
            root_attributes: RefCell::new(HashMap::new()),
            toggle: RefCell::new(Some(ToggleControl {
                id: crate::config::DEFAULT_TOGGLE_ID.to_owned(),
                ..ToggleControl::default()
            })),
            click_handlers: RefCell::new(Vec::new()),
            scheme_handlers: RefCell::new(Vec::new()),
            ready_handlers: RefCell::new(Vec::new()),
        }
    }

    // =============================================================
    // Builders
    // =============================================================

    #[must_use]
    pub fn with_stored(self, key: &str, value: &str) -> Self {
        self.storage.borrow_mut().insert(key.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn with_prefers_dark(self, prefers_dark: bool) -> Self {
        self.prefers_dark.set(Some(prefers_dark));
        self
    }

    /// Host without `matchMedia`.
    #[must_use]
    pub fn without_media_query(self) -> Self {
        self.prefers_dark.set(None);
        self
    }

    /// Storage disabled entirely (private browsing, blocked cookies).
    #[must_use]
    pub fn without_storage(self) -> Self {
        self.storage_available.set(false);
        self
    }

    /// Reads succeed, writes throw (quota exceeded).
    #[must_use]
    pub fn with_failing_writes(self) -> Self {
        self.storage_writable.set(false);
        self
    }

    #[must_use]
    pub fn without_toggle(self) -> Self {
        self.toggle.replace(None);
        self
    }

    /// Document still parsing; ready handlers wait for [`Self::finish_loading`].
    #[must_use]
    pub fn loading(self) -> Self {
        self.loading.set(true);
        self
    }

    /// `on_ready` throws instead of queueing.
    #[must_use]
    pub fn with_failing_ready(self) -> Self {
        self.ready_fails.set(true);
        self
    }

    /// `matchMedia` answers but adding a `change` listener throws.
    #[must_use]
    pub fn with_failing_subscribe(self) -> Self {
        self.subscribe_fails.set(true);
        self
    }

    // =============================================================
    // Inspection
    // =============================================================

    /// Raw stored value, bypassing availability switches.
    #[must_use]
    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    /// Number of successful storage writes.
    #[must_use]
    pub fn storage_writes(&self) -> usize {
        self.storage_writes.get()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.borrow().get(name).cloned()
    }

    #[must_use]
    pub fn toggle_control(&self) -> Option<ToggleControl> {
        self.toggle.borrow().clone()
    }

    #[must_use]
    pub fn click_listener_count(&self) -> usize {
        self.click_handlers.borrow().len()
    }

    #[must_use]
    pub fn scheme_listener_count(&self) -> usize {
        self.scheme_handlers.borrow().len()
    }

    #[must_use]
    pub fn pending_ready_count(&self) -> usize {
        self.ready_handlers.borrow().len()
    }

    // =============================================================
    // Events
    // =============================================================

    /// Dispatch a click to every listener on the toggle control.
    pub fn click_toggle(&self) {
        let handlers = self.click_handlers.borrow().clone();
        for handler in handlers {
            handler();
        }
    }

    /// Change the OS preference and notify subscribers.
    pub fn set_system_dark(&self, prefers_dark: bool) {
        if self.prefers_dark.get().is_none() {
            return;
        }
        self.prefers_dark.set(Some(prefers_dark));
        let handlers = self.scheme_handlers.borrow().clone();
        for handler in handlers {
            handler(prefers_dark);
        }
    }

    /// Mark the document ready and run queued ready handlers once.
    pub fn finish_loading(&self) {
        self.loading.set(false);
        let handlers = self.ready_handlers.take();
        for handler in handlers {
            handler();
        }
    }

    /// Render a fresh toggle control, as late or re-rendered markup would.
    ///
    /// Any previous control is discarded along with its click listeners.
    pub fn insert_toggle(&self, id: &str) {
        self.toggle.replace(Some(ToggleControl { id: id.to_owned(), ..ToggleControl::default() }));
        self.click_handlers.borrow_mut().clear();
    }
}

impl PreferenceStore for MemoryHost {
    fn load(&self, key: &str) -> HostResult<Option<String>> {
        if !self.storage_available.get() {
            return Err(HostError::StorageUnavailable);
        }
        Ok(self.stored(key))
    }

    fn save(&self, key: &str, value: &str) -> HostResult<()> {
        if !self.storage_available.get() {
            return Err(HostError::StorageUnavailable);
        }
        if !self.storage_writable.get() {
            return Err(HostError::Storage("quota exceeded".to_owned()));
        }
        self.storage.borrow_mut().insert(key.to_owned(), value.to_owned());
        self.storage_writes.set(self.storage_writes.get() + 1);
        Ok(())
    }
}

impl ThemeDocument for MemoryHost {
    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn on_ready(&self, handler: ReadyHandler) -> HostResult<()> {
        if self.ready_fails.get() {
            return Err(HostError::Listener("DOMContentLoaded listener rejected".to_owned()));
        }
        if self.loading.get() {
            self.ready_handlers.borrow_mut().push(handler);
        } else {
            handler();
        }
        Ok(())
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.attribute(name)
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> HostResult<()> {
        self.root_attributes.borrow_mut().insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn update_toggle(&self, id: &str, label: &ToggleLabel) -> HostResult<bool> {
        let mut toggle = self.toggle.borrow_mut();
        let Some(control) = toggle.as_mut().filter(|control| control.id == id) else {
            return Ok(false);
        };
        control.text.clone_from(&label.text);
        control.title = Some(label.title.clone());
        control.aria_pressed = Some(label.pressed_attr().to_owned());
        Ok(true)
    }

    fn toggle_is_bound(&self, id: &str) -> bool {
        self.toggle.borrow().as_ref().is_some_and(|control| control.id == id && control.bound)
    }

    fn bind_toggle_click(&self, id: &str, handler: ClickHandler) -> HostResult<bool> {
        let mut toggle = self.toggle.borrow_mut();
        let Some(control) = toggle.as_mut().filter(|control| control.id == id) else {
            return Ok(false);
        };
        control.bound = true;
        self.click_handlers.borrow_mut().push(Rc::from(handler));
        Ok(true)
    }
}

impl ColorSchemeSource for MemoryHost {
    fn prefers_dark(&self, _query: &str) -> HostResult<bool> {
        self.prefers_dark.get().ok_or(HostError::MediaQueryUnsupported)
    }

    fn subscribe(&self, _query: &str, handler: SchemeHandler) -> HostResult<()> {
        if self.prefers_dark.get().is_none() {
            return Err(HostError::MediaQueryUnsupported);
        }
        if self.subscribe_fails.get() {
            return Err(HostError::Subscribe("addEventListener threw".to_owned()));
        }
        self.scheme_handlers.borrow_mut().push(Rc::from(handler));
        Ok(())
    }
}
