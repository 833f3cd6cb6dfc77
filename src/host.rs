//! Seams between the controller and the page environment.
//!
//! ARCHITECTURE
//! ============
//! The controller only talks to these traits. `web::WebHost` binds them to
//! `web-sys` in the browser; `memory::MemoryHost` keeps everything in process
//! so the controller runs headless in tests and on the server.
//!
//! All hosts are single-threaded: handlers are plain `Fn` closures invoked one
//! at a time by the host's event loop.

use std::rc::Rc;

use crate::error::HostResult;
use crate::label::ToggleLabel;

/// Attribute a host sets on a toggle control once its click listener is
/// attached. A replacement element under the same id lacks it and is bound
/// again.
pub const BOUND_MARKER: &str = "data-theme-bound";

/// Invoked for each click on the toggle control.
pub type ClickHandler = Box<dyn Fn()>;
/// Invoked with the new "prefers dark" value on each OS color-scheme change.
pub type SchemeHandler = Box<dyn Fn(bool)>;
/// Invoked once when the document finishes loading.
pub type ReadyHandler = Box<dyn FnOnce()>;

/// Durable, origin-scoped key-value store.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> HostResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> HostResult<()>;
}

/// The document the theme is applied to.
pub trait ThemeDocument {
    /// `true` while the document is still parsing.
    fn is_loading(&self) -> bool;

    /// Run `handler` once the document is ready for manipulation.
    fn on_ready(&self, handler: ReadyHandler) -> HostResult<()>;

    fn root_attribute(&self, name: &str) -> Option<String>;

    fn set_root_attribute(&self, name: &str, value: &str) -> HostResult<()>;

    /// Write `label` onto the control with element id `id`.
    ///
    /// Returns `Ok(false)` when no such control exists.
    fn update_toggle(&self, id: &str, label: &ToggleLabel) -> HostResult<bool>;

    /// `true` when the control with id `id` carries [`BOUND_MARKER`].
    fn toggle_is_bound(&self, id: &str) -> bool;

    /// Attach `handler` as a click listener on the control with id `id` and
    /// mark that element with [`BOUND_MARKER`].
    ///
    /// Returns `Ok(false)` when no such control exists. Hosts do not dedupe;
    /// callers check [`ThemeDocument::toggle_is_bound`] first.
    fn bind_toggle_click(&self, id: &str, handler: ClickHandler) -> HostResult<bool>;
}

/// Operating-system color-scheme signal.
pub trait ColorSchemeSource {
    fn prefers_dark(&self, query: &str) -> HostResult<bool>;

    /// Listen for changes for the rest of the page's lifetime.
    fn subscribe(&self, query: &str, handler: SchemeHandler) -> HostResult<()>;
}

/// Everything the controller needs from its environment.
pub trait ThemeHost: PreferenceStore + ThemeDocument + ColorSchemeSource {}

impl<T: PreferenceStore + ThemeDocument + ColorSchemeSource> ThemeHost for T {}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Rc<T> {
    fn load(&self, key: &str) -> HostResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> HostResult<()> {
        (**self).save(key, value)
    }
}

impl<T: ThemeDocument + ?Sized> ThemeDocument for Rc<T> {
    fn is_loading(&self) -> bool {
        (**self).is_loading()
    }

    fn on_ready(&self, handler: ReadyHandler) -> HostResult<()> {
        (**self).on_ready(handler)
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        (**self).root_attribute(name)
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> HostResult<()> {
        (**self).set_root_attribute(name, value)
    }

    fn update_toggle(&self, id: &str, label: &ToggleLabel) -> HostResult<bool> {
        (**self).update_toggle(id, label)
    }

    fn toggle_is_bound(&self, id: &str) -> bool {
        (**self).toggle_is_bound(id)
    }

    fn bind_toggle_click(&self, id: &str, handler: ClickHandler) -> HostResult<bool> {
        (**self).bind_toggle_click(id, handler)
    }
}

impl<T: ColorSchemeSource + ?Sized> ColorSchemeSource for Rc<T> {
    fn prefers_dark(&self, query: &str) -> HostResult<bool> {
        (**self).prefers_dark(query)
    }

    fn subscribe(&self, query: &str, handler: SchemeHandler) -> HostResult<()> {
        (**self).subscribe(query, handler)
    }
}
