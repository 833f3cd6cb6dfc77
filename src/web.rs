//! Browser host and `wasm-bindgen` entry points.
//!
//! Binds the host traits to `window.localStorage`, `window.matchMedia`, and
//! `document`. Listeners are handed to the browser and leaked for the page's
//! lifetime (`Closure::forget`); the page-wide controller lives in a
//! thread-local [`PageSlot`] so repeated `init_theme()` calls reuse it.
//!
//! Nothing runs on module load. The embedding app calls [`install`] for the
//! console hooks and then one of the `init_theme*` exports, so a config passed
//! to `init_theme_with_config` is in place before the first initialization.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, MediaQueryList, MediaQueryListEvent, Storage, Window};

use crate::config::ThemeConfig;
use crate::controller::ThemeController;
use crate::error::{HostError, HostResult};
use crate::host::{BOUND_MARKER, ClickHandler, ColorSchemeSource, PreferenceStore, ReadyHandler, SchemeHandler, ThemeDocument};
use crate::label::ToggleLabel;
use crate::page::PageSlot;
use crate::theme::Theme;

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// [`crate::host::ThemeHost`] backed by the live browser page.
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> HostResult<Self> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;
        Ok(Self { window, document })
    }

    fn storage(&self) -> HostResult<Storage> {
        match self.window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(HostError::StorageUnavailable),
            Err(err) => Err(HostError::Storage(describe(&err))),
        }
    }

    fn media_query(&self, query: &str) -> HostResult<MediaQueryList> {
        match self.window.match_media(query) {
            Ok(Some(list)) => Ok(list),
            Ok(None) | Err(_) => Err(HostError::MediaQueryUnsupported),
        }
    }
}

impl PreferenceStore for WebHost {
    fn load(&self, key: &str) -> HostResult<Option<String>> {
        self.storage()?.get_item(key).map_err(|err| HostError::Storage(describe(&err)))
    }

    fn save(&self, key: &str, value: &str) -> HostResult<()> {
        self.storage()?.set_item(key, value).map_err(|err| HostError::Storage(describe(&err)))
    }
}

impl ThemeDocument for WebHost {
    fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn on_ready(&self, handler: ReadyHandler) -> HostResult<()> {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let callback = Closure::once_into_js(move || handler());
        self.document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                callback.unchecked_ref(),
                &options,
            )
            .map_err(|err| HostError::Listener(describe(&err)))
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> HostResult<()> {
        let root = self.document.document_element().ok_or(HostError::NoDocument)?;
        root.set_attribute(name, value).map_err(|err| HostError::Attribute(describe(&err)))
    }

    fn update_toggle(&self, id: &str, label: &ToggleLabel) -> HostResult<bool> {
        let Some(control) = self.document.get_element_by_id(id) else {
            return Ok(false);
        };
        control.set_text_content(Some(&label.text));
        control
            .set_attribute("title", &label.title)
            .and_then(|()| control.set_attribute("aria-pressed", label.pressed_attr()))
            .map_err(|err| HostError::Attribute(describe(&err)))?;
        Ok(true)
    }

    fn toggle_is_bound(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some_and(|control| control.has_attribute(BOUND_MARKER))
    }

    fn bind_toggle_click(&self, id: &str, handler: ClickHandler) -> HostResult<bool> {
        let Some(control) = self.document.get_element_by_id(id) else {
            return Ok(false);
        };
        let callback = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        control
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(|err| HostError::Listener(describe(&err)))?;
        callback.forget();
        if let Err(err) = control.set_attribute(BOUND_MARKER, "") {
            log::warn!("theme: could not mark #{id} as bound: {}", describe(&err));
        }
        Ok(true)
    }
}

impl ColorSchemeSource for WebHost {
    fn prefers_dark(&self, query: &str) -> HostResult<bool> {
        Ok(self.media_query(query)?.matches())
    }

    fn subscribe(&self, query: &str, handler: SchemeHandler) -> HostResult<()> {
        let list = self.media_query(query)?;
        let callback = Closure::wrap(
            Box::new(move |event: MediaQueryListEvent| handler(event.matches())) as Box<dyn FnMut(MediaQueryListEvent)>
        );
        list.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
            .map_err(|err| HostError::Subscribe(describe(&err)))?;
        callback.forget();
        Ok(())
    }
}

// =============================================================
// Page-wide controller
// =============================================================

thread_local! {
    static PAGE: PageSlot<WebHost> = const { PageSlot::new() };
}

fn with_page<R>(f: impl FnOnce(&ThemeController<WebHost>) -> R) -> Option<R> {
    match PAGE.with(|slot| slot.get_or_create(WebHost::new)) {
        Ok(controller) => Some(f(&controller)),
        Err(err) => {
            log::warn!("theme: no page to control: {err}");
            None
        }
    }
}

/// Configure the page controller with `config` and initialize it.
///
/// `config` replaces a controller that has not started yet; once the page is
/// initialized it is ignored with a warning.
pub fn init_page(config: ThemeConfig) -> HostResult<()> {
    let controller = PAGE.with(|slot| slot.configure(config, WebHost::new))?;
    controller.initialize();
    Ok(())
}

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen]
pub fn install() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }
}

/// Initialize the page theme with default names. Safe to call repeatedly.
#[wasm_bindgen]
pub fn init_theme() {
    with_page(ThemeController::initialize);
}

/// Initialize with a JSON config object (camelCase keys, all optional).
///
/// Takes effect when called before the page controller has been initialized.
#[wasm_bindgen]
pub fn init_theme_with_config(config_json: &str) -> Result<(), JsError> {
    let config = ThemeConfig::from_json(config_json).map_err(|err| JsError::new(&err.to_string()))?;
    init_page(config).map_err(|err| JsError::new(&err.to_string()))
}

/// Flip the page theme and persist the choice.
#[wasm_bindgen]
pub fn toggle_theme() {
    with_page(ThemeController::toggle);
}

/// Apply `theme` without persisting it. Returns `false` for anything but
/// `"light"` or `"dark"`.
#[wasm_bindgen]
pub fn apply_theme(theme: &str) -> bool {
    match theme.parse::<Theme>() {
        Ok(theme) => with_page(|controller| controller.apply(theme)).is_some(),
        Err(err) => {
            log::warn!("theme: apply_theme rejected: {err}");
            false
        }
    }
}

/// The theme currently applied to the page, if any.
#[wasm_bindgen]
pub fn current_theme() -> Option<String> {
    with_page(ThemeController::current).flatten().map(|theme| theme.as_str().to_owned())
}
