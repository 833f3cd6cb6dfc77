//! Theme controller: resolve, apply, persist, toggle, and initialize.
//!
//! DESIGN
//! ======
//! The root attribute is the single source of truth for the applied theme.
//! The controller keeps no copy of it. Click binding is tracked on the
//! element itself (the host's bound marker), so repeated initialization never
//! double-binds yet a re-rendered control is bound again. The OS subscription
//! is tracked on the controller.
//!
//! Host failures are best-effort: each call site logs the `HostError` and
//! continues with the documented fallback (not stored, not dark, skipped).
//!
//! Listeners hold a `Weak` handle back to the controller. Once the last
//! strong handle is dropped they become no-ops instead of keeping it alive.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::config::ThemeConfig;
use crate::host::ThemeHost;
use crate::label::ToggleLabel;
use crate::theme::Theme;

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Where a resolved theme came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSource {
    /// A valid persisted user choice.
    Stored,
    /// The OS `prefers-color-scheme` signal.
    System,
    /// Neither was available.
    Default,
}

/// Outcome of initial-preference resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub theme: Theme,
    pub source: ThemeSource,
}

struct Inner<H> {
    host: H,
    config: ThemeConfig,
    scheme_subscribed: Cell<bool>,
    init_deferred: Cell<bool>,
    initialized: Cell<bool>,
}

/// Page-scoped theme controller over a [`ThemeHost`].
///
/// Cloning is cheap and every clone drives the same page state.
pub struct ThemeController<H> {
    inner: Rc<Inner<H>>,
}

impl<H> Clone for ThemeController<H> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<H: ThemeHost + 'static> ThemeController<H> {
    pub fn new(host: H, config: ThemeConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                config,
                scheme_subscribed: Cell::new(false),
                init_deferred: Cell::new(false),
                initialized: Cell::new(false),
            }),
        }
    }

    pub fn with_defaults(host: H) -> Self {
        Self::new(host, ThemeConfig::default())
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.inner.config
    }

    /// `true` once `initialize()` has run or queued itself.
    pub fn is_started(&self) -> bool {
        self.inner.initialized.get() || self.inner.init_deferred.get()
    }

    fn from_weak(weak: &Weak<Inner<H>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// The persisted user choice, if one is stored and valid.
    ///
    /// Unreadable storage and foreign values both read as `None`.
    pub fn stored_preference(&self) -> Option<Theme> {
        let key = &self.inner.config.storage_key;
        let raw = match self.inner.host.load(key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("theme: reading {key} failed, treating as unset: {err}");
                return None;
            }
        };
        match raw.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(err) => {
                debug!("theme: ignoring stored value: {err}");
                None
            }
        }
    }

    /// Resolve the initial theme: stored choice, then OS preference, then light.
    pub fn resolve(&self) -> Resolution {
        if let Some(theme) = self.stored_preference() {
            return Resolution { theme, source: ThemeSource::Stored };
        }
        match self.inner.host.prefers_dark(&self.inner.config.media_query) {
            Ok(prefers_dark) => Resolution {
                theme: Theme::from_prefers_dark(prefers_dark),
                source: ThemeSource::System,
            },
            Err(err) => {
                debug!("theme: no OS color-scheme signal: {err}");
                Resolution { theme: Theme::default(), source: ThemeSource::Default }
            }
        }
    }

    pub fn resolve_initial(&self) -> Theme {
        self.resolve().theme
    }

    /// The theme currently on the root element, if any.
    pub fn current(&self) -> Option<Theme> {
        let raw = self.inner.host.root_attribute(&self.inner.config.attribute)?;
        match raw.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(err) => {
                debug!("theme: root attribute is not a theme: {err}");
                None
            }
        }
    }

    /// Set the root attribute and sync the toggle control to `theme`.
    pub fn apply(&self, theme: Theme) {
        let config = &self.inner.config;
        if let Err(err) = self.inner.host.set_root_attribute(&config.attribute, theme.as_str()) {
            warn!("theme: failed to apply {theme}: {err}");
        }
        match self.inner.host.update_toggle(&config.toggle_id, &ToggleLabel::for_theme(theme)) {
            Ok(true) => {}
            Ok(false) => debug!("theme: no #{} control to label", config.toggle_id),
            Err(err) => warn!("theme: failed to label #{}: {err}", config.toggle_id),
        }
    }

    /// Store `theme` as the user's explicit choice.
    pub fn persist(&self, theme: Theme) {
        let key = &self.inner.config.storage_key;
        if let Err(err) = self.inner.host.save(key, theme.as_str()) {
            warn!("theme: could not persist {theme} under {key}: {err}");
        }
    }

    /// Flip the applied theme and persist the new choice.
    pub fn toggle(&self) -> Theme {
        let current = self.current().unwrap_or_else(|| self.resolve_initial());
        let next = current.opposite();
        debug!("theme: toggle {current} -> {next}");
        self.apply(next);
        self.persist(next);
        next
    }

    /// Initialize once the document is ready.
    ///
    /// While the document is loading this queues a single ready handler;
    /// further calls before it fires are absorbed.
    pub fn initialize(&self) {
        if !self.inner.host.is_loading() {
            self.initialize_now();
            return;
        }
        if self.inner.init_deferred.replace(true) {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let deferred = Box::new(move || {
            if let Some(controller) = Self::from_weak(&weak) {
                controller.inner.init_deferred.set(false);
                controller.initialize_now();
            }
        });
        if let Err(err) = self.inner.host.on_ready(deferred) {
            warn!("theme: could not wait for document ready, initializing now: {err}");
            self.inner.init_deferred.set(false);
            self.initialize_now();
        }
    }

    fn initialize_now(&self) {
        self.inner.initialized.set(true);
        let resolution = self.resolve();
        debug!("theme: initial {} ({:?})", resolution.theme, resolution.source);
        self.apply(resolution.theme);
        self.bind_toggle();
        if resolution.source != ThemeSource::Stored {
            self.watch_color_scheme();
        }
    }

    fn bind_toggle(&self) {
        let id = &self.inner.config.toggle_id;
        if self.inner.host.toggle_is_bound(id) {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let handler = Box::new(move || {
            if let Some(controller) = Self::from_weak(&weak) {
                controller.toggle();
            }
        });
        match self.inner.host.bind_toggle_click(id, handler) {
            Ok(true) => debug!("theme: bound #{id}"),
            Ok(false) => debug!("theme: no #{id} control to bind"),
            Err(err) => warn!("theme: failed to bind #{id}: {err}"),
        }
    }

    fn watch_color_scheme(&self) {
        if self.inner.scheme_subscribed.get() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let handler = Box::new(move |prefers_dark: bool| {
            if let Some(controller) = Self::from_weak(&weak) {
                controller.follow_system(prefers_dark);
            }
        });
        match self.inner.host.subscribe(&self.inner.config.media_query, handler) {
            Ok(()) => self.inner.scheme_subscribed.set(true),
            Err(err) => debug!("theme: not following OS color scheme: {err}"),
        }
    }

    /// Re-apply on an OS change unless the user has since stored a choice.
    fn follow_system(&self, prefers_dark: bool) {
        if let Some(stored) = self.stored_preference() {
            debug!("theme: OS change ignored, user chose {stored}");
            return;
        }
        let theme = Theme::from_prefers_dark(prefers_dark);
        debug!("theme: following OS color scheme to {theme}");
        self.apply(theme);
    }
}
