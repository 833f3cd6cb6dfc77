//! Page-wide controller slot.
//!
//! A page has one theme controller. The slot creates it on first use with the
//! default config, and lets an explicit config replace that controller as long
//! as it has not started. Once `initialize()` has run or queued itself the
//! config is fixed for the page.

use std::cell::RefCell;

use log::{debug, warn};

use crate::config::ThemeConfig;
use crate::controller::ThemeController;
use crate::error::HostResult;
use crate::host::ThemeHost;

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

pub struct PageSlot<H> {
    controller: RefCell<Option<ThemeController<H>>>,
}

impl<H> PageSlot<H> {
    #[must_use]
    pub const fn new() -> Self {
        Self { controller: RefCell::new(None) }
    }
}

impl<H> Default for PageSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ThemeHost + 'static> PageSlot<H> {
    /// The existing controller, if one has been created.
    pub fn get(&self) -> Option<ThemeController<H>> {
        self.controller.borrow().clone()
    }

    /// The page's controller, created with the default config on first use.
    pub fn get_or_create(&self, make_host: impl FnOnce() -> HostResult<H>) -> HostResult<ThemeController<H>> {
        if let Some(controller) = self.get() {
            return Ok(controller);
        }
        Ok(self.install(ThemeController::new(make_host()?, ThemeConfig::default())))
    }

    /// The page's controller under `config`.
    ///
    /// A controller that has not started is replaced. A started one is kept
    /// and a differing `config` is reported and ignored.
    pub fn configure(
        &self,
        config: ThemeConfig,
        make_host: impl FnOnce() -> HostResult<H>,
    ) -> HostResult<ThemeController<H>> {
        if let Some(existing) = self.get() {
            if existing.is_started() {
                if *existing.config() != config {
                    warn!("theme: page controller already started, ignoring new config");
                }
                return Ok(existing);
            }
            debug!("theme: replacing unstarted page controller with explicit config");
        }
        Ok(self.install(ThemeController::new(make_host()?, config)))
    }

    fn install(&self, controller: ThemeController<H>) -> ThemeController<H> {
        *self.controller.borrow_mut() = Some(controller.clone());
        controller
    }
}
