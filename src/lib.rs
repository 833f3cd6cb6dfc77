//! # page-theme
//!
//! Light/dark theme controller for Leptos + WASM pages.
//!
//! Resolves the initial theme (stored choice, then the OS
//! `prefers-color-scheme` signal, then light), writes it to a `data-theme`
//! attribute on `<html>`, keeps an optional toggle button labelled, persists
//! explicit toggles to `localStorage`, and follows OS changes until the user
//! makes a choice.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | The two-valued [`Theme`] and its string form |
//! | [`label`] | Toggle text/title/pressed state derived from a theme |
//! | [`config`] | Storage key, DOM names, media query |
//! | [`error`] | Best-effort host failures |
//! | [`host`] | Traits the controller drives |
//! | [`controller`] | [`ThemeController`]: resolve, apply, persist, toggle, initialize |
//! | [`memory`] | Headless [`MemoryHost`] |
//! | [`page`] | One controller per page, configurable until it starts |
//! | [`components`] | Leptos `ThemeToggle` button |
//! | `web` | Browser host and `wasm-bindgen` exports (feature `hydrate`) |

pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod label;
pub mod memory;
pub mod page;
pub mod theme;
#[cfg(feature = "hydrate")]
pub mod web;

pub use config::{ConfigError, ThemeConfig};
pub use controller::{Resolution, ThemeController, ThemeSource};
pub use error::{HostError, HostResult};
pub use host::ThemeHost;
pub use label::ToggleLabel;
pub use memory::MemoryHost;
pub use page::PageSlot;
pub use theme::{ParseThemeError, Theme};
