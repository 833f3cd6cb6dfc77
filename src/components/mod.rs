//! Leptos components for pages that render their own chrome.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components emit the markup the controller binds to by element id; the
//! controller, not Leptos state, owns the applied theme.

pub mod theme_toggle;
