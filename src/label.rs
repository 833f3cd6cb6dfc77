//! Toggle-control presentation derived from the applied theme.

use crate::theme::Theme;

#[cfg(test)]
#[path = "label_test.rs"]
mod label_test;

/// Text, tooltip, and pressed state shown on the toggle control.
///
/// Always a pure function of the applied theme; the control holds no state
/// of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleLabel {
    pub text: String,
    pub title: String,
    pub pressed: bool,
}

impl ToggleLabel {
    /// Label for a control on a page currently showing `theme`.
    ///
    /// The text names the theme a click switches to.
    #[must_use]
    pub fn for_theme(theme: Theme) -> Self {
        let next = match theme.opposite() {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        };
        Self {
            text: format!("Toggle {next} Mode"),
            title: format!("Switch to {next} mode"),
            pressed: theme.is_dark(),
        }
    }

    /// Value for the `aria-pressed` attribute.
    #[must_use]
    pub fn pressed_attr(&self) -> &'static str {
        if self.pressed { "true" } else { "false" }
    }
}
