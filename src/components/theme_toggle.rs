//! Toggle button markup for Leptos pages.

use leptos::prelude::*;

use crate::config::DEFAULT_TOGGLE_ID;
use crate::label::ToggleLabel;
use crate::theme::Theme;

/// Theme toggle button.
///
/// Renders with the light-page label so server output is deterministic. On
/// hydration the page controller is initialized, which relabels the button
/// for the resolved theme and binds its click handler exactly once. A custom
/// `id` configures the page controller's `toggleId` unless the page was
/// already initialized with its own config.
#[component]
pub fn ThemeToggle(#[prop(into, default = DEFAULT_TOGGLE_ID.to_owned())] id: String) -> impl IntoView {
    let label = ToggleLabel::for_theme(Theme::Light);
    let pressed = label.pressed_attr();

    #[cfg(feature = "hydrate")]
    {
        let toggle_id = id.clone();
        Effect::new(move || {
            if toggle_id == DEFAULT_TOGGLE_ID {
                crate::web::init_theme();
                return;
            }
            let config = crate::config::ThemeConfig { toggle_id: toggle_id.clone(), ..Default::default() };
            if let Err(err) = crate::web::init_page(config) {
                log::warn!("theme: toggle #{toggle_id} not initialized: {err}");
            }
        });
    }

    view! {
        <button id=id type="button" class="btn theme-toggle" title=label.title aria-pressed=pressed>
            {label.text}
        </button>
    }
}
