//! End-to-end controller lifecycle against the headless host.

use page_theme::{MemoryHost, Theme, ThemeConfig, ThemeController};

const KEY: &str = "clp.theme";
const ATTR: &str = "data-theme";

fn start(host: MemoryHost) -> ThemeController<MemoryHost> {
    let controller = ThemeController::with_defaults(host);
    controller.initialize();
    controller
}

fn label(controller: &ThemeController<MemoryHost>) -> String {
    controller.host().toggle_control().map(|control| control.text).unwrap_or_default()
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn initialize_applies_resolved_theme_and_labels_control() {
    let c = start(MemoryHost::new().with_prefers_dark(true));
    assert_eq!(c.host().attribute(ATTR).as_deref(), Some("dark"));
    assert_eq!(label(&c), "Toggle Light Mode");
    assert_eq!(c.host().storage_writes(), 0);
}

#[test]
fn initialize_uses_stored_choice() {
    let c = start(MemoryHost::new().with_stored(KEY, "light").with_prefers_dark(true));
    assert_eq!(c.current(), Some(Theme::Light));
}

#[test]
fn initialize_defaults_to_light_when_host_apis_are_missing() {
    let c = start(MemoryHost::new().without_storage().without_media_query());
    assert_eq!(c.current(), Some(Theme::Light));
    assert_eq!(c.host().scheme_listener_count(), 0);
}

#[test]
fn initialize_without_control_is_silent() {
    let c = start(MemoryHost::new().without_toggle());
    assert_eq!(c.current(), Some(Theme::Light));
    assert_eq!(c.host().click_listener_count(), 0);
}

#[test]
fn later_initialize_binds_late_rendered_control() {
    let c = start(MemoryHost::new().without_toggle());
    c.host().insert_toggle("themeToggle");
    c.initialize();
    assert_eq!(c.host().click_listener_count(), 1);
    assert_eq!(label(&c), "Toggle Dark Mode");
}

#[test]
fn custom_names_are_used_end_to_end() {
    let config = ThemeConfig {
        attribute: "data-color-mode".to_owned(),
        toggle_id: "modeSwitch".to_owned(),
        ..ThemeConfig::default()
    };
    let host = MemoryHost::new().without_toggle();
    host.insert_toggle("modeSwitch");
    let c = ThemeController::new(host, config);
    c.initialize();
    c.host().click_toggle();
    assert_eq!(c.host().attribute("data-color-mode").as_deref(), Some("dark"));
    assert_eq!(c.host().attribute(ATTR), None);
    assert_eq!(label(&c), "Toggle Light Mode");
}

// =============================================================
// Document readiness
// =============================================================

#[test]
fn initialize_waits_for_loading_document() {
    let c = ThemeController::with_defaults(MemoryHost::new().loading().with_prefers_dark(true));
    c.initialize();
    c.initialize();
    assert_eq!(c.current(), None);
    assert_eq!(c.host().pending_ready_count(), 1);

    c.host().finish_loading();
    assert_eq!(c.current(), Some(Theme::Dark));
    assert_eq!(c.host().click_listener_count(), 1);
    assert_eq!(c.host().scheme_listener_count(), 1);
}

#[test]
fn initialize_runs_immediately_when_ready_notification_fails() {
    let c = ThemeController::with_defaults(MemoryHost::new().loading().with_failing_ready().with_prefers_dark(true));
    c.initialize();
    assert_eq!(c.current(), Some(Theme::Dark));
    assert_eq!(c.host().pending_ready_count(), 0);
    assert_eq!(c.host().click_listener_count(), 1);
    assert!(c.is_started());

    c.initialize();
    assert_eq!(c.host().click_listener_count(), 1);
    c.host().click_toggle();
    assert_eq!(c.current(), Some(Theme::Light));
    assert_eq!(c.host().storage_writes(), 1);
}

// =============================================================
// Clicks
// =============================================================

#[test]
fn click_toggles_and_persists() {
    let c = start(MemoryHost::new());
    c.host().click_toggle();
    assert_eq!(c.current(), Some(Theme::Dark));
    assert_eq!(c.host().stored(KEY).as_deref(), Some("dark"));
    assert_eq!(label(&c), "Toggle Light Mode");
}

#[test]
fn repeated_initialize_never_double_binds() {
    let c = start(MemoryHost::new());
    c.initialize();
    c.initialize();
    assert_eq!(c.host().click_listener_count(), 1);

    c.host().click_toggle();
    assert_eq!(c.current(), Some(Theme::Dark));
    assert_eq!(c.host().storage_writes(), 1);
}

#[test]
fn rerendered_control_is_bound_again() {
    let c = start(MemoryHost::new());
    c.host().insert_toggle("themeToggle");
    assert_eq!(c.host().click_listener_count(), 0);

    c.initialize();
    c.initialize();
    assert_eq!(c.host().click_listener_count(), 1);
    assert!(c.host().toggle_control().is_some_and(|control| control.bound));

    c.host().click_toggle();
    assert_eq!(c.current(), Some(Theme::Dark));
    assert_eq!(c.host().storage_writes(), 1);
}

#[test]
fn clicks_work_for_the_session_without_storage() {
    let c = start(MemoryHost::new().without_storage());
    c.host().click_toggle();
    assert_eq!(c.current(), Some(Theme::Dark));
    c.host().click_toggle();
    assert_eq!(c.current(), Some(Theme::Light));
}

// =============================================================
// OS color scheme
// =============================================================

#[test]
fn os_change_followed_without_persisting_when_no_choice_stored() {
    let c = start(MemoryHost::new());
    assert_eq!(c.host().scheme_listener_count(), 1);

    c.host().set_system_dark(true);
    assert_eq!(c.current(), Some(Theme::Dark));
    assert_eq!(label(&c), "Toggle Light Mode");
    assert_eq!(c.host().storage_writes(), 0);
    assert_eq!(c.host().stored(KEY), None);

    c.host().set_system_dark(false);
    assert_eq!(c.current(), Some(Theme::Light));
}

#[test]
fn os_change_ignored_when_choice_stored() {
    let c = start(MemoryHost::new().with_stored(KEY, "light"));
    assert_eq!(c.host().scheme_listener_count(), 0);
    c.host().set_system_dark(true);
    assert_eq!(c.current(), Some(Theme::Light));
}

#[test]
fn os_change_ignored_after_user_toggles() {
    let c = start(MemoryHost::new());
    c.host().click_toggle();
    assert_eq!(c.current(), Some(Theme::Dark));

    c.host().set_system_dark(false);
    assert_eq!(c.current(), Some(Theme::Dark));
}

#[test]
fn invalid_stored_value_still_follows_os() {
    let c = start(MemoryHost::new().with_stored(KEY, "blue"));
    assert_eq!(c.host().scheme_listener_count(), 1);
    c.host().set_system_dark(true);
    assert_eq!(c.current(), Some(Theme::Dark));
    assert_eq!(c.host().stored(KEY).as_deref(), Some("blue"));
}

#[test]
fn repeated_initialize_subscribes_once() {
    let c = start(MemoryHost::new());
    c.initialize();
    assert_eq!(c.host().scheme_listener_count(), 1);
}

#[test]
fn failing_subscription_keeps_initial_theme() {
    let c = start(MemoryHost::new().with_failing_subscribe().with_prefers_dark(true));
    assert_eq!(c.current(), Some(Theme::Dark));
    assert_eq!(c.host().scheme_listener_count(), 0);
    assert_eq!(c.host().click_listener_count(), 1);
}
