use super::*;

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_both_literals() {
    assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
    assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
}

#[test]
fn rejects_foreign_values() {
    assert_eq!("blue".parse::<Theme>(), Err(ParseThemeError("blue".to_owned())));
    assert!("".parse::<Theme>().is_err());
    assert!("Dark".parse::<Theme>().is_err());
    assert!(" dark".parse::<Theme>().is_err());
}

#[test]
fn parse_error_names_the_value() {
    let err = "true".parse::<Theme>().unwrap_err();
    assert_eq!(err.to_string(), "unknown theme value: \"true\"");
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn default_is_light() {
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn opposite_is_an_involution() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_ne!(theme.opposite(), theme);
        assert_eq!(theme.opposite().opposite(), theme);
    }
}

#[test]
fn display_matches_as_str() {
    assert_eq!(Theme::Dark.to_string(), "dark");
    assert_eq!(Theme::Light.to_string(), Theme::Light.as_str());
}

#[test]
fn prefers_dark_maps_to_dark() {
    assert_eq!(Theme::from_prefers_dark(true), Theme::Dark);
    assert_eq!(Theme::from_prefers_dark(false), Theme::Light);
    assert!(Theme::Dark.is_dark());
    assert!(!Theme::Light.is_dark());
}

#[test]
fn serde_uses_lowercase_literals() {
    assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    let parsed: Theme = serde_json::from_str("\"light\"").unwrap();
    assert_eq!(parsed, Theme::Light);
}
