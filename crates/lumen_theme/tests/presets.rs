use lumen_theme::{
    check_compliance, ColorScheme, ColorToken, ThemeEngine, ThemePreset, TokenOverrides, WcagLevel,
};

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["dark", "dim", "high-contrast", "light"]);
}

#[test]
fn preset_ids_round_trip() {
    for preset in ThemePreset::all() {
        assert_eq!(ThemePreset::from_id(preset.id()), Some(*preset));
    }
    assert_eq!(ThemePreset::from_id("sepia"), None);
}

#[test]
fn light_and_dark_have_distinct_primary_and_scheme() {
    let engine = ThemeEngine::builder().with_builtin_themes().build().unwrap();
    let light = engine.theme("light").unwrap();
    let dark = engine.theme("dark").unwrap();

    assert_eq!(light.scheme(), ColorScheme::Light);
    assert_eq!(dark.scheme(), ColorScheme::Dark);
    assert_ne!(light.primary(), dark.primary());
}

#[test]
fn derived_presets_inherit_from_dark() {
    let engine = ThemeEngine::builder().with_builtin_themes().build().unwrap();
    let dark = engine.theme("dark").unwrap();

    for preset in [ThemePreset::HighContrast, ThemePreset::Dim] {
        let theme = engine.theme(preset.id()).unwrap();
        assert_eq!(
            theme.metadata().extends,
            vec!["dark"],
            "preset={preset:?}"
        );
        // untouched tokens come from the parent
        assert_eq!(
            theme.get_color(ColorToken::Success),
            dark.get_color(ColorToken::Success),
            "preset={preset:?}"
        );
    }
}

#[test]
fn builtin_presets_meet_aa_for_body_text() {
    let engine = ThemeEngine::builder().with_builtin_themes().build().unwrap();
    for preset in ThemePreset::all() {
        let theme = engine.theme(preset.id()).unwrap();
        let report = check_compliance(
            theme.get_color(ColorToken::TextPrimary),
            theme.get_color(ColorToken::Background),
        );
        assert!(
            report.meets(WcagLevel::Aa),
            "preset={preset:?} ratio={}",
            report.ratio
        );
    }
}

#[test]
fn high_contrast_records_an_aaa_report() {
    let engine = ThemeEngine::builder().with_builtin_themes().build().unwrap();
    let theme = engine
        .create_theme("high-contrast", &TokenOverrides::default())
        .unwrap();
    let report = theme.metadata().accessibility.as_ref().unwrap();
    assert_eq!(report.required, WcagLevel::Aaa);
    assert!(report.compliant);
}
