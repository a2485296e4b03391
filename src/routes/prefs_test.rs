use super::*;
use crate::state::test_helpers;

#[tokio::test]
async fn get_defaults_to_system() {
    let state = test_helpers::test_app_state();

    let Json(light) = get_theme(State(state.clone()), Query(ThemeQuery { prefers_dark: false })).await;
    assert_eq!(light, ThemeResponse { theme: Theme::System, resolved: ResolvedTheme::Light });

    let Json(dark) = get_theme(State(state), Query(ThemeQuery { prefers_dark: true })).await;
    assert_eq!(dark.resolved, ResolvedTheme::Dark);
}

#[tokio::test]
async fn put_stores_theme() {
    let state = test_helpers::test_app_state();

    let Json(resp) = put_theme(
        State(state.clone()),
        Query(ThemeQuery { prefers_dark: true }),
        Ok(Json(ThemeUpdate { theme: Theme::Light })),
    )
    .await
    .unwrap();
    assert_eq!(resp, ThemeResponse { theme: Theme::Light, resolved: ResolvedTheme::Light });

    let Json(after) = get_theme(State(state), Query(ThemeQuery::default())).await;
    assert_eq!(after.theme, Theme::Light);
}

#[tokio::test]
async fn reset_returns_to_system() {
    let state = test_helpers::test_app_state();
    theme::save_theme(&state.prefs, Theme::Dark).unwrap();

    let Json(resp) = reset_theme(State(state.clone()), Query(ThemeQuery { prefers_dark: true })).await;
    assert_eq!(resp, ThemeResponse { theme: Theme::System, resolved: ResolvedTheme::Dark });
    assert_eq!(theme::load_theme(&state.prefs), Theme::System);
}

#[test]
fn update_body_rejects_unknown_theme() {
    assert!(serde_json::from_str::<ThemeUpdate>(r#"{"theme":"dark"}"#).is_ok());
    assert!(serde_json::from_str::<ThemeUpdate>(r#"{"theme":"Dark"}"#).is_ok());
    assert!(serde_json::from_str::<ThemeUpdate>(r#"{"theme":"sepia"}"#).is_err());
}

#[test]
fn response_serializes_lowercase() {
    let body = serde_json::to_value(ThemeResponse { theme: Theme::System, resolved: ResolvedTheme::Dark }).unwrap();
    assert_eq!(body, serde_json::json!({ "theme": "system", "resolved": "dark" }));
}
