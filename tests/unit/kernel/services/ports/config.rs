use super::*;

#[test]
fn test_default_config() {
    let config = SuggestConfig::default();
    assert!(config.quick_suggestions);
    assert_eq!(config.quick_suggestions_delay, 10);
    assert!(config.suggest_on_trigger_characters);
    assert_eq!(config.snippet_suggestions, SnippetMode::Inline);
}

#[test]
fn test_delay_is_clamped() {
    let mut config = SuggestConfig {
        quick_suggestions_delay: 3,
        ..SuggestConfig::default()
    };
    assert_eq!(config.quick_suggestions_delay(), Some(Duration::from_millis(10)));

    config.quick_suggestions_delay = 250;
    assert_eq!(config.quick_suggestions_delay(), Some(Duration::from_millis(250)));
}

#[test]
fn test_negative_delay_or_flag_disables() {
    let config = SuggestConfig {
        quick_suggestions_delay: -1,
        ..SuggestConfig::default()
    };
    assert_eq!(config.quick_suggestions_delay(), None);

    let config = SuggestConfig {
        quick_suggestions: false,
        ..SuggestConfig::default()
    };
    assert_eq!(config.quick_suggestions_delay(), None);
}

#[test]
fn test_settings_json_aliases() {
    let data = r#"{
      "editor": {
        "quickSuggestions": false,
        "quickSuggestionsDelay": 120,
        "suggestOnTriggerCharacters": false,
        "snippetSuggestions": "top"
      }
    }"#;

    let config = SuggestConfig::from_settings_json(data).expect("parse settings");
    assert!(!config.quick_suggestions);
    assert_eq!(config.quick_suggestions_delay, 120);
    assert!(!config.suggest_on_trigger_characters);
    assert_eq!(config.snippet_suggestions, SnippetMode::Top);
}

#[test]
fn test_settings_json_snake_case_and_defaults() {
    let config =
        SuggestConfig::from_settings_json(r#"{ "editor": { "quick_suggestions_delay": 40 } }"#)
            .expect("parse settings");
    assert_eq!(config.quick_suggestions_delay, 40);
    assert!(config.quick_suggestions);

    let config = SuggestConfig::from_settings_json("{}").expect("parse empty settings");
    assert_eq!(config, SuggestConfig::default());
}

#[test]
fn test_settings_json_rejects_bad_snippet_mode() {
    let err = SuggestConfig::from_settings_json(r#"{ "editor": { "snippetSuggestions": "sideways" } }"#);
    assert!(err.is_err());
}
