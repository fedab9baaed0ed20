use std::path::Path;

use crate::kernel::services::ports::SuggestConfig;

/// Loads suggest settings from a settings file, falling back to defaults.
pub fn load_suggest_config(path: &Path) -> SuggestConfig {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings file unreadable, using defaults");
            return SuggestConfig::default();
        }
    };
    match SuggestConfig::from_settings_json(&data) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid settings, using defaults");
            SuggestConfig::default()
        }
    }
}
