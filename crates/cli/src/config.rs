//! Builds the `DeckConfig` a `render` run shades from.
//!
//! Layers, lowest first: defaults, the `--config` file, then individual
//! flags and the `--params` object.

use crate::error::CliError;
use shaderdeck_core::params::merge_extras;
use shaderdeck_core::DeckConfig;
use std::fs;
use std::path::Path;

/// Flag values that override the config file when present.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub preset: Option<&'a str>,
    pub noise_factor: Option<f32>,
    pub time_speed: Option<f32>,
    pub params: Option<&'a str>,
}

/// Reads a `DeckConfig` document, or the defaults when `path` is `None`.
pub fn load(path: Option<&Path>) -> Result<DeckConfig, CliError> {
    let Some(path) = path else {
        return Ok(DeckConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|e| CliError::unreadable(path, e))?;
    let config = DeckConfig::from_json(&text)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Applies `overrides` on top of `config`.
///
/// `--params` extras are matched against the final preset, so foreign
/// keys are ignored.
pub fn apply(config: &mut DeckConfig, overrides: &Overrides<'_>) -> Result<(), CliError> {
    if let Some(preset) = overrides.preset {
        config.preset = preset.to_string();
    }
    if let Some(value) = overrides.noise_factor {
        config.noise_factor = value;
    }
    if let Some(value) = overrides.time_speed {
        config.time_speed = value;
    }
    if let Some(params) = overrides.params {
        let params: serde_json::Value = serde_json::from_str(params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        if !params.is_object() {
            return Err(CliError::Input("--params must be a JSON object".into()));
        }
        let preset = config.validate()?;
        merge_extras(&mut config.extras, preset, &params);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(load(None).unwrap(), DeckConfig::default());
    }

    #[test]
    fn config_file_is_read() {
        let file = write_config(r#"{"preset": "fire", "extras": {"fireIntensity": 3}}"#);
        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.preset, "fire");
        assert_eq!(config.extras.get("fireIntensity"), Some(&3.0));
    }

    #[test]
    fn malformed_config_file_exits_12() {
        let file = write_config("{ preset: fire");
        let err = load(Some(file.path())).unwrap_err();
        assert_eq!(err.exit_code(), 12, "{err}");
    }

    #[test]
    fn missing_config_file_exits_11() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert_eq!(err.exit_code(), 11, "{err}");
    }

    #[test]
    fn flags_override_the_file() {
        let file = write_config(r#"{"preset": "swirl", "noiseFactor": 2, "extras": {"swirlStrength": 9}}"#);
        let mut config = load(Some(file.path())).unwrap();
        let overrides = Overrides {
            noise_factor: Some(7.5),
            params: Some(r#"{"swirlStrength": 3, "fireIntensity": 2}"#),
            ..Overrides::default()
        };
        apply(&mut config, &overrides).unwrap();
        assert_eq!(config.noise_factor, 7.5);
        assert_eq!(config.extras.get("swirlStrength"), Some(&3.0));
        assert!(!config.extras.contains_key("fireIntensity"));
    }

    #[test]
    fn params_for_unknown_preset_exit_10() {
        let mut config = DeckConfig::default();
        let overrides = Overrides {
            preset: Some("plasma"),
            params: Some("{}"),
            ..Overrides::default()
        };
        assert_eq!(apply(&mut config, &overrides).unwrap_err().exit_code(), 10);
    }

    #[test]
    fn non_object_params_exit_12() {
        let mut config = DeckConfig::default();
        let overrides = Overrides {
            params: Some("[1, 2]"),
            ..Overrides::default()
        };
        assert_eq!(apply(&mut config, &overrides).unwrap_err().exit_code(), 12);
    }
}
