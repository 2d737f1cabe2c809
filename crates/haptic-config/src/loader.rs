/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Configuration loading
//!
//! TOML file/string entry points. Both run full validation before
//! returning, so a successfully loaded config is always usable.

use std::path::Path;

use crate::validation::validate_config;
use crate::{ConfigResult, HapticConfig};

impl HapticConfig {
    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate a TOML string
    ///
    /// Omitted sections take their reference defaults; an omitted
    /// `materials` list takes the default seven-material set.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let mut config: HapticConfig = toml::from_str(text)?;
        if config.materials.is_empty() {
            config.materials = crate::MaterialProfile::default_set();
        }
        validate_config(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haptic_synth::Waveform;

    #[test]
    fn test_empty_toml_yields_reference_defaults() {
        let config = HapticConfig::from_toml_str("").unwrap();
        assert_eq!(config.simulation.dt_ms, 1.0);
        assert_eq!(config.materials.len(), 7);
        assert_eq!(config.volume.window_ms, 25.0);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = HapticConfig::from_toml_str(
            r#"
            [volume]
            window_ms = 40.0
            "#,
        )
        .unwrap();
        assert_eq!(config.volume.window_ms, 40.0);
        assert_eq!(config.volume.max_rate_hz, 120.0);
        assert_eq!(config.sound.click_hz, 150.0);
    }

    #[test]
    fn test_material_list_override() {
        let config = HapticConfig::from_toml_str(
            r#"
            [[materials]]
            name = "Felt"
            roughness = 0.1
            freq_factor = 0.5
            waveform = { type = "fabric", softness = 2.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.materials.len(), 1);
        assert_eq!(
            config.materials[0].waveform,
            Waveform::Fabric { softness: 2.0 }
        );
    }

    #[test]
    fn test_material_without_waveform_falls_back_to_sine() {
        let config = HapticConfig::from_toml_str(
            r#"
            [[materials]]
            name = "Unknown"
            roughness = 1.0
            freq_factor = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(config.materials[0].waveform, Waveform::Sine);
    }

    #[test]
    fn test_invalid_value_fails_fast() {
        let result = HapticConfig::from_toml_str(
            r#"
            [simulation]
            dt_ms = -1.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = HapticConfig::from_toml_str("simulation = nonsense");
        assert!(matches!(result, Err(crate::ConfigError::Parse(_))));
    }
}
