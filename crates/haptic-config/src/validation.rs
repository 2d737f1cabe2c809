/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Configuration validation
//!
//! Ensures values are consistent and within valid ranges before any
//! component is constructed. All problems are collected and reported
//! together rather than one at a time.

use crate::{ConfigError, ConfigResult, HapticConfig};

/// Audible ceiling; synthesis above Nyquist of common rates is a
/// config mistake, not a creative choice
const MAX_AUDIO_HZ: f32 = 22_050.0;

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidValue { field: String, reason: String },
    OutOfAudioRange { field: String, freq_hz: f32 },
    EmptyMaterials,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::OutOfAudioRange { field, freq_hz } => {
                write!(
                    f,
                    "{} = {} Hz is outside the valid audio range (0, {})",
                    field, freq_hz, MAX_AUDIO_HZ
                )
            }
            Self::EmptyMaterials => {
                write!(f, "at least one material profile is required")
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks timing, neuron parameters, frequencies, volume bounds, rate
/// breakpoints, smoothing factors, and every material profile.
///
/// # Errors
///
/// Returns `ConfigError::Validation` listing every problem found.
pub fn validate_config(config: &HapticConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_simulation(config, &mut errors);
    validate_neurons(config, &mut errors);
    validate_sound(config, &mut errors);
    validate_volume(config, &mut errors);
    validate_materials(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::Validation(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn invalid(errors: &mut Vec<ConfigValidationError>, field: &str, reason: &str) {
    errors.push(ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    });
}

fn validate_simulation(config: &HapticConfig, errors: &mut Vec<ConfigValidationError>) {
    let sim = &config.simulation;
    if !(sim.dt_ms > 0.0) || !sim.dt_ms.is_finite() {
        invalid(errors, "simulation.dt_ms", "must be positive and finite");
    }
    if sim.sample_rate == 0 {
        invalid(errors, "simulation.sample_rate", "must be positive");
    }
}

fn validate_neurons(config: &HapticConfig, errors: &mut Vec<ConfigValidationError>) {
    for (channel, params) in [
        ("pressure", &config.neurons.pressure),
        ("motion", &config.neurons.motion),
        ("click", &config.neurons.click),
    ] {
        if let Err(e) = params.validate() {
            invalid(errors, &format!("neurons.{}", channel), &e.to_string());
        }
    }
}

fn validate_sound(config: &HapticConfig, errors: &mut Vec<ConfigValidationError>) {
    let sound = &config.sound;
    for (field, freq_hz) in [
        ("sound.pressure_hz", sound.pressure_hz),
        ("sound.motion_base_hz", sound.motion_base_hz),
        ("sound.click_hz", sound.click_hz),
    ] {
        if !(freq_hz > 0.0 && freq_hz < MAX_AUDIO_HZ) {
            errors.push(ConfigValidationError::OutOfAudioRange {
                field: field.to_string(),
                freq_hz,
            });
        }
    }

    for (field, ms) in [
        ("sound.pressure_ms", sound.pressure_ms),
        ("sound.motion_loop_ms", sound.motion_loop_ms),
        ("sound.click_ms", sound.click_ms),
    ] {
        if !(ms > 0.0) || !ms.is_finite() {
            invalid(errors, field, "must be positive and finite");
        }
    }

    for (field, volume) in [
        ("sound.pressure_volume", sound.pressure_volume),
        ("sound.click_volume", sound.click_volume),
    ] {
        if !(0.0..=1.0).contains(&volume) {
            invalid(errors, field, "must be within [0, 1]");
        }
    }
}

fn validate_volume(config: &HapticConfig, errors: &mut Vec<ConfigValidationError>) {
    let v = &config.volume;
    if !(v.window_ms > 0.0) || !v.window_ms.is_finite() {
        invalid(errors, "volume.window_ms", "must be positive and finite");
    }
    if v.update_interval_ticks == 0 {
        invalid(errors, "volume.update_interval_ticks", "must be positive");
    }
    if !(v.min_rate_hz > 0.0) || v.max_rate_hz <= v.min_rate_hz {
        invalid(
            errors,
            "volume.min_rate_hz/max_rate_hz",
            "breakpoints must satisfy 0 < min < max",
        );
    }
    if !(0.0..=1.0).contains(&v.min_volume)
        || !(0.0..=1.0).contains(&v.max_volume)
        || v.min_volume > v.max_volume
    {
        invalid(
            errors,
            "volume.min_volume/max_volume",
            "must satisfy 0 <= min <= max <= 1",
        );
    }
    for (field, factor) in [
        ("volume.attack_factor", v.attack_factor),
        ("volume.decay_factor", v.decay_factor),
    ] {
        if !(factor > 0.0 && factor <= 1.0) {
            invalid(errors, field, "must be within (0, 1]");
        }
    }
    if !(v.snap_epsilon >= 0.0) || !v.snap_epsilon.is_finite() {
        invalid(errors, "volume.snap_epsilon", "must be non-negative");
    }
}

fn validate_materials(config: &HapticConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.materials.is_empty() {
        errors.push(ConfigValidationError::EmptyMaterials);
        return;
    }
    for (i, profile) in config.materials.iter().enumerate() {
        if profile.name.is_empty() {
            invalid(errors, &format!("materials[{}].name", i), "must not be empty");
        }
        if !(profile.roughness > 0.0) || !profile.roughness.is_finite() {
            invalid(
                errors,
                &format!("materials[{}].roughness", i),
                "must be positive and finite",
            );
        }
        if !(profile.freq_factor > 0.0) || !profile.freq_factor.is_finite() {
            invalid(
                errors,
                &format!("materials[{}].freq_factor", i),
                "must be positive and finite",
            );
        }
    }
}
