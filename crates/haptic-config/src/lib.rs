// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Haptic Engine Configuration
//!
//! Typed, TOML-backed configuration for the haptic audio engine.
//!
//! Every tunable (clip ranges, sustain durations, rate/volume
//! breakpoints) is a field on an immutable struct resolved once at
//! construction; nothing reads configuration per tick.
//!
//! Loading is fail-fast: [`HapticConfig::load`] and
//! [`HapticConfig::from_toml_str`] run full validation and refuse to
//! silently default an invalid value.

pub mod loader;
pub mod types;
pub mod validation;

pub use types::{
    HapticConfig, InputConfig, MaterialProfile, NeuronsConfig, SimulationConfig, SoundConfig,
    VolumeConfig,
};
pub use validation::{validate_config, ConfigValidationError};

/// Errors produced while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
