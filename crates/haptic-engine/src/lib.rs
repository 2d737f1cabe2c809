// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Haptic Engine
//!
//! Single-rate, single-threaded control loop turning pointer motion
//! and button events into audio playback requests:
//!
//! ```text
//! pointer state → StimulusEncoder → spike flags
//!     pressure/click spike → one-shot play()
//!     motion spike train  → SpikeRateVolumeController → set_volume()
//! ```
//!
//! One external timer calls [`HapticEngine::tick`] at a fixed period
//! (reference: 1 ms). Nothing in the tick path blocks, allocates, or
//! spawns work; all sound buffers are synthesized eagerly at startup
//! and on material warm-up so steady-state latency stays bounded.
//!
//! The audio device itself sits behind the [`AudioSink`] trait; this
//! crate only decides *which* sounds to trigger and at what loudness.

pub mod bank;
pub mod engine;
pub mod logging;
pub mod sink;
pub mod volume;

pub use bank::{ChannelRole, MaterialSoundBank, SoundKey};
pub use engine::{HapticEngine, TickReport, CHANNEL_CLICK, CHANNEL_MOTION, CHANNEL_PRESSURE};
pub use logging::init_logging;
pub use sink::{AudioSink, NullSink};
pub use volume::SpikeRateVolumeController;

/// Errors produced while constructing or reconfiguring the engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] haptic_config::ConfigError),

    #[error(transparent)]
    Neural(#[from] haptic_neural::NeuralError),

    #[error("unknown material index {index} (only {count} materials configured)")]
    UnknownMaterial { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
