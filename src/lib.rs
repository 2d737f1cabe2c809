// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Haptic - Spike-Driven Haptic Audio Rendering
//!
//! Turns pointer motion and button events into sound the way skin
//! turns contact into nerve impulses: three Izhikevich neurons encode
//! pressure, motion, and click transients, and their spike trains
//! trigger procedurally synthesized material timbres.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! haptic = "0.2"
//! ```
//!
//! ```no_run
//! use haptic::prelude::*;
//!
//! # fn main() -> Result<(), haptic::engine::EngineError> {
//! let config = HapticConfig::reference();
//! let mut engine = HapticEngine::new(config, NullSink)?;
//!
//! engine.select_material(2)?; // Wood
//! engine.press();
//! // call once per millisecond with the current pointer speed
//! let report = engine.tick(1500.0, 1400.0);
//! let _ = report.motion_volume;
//! # Ok(())
//! # }
//! ```
//!
//! ## Component Crates
//!
//! - **haptic-neural**: Izhikevich dynamics and the stimulus encoder
//! - **haptic-synth**: procedural waveform and cue synthesis
//! - **haptic-config**: TOML-backed, validated configuration
//! - **haptic-engine**: tick loop, spike-rate volume control, sound
//!   bank, and the [`engine::AudioSink`] output boundary
//!
//! Each member is published individually for selective use; this
//! umbrella re-exports them under one roof.
//!
//! ## License
//!
//! Apache-2.0

// Re-export neural encoding
pub use haptic_neural as neural;

// Re-export synthesis
pub use haptic_synth as synth;

// Re-export configuration
pub use haptic_config as config;

// Re-export orchestration
pub use haptic_engine as engine;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{HapticConfig, MaterialProfile};
    pub use crate::engine::{AudioSink, HapticEngine, MaterialSoundBank, NullSink, TickReport};
    pub use crate::neural::{StimulusEncoder, StimulusSample};
    pub use crate::synth::{SoundBuffer, Waveform, WaveformSynthesizer};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let config = HapticConfig::reference();
        let engine = HapticEngine::new(config, NullSink).unwrap();
        assert_eq!(engine.bank().material_count(), 7);
    }
}
