// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Haptic Waveform Synthesis
//!
//! Pure, side-effect-free buffer generators. Every generator follows
//! the same shape:
//!
//! ```text
//! (freq_hz, duration_ms, amplitude, fade_out_ms) -> int16 sample buffer
//! ```
//!
//! - **tone**: generic sinusoid + frequency sweep
//! - **materials**: seven material timbres (glass, metal, wood,
//!   plastic, fabric, ceramic, rubber)
//! - **cues**: tanh-clipped pressure background and click cues
//!
//! Noise terms use a per-buffer seeded RNG, so for a given parameter
//! set the output is deterministic and cacheable by key.

pub mod buffer;
pub mod cues;
pub mod envelope;
pub mod materials;
pub mod tone;

pub use buffer::SoundBuffer;
pub use materials::Waveform;

/// Default audio sample rate (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Procedural waveform synthesizer bound to a fixed sample rate
///
/// All generators are pure: same parameters, same buffer.
#[derive(Debug, Clone, Copy)]
pub struct WaveformSynthesizer {
    sample_rate: u32,
}

impl WaveformSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples for a duration, never negative
    ///
    /// `round(sample_rate * duration_ms / 1000)`; generators substitute
    /// a single silent sample when this rounds to zero.
    pub(crate) fn sample_count(&self, duration_ms: f32) -> usize {
        (self.sample_rate as f32 * (duration_ms / 1000.0)).round().max(0.0) as usize
    }

    /// Time axis in seconds: `t[i] = i / sample_rate`
    pub(crate) fn time_axis(&self, n: usize) -> impl Iterator<Item = f32> + '_ {
        let rate = self.sample_rate as f32;
        (0..n).map(move |i| i as f32 / rate)
    }
}

impl Default for WaveformSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}
