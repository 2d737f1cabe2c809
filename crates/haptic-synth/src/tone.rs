/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Generic tone generators
//!
//! The plain sinusoid is both the baseline cue and the fallback for
//! unknown waveform kinds.

use core::f32::consts::TAU;

use crate::buffer::SoundBuffer;
use crate::envelope::apply_fade_linear;
use crate::WaveformSynthesizer;

impl WaveformSynthesizer {
    /// Single sinusoid at `freq_hz`, scaled by `amplitude`, linear
    /// fade-out over the last `fade_out_ms`
    pub fn tone(
        &self,
        freq_hz: f32,
        duration_ms: f32,
        amplitude: f32,
        fade_out_ms: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| amplitude * (TAU * freq_hz * t).sin())
            .collect();

        apply_fade_linear(&mut wave, self.sample_count(fade_out_ms));
        SoundBuffer::quantize(&wave, self.sample_rate())
    }

    /// Linear frequency sweep from `start_hz` to `end_hz`
    ///
    /// The phase is the running integral of the instantaneous
    /// frequency, so the sweep is click-free.
    pub fn sweep(
        &self,
        start_hz: f32,
        end_hz: f32,
        duration_ms: f32,
        amplitude: f32,
        fade_out_ms: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let rate = self.sample_rate() as f32;
        let mut phase = 0.0_f32;
        let mut wave = Vec::with_capacity(n);
        for i in 0..n {
            let frac = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            let inst_hz = start_hz + (end_hz - start_hz) * frac;
            phase += TAU * inst_hz / rate;
            wave.push(amplitude * phase.sin());
        }

        apply_fade_linear(&mut wave, self.sample_count(fade_out_ms));
        SoundBuffer::quantize(&wave, self.sample_rate())
    }
}
