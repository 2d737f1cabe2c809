/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Material timbre generators
//!
//! Each recipe composes a fundamental sinusoid with a small
//! material-specific set of harmonics, noise and modulation terms,
//! then applies an attack ramp and a fade/decay. A single shape
//! parameter per material stands in for its acoustic signature, which
//! keeps synthesis deterministic and cacheable by key.

use core::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::buffer::SoundBuffer;
use crate::envelope::{
    apply_attack_linear, apply_decay_exp, apply_fade_linear, gaussian_noise, one_pole_lowpass,
    smooth_moving_average,
};
use crate::WaveformSynthesizer;

/// Waveform recipe selector, carrying the per-material shape parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Waveform {
    /// Plain sinusoid; also the fallback for unrecognized profiles
    Sine,
    Glass { brightness: f32 },
    Metal { resonance: f32 },
    Wood { warmth: f32 },
    Plastic { hardness: f32 },
    Fabric { softness: f32 },
    Ceramic { brittleness: f32 },
    Rubber { elasticity: f32 },
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Sine
    }
}

/// Stable per-recipe noise seed so equal cache keys produce
/// bit-identical buffers
fn noise_seed(tag: u64, freq_hz: f32, duration_ms: f32) -> u64 {
    (freq_hz.to_bits() as u64) << 32 ^ (duration_ms.to_bits() as u64) << 8 ^ tag
}

impl WaveformSynthesizer {
    /// Render one material recipe
    ///
    /// `Waveform::Sine` (and thereby any profile that fell back to it)
    /// degrades to the generic tone rather than failing.
    pub fn material(
        &self,
        waveform: Waveform,
        freq_hz: f32,
        duration_ms: f32,
        amplitude: f32,
        fade_out_ms: f32,
    ) -> SoundBuffer {
        match waveform {
            Waveform::Sine => self.tone(freq_hz, duration_ms, amplitude, fade_out_ms),
            Waveform::Glass { brightness } => {
                self.glass(freq_hz, duration_ms, amplitude, fade_out_ms, brightness)
            }
            Waveform::Metal { resonance } => {
                self.metal(freq_hz, duration_ms, amplitude, fade_out_ms, resonance)
            }
            Waveform::Wood { warmth } => {
                self.wood(freq_hz, duration_ms, amplitude, fade_out_ms, warmth)
            }
            Waveform::Plastic { hardness } => {
                self.plastic(freq_hz, duration_ms, amplitude, fade_out_ms, hardness)
            }
            Waveform::Fabric { softness } => {
                self.fabric(freq_hz, duration_ms, amplitude, fade_out_ms, softness)
            }
            Waveform::Ceramic { brittleness } => {
                self.ceramic(freq_hz, duration_ms, amplitude, fade_out_ms, brittleness)
            }
            Waveform::Rubber { elasticity } => {
                self.rubber(freq_hz, duration_ms, amplitude, fade_out_ms, elasticity)
            }
        }
    }

    /// Glass: bright, clean, harmonic-rich; fast attack, long sustain
    fn glass(
        &self,
        freq_hz: f32,
        duration_ms: f32,
        amp: f32,
        fade_out_ms: f32,
        brightness: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| {
                amp * 0.9 * (TAU * freq_hz * t).sin()
                    + amp * 0.15 * brightness * 0.3 * (TAU * freq_hz * 2.0 * t).sin()
                    + amp * 0.05 * brightness * 0.2 * (TAU * freq_hz * 3.0 * t).sin()
            })
            .collect();

        // Barely-there air noise, heavily smoothed to avoid crackle
        let noise = smooth_moving_average(
            &gaussian_noise(n, amp * 0.002, noise_seed(1, freq_hz, duration_ms)),
            50,
        );
        for (sample, nz) in wave.iter_mut().zip(&noise) {
            *sample += nz;
        }

        apply_attack_linear(&mut wave, self.sample_count(1.0));
        apply_fade_linear(&mut wave, self.sample_count(fade_out_ms));
        SoundBuffer::quantize(&wave, self.sample_rate())
    }

    /// Metal: strong harmonics with a slow ring modulation and a long
    /// release tail
    fn metal(
        &self,
        freq_hz: f32,
        duration_ms: f32,
        amp: f32,
        fade_out_ms: f32,
        resonance: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let ring_hz = freq_hz * 0.05;
        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| {
                let harmonics = amp * 0.6 * (TAU * freq_hz * t).sin()
                    + amp * 0.3 * resonance * 0.6 * (TAU * freq_hz * 2.0 * t).sin()
                    + amp * 0.2 * resonance * 0.6 * (TAU * freq_hz * 3.0 * t).sin();
                harmonics * (1.0 + 0.15 * (TAU * ring_hz * t).sin())
            })
            .collect();

        let noise = gaussian_noise(n, amp * 0.01, noise_seed(2, freq_hz, duration_ms));
        for (sample, nz) in wave.iter_mut().zip(&noise) {
            *sample += nz;
        }

        apply_attack_linear(&mut wave, self.sample_count(5.0));
        // Metal rings out: fade at least 30% of the buffer
        let fade = self.sample_count(fade_out_ms).max(n * 3 / 10);
        apply_fade_linear(&mut wave, fade);
        SoundBuffer::quantize(&wave, self.sample_rate())
    }

    /// Wood: warm harmonics, sub-harmonic body, low-passed texture
    fn wood(
        &self,
        freq_hz: f32,
        duration_ms: f32,
        amp: f32,
        fade_out_ms: f32,
        warmth: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| {
                amp * 0.8 * (TAU * freq_hz * t).sin()
                    + amp * 0.3 * warmth * (TAU * freq_hz * 2.0 * t).sin()
                    + amp * 0.2 * warmth * (TAU * freq_hz * 3.0 * t).sin()
                    + amp * 0.1 * warmth * (TAU * freq_hz * 0.5 * t).sin()
            })
            .collect();

        let mut texture = gaussian_noise(n, amp * 0.02, noise_seed(3, freq_hz, duration_ms));
        one_pole_lowpass(&mut texture, 0.7, 0.3);
        for (sample, nz) in wave.iter_mut().zip(&texture) {
            *sample += nz;
        }

        apply_attack_linear(&mut wave, self.sample_count(3.0));
        apply_fade_linear(&mut wave, self.sample_count(fade_out_ms));
        SoundBuffer::quantize(&wave, self.sample_rate())
    }

    /// Plastic: artificial tone with a faint square component and a
    /// fast decay
    fn plastic(
        &self,
        freq_hz: f32,
        duration_ms: f32,
        amp: f32,
        fade_out_ms: f32,
        hardness: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| {
                let s = (TAU * freq_hz * t).sin();
                amp * 0.8 * s
                    + amp * 0.2 * hardness * 0.7 * (TAU * freq_hz * 2.0 * t).sin()
                    + amp * 0.03 * s.signum()
            })
            .collect();

        apply_decay_exp(&mut wave, 3.0);
        apply_attack_linear(&mut wave, self.sample_count(1.0));
        apply_fade_linear(&mut wave, self.sample_count(fade_out_ms));
        SoundBuffer::quantize(&wave, self.sample_rate())
    }

    /// Fabric: friction noise over a soft fundamental, slow attack
    fn fabric(
        &self,
        freq_hz: f32,
        duration_ms: f32,
        amp: f32,
        fade_out_ms: f32,
        softness: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| amp * 0.6 * (TAU * freq_hz * t).sin())
            .collect();

        let mut friction =
            gaussian_noise(n, amp * 0.3 * softness, noise_seed(5, freq_hz, duration_ms));
        one_pole_lowpass(&mut friction, 0.3, 0.7);
        for (sample, nz) in wave.iter_mut().zip(&friction) {
            *sample += nz;
        }

        apply_attack_linear(&mut wave, self.sample_count(10.0));
        apply_fade_linear(&mut wave, self.sample_count(fade_out_ms));
        SoundBuffer::quantize(&wave, self.sample_rate())
    }

    /// Ceramic: like glass but duller, with a fourth harmonic instead
    /// of air noise
    fn ceramic(
        &self,
        freq_hz: f32,
        duration_ms: f32,
        amp: f32,
        fade_out_ms: f32,
        brittleness: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| {
                amp * 0.7 * (TAU * freq_hz * t).sin()
                    + amp * 0.3 * brittleness * (TAU * freq_hz * 2.0 * t).sin()
                    + amp * 0.2 * brittleness * (TAU * freq_hz * 3.0 * t).sin()
                    + amp * 0.1 * brittleness * (TAU * freq_hz * 4.0 * t).sin()
            })
            .collect();

        apply_attack_linear(&mut wave, self.sample_count(2.0));
        apply_fade_linear(&mut wave, self.sample_count(fade_out_ms));
        SoundBuffer::quantize(&wave, self.sample_rate())
    }

    /// Rubber: detuned-low fundamental with a slow elastic amplitude
    /// modulation and soft decay
    fn rubber(
        &self,
        freq_hz: f32,
        duration_ms: f32,
        amp: f32,
        fade_out_ms: f32,
        elasticity: f32,
    ) -> SoundBuffer {
        let n = self.sample_count(duration_ms);
        if n == 0 {
            return SoundBuffer::silent(self.sample_rate());
        }

        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| {
                let body = amp * 0.8 * (TAU * freq_hz * 0.8 * t).sin()
                    + amp * 0.2 * elasticity * (TAU * freq_hz * 1.6 * t).sin();
                body * (1.0 + 0.2 * (TAU * freq_hz * 0.1 * t).sin())
            })
            .collect();

        apply_attack_linear(&mut wave, self.sample_count(5.0));
        apply_decay_exp(&mut wave, 2.0);
        apply_fade_linear(&mut wave, self.sample_count(fade_out_ms));
        SoundBuffer::quantize(&wave, self.sample_rate())
    }
}
