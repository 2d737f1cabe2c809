/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Specialized cue generators
//!
//! Two non-material cues sit outside the material recipe set: the
//! pressure background vibration and the click transient. Both end in
//! a tanh soft clip so stacked harmonics can never hard-clip the
//! output.

use core::f32::consts::TAU;

use crate::buffer::SoundBuffer;
use crate::envelope::{
    apply_attack_linear, apply_attack_pow, apply_fade_exp, smooth_moving_average, soft_clip_tanh,
};
use crate::WaveformSynthesizer;

impl WaveformSynthesizer {
    /// Pressure-channel background vibration
    ///
    /// The requested frequency is pulled into the 80–120 Hz band where
    /// a piezo actuator produces an actual vibrotactile sensation.
    /// Fundamental + sub-harmonic + second harmonic under a slow
    /// amplitude modulation, triple-smoothed, with an exponential
    /// fade tail.
    pub fn pressure_cue(
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

        let base_hz = (freq_hz * 1.5).clamp(80.0, 120.0);
        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| {
                let body = amplitude * 0.7 * (TAU * base_hz * t).sin()
                    + amplitude * 0.2 * (TAU * base_hz * 0.8 * t).sin()
                    + amplitude * 0.1 * (TAU * base_hz * 2.0 * t).sin();
                body * (1.0 + 0.03 * (TAU * base_hz * 0.05 * t).sin())
            })
            .collect();

        // Progressive smoothing passes keep some texture while
        // removing crackle
        if n > 20 {
            for kernel in [8, 6, 4] {
                wave = smooth_moving_average(&wave, kernel);
            }
        }

        apply_attack_linear(&mut wave, self.sample_count(10.0));
        apply_fade_exp(&mut wave, self.sample_count(fade_out_ms), 1.2);
        soft_clip_tanh(&mut wave, 0.9, 0.95);
        SoundBuffer::quantize(&wave, self.sample_rate())
    }

    /// Click-channel transient
    ///
    /// Trackpad-style cue: the frequency is pulled into an 18–25 Hz
    /// sub-audible band, a fast exponential envelope shapes the body,
    /// and a square-root attack curve removes the onset tick.
    pub fn click_cue(
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

        let click_hz = (freq_hz * 0.3).clamp(18.0, 25.0);
        let duration_s = duration_ms / 1000.0;
        let mut wave: Vec<f32> = self
            .time_axis(n)
            .map(|t| {
                let body = amplitude * 0.6 * (TAU * click_hz * t).sin()
                    + amplitude * 0.1 * (TAU * click_hz * 0.5 * t).sin();
                body * (-8.0 * t / duration_s).exp()
            })
            .collect();

        if n > 10 {
            let kernel = (n / 3).min(8);
            if kernel > 2 {
                wave = smooth_moving_average(&wave, kernel);
            }
        }

        apply_attack_pow(&mut wave, self.sample_count(0.1), 0.5);
        apply_fade_exp(&mut wave, self.sample_count(fade_out_ms), 3.0);
        soft_clip_tanh(&mut wave, 0.9, 0.8);
        SoundBuffer::quantize(&wave, self.sample_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_cue_length_and_bounds() {
        let synth = WaveformSynthesizer::new(44_100);
        let buf = synth.pressure_cue(60.0, 120.0, 0.3, 20.0);
        assert_eq!(buf.len(), 5292);
        // tanh(x*0.9)*0.95 bounds the float output below 0.95
        let limit = (0.96_f32 * 32767.0) as i16;
        assert!(buf.samples().iter().all(|&s| s.abs() < limit));
    }

    #[test]
    fn test_click_cue_soft_clip_bounds_large_amplitude() {
        let synth = WaveformSynthesizer::new(44_100);
        // Reference config drives the click at amplitude 2.5; the
        // soft clip must still bound it by 0.8
        let buf = synth.click_cue(150.0, 70.0, 2.5, 5.0);
        let limit = (0.81_f32 * 32767.0) as i16;
        assert!(buf.samples().iter().all(|&s| s.abs() < limit));
    }

    #[test]
    fn test_click_cue_decays() {
        let synth = WaveformSynthesizer::new(44_100);
        let buf = synth.click_cue(150.0, 70.0, 2.5, 5.0);
        let n = buf.len();
        let head_peak = buf.samples()[..n / 4]
            .iter()
            .map(|s| s.abs() as i32)
            .max()
            .unwrap();
        let tail_peak = buf.samples()[n * 3 / 4..]
            .iter()
            .map(|s| s.abs() as i32)
            .max()
            .unwrap();
        assert!(head_peak > tail_peak * 4);
    }

    #[test]
    fn test_cues_handle_zero_duration() {
        let synth = WaveformSynthesizer::new(44_100);
        assert_eq!(synth.pressure_cue(60.0, 0.0, 0.3, 0.0).samples(), &[0]);
        assert_eq!(synth.click_cue(150.0, 0.0, 1.0, 0.0).samples(), &[0]);
    }
}
