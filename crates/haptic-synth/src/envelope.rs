/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Envelope and shaping primitives shared by the generators
//!
//! All functions operate in place on normalized float samples.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Linear attack ramp over the first `attack_samples` samples
pub fn apply_attack_linear(wave: &mut [f32], attack_samples: usize) {
    if attack_samples == 0 || attack_samples >= wave.len() {
        return;
    }
    for (i, sample) in wave[..attack_samples].iter_mut().enumerate() {
        *sample *= i as f32 / attack_samples as f32;
    }
}

/// Power-law attack ramp (`exponent` < 1 rises fast then eases in)
pub fn apply_attack_pow(wave: &mut [f32], attack_samples: usize, exponent: f32) {
    if attack_samples == 0 || attack_samples >= wave.len() {
        return;
    }
    for (i, sample) in wave[..attack_samples].iter_mut().enumerate() {
        *sample *= (i as f32 / attack_samples as f32).powf(exponent);
    }
}

/// Linear fade from 1 to 0 over the last `fade_samples` samples
///
/// Skipped when the fade does not fit inside the buffer, matching the
/// reference generators.
pub fn apply_fade_linear(wave: &mut [f32], fade_samples: usize) {
    let n = wave.len();
    if fade_samples == 0 || n <= fade_samples {
        return;
    }
    for (i, sample) in wave[n - fade_samples..].iter_mut().enumerate() {
        *sample *= 1.0 - i as f32 / fade_samples as f32;
    }
}

/// Exponential fade `exp(-rate * x)`, x in [0, 1], over the tail
///
/// Unlike the linear fade this caps the tail at the buffer length
/// instead of skipping, so short cue buffers still decay.
pub fn apply_fade_exp(wave: &mut [f32], fade_samples: usize, rate: f32) {
    let n = wave.len();
    if fade_samples == 0 || n == 0 {
        return;
    }
    let fade = fade_samples.min(n);
    for (i, sample) in wave[n - fade..].iter_mut().enumerate() {
        let x = if fade > 1 {
            i as f32 / (fade - 1) as f32
        } else {
            1.0
        };
        *sample *= (-rate * x).exp();
    }
}

/// Whole-buffer exponential decay `exp(-k * t / duration)`
pub fn apply_decay_exp(wave: &mut [f32], k: f32) {
    let n = wave.len();
    if n == 0 {
        return;
    }
    for (i, sample) in wave.iter_mut().enumerate() {
        *sample *= (-k * i as f32 / n as f32).exp();
    }
}

/// Centered moving-average smoothing (boxcar convolution, same length)
pub fn smooth_moving_average(wave: &[f32], kernel: usize) -> Vec<f32> {
    let n = wave.len();
    if kernel <= 1 || n == 0 {
        return wave.to_vec();
    }
    let half = kernel / 2;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(n);
        let sum: f32 = wave[start..end].iter().sum();
        out.push(sum / (end - start) as f32);
    }
    out
}

/// One-pole low-pass filter: `y[i] = new_w * x[i] + old_w * y[i-1]`
pub fn one_pole_lowpass(wave: &mut [f32], new_weight: f32, old_weight: f32) {
    for i in 1..wave.len() {
        wave[i] = new_weight * wave[i] + old_weight * wave[i - 1];
    }
}

/// Hyperbolic-tangent soft clip: `tanh(x * drive) * post_gain`
///
/// Bounds the output without the corner distortion of a hard clip.
pub fn soft_clip_tanh(wave: &mut [f32], drive: f32, post_gain: f32) {
    for sample in wave.iter_mut() {
        *sample = (*sample * drive).tanh() * post_gain;
    }
}

/// Deterministic standard-normal noise, scaled by `amp`
///
/// The seed is derived from generator parameters so the same key
/// always synthesizes the same buffer.
pub fn gaussian_noise(n: usize, amp: f32, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0_f32, 1.0).expect("unit normal is always valid");
    (0..n).map(|_| amp * normal.sample(&mut rng)).collect()
}
