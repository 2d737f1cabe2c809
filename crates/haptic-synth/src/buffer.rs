/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! PCM sample buffer
//!
//! Immutable after creation; shared by reference across plays.

/// Ordered sequence of signed 16-bit samples at a fixed sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SoundBuffer {
    /// Quantize normalized float samples to int16
    ///
    /// Values are clamped to [-1, 1] before `round(x * 32767)`, so no
    /// sample can exceed int16 bounds. A zero-length input degenerates
    /// to a single silent sample — never an empty buffer, which some
    /// mixers reject.
    pub fn quantize(wave: &[f32], sample_rate: u32) -> Self {
        if wave.is_empty() {
            return Self::silent(sample_rate);
        }
        let samples = wave
            .iter()
            .map(|&x| (x.clamp(-1.0, 1.0) * 32767.0).round() as i16)
            .collect();
        Self {
            samples,
            sample_rate,
        }
    }

    /// Single-sample silent buffer
    pub fn silent(sample_rate: u32) -> Self {
        Self {
            samples: vec![0],
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Buffer duration in milliseconds
    pub fn duration_ms(&self) -> f32 {
        self.samples.len() as f32 * 1000.0 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_clamps_to_int16_bounds() {
        let buf = SoundBuffer::quantize(&[2.0, -2.0, 1.0, -1.0, 0.0], 44_100);
        assert_eq!(buf.samples(), &[32767, -32767, 32767, -32767, 0]);
    }

    #[test]
    fn test_empty_input_degenerates_to_one_silent_sample() {
        let buf = SoundBuffer::quantize(&[], 44_100);
        assert_eq!(buf.samples(), &[0]);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_duration() {
        let buf = SoundBuffer::quantize(&vec![0.0; 4410], 44_100);
        assert!((buf.duration_ms() - 100.0).abs() < 1e-3);
    }
}
