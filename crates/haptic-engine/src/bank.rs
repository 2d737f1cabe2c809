/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Material sound bank
//!
//! Caches synthesized buffers keyed by (role, material, frequency) so
//! that selecting a material the pointer has visited before never
//! re-renders audio. Buffers are shared out as `Arc`s; the bank keeps
//! one copy regardless of how many channels reference it.

use std::sync::Arc;

use ahash::AHashMap;
use tracing::debug;

use haptic_config::{MaterialProfile, SoundConfig};
use haptic_synth::{SoundBuffer, WaveformSynthesizer};

/// Which playback slot a cached buffer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    /// One-shot vibrotactile background, triggered per pressure spike
    Pressure,
    /// One-shot transient, triggered per click spike
    Click,
    /// Continuous loop whose volume tracks the motion spike rate
    MotionLoop,
}

/// Cache key for a synthesized buffer
///
/// Frequency is stored rounded to whole Hz; sub-Hz differences do not
/// warrant distinct renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundKey {
    pub role: ChannelRole,
    pub material: usize,
    pub freq_hz: u32,
}

/// Lazily-warmed cache of per-material buffers
pub struct MaterialSoundBank {
    synth: WaveformSynthesizer,
    sound: SoundConfig,
    materials: Vec<MaterialProfile>,
    cache: AHashMap<SoundKey, Arc<SoundBuffer>>,
    synthesized: usize,
}

impl MaterialSoundBank {
    pub fn new(
        synth: WaveformSynthesizer,
        sound: SoundConfig,
        materials: Vec<MaterialProfile>,
    ) -> Self {
        Self {
            synth,
            sound,
            materials,
            cache: AHashMap::new(),
            synthesized: 0,
        }
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn profile(&self, material: usize) -> Option<&MaterialProfile> {
        self.materials.get(material)
    }

    /// Synthesize and cache all three role buffers for one material
    ///
    /// Idempotent: already-cached keys are skipped. Callers must pass
    /// a valid material index.
    pub fn warm_up(&mut self, material: usize) {
        for role in [ChannelRole::Pressure, ChannelRole::Click, ChannelRole::MotionLoop] {
            let key = self.key_for(role, material);
            if self.cache.contains_key(&key) {
                continue;
            }
            let buffer = self.render(role, material);
            debug!(
                material,
                ?role,
                freq_hz = key.freq_hz,
                samples = buffer.len(),
                "synthesized sound buffer"
            );
            self.cache.insert(key, Arc::new(buffer));
            self.synthesized += 1;
        }
    }

    /// Warm every configured material at once (startup path)
    pub fn warm_up_all(&mut self) {
        for material in 0..self.materials.len() {
            self.warm_up(material);
        }
    }

    /// Cached buffer for a role/material pair, if warmed
    pub fn get(&self, role: ChannelRole, material: usize) -> Option<Arc<SoundBuffer>> {
        let key = self.key_for(role, material);
        self.cache.get(&key).cloned()
    }

    /// Total number of buffers rendered so far (cache misses)
    pub fn synthesized_count(&self) -> usize {
        self.synthesized
    }

    fn key_for(&self, role: ChannelRole, material: usize) -> SoundKey {
        SoundKey {
            role,
            material,
            freq_hz: self.frequency_for(role, material).round() as u32,
        }
    }

    /// Role base frequency scaled by the material's frequency factor
    ///
    /// The pressure cue stays at its base frequency: it encodes
    /// contact, not texture.
    fn frequency_for(&self, role: ChannelRole, material: usize) -> f32 {
        let freq_factor = self
            .materials
            .get(material)
            .map(|m| m.freq_factor)
            .unwrap_or(1.0);
        match role {
            ChannelRole::Pressure => self.sound.pressure_hz,
            ChannelRole::Click => self.sound.click_hz * freq_factor,
            ChannelRole::MotionLoop => self.sound.motion_base_hz * freq_factor,
        }
    }

    fn render(&self, role: ChannelRole, material: usize) -> SoundBuffer {
        let freq_hz = self.frequency_for(role, material);
        let sound = &self.sound;
        match role {
            ChannelRole::Pressure => self.synth.pressure_cue(
                freq_hz,
                sound.pressure_ms,
                sound.pressure_amp,
                sound.pressure_fade_out_ms,
            ),
            ChannelRole::Click => self.synth.click_cue(
                freq_hz,
                sound.click_ms,
                sound.click_amp,
                sound.click_fade_out_ms,
            ),
            ChannelRole::MotionLoop => {
                let waveform = self
                    .materials
                    .get(material)
                    .map(|m| m.waveform)
                    .unwrap_or_default();
                // Loops rely on the volume controller for fade-out
                self.synth
                    .material(waveform, freq_hz, sound.motion_loop_ms, sound.motion_amp, 0.0)
            }
        }
    }
}
