/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Configuration type definitions
//!
//! Every struct maps to a section of the config file and carries a
//! `Default` impl reproducing the hand-tuned reference constants.
//! The rate/volume breakpoints and the spike window duration are
//! empirical tunables, not derived quantities; validation only orders
//! them.

use haptic_neural::NeuronParams;
use haptic_synth::Waveform;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HapticConfig {
    pub simulation: SimulationConfig,
    pub neurons: NeuronsConfig,
    pub input: InputConfig,
    pub sound: SoundConfig,
    pub volume: VolumeConfig,
    pub materials: Vec<MaterialProfile>,
}

impl HapticConfig {
    /// Reference configuration with the default material set
    ///
    /// `Default::default()` yields an *empty* material list (the
    /// serde entry point); this is the ready-to-run variant.
    pub fn reference() -> Self {
        Self {
            materials: MaterialProfile::default_set(),
            ..Default::default()
        }
    }
}

/// Simulation timing and audio format
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Neuron timestep in milliseconds (the tick period)
    pub dt_ms: f32,
    /// PCM sample rate (Hz)
    pub sample_rate: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt_ms: 1.0,
            sample_rate: 44_100,
        }
    }
}

/// The three tactile channels' neuron parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronsConfig {
    /// SA pressure channel: slow recovery, responds to sustained input
    pub pressure: NeuronParams,
    /// RA motion channel: fast recovery, fires while moving
    pub motion: NeuronParams,
    /// RA click channel: very fast recovery, fires on transients
    pub click: NeuronParams,
}

impl Default for NeuronsConfig {
    fn default() -> Self {
        Self {
            pressure: NeuronParams {
                a: 0.05,
                b: 0.25,
                c: -65.0,
                d: 6.0,
                v_init: -70.0,
            },
            motion: NeuronParams {
                a: 0.4,
                b: 0.25,
                c: -65.0,
                d: 1.5,
                v_init: -65.0,
            },
            click: NeuronParams {
                a: 0.3,
                b: 0.25,
                c: -65.0,
                d: 6.0,
                v_init: -65.0,
            },
        }
    }
}

/// Pointer → input-current mapping
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Held pressure-channel current while pressed
    pub pressure_magnitude: f32,
    /// Raw click pulse magnitude (clipped to the click range)
    pub click_pulse_magnitude: f32,
    /// Click pulse length in ticks after a rising press edge
    pub click_sustain_ticks: u16,
    pub click_clip_min: f32,
    pub click_clip_max: f32,
    /// Motion current = speed * roughness * this scale
    pub motion_scale: f32,
    /// Minimum pointer speed for motion input
    pub motion_min_speed: f32,
    pub motion_clip_min: f32,
    pub motion_clip_max: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pressure_magnitude: 12.0,
            click_pulse_magnitude: 1200.0,
            click_sustain_ticks: 3,
            click_clip_min: -40.0,
            click_clip_max: 40.0,
            motion_scale: 0.02,
            motion_min_speed: 1.0,
            motion_clip_min: -30.0,
            motion_clip_max: 30.0,
        }
    }
}

/// Per-role synthesis and playback parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundConfig {
    // Pressure cue (vibrotactile background on press)
    pub pressure_hz: f32,
    pub pressure_ms: f32,
    pub pressure_amp: f32,
    pub pressure_volume: f32,
    pub pressure_fade_out_ms: f32,

    // Motion loop (continuous channel, volume driven by spike rate)
    pub motion_base_hz: f32,
    pub motion_loop_ms: f32,
    pub motion_amp: f32,

    // Click cue (one-shot transient)
    pub click_hz: f32,
    pub click_ms: f32,
    pub click_amp: f32,
    pub click_volume: f32,
    pub click_fade_out_ms: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            pressure_hz: 60.0,
            pressure_ms: 120.0,
            pressure_amp: 0.3,
            pressure_volume: 0.2,
            pressure_fade_out_ms: 20.0,

            motion_base_hz: 30.0,
            motion_loop_ms: 2000.0,
            motion_amp: 0.8,

            click_hz: 150.0,
            click_ms: 70.0,
            click_amp: 2.5,
            click_volume: 1.0,
            click_fade_out_ms: 5.0,
        }
    }
}

/// Spike-rate → loudness mapping and smoothing
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Sliding spike window duration (ms)
    pub window_ms: f64,
    /// Recompute the rate every N ticks
    pub update_interval_ticks: u32,
    /// Rates at/below this map to `min_volume` (Hz)
    pub min_rate_hz: f64,
    /// Rates at/above this map to `max_volume` (Hz)
    pub max_rate_hz: f64,
    pub min_volume: f32,
    pub max_volume: f32,
    /// Smoothing factor while loudness rises (slow attack)
    pub attack_factor: f32,
    /// Smoothing factor while loudness falls (fast release) —
    /// intentionally larger than the attack factor
    pub decay_factor: f32,
    /// Snap-to-target threshold
    pub snap_epsilon: f32,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            window_ms: 25.0,
            update_interval_ticks: 2,
            min_rate_hz: 20.0,
            max_rate_hz: 120.0,
            min_volume: 0.7,
            max_volume: 1.0,
            attack_factor: 0.4,
            decay_factor: 0.8,
            snap_epsilon: 0.005,
        }
    }
}

/// Acoustic-shaping bundle for one selectable material
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MaterialProfile {
    pub name: String,
    /// Surface roughness, scales motion-channel current (> 0)
    pub roughness: f32,
    /// Multiplier applied to the base frequencies (> 0)
    pub freq_factor: f32,
    /// Waveform recipe plus its shape parameter
    #[serde(default)]
    pub waveform: Waveform,
}

impl MaterialProfile {
    /// The seven reference materials, in keyboard-selection order
    pub fn default_set() -> Vec<MaterialProfile> {
        vec![
            MaterialProfile {
                name: "Glass".into(),
                roughness: 0.05,
                freq_factor: 1.6,
                waveform: Waveform::Glass { brightness: 3.0 },
            },
            MaterialProfile {
                name: "Metal".into(),
                roughness: 1.2,
                freq_factor: 1.0,
                waveform: Waveform::Metal { resonance: 2.2 },
            },
            MaterialProfile {
                name: "Wood".into(),
                roughness: 1.8,
                freq_factor: 0.8,
                waveform: Waveform::Wood { warmth: 2.5 },
            },
            MaterialProfile {
                name: "Plastic".into(),
                roughness: 0.3,
                freq_factor: 1.1,
                waveform: Waveform::Plastic { hardness: 1.5 },
            },
            MaterialProfile {
                name: "Fabric".into(),
                roughness: 0.02,
                freq_factor: 0.6,
                waveform: Waveform::Fabric { softness: 3.0 },
            },
            MaterialProfile {
                name: "Ceramic".into(),
                roughness: 0.6,
                freq_factor: 1.3,
                waveform: Waveform::Ceramic { brittleness: 1.8 },
            },
            MaterialProfile {
                name: "Rubber".into(),
                roughness: 0.4,
                freq_factor: 0.7,
                waveform: Waveform::Rubber { elasticity: 2.0 },
            },
        ]
    }
}
