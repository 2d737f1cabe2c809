/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Tick-loop orchestration
//!
//! [`HapticEngine`] owns the encoder, the volume controller, the sound
//! bank and the sink, and wires them together once per tick:
//!
//! - pressure spike → one-shot pressure cue on channel 0
//! - motion spike train → loop volume on channel 1
//! - click spike → one-shot click cue on channel 2
//!
//! Time is derived, not sampled: `now_ms = tick_count * dt_ms`. The
//! loop behaves identically under a debugger, in a benchmark, or
//! against a wall-clock driver.

use tracing::{debug, info};

use haptic_config::{validate_config, HapticConfig};
use haptic_neural::{EncoderConfig, StimulusEncoder, StimulusSample};
use haptic_synth::WaveformSynthesizer;

use crate::bank::{ChannelRole, MaterialSoundBank};
use crate::sink::AudioSink;
use crate::volume::SpikeRateVolumeController;
use crate::{EngineError, Result};

/// Mixer channel for one-shot pressure cues
pub const CHANNEL_PRESSURE: u32 = 0;
/// Mixer channel for the continuous motion loop
pub const CHANNEL_MOTION: u32 = 1;
/// Mixer channel for one-shot click cues
pub const CHANNEL_CLICK: u32 = 2;

/// What one tick produced, for callers that render UI or log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub pressure_spiked: bool,
    pub motion_spiked: bool,
    pub click_spiked: bool,
    /// Smoothed motion-loop volume applied this tick, within [0, 1]
    pub motion_volume: f32,
    /// Last computed motion spike rate (Hz)
    pub motion_rate_hz: f64,
}

/// Spike-driven haptic audio engine
///
/// Generic over the sink so tests can record playback requests and
/// production can hand them to a real mixer.
pub struct HapticEngine<S: AudioSink> {
    encoder: StimulusEncoder,
    controller: SpikeRateVolumeController,
    bank: MaterialSoundBank,
    sink: S,

    pressure_magnitude: f32,
    pressure_volume: f32,
    click_volume: f32,
    dt_ms: f32,

    active_material: usize,
    pressed: bool,
    tick_count: u64,
}

impl<S: AudioSink> HapticEngine<S> {
    /// Validate the configuration, warm the sound bank, and start the
    /// motion loop muted
    pub fn new(config: HapticConfig, sink: S) -> Result<Self> {
        validate_config(&config)?;

        let encoder_config = EncoderConfig {
            dt_ms: config.simulation.dt_ms,
            motion_scale: config.input.motion_scale,
            motion_min_speed: config.input.motion_min_speed,
            motion_clip_min: config.input.motion_clip_min,
            motion_clip_max: config.input.motion_clip_max,
            click_pulse_magnitude: config.input.click_pulse_magnitude,
            click_sustain_ticks: config.input.click_sustain_ticks,
            click_clip_min: config.input.click_clip_min,
            click_clip_max: config.input.click_clip_max,
        };
        let encoder = StimulusEncoder::new(
            config.neurons.pressure,
            config.neurons.motion,
            config.neurons.click,
            encoder_config,
        )?;

        let controller = SpikeRateVolumeController::new(config.volume.clone());

        let synth = WaveformSynthesizer::new(config.simulation.sample_rate);
        let mut bank = MaterialSoundBank::new(synth, config.sound.clone(), config.materials);
        bank.warm_up_all();
        info!(
            materials = bank.material_count(),
            buffers = bank.synthesized_count(),
            "sound bank warmed"
        );

        let mut engine = Self {
            encoder,
            controller,
            bank,
            sink,
            pressure_magnitude: config.input.pressure_magnitude,
            pressure_volume: config.sound.pressure_volume,
            click_volume: config.sound.click_volume,
            dt_ms: config.simulation.dt_ms,
            active_material: 0,
            pressed: false,
            tick_count: 0,
        };
        engine.restart_motion_loop(0.0);
        Ok(engine)
    }

    /// Advance the engine by one tick
    ///
    /// `mouse_speed` is the instantaneous pointer speed,
    /// `avg_mouse_speed` a smoothed companion value. Every call steps
    /// all three neurons and re-applies the motion-loop volume.
    pub fn tick(&mut self, mouse_speed: f32, avg_mouse_speed: f32) -> TickReport {
        self.tick_count += 1;
        let now_ms = self.tick_count as f64 * self.dt_ms as f64;

        let roughness = self
            .bank
            .profile(self.active_material)
            .map(|m| m.roughness)
            .unwrap_or(1.0);
        let sample = StimulusSample {
            mouse_pressed: self.pressed,
            mouse_speed,
            avg_mouse_speed,
            material_roughness: roughness,
        };
        let output = self.encoder.step(&sample);

        if output.pressure.spiked {
            if let Some(buffer) = self.bank.get(ChannelRole::Pressure, self.active_material) {
                self.sink.play(&buffer, CHANNEL_PRESSURE, self.pressure_volume);
            }
        }
        if output.click.spiked {
            if let Some(buffer) = self.bank.get(ChannelRole::Click, self.active_material) {
                self.sink.play(&buffer, CHANNEL_CLICK, self.click_volume);
            }
        }

        let motion_volume = self
            .controller
            .update(now_ms, output.motion.spiked, self.pressed);
        self.sink.set_volume(CHANNEL_MOTION, motion_volume);

        TickReport {
            pressure_spiked: output.pressure.spiked,
            motion_spiked: output.motion.spiked,
            click_spiked: output.click.spiked,
            motion_volume,
            motion_rate_hz: self.controller.current_rate_hz(),
        }
    }

    /// Button-down transition
    ///
    /// Arms the click pulse (via the encoder's edge detection on the
    /// next tick) and holds the pressure current on.
    pub fn press(&mut self) {
        self.pressed = true;
        self.encoder.set_pressure_input(self.pressure_magnitude);
    }

    /// Button-up transition
    ///
    /// The motion loop is not cut here; the controller's fast decay
    /// takes it to zero over the next few ticks.
    pub fn release(&mut self) {
        self.pressed = false;
        self.encoder.set_pressure_input(0.0);
    }

    /// Switch the active surface material
    ///
    /// Swaps the motion loop to the new material's cached buffer at
    /// the current loop volume. Re-selecting the active material is
    /// allowed and restarts the loop from a cache hit.
    pub fn select_material(&mut self, index: usize) -> Result<()> {
        if index >= self.bank.material_count() {
            return Err(EngineError::UnknownMaterial {
                index,
                count: self.bank.material_count(),
            });
        }
        self.active_material = index;
        debug!(material = index, "material selected");
        self.restart_motion_loop(self.controller.current_volume());
        Ok(())
    }

    /// Return to the initial state: neurons at rest, volume at zero,
    /// motion loop restarted muted
    pub fn reset(&mut self) {
        self.encoder.reset();
        self.controller.reset();
        self.pressed = false;
        self.tick_count = 0;
        self.restart_motion_loop(0.0);
    }

    fn restart_motion_loop(&mut self, volume: f32) {
        self.sink.stop(CHANNEL_MOTION);
        if let Some(buffer) = self.bank.get(ChannelRole::MotionLoop, self.active_material) {
            self.sink.start_loop(&buffer, CHANNEL_MOTION, volume);
        }
    }

    pub fn active_material(&self) -> usize {
        self.active_material
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn bank(&self) -> &MaterialSoundBank {
        &self.bank
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    fn engine() -> HapticEngine<NullSink> {
        HapticEngine::new(HapticConfig::reference(), NullSink).unwrap()
    }

    #[test]
    fn test_construction_warms_every_material() {
        let engine = engine();
        assert_eq!(engine.bank().material_count(), 7);
        assert_eq!(engine.bank().synthesized_count(), 7 * 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = HapticConfig::reference();
        config.simulation.dt_ms = -1.0;
        assert!(matches!(
            HapticEngine::new(config, NullSink),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_idle_ticks_stay_silent() {
        let mut engine = engine();
        for _ in 0..100 {
            let report = engine.tick(0.0, 0.0);
            assert!(!report.motion_spiked);
            assert_eq!(report.motion_volume, 0.0);
        }
    }

    #[test]
    fn test_select_material_out_of_range() {
        let mut engine = engine();
        let err = engine.select_material(7).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownMaterial { index: 7, count: 7 }
        ));
        // Active material unchanged on failure
        assert_eq!(engine.active_material(), 0);
    }

    #[test]
    fn test_press_and_drag_raises_loop_volume() {
        let mut engine = engine();
        engine.select_material(2).unwrap(); // Wood, roughness 1.8
        engine.press();
        let mut peak = 0.0f32;
        for _ in 0..200 {
            let report = engine.tick(5000.0, 5000.0);
            peak = peak.max(report.motion_volume);
        }
        assert!(peak > 0.5);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = engine();
        engine.press();
        for _ in 0..50 {
            engine.tick(3000.0, 3000.0);
        }
        engine.reset();
        assert_eq!(engine.tick_count(), 0);
        assert!(!engine.is_pressed());
        let report = engine.tick(0.0, 0.0);
        assert_eq!(report.motion_volume, 0.0);
    }

    #[test]
    fn test_tick_time_is_derived_from_tick_count() {
        let mut engine = engine();
        for _ in 0..5 {
            engine.tick(0.0, 0.0);
        }
        assert_eq!(engine.tick_count(), 5);
    }
}
