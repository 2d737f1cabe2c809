/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Stimulus encoder: pointer/button state → per-channel input currents
//!
//! Three independent integrators share the update rule but carry
//! different parameters:
//! - **pressure** (SA): held scalar current, set on press/release
//!   transitions via [`StimulusEncoder::set_pressure_input`]
//! - **motion** (RA): speed × roughness × scale while pressed and
//!   moving, clipped before injection
//! - **click** (RA): fixed-magnitude pulse for a few ticks after each
//!   rising press edge
//!
//! All three integrators are stepped unconditionally every tick.
//! Free-running dynamics, not gated execution.

use tracing::trace;

use crate::integrator::{NeuronIntegrator, NeuronState};
use crate::{NeuronParams, Result};

/// External input to one encoder step, one per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StimulusSample {
    pub mouse_pressed: bool,
    /// Instantaneous pointer speed, >= 0 (pixels/second)
    pub mouse_speed: f32,
    /// Smoothed average pointer speed, >= 0 (currently unused by the
    /// current mapping, carried for collaborators)
    pub avg_mouse_speed: f32,
    /// Roughness of the active material, > 0
    pub material_roughness: f32,
}

/// Immutable encoder tunables, resolved once at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderConfig {
    /// Simulation timestep (ms)
    pub dt_ms: f32,
    /// Motion current = speed * roughness * this scale
    pub motion_scale: f32,
    /// Below this speed the motion channel receives zero current
    pub motion_min_speed: f32,
    pub motion_clip_min: f32,
    pub motion_clip_max: f32,
    /// Raw click pulse magnitude, clipped to the click range below
    pub click_pulse_magnitude: f32,
    /// Pulse length in ticks after a rising press edge
    pub click_sustain_ticks: u16,
    pub click_clip_min: f32,
    pub click_clip_max: f32,
}

/// Spike flag plus the `(v, u)` pair used to detect it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelReport {
    pub spiked: bool,
    pub state: NeuronState,
}

/// Result of one encoder step across the three channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderOutput {
    pub pressure: ChannelReport,
    pub motion: ChannelReport,
    pub click: ChannelReport,
}

/// Maps raw pointer/button signals into per-neuron input currents
#[derive(Debug, Clone)]
pub struct StimulusEncoder {
    pressure: NeuronIntegrator,
    motion: NeuronIntegrator,
    click: NeuronIntegrator,
    config: EncoderConfig,

    /// Held pressure current, set externally on press/release
    pressure_input: f32,
    /// Previous tick's press state, for click edge detection
    prev_pressed: bool,
    /// Remaining ticks of the current click pulse
    click_sustain_remaining: u16,
}

impl StimulusEncoder {
    pub fn new(
        pressure_params: NeuronParams,
        motion_params: NeuronParams,
        click_params: NeuronParams,
        config: EncoderConfig,
    ) -> Result<Self> {
        Ok(Self {
            pressure: NeuronIntegrator::new(pressure_params)?,
            motion: NeuronIntegrator::new(motion_params)?,
            click: NeuronIntegrator::new(click_params)?,
            config,
            pressure_input: 0.0,
            prev_pressed: false,
            click_sustain_remaining: 0,
        })
    }

    /// Set the held pressure-channel current
    ///
    /// Called on press/release transitions: press → configured
    /// magnitude, release → 0. Not derived per-tick from stimulus
    /// fields.
    pub fn set_pressure_input(&mut self, magnitude: f32) {
        self.pressure_input = magnitude;
    }

    /// Advance all three channels by one tick
    pub fn step(&mut self, sample: &StimulusSample) -> EncoderOutput {
        let cfg = self.config;

        // Click channel: a rising press edge (re)starts the pulse
        // window. Retrigger restarts, it does not extend.
        if sample.mouse_pressed && !self.prev_pressed {
            self.click_sustain_remaining = cfg.click_sustain_ticks;
        }
        self.prev_pressed = sample.mouse_pressed;

        let click_current = if self.click_sustain_remaining > 0 {
            self.click_sustain_remaining -= 1;
            cfg.click_pulse_magnitude
                .clamp(cfg.click_clip_min, cfg.click_clip_max)
        } else {
            0.0
        };

        // Motion channel: only while pressed and moving fast enough
        let motion_current = if sample.mouse_pressed && sample.mouse_speed >= cfg.motion_min_speed {
            (sample.mouse_speed * sample.material_roughness * cfg.motion_scale)
                .clamp(cfg.motion_clip_min, cfg.motion_clip_max)
        } else {
            0.0
        };

        let pressure_spiked = self.pressure.step(self.pressure_input, cfg.dt_ms);
        let motion_spiked = self.motion.step(motion_current, cfg.dt_ms);
        let click_spiked = self.click.step(click_current, cfg.dt_ms);

        if pressure_spiked || motion_spiked || click_spiked {
            trace!(
                pressure = pressure_spiked,
                motion = motion_spiked,
                click = click_spiked,
                "spike"
            );
        }

        EncoderOutput {
            pressure: ChannelReport {
                spiked: pressure_spiked,
                state: self.pressure.state(),
            },
            motion: ChannelReport {
                spiked: motion_spiked,
                state: self.motion.state(),
            },
            click: ChannelReport {
                spiked: click_spiked,
                state: self.click.state(),
            },
        }
    }

    /// Reconstruct all neuron state and pulse bookkeeping
    pub fn reset(&mut self) {
        self.pressure.reset();
        self.motion.reset();
        self.click.reset();
        self.pressure_input = 0.0;
        self.prev_pressed = false;
        self.click_sustain_remaining = 0;
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EncoderConfig {
        EncoderConfig {
            dt_ms: 1.0,
            motion_scale: 0.02,
            motion_min_speed: 1.0,
            motion_clip_min: -30.0,
            motion_clip_max: 30.0,
            click_pulse_magnitude: 1200.0,
            click_sustain_ticks: 3,
            click_clip_min: -40.0,
            click_clip_max: 40.0,
        }
    }

    fn test_encoder() -> StimulusEncoder {
        let pressure = NeuronParams {
            a: 0.05,
            b: 0.25,
            c: -65.0,
            d: 6.0,
            v_init: -70.0,
        };
        let motion = NeuronParams {
            a: 0.4,
            b: 0.25,
            c: -65.0,
            d: 1.5,
            v_init: -65.0,
        };
        let click = NeuronParams {
            a: 0.3,
            b: 0.25,
            c: -65.0,
            d: 6.0,
            v_init: -65.0,
        };
        StimulusEncoder::new(pressure, motion, click, test_config()).unwrap()
    }

    fn sample(pressed: bool, speed: f32) -> StimulusSample {
        StimulusSample {
            mouse_pressed: pressed,
            mouse_speed: speed,
            avg_mouse_speed: speed,
            material_roughness: 1.0,
        }
    }

    #[test]
    fn test_all_channels_step_with_zero_input() {
        let mut enc = test_encoder();
        let out = enc.step(&sample(false, 0.0));
        for report in [out.pressure, out.motion, out.click] {
            assert!(report.state.v.is_finite());
            assert!(report.state.u.is_finite());
        }
    }

    #[test]
    fn test_click_pulse_lasts_exactly_sustain_ticks() {
        let mut enc = test_encoder();
        // Rising edge starts a 3-tick pulse
        enc.step(&sample(true, 0.0));
        assert_eq!(enc.click_sustain_remaining, 2);
        enc.step(&sample(true, 0.0));
        enc.step(&sample(true, 0.0));
        assert_eq!(enc.click_sustain_remaining, 0);
        // Held press does not re-arm the pulse
        for _ in 0..10 {
            enc.step(&sample(true, 0.0));
            assert_eq!(enc.click_sustain_remaining, 0);
        }
    }

    #[test]
    fn test_click_retrigger_restarts_window() {
        let mut enc = test_encoder();
        enc.step(&sample(true, 0.0));
        enc.step(&sample(false, 0.0));
        // Second rising edge while recovery is still settling
        enc.step(&sample(true, 0.0));
        assert_eq!(enc.click_sustain_remaining, 2);
    }

    #[test]
    fn test_click_spikes_on_press_edge() {
        let mut enc = test_encoder();
        let mut spiked = false;
        enc.step(&sample(true, 0.0));
        for _ in 0..20 {
            spiked |= enc.step(&sample(true, 0.0)).click.spiked;
        }
        assert!(spiked, "clipped 40.0 pulse should drive a click spike");
    }

    #[test]
    fn test_motion_gated_by_press_and_speed() {
        let mut enc = test_encoder();
        // Fast motion, not pressed: motion channel stays quiet
        let mut any_spike = false;
        for _ in 0..200 {
            any_spike |= enc.step(&sample(false, 5000.0)).motion.spiked;
        }
        assert!(!any_spike);

        // Pressed below min speed: still quiet
        enc.reset();
        let mut any_spike = false;
        for _ in 0..200 {
            any_spike |= enc.step(&sample(true, 0.5)).motion.spiked;
        }
        assert!(!any_spike);

        // Pressed and fast: motion channel fires
        enc.reset();
        let mut any_spike = false;
        for _ in 0..200 {
            any_spike |= enc.step(&sample(true, 5000.0)).motion.spiked;
        }
        assert!(any_spike);
    }

    #[test]
    fn test_pressure_channel_uses_held_input() {
        let mut enc = test_encoder();
        enc.set_pressure_input(12.0);
        let mut spiked = false;
        // Pressure input is the held scalar, independent of the
        // per-tick sample fields
        for _ in 0..300 {
            spiked |= enc.step(&sample(false, 0.0)).pressure.spiked;
        }
        assert!(spiked);

        enc.set_pressure_input(0.0);
        enc.reset();
        let mut spiked = false;
        for _ in 0..300 {
            spiked |= enc.step(&sample(true, 0.0)).pressure.spiked;
        }
        assert!(!spiked);
    }

    #[test]
    fn test_reset_clears_pulse_and_held_input() {
        let mut enc = test_encoder();
        enc.set_pressure_input(12.0);
        enc.step(&sample(true, 100.0));
        enc.reset();
        assert_eq!(enc.click_sustain_remaining, 0);
        assert_eq!(enc.pressure_input, 0.0);
        assert!(!enc.prev_pressed);
    }
}
