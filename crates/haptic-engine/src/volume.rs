/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Spike-rate driven loudness control
//!
//! Turns the motion channel's discrete spike train into a continuous
//! loudness signal:
//!
//! 1. a sliding time window of spike occurrences estimates the
//!    instantaneous rate,
//! 2. a piecewise-linear curve maps rate to a target loudness,
//! 3. asymmetric smoothing follows the target — slow attack so
//!    renewed motion swells in, fast decay so release cuts out.
//!
//! The asymmetry is a control-design choice, with both factors as
//!  independent tunables.

use std::collections::VecDeque;

use haptic_config::VolumeConfig;

/// Floor on the effective window duration for the rate estimate; a
/// nearly-empty window must not divide by ~zero
const MIN_EFFECTIVE_MS: f64 = 5.0;

/// Sliding-window spike-rate estimator with asymmetric volume
/// smoothing
#[derive(Debug, Clone)]
pub struct SpikeRateVolumeController {
    config: VolumeConfig,
    /// (timestamp ms, spike occurred) — append at tail, prune at head
    window: VecDeque<(f64, bool)>,
    update_counter: u32,
    current_rate_hz: f64,
    target_volume: f32,
    current_volume: f32,
}

impl SpikeRateVolumeController {
    pub fn new(config: VolumeConfig) -> Self {
        Self {
            config,
            window: VecDeque::new(),
            update_counter: 0,
            current_rate_hz: 0.0,
            target_volume: 0.0,
            current_volume: 0.0,
        }
    }

    /// Consume one tick's motion-spike flag and recompute loudness
    ///
    /// Returns the smoothed current volume, always within [0, 1].
    /// Called every tick whether or not a spike occurred; that is
    /// what guarantees a smooth cross-fade across silent ticks.
    pub fn update(&mut self, now_ms: f64, motion_spiked: bool, pressed: bool) -> f32 {
        self.window.push_back((now_ms, motion_spiked));

        let cutoff = now_ms - self.config.window_ms;
        while matches!(self.window.front(), Some(&(t, _)) if t < cutoff) {
            self.window.pop_front();
        }

        self.update_counter += 1;
        if self.update_counter >= self.config.update_interval_ticks {
            self.current_rate_hz = self.estimate_rate(now_ms);
            self.update_counter = 0;
        }

        // Press state overrides the rate-derived target
        self.target_volume = if pressed {
            self.rate_to_volume(self.current_rate_hz)
        } else {
            0.0
        };

        let smoothing = if self.target_volume > self.current_volume {
            self.config.attack_factor
        } else {
            self.config.decay_factor
        };
        self.current_volume += (self.target_volume - self.current_volume) * smoothing;

        if (self.current_volume - self.target_volume).abs() < self.config.snap_epsilon {
            self.current_volume = self.target_volume;
        }
        self.current_volume = self.current_volume.clamp(0.0, 1.0);
        self.current_volume
    }

    /// Spikes per second over the effective window
    fn estimate_rate(&self, now_ms: f64) -> f64 {
        let spike_count = self.window.iter().filter(|&&(_, spiked)| spiked).count();

        let effective_ms = match self.window.front() {
            Some(&(oldest_ms, _)) => {
                (now_ms - oldest_ms).clamp(MIN_EFFECTIVE_MS, self.config.window_ms)
            }
            None => self.config.window_ms,
        };

        spike_count as f64 / (effective_ms / 1000.0)
    }

    /// Piecewise-linear rate → volume curve
    ///
    /// 0 below zero rate, `min_volume` up to the lower breakpoint,
    /// `max_volume` from the upper one, linear in between.
    fn rate_to_volume(&self, rate_hz: f64) -> f32 {
        let cfg = &self.config;
        if rate_hz <= 0.0 {
            0.0
        } else if rate_hz <= cfg.min_rate_hz {
            cfg.min_volume
        } else if rate_hz >= cfg.max_rate_hz {
            cfg.max_volume
        } else {
            let fraction = (rate_hz - cfg.min_rate_hz) / (cfg.max_rate_hz - cfg.min_rate_hz);
            let volume = cfg.min_volume + fraction as f32 * (cfg.max_volume - cfg.min_volume);
            volume.clamp(0.0, 1.0)
        }
    }

    pub fn current_volume(&self) -> f32 {
        self.current_volume
    }

    pub fn target_volume(&self) -> f32 {
        self.target_volume
    }

    pub fn current_rate_hz(&self) -> f64 {
        self.current_rate_hz
    }

    /// Clear the window and zero all state
    pub fn reset(&mut self) {
        self.window.clear();
        self.update_counter = 0;
        self.current_rate_hz = 0.0;
        self.target_volume = 0.0;
        self.current_volume = 0.0;
    }
}
