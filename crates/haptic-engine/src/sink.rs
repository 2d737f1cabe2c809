/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Audio output boundary
//!
//! The engine never touches audio hardware. It emits playback
//! requests through this trait; a mixer backend (or a test recorder)
//! implements it. All calls are fire-and-forget.

use std::sync::Arc;

use haptic_synth::SoundBuffer;

/// Playback request receiver
///
/// Volumes passed in are already clamped to [0, 1] by the engine.
/// Buffers are shared by reference; implementations must not assume
/// exclusive ownership.
pub trait AudioSink {
    /// One-shot playback on a channel
    fn play(&mut self, buffer: &Arc<SoundBuffer>, channel: u32, volume: f32);

    /// Begin looping a buffer indefinitely on a channel
    fn start_loop(&mut self, buffer: &Arc<SoundBuffer>, channel: u32, initial_volume: f32);

    /// Adjust the volume of a looping channel
    fn set_volume(&mut self, channel: u32, volume: f32);

    /// Stop whatever is playing on a channel
    fn stop(&mut self, channel: u32);
}

/// Sink that discards every request
///
/// Useful for headless runs and benchmarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _buffer: &Arc<SoundBuffer>, _channel: u32, _volume: f32) {}
    fn start_loop(&mut self, _buffer: &Arc<SoundBuffer>, _channel: u32, _initial_volume: f32) {}
    fn set_volume(&mut self, _channel: u32, _volume: f32) {}
    fn stop(&mut self, _channel: u32) {}
}
