/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! End-to-end tick-loop scenarios against a recording sink

use std::sync::Arc;

use haptic_config::HapticConfig;
use haptic_engine::{
    AudioSink, HapticEngine, CHANNEL_CLICK, CHANNEL_MOTION, CHANNEL_PRESSURE,
};
use haptic_synth::SoundBuffer;

/// Every playback request the engine issued, in order
#[derive(Debug, Clone, PartialEq)]
enum SinkEvent {
    Play {
        channel: u32,
        volume: f32,
        samples: usize,
    },
    StartLoop {
        channel: u32,
        volume: f32,
        buffer: Arc<SoundBuffer>,
    },
    SetVolume {
        channel: u32,
        volume: f32,
    },
    Stop {
        channel: u32,
    },
}

#[derive(Debug, Default)]
struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl AudioSink for RecordingSink {
    fn play(&mut self, buffer: &Arc<SoundBuffer>, channel: u32, volume: f32) {
        self.events.push(SinkEvent::Play {
            channel,
            volume,
            samples: buffer.len(),
        });
    }

    fn start_loop(&mut self, buffer: &Arc<SoundBuffer>, channel: u32, initial_volume: f32) {
        self.events.push(SinkEvent::StartLoop {
            channel,
            volume: initial_volume,
            buffer: Arc::clone(buffer),
        });
    }

    fn set_volume(&mut self, channel: u32, volume: f32) {
        self.events.push(SinkEvent::SetVolume { channel, volume });
    }

    fn stop(&mut self, channel: u32) {
        self.events.push(SinkEvent::Stop { channel });
    }
}

impl RecordingSink {
    fn plays_on(&self, channel: u32) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Play { channel: c, .. } if *c == channel))
            .count()
    }

    fn last_motion_volume(&self) -> Option<f32> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::SetVolume {
                channel: CHANNEL_MOTION,
                volume,
            } => Some(*volume),
            _ => None,
        })
    }

    fn loop_buffers(&self) -> Vec<Arc<SoundBuffer>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::StartLoop { buffer, .. } => Some(Arc::clone(buffer)),
                _ => None,
            })
            .collect()
    }
}

fn engine() -> HapticEngine<RecordingSink> {
    HapticEngine::new(HapticConfig::reference(), RecordingSink::default()).unwrap()
}

#[test]
fn startup_begins_motion_loop_muted() {
    let engine = engine();
    let loops = engine.sink().loop_buffers();
    assert_eq!(loops.len(), 1);
    assert!(matches!(
        engine.sink().events.first(),
        Some(SinkEvent::Stop {
            channel: CHANNEL_MOTION
        })
    ));
    assert!(engine
        .sink()
        .events
        .iter()
        .any(|e| matches!(e, SinkEvent::StartLoop { channel: CHANNEL_MOTION, volume, .. } if *volume == 0.0)));
}

#[test]
fn fast_drag_converges_to_full_loop_volume() {
    let mut engine = engine();
    engine.select_material(1).unwrap(); // Metal, roughness 1.2
    engine.press();
    for _ in 0..300 {
        engine.tick(5000.0, 5000.0);
    }
    let volume = engine.sink().last_motion_volume().unwrap();
    assert!(
        (volume - 1.0).abs() < 0.01,
        "sustained fast drag should saturate at max volume, got {volume}"
    );
}

#[test]
fn release_decays_loop_volume_to_zero() {
    let mut engine = engine();
    engine.press();
    for _ in 0..300 {
        engine.tick(5000.0, 5000.0);
    }
    let peak = engine.sink().last_motion_volume().unwrap();
    assert!(peak > 0.9);

    engine.release();
    let mut volumes = Vec::new();
    for _ in 0..10 {
        let report = engine.tick(0.0, 0.0);
        volumes.push(report.motion_volume);
    }
    // Fast decay: a large first-tick drop, zero within the window
    assert!(volumes[0] < peak * 0.5);
    assert_eq!(*volumes.last().unwrap(), 0.0);
}

#[test]
fn press_triggers_click_cue_within_pulse_window() {
    let mut engine = engine();
    engine.press();
    for _ in 0..30 {
        engine.tick(0.0, 0.0);
    }
    assert!(
        engine.sink().plays_on(CHANNEL_CLICK) >= 1,
        "press edge should fire at least one click one-shot"
    );
}

#[test]
fn held_press_fires_pressure_cues_without_motion() {
    let mut engine = engine();
    engine.press();
    for _ in 0..500 {
        engine.tick(0.0, 0.0);
    }
    assert!(engine.sink().plays_on(CHANNEL_PRESSURE) >= 1);
    // Stationary press never raises the loop volume
    assert_eq!(engine.sink().last_motion_volume(), Some(0.0));
}

#[test]
fn volume_stays_bounded_under_adversarial_toggling() {
    let mut engine = engine();
    for i in 0..2000u32 {
        if i % 7 == 0 {
            engine.press();
        }
        if i % 7 == 4 {
            engine.release();
        }
        let speed = if i % 3 == 0 { 9000.0 } else { 0.0 };
        let report = engine.tick(speed, speed);
        assert!(
            (0.0..=1.0).contains(&report.motion_volume),
            "volume escaped bounds at tick {i}: {}",
            report.motion_volume
        );
    }
}

#[test]
fn material_switch_swaps_loop_buffer_at_current_volume() {
    let mut engine = engine();
    engine.press();
    for _ in 0..200 {
        engine.tick(5000.0, 5000.0);
    }
    let volume_before = engine.sink().last_motion_volume().unwrap();

    engine.select_material(4).unwrap(); // Fabric
    let last_loop = engine.sink().events.last().unwrap();
    match last_loop {
        SinkEvent::StartLoop { channel, volume, .. } => {
            assert_eq!(*channel, CHANNEL_MOTION);
            assert!((volume - volume_before).abs() < 1e-6);
        }
        other => panic!("expected StartLoop after material switch, got {other:?}"),
    }
}

#[test]
fn reselecting_material_hits_the_cache() {
    let mut engine = engine();
    let rendered = engine.bank().synthesized_count();

    engine.select_material(3).unwrap();
    engine.select_material(3).unwrap();
    engine.select_material(0).unwrap();

    // Warm-up happened once, at construction
    assert_eq!(engine.bank().synthesized_count(), rendered);

    // And re-selection reuses the very same allocation
    let loops = engine.sink().loop_buffers();
    let n = loops.len();
    assert!(Arc::ptr_eq(&loops[n - 3], &loops[n - 2]));
}

#[test]
fn distinct_materials_loop_distinct_buffers() {
    let mut engine = engine();
    engine.select_material(0).unwrap(); // Glass
    engine.select_material(2).unwrap(); // Wood
    let loops = engine.sink().loop_buffers();
    let n = loops.len();
    assert!(!Arc::ptr_eq(&loops[n - 2], &loops[n - 1]));
    assert_ne!(loops[n - 2].samples(), loops[n - 1].samples());
}

#[test]
fn one_shot_volumes_match_configured_levels() {
    let config = HapticConfig::reference();
    let pressure_volume = config.sound.pressure_volume;
    let click_volume = config.sound.click_volume;

    let mut engine = HapticEngine::new(config, RecordingSink::default()).unwrap();
    engine.press();
    for _ in 0..500 {
        engine.tick(0.0, 0.0);
    }

    for event in &engine.sink().events {
        match event {
            SinkEvent::Play {
                channel: CHANNEL_PRESSURE,
                volume,
                ..
            } => assert_eq!(*volume, pressure_volume),
            SinkEvent::Play {
                channel: CHANNEL_CLICK,
                volume,
                ..
            } => assert_eq!(*volume, click_volume),
            _ => {}
        }
    }
}
