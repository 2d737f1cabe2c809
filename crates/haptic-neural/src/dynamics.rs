/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Izhikevich neural dynamics
//!
//! Pure functions for computing membrane potential updates.
//! Stateless; all state lives in the caller.

/// Spike detection threshold in millivolts.
///
/// The Izhikevich model detects a spike when `v` reaches +30 mV and
/// resets it to `c`. The threshold is part of the model definition,
/// not a tunable.
pub const SPIKE_THRESHOLD_MV: f32 = 30.0;

/// Update a single Izhikevich neuron by one explicit Euler step
///
/// # Arguments
/// * `v` - Membrane potential in mV (mutable)
/// * `u` - Recovery variable (mutable)
/// * `a` - Recovery time constant
/// * `b` - Voltage/recovery coupling
/// * `c` - Post-spike reset voltage (mV)
/// * `d` - Post-spike recovery increment
/// * `dt_ms` - Timestep in milliseconds (reference behavior: 1.0)
/// * `input_current` - Injected current; any finite value, the caller
///   is responsible for clipping
///
/// # Returns
/// `true` if the neuron spiked during this step
///
/// # Algorithm
/// ```text
/// v += dt * (0.04 v² + 5 v + 140 − u + I)
/// u += dt * a (b v − u)
/// if v >= 30.0: v = c, u += d, spiked
/// ```
///
/// `v` is never clamped below the spike check; `u` stays finite for
/// the published parameter ranges.
///
/// # Example
/// ```
/// use haptic_neural::update_neuron_izhikevich;
///
/// let (mut v, mut u) = (-70.0_f32, -70.0 * 0.2);
/// // Strong sustained current drives the neuron to a spike eventually.
/// let mut spiked = false;
/// for _ in 0..200 {
///     spiked |= update_neuron_izhikevich(&mut v, &mut u, 0.02, 0.2, -65.0, 8.0, 1.0, 12.0);
/// }
/// assert!(spiked);
/// ```
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn update_neuron_izhikevich(
    v: &mut f32,
    u: &mut f32,
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    dt_ms: f32,
    input_current: f32,
) -> bool {
    // dv/dt = 0.04*v^2 + 5*v + 140 - u + I
    *v += dt_ms * (0.04 * *v * *v + 5.0 * *v + 140.0 - *u + input_current);

    // du/dt = a*(b*v - u)
    *u += dt_ms * a * (b * *v - *u);

    if *v >= SPIKE_THRESHOLD_MV {
        *v = c;
        *u += d;
        return true;
    }

    false
}
