/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Stateful neuron integrator
//!
//! One `NeuronIntegrator` per logical channel, reused indefinitely.
//! The instance owns its `(v, u)` state exclusively and mutates it
//! only inside [`NeuronIntegrator::step`]; it is never recreated
//! except on an explicit reset.

use serde::{Deserialize, Serialize};

use crate::dynamics::update_neuron_izhikevich;
use crate::{NeuralError, Result};

/// Izhikevich model coefficients for one channel
///
/// Immutable per channel, loaded once from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuronParams {
    /// Recovery time constant
    pub a: f32,
    /// Voltage/recovery coupling
    pub b: f32,
    /// Post-spike reset voltage (mV)
    pub c: f32,
    /// Post-spike recovery increment
    pub d: f32,
    /// Initial membrane potential (mV)
    pub v_init: f32,
}

impl Default for NeuronParams {
    fn default() -> Self {
        // Regular-spiking cortical cell, the common textbook set
        Self {
            a: 0.02,
            b: 0.2,
            c: -65.0,
            d: 8.0,
            v_init: -70.0,
        }
    }
}

impl NeuronParams {
    /// Validate parameters, failing fast on values that would make
    /// the integrator diverge or freeze
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("d", self.d),
            ("v_init", self.v_init),
        ] {
            if !value.is_finite() {
                return Err(NeuralError::InvalidParameter {
                    name,
                    reason: "must be finite",
                });
            }
        }
        if self.a <= 0.0 {
            return Err(NeuralError::InvalidParameter {
                name: "a",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// Membrane potential and recovery variable of one neuron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronState {
    /// Membrane potential (mV)
    pub v: f32,
    /// Recovery variable
    pub u: f32,
}

/// A single reusable Izhikevich integrator
#[derive(Debug, Clone)]
pub struct NeuronIntegrator {
    params: NeuronParams,
    state: NeuronState,
}

impl NeuronIntegrator {
    /// Create an integrator at its initial state: `v = v_init`,
    /// `u = b * v_init` (not zero)
    pub fn new(params: NeuronParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: NeuronState {
                v: params.v_init,
                u: params.b * params.v_init,
            },
        })
    }

    /// Advance by one timestep with the given input current
    ///
    /// Returns `true` iff `v` crossed the spike threshold this step.
    /// The current may be any finite float; clipping is the encoder's
    /// responsibility.
    pub fn step(&mut self, input_current: f32, dt_ms: f32) -> bool {
        let p = &self.params;
        update_neuron_izhikevich(
            &mut self.state.v,
            &mut self.state.u,
            p.a,
            p.b,
            p.c,
            p.d,
            dt_ms,
            input_current,
        )
    }

    /// Current `(v, u)` state
    pub fn state(&self) -> NeuronState {
        self.state
    }

    pub fn params(&self) -> &NeuronParams {
        &self.params
    }

    /// Reconstruct the initial state without reallocating
    pub fn reset(&mut self) {
        self.state = NeuronState {
            v: self.params.v_init,
            u: self.params.b * self.params.v_init,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_uses_coupled_recovery() {
        let params = NeuronParams::default();
        let n = NeuronIntegrator::new(params).unwrap();
        assert_eq!(n.state().v, params.v_init);
        assert_eq!(n.state().u, params.b * params.v_init);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let params = NeuronParams::default();
        let mut n = NeuronIntegrator::new(params).unwrap();
        for _ in 0..100 {
            n.step(10.0, 1.0);
        }
        n.reset();
        assert_eq!(n.state().v, params.v_init);
        assert_eq!(n.state().u, params.b * params.v_init);
    }

    #[test]
    fn test_non_finite_parameter_rejected() {
        let params = NeuronParams {
            c: f32::NAN,
            ..Default::default()
        };
        assert!(NeuronIntegrator::new(params).is_err());
    }

    #[test]
    fn test_non_positive_a_rejected() {
        let params = NeuronParams {
            a: 0.0,
            ..Default::default()
        };
        assert!(NeuronIntegrator::new(params).is_err());
    }

    #[test]
    fn test_spike_resets_to_c() {
        let params = NeuronParams {
            a: 0.05,
            b: 0.25,
            c: -65.0,
            d: 6.0,
            v_init: -70.0,
        };
        let mut n = NeuronIntegrator::new(params).unwrap();
        let mut saw_spike = false;
        for _ in 0..500 {
            if n.step(12.0, 1.0) {
                saw_spike = true;
                assert_eq!(n.state().v, params.c);
            }
        }
        assert!(saw_spike);
    }
}
