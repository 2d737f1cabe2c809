// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Haptic Neural Computation
//!
//! Neural front-end of the haptic audio engine:
//! - **Dynamics**: Izhikevich membrane potential update (pure function)
//! - **Integrator**: stateful per-channel neuron wrapper
//! - **Encoder**: pointer/button state → per-channel input currents
//!
//! Three logical channels model biological tactile afferents:
//! - SA (slowly adapting) "pressure" — sustained press state
//! - RA (rapidly adapting) "motion" — continuous movement magnitude
//! - RA "click" — press/release transients

pub mod dynamics;
pub mod encoder;
pub mod integrator;

pub use dynamics::{update_neuron_izhikevich, SPIKE_THRESHOLD_MV};
pub use encoder::{ChannelReport, EncoderConfig, EncoderOutput, StimulusEncoder, StimulusSample};
pub use integrator::{NeuronIntegrator, NeuronParams, NeuronState};

/// Errors produced while constructing neural components
#[derive(Debug, Clone, thiserror::Error)]
pub enum NeuralError {
    #[error("invalid neuron parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = core::result::Result<T, NeuralError>;
