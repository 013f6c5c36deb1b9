//! ModuleHost - drive one module sample by sample
//!
//! Owns the port buffers a real host would own. Buffers are sized from the
//! module's [`ModuleInfo`] once, at construction; `step` never allocates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Frame, Module, ModuleInfo, ProcessArgs};

/// Saved parameter values, the only thing a host persists for a module.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ParamState {
    pub slug: String,
    pub params: Vec<f32>,
}

pub struct ModuleHost<M: Module> {
    module: M,
    info: &'static ModuleInfo,
    args: ProcessArgs,
    params: Vec<f32>,
    inputs: Vec<f32>,
    outputs: Vec<f32>,
    lights: Vec<f32>,
}

impl<M: Module> ModuleHost<M> {
    pub fn new(module: M, sample_rate: f32) -> Self {
        let info = module.info();
        tracing::debug!(
            slug = info.slug,
            params = info.params.len(),
            inputs = info.inputs.len(),
            outputs = info.outputs.len(),
            sample_rate,
            "hosting module"
        );

        Self {
            module,
            info,
            args: ProcessArgs::new(sample_rate),
            params: info.params.iter().map(|p| p.default).collect(),
            inputs: vec![0.0; info.inputs.len()],
            outputs: vec![0.0; info.outputs.len()],
            lights: vec![0.0; info.lights.len()],
        }
    }

    /// Run one tick.
    #[inline]
    pub fn step(&mut self) {
        let mut frame = Frame {
            params: &self.params,
            inputs: &self.inputs,
            outputs: &mut self.outputs,
            lights: &mut self.lights,
        };
        self.module.process(&self.args, &mut frame);
        self.args.frame += 1;
    }

    /// Store a param value, clamped (and snapped) by its [`ParamInfo`](super::ParamInfo).
    pub fn set_param(&mut self, id: usize, value: f32) {
        self.params[id] = self.info.params[id].quantize(value);
    }

    pub fn param(&self, id: usize) -> f32 {
        self.params[id]
    }

    pub fn set_input(&mut self, id: usize, voltage: f32) {
        self.inputs[id] = voltage;
    }

    pub fn output(&self, id: usize) -> f32 {
        self.outputs[id]
    }

    pub fn outputs(&self) -> &[f32] {
        &self.outputs
    }

    pub fn light(&self, id: usize) -> f32 {
        self.lights[id]
    }

    pub fn lights(&self) -> &[f32] {
        &self.lights
    }

    pub fn module(&self) -> &M {
        &self.module
    }

    /// Ticks processed so far.
    pub fn frame(&self) -> u64 {
        self.args.frame
    }

    /// Params back to their defaults and module state cleared.
    pub fn initialize(&mut self) {
        for (value, info) in self.params.iter_mut().zip(self.info.params) {
            *value = info.default;
        }
        self.module.on_reset();
    }

    pub fn save(&self) -> ParamState {
        ParamState {
            slug: self.info.slug.to_string(),
            params: self.params.clone(),
        }
    }

    /// Restore saved params. Values are re-quantized; missing ones keep their
    /// current value, extra ones are dropped. A state saved from a different
    /// module is ignored.
    pub fn load(&mut self, state: &ParamState) {
        if state.slug != self.info.slug {
            tracing::warn!(
                expected = self.info.slug,
                found = %state.slug,
                "ignoring params saved for another module"
            );
            return;
        }
        if state.params.len() != self.params.len() {
            tracing::debug!(
                saved = state.params.len(),
                expected = self.params.len(),
                "param count mismatch"
            );
        }

        for ((value, info), &saved) in self
            .params
            .iter_mut()
            .zip(self.info.params)
            .zip(&state.params)
        {
            *value = info.quantize(saved);
        }
    }
}
