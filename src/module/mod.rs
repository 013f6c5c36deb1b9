//! The seam between a module and the host that schedules it.
//!
//! A host owns the port buffers, calls [`Module::process`] once per sample and
//! reads back outputs and lights. [`ModuleHost`] is a small in-process host used
//! by the demo binary and by the tests.

/// In-process host: port buffers, param clamping, save/load.
pub mod host;
/// Static module, param and port descriptions.
pub mod info;

pub use host::{ModuleHost, ParamState};
pub use info::{ModuleInfo, ParamInfo};

/// Timing information for one tick.
#[derive(Debug, Clone, Copy)]
pub struct ProcessArgs {
    pub sample_rate: f32,
    /// Seconds per sample (1 / sample_rate).
    pub sample_time: f32,
    /// Ticks processed since the host started.
    pub frame: u64,
}

impl ProcessArgs {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            sample_time: 1.0 / sample_rate,
            frame: 0,
        }
    }
}

/// Port values for a single tick, indexed by the module's own id constants.
pub struct Frame<'a> {
    pub params: &'a [f32],
    pub inputs: &'a [f32],
    pub outputs: &'a mut [f32],
    pub lights: &'a mut [f32],
}

/// A unit the host can tick.
///
/// `process` runs on the realtime thread: it must not allocate, block or log.
pub trait Module: Send {
    fn info(&self) -> &'static ModuleInfo;

    /// Consume inputs and params, write every output and light.
    fn process(&mut self, args: &ProcessArgs, frame: &mut Frame<'_>);

    /// Host-initiated "initialize": drop any internal state.
    ///
    /// Default implementation does nothing (stateless modules).
    fn on_reset(&mut self) {
        // Default: do nothing
    }
}
