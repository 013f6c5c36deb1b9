pub mod dsp; // Triggers and signal sources
pub mod module; // Host-facing module seam and harness
pub mod router; // The eight-way sequential switch

pub use module::{Frame, Module, ModuleHost, ModuleInfo, ProcessArgs};
pub use router::StepRouter;

/// Number of output lanes (and indicator lights) on the router.
pub const NUM_LANES: usize = 8;

/// Voltage emitted by gate and pulse sources when high.
pub const GATE_VOLTAGE: f32 = 10.0;
