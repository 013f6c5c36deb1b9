//! Low-level signal primitives.
//!
//! Everything here is allocation-free and realtime-safe, so the pieces can sit
//! directly inside a module struct and be ticked from the audio callback.

/// Tempo-driven gate generator for CLOCK inputs.
pub mod clock;
/// Test-signal oscillators.
pub mod oscillator;
/// Rising-edge detection with hysteresis.
pub mod trigger;

pub use clock::ClockSource;
pub use oscillator::{Oscillator, Waveform};
pub use trigger::SchmittTrigger;
