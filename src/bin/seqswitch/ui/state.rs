//! Shared state types for UI communication
//!
//! Designed for real-time safety: static data is sent once at init,
//! dynamic updates are allocation-free.

use seq_switch::NUM_LANES;

/// Commands sent from UI thread to audio thread
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlMessage {
    /// Fire a pulse into the RESET jack
    Reset,
    /// Fire a pulse into the CLOCK jack
    Clock,
    /// Turn the STEPS knob to this value (host clamps it)
    SetSteps(u8),
    /// Send this lane (0-based) to the speakers
    MonitorLane(usize),
    /// Start/stop the internal clock
    ToggleClock,
}

/// Static state known before the stream starts
#[derive(Clone, Debug)]
pub struct UiStateInit {
    /// Tempo in BPM
    pub bpm: f64,
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Output lane names, from the module description
    pub lane_names: &'static [&'static str],
}

/// Dynamic state update sent from audio thread (allocation-free, Copy)
#[derive(Clone, Copy, Debug)]
pub struct UiStateUpdate {
    /// Step the router is on. May exceed `steps` after the knob is turned
    /// down; that lane keeps carrying the signal until the next clock edge.
    pub current_step: u8,
    /// Current STEPS knob value
    pub steps: u8,
    /// Light brightness per lane (0.0-1.0)
    pub lights: [f32; NUM_LANES],
    /// Lane being monitored (0-based)
    pub monitor: u8,
    /// Whether the internal clock is running
    pub clock_running: bool,
}

impl UiStateInit {
    /// Create initial UI state
    pub fn new(bpm: f64, sample_rate: f32, lane_names: &'static [&'static str]) -> Self {
        Self {
            bpm,
            sample_rate,
            lane_names,
        }
    }
}

impl UiStateUpdate {
    /// Create a new update with default values
    pub fn new(steps: u8, monitor: u8) -> Self {
        let mut lights = [0.0; NUM_LANES];
        lights[0] = 1.0;
        Self {
            current_step: 0,
            steps,
            lights,
            monitor,
            clock_running: true,
        }
    }

    /// Knob value after one detent up or down, kept within 1..=8
    pub fn nudged_steps(&self, up: bool) -> u8 {
        if up {
            (self.steps + 1).min(NUM_LANES as u8)
        } else {
            self.steps.saturating_sub(1).max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudged_steps_stays_in_range() {
        let mut state = UiStateUpdate::new(8, 0);
        assert_eq!(state.nudged_steps(true), 8);
        assert_eq!(state.nudged_steps(false), 7);

        state.steps = 1;
        assert_eq!(state.nudged_steps(false), 1);
        assert_eq!(state.nudged_steps(true), 2);
    }

    #[test]
    fn initial_update_lights_first_lane() {
        let state = UiStateUpdate::new(4, 2);
        assert_eq!(state.lights[0], 1.0);
        assert!(state.lights[1..].iter().all(|&b| b == 0.0));
        assert_eq!(state.monitor, 2);
    }
}
