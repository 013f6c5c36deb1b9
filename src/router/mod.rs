use crate::{
    dsp::trigger::SchmittTrigger,
    module::{Frame, Module, ModuleInfo, ProcessArgs},
    NUM_LANES,
};

/// Port, param and light ids.
pub mod ports;

pub use ports::*;

/*
Step Router (Sequential Switch)
===============================

One input, eight outputs. Each clock pulse moves the input to the next
output; a reset pulse sends it back to the first. Patch a drum loop in and the
eight outputs become eight rhythmic slices; patch a pitch CV in and each
output gets every Nth note.

Vocabulary
----------

  lane        One output jack plus the light next to it, indexed 0..8.

  step        The lane currently carrying the signal (`current_step`).

  steps (n)   How many lanes are in the cycle, from the STEPS knob (1..8).
              With n = 4 the signal visits lanes 0, 1, 2, 3, 0, ...

  edge        A rising edge on CLOCK or RESET, as reported by a
              Schmitt trigger (see `dsp/trigger.rs`).


The State Machine
-----------------

    reset edge ──────────────┐
                             ↓
    ┌───┐ clock ┌───┐ clock ┌───┐       ┌─────┐
    │ 0 │ ────→ │ 1 │ ────→ │ 2 │ ... → │ n-1 │
    └───┘       └───┘       └───┘       └─────┘
      ↑                                    │
      └──────────────── clock ─────────────┘

One tick, in order:

  1. n = trunc(steps knob)
  2. reset edge?  step = 0
  3. clock edge?  step += 1, and if step >= n, step = 0
  4. lane == step gets the signal and a lit light; every other lane gets
     exactly 0.0 and a dark light

Reset is handled before clock, so a reset and a clock landing on the same
sample put the router on step 1 (when n > 1), not step 0. The clock edge
is "on top of" the reset.

Wrapping uses compare-and-reset instead of `%`, so a host that hands us n = 0
gets a router stuck on step 0 rather than a panic.


Shrinking the Cycle
-------------------

Turning the knob down below the current step does not move the step. The
stale lane keeps routing the signal until the next clock edge wraps it back
into the cycle. Only a step past the last lane (an unclamped n > 8) leaves
every lane dark.
*/

/// Everything the router reads in one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterInput {
    pub signal: f32,
    pub clock: f32,
    pub reset: f32,
    /// Raw STEPS control, already clamped to 1..=8 by the host.
    pub steps: f32,
}

/// Everything the router writes in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouterOutput {
    pub lanes: [f32; NUM_LANES],
    pub lights: [f32; NUM_LANES],
}

impl RouterOutput {
    /// Index of the lit lane, if any.
    pub fn active_lane(&self) -> Option<usize> {
        self.lights.iter().position(|&b| b > 0.0)
    }
}

pub struct StepRouter {
    current_step: usize,
    clock_trigger: SchmittTrigger,
    reset_trigger: SchmittTrigger,
}

impl StepRouter {
    pub fn new() -> Self {
        Self {
            current_step: 0,
            clock_trigger: SchmittTrigger::new(),
            reset_trigger: SchmittTrigger::new(),
        }
    }

    /// Advance the state machine by one tick and route the signal.
    #[inline]
    pub fn advance_and_route(&mut self, input: &RouterInput, out: &mut RouterOutput) {
        // `as` saturates: negative and NaN become 0.
        let num_steps = input.steps as usize;

        if self.reset_trigger.process(input.reset) {
            self.current_step = 0;
        }

        if self.clock_trigger.process(input.clock) {
            self.current_step += 1;
            if self.current_step >= num_steps {
                self.current_step = 0;
            }
        }

        for lane in 0..NUM_LANES {
            if lane == self.current_step {
                out.lanes[lane] = input.signal;
                out.lights[lane] = 1.0;
            } else {
                out.lanes[lane] = 0.0;
                out.lights[lane] = 0.0;
            }
        }
    }

    /// The lane the next tick will route to, absent new edges.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Back to step 0 with both triggers disarmed.
    pub fn reset(&mut self) {
        self.current_step = 0;
        self.clock_trigger.reset();
        self.reset_trigger.reset();
    }
}

impl Default for StepRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for StepRouter {
    fn info(&self) -> &'static ModuleInfo {
        &SEQ_SWITCH
    }

    fn process(&mut self, _args: &ProcessArgs, frame: &mut Frame<'_>) {
        let input = RouterInput {
            signal: frame.inputs[SIGNAL_INPUT],
            clock: frame.inputs[CLOCK_INPUT],
            reset: frame.inputs[RESET_INPUT],
            steps: frame.params[STEPS_PARAM],
        };
        let mut out = RouterOutput::default();
        self.advance_and_route(&input, &mut out);

        frame.outputs[STEP_OUTPUTS..STEP_OUTPUTS + NUM_LANES].copy_from_slice(&out.lanes);
        frame.lights[STEP_LIGHTS..STEP_LIGHTS + NUM_LANES].copy_from_slice(&out.lights);
    }

    fn on_reset(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGH: f32 = 10.0;

    /// Router with both triggers armed (inputs seen low once).
    fn armed_router() -> StepRouter {
        let mut router = StepRouter::new();
        let mut out = RouterOutput::default();
        router.advance_and_route(&RouterInput { steps: 8.0, ..Default::default() }, &mut out);
        router
    }

    fn tick(router: &mut StepRouter, clock: f32, reset: f32, steps: f32) -> RouterOutput {
        let mut out = RouterOutput::default();
        let input = RouterInput {
            signal: 1.5,
            clock,
            reset,
            steps,
        };
        router.advance_and_route(&input, &mut out);
        out
    }

    /// One full clock pulse: high for a tick, then low.
    fn pulse(router: &mut StepRouter, steps: f32) -> usize {
        tick(router, HIGH, 0.0, steps);
        tick(router, 0.0, 0.0, steps);
        router.current_step()
    }

    #[test]
    fn starts_on_first_lane() {
        let mut router = StepRouter::new();
        let out = tick(&mut router, 0.0, 0.0, 8.0);

        assert_eq!(router.current_step(), 0);
        assert_eq!(out.active_lane(), Some(0));
        assert_eq!(out.lanes[0], 1.5);
    }

    #[test]
    fn routes_signal_to_exactly_one_lane() {
        let mut router = armed_router();
        pulse(&mut router, 8.0);
        pulse(&mut router, 8.0);
        let out = tick(&mut router, 0.0, 0.0, 8.0);

        for lane in 0..NUM_LANES {
            if lane == 2 {
                assert_eq!(out.lanes[lane], 1.5);
                assert_eq!(out.lights[lane], 1.0);
            } else {
                assert_eq!(out.lanes[lane], 0.0);
                assert_eq!(out.lights[lane], 0.0);
            }
        }
    }

    #[test]
    fn signal_is_not_clamped() {
        let mut router = armed_router();
        let mut out = RouterOutput::default();
        let input = RouterInput {
            signal: -42.0,
            steps: 8.0,
            ..Default::default()
        };
        router.advance_and_route(&input, &mut out);

        assert_eq!(out.lanes[0], -42.0);
    }

    #[test]
    fn four_steps_wrap_on_fourth_clock() {
        let mut router = armed_router();
        assert_eq!(router.current_step(), 0);

        tick(&mut router, 0.0, HIGH, 4.0);
        tick(&mut router, 0.0, 0.0, 4.0);
        assert_eq!(router.current_step(), 0);

        let steps: Vec<usize> = (0..4).map(|_| pulse(&mut router, 4.0)).collect();
        assert_eq!(steps, vec![1, 2, 3, 0]);
    }

    #[test]
    fn single_step_always_wraps_to_zero() {
        let mut router = armed_router();
        for _ in 0..5 {
            assert_eq!(pulse(&mut router, 1.0), 0);
        }
    }

    #[test]
    fn reset_wins_then_clock_applies_on_same_tick() {
        let mut router = armed_router();
        pulse(&mut router, 8.0);
        pulse(&mut router, 8.0);
        pulse(&mut router, 8.0);
        assert_eq!(router.current_step(), 3);

        let out = tick(&mut router, HIGH, HIGH, 8.0);
        assert_eq!(router.current_step(), 1);
        assert_eq!(out.active_lane(), Some(1));
    }

    #[test]
    fn same_tick_reset_and_clock_with_one_step() {
        let mut router = armed_router();
        tick(&mut router, HIGH, HIGH, 1.0);
        assert_eq!(router.current_step(), 0);
    }

    #[test]
    fn held_voltages_do_not_advance() {
        let mut router = armed_router();
        for _ in 0..100 {
            tick(&mut router, HIGH, 0.0, 8.0);
        }
        assert_eq!(router.current_step(), 1);

        for _ in 0..100 {
            tick(&mut router, HIGH, HIGH, 8.0);
        }
        assert_eq!(router.current_step(), 0);
    }

    #[test]
    fn steps_control_is_truncated() {
        let mut router = armed_router();
        // 2.9 truncates to 2: 0 → 1 → 0
        assert_eq!(pulse(&mut router, 2.9), 1);
        assert_eq!(pulse(&mut router, 2.9), 0);
    }

    #[test]
    fn shrinking_steps_keeps_stale_lane_until_next_clock() {
        let mut router = armed_router();
        for _ in 0..5 {
            pulse(&mut router, 8.0);
        }
        assert_eq!(router.current_step(), 5);

        // Knob turned down to 3: step 5 is outside the cycle but still routes.
        let out = tick(&mut router, 0.0, 0.0, 3.0);
        assert_eq!(router.current_step(), 5);
        assert_eq!(out.active_lane(), Some(5));
        assert_eq!(out.lanes[5], 1.5);
        assert!(out
            .lanes
            .iter()
            .enumerate()
            .all(|(lane, &v)| lane == 5 || v == 0.0));

        // Next clock wraps back into range.
        assert_eq!(pulse(&mut router, 3.0), 0);
    }

    #[test]
    fn step_past_last_lane_leaves_every_lane_dark() {
        let mut router = armed_router();
        // Unclamped host: n = 12 lets the step run past lane 7.
        for _ in 0..8 {
            pulse(&mut router, 12.0);
        }
        assert_eq!(router.current_step(), 8);

        let out = tick(&mut router, 0.0, 0.0, 12.0);
        assert_eq!(out.active_lane(), None);
        assert!(out.lanes.iter().all(|&v| v == 0.0));
        assert!(out.lights.iter().all(|&b| b == 0.0));
    }

    #[test]
    fn zero_steps_degrades_to_first_lane() {
        let mut router = armed_router();
        assert_eq!(pulse(&mut router, 0.0), 0);
        assert_eq!(pulse(&mut router, -3.0), 0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut router = armed_router();
        pulse(&mut router, 8.0);
        pulse(&mut router, 8.0);

        router.reset();
        assert_eq!(router.current_step(), 0);

        // Triggers are back in their initial (high) state: a held clock is ignored.
        tick(&mut router, HIGH, 0.0, 8.0);
        assert_eq!(router.current_step(), 0);
    }
}
