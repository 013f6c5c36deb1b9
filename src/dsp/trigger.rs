/*
Schmitt Trigger
===============

Turns a continuous control voltage into discrete "something happened" events.
Clock and reset jacks carry gates or short pulses, but a cable is still just a
voltage: it can be slow, noisy, or overshoot. A naive `v > threshold` check
chatters when the voltage hovers around the threshold and fires a burst of
events instead of one.

Vocabulary
----------

  high threshold  Voltage at or above which a LOW trigger flips HIGH and
                  reports an event (1.0 V by default).

  low threshold   Voltage at or below which a HIGH trigger flips back LOW and
                  re-arms (0.0 V by default).

  hysteresis      The dead band between the two thresholds. Inside it the
                  trigger keeps whatever state it already had.


The Shape
---------

  Volts
   10 ┐   ┌──────┐        ┌─╮╭─╮╭──┐
      │   │      │        │ ╰╯ ╰╯  │      wobble stays above LOW:
  1.0 ┼ ─ ┼ ─ ─ ─┼─ ─ ─ ─ ┼ ─ ─ ─ ─┼ ─    no re-arm, no second event
      │   │      │        │        │
  0.0 ┼───┘      └────────┘        └───
          ▲                 ▲
        event             event


Initial State
-------------

A new trigger starts HIGH. A voltage that is already high when the module is
created (a gate held on while a patch loads) must go low once before it can
fire, so loading a patch never advances a sequence by itself.
*/

/// Rising-edge detector with hysteresis.
#[derive(Debug, Clone, Copy)]
pub struct SchmittTrigger {
    low: f32,
    high: f32,
    state: bool,
}

impl SchmittTrigger {
    pub const DEFAULT_LOW: f32 = 0.0;
    pub const DEFAULT_HIGH: f32 = 1.0;

    pub fn new() -> Self {
        Self::with_thresholds(Self::DEFAULT_LOW, Self::DEFAULT_HIGH)
    }

    /// Build a trigger with custom thresholds.
    ///
    /// `low` must be below `high`, otherwise the dead band collapses and the
    /// trigger behaves like a plain comparator.
    pub fn with_thresholds(low: f32, high: f32) -> Self {
        debug_assert!(low < high, "low threshold must be below high threshold");
        Self {
            low,
            high,
            state: true,
        }
    }

    /// Feed one sample. Returns true on the sample the trigger flips LOW → HIGH.
    #[inline]
    pub fn process(&mut self, voltage: f32) -> bool {
        if self.state {
            if voltage <= self.low {
                self.state = false;
            }
            false
        } else if voltage >= self.high {
            self.state = true;
            true
        } else {
            false
        }
    }

    /// Latched state: true between a rising edge and the next re-arm.
    pub fn is_high(&self) -> bool {
        self.state
    }

    /// Back to the initial (HIGH) state.
    pub fn reset(&mut self) {
        self.state = true;
    }
}

impl Default for SchmittTrigger {
    fn default() -> Self {
        Self::new()
    }
}
