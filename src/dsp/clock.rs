use crate::GATE_VOLTAGE;

/*
Clock Source
============

A free-running gate generator: the kind of square clock a sequencer or a
dedicated clock module sends into a CLOCK jack.

The Math: Tempo to Phase Increment
----------------------------------

One beat is one full cycle of `phase` from 0.0 to 1.0:

    beats per second  = bpm / 60
    increment         = beats_per_second / sample_rate

Example: 120 BPM at 48 kHz
  - 2 beats per second
  - increment = 2 / 48000 ≈ 0.0000417
  - 24000 samples per beat

The gate is high while `phase < gate` (the gate fraction), so a gate of 0.5
is a 50% duty-cycle square and 0.1 a short pulse. The phase is kept in f64 so
long runs do not drift against the sample counter.
*/

pub struct ClockSource {
    bpm: f64,
    gate: f64, // fraction of the beat spent high, 0..1
    phase: f64,
}

impl ClockSource {
    pub const MIN_BPM: f64 = 1.0;
    pub const MAX_BPM: f64 = 999.0;

    pub fn new(bpm: f64, gate: f64) -> Self {
        Self {
            bpm: bpm.clamp(Self::MIN_BPM, Self::MAX_BPM),
            gate: gate.clamp(0.01, 0.99),
            phase: 0.0,
        }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = bpm.clamp(Self::MIN_BPM, Self::MAX_BPM);
    }

    /// Emit the gate voltage for this sample, then advance one sample.
    #[inline]
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let out = if self.phase < self.gate {
            GATE_VOLTAGE
        } else {
            0.0
        };

        self.phase += self.bpm / 60.0 / sample_rate as f64;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        out
    }

    /// Restart at the top of a beat.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
