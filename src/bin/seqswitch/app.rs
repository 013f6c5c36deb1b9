//! Session - builder, audio engine and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use super::ui::{ControlMessage, UiApp, UiStateInit, UiStateUpdate, VIS_BUFFER_SIZE};

use seq_switch::{
    dsp::{ClockSource, Oscillator, Waveform},
    router::{CLOCK_INPUT, RESET_INPUT, SEQ_SWITCH, SIGNAL_INPUT, STEPS_PARAM, STEP_LIGHTS, STEP_OUTPUTS},
    ModuleHost, StepRouter, GATE_VOLTAGE, NUM_LANES,
};

/// Capacity in blocks for the audio→UI scope ring
const AUDIO_RING_BLOCKS: usize = 16;
/// Manual pulses stay high this long so the trigger sees a clean edge
const MANUAL_PULSE_SECONDS: f32 = 0.001;
/// Speaker level for the monitored lane
const OUTPUT_GAIN: f32 = 0.3;

/// Main application builder
pub struct Session {
    bpm: f64,
    steps: u8,
    monitor: usize,
    waveform: Waveform,
    frequency: f32,
    gate: f64,
}

impl Session {
    /// Create a new session with an eight-step cycle at 120 BPM
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            steps: NUM_LANES as u8,
            monitor: 0,
            waveform: Waveform::Saw,
            frequency: 220.0,
            gate: 0.5,
        }
    }

    /// Set the internal clock tempo in beats per minute
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Set the STEPS knob
    pub fn steps(mut self, steps: u8) -> Self {
        self.steps = steps;
        self
    }

    /// Choose which output lane (0-based) reaches the speakers
    pub fn monitor_lane(mut self, lane: usize) -> Self {
        self.monitor = lane.min(NUM_LANES - 1);
        self
    }

    /// Set the routed test signal
    pub fn signal(mut self, waveform: Waveform, frequency: f32) -> Self {
        self.waveform = waveform;
        self.frequency = frequency;
        self
    }

    /// Set the clock gate fraction
    pub fn gate(mut self, gate: f64) -> Self {
        self.gate = gate;
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        tracing::info!(
            device = %device_name,
            sample_rate,
            channels,
            "audio config"
        );
        tracing::info!(
            bpm = self.bpm,
            steps = self.steps,
            monitor = self.monitor + 1,
            waveform = ?self.waveform,
            frequency = self.frequency,
            "session"
        );

        // --- Cross-thread rings ---
        let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(64);
        let (state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(64);
        let (audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * AUDIO_RING_BLOCKS);

        let init = UiStateInit::new(self.bpm, sample_rate, SEQ_SWITCH.outputs);
        let initial_state = UiStateUpdate::new(self.steps, self.monitor as u8);

        let mut engine = AudioEngine::new(&self, sample_rate, control_rx, state_tx, audio_tx);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| engine.render(data, channels),
                |err| tracing::error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let mut app = UiApp::new(audio_rx, state_rx, control_tx, init, initial_state);
        let res = app.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        tracing::info!("stopped");
        res
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything owned by the audio callback
struct AudioEngine {
    host: ModuleHost<StepRouter>,
    clock: ClockSource,
    osc: Oscillator,
    sample_rate: f32,
    clock_running: bool,
    monitor: usize,
    /// Samples left on the manual clock / reset pulses
    clock_pulse: u32,
    reset_pulse: u32,
    pulse_len: u32,
    control_rx: Consumer<ControlMessage>,
    state_tx: Producer<UiStateUpdate>,
    audio_tx: Producer<f32>,
}

impl AudioEngine {
    fn new(
        session: &Session,
        sample_rate: f32,
        control_rx: Consumer<ControlMessage>,
        state_tx: Producer<UiStateUpdate>,
        audio_tx: Producer<f32>,
    ) -> Self {
        let mut host = ModuleHost::new(StepRouter::new(), sample_rate);
        host.set_param(STEPS_PARAM, session.steps as f32);

        Self {
            host,
            clock: ClockSource::new(session.bpm, session.gate),
            osc: Oscillator::new(session.waveform, session.frequency),
            sample_rate,
            clock_running: true,
            monitor: session.monitor,
            clock_pulse: 0,
            reset_pulse: 0,
            pulse_len: ((MANUAL_PULSE_SECONDS * sample_rate) as u32).max(1),
            control_rx,
            state_tx,
            audio_tx,
        }
    }

    /// Apply every pending control message
    fn handle_messages(&mut self) {
        while let Ok(msg) = self.control_rx.pop() {
            match msg {
                ControlMessage::Reset => self.reset_pulse = self.pulse_len,
                ControlMessage::Clock => self.clock_pulse = self.pulse_len,
                ControlMessage::SetSteps(steps) => self.host.set_param(STEPS_PARAM, steps as f32),
                ControlMessage::MonitorLane(lane) => self.monitor = lane.min(NUM_LANES - 1),
                ControlMessage::ToggleClock => {
                    self.clock_running = !self.clock_running;
                    if self.clock_running {
                        self.clock.reset();
                    }
                }
            }
        }
    }

    /// Voltage for a manual pulse input, counting its remaining samples down
    fn pulse_voltage(remaining: &mut u32) -> f32 {
        if *remaining > 0 {
            *remaining -= 1;
            GATE_VOLTAGE
        } else {
            0.0
        }
    }

    /// Fill one interleaved device buffer
    fn render(&mut self, data: &mut [f32], channels: usize) {
        self.handle_messages();

        for frame in data.chunks_mut(channels) {
            let internal = if self.clock_running {
                self.clock.next_sample(self.sample_rate)
            } else {
                0.0
            };
            let manual = Self::pulse_voltage(&mut self.clock_pulse);
            let reset = Self::pulse_voltage(&mut self.reset_pulse);

            self.host.set_input(SIGNAL_INPUT, self.osc.next_sample(self.sample_rate));
            self.host.set_input(CLOCK_INPUT, internal.max(manual));
            self.host.set_input(RESET_INPUT, reset);
            self.host.step();

            let s = self.host.output(STEP_OUTPUTS + self.monitor);
            frame.fill(s * OUTPUT_GAIN);

            // Drop scope samples if the UI falls behind
            let _ = self.audio_tx.push(s);
        }

        self.publish_state();
    }

    /// Send the latest step and lights to the UI (non-blocking)
    fn publish_state(&mut self) {
        let mut lights = [0.0; NUM_LANES];
        for (lane, light) in lights.iter_mut().enumerate() {
            *light = self.host.light(STEP_LIGHTS + lane);
        }

        let update = UiStateUpdate {
            current_step: self.host.module().current_step().min(u8::MAX as usize) as u8,
            steps: self.host.param(STEPS_PARAM) as u8,
            lights,
            monitor: self.monitor as u8,
            clock_running: self.clock_running,
        };
        let _ = self.state_tx.push(update);
    }
}
