//! End-to-end routing through the in-process host.

use seq_switch::{
    dsp::{ClockSource, Oscillator},
    module::ParamState,
    router::{CLOCK_INPUT, RESET_INPUT, SIGNAL_INPUT, STEPS_PARAM, STEP_LIGHTS, STEP_OUTPUTS},
    ModuleHost, StepRouter, NUM_LANES,
};

const SAMPLE_RATE: f32 = 1_000.0;

fn router_host() -> ModuleHost<StepRouter> {
    let mut host = ModuleHost::new(StepRouter::new(), SAMPLE_RATE);
    // Let both triggers see a low voltage once.
    host.step();
    host
}

fn pulse(host: &mut ModuleHost<StepRouter>, input: usize) {
    host.set_input(input, 10.0);
    host.step();
    host.set_input(input, 0.0);
    host.step();
}

fn lit_lanes(host: &ModuleHost<StepRouter>) -> Vec<usize> {
    (0..NUM_LANES)
        .filter(|&lane| host.light(STEP_LIGHTS + lane) > 0.0)
        .collect()
}

#[test]
fn defaults_to_eight_steps() {
    let host = router_host();
    assert_eq!(host.param(STEPS_PARAM), 8.0);
    assert_eq!(host.outputs().len(), NUM_LANES);
    assert_eq!(host.lights().len(), NUM_LANES);
}

#[test]
fn walks_all_eight_lanes_and_wraps() {
    let mut host = router_host();
    host.set_input(SIGNAL_INPUT, 2.0);

    let mut visited = Vec::new();
    for _ in 0..9 {
        pulse(&mut host, CLOCK_INPUT);
        visited.push(lit_lanes(&host));
    }

    let expected: Vec<Vec<usize>> = [1, 2, 3, 4, 5, 6, 7, 0, 1]
        .iter()
        .map(|&lane| vec![lane])
        .collect();
    assert_eq!(visited, expected);
    assert_eq!(host.output(STEP_OUTPUTS + 1), 2.0);
}

#[test]
fn knob_is_clamped_by_host() {
    let mut host = router_host();

    host.set_param(STEPS_PARAM, 0.0);
    assert_eq!(host.param(STEPS_PARAM), 1.0);

    host.set_param(STEPS_PARAM, 3.7);
    assert_eq!(host.param(STEPS_PARAM), 4.0);

    host.set_param(STEPS_PARAM, 20.0);
    assert_eq!(host.param(STEPS_PARAM), 8.0);
}

#[test]
fn reset_input_returns_to_first_lane() {
    let mut host = router_host();
    host.set_param(STEPS_PARAM, 4.0);
    pulse(&mut host, CLOCK_INPUT);
    pulse(&mut host, CLOCK_INPUT);
    assert_eq!(lit_lanes(&host), vec![2]);

    pulse(&mut host, RESET_INPUT);
    assert_eq!(lit_lanes(&host), vec![0]);
    assert_eq!(host.module().current_step(), 0);
}

#[test]
fn oscillator_is_passed_through_verbatim() {
    let mut host = router_host();
    pulse(&mut host, CLOCK_INPUT);
    pulse(&mut host, CLOCK_INPUT);

    let mut osc = Oscillator::saw(50.0);
    for _ in 0..200 {
        let v = osc.next_sample(SAMPLE_RATE);
        host.set_input(SIGNAL_INPUT, v);
        host.step();

        for lane in 0..NUM_LANES {
            let expected = if lane == 2 { v } else { 0.0 };
            assert_eq!(host.output(STEP_OUTPUTS + lane), expected);
        }
    }
}

#[test]
fn clock_source_drives_one_step_per_beat() {
    // 120 BPM at 1 kHz: a beat every 500 samples. The clock starts high, so
    // the first beat is swallowed by the trigger's initial state.
    let mut host = ModuleHost::new(StepRouter::new(), SAMPLE_RATE);
    host.set_param(STEPS_PARAM, 3.0);
    let mut clock = ClockSource::new(120.0, 0.5);

    let mut history = Vec::new();
    for beat in 0..7 {
        for _ in 0..500 {
            host.set_input(CLOCK_INPUT, clock.next_sample(SAMPLE_RATE));
            host.step();
        }
        // Read at the end of each beat, before the next edge.
        if beat > 0 {
            history.push(host.module().current_step());
        }
    }

    assert_eq!(history, vec![1, 2, 0, 1, 2, 0]);
}

#[test]
fn audio_block_needs_a_dense_pulse_train_to_step() {
    // At 48 kHz even the fastest ClockSource (999 BPM) has a period of
    // ~2883 samples, so a 512-sample block routes to lane 0 throughout.
    let mut host = ModuleHost::new(StepRouter::new(), 48_000.0);
    let mut clock = ClockSource::new(ClockSource::MAX_BPM, 0.5);
    for _ in 0..512 {
        host.set_input(CLOCK_INPUT, clock.next_sample(48_000.0));
        host.step();
    }
    assert_eq!(host.module().current_step(), 0);

    // A pulse every 16 samples steps four times in a 64-sample block.
    let mut host = ModuleHost::new(StepRouter::new(), 48_000.0);
    for i in 0..64 {
        host.set_input(CLOCK_INPUT, if i % 16 < 8 { 10.0 } else { 0.0 });
        host.step();
    }
    assert_eq!(host.module().current_step(), 3);
}

#[test]
fn initialize_resets_step_and_knob() {
    let mut host = router_host();
    host.set_param(STEPS_PARAM, 5.0);
    pulse(&mut host, CLOCK_INPUT);
    pulse(&mut host, CLOCK_INPUT);

    host.initialize();
    assert_eq!(host.param(STEPS_PARAM), 8.0);
    assert_eq!(host.module().current_step(), 0);
}

#[test]
fn save_and_load_keep_only_params() {
    let mut host = router_host();
    host.set_param(STEPS_PARAM, 5.0);
    pulse(&mut host, CLOCK_INPUT);
    let saved = host.save();
    assert_eq!(
        saved,
        ParamState {
            slug: "SeqSwitch".to_string(),
            params: vec![5.0],
        }
    );

    let mut restored = router_host();
    restored.load(&saved);
    assert_eq!(restored.param(STEPS_PARAM), 5.0);
    assert_eq!(restored.module().current_step(), 0);
}

#[cfg(feature = "serde")]
#[test]
fn param_state_serializes_to_json() {
    let mut host = router_host();
    host.set_param(STEPS_PARAM, 6.0);

    let json = serde_json::to_string(&host.save()).unwrap();
    assert_eq!(json, r#"{"slug":"SeqSwitch","params":[6.0]}"#);

    let state: ParamState = serde_json::from_str(r#"{"slug":"SeqSwitch","params":[11.0]}"#).unwrap();
    host.load(&state);
    assert_eq!(host.param(STEPS_PARAM), 8.0);
}
