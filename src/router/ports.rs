//! Port and param ids for the step router, plus its panel description.

use crate::module::{ModuleInfo, ParamInfo};
use crate::NUM_LANES;

// Params
pub const STEPS_PARAM: usize = 0;
pub const PARAMS_LEN: usize = 1;

// Inputs
pub const SIGNAL_INPUT: usize = 0;
pub const CLOCK_INPUT: usize = 1;
pub const RESET_INPUT: usize = 2;
pub const INPUTS_LEN: usize = 3;

// Outputs: STEP_OUTPUTS + lane
pub const STEP_OUTPUTS: usize = 0;
pub const OUTPUTS_LEN: usize = STEP_OUTPUTS + NUM_LANES;

// Lights: STEP_LIGHTS + lane
pub const STEP_LIGHTS: usize = 0;
pub const LIGHTS_LEN: usize = STEP_LIGHTS + NUM_LANES;

pub const STEPS: ParamInfo = ParamInfo::new("Number of Steps", 1.0, 8.0, 8.0).snapped();

const PARAMS: [ParamInfo; PARAMS_LEN] = [STEPS];
const INPUTS: [&str; INPUTS_LEN] = ["Signal", "Clock", "Reset"];
const LANES: [&str; NUM_LANES] = [
    "Step 1", "Step 2", "Step 3", "Step 4", "Step 5", "Step 6", "Step 7", "Step 8",
];

pub static SEQ_SWITCH: ModuleInfo = ModuleInfo {
    slug: "SeqSwitch",
    name: "Seq Switch",
    params: &PARAMS,
    inputs: &INPUTS,
    outputs: &LANES,
    lights: &LANES,
};
