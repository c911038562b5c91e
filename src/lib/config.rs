use crate::controller::pid_params::TuningParams;
use crate::controller::steps::StepPlan;

/// Everything the autonomous sequencer is built from.
#[derive(Clone, Copy, Debug)]
pub struct AutoConfig {
    pub angle: TuningParams,
    pub distance: TuningParams,
    // shared by both wheel rate loops
    pub wheel: TuningParams,
    pub plan: StepPlan,
    pub heading_min_deg: f32,
    pub heading_max_deg: f32,
    pub distance_tolerance: f32,
    pub angle_tolerance_deg: f32,
    // consecutive in-tolerance ticks before a step counts as finished
    pub settle_ticks: u32,
    pub arm_lowered_power: f32,
    pub outtake_power: f32,
    pub outtake_ticks: u32,
}

impl Default for AutoConfig {
    fn default() -> AutoConfig {
        AutoConfig {
            angle: TuningParams::new(0.1, 0.0, 0.0, 100.0),
            distance: TuningParams::new(0.1, 0.0, 0.0, 100.0),
            wheel: TuningParams::new(0.1, 0.0, 0.0, 100.0),
            plan: StepPlan {
                step_zero_distance: 10.0,
                step_one_angle: 7.0,
                step_two_distance: 8.0,
            },
            heading_min_deg: -180.0,
            heading_max_deg: 180.0,
            distance_tolerance: 0.25,
            angle_tolerance_deg: 2.0,
            settle_ticks: 10,
            arm_lowered_power: -30.0,
            outtake_power: -80.0,
            outtake_ticks: 50,
        }
    }
}
