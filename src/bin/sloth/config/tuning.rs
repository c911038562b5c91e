use sloth::config::AutoConfig;
use sloth::controller::pid_params::TuningParams;
use sloth::controller::steps::StepPlan;

// outputs are percent motor power
pub const ANGLE_PID: TuningParams = TuningParams::new(1.2, 0.0, 0.05, 40.0);
pub const DISTANCE_PID: TuningParams = TuningParams::new(90.0, 0.5, 0.0, 60.0);
pub const WHEEL_RATE_PID: TuningParams = TuningParams::new(20.0, 0.8, 0.0, 30.0);

// metres and degrees
pub const PLAN: StepPlan = StepPlan {
    step_zero_distance: 1.0,
    step_one_angle: 7.0,
    step_two_distance: 0.8,
};

pub const DISTANCE_TOLERANCE_M: f32 = 0.02;
pub const YAW_TOLERANCE_DEG: f32 = 2.0;
// control ticks, 200 ms at 50 Hz
pub const STEADY_STATE_NUM_SAMPLES: u32 = 10;

pub const ARM_LOWERED_POWER: f32 = -30.0;
pub const OUTTAKE_POWER: f32 = -80.0;
pub const OUTTAKE_TICKS: u32 = 100;

pub fn auto_config() -> AutoConfig {
    AutoConfig {
        angle: ANGLE_PID,
        distance: DISTANCE_PID,
        wheel: WHEEL_RATE_PID,
        plan: PLAN,
        heading_min_deg: -180.0,
        heading_max_deg: 180.0,
        distance_tolerance: DISTANCE_TOLERANCE_M,
        angle_tolerance_deg: YAW_TOLERANCE_DEG,
        settle_ticks: STEADY_STATE_NUM_SAMPLES,
        arm_lowered_power: ARM_LOWERED_POWER,
        outtake_power: OUTTAKE_POWER,
        outtake_ticks: OUTTAKE_TICKS,
    }
}
