use sloth::controller::motor::{Direction, SideDirections};

pub const SECONDS_PER_TICK: f32 = 0.001;

// task periods, ms
pub const SAMPLE_PERIOD_MS: u64 = 10;
pub const PID_PERIOD_MS: u64 = 5;
pub const AUTO_PERIOD_MS: u64 = 20;
// lets the heading settle before calibrating
pub const AUTO_START_DELAY_MS: u64 = 500;

// N20 with 7 PPR magnets, 4x decoding, 150:1 gearbox on a 32 mm wheel
pub const ENCODER_COUNTS_PER_REV: f32 = 7.0 * 4.0 * 150.0;
pub const WHEEL_CIRCUMFERENCE_M: f32 = 0.032 * core::f32::consts::PI;
pub const METERS_PER_COUNT: f32 = WHEEL_CIRCUMFERENCE_M / ENCODER_COUNTS_PER_REV;

pub const MOTOR_DIRECTIONS: SideDirections = SideDirections {
    left: Direction::Forward,
    right: Direction::Backward,
};

// ICM-20948 z axis points up, so raw yaw rate is positive counterclockwise.
// Headings are positive clockwise, matching a positive angle output driving
// the left side faster.
pub const GYRO_DIRECTION: Direction = Direction::Backward;

// samples averaged for the gyro bias at power up, robot must be still
pub const IMU_BIAS_SAMPLES: u32 = 500;
pub const IMU_MAX_POLLS: u32 = 1_000_000;
