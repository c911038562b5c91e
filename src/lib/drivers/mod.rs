pub mod encoder;
pub mod imu;
pub mod motor;
