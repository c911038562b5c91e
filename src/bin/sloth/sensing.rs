use crate::app::{monotonics, sample_sensors, Imu};
use crate::config::sys_config;
use systick_monotonic::fugit::Duration;

// Blocking. Averages the yaw rate at rest; None if the IMU stops answering.
pub fn measure_gyro_bias(imu: &mut Imu) -> Option<f32> {
    let mut sum: f32 = 0.0;
    let mut num_samples: u32 = 0;
    let mut polls: u32 = 0;
    while num_samples < sys_config::IMU_BIAS_SAMPLES {
        polls += 1;
        if polls > sys_config::IMU_MAX_POLLS {
            return None;
        }
        if !imu.data_ready().unwrap_or(false) {
            continue;
        }
        if let Ok(rate) = imu.read_gyro_z() {
            sum += rate;
            num_samples += 1;
        }
    }
    Some(sum / num_samples as f32)
}

pub fn sample_sensors(cx: sample_sensors::Context) {
    let task_start_ticks: u64 = monotonics::now().ticks();
    let curtime = task_start_ticks as f32 * sys_config::SECONDS_PER_TICK;
    let deltat: f32 = (task_start_ticks - *cx.local.sample_prev_ticks) as f32
        * sys_config::SECONDS_PER_TICK;

    let left = cx.local.encoder_left.sample(curtime);
    let right = cx.local.encoder_right.sample(curtime);
    crate::LEFT_WHEEL.publish(left.distance, left.rate);
    crate::RIGHT_WHEEL.publish(right.distance, right.rate);

    // first run only sets the time base
    if *cx.local.sample_prev_ticks != 0 && cx.local.imu.data_ready().unwrap_or(false) {
        if let Ok(rate) = cx.local.imu.read_gyro_z() {
            let (heading, rate) = cx.local.heading.update(rate, deltat);
            crate::HEADING.publish(heading, rate);
        }
    }

    *cx.local.sample_prev_ticks = task_start_ticks;

    // run at 100 Hz
    sample_sensors::spawn_after(Duration::<u64, 1, 1000>::millis(
        sys_config::SAMPLE_PERIOD_MS,
    ))
    .unwrap();
}
