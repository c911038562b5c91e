//! Sensor capabilities consumed by the feedback loops.
//!
//! Sampling tasks publish into the `Shared*` readings with atomic stores; the
//! loops hold `&'static` references to them and read without locking.

use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorError {
    // no sample has been published yet
    NotReady,
    Calibration,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::NotReady => write!(f, "sensor has not produced a reading"),
            SensorError::Calibration => write!(f, "sensor calibration failed"),
        }
    }
}

/// Something a feedback loop can measure, either as an absolute value or as
/// a rate of change.
pub trait PidSource {
    fn displacement(&self) -> f32;
    fn rate(&self) -> f32;
}

impl<T: PidSource + ?Sized> PidSource for &T {
    fn displacement(&self) -> f32 {
        (**self).displacement()
    }

    fn rate(&self) -> f32 {
        (**self).rate()
    }
}

/// Heading source. `displacement` is the heading in degrees, `rate` the turn
/// rate in deg/s.
pub trait Gyro: PidSource {
    // blocking; must succeed before the heading is trusted
    fn calibrate(&self) -> Result<(), SensorError>;
}

impl<T: Gyro + ?Sized> Gyro for &T {
    fn calibrate(&self) -> Result<(), SensorError> {
        (**self).calibrate()
    }
}

/// `f32` stored as raw bits, so loads and stores never tear.
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub const fn zero() -> AtomicF32 {
        // 0.0f32 has an all-zero bit pattern
        AtomicF32(AtomicU32::new(0))
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, val: f32) {
        self.0.store(val.to_bits(), Ordering::Release)
    }
}

impl Default for AtomicF32 {
    fn default() -> AtomicF32 {
        AtomicF32::zero()
    }
}

/// Latest integrated heading, published by the IMU sampling task.
pub struct SharedHeading {
    heading: AtomicF32,
    rate: AtomicF32,
    zero: AtomicF32,
    ready: AtomicBool,
}

impl SharedHeading {
    pub const fn new() -> SharedHeading {
        SharedHeading {
            heading: AtomicF32::zero(),
            rate: AtomicF32::zero(),
            zero: AtomicF32::zero(),
            ready: AtomicBool::new(false),
        }
    }

    pub fn publish(&self, heading_deg: f32, rate_dps: f32) {
        self.heading.store(heading_deg);
        self.rate.store(rate_dps);
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl PidSource for SharedHeading {
    fn displacement(&self) -> f32 {
        self.heading.load() - self.zero.load()
    }

    fn rate(&self) -> f32 {
        self.rate.load()
    }
}

impl Gyro for SharedHeading {
    // the current heading becomes the zero reference
    fn calibrate(&self) -> Result<(), SensorError> {
        if !self.is_ready() {
            return Err(SensorError::NotReady);
        }
        let heading = self.heading.load();
        if !heading.is_finite() {
            return Err(SensorError::Calibration);
        }
        self.zero.store(heading);
        Ok(())
    }
}

/// Latest wheel travel and speed for one side of the drivetrain.
pub struct SharedWheel {
    distance: AtomicF32,
    rate: AtomicF32,
}

impl SharedWheel {
    pub const fn new() -> SharedWheel {
        SharedWheel {
            distance: AtomicF32::zero(),
            rate: AtomicF32::zero(),
        }
    }

    pub fn publish(&self, distance: f32, rate: f32) {
        self.distance.store(distance);
        self.rate.store(rate);
    }
}

impl PidSource for SharedWheel {
    fn displacement(&self) -> f32 {
        self.distance.load()
    }

    fn rate(&self) -> f32 {
        self.rate.load()
    }
}

/// Average of both wheels. Pivoting in place leaves it unchanged, so the
/// distance loop does not fight a turn.
pub struct MeanDistance<E> {
    left: E,
    right: E,
}

impl<E: PidSource> MeanDistance<E> {
    pub fn new(left: E, right: E) -> MeanDistance<E> {
        MeanDistance { left, right }
    }
}

impl<E: PidSource> PidSource for MeanDistance<E> {
    fn displacement(&self) -> f32 {
        0.5 * (self.left.displacement() + self.right.displacement())
    }

    fn rate(&self) -> f32 {
        0.5 * (self.left.rate() + self.right.rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibrate_needs_a_sample() {
        let heading = SharedHeading::new();
        assert_eq!(heading.calibrate(), Err(SensorError::NotReady));

        heading.publish(37.5, 1.0);
        assert_eq!(heading.calibrate(), Ok(()));
        assert_eq!(heading.displacement(), 0.0);

        heading.publish(40.0, 2.5);
        assert_eq!(heading.displacement(), 2.5);
        assert_eq!(heading.rate(), 2.5);
    }

    #[test]
    fn calibrate_rejects_garbage() {
        let heading = SharedHeading::new();
        heading.publish(f32::NAN, 0.0);
        assert_eq!(heading.calibrate(), Err(SensorError::Calibration));
    }

    #[test]
    fn mean_distance_ignores_pivot() {
        let left = SharedWheel::new();
        let right = SharedWheel::new();
        let mean = MeanDistance::new(&left, &right);

        left.publish(3.0, 1.5);
        right.publish(-3.0, -1.5);
        assert_eq!(mean.displacement(), 0.0);
        assert_eq!(mean.rate(), 0.0);

        right.publish(5.0, 0.5);
        assert_eq!(mean.displacement(), 4.0);
        assert_eq!(mean.rate(), 1.0);
    }

    #[test]
    fn atomic_f32_keeps_sign_and_fraction() {
        let cell = AtomicF32::zero();
        assert_eq!(cell.load(), 0.0);
        cell.store(-0.2);
        assert_eq!(cell.load(), -0.2);
    }
}
