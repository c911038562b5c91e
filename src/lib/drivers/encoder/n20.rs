use crate::filtering::sma::SmaFilter;
use embedded_hal::Qei;

const RATE_WINDOW: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelSample {
    pub distance: f32,
    pub rate: f32,
}

/// N20 gearmotor encoder on a 16-bit quadrature timer.
///
/// Distance accumulates across counter wrap; rate is a moving average of
/// distance per second between samples.
pub struct N20<X> {
    encoder: X,
    units_per_count: f32,
    prev_count: u16,
    prev_time: Option<f32>,
    distance: f32,
    rate: SmaFilter<f32, RATE_WINDOW>,
}

impl<X> N20<X>
where
    X: Qei<Count = u16>,
{
    pub fn new(qei: X, units_per_count: f32) -> Self {
        let prev_count = qei.count();
        Self {
            encoder: qei,
            units_per_count,
            prev_count,
            prev_time: None,
            distance: 0.0,
            rate: SmaFilter::new(),
        }
    }

    // curtime in seconds
    pub fn sample(&mut self, curtime: f32) -> WheelSample {
        let count = self.encoder.count();
        // the cast keeps the short way round when the counter wraps
        let delta = count.wrapping_sub(self.prev_count) as i16;
        self.prev_count = count;

        let travelled = delta as f32 * self.units_per_count;
        self.distance += travelled;

        if let Some(prev) = self.prev_time {
            let deltat = curtime - prev;
            if deltat > 0.0 {
                self.rate.insert(travelled / deltat);
            }
        }
        self.prev_time = Some(curtime);

        WheelSample {
            distance: self.distance,
            rate: self.rate.partial().unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal::Direction;

    struct FakeQei {
        count: Cell<u16>,
    }

    impl Qei for FakeQei {
        type Count = u16;

        fn count(&self) -> u16 {
            self.count.get()
        }

        fn direction(&self) -> Direction {
            Direction::Upcounting
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn counts_become_distance_and_rate() {
        let qei = FakeQei {
            count: Cell::new(100),
        };
        let mut encoder = N20::new(qei, 0.5);
        let first = encoder.sample(0.0);
        assert_eq!(first, WheelSample { distance: 0.0, rate: 0.0 });

        encoder.encoder.count.set(120);
        let s = encoder.sample(0.1);
        assert!(close(s.distance, 10.0));
        assert!(close(s.rate, 100.0));

        encoder.encoder.count.set(100);
        let s = encoder.sample(0.2);
        assert!(close(s.distance, 0.0));
        assert!(close(s.rate, 0.0));
    }

    #[test]
    fn survives_counter_wrap() {
        let qei = FakeQei {
            count: Cell::new(65530),
        };
        let mut encoder = N20::new(qei, 1.0);
        encoder.sample(0.0);

        encoder.encoder.count.set(4);
        let s = encoder.sample(0.01);
        assert!(close(s.distance, 10.0));

        encoder.encoder.count.set(65530);
        let s = encoder.sample(0.02);
        assert!(close(s.distance, 0.0));
    }
}
