use crate::controller::feedback::Continuity;
use crate::controller::motor::Direction;

const HEADING_RANGE: Continuity = Continuity::Continuous {
    min: -180.0,
    max: 180.0,
};

/// Heading from integrating the gyro's yaw rate.
///
/// Yaw rate in deg/s, heading kept in [-180, 180) and positive clockwise.
/// The bias is the mean raw rate measured while standing still; `direction`
/// maps the sensor's positive yaw onto clockwise.
pub struct HeadingIntegrator {
    heading: f32,
    bias_dps: f32,
    direction: Direction,
}

impl HeadingIntegrator {
    pub fn new(bias_dps: f32, direction: Direction) -> HeadingIntegrator {
        HeadingIntegrator {
            heading: 0.0,
            bias_dps,
            direction,
        }
    }

    // returns (heading deg, rate deg/s)
    pub fn update(&mut self, raw_rate_dps: f32, deltat: f32) -> (f32, f32) {
        let rate = self.direction * (raw_rate_dps - self.bias_dps);
        self.heading = HEADING_RANGE.deviation(self.heading + rate * deltat, 0.0);
        (self.heading, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn bias_is_removed() {
        let mut integrator = HeadingIntegrator::new(0.5, Direction::Forward);
        let mut last = (1.0, 1.0);
        for _ in 0..100 {
            last = integrator.update(0.5, 0.01);
        }
        assert!(close(last.0, 0.0));
        assert!(close(last.1, 0.0));
    }

    #[test]
    fn heading_wraps_past_180() {
        let mut integrator = HeadingIntegrator::new(0.0, Direction::Forward);
        let (heading, rate) = integrator.update(170.0, 1.0);
        assert!(close(heading, 170.0));
        assert!(close(rate, 170.0));

        let (heading, _) = integrator.update(20.0, 1.0);
        assert!(close(heading, -170.0));

        let mut integrator = HeadingIntegrator::new(0.0, Direction::Forward);
        let (heading, _) = integrator.update(-200.0, 1.0);
        assert!(close(heading, 160.0));
    }

    #[test]
    fn counterclockwise_sensor_reads_clockwise_positive() {
        // z-up gyro: turning counterclockwise gives a positive raw rate
        let mut integrator = HeadingIntegrator::new(1.0, Direction::Backward);
        let (heading, rate) = integrator.update(11.0, 0.5);
        assert!(close(rate, -10.0));
        assert!(close(heading, -5.0));
    }
}
