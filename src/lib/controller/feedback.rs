use crate::controller::pid_params::TuningParams;
use crate::sensors::{AtomicF32, PidSource};
use libm::fmodf;
use pid::Pid;

/// Which reading of the source the loop regulates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceMode {
    Displacement,
    Rate,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Continuity {
    Discontinuous,
    // input wraps around from max back to min, e.g. heading
    Continuous { min: f32, max: f32 },
}

impl Continuity {
    // signed offset of measurement from setpoint, taking the short way round
    // the cycle when continuous
    pub fn deviation(&self, measurement: f32, setpoint: f32) -> f32 {
        let diff = measurement - setpoint;
        match *self {
            Continuity::Discontinuous => diff,
            Continuity::Continuous { min, max } => {
                let range = max - min;
                let half = 0.5 * range;
                let mut wrapped = fmodf(diff + half, range);
                if wrapped < 0.0 {
                    wrapped += range;
                }
                wrapped - half
            }
        }
    }
}

/// One PID loop bound to a measurement source.
///
/// `calculate` runs on its own cadence and stores the result; `get` only
/// reads the last stored value. A disabled loop always reads 0.
pub struct FeedbackLoop<S> {
    pid: Pid<f32>,
    source: S,
    mode: SourceMode,
    continuity: Continuity,
    enabled: bool,
    output: AtomicF32,
}

impl<S> FeedbackLoop<S>
where
    S: PidSource,
{
    pub fn new(
        tune: TuningParams,
        source: S,
        setpoint: f32,
        mode: SourceMode,
        continuity: Continuity,
    ) -> FeedbackLoop<S> {
        FeedbackLoop {
            pid: tune.pid(setpoint),
            source,
            mode,
            continuity,
            enabled: false,
            output: AtomicF32::zero(),
        }
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn continuity(&self) -> Continuity {
        self.continuity
    }

    pub fn setpoint(&self) -> f32 {
        self.pid.setpoint
    }

    pub fn set_setpoint(&mut self, setpoint: f32) {
        self.pid.setpoint = setpoint;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.pid.reset_integral_term();
        self.output.store(0.0);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn reset_integral(&mut self) {
        self.pid.reset_integral_term();
    }

    pub fn measurement(&self) -> f32 {
        match self.mode {
            SourceMode::Displacement => self.source.displacement(),
            SourceMode::Rate => self.source.rate(),
        }
    }

    /// Distance still to go, `setpoint - measurement`, wrapped the short way
    /// for continuous loops. This is the negation of
    /// [`Continuity::deviation`]: setpoint 0 with a heading of 359 gives +1
    /// here and -1 from `deviation`.
    pub fn error(&self) -> f32 {
        -self
            .continuity
            .deviation(self.measurement(), self.pid.setpoint)
    }

    pub fn calculate(&mut self) {
        if !self.enabled {
            return;
        }
        // Pid works on setpoint - measurement, so hand it a measurement that
        // reproduces the wrapped error
        let error = self.error();
        let output = self.pid.next_control_output(self.pid.setpoint - error);
        self.output.store(output.output);
    }

    pub fn get(&self) -> f32 {
        if self.enabled {
            self.output.load()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Fake {
        pos: Cell<f32>,
        vel: Cell<f32>,
    }

    impl Fake {
        fn new(pos: f32, vel: f32) -> Fake {
            Fake {
                pos: Cell::new(pos),
                vel: Cell::new(vel),
            }
        }
    }

    impl PidSource for Fake {
        fn displacement(&self) -> f32 {
            self.pos.get()
        }

        fn rate(&self) -> f32 {
            self.vel.get()
        }
    }

    const P_ONLY: TuningParams = TuningParams::new(0.1, 0.0, 0.0, 100.0);
    const HEADING: Continuity = Continuity::Continuous {
        min: -180.0,
        max: 180.0,
    };

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn heading_takes_the_short_way() {
        assert!(close(HEADING.deviation(359.0, 0.0), -1.0));
        assert!(close(HEADING.deviation(1.0, 359.0), 2.0));
        assert!(close(HEADING.deviation(-179.0, 179.0), 2.0));
        assert!(close(HEADING.deviation(90.0, 0.0), 90.0));
        assert!(close(Continuity::Discontinuous.deviation(359.0, 0.0), 359.0));
    }

    #[test]
    fn continuous_loop_error() {
        let gyro = Fake::new(359.0, 0.0);
        let angle = FeedbackLoop::new(P_ONLY, &gyro, 0.0, SourceMode::Displacement, HEADING);
        // one degree past the setpoint, so steer back by one
        assert!(close(angle.error(), 1.0));
        assert!(close(angle.error(), -HEADING.deviation(359.0, 0.0)));
    }

    #[test]
    fn disabled_loop_reads_zero() {
        let wheel = Fake::new(0.0, 0.0);
        let mut distance = FeedbackLoop::new(
            P_ONLY,
            &wheel,
            10.0,
            SourceMode::Displacement,
            Continuity::Discontinuous,
        );
        distance.calculate();
        assert!(!distance.is_enabled());
        assert_eq!(distance.get(), 0.0);

        distance.enable();
        distance.calculate();
        assert!(close(distance.get(), 1.0));

        distance.disable();
        assert_eq!(distance.get(), 0.0);
    }

    #[test]
    fn distance_output_shrinks_near_setpoint() {
        let wheel = Fake::new(0.0, 0.0);
        let mut distance = FeedbackLoop::new(
            P_ONLY,
            &wheel,
            10.0,
            SourceMode::Displacement,
            Continuity::Discontinuous,
        );
        distance.enable();

        let mut prev = f32::MAX;
        for pos in [0.0, 2.5, 5.0, 9.0, 9.9, 10.0] {
            wheel.pos.set(pos);
            distance.calculate();
            let speed = distance.get();
            assert!(speed >= 0.0);
            assert!(speed < prev);
            prev = speed;
        }
        assert!(close(prev, 0.0));
    }

    #[test]
    fn rate_mode_reads_rate() {
        let wheel = Fake::new(50.0, 1.5);
        let mut rate = FeedbackLoop::new(
            P_ONLY,
            &wheel,
            2.0,
            SourceMode::Rate,
            Continuity::Discontinuous,
        );
        assert_eq!(rate.mode(), SourceMode::Rate);
        assert_eq!(rate.measurement(), 1.5);
        rate.enable();
        rate.calculate();
        assert!(close(rate.get(), 0.05));
    }

    #[test]
    fn get_returns_last_computed_value() {
        let wheel = Fake::new(0.0, 0.0);
        let mut distance = FeedbackLoop::new(
            P_ONLY,
            &wheel,
            10.0,
            SourceMode::Displacement,
            Continuity::Discontinuous,
        );
        distance.enable();
        distance.calculate();

        // the reading moves but nothing recomputes yet
        wheel.pos.set(10.0);
        assert!(close(distance.get(), 1.0));
        distance.set_setpoint(20.0);
        assert!(close(distance.get(), 1.0));

        distance.calculate();
        assert!(close(distance.get(), 1.0));
        assert_eq!(distance.setpoint(), 20.0);
    }

    #[test]
    fn integral_accumulates_until_reset() {
        let wheel = Fake::new(0.0, 0.0);
        let tune = TuningParams::new(0.0, 0.5, 0.0, 100.0);
        let mut distance = FeedbackLoop::new(
            tune,
            &wheel,
            2.0,
            SourceMode::Displacement,
            Continuity::Discontinuous,
        );
        distance.enable();
        distance.calculate();
        distance.calculate();
        assert!(close(distance.get(), 2.0));

        distance.reset_integral();
        distance.calculate();
        assert!(close(distance.get(), 1.0));
    }
}
