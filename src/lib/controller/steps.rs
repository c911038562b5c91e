use libm::fabsf;

/// The fixed autonomous plan: drive, turn, drive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepPlan {
    pub step_zero_distance: f32,
    // absolute heading relative to the calibrated zero
    pub step_one_angle: f32,
    // measured from where step zero ended
    pub step_two_distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    StepZeroDistance,
    StepOneAngle,
    StepTwoDistance,
    Done,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::StepZeroDistance => Phase::StepOneAngle,
            Phase::StepOneAngle => Phase::StepTwoDistance,
            Phase::StepTwoDistance | Phase::Done => Phase::Done,
        }
    }

    pub fn is_turn(self) -> bool {
        matches!(self, Phase::StepOneAngle)
    }

    pub fn is_done(self) -> bool {
        matches!(self, Phase::Done)
    }
}

/// Counts consecutive samples inside a tolerance band.
pub struct Settle {
    samples: u32,
    needed: u32,
}

impl Settle {
    pub fn new(needed: u32) -> Settle {
        Settle { samples: 0, needed }
    }

    pub fn reset(&mut self) {
        self.samples = 0;
    }

    // true once the error has stayed in band for `needed` samples in a row
    pub fn update(&mut self, error: f32, tolerance: f32) -> bool {
        if fabsf(error) <= tolerance {
            self.samples = self.samples.saturating_add(1);
        } else {
            self.samples = 0;
        }
        self.samples >= self.needed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_run_in_order_and_stop() {
        let mut phase = Phase::StepZeroDistance;
        let mut seen = [Phase::Done; 4];
        for slot in seen.iter_mut() {
            *slot = phase;
            phase = phase.next();
        }
        assert_eq!(
            seen,
            [
                Phase::StepZeroDistance,
                Phase::StepOneAngle,
                Phase::StepTwoDistance,
                Phase::Done
            ]
        );
        assert_eq!(Phase::Done.next(), Phase::Done);
        assert!(Phase::StepOneAngle.is_turn());
        assert!(!Phase::StepTwoDistance.is_turn());
    }

    #[test]
    fn settle_needs_consecutive_samples() {
        let mut settle = Settle::new(3);
        assert!(!settle.update(0.1, 0.5));
        assert!(!settle.update(-0.2, 0.5));
        // a spike outside the band starts the count over
        assert!(!settle.update(0.9, 0.5));
        assert!(!settle.update(0.5, 0.5));
        assert!(!settle.update(0.0, 0.5));
        assert!(settle.update(-0.5, 0.5));
    }
}
