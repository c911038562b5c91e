use crate::drivers::motor::mdd3a;
use core::ops::Mul;

/// Differential drivetrain command, one speed per side.
pub trait DriveLR {
    fn drive_lr(&mut self, left: f32, right: f32);
}

pub struct Drivetrain<L, R> {
    left: L,
    right: R,
    directions: SideDirections,
}

impl<L, R> Drivetrain<L, R>
where
    L: mdd3a::Start + mdd3a::SetPower,
    R: mdd3a::Start + mdd3a::SetPower,
{
    pub fn new(left: L, right: R, directions: SideDirections) -> Drivetrain<L, R> {
        let mut drivetrain = Drivetrain {
            left,
            right,
            directions,
        };
        drivetrain.left.start();
        drivetrain.right.start();
        drivetrain
    }
}

impl<L, R> DriveLR for Drivetrain<L, R>
where
    L: mdd3a::Start + mdd3a::SetPower,
    R: mdd3a::Start + mdd3a::SetPower,
{
    fn drive_lr(&mut self, left: f32, right: f32) {
        self.left.set_power(self.directions.left * left);
        self.right.set_power(self.directions.right * right);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Backward = -1,
    Forward = 1,
}
impl Mul<f32> for Direction {
    type Output = f32;
    fn mul(self, rhs: f32) -> Self::Output {
        self as i32 as f32 * rhs
    }
}

// mounting direction of each side's motor
#[derive(Clone, Copy, Debug)]
pub struct SideDirections {
    pub left: Direction,
    pub right: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeMotor {
        started: bool,
        power: f32,
    }

    impl mdd3a::Start for FakeMotor {
        fn start(&mut self) {
            self.started = true;
        }
    }

    impl mdd3a::SetPower for FakeMotor {
        fn set_power(&mut self, power: f32) {
            self.power = power;
        }
    }

    #[test]
    fn mirrored_side_is_flipped() {
        let mut drivetrain = Drivetrain::new(
            FakeMotor::default(),
            FakeMotor::default(),
            SideDirections {
                left: Direction::Forward,
                right: Direction::Backward,
            },
        );
        assert!(drivetrain.left.started && drivetrain.right.started);

        drivetrain.drive_lr(3.1, 0.9);
        assert_eq!(drivetrain.left.power, 3.1);
        assert_eq!(drivetrain.right.power, -0.9);

        drivetrain.drive_lr(0.0, 0.0);
        assert_eq!(drivetrain.left.power, 0.0);
        assert_eq!(drivetrain.right.power, 0.0);
    }
}
