use crate::controller::motor::DriveLR;
use crate::drivers::motor::mdd3a;

/// Intake arm and roller, both signed percent power.
pub trait Intake {
    fn set_arm(&mut self, power: f32);
    fn set_roller(&mut self, power: f32);
}

pub struct IntakeMotors<A, R> {
    arm: A,
    roller: R,
}

impl<A, R> IntakeMotors<A, R>
where
    A: mdd3a::Start + mdd3a::SetPower,
    R: mdd3a::Start + mdd3a::SetPower,
{
    pub fn new(mut arm: A, mut roller: R) -> IntakeMotors<A, R> {
        arm.start();
        roller.start();
        IntakeMotors { arm, roller }
    }
}

impl<A, R> Intake for IntakeMotors<A, R>
where
    A: mdd3a::Start + mdd3a::SetPower,
    R: mdd3a::Start + mdd3a::SetPower,
{
    fn set_arm(&mut self, power: f32) {
        self.arm.set_power(power);
    }

    fn set_roller(&mut self, power: f32) {
        self.roller.set_power(power);
    }
}

/// Everything the autonomous routine commands.
pub struct SlothRobot<D, I> {
    pub drivetrain: D,
    pub intake: I,
}

impl<D, I> SlothRobot<D, I>
where
    D: DriveLR,
    I: Intake,
{
    pub fn new(drivetrain: D, intake: I) -> SlothRobot<D, I> {
        SlothRobot { drivetrain, intake }
    }
}
