//! Autonomous drive-turn-drive routine.
//!
//! Four loops in cascade: distance and angle produce the desired wheel rates,
//! and a rate loop per wheel adds a trim on top of its target for slip and
//! motor mismatch. A step advances once its loop error has stayed inside the
//! tolerance band for `settle_ticks` control ticks in a row.

use crate::config::AutoConfig;
use crate::controller::feedback::{Continuity, FeedbackLoop, SourceMode};
use crate::controller::motor::DriveLR;
use crate::controller::steps::{Phase, Settle};
use crate::error::Error;
use crate::robot::{Intake, SlothRobot};
use crate::sensors::{Gyro, MeanDistance, PidSource};
use core::fmt::Write;

pub struct AutoPidController<'a, G, E> {
    gyro: &'a G,
    a_controller: FeedbackLoop<&'a G>,
    d_controller: FeedbackLoop<MeanDistance<&'a E>>,
    wl_controller: FeedbackLoop<&'a E>,
    wr_controller: FeedbackLoop<&'a E>,
    config: AutoConfig,
    phase: Phase,
    settle: Settle,
    started: bool,
    outtake_remaining: u32,
}

impl<'a, G, E> AutoPidController<'a, G, E>
where
    G: Gyro,
    E: PidSource,
{
    pub fn new(
        gyro: &'a G,
        l_encoder: &'a E,
        r_encoder: &'a E,
        config: AutoConfig,
    ) -> AutoPidController<'a, G, E> {
        let heading = Continuity::Continuous {
            min: config.heading_min_deg,
            max: config.heading_max_deg,
        };
        AutoPidController {
            gyro,
            // hold a heading, not a turn rate
            a_controller: FeedbackLoop::new(
                config.angle,
                gyro,
                0.0,
                SourceMode::Displacement,
                heading,
            ),
            d_controller: FeedbackLoop::new(
                config.distance,
                MeanDistance::new(l_encoder, r_encoder),
                0.0,
                SourceMode::Displacement,
                Continuity::Discontinuous,
            ),
            wl_controller: FeedbackLoop::new(
                config.wheel,
                l_encoder,
                0.0,
                SourceMode::Rate,
                Continuity::Discontinuous,
            ),
            wr_controller: FeedbackLoop::new(
                config.wheel,
                r_encoder,
                0.0,
                SourceMode::Rate,
                Continuity::Discontinuous,
            ),
            settle: Settle::new(config.settle_ticks),
            config,
            phase: Phase::StepZeroDistance,
            started: false,
            outtake_remaining: 0,
        }
    }

    /// Calibrates the gyro, aims at step zero and enables every loop. Call
    /// once, before the first `handle`.
    pub fn start<W: Write>(&mut self, log: &mut W) -> Result<(), Error> {
        self.gyro.calibrate()?;
        self.a_controller.set_setpoint(0.0);
        self.d_controller
            .set_setpoint(self.config.plan.step_zero_distance);

        self.a_controller.enable();
        self.d_controller.enable();
        self.wl_controller.enable();
        self.wr_controller.enable();

        self.phase = Phase::StepZeroDistance;
        self.settle.reset();
        self.started = true;

        writeln!(log, "Starting Autonomous Control.\r")?;
        Ok(())
    }

    /// Recomputes every enabled loop. Runs on its own cadence; `handle` only
    /// sees the values stored here.
    pub fn calculate(&mut self) {
        self.a_controller.calculate();
        self.d_controller.calculate();
        self.wl_controller.calculate();
        self.wr_controller.calculate();
    }

    /// One control tick.
    pub fn handle<D, I>(&mut self, bot: &mut SlothRobot<D, I>)
    where
        D: DriveLR,
        I: Intake,
    {
        if self.started {
            self.advance();
        }

        if self.phase.is_done() {
            bot.drivetrain.drive_lr(0.0, 0.0);
            bot.intake.set_arm(0.0);
            if self.outtake_remaining > 0 {
                self.outtake_remaining -= 1;
                bot.intake.set_roller(self.config.outtake_power);
            } else {
                bot.intake.set_roller(0.0);
            }
            return;
        }

        let speed = self.d_controller.get(); // base speed of both sides
        let angle = self.a_controller.get(); // + means left runs faster than right
        self.wl_controller.set_setpoint(speed + angle);
        self.wr_controller.set_setpoint(speed - angle);
        // rate loop output is a trim on top of the target, added on both sides
        bot.drivetrain.drive_lr(
            speed + angle + self.wl_controller.get(),
            speed - angle + self.wr_controller.get(),
        );

        if self.started {
            bot.intake.set_arm(self.config.arm_lowered_power);
        }
        bot.intake.set_roller(0.0);
    }

    fn advance(&mut self) {
        if self.phase.is_done() {
            return;
        }
        let (error, tolerance) = if self.phase.is_turn() {
            (self.a_controller.error(), self.config.angle_tolerance_deg)
        } else {
            (self.d_controller.error(), self.config.distance_tolerance)
        };
        if !self.settle.update(error, tolerance) {
            return;
        }

        self.settle.reset();
        self.phase = self.phase.next();
        match self.phase {
            Phase::StepOneAngle => {
                // distance setpoint stays put so the pivot holds position
                self.a_controller
                    .set_setpoint(self.config.plan.step_one_angle);
            }
            Phase::StepTwoDistance => {
                let target = self.d_controller.setpoint() + self.config.plan.step_two_distance;
                self.d_controller.set_setpoint(target);
                self.d_controller.reset_integral();
                self.a_controller.reset_integral();
            }
            Phase::Done => {
                self.a_controller.disable();
                self.d_controller.disable();
                self.wl_controller.disable();
                self.wr_controller.disable();
                self.outtake_remaining = self.config.outtake_ticks;
            }
            Phase::StepZeroDistance => {}
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn angle_loop(&self) -> &FeedbackLoop<&'a G> {
        &self.a_controller
    }

    pub fn distance_loop(&self) -> &FeedbackLoop<MeanDistance<&'a E>> {
        &self.d_controller
    }

    pub fn left_rate_loop(&self) -> &FeedbackLoop<&'a E> {
        &self.wl_controller
    }

    pub fn right_rate_loop(&self) -> &FeedbackLoop<&'a E> {
        &self.wr_controller
    }
}
