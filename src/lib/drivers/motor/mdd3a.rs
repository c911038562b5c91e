use embedded_hal::PwmPin;

pub const MAX_POWER: f32 = 100.0;

pub trait Start {
    fn start(&mut self);
}

// signed percent, -100.0 full reverse to 100.0 full forward
pub trait SetPower {
    fn set_power(&mut self, power: f32);
}

/*
Helper Function
input: -100 < float < 100, clamped outside that
out: duty pair (_,0) forward or (0,_) reverse, each at most max_duty
*/
pub fn convert_power_to_duty(power: f32, max_duty: u16) -> (u16, u16) {
    let forward = power >= 0.0;
    let magnitude = if forward { power } else { -power };
    let fraction = if magnitude > MAX_POWER {
        1.0
    } else {
        magnitude / MAX_POWER
    };

    // truncate; NaN lands on 0
    let duty = (fraction * max_duty as f32) as u16;

    if forward {
        (duty, 0)
    } else {
        (0, duty)
    }
}

/// Cytron MDD3A channel: one PWM input per direction.
pub struct MDD3A<X, Y> {
    pwm: (X, Y),
}

impl<X, Y> MDD3A<X, Y>
where
    X: PwmPin<Duty = u16>,
    Y: PwmPin<Duty = u16>,
{
    pub fn new(in1: (X, Y)) -> Self {
        Self { pwm: in1 }
    }

    pub fn set_duty(&mut self, (speedx, speedy): (u16, u16)) {
        self.pwm.0.set_duty(speedx);
        self.pwm.1.set_duty(speedy);
    }

    // both inputs share a timer, so either max works
    pub fn max_duty(&self) -> u16 {
        self.pwm.0.get_max_duty()
    }
}

impl<X, Y> Start for MDD3A<X, Y>
where
    X: PwmPin<Duty = u16>,
    Y: PwmPin<Duty = u16>,
{
    fn start(&mut self) {
        self.set_duty((0, 0));
        self.pwm.0.enable();
        self.pwm.1.enable();
    }
}

impl<X, Y> SetPower for MDD3A<X, Y>
where
    X: PwmPin<Duty = u16>,
    Y: PwmPin<Duty = u16>,
{
    fn set_power(&mut self, power: f32) {
        let duty = convert_power_to_duty(power, self.max_duty());
        self.set_duty(duty);
    }
}
