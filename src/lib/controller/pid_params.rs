use pid::Pid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TuningParams {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    pub p_lim: f32,
    pub i_lim: f32,
    pub d_lim: f32,
    pub out_lim: f32,
}

impl TuningParams {
    // every term clamped to the same limit as the output
    pub const fn new(kp: f32, ki: f32, kd: f32, out_lim: f32) -> TuningParams {
        TuningParams {
            kp,
            ki,
            kd,
            p_lim: out_lim,
            i_lim: out_lim,
            d_lim: out_lim,
            out_lim,
        }
    }

    pub fn pid(&self, setpoint: f32) -> Pid<f32> {
        Pid::new(
            self.kp,
            self.ki,
            self.kd,
            self.p_lim,
            self.i_lim,
            self.d_lim,
            self.out_lim,
            setpoint,
        )
    }
}
