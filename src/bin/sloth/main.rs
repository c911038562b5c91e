#![no_main]
#![no_std]

mod auto;
mod config;
mod sensing;

use sloth::sensors::{SharedHeading, SharedWheel};

// published by sample_sensors, read by the feedback loops
static HEADING: SharedHeading = SharedHeading::new();
static LEFT_WHEEL: SharedWheel = SharedWheel::new();
static RIGHT_WHEEL: SharedWheel = SharedWheel::new();

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [SPI2, SPI3])]
mod app {
    use crate::config::{sys_config, tuning};
    use crate::sensing;
    use core::fmt::Write;
    use cortex_m::asm;
    use panic_write::PanicHandler;
    use sloth::controller::auto::AutoPidController;
    use sloth::controller::motor::Drivetrain;
    use sloth::drivers::encoder::n20;
    use sloth::drivers::imu::icm20948;
    use sloth::drivers::motor::mdd3a;
    use sloth::filtering::heading::HeadingIntegrator;
    use sloth::robot::{IntakeMotors, SlothRobot};
    use sloth::sensors::{SharedHeading, SharedWheel};
    use stm32f4xx_hal::{
        gpio::{Alternate, Output, Pin, PushPull, PB3, PB4, PB5},
        pac::{SPI1, TIM1, TIM3, TIM4, TIM8, USART2},
        prelude::*,
        qei::Qei,
        serial::{Config, Serial, Tx},
        spi::{Mode, Phase, Polarity, Spi},
        timer::pwm::PwmChannel,
    };
    use systick_monotonic::{fugit::Duration, Systick};

    pub type Imu = icm20948::ICM20948<
        Spi<SPI1, (PB3<Alternate<5>>, PB4<Alternate<5>>, PB5<Alternate<5>>)>,
        Pin<'A', 4, Output<PushPull>>,
    >;
    pub type LeftEncoder =
        n20::N20<Qei<TIM3, (Pin<'A', 6, Alternate<2>>, Pin<'A', 7, Alternate<2>>)>>;
    pub type RightEncoder =
        n20::N20<Qei<TIM4, (Pin<'B', 6, Alternate<2>>, Pin<'B', 7, Alternate<2>>)>>;
    pub type Robot = SlothRobot<
        Drivetrain<
            mdd3a::MDD3A<PwmChannel<TIM1, 0>, PwmChannel<TIM1, 1>>,
            mdd3a::MDD3A<PwmChannel<TIM1, 2>, PwmChannel<TIM1, 3>>,
        >,
        IntakeMotors<
            mdd3a::MDD3A<PwmChannel<TIM8, 0>, PwmChannel<TIM8, 1>>,
            mdd3a::MDD3A<PwmChannel<TIM8, 2>, PwmChannel<TIM8, 3>>,
        >,
    >;

    #[shared]
    struct Shared {
        auto: AutoPidController<'static, SharedHeading, SharedWheel>,
    }

    #[local]
    struct Local {
        tx: core::pin::Pin<panic_write::PanicHandler<Tx<USART2>>>,
        imu: Imu,
        heading: HeadingIntegrator,
        encoder_left: LeftEncoder,
        encoder_right: RightEncoder,
        robot: Robot,
        sample_prev_ticks: u64,
        started: bool,
        reported_done: bool,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<1000>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        // configure clocks
        let rcc = ctx.device.RCC.constrain();
        let mono = Systick::new(ctx.core.SYST, 48_000_000);
        let clocks = rcc.cfgr.sysclk(48.MHz()).freeze();

        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();
        let gpioc = ctx.device.GPIOC.split();

        // set up uart tx
        let tx_pin = gpioa.pa2.into_alternate();
        let serial = Serial::tx(
            ctx.device.USART2,
            tx_pin,
            Config::default()
                .baudrate(115200.bps())
                .wordlength_8()
                .parity_none(),
            &clocks,
        )
        .unwrap();
        let mut tx = PanicHandler::new(serial);

        // configure IMU spi and cs
        let imu_cs = gpioa.pa4.into_push_pull_output();
        let imu_sclk = gpiob.pb3.into_alternate();
        let imu_mosi = gpiob.pb5.into_alternate();
        let imu_miso = gpiob.pb4.into_alternate();
        let imu_spi = Spi::new(
            ctx.device.SPI1,
            (imu_sclk, imu_miso, imu_mosi),
            Mode {
                polarity: Polarity::IdleLow,
                phase: Phase::CaptureOnFirstTransition,
            },
            1.MHz(),
            &clocks,
        );
        let mut delay = ctx.device.TIM5.delay_ms(&clocks);

        let mut imu = icm20948::ICM20948::new(imu_spi, imu_cs);
        match imu.init(
            &mut delay,
            icm20948::GyroFullScaleSel::Dps250,
            icm20948::GyroDLPFSel::D51bw2N73bw3,
        ) {
            Ok(_) => writeln!(tx, "imu initialized\r").unwrap(),
            Err(e) => {
                match e {
                    icm20948::ErrorCode::ParamError => writeln!(tx, "param error\r").unwrap(),
                    icm20948::ErrorCode::SpiError => writeln!(tx, "SPI error\r").unwrap(),
                    icm20948::ErrorCode::WrongID => writeln!(tx, "wrong ID\r").unwrap(),
                    icm20948::ErrorCode::CSError => writeln!(tx, "CS error\r").unwrap(),
                }
                panic!("imu initialization failed");
            }
        }

        writeln!(tx, "calibrating gyro bias, keep still\r").unwrap();
        let bias = match sensing::measure_gyro_bias(&mut imu) {
            Some(bias) => bias,
            None => {
                writeln!(tx, "gyro bias calibration failed\r").unwrap();
                panic!("gyro bias calibration failed");
            }
        };
        writeln!(tx, "gyro bias: {} deg/s\r", bias).unwrap();

        // set up encoders, both on 16-bit timers
        let encoder_left = n20::N20::new(
            Qei::new(
                ctx.device.TIM3,
                (gpioa.pa6.into_alternate(), gpioa.pa7.into_alternate()),
            ),
            sys_config::METERS_PER_COUNT,
        );
        let encoder_right = n20::N20::new(
            Qei::new(
                ctx.device.TIM4,
                (gpiob.pb6.into_alternate(), gpiob.pb7.into_alternate()),
            ),
            sys_config::METERS_PER_COUNT,
        );

        // set up PWM, drivetrain on TIM1 and intake on TIM8
        let channels1 = (
            gpioa.pa8.into_alternate(),
            gpioa.pa9.into_alternate(),
            gpioa.pa10.into_alternate(),
            gpioa.pa11.into_alternate(),
        );
        let pwms1 = ctx.device.TIM1.pwm_hz(channels1, 20.kHz(), &clocks).split();
        let channels2 = (
            gpioc.pc6.into_alternate(),
            gpioc.pc7.into_alternate(),
            gpioc.pc8.into_alternate(),
            gpioc.pc9.into_alternate(),
        );
        let pwms2 = ctx.device.TIM8.pwm_hz(channels2, 20.kHz(), &clocks).split();

        let drivetrain = Drivetrain::new(
            mdd3a::MDD3A::new((pwms1.0, pwms1.1)),
            mdd3a::MDD3A::new((pwms1.2, pwms1.3)),
            sys_config::MOTOR_DIRECTIONS,
        );
        let intake = IntakeMotors::new(
            mdd3a::MDD3A::new((pwms2.0, pwms2.1)),
            mdd3a::MDD3A::new((pwms2.2, pwms2.3)),
        );
        let robot = SlothRobot::new(drivetrain, intake);

        let auto = AutoPidController::new(
            &crate::HEADING,
            &crate::LEFT_WHEEL,
            &crate::RIGHT_WHEEL,
            tuning::auto_config(),
        );

        writeln!(tx, "system initialized\r").unwrap();

        let sample_prev_ticks: u64 = 0;
        sample_sensors::spawn().unwrap();
        pid_loops::spawn().unwrap();
        auto_tick::spawn_after(Duration::<u64, 1, 1000>::millis(
            sys_config::AUTO_START_DELAY_MS,
        ))
        .unwrap();

        (
            Shared { auto },
            Local {
                tx,
                imu,
                heading: HeadingIntegrator::new(bias, sys_config::GYRO_DIRECTION),
                encoder_left,
                encoder_right,
                robot,
                sample_prev_ticks,
                started: false,
                reported_done: false,
            },
            init::Monotonics(mono),
        )
    }

    #[idle]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            asm::nop();
        }
    }

    extern "Rust" {
        #[task(local = [imu, heading, encoder_left, encoder_right, sample_prev_ticks], priority = 2)]
        fn sample_sensors(cx: sample_sensors::Context);

        #[task(shared = [auto], priority = 2)]
        fn pid_loops(cx: pid_loops::Context);

        #[task(shared = [auto], local = [tx, robot, started, reported_done], priority = 1)]
        fn auto_tick(cx: auto_tick::Context);
    }
}
