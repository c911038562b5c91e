use crate::app::{auto_tick, pid_loops};
use crate::config::sys_config;
use core::fmt::Write;
use rtic::Mutex;
use systick_monotonic::fugit::Duration;

pub fn pid_loops(mut cx: pid_loops::Context) {
    cx.shared.auto.lock(|auto| auto.calculate());
    // run at 200 Hz
    pid_loops::spawn_after(Duration::<u64, 1, 1000>::millis(sys_config::PID_PERIOD_MS)).unwrap();
}

pub fn auto_tick(mut cx: auto_tick::Context) {
    let tx = cx.local.tx;
    if !*cx.local.started {
        let res = cx.shared.auto.lock(|auto| auto.start(&mut **tx));
        if let Err(e) = res {
            writeln!(tx, "autonomous aborted: {}\r", e).unwrap();
            panic!("autonomous start failed");
        }
        *cx.local.started = true;
    }

    let robot = cx.local.robot;
    let done = cx.shared.auto.lock(|auto| {
        auto.handle(robot);
        auto.phase().is_done()
    });
    if done && !*cx.local.reported_done {
        writeln!(tx, "autonomous sequence complete\r").unwrap();
        *cx.local.reported_done = true;
    }

    // run at 50 Hz
    auto_tick::spawn_after(Duration::<u64, 1, 1000>::millis(sys_config::AUTO_PERIOD_MS))
        .unwrap();
}
