//! Fixed-rate headless loop: replays a script and records every event.

use log::{debug, info};
use serde::Serialize;

use lane_runner::{Game, GameEvent};

use crate::runner::GameRunner;
use crate::script::InputScript;

/// An event stamped with the simulated time of the tick that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedEvent {
    pub time: f32,
    #[serde(flatten)]
    pub event: GameEvent,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub frames: u64,
    pub events: Vec<TimedEvent>,
}

impl RunReport {
    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.event)).count()
    }
}

/// Initialise `runner` if needed, then tick it at `fps` for `seconds`,
/// feeding scripted input at the start of each frame.
pub fn run<G: Game>(runner: &mut GameRunner<G>, script: &mut InputScript, seconds: f32, fps: u32) -> RunReport {
    let mut report = RunReport::default();
    if !runner.is_initialized() {
        runner.init();
        record(&mut report, 0.0, runner.events());
    }

    let fps = fps.max(1);
    let dt = 1.0 / fps as f32;
    let frames = (seconds.max(0.0) * fps as f32).round() as u64;
    info!("headless run: {} frames at {} fps", frames, fps);

    for frame in 0..frames {
        let time = frame as f32 * dt;
        for input in script.due(time) {
            debug!("t={:.3} input {:?}", time, input);
            runner.push_input(input);
        }
        runner.tick(dt);
        record(&mut report, time + dt, runner.events());
    }

    report.frames = frames;
    report
}

fn record(report: &mut RunReport, time: f32, events: &[GameEvent]) {
    report
        .events
        .extend(events.iter().map(|&event| TimedEvent { time, event }));
}
