//! Speed ramp: raises the run speed at a fixed interval, clamped to a range.

use log::{debug, info};

use crate::api::error::ConfigError;
use crate::assets::config::SpeedSettings;
use crate::core::time::IntervalTimer;
use crate::reactive::Reference;

pub struct SpeedRamp {
    settings: SpeedSettings,
    speed: Reference<f32>,
    timer: IntervalTimer,
}

impl SpeedRamp {
    /// `speed` may be a literal or a shared variable; shared readers see
    /// every ramp step through their subscriptions.
    pub fn new(settings: SpeedSettings, speed: impl Into<Reference<f32>>) -> Result<Self, ConfigError> {
        settings.validate()?;
        let timer = IntervalTimer::new(settings.interval);
        Ok(Self {
            settings,
            speed: speed.into(),
            timer,
        })
    }

    /// Reset the speed to its starting value.
    pub fn start(&mut self) {
        self.timer = IntervalTimer::new(self.settings.interval);
        self.speed.set(self.settings.start);
        info!("speed ramp started at {:.2}", self.settings.start);
    }

    pub fn speed(&self) -> f32 {
        self.speed.get()
    }

    pub fn settings(&self) -> &SpeedSettings {
        &self.settings
    }

    /// Advance by `dt`, applying one increment per elapsed interval.
    pub fn update(&mut self, dt: f32) {
        let steps = self.timer.accumulate(dt);
        for _ in 0..steps {
            let next = (self.speed.get() + self.settings.amount)
                .clamp(self.settings.start, self.settings.max);
            self.speed.set(next);
        }
        if steps > 0 {
            debug!("speed ramped {} step(s) to {:.2}", steps, self.speed.get());
        }
    }

    /// Debug adjustment. Not clamped; the next ramp step clamps again.
    /// The speed may go negative until then, which holds the track still.
    /// A nudge that would leave the speed non-finite is ignored.
    pub fn nudge(&mut self, delta: f32) {
        let next = self.speed.get() + delta;
        if !next.is_finite() {
            debug!("speed nudge {} ignored: result {} is not finite", delta, next);
            return;
        }
        self.speed.set(next);
        debug!("speed nudged by {:+.2} to {:.2}", delta, next);
    }
}
