//! The runner session: player, speed ramp and track driven as one `Game`.

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info};

use crate::api::error::ConfigError;
use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::GameEvent;
use crate::assets::config::RunnerConfig;
use crate::input::queue::{InputEvent, InputQueue};
use crate::player::controller::PlayerController;
use crate::player::lanes::ShiftDirection;
use crate::reactive::{SubscriptionId, Variable};
use crate::systems::speed::SpeedRamp;
use crate::systems::track::Track;

/// Name of the shared speed variable.
pub const SPEED_VARIABLE: &str = "speed";

pub struct RunnerGame {
    config: RunnerConfig,
    speed: Variable<f32>,
    speed_changes: Rc<RefCell<Vec<f32>>>,
    speed_subscription: SubscriptionId,
    ramp: SpeedRamp,
    track: Track,
    player: Option<PlayerController>,
}

impl RunnerGame {
    /// Validate `config` and build the session. Nothing is spawned until
    /// `Game::init`.
    pub fn new(config: RunnerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let speed = Variable::new(SPEED_VARIABLE, config.speed.start);
        let speed_changes = Rc::new(RefCell::new(Vec::new()));
        let sink = speed_changes.clone();
        let speed_subscription = speed.subscribe(move |value: &f32| sink.borrow_mut().push(*value));

        let ramp = SpeedRamp::new(config.speed.clone(), speed.clone())?;
        let track = Track::new(config.track.clone())?;

        Ok(Self {
            config,
            speed,
            speed_changes,
            speed_subscription,
            ramp,
            track,
            player: None,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(RunnerConfig::from_json(json)?)
    }

    pub fn runner_config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Current run speed.
    pub fn speed(&self) -> f32 {
        self.speed.get()
    }

    /// Handle to the shared speed, for readouts that want change callbacks.
    pub fn speed_variable(&self) -> Variable<f32> {
        self.speed.clone()
    }

    /// The player, once `init` has run.
    pub fn player(&self) -> Option<&PlayerController> {
        self.player.as_ref()
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    #[cfg(feature = "physics")]
    fn spawn_player(&self, ctx: &mut EngineContext) -> Result<PlayerController, ConfigError> {
        PlayerController::spawn(ctx, &self.config.player, &self.config.physics)
    }

    #[cfg(not(feature = "physics"))]
    fn spawn_player(&self, ctx: &mut EngineContext) -> Result<PlayerController, ConfigError> {
        PlayerController::spawn(ctx, &self.config.player)
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::ShiftLeft => self.shift(ShiftDirection::Left),
                InputEvent::ShiftRight => self.shift(ShiftDirection::Right),
                InputEvent::Jump => {
                    if let Some(player) = self.player.as_mut() {
                        player.jump(ctx);
                    }
                }
                InputEvent::NudgeSpeed { delta } => self.ramp.nudge(delta),
            }
        }
    }

    fn shift(&mut self, direction: ShiftDirection) {
        if let Some(player) = self.player.as_mut() {
            player.shift(direction);
        }
    }

    /// Turn speed notifications collected since the last call into events.
    fn flush_speed_changes(&self, ctx: &mut EngineContext) {
        for speed in self.speed_changes.borrow_mut().drain(..) {
            ctx.emit(GameEvent::SpeedChanged { speed });
        }
    }
}

impl Game for RunnerGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            #[cfg(feature = "physics")]
            gravity: glam::Vec2::new(0.0, self.config.physics.gravity),
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let player = match self.spawn_player(ctx) {
            Ok(player) => player,
            Err(err) => {
                error!("player spawn failed: {}", err);
                return;
            }
        };
        let player_z = ctx.scene.get(player.entity()).map_or(0.0, |e| e.pos.z);
        self.player = Some(player);

        self.track.spawn(ctx, player_z);
        self.ramp.start();
        // The readout needs an initial value even when start equals the
        // variable's seed and no change was reported.
        self.speed_changes.borrow_mut().clear();
        ctx.emit(GameEvent::SpeedChanged { speed: self.speed.get() });
        info!("run started");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        self.handle_input(ctx, input);
        self.ramp.update(dt);

        let Some(player) = self.player.as_mut() else {
            self.flush_speed_changes(ctx);
            return;
        };
        let player_z = ctx.scene.get(player.entity()).map_or(0.0, |e| e.pos.z);
        self.track.update(ctx, self.speed.get(), dt, player_z);
        player.update(ctx, dt);

        self.flush_speed_changes(ctx);
    }
}

impl Drop for RunnerGame {
    fn drop(&mut self) {
        self.speed.unsubscribe(self.speed_subscription);
    }
}
