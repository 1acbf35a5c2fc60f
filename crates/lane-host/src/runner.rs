use lane_runner::{EngineContext, Game, GameConfig, GameEvent, InputEvent, InputQueue};

/// Generic game runner that wires up the engine loop.
///
/// The host owns the clock: it calls `tick` once per frame with the elapsed
/// time and reads the frame's events afterwards.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    config: GameConfig,
    initialized: bool,
    frame: u64,
    elapsed: f64,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let ctx = EngineContext::from_config(&config);

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            config,
            initialized: false,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.clear_frame_data();
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: update game, step physics, drain input.
    /// `dt` is clamped to `[0, max_frame_dt]`.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        let dt = dt.clamp(0.0, self.config.max_frame_dt);

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.game.update(&mut self.ctx, &self.input, dt);
        self.step_physics(dt);

        // Drain input after update
        self.input.drain();

        self.frame += 1;
        self.elapsed += f64::from(dt);
    }

    #[cfg(feature = "physics")]
    fn step_physics(&mut self, dt: f32) {
        self.ctx.step_physics(dt);
    }

    #[cfg(not(feature = "physics"))]
    fn step_physics(&mut self, _dt: f32) {}

    /// Events emitted during the last tick (or by `init`, before the first).
    pub fn events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Ticks run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds so far, after clamping.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
