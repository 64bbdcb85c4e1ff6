use cue_engine::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, FixedTimestep, InstanceBuffer,
};
use cue_engine::systems::render::build_instance_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `pool-rack`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Handed to every fixed step after the first in a frame.
    no_input: InputQueue,
    instances: InstanceBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let ctx = EngineContext::from_config(&config);

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            instances: InstanceBuffer::with_capacity(config.max_instances),
            timestep,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: for each fixed step, update the game and then
    /// step the physics world. Rebuilds the instance buffer afterwards.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
            #[cfg(feature = "physics")]
            self.ctx.step_physics();
        }

        // Input waits for a frame that actually runs a step.
        if steps > 0 {
            self.input.drain();
        }

        build_instance_buffer(self.ctx.scene.iter(), &mut self.instances);
    }

    /// Parse and register a model under `name`. A malformed payload is
    /// logged and leaves the store untouched, so anything awaiting the model
    /// keeps waiting.
    pub fn load_model(&mut self, name: &str, json: &str) {
        match self.ctx.assets.load_json(name, json) {
            Ok(handle) => log::debug!("Model '{}': {} meshes", name, handle.mesh_count()),
            Err(e) => log::error!("Failed to parse model '{}': {}", name, e),
        }
    }

    // ---- Accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn phase(&self) -> u32 {
        self.game.phase()
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_engine::{Entity, EntityId, GameEvent};

    /// Records what each fixed step saw.
    #[derive(Default)]
    struct CountingGame {
        inits: u32,
        steps: u32,
        inputs_seen: Vec<usize>,
    }

    impl Game for CountingGame {
        fn init(&mut self, ctx: &mut EngineContext) {
            self.inits += 1;
            let id = ctx.next_id();
            ctx.scene.spawn(Entity::new(id).with_visual(4));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.steps += 1;
            if let Some(entity) = ctx.scene.get_mut(EntityId(1)) {
                entity.opacity = 1.0 / self.steps as f32;
            }
            self.inputs_seen.push(input.len());
            ctx.emit_event(GameEvent::new(1.0, self.steps as f32));
        }

        fn phase(&self) -> u32 {
            self.steps.min(2)
        }
    }

    fn runner() -> GameRunner<CountingGame> {
        let mut runner = GameRunner::new(CountingGame::default());
        runner.init();
        runner
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(CountingGame::default());
        runner.tick(1.0);
        assert_eq!(runner.game().steps, 0);
    }

    #[test]
    fn input_reaches_first_step_only() {
        let mut runner = runner();
        runner.push_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        runner.tick(3.0 / 60.0 + 0.001);

        assert_eq!(runner.game().inputs_seen, vec![1, 0, 0]);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().inputs_seen.last(), Some(&0));
    }

    #[test]
    fn input_survives_a_frame_without_steps() {
        let mut runner = runner();
        runner.push_input(InputEvent::PointerUp { x: 1.0, y: 1.0 });
        runner.tick(0.001);
        assert_eq!(runner.game().steps, 0);

        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().inputs_seen, vec![1]);
    }

    #[test]
    fn events_are_per_frame() {
        let mut runner = runner();
        runner.tick(2.0 / 60.0 + 0.001);
        assert_eq!(runner.game_events_len(), 2);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game_events_len(), 1);
        assert_eq!(runner.phase(), 2);
    }

    #[test]
    fn bad_model_is_not_registered() {
        let mut runner = runner();
        runner.load_model("table", "{ not json");
        assert!(!runner.context().assets.is_loaded("table"));

        runner.load_model("table", r#"{ "meshes": {} }"#);
        assert!(runner.context().assets.is_loaded("table"));
    }

    #[test]
    fn instance_buffer_tracks_scene_each_frame() {
        let mut runner = runner();
        assert_eq!(runner.instance_count(), 0);

        runner.tick(1.0 / 60.0);
        assert_eq!(runner.instance_count(), 1);
        let inst = runner.instances().instances[0];
        assert_eq!((inst.id, inst.visual, inst.opacity), (1.0, 4.0, 1.0));

        runner.tick(1.0 / 60.0);
        assert_eq!(runner.instances().instances[0].opacity, 0.5);
    }
}
