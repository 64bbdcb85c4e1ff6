//! Pool rack demo: a title card, a timed transition, then a table whose
//! physics comes alive in stages.

use cue_engine::api::game::GameConfig;
use cue_engine::api::types::EntityId;
use cue_engine::components::entity::Entity;
use cue_engine::input::queue::{InputEvent, InputQueue};
use cue_engine::{EngineContext, Game, GameEvent, Phase, Rng, SceneDirector, StagingConfig};

use crate::players::{PlayerSlot, Scoreboard};
use crate::table::TableScene;

const RACK_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Custom event kinds from the host UI
pub mod events {
    pub const RESET: u32 = 1;
    pub const SWITCH_TURN: u32 = 2;
    /// a = player number (1 or 2), b = score
    pub const SET_SCORE: u32 = 3;
}

/// Visual ids carried in the instance buffer
pub mod visuals {
    pub const TITLE: u32 = 1;
    pub const TABLE: u32 = 2;
    pub const RACK_FRAME: u32 = 3;
    pub const CUE_BALL: u32 = 10;

    /// Numbered ball 1-15.
    pub const fn ball(number: u32) -> u32 {
        CUE_BALL + number
    }
}

/// Game event kinds to the host
pub mod game_events {
    pub const PHASE: f32 = 1.0;
    pub const COLLIDER_READY: f32 = 2.0;
    pub const CUE_SPAWNED: f32 = 3.0;
    pub const RACK_RELEASED: f32 = 4.0;
    /// a = current player number, b = player one score, c = player two score
    pub const TURN: f32 = 5.0;
}

pub struct PoolRackGame {
    staging: StagingConfig,
    director: SceneDirector,
    title_id: Option<EntityId>,
    table: Option<TableScene>,
    players: Scoreboard,
    rng: Rng,
}

impl PoolRackGame {
    pub fn new() -> Self {
        Self::with_staging(StagingConfig::default())
    }

    pub fn with_staging(staging: StagingConfig) -> Self {
        Self {
            director: SceneDirector::new(staging.transition_delay),
            staging,
            title_id: None,
            table: None,
            players: Scoreboard::new(),
            rng: Rng::new(RACK_SEED),
        }
    }

    pub fn table(&self) -> Option<&TableScene> {
        self.table.as_ref()
    }

    pub fn players(&self) -> &Scoreboard {
        &self.players
    }

    fn emit_phase(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(game_events::PHASE, self.director.phase().index() as f32));
    }

    fn emit_turn(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent {
            kind: game_events::TURN,
            a: self.players.current_turn().number() as f32,
            b: self.players.player(PlayerSlot::One).score as f32,
            c: self.players.player(PlayerSlot::Two).score as f32,
        });
    }

    fn mount_table(&mut self, ctx: &mut EngineContext) {
        if let Some(title) = self.title_id.take() {
            ctx.despawn(title);
        }
        self.table = Some(TableScene::mount(ctx, &self.staging, &mut self.rng));
    }

    /// Tear the table down and rack again. Only meaningful during play.
    fn reset(&mut self, ctx: &mut EngineContext) {
        let Some(mut table) = self.table.take() else {
            return;
        };
        table.teardown(ctx);
        self.players.reset();
        self.mount_table(ctx);
        self.emit_turn(ctx);
        log::info!("Table reset");
    }

    /// Returns `true` if the table was remounted, so the rest of this
    /// step's input belongs to the old table.
    fn handle_custom(&mut self, ctx: &mut EngineContext, input: &InputQueue) -> bool {
        for event in input.iter() {
            let InputEvent::Custom { kind, a, b, .. } = *event else {
                continue;
            };
            match kind {
                events::RESET => {
                    if self.table.is_some() {
                        self.reset(ctx);
                        return true;
                    }
                }
                events::SWITCH_TURN => {
                    self.players.switch_turn();
                    self.emit_turn(ctx);
                }
                events::SET_SCORE => match PlayerSlot::from_number(a as u32) {
                    Some(slot) => {
                        self.players.set_score(slot, b.max(0.0) as u32);
                        self.emit_turn(ctx);
                    }
                    None => log::warn!("SET_SCORE for unknown player {}", a),
                },
                other => log::debug!("Ignoring custom event {}", other),
            }
        }
        false
    }
}

impl Default for PoolRackGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PoolRackGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            staging: self.staging.clone(),
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id).with_tag("title").with_visual(visuals::TITLE));
        self.title_id = Some(id);
        self.emit_phase(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if self.handle_custom(ctx, input) {
            return;
        }

        if self.director.handle_input(input) {
            self.emit_phase(ctx);
        }
        if let Some(Phase::Play) = self.director.tick(ctx.dt) {
            self.mount_table(ctx);
            self.emit_phase(ctx);
            self.emit_turn(ctx);
            // The click that left the title is not a shot.
            return;
        }

        if let Some(table) = self.table.as_mut() {
            table.update(ctx, input);
        }
    }

    fn phase(&self) -> u32 {
        self.director.phase().index()
    }
}
