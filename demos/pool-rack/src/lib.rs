use wasm_bindgen::prelude::*;
use cue_engine::*;

mod balls;
mod game;
mod players;
mod table;

use game::PoolRackGame;

cue_web::export_game!(PoolRackGame, "pool-rack");
