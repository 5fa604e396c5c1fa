use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod game;
pub mod plane;
pub mod types;
pub mod wasm;

pub use board::{Board, Direction, generate_directions};
pub use error::EngineError;
pub use game::GameInstance;
pub use types::{Cell, GameState, Player};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
