//! WASM bindings consumed by the web front end.
//!
//! Coordinates cross the boundary as flat `Vec<u32>` arrays with one entry
//! per axis; cell and player values use the codes from [`crate::types`].

use wasm_bindgen::prelude::*;

use crate::error::EngineError;
use crate::game::GameInstance;
use crate::types::Player;

fn to_js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_coord(coord: &[u32]) -> Vec<usize> {
    coord.iter().map(|&c| c as usize).collect()
}

/// One game owned by the JS side.
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(dimensions: u32, size: u32) -> Result<WasmGame, JsValue> {
        let inner =
            GameInstance::new(dimensions as usize, size as usize).map_err(to_js_error)?;
        Ok(Self { inner })
    }

    /// Attempts a move for the active player; `true` on success.
    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(&mut self, coord: Vec<u32>) -> Result<bool, JsValue> {
        self.inner.make_move(&to_coord(&coord)).map_err(to_js_error)
    }

    pub fn pass(&mut self) {
        self.inner.pass();
    }

    /// Cell code at a coordinate (0=black, 1=white, 2=empty).
    pub fn get(&self, coord: Vec<u32>) -> Result<u8, JsValue> {
        self.inner
            .get(&to_coord(&coord))
            .map(|cell| cell.code())
            .map_err(to_js_error)
    }

    /// Whether the legal-move hint plane marks a cell for a player (0 or 1).
    #[wasm_bindgen(js_name = getMoves)]
    pub fn get_moves(&self, coord: Vec<u32>, player: u8) -> Result<bool, JsValue> {
        let player = Player::from_index(player)
            .ok_or_else(|| JsValue::from_str("player must be 0 (black) or 1 (white)"))?;
        self.inner
            .legal_move(&to_coord(&coord), player)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = activePlayer)]
    pub fn active_player(&self) -> u8 {
        self.inner.active_player() as u8
    }

    #[wasm_bindgen(js_name = sideLength)]
    pub fn side_length(&self) -> u32 {
        self.inner.side_length() as u32
    }

    #[wasm_bindgen(js_name = dimensionCount)]
    pub fn dimension_count(&self) -> u32 {
        self.inner.dimension_count() as u32
    }

    /// Full snapshot as a plain JS object (see [`crate::types::GameState`]).
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.to_game_state())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Sync digest for relayed games.
    pub fn checksum(&self) -> u32 {
        self.inner.checksum()
    }
}
