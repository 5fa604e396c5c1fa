use serde::Serialize;

/// A side in the game. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Player {
    Black = 0,
    White = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Black),
            1 => Some(Self::White),
            _ => None,
        }
    }
}

/// Contents of a single board cell.
///
/// The discriminants are the cell codes used by `GameState::board` and the
/// WASM API: 0=black, 1=white, 2=empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cell {
    Black = 0,
    White = 1,
    Empty = 2,
}

impl Cell {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// One cell code per cell index (0=black, 1=white, 2=empty).
    pub board: Vec<u8>,
    pub current_player: u8,
    pub dimensions: u32,
    pub size: u32,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: cell indices recolored by the move.
    /// - Pass: must be an empty list.
    pub flipped: Vec<u32>,
}
