use crate::board::Board;
use crate::error::EngineError;
use crate::types::{Cell, GameState, Player};

/// One running game: a board plus the turn token.
///
/// The instance is the single owner of its board; callers embedding it in a
/// concurrent host must serialize access themselves. Every operation runs
/// to completion synchronously.
#[derive(Debug, Clone)]
pub struct GameInstance {
    board: Board,
    current_player: Player,
    is_pass: bool,
    flipped: Vec<usize>,
}

impl GameInstance {
    /// Starts a game on a `dim`-dimensional board with `size` cells per
    /// axis. Black moves first.
    pub fn new(dim: usize, size: usize) -> Result<Self, EngineError> {
        Ok(Self {
            board: Board::new(dim, size)?,
            current_player: Player::Black,
            is_pass: false,
            flipped: Vec::new(),
        })
    }

    /// Attempts a move for the active player.
    ///
    /// `Ok(true)`: the move captured, the turn passed to the opponent.
    /// `Ok(false)`: target occupied or nothing to capture; occupancy and
    /// turn are unchanged. Out-of-range coordinates are an error.
    pub fn make_move(&mut self, coord: &[usize]) -> Result<bool, EngineError> {
        let flipped = self.board.place(coord, self.current_player)?;
        if flipped.is_empty() {
            return Ok(false);
        }

        self.is_pass = false;
        self.flipped = flipped;
        self.current_player = self.current_player.opponent();
        Ok(true)
    }

    /// Gives the turn to the opponent without moving. Whether passing was
    /// warranted is the caller's concern.
    pub fn pass(&mut self) {
        self.is_pass = true;
        self.flipped.clear();
        self.current_player = self.current_player.opponent();
    }

    pub fn get(&self, coord: &[usize]) -> Result<Cell, EngineError> {
        self.board.get(coord)
    }

    pub fn legal_move(&self, coord: &[usize], player: Player) -> Result<bool, EngineError> {
        self.board.legal_move(coord, player)
    }

    pub fn active_player(&self) -> Player {
        self.current_player
    }

    pub fn side_length(&self) -> usize {
        self.board.side_length()
    }

    pub fn dimension_count(&self) -> usize {
        self.board.dimension_count()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_cells(),
            current_player: self.current_player as u8,
            dimensions: self.board.dimension_count() as u32,
            size: self.board.side_length() as u32,
            is_pass: self.is_pass,
            flipped: self.flipped.iter().map(|&i| i as u32).collect(),
        }
    }

    /// CRC32 digest of the occupancy planes and the turn token.
    ///
    /// Two instances constructed with the same parameters and fed the same
    /// moves in the same order report the same checksum, so a relay layer
    /// can verify that mirrored games are still in sync. Legal-move hints
    /// are advisory and excluded.
    pub fn checksum(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        self.board.update_digest(&mut hasher);
        hasher.update(&[self.current_player as u8]);
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::flatten;

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::new(2, 4).expect("valid configuration");
        let state = game.to_game_state();

        assert_eq!(game.active_player(), Player::Black);
        assert_eq!(state.current_player, 0);
        assert_eq!(state.dimensions, 2);
        assert_eq!(state.size, 4);
        assert_eq!(state.board.len(), 16);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(
            state.board.iter().filter(|&&c| c != Cell::Empty.code()).count(),
            4
        );
    }

    #[test]
    fn construction_errors_propagate() {
        assert_eq!(
            GameInstance::new(2, 6).map(|_| ()),
            Ok(())
        );
        assert_eq!(
            GameInstance::new(2, 5).unwrap_err(),
            EngineError::InvalidSideLength(5)
        );
    }

    #[test]
    fn successful_move_flips_and_toggles_the_turn() {
        let mut game = GameInstance::new(2, 4).unwrap();

        assert_eq!(game.make_move(&[0, 1]), Ok(true));

        assert_eq!(game.get(&[0, 1]).unwrap(), Cell::Black);
        assert_eq!(game.get(&[1, 1]).unwrap(), Cell::Black);
        assert_eq!(game.active_player(), Player::White);

        let state = game.to_game_state();
        assert!(!state.is_pass);
        assert_eq!(state.flipped, vec![flatten(&[1, 1], 4) as u32]);
    }

    #[test]
    fn illegal_move_changes_no_cell_and_keeps_the_turn() {
        let mut game = GameInstance::new(2, 4).unwrap();
        let before = game.to_game_state().board;

        // Occupied target.
        assert_eq!(game.make_move(&[1, 1]), Ok(false));
        // Empty target with no capturing direction.
        assert_eq!(game.make_move(&[3, 3]), Ok(false));

        assert_eq!(game.to_game_state().board, before);
        assert_eq!(game.active_player(), Player::Black);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected_not_wrapped() {
        let mut game = GameInstance::new(2, 4).unwrap();

        assert_eq!(
            game.make_move(&[0, 4]).unwrap_err(),
            EngineError::CoordinateOutOfRange { value: 4, size: 4 }
        );
        assert_eq!(
            game.get(&[4, 0]).unwrap_err(),
            EngineError::CoordinateOutOfRange { value: 4, size: 4 }
        );
        assert_eq!(
            game.legal_move(&[0, 0, 0], Player::Black).unwrap_err(),
            EngineError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn pass_toggles_the_turn_and_nothing_else() {
        let mut game = GameInstance::new(2, 4).unwrap();
        let before = game.to_game_state().board;

        game.pass();

        let state = game.to_game_state();
        assert_eq!(game.active_player(), Player::White);
        assert!(state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(state.board, before);

        game.pass();
        assert_eq!(game.active_player(), Player::Black);
    }

    #[test]
    fn move_after_pass_clears_the_pass_flag() {
        let mut game = GameInstance::new(2, 4).unwrap();

        game.pass();
        assert!(game.to_game_state().is_pass);

        // White to move after the pass.
        assert_eq!(game.make_move(&[0, 2]), Ok(true));
        assert!(!game.to_game_state().is_pass);
    }

    #[test]
    fn mirrored_instances_agree_on_checksums() {
        let mut left = GameInstance::new(2, 4).unwrap();
        let mut right = GameInstance::new(2, 4).unwrap();
        assert_eq!(left.checksum(), right.checksum());

        // Replaying the relayed actions keeps the digests aligned.
        assert!(left.make_move(&[0, 1]).unwrap());
        assert!(right.make_move(&[0, 1]).unwrap());
        assert_eq!(left.checksum(), right.checksum());

        left.pass();
        assert_ne!(left.checksum(), right.checksum());
        right.pass();
        assert_eq!(left.checksum(), right.checksum());
    }

    #[test]
    fn checksum_ignores_advisory_hint_updates() {
        let mut left = GameInstance::new(2, 4).unwrap();
        let right = GameInstance::new(2, 4).unwrap();

        // A rejected move may record hint bits but never occupancy.
        assert_eq!(left.make_move(&[3, 3]), Ok(false));
        assert_eq!(left.checksum(), right.checksum());
    }

    #[test]
    fn works_in_four_dimensions() {
        let mut game = GameInstance::new(4, 4).unwrap();
        let state = game.to_game_state();

        assert_eq!(state.board.len(), 256);
        assert_eq!(
            state.board.iter().filter(|&&c| c != Cell::Empty.code()).count(),
            16
        );

        // (1,1,1,1) is white in four dimensions; black captures it by
        // landing at (1,1,1,0) against its stone at (1,1,1,2).
        assert_eq!(game.get(&[1, 1, 1, 1]).unwrap(), Cell::White);
        assert_eq!(game.get(&[1, 1, 1, 2]).unwrap(), Cell::Black);
        assert_eq!(game.make_move(&[1, 1, 1, 0]), Ok(true));
        assert_eq!(game.get(&[1, 1, 1, 1]).unwrap(), Cell::Black);
        assert_eq!(game.active_player(), Player::White);
    }
}
