use crate::*;

/// A running game: owns the current board and replaces it on every activation.
///
/// Whether the game is won is always read off the board, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightsOut {
    board: Board,
}

impl LightsOut {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::from_board(RandomBoardGenerator::new(seed).generate(config))
    }

    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn is_won(&self) -> bool {
        self.board.has_won()
    }

    pub fn lit_count(&self) -> CellCount {
        self.board.lit_count()
    }

    pub fn is_lit_at(&self, coords: Coord2) -> bool {
        self.board.is_lit_at(coords)
    }

    pub fn activate(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.board.validate_coords(coords).inspect_err(|_| {
            log::trace!("activation outside the board: {:?}", coords);
        })?;
        self.check_playing()?;

        self.board = self.board.flip_cells_around(coords);

        Ok(if self.board.has_won() {
            FlipOutcome::Won
        } else {
            FlipOutcome::Flipped
        })
    }

    /// Same as [`activate`](Self::activate), taking the `"y-x"` form of the coordinate.
    pub fn activate_key(&mut self, key: &str) -> Result<FlipOutcome> {
        let coords = parse_coord_key(key)?;
        self.activate(coords)
    }

    fn check_playing(&self) -> Result<()> {
        match self.state() {
            GameState::Playing => Ok(()),
            GameState::Won => Err(GameError::AlreadyEnded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: bool = true;
    const F: bool = false;

    fn game<const C: usize>(rows: &[[bool; C]]) -> LightsOut {
        LightsOut::from_board(Board::from_rows(rows).unwrap())
    }

    #[test]
    fn solving_the_lit_three_by_three() {
        let mut game = game(&[[T; 3]; 3]);
        assert_eq!(game.state(), GameState::Playing);

        assert_eq!(game.activate((1, 1)), Ok(FlipOutcome::Flipped));
        assert_eq!(
            game.board(),
            &Board::from_rows(&[[T, F, T], [F, F, F], [T, F, T]]).unwrap()
        );

        assert_eq!(game.activate((0, 0)), Ok(FlipOutcome::Flipped));
        assert_eq!(game.activate((2, 2)), Ok(FlipOutcome::Flipped));
        assert_eq!(game.activate((0, 2)), Ok(FlipOutcome::Flipped));
        assert_eq!(game.activate((2, 0)), Ok(FlipOutcome::Won));
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn corner_move_on_small_board() {
        let mut game = game(&[[T, F], [F, F]]);

        assert_eq!(game.activate((0, 0)), Ok(FlipOutcome::Flipped));
        assert_eq!(game.lit_count(), 2);
    }

    #[test]
    fn moves_after_winning_are_rejected() {
        let mut game = game(&[[T]]);

        assert_eq!(game.activate((0, 0)), Ok(FlipOutcome::Won));
        assert_eq!(game.activate((0, 0)), Err(GameError::AlreadyEnded));
        assert!(game.is_won());
    }

    #[test]
    fn dark_start_is_already_won() {
        let mut game = LightsOut::from_board(Board::new((3, 3)));
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.activate((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn out_of_bounds_activation_is_an_error_and_changes_nothing() {
        let mut game = game(&[[T, T], [T, T]]);
        let before = game.board().clone();

        assert_eq!(game.activate((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(game.activate((0, 2)), Err(GameError::InvalidCoords));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn activation_by_key() {
        let mut game = game(&[[T, T, T], [T, T, T]]);

        assert_eq!(game.activate_key("1-2"), Ok(FlipOutcome::Flipped));
        assert!(!game.is_lit_at((1, 2)));
        assert!(!game.is_lit_at((1, 1)));
        assert!(!game.is_lit_at((0, 2)));
        assert!(game.is_lit_at((0, 0)));

        assert_eq!(game.activate_key("1:2"), Err(GameError::InvalidCoordKey));
        assert_eq!(game.activate_key("9-9"), Err(GameError::InvalidCoords));
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let config = GameConfig::new((5, 5), 0.25);
        assert_eq!(LightsOut::new(config, 99), LightsOut::new(config, 99));
        assert_eq!(LightsOut::new(config, 99).size(), (5, 5));
    }
}
