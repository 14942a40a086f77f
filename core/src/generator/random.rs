use super::*;
use ndarray::Array2;

/// Lights every cell independently with the configured probability.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let GameConfig {
            size,
            chance_light_starts_on: chance,
            threshold,
        } = config;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let lights = Array2::from_shape_fn(size.to_nd_index(), |_| {
            threshold.starts_lit(rng.random(), chance)
        });
        let board = Board::from_lights(lights);

        log::debug!(
            "Generated {}x{} board, {} of {} cells lit ({:?}, chance {})",
            size.0,
            size.1,
            board.lit_count(),
            board.total_cells(),
            threshold,
            chance
        );
        if board.has_won() {
            log::debug!("Generated board starts out solved");
        }
        board
    }
}
