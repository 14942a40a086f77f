#![no_std]

extern crate alloc;

use alloc::string::String;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use key::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod key;
mod types;

/// How a uniform draw in `[0, 1)` is compared against the configured lit probability.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdPolicy {
    /// Round the draw to one decimal place first, so only 11 distinct thresholds exist.
    #[default]
    Quantized,
    /// Compare the raw draw.
    Continuous,
}

impl ThresholdPolicy {
    pub fn starts_lit(self, draw: f64, chance: f64) -> bool {
        match self {
            Self::Quantized => quantize(draw) <= chance,
            Self::Continuous => draw <= chance,
        }
    }
}

/// Rounds a draw in `[0, 1)` to the nearest tenth, judged on the exact value of the `f64` and with ties going up.
///
/// `0.15_f64` is slightly below 0.15, so it rounds to 0.1; `0.25_f64` is exact and rounds to 0.3.
fn quantize(draw: f64) -> f64 {
    // one tenth per midpoint 0.05, 0.15, .., 0.95 at or below the draw
    let tenths = (0..10u32)
        .filter(|&j| at_least_ratio(draw, 2 * j + 1, 20))
        .count() as u32;
    tenths as f64 / 10.0
}

/// Exact `value >= num / den` for `value` in `[0, 1)`.
fn at_least_ratio(value: f64, num: u32, den: u32) -> bool {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);

    // value == mantissa / 2^shift
    let (mantissa, shift) = if exponent == 0 {
        (fraction, 1074)
    } else {
        (fraction | (1 << 52), 1075 - exponent)
    };

    if value.is_sign_negative() || mantissa == 0 {
        return num == 0;
    }
    if shift <= 0 {
        return true;
    }
    // anything this small is below every ratio we compare against
    if shift > 120 {
        return false;
    }

    u128::from(mantissa) * u128::from(den) >= u128::from(num) << shift
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub chance_light_starts_on: f64,
    pub threshold: ThresholdPolicy,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, chance_light_starts_on: f64) -> Self {
        Self {
            size,
            chance_light_starts_on,
            threshold: ThresholdPolicy::Quantized,
        }
    }

    pub fn new((rows, cols): Coord2, chance_light_starts_on: f64) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let chance = if chance_light_starts_on.is_nan() {
            0.0
        } else {
            chance_light_starts_on.clamp(0.0, 1.0)
        };
        Self::new_unchecked((rows, cols), chance)
    }

    pub const fn with_threshold(self, threshold: ThresholdPolicy) -> Self {
        Self { threshold, ..self }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
}

/// What one cell view needs: where it is, its key, and whether it is lit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellInfo {
    pub coords: Coord2,
    pub key: String,
    pub is_lit: bool,
}

/// The lit/unlit grid, indexed `(y, x)`.
///
/// Flipping returns a new board, so any board a caller holds stays a valid snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    lights: Array2<bool>,
}

impl Board {
    /// An all-dark board of `(rows, cols)`; each axis is raised to at least 1.
    pub fn new((rows, cols): Coord2) -> Self {
        let size = (rows.max(1), cols.max(1));
        Self {
            lights: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |row| row.as_ref().len());

        if n_rows == 0 || n_cols == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if n_rows > Coord::MAX.into() || n_cols > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }
        if rows.iter().any(|row| row.as_ref().len() != n_cols) {
            return Err(GameError::InvalidBoardShape);
        }

        let lights = Array2::from_shape_fn((n_rows, n_cols), |(y, x)| rows[y].as_ref()[x]);
        Ok(Self { lights })
    }

    pub(crate) fn from_lights(lights: Array2<bool>) -> Self {
        Self { lights }
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.lights.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.lights.len() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn is_lit_at(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn lit_count(&self) -> CellCount {
        self.lights.iter().filter(|&&lit| lit).count() as CellCount
    }

    pub fn has_won(&self) -> bool {
        self.lights.iter().all(|&lit| !lit)
    }

    pub fn state(&self) -> GameState {
        if self.has_won() {
            GameState::Won
        } else {
            GameState::Playing
        }
    }

    /// Cells that activating `coords` toggles, in toggle order.
    pub fn flip_targets(&self, coords: Coord2) -> PlusIter {
        self.lights.iter_plus(coords)
    }

    /// Toggles `coords` and its orthogonal neighbors into a new board. Targets off the grid are skipped.
    pub fn flip_cells_around(&self, coords: Coord2) -> Board {
        let mut lights = self.lights.clone();
        for pos in self.flip_targets(coords) {
            let cell = &mut lights[pos.to_nd_index()];
            *cell = !*cell;
        }
        Self { lights }
    }

    pub fn cell_info(&self, coords: Coord2) -> CellInfo {
        CellInfo {
            coords,
            key: coord_key(coords),
            is_lit: self[coords],
        }
    }

    pub fn row_cells(&self, y: Coord) -> impl Iterator<Item = CellInfo> + '_ {
        (0..self.cols()).map(move |x| self.cell_info((y, x)))
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellInfo> + '_ {
        (0..self.rows()).flat_map(move |y| self.row_cells(y))
    }
}

impl Index<Coord2> for Board {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.lights[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    Flipped,
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const T: bool = true;
    const F: bool = false;

    fn board<const C: usize>(rows: &[[bool; C]]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn corner_flip_skips_missing_neighbors() {
        let dark = Board::new((3, 3));
        let flipped = dark.flip_cells_around((0, 0));

        assert_eq!(flipped, board(&[[T, T, F], [T, F, F], [F, F, F]]));
        assert_eq!(flipped.lit_count(), 3);
    }

    #[test]
    fn center_flip_toggles_plus_shape() {
        let lit = board(&[[T, T, T], [T, T, T], [T, T, T]]);
        let flipped = lit.flip_cells_around((1, 1));

        assert_eq!(flipped, board(&[[T, F, T], [F, F, F], [T, F, T]]));
        assert!(!flipped.has_won());
    }

    #[test]
    fn flip_leaves_the_source_board_untouched() {
        let before = board(&[[T, F], [F, T]]);
        let snapshot = before.clone();

        let after = before.flip_cells_around((0, 1));

        assert_eq!(before, snapshot);
        assert_ne!(after, before);
    }

    #[test]
    fn has_won_only_when_everything_is_dark() {
        assert!(board(&[[F, F, F], [F, F, F], [F, F, F]]).has_won());
        assert!(!board(&[[F, F, F], [T, F, F], [F, F, F]]).has_won());
        assert_eq!(Board::new((2, 2)).state(), GameState::Won);
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        let empty: [[bool; 0]; 0] = [];
        assert_eq!(Board::from_rows(&empty), Err(GameError::InvalidBoardShape));
        assert_eq!(
            Board::from_rows(&[[F; 0]]),
            Err(GameError::InvalidBoardShape)
        );

        let ragged: Vec<Vec<bool>> = alloc::vec![alloc::vec![T, F], alloc::vec![T]];
        assert_eq!(Board::from_rows(&ragged), Err(GameError::InvalidBoardShape));

        let too_tall = alloc::vec![[F]; 256];
        assert_eq!(Board::from_rows(&too_tall), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn size_is_rows_then_cols() {
        let wide = board(&[[F, F, F, F], [F, F, F, F]]);
        assert_eq!(wide.size(), (2, 4));
        assert_eq!(wide.validate_coords((1, 3)), Ok((1, 3)));
        assert_eq!(wide.validate_coords((3, 1)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn cells_expose_keys_in_row_major_order() {
        let b = board(&[[T, F], [F, F]]);
        let cells: Vec<_> = b.cells().collect();

        assert_eq!(cells.len(), 4);
        assert_eq!(
            cells[0],
            CellInfo {
                coords: (0, 0),
                key: "0-0".into(),
                is_lit: true
            }
        );
        assert_eq!(cells[1].key, "0-1");
        assert_eq!(cells[2].key, "1-0");
        assert!(cells[1..].iter().all(|cell| !cell.is_lit));
    }

    #[test]
    fn config_clamps_out_of_range_values() {
        let config = GameConfig::new((0, 3), 1.5);
        assert_eq!(config.size, (1, 3));
        assert_eq!(config.chance_light_starts_on, 1.0);

        assert_eq!(GameConfig::new((2, 2), -0.5).chance_light_starts_on, 0.0);
        assert_eq!(GameConfig::new((2, 2), f64::NAN).chance_light_starts_on, 0.0);
        assert_eq!(GameConfig::new((5, 5), 0.25).total_cells(), 25);
    }

    #[test]
    fn quantized_threshold_rounds_to_tenths() {
        use ThresholdPolicy::*;

        // 0.04 rounds down to 0.0, 0.06 rounds up to 0.1
        assert!(Quantized.starts_lit(0.04, 0.0));
        assert!(!Quantized.starts_lit(0.06, 0.0));
        assert!(Quantized.starts_lit(0.34, 0.3));
        assert!(!Quantized.starts_lit(0.36, 0.3));
        assert!(Quantized.starts_lit(0.99, 1.0));

        assert!(!Continuous.starts_lit(0.04, 0.0));
        assert!(Continuous.starts_lit(0.3, 0.3));
        assert!(!Continuous.starts_lit(0.31, 0.3));
    }

    #[test]
    fn quantized_threshold_rounds_the_exact_decimal_value() {
        // each literal's f64 lies just below or above the midpoint, or on it exactly
        let cases = [
            (0.0, 0.0),
            (0.05, 0.1),
            (0.15, 0.1),
            (0.25, 0.3),
            (0.35, 0.3),
            (0.45, 0.5),
            (0.85, 0.8),
            (0.95, 0.9),
            (0.999, 1.0),
            (f64::MIN_POSITIVE, 0.0),
        ];
        for (draw, tenths) in cases {
            assert_eq!(quantize(draw), tenths, "draw {}", draw);
        }

        assert!(ThresholdPolicy::Quantized.starts_lit(0.15, 0.1));
        assert!(!ThresholdPolicy::Quantized.starts_lit(0.25, 0.2));
    }
}
