use ndarray::Array2;

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for lit-cell and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(y, x)`, row first.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait PlusIterExt {
    /// Cells toggled by activating `center`: the center itself and its orthogonal neighbors, clipped to the grid.
    fn iter_plus(&self, center: Coord2) -> PlusIter;
}

impl<T> PlusIterExt for Array2<T> {
    fn iter_plus(&self, center: Coord2) -> PlusIter {
        let (rows, cols) = self.dim();
        let bounds = (clamp_axis(rows), clamp_axis(cols));
        PlusIter::new(center, bounds)
    }
}

fn clamp_axis(len: usize) -> Coord {
    len.try_into().unwrap_or(Coord::MAX)
}

/// `(dy, dx)` offsets in toggle order: center, left, up, right, down.
const DISPLACEMENTS: [(i8, i8); 5] = [(0, 0), (0, -1), (-1, 0), (0, 1), (1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (y, x) = coords;
    let (dy, dx) = delta;
    let (rows, cols) = bounds;

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= rows {
        return None;
    }

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= cols {
        return None;
    }

    Some((next_y, next_x))
}

#[derive(Debug, Clone)]
pub struct PlusIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl PlusIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for PlusIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
