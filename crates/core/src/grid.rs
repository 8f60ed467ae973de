//! Grid module - tile storage and near-square sizing
//!
//! Tiles are stored row-major in a flat `Vec`. The grid never changes size
//! after creation; a new game builds a new grid.

use crate::rng::SimpleRng;
use crate::settings::GameParams;
use crate::symbols::shuffled_pool;
use crate::types::Position;

/// Pick `(rows, cols)` with `rows * cols == total` and the smallest `|rows - cols|`.
///
/// Candidate row counts are scanned downward from `floor(sqrt(total))`; only a
/// strictly smaller difference replaces the current best, so the first pair
/// found wins ties. Scanning from the square root down means `rows <= cols`.
pub fn grid_dimensions(total: usize) -> (usize, usize) {
    let mut best = (1, total);
    let mut min_diff = usize::MAX;

    let mut r = isqrt(total);
    while r > 0 {
        if total % r == 0 {
            let c = total / r;
            let diff = r.abs_diff(c);
            if diff < min_diff {
                min_diff = diff;
                best = (r, c);
            }
        }
        r -= 1;
    }

    best
}

/// Integer square root (floor).
fn isqrt(n: usize) -> usize {
    if n < 2 {
        return n;
    }
    // Float estimate, then correct for rounding in either direction.
    let mut r = (n as f64).sqrt() as usize;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}

/// A single tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    symbol: String,
    flipped: bool,
    disabled: bool,
}

impl Tile {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            flipped: false,
            disabled: false,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Matched and removed from play.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Face down and still in play.
    pub fn is_selectable(&self) -> bool {
        !self.flipped && !self.disabled
    }

    pub(crate) fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    pub(crate) fn disable(&mut self) {
        self.disabled = true;
    }
}

/// Row-major tile grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Size the grid for `params` and deal a freshly shuffled symbol pool.
    pub fn new(params: GameParams, rng: &mut SimpleRng) -> Self {
        let symbols = shuffled_pool(params.different_tiles(), params.group_size(), rng);
        Self::from_symbols(symbols)
    }

    /// Lay out `symbols` in row-major order on a near-square grid.
    pub fn from_symbols<S: Into<String>>(symbols: Vec<S>) -> Self {
        let (rows, cols) = grid_dimensions(symbols.len());
        let tiles = symbols.into_iter().map(Tile::new).collect();
        Self { rows, cols, tiles }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline(always)]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.cols.max(1), index % self.cols.max(1))
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.index_of(pos).map(|i| &self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, index: usize) -> &mut Tile {
        &mut self.tiles[index]
    }

    /// Tiles still in play.
    pub fn remaining(&self) -> usize {
        self.tiles.iter().filter(|t| !t.disabled).count()
    }

    /// Iterate `(position, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (self.position_of(i), t))
    }
}
