use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::error::EngineError;
use crate::plane::BitPlane;
use crate::types::{Cell, Player};

/// A capture-ray unit vector: one entry in {-1, 0, 1} per axis.
pub type Direction = Vec<i8>;

/// Direction tables are immutable and depend only on the dimension count,
/// so instances with the same `dim` share one table.
static DIRECTION_TABLES: Lazy<Mutex<HashMap<usize, Arc<Vec<Direction>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Enumerates all of `{-1,0,1}^dim` in fixed axis order, excluding the zero
/// vector. The result has exactly `3^dim - 1` entries.
pub fn generate_directions(dim: usize) -> Vec<Direction> {
    let mut directions = Vec::new();
    let mut current = Vec::with_capacity(dim);
    collect_directions(dim, &mut current, &mut directions);
    directions
}

fn collect_directions(dim: usize, current: &mut Vec<i8>, out: &mut Vec<Direction>) {
    if current.len() == dim {
        if current.iter().any(|&d| d != 0) {
            out.push(current.clone());
        }
        return;
    }
    for d in -1..=1i8 {
        current.push(d);
        collect_directions(dim, current, out);
        current.pop();
    }
}

fn directions_for(dim: usize) -> Arc<Vec<Direction>> {
    let mut cache = match DIRECTION_TABLES.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    cache
        .entry(dim)
        .or_insert_with(|| Arc::new(generate_directions(dim)))
        .clone()
}

/// Flattens a coordinate to a cell index as a mixed-radix number with
/// uniform base `size`, most-significant axis first.
/// Caller contract: every component must be below `size`.
pub fn flatten(coord: &[usize], size: usize) -> usize {
    coord.iter().fold(0, |index, &c| index * size + c)
}

/// Exact inverse of [`flatten`] for a `dim`-axis board.
pub fn unflatten(mut index: usize, dim: usize, size: usize) -> Vec<usize> {
    let mut coord = vec![0; dim];
    for slot in coord.iter_mut().rev() {
        *slot = index % size;
        index /= size;
    }
    coord
}

/// n-dimensional Reversi board state stored as bit-packed planes.
///
/// Three occupancy planes (black, white, empty) cover every cell; for each
/// cell exactly one of the three bits is set at all times. Two further
/// planes hold per-player legal-move hints. The hints are advisory: they
/// are seeded at construction and refreshed opportunistically during ray
/// scans, never recomputed globally, and never consulted to reject a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dim: usize,
    size: usize,
    cells: usize,
    planes: [BitPlane; 3],
    legal: [BitPlane; 2],
    directions: Arc<Vec<Direction>>,
}

impl Board {
    /// Creates the initial position: the central `2^dim` hyper-cube seeded
    /// in an alternating pattern, every other cell empty.
    pub fn new(dim: usize, size: usize) -> Result<Self, EngineError> {
        if dim == 0 {
            return Err(EngineError::InvalidDimensionCount);
        }
        if size <= 2 || size % 2 != 0 {
            return Err(EngineError::InvalidSideLength(size));
        }
        let exponent = u32::try_from(dim).map_err(|_| EngineError::BoardTooLarge { dim, size })?;
        let cells = size
            .checked_pow(exponent)
            .ok_or(EngineError::BoardTooLarge { dim, size })?;

        let mut board = Self {
            dim,
            size,
            cells,
            planes: [
                BitPlane::zeroed(cells),
                BitPlane::zeroed(cells),
                BitPlane::filled(cells),
            ],
            legal: [BitPlane::zeroed(cells), BitPlane::zeroed(cells)],
            directions: directions_for(dim),
        };
        board.seed_center(0, false, &mut Vec::with_capacity(dim));
        board.seed_legal_hints();
        Ok(board)
    }

    pub fn dimension_count(&self) -> usize {
        self.dim
    }

    pub fn side_length(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells
    }

    /// Validates a coordinate and flattens it to a cell index.
    pub fn to_index(&self, coord: &[usize]) -> Result<usize, EngineError> {
        if coord.len() != self.dim {
            return Err(EngineError::DimensionMismatch {
                expected: self.dim,
                got: coord.len(),
            });
        }
        for &c in coord {
            if c >= self.size {
                return Err(EngineError::CoordinateOutOfRange {
                    value: c,
                    size: self.size,
                });
            }
        }
        Ok(flatten(coord, self.size))
    }

    /// Inverse of [`Board::to_index`].
    pub fn from_index(&self, index: usize) -> Vec<usize> {
        unflatten(index, self.dim, self.size)
    }

    pub fn get(&self, coord: &[usize]) -> Result<Cell, EngineError> {
        Ok(self.cell_at(self.to_index(coord)?))
    }

    /// Whether the legal-move hint plane marks this cell for `player`.
    pub fn legal_move(&self, coord: &[usize], player: Player) -> Result<bool, EngineError> {
        Ok(self.legal[player.index()].get(self.to_index(coord)?))
    }

    /// Converts the board to one cell code per cell index
    /// (0=black, 1=white, 2=empty).
    pub fn to_cells(&self) -> Vec<u8> {
        (0..self.cells).map(|i| self.cell_at(i).code()).collect()
    }

    /// Places one stone for `player` and flips every captured run.
    /// Returns the flipped cell indices; an empty list means the move was
    /// illegal (occupied target or no capturing direction) and occupancy is
    /// unchanged. Scanning may still record legal-move hints for the
    /// opponent at empty neighbors of the target.
    pub fn place(&mut self, coord: &[usize], player: Player) -> Result<Vec<usize>, EngineError> {
        let origin = self.to_index(coord)?;
        if self.cell_at(origin) != Cell::Empty {
            return Ok(Vec::new());
        }

        let directions = Arc::clone(&self.directions);
        let mut flipped = Vec::new();
        for dir in directions.iter() {
            flipped.extend(self.scan_ray(coord, dir, player));
        }
        if flipped.is_empty() {
            return Ok(flipped);
        }

        for &index in &flipped {
            self.set_index(index, player);
        }
        self.set_index(origin, player);
        self.legal[Player::Black.index()].set(origin, false);
        self.legal[Player::White.index()].set(origin, false);
        Ok(flipped)
    }

    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        if self.planes[Cell::Empty as usize].get(index) {
            Cell::Empty
        } else if self.planes[Cell::Black as usize].get(index) {
            Cell::Black
        } else {
            Cell::White
        }
    }

    /// Feeds the occupancy planes into a running state digest.
    pub(crate) fn update_digest(&self, hasher: &mut crc32fast::Hasher) {
        hasher.update(self.planes[Cell::Black as usize].as_bytes());
        hasher.update(self.planes[Cell::White as usize].as_bytes());
    }

    fn set_index(&mut self, index: usize, player: Player) {
        self.planes[Cell::Empty as usize].set(index, false);
        self.planes[player.opponent().index()].set(index, false);
        self.planes[player.index()].set(index, true);
    }

    /// Walks outward from `origin + dir` and returns the maximal contiguous
    /// opponent run bounded by one of `player`'s own stones, or an empty
    /// run when the ray captures nothing. An empty cell at the very first
    /// step marks an opponent legal-move hint there.
    fn scan_ray(&mut self, origin: &[usize], dir: &[i8], player: Player) -> Vec<usize> {
        let mut cur: Vec<i64> = origin.iter().map(|&c| c as i64).collect();
        let mut run = Vec::new();
        let mut first = true;
        loop {
            for (c, &d) in cur.iter_mut().zip(dir) {
                *c += i64::from(d);
            }
            if cur.iter().any(|&c| c < 0 || c >= self.size as i64) {
                return Vec::new();
            }
            let index = cur.iter().fold(0usize, |acc, &c| acc * self.size + c as usize);

            let cell = self.cell_at(index);
            if cell == Cell::Empty {
                if first {
                    self.legal[player.opponent().index()].set(index, true);
                }
                return Vec::new();
            }
            if cell == Cell::from(player) {
                return run;
            }
            run.push(index);
            first = false;
        }
    }

    /// Seeds the central hyper-cube one axis at a time, alternating the
    /// parity flag per axis so that no two cells adjacent along a single
    /// axis share a color. For `dim=2, size=4` this is the classic opening:
    /// (1,1)=white, (1,2)=black, (2,1)=black, (2,2)=white.
    fn seed_center(&mut self, axis: usize, flip: bool, base: &mut Vec<usize>) {
        let mid = self.size / 2;
        if axis + 1 == self.dim {
            base.push(mid);
            let hi = flatten(base, self.size);
            base.pop();
            base.push(mid - 1);
            let lo = flatten(base, self.size);
            base.pop();

            let color = if flip { Player::White } else { Player::Black };
            self.set_index(hi, color);
            self.set_index(lo, color.opponent());
            return;
        }

        base.push(mid);
        self.seed_center(axis + 1, !flip, base);
        base.pop();
        base.push(mid - 1);
        self.seed_center(axis + 1, flip, base);
        base.pop();
    }

    /// One full pass over every occupied cell: each empty immediate
    /// neighbor gets the legal-move hint for the stone's opponent. This is
    /// a local seeding, not a global legality computation.
    fn seed_legal_hints(&mut self) {
        let directions = Arc::clone(&self.directions);
        for index in 0..self.cells {
            let owner = match self.cell_at(index) {
                Cell::Black => Player::Black,
                Cell::White => Player::White,
                Cell::Empty => continue,
            };
            let coord = self.from_index(index);
            for dir in directions.iter() {
                if let Some(neighbor) = self.offset(&coord, dir)
                    && self.cell_at(neighbor) == Cell::Empty
                {
                    self.legal[owner.opponent().index()].set(neighbor, true);
                }
            }
        }
    }

    /// Index of `coord + dir`, or None when the step leaves the board.
    fn offset(&self, coord: &[usize], dir: &[i8]) -> Option<usize> {
        let mut index = 0usize;
        for (&c, &d) in coord.iter().zip(dir) {
            let stepped = c as i64 + i64::from(d);
            if stepped < 0 || stepped >= self.size as i64 {
                return None;
            }
            index = index * self.size + stepped as usize;
        }
        Some(index)
    }
}
