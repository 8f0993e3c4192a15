//! # Board Analysis
//!
//! The maze exists only as background graphics: a 32×32 grid of tile IDs.
//! [`Board::build`] scans that grid once at startup and derives, for every
//! logical cell, a [`Capability`] mask saying which ways an actor may leave
//! the cell and whether the cell holds food.
//!
//! ## Cells and tiles
//!
//! A logical cell covers a `block`×`block` square of tiles, starting at tile
//! `origin` on both axes. The quad maze uses 2×2 blocks from tile 1:
//!
//! ```text
//!          col 1  col 2  col 3  col 4
//! row 1  ┌──────┬──────┬──────┬──────┐
//!        │  TL  │  TR  │  TL  │  TR  │
//! row 2  ├─cell (0,0)──┼─cell (1,0)──┤
//!        │  BL  │  BR  │  BL  │  BR  │
//!        └──────┴──────┴──────┴──────┘
//! ```
//!
//! The top-left tile is the cell's *center*. Food is drawn across all four
//! tiles of a block, so each quad position has its own food tile ID.
//!
//! ## Neighbor probes
//!
//! Whether an actor can go from one cell into the next is decided by a
//! single tile of the neighbor's block. Which tile is configurable, see
//! [`NeighborProbe`]. For 1×1 blocks both choices probe the same tile.

use core::fmt::Write;

use crate::error::Error;

/// Tiles per side of the background map.
pub const MAP_SIZE: usize = 32;
/// Upper bound on logical cells per axis.
pub const MAX_CELLS: usize = MAP_SIZE;

bitflags::bitflags! {
    /// What an actor standing in a cell may do.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct Capability: u8 {
        const CAN_GO_LEFT  = 0b0000_0001;
        const CAN_GO_RIGHT = 0b0000_0010;
        const CAN_GO_UP    = 0b0000_0100;
        const CAN_GO_DOWN  = 0b0000_1000;
        const FOOD         = 0b0001_0000;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The order in which the autopilot tries directions.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub const fn capability(self) -> Capability {
        match self {
            Direction::Up => Capability::CAN_GO_UP,
            Direction::Right => Capability::CAN_GO_RIGHT,
            Direction::Down => Capability::CAN_GO_DOWN,
            Direction::Left => Capability::CAN_GO_LEFT,
        }
    }
}

/// A logical board position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// The adjacent cell, or `None` when that would leave `0..=u8::MAX`.
    pub fn step(self, dir: Direction) -> Option<Cell> {
        let Cell { x, y } = self;
        Some(match dir {
            Direction::Up => Cell::new(x, y.checked_sub(1)?),
            Direction::Right => Cell::new(x.checked_add(1)?, y),
            Direction::Down => Cell::new(x, y.checked_add(1)?),
            Direction::Left => Cell::new(x.checked_sub(1)?, y),
        })
    }
}

/// The background tile grid, row-major.
#[derive(Clone)]
pub struct TileMap {
    rows: [[u8; MAP_SIZE]; MAP_SIZE],
}

impl TileMap {
    /// Build from a flat `(row << 5) + col` array, the layout the graphics
    /// tools emit.
    pub const fn new(flat: [u8; MAP_SIZE * MAP_SIZE]) -> Self {
        let mut rows = [[0u8; MAP_SIZE]; MAP_SIZE];
        let mut i = 0;
        while i < flat.len() {
            rows[i >> 5][i & 31] = flat[i];
            i += 1;
        }
        Self { rows }
    }

    pub const fn from_rows(rows: [[u8; MAP_SIZE]; MAP_SIZE]) -> Self {
        Self { rows }
    }

    /// Panics on out-of-map coordinates; [`BoardLayout::validate`] makes
    /// sure the analyzer never asks for one.
    #[inline(always)]
    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.rows[row][col]
    }
}

/// Which tile of a neighboring block decides passability.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NeighborProbe {
    /// The neighbor-block tile that touches the current block. Above and
    /// left therefore land on the neighbor's bottom or right edge.
    NearEdge,
    /// Always the neighbor block's center tile.
    Center,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    pub cols: usize,
    pub rows: usize,
    /// Tiles per cell side.
    pub block: usize,
    /// Tile index of cell 0 on both axes.
    pub origin: usize,
    pub probe: NeighborProbe,
}

impl BoardLayout {
    /// 15×14 cells of 2×2 tiles behind a one-tile border.
    pub const QUAD: BoardLayout = BoardLayout {
        cols: 15,
        rows: 14,
        block: 2,
        origin: 1,
        probe: NeighborProbe::NearEdge,
    };

    /// 31×31 cells, one tile each.
    pub const SINGLE: BoardLayout = BoardLayout {
        cols: 31,
        rows: 31,
        block: 1,
        origin: 0,
        probe: NeighborProbe::NearEdge,
    };

    pub fn validate(&self) -> Result<(), Error> {
        let fits = |cells: usize| {
            cells >= 1 && cells <= MAX_CELLS && self.origin + cells * self.block <= MAP_SIZE
        };
        if self.block >= 1 && fits(self.cols) && fits(self.rows) {
            Ok(())
        } else {
            Err(Error::LayoutOutOfBounds)
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (cell.x as usize) < self.cols && (cell.y as usize) < self.rows
    }

    /// `(row, col)` of the cell's center tile.
    #[inline]
    pub fn center(&self, cell: Cell) -> (usize, usize) {
        (
            self.origin + cell.y as usize * self.block,
            self.origin + cell.x as usize * self.block,
        )
    }

    /// `(row, col)` of the tile that decides whether `cell` may move in
    /// `dir`, or `None` at the board edge.
    pub fn probe(&self, cell: Cell, dir: Direction) -> Option<(usize, usize)> {
        let (row, col) = self.center(cell);
        let near = self.probe == NeighborProbe::NearEdge;
        match dir {
            Direction::Up if cell.y > 0 => {
                Some((if near { row - 1 } else { row - self.block }, col))
            }
            Direction::Left if cell.x > 0 => {
                Some((row, if near { col - 1 } else { col - self.block }))
            }
            Direction::Down if (cell.y as usize) + 1 < self.rows => Some((row + self.block, col)),
            Direction::Right if (cell.x as usize) + 1 < self.cols => Some((row, col + self.block)),
            _ => None,
        }
    }

    /// Position of a tile inside its block: 0 TL, 1 TR, 2 BL, 3 BR.
    #[inline]
    pub fn quad_slot(&self, row: usize, col: usize) -> usize {
        if self.block < 2 {
            return 0;
        }
        let bottom = (row - self.origin) % self.block != 0;
        let right = (col - self.origin) % self.block != 0;
        (bottom as usize) * 2 + right as usize
    }
}

/// Tile IDs the analyzer treats as walkable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileSet {
    pub blank: u8,
    /// Food tile per quad slot (TL, TR, BL, BR).
    pub food: [u8; 4],
}

impl TileSet {
    pub const QUAD: TileSet = TileSet {
        blank: 0,
        food: [4, 5, 12, 13],
    };

    pub const SINGLE: TileSet = TileSet {
        blank: 0,
        food: [4; 4],
    };

    #[inline]
    fn is_open(&self, tile: u8, slot: usize) -> bool {
        tile == self.blank || tile == self.food[slot]
    }
}

/// Per-cell capabilities derived from a [`TileMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    layout: BoardLayout,
    cells: [[Capability; MAX_CELLS]; MAX_CELLS],
}

impl Board {
    pub fn build(map: &TileMap, layout: BoardLayout, tiles: TileSet) -> Result<Board, Error> {
        layout.validate()?;

        let mut cells = [[Capability::empty(); MAX_CELLS]; MAX_CELLS];
        for y in 0..layout.rows {
            for x in 0..layout.cols {
                let cell = Cell::new(x as u8, y as u8);
                let (row, col) = layout.center(cell);
                let center = map.tile(row, col);
                if !tiles.is_open(center, 0) {
                    continue;
                }

                let mut caps = Capability::empty();
                caps.set(Capability::FOOD, center == tiles.food[0]);
                for dir in Direction::PRIORITY {
                    if let Some((r, c)) = layout.probe(cell, dir) {
                        if tiles.is_open(map.tile(r, c), layout.quad_slot(r, c)) {
                            caps.insert(dir.capability());
                        }
                    }
                }
                cells[y][x] = caps;
            }
        }

        Ok(Board { layout, cells })
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Capabilities of `cell`; empty (wall) outside the board.
    #[inline]
    pub fn capability(&self, cell: Cell) -> Capability {
        if self.layout.contains(cell) {
            self.cells[cell.y as usize][cell.x as usize]
        } else {
            Capability::empty()
        }
    }

    /// Clear the food bit of `cell`. Returns whether there was food.
    pub fn take_food(&mut self, cell: Cell) -> bool {
        if !self.layout.contains(cell) {
            return false;
        }
        let caps = &mut self.cells[cell.y as usize][cell.x as usize];
        let had = caps.contains(Capability::FOOD);
        caps.remove(Capability::FOOD);
        had
    }

    pub fn food_remaining(&self) -> usize {
        self.cells[..self.layout.rows]
            .iter()
            .flat_map(|row| &row[..self.layout.cols])
            .filter(|c| c.contains(Capability::FOOD))
            .count()
    }

    /// Emit the grid as hex rows at debug level.
    pub fn log_dump(&self) {
        log::debug!("board {}x{}:", self.layout.cols, self.layout.rows);
        for row in &self.cells[..self.layout.rows] {
            let mut line: heapless::String<{ MAX_CELLS * 3 }> = heapless::String::new();
            for caps in &row[..self.layout.cols] {
                // capacity covers MAX_CELLS entries
                let _ = write!(line, "{:02x} ", caps.bits());
            }
            log::debug!("{}", line.trim_end());
        }
    }
}
