#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use decorations::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod decorations;
mod engine;
mod error;
mod generator;
mod tile;
mod types;
mod view;

/// Side length and mine count of a square board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const SMALL: Self = Self::new_unchecked(10, 8);
    pub const MEADOW: Self = Self::new_unchecked(20, 35);

    pub(crate) const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// At least one cell has to stay free of mines, so `mines < size * size`.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 || mines >= square(size) {
            return Err(GameError::InvalidConfiguration { size, mines });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub fn validate(self) -> Result<Self> {
        Self::new(self.size, self.mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (row, col) = coords;
        if row < self.size && col < self.size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    /// Row-major linear index of `coords`.
    pub const fn index_of(&self, (row, col): Coord2) -> CellCount {
        row as CellCount * self.size as CellCount + col as CellCount
    }

    pub const fn coords_of(&self, index: CellCount) -> Coord2 {
        let size = self.size as CellCount;
        ((index / size) as Coord, (index % size) as Coord)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::MEADOW
    }
}

/// Where the mines are. Immutable once built, a reset builds a new one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    config: BoardConfig,
    mine_mask: Array2<bool>,
    positions: BTreeSet<CellCount>,
}

impl MineLayout {
    /// Builds a layout from distinct row-major indices.
    pub fn from_positions(size: Coord, positions: BTreeSet<CellCount>) -> Result<Self> {
        let mines = positions.len().try_into().unwrap_or(CellCount::MAX);
        let config = BoardConfig::new(size, mines)?;

        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        for &index in &positions {
            if index >= config.total_cells() {
                return Err(GameError::InvalidConfiguration { size, mines });
            }
            mine_mask[config.coords_of(index).to_nd_index()] = true;
        }

        Ok(Self {
            config,
            mine_mask,
            positions,
        })
    }

    /// Builds a layout from explicit positions, duplicates count once.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidConfiguration { size, mines: 0 });
        }
        let bounds = BoardConfig::new_unchecked(size, 0);

        let mut positions = BTreeSet::new();
        for &coords in mine_coords {
            let coords = bounds.validate_coords(coords)?;
            positions.insert(bounds.index_of(coords));
        }

        Self::from_positions(size, positions)
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn tile_value(&self, coords: Coord2) -> TileValue {
        if self[coords] {
            TileValue::Mine
        } else {
            TileValue::Clear(self.adjacent_mine_count(coords))
        }
    }

    /// Row-major indices of every mine, ascending.
    pub fn mine_positions(&self) -> impl Iterator<Item = CellCount> + '_ {
        self.positions.iter().copied()
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.positions
            .iter()
            .map(|&index| self.config.coords_of(index))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(
            BoardConfig::new(3, 9),
            Err(GameError::InvalidConfiguration { size: 3, mines: 9 })
        );
        assert!(BoardConfig::new(3, 8).is_ok());
    }

    #[test]
    fn config_rejects_empty_board() {
        assert_eq!(
            BoardConfig::new(0, 0),
            Err(GameError::InvalidConfiguration { size: 0, mines: 0 })
        );
    }

    #[test]
    fn presets_are_valid() {
        assert_eq!(BoardConfig::SMALL.validate(), Ok(BoardConfig::SMALL));
        assert_eq!(BoardConfig::MEADOW.validate(), Ok(BoardConfig::MEADOW));
    }

    #[test]
    fn index_and_coords_are_row_major() {
        let config = BoardConfig::new(4, 1).unwrap();

        assert_eq!(config.index_of((2, 3)), 11);
        assert_eq!(config.coords_of(11), (2, 3));
        assert_eq!(
            config.validate_coords((4, 0)),
            Err(GameError::OutOfBounds {
                row: 4,
                col: 0,
                size: 4
            })
        );
    }

    #[test]
    fn only_real_changes_need_a_redraw() {
        assert!(!FlagOutcome::NoChange.has_update());
        assert!(FlagOutcome::Changed.has_update());
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Revealed.has_update());
        assert!(RevealOutcome::HitMine.has_update());
        assert!(RevealOutcome::Won.has_update());
    }

    #[test]
    fn adjacency_on_diagonal_mines() {
        let layout = MineLayout::from_mine_coords(3, &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 0);
        assert_eq!(layout.tile_value((2, 2)), TileValue::Mine);
        assert_eq!(layout.tile_value((1, 2)), TileValue::Clear(1));
    }

    #[test]
    fn duplicate_coords_count_once() {
        let layout = MineLayout::from_mine_coords(3, &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout.mine_coords().collect::<Vec<_>>(), [(1, 1)]);
    }

    #[test]
    fn layout_rejects_out_of_range_index() {
        let positions = BTreeSet::from([9]);

        assert!(matches!(
            MineLayout::from_positions(3, positions),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn layout_serializes_for_saving() {
        let layout = MineLayout::from_mine_coords(3, &[(2, 1), (0, 0)]).unwrap();

        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["config"]["size"], 3);
        assert_eq!(json["config"]["mines"], 2);
        assert_eq!(json["positions"], serde_json::json!([0, 7]));
    }

    #[test]
    fn layout_rejects_out_of_bounds_coords() {
        assert_eq!(
            MineLayout::from_mine_coords(3, &[(0, 3)]),
            Err(GameError::OutOfBounds {
                row: 0,
                col: 3,
                size: 3
            })
        );
    }
}
