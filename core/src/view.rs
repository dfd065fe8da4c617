use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How a single cell should be drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Flagged,
    Open(u8),
    /// Opened empty tile with an object lying on it, see [`Decorations::dig`].
    Object,
    /// Only disclosed once the game is over.
    Mine,
    /// The mine that ended the game.
    Exploded,
    /// Flag placed on a safe cell, disclosed after a loss.
    WrongFlag,
}

impl CellView {
    pub const fn symbol(self) -> char {
        match self {
            Self::Covered => '#',
            Self::Flagged => 'F',
            Self::Open(0) => '.',
            Self::Open(count) => (b'0' + count) as char,
            Self::Object => 'o',
            Self::Mine => '*',
            Self::Exploded => 'X',
            Self::WrongFlag => '!',
        }
    }
}

/// Snapshot of everything a presentation layer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord,
    pub status: GameStatus,
    pub mines_left: i32,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_engine<P: MinePlacer>(engine: &BoardEngine<P>) -> Self {
        let size = engine.size();
        let status = engine.status();
        let mut cells = Array2::from_elem((size, size).to_nd_index(), CellView::Covered);

        let triggered_mine = engine.triggered_mine();
        for (coords, tile) in engine.tiles() {
            cells[coords.to_nd_index()] = Self::cell_view(status, triggered_mine, coords, tile);
        }

        Self {
            size,
            status,
            mines_left: engine.mines_left(),
            cells,
        }
    }

    /// Shows objects that lie on opened empty tiles, buried ones stay hidden.
    pub fn with_decorations(mut self, decorations: &Decorations) -> Self {
        for coords in decorations.iter() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if *cell == CellView::Open(0) {
                *cell = CellView::Object;
            }
        }
        self
    }

    fn cell_view(
        status: GameStatus,
        triggered_mine: Option<Coord2>,
        coords: Coord2,
        tile: Tile,
    ) -> CellView {
        use TileState::*;

        match (tile.state, tile.value) {
            (Revealed, TileValue::Clear(count)) => CellView::Open(count),
            (Revealed, TileValue::Mine) if triggered_mine == Some(coords) => CellView::Exploded,
            (Revealed, TileValue::Mine) => CellView::Mine,
            (Flagged, TileValue::Clear(_)) if status == GameStatus::Lost => CellView::WrongFlag,
            (Flagged, _) => CellView::Flagged,
            (Covered, TileValue::Mine) if status.is_finished() => CellView::Mine,
            (Covered, _) => CellView::Covered,
        }
    }

    pub fn cell(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

/// One line per row, one symbol per cell.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
