use serde::{Deserialize, Serialize};

/// What a cell holds, fixed when the board is initialized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileValue {
    Mine,
    /// Number of mines among the (up to 8) neighbors.
    Clear(u8),
}

impl TileValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Clear(0))
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Covered,
    Revealed,
    Flagged,
}

impl TileState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Covered
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub value: TileValue,
    pub state: TileState,
}

impl Tile {
    pub const fn covered(value: TileValue) -> Self {
        Self {
            value,
            state: TileState::Covered,
        }
    }
}
