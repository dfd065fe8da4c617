use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cosmetic objects buried under empty ground, they carry no game meaning.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Decorations {
    positions: BTreeSet<Coord2>,
}

impl Decorations {
    pub fn new(positions: BTreeSet<Coord2>) -> Self {
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.positions.contains(&coords)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.positions.iter().copied()
    }

    /// Removes the object at `coords` once its tile has been opened as an empty tile.
    /// Returns whether anything was dug out.
    pub fn dig<P: MinePlacer>(&mut self, engine: &BoardEngine<P>, coords: Coord2) -> Result<bool> {
        let tile = engine.tile(coords)?;
        if tile.state.is_revealed() && tile.value.is_zero() {
            Ok(self.positions.remove(&coords))
        } else {
            Ok(false)
        }
    }
}
