use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement without replacement. The generator is seeded once, so consecutive layouts
/// (one per reset) keep drawing from the same stream.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    seed: u64,
    rng: SmallRng,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Picks up to `count` distinct cells with no adjacent mine and no mine of their own.
    pub fn scatter_on_clear(&mut self, layout: &MineLayout, count: usize) -> Decorations {
        let config = layout.config();
        let candidates: Vec<Coord2> = (0..config.total_cells())
            .map(|index| config.coords_of(index))
            .filter(|&coords| layout.tile_value(coords).is_zero())
            .collect();

        if count > candidates.len() {
            log::debug!(
                "Only {} clear cells for {} decorations",
                candidates.len(),
                count
            );
        }
        let count = count.min(candidates.len());

        let mut chosen = BTreeSet::new();
        while chosen.len() < count {
            chosen.insert(candidates[self.rng.random_range(0..candidates.len())]);
        }
        Decorations::new(chosen)
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(&mut self, config: BoardConfig) -> Result<MineLayout> {
        let config = config.validate()?;
        let total_cells = config.total_cells();

        let mut positions = BTreeSet::new();
        let mut redraws = 0usize;
        while positions.len() < usize::from(config.mines) {
            if !positions.insert(self.rng.random_range(0..total_cells)) {
                redraws += 1;
            }
        }
        log::trace!(
            "Placed {} mines on {} cells ({} redraws)",
            config.mines,
            total_cells,
            redraws
        );

        MineLayout::from_positions(config.size, positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        let mut placer = RandomMinePlacer::new(7);

        for (size, mines) in [(1, 0), (2, 3), (3, 1), (10, 8), (20, 35), (5, 24)] {
            let config = BoardConfig::new(size, mines).unwrap();
            let layout = placer.place(config).unwrap();

            assert_eq!(layout.mine_count(), mines);
            assert_eq!(layout.mine_positions().count(), usize::from(mines));
            let on_board = (0..config.total_cells())
                .filter(|&index| layout.contains_mine(config.coords_of(index)))
                .count();
            assert_eq!(on_board, usize::from(mines));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::MEADOW;

        let first = RandomMinePlacer::new(42).place(config).unwrap();
        let second = RandomMinePlacer::new(42).place(config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_invalid_config() {
        let mut placer = RandomMinePlacer::new(0);

        assert_eq!(
            placer.place(BoardConfig { size: 2, mines: 4 }),
            Err(GameError::InvalidConfiguration { size: 2, mines: 4 })
        );
    }

    #[test]
    fn scatter_only_on_zero_cells() {
        let layout = MineLayout::from_mine_coords(5, &[(0, 0), (4, 4)]).unwrap();
        let mut placer = RandomMinePlacer::new(3);

        let decorations = placer.scatter_on_clear(&layout, 5);

        assert_eq!(decorations.len(), 5);
        for coords in decorations.iter() {
            assert_eq!(layout.tile_value(coords), TileValue::Clear(0));
        }
    }

    #[test]
    fn scatter_is_capped_by_clear_cells() {
        // every cell of a 2x2 board touches the single mine
        let layout = MineLayout::from_mine_coords(2, &[(0, 0)]).unwrap();
        let mut placer = RandomMinePlacer::new(3);

        assert!(placer.scatter_on_clear(&layout, 4).is_empty());
    }
}
