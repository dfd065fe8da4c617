use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts for a [`BoardEngine`], called once per (re)initialization.
pub trait MinePlacer {
    fn place(&mut self, config: BoardConfig) -> Result<MineLayout>;
}

/// Replays one predetermined layout, used to bypass randomization.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinePlacer {
    layout: MineLayout,
}

impl FixedMinePlacer {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }
}

impl MinePlacer for FixedMinePlacer {
    /// Fails with [`GameError::InvalidConfiguration`] unless `config` matches the stored layout.
    fn place(&mut self, config: BoardConfig) -> Result<MineLayout> {
        if config == self.layout.config() {
            Ok(self.layout.clone())
        } else {
            Err(GameError::InvalidConfiguration {
                size: config.size,
                mines: config.mines,
            })
        }
    }
}
