use alloc::vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Both outcomes are final, only a reset starts over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Owns the board of a single game and every counter derived from it.
///
/// Not meant for shared access: callers that drive it from several threads have to serialize
/// the calls themselves.
#[derive(Clone, Debug)]
pub struct BoardEngine<P: MinePlacer = RandomMinePlacer> {
    placer: P,
    layout: MineLayout,
    board: Array2<Tile>,
    revealed_count: CellCount,
    flag_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl BoardEngine<FixedMinePlacer> {
    /// Engine over a known layout, resets replay the same layout.
    pub fn from_layout(layout: MineLayout) -> Self {
        Self::with_layout(FixedMinePlacer::new(layout.clone()), layout)
    }
}

impl BoardEngine<RandomMinePlacer> {
    /// Buries up to `count` objects under empty ground of the current board.
    pub fn scatter_decorations(&mut self, count: usize) -> Decorations {
        self.placer.scatter_on_clear(&self.layout, count)
    }
}

impl<P: MinePlacer> BoardEngine<P> {
    pub fn new(config: BoardConfig, mut placer: P) -> Result<Self> {
        let layout = placer.place(config.validate()?)?;
        log::debug!("New board: {:?}", layout.config());
        Ok(Self::with_layout(placer, layout))
    }

    fn with_layout(placer: P, layout: MineLayout) -> Self {
        let board = Self::build_board(&layout);
        Self {
            placer,
            layout,
            board,
            revealed_count: 0,
            flag_count: 0,
            status: GameStatus::InProgress,
            triggered_mine: None,
        }
    }

    fn build_board(layout: &MineLayout) -> Array2<Tile> {
        let size = usize::from(layout.size());
        Array2::from_shape_fn((size, size), |(row, col)| {
            Tile::covered(layout.tile_value((row as Coord, col as Coord)))
        })
    }

    /// Starts a new game with `config`. On error the current game is left as it was.
    pub fn initialize(&mut self, config: BoardConfig) -> Result<()> {
        let layout = self.placer.place(config.validate()?)?;
        log::debug!("Initialized board: {:?}", layout.config());

        self.board = Self::build_board(&layout);
        self.layout = layout;
        self.revealed_count = 0;
        self.flag_count = 0;
        self.status = GameStatus::InProgress;
        self.triggered_mine = None;
        Ok(())
    }

    /// New game with the same size and mine count.
    pub fn reset(&mut self) -> Result<()> {
        self.initialize(self.config())
    }

    pub fn reset_with(&mut self, config: BoardConfig) -> Result<()> {
        self.initialize(config)
    }

    pub fn config(&self) -> BoardConfig {
        self.layout.config()
    }

    pub fn size(&self) -> Coord {
        self.layout.size()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn placer(&self) -> &P {
        &self.placer
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.layout.mine_count()) - i32::from(self.flag_count)
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.layout.mine_coords()
    }

    pub fn tile(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.config().validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn tile_state(&self, coords: Coord2) -> Result<TileState> {
        Ok(self.tile(coords)?.state)
    }

    /// Stored value of a cell. Only meaningful to show once the tile is revealed.
    pub fn tile_value(&self, coords: Coord2) -> Result<TileValue> {
        Ok(self.tile(coords)?.value)
    }

    /// Every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.board
            .indexed_iter()
            .map(|((row, col), &tile)| ((row as Coord, col as Coord), tile))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;
        use TileState::*;

        let coords = self.config().validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(NoChange);
        }

        let tile = &mut self.board[coords.to_nd_index()];
        Ok(match tile.state {
            Covered => {
                tile.state = Flagged;
                self.flag_count += 1;
                Changed
            }
            Flagged => {
                tile.state = Covered;
                self.flag_count -= 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config().validate_coords(coords)?;
        if self.status.is_finished() || self.board[coords.to_nd_index()].state != TileState::Covered
        {
            return Ok(RevealOutcome::NoChange);
        }

        let value = self.uncover(coords);
        if value.is_mine() {
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        if value.is_zero() {
            self.flood_fill(coords);
        }

        if self.revealed_count == self.config().safe_cells() {
            self.end_game(GameStatus::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    fn uncover(&mut self, coords: Coord2) -> TileValue {
        let tile = &mut self.board[coords.to_nd_index()];
        tile.state = TileState::Revealed;
        self.revealed_count += 1;
        tile.value
    }

    /// Opens the region of empty tiles around `origin` and its numbered border. Revealed tiles
    /// are never pushed twice, flagged tiles are left alone.
    fn flood_fill(&mut self, origin: Coord2) {
        let before = self.revealed_count;
        let mut to_visit = vec![origin];

        while let Some(coords) = to_visit.pop() {
            for neighbor in self.layout.iter_neighbors(coords) {
                if self.board[neighbor.to_nd_index()].state != TileState::Covered {
                    continue;
                }
                if self.uncover(neighbor).is_zero() {
                    to_visit.push(neighbor);
                }
            }
        }

        log::trace!(
            "Cascade from {:?} opened {} tiles",
            origin,
            self.revealed_count - before
        );
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        log::debug!(
            "Game over: {:?} after {} revealed tiles",
            status,
            self.revealed_count
        );
        self.status = status;
    }
}
