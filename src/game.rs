use crate::{Board, GameError, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// Interaction mode: whether a coordinate input reveals or flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Reveal,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    MineHit,
    Win,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagToggle {
    pub flagged: bool,
    pub remaining: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Custom { columns: u32, rows: u32, bombs: u32 },
}

impl Difficulty {
    /// Validated custom parameters. The presets bypass the dimension
    /// range check; custom boards are capped at the letter-addressable
    /// 26 columns and rows.
    pub fn custom(columns: u32, rows: u32, bombs: u32) -> Result<Self, GameError> {
        if !(5..=26).contains(&columns) || !(5..=26).contains(&rows) {
            return Err(GameError::InvalidDimension { columns, rows });
        }
        if bombs == 0 || bombs >= columns * rows {
            return Err(GameError::InvalidBombCount {
                columns,
                rows,
                bombs,
            });
        }
        Ok(Self::Custom {
            columns,
            rows,
            bombs,
        })
    }

    pub fn params(self) -> (u32, u32, u32) {
        match self {
            Self::Beginner => (7, 7, 5),
            Self::Intermediate => (12, 12, 15),
            Self::Advanced => (15, 15, 20),
            Self::Custom {
                columns,
                rows,
                bombs,
            } => (columns, rows, bombs),
        }
    }
}

/// One round of minesweeper: the board plus the session state around it.
pub struct Game {
    board: Board,
    mode: Mode,
    state: GameState,
    flags_left: i32,
}

impl Game {
    pub fn new(columns: u32, rows: u32, bombs: u32) -> Result<Self, GameError> {
        Ok(Self::with_board(Board::new(columns, rows, bombs)?))
    }

    pub fn from_seed(columns: u32, rows: u32, bombs: u32, seed: u64) -> Result<Self, GameError> {
        Ok(Self::with_board(Board::from_seed(
            columns, rows, bombs, seed,
        )?))
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Result<Self, GameError> {
        let (columns, rows, bombs) = difficulty.params();
        Self::new(columns, rows, bombs)
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_fixed_board(board: Board) -> Self {
        Self::with_board(board)
    }

    fn with_board(board: Board) -> Self {
        let flags_left = board.bomb_count() as i32;
        Self {
            board,
            mode: Mode::Reveal,
            state: GameState::Playing,
            flags_left,
        }
    }

    /// Fresh round with identical dimensions and bomb count.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let (columns, rows) = self.board.dimensions();
        *self = Self::new(columns, rows, self.board.bomb_count())?;
        Ok(())
    }

    /// Routes one parsed coordinate according to the interaction mode.
    pub fn check_input(&mut self, pos: Position) -> Result<(), GameError> {
        match self.mode {
            Mode::Flag => self.toggle_flag(pos).map(|_| ()),
            Mode::Reveal => self.reveal(pos).map(|_| ()),
        }
    }

    /// Reveals a cell and reports how the round moved on. The checks run
    /// in a fixed order: mine hit, then win, then flood fill of a blank
    /// cell with a final win re-check once the fill lands.
    pub fn reveal(&mut self, pos: Position) -> Result<RevealOutcome, GameError> {
        if !self.board.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        if self.state != GameState::Playing {
            return Ok(RevealOutcome::Continue);
        }

        if let Some(cell) = self.board.cell_mut(pos) {
            cell.reveal();
        }
        let (mine_hit, blank) = {
            let cell = self.board.cell(pos)?;
            (cell.is_mine() && !cell.is_flagged(), cell.adjacent() == 0)
        };

        if mine_hit {
            self.state = GameState::Lost;
            return Ok(RevealOutcome::MineHit);
        }
        if self.board.count_hidden() == self.board.bomb_count() {
            self.state = GameState::Won;
            return Ok(RevealOutcome::Win);
        }
        if blank {
            self.flood_fill(pos);
            if self.board.count_hidden() == self.board.bomb_count() {
                self.state = GameState::Won;
                return Ok(RevealOutcome::Win);
            }
        }
        Ok(RevealOutcome::Continue)
    }

    /// Work-list sweep of the zero-adjacency region around `origin`,
    /// extending one ring into the numbered border. Cells are revealed
    /// before they are enqueued, so each one is visited at most once.
    fn flood_fill(&mut self, origin: Position) {
        let mut frontier = vec![origin];

        while let Some(pos) = frontier.pop() {
            match self.board.cell(pos) {
                Ok(cell) if cell.adjacent() == 0 => {}
                _ => continue,
            }
            for neighbor in pos.neighbors() {
                if let Some(cell) = self.board.cell_mut(neighbor) {
                    if cell.is_hidden() && !cell.is_mine() && !cell.is_flagged() {
                        cell.reveal();
                        frontier.push(neighbor);
                    }
                }
            }
        }
    }

    /// Flips the flag at `pos` and moves the advisory budget, which is
    /// never clamped and goes negative when flags outnumber bombs.
    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagToggle, GameError> {
        if !self.board.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        if self.state != GameState::Playing {
            let flagged = self.board.cell(pos)?.is_flagged();
            return Ok(FlagToggle {
                flagged,
                remaining: self.flags_left,
            });
        }

        let cell = self
            .board
            .cell_mut(pos)
            .ok_or(GameError::OutOfBounds(pos))?;
        let flagged = cell.toggle_flag();
        self.flags_left += if flagged { -1 } else { 1 };
        Ok(FlagToggle {
            flagged,
            remaining: self.flags_left,
        })
    }

    /// Concedes the round.
    pub fn resign(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Lost;
        }
    }

    /// Uncovers the whole board for post-game display.
    pub fn expose_board(&mut self) {
        self.board.expose_all();
    }

    pub fn cell_view(&self, pos: Position) -> Result<char, GameError> {
        self.board.cell(pos).map(|cell| cell.glyph())
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state != GameState::Playing
    }

    pub fn did_win(&self) -> bool {
        self.state == GameState::Won
    }

    pub fn flags_left(&self) -> i32 {
        self.flags_left
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.board.dimensions()
    }

    pub fn bomb_count(&self) -> u32 {
        self.board.bomb_count()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_mine_game() -> Game {
        Game::with_fixed_board(Board::with_mines(5, 5, &[Position::new(0, 0)]))
    }

    #[test]
    fn revealing_a_numbered_cell_continues() {
        let mut game = corner_mine_game();
        let outcome = game.reveal(Position::new(1, 1)).unwrap();
        assert_eq!(outcome, RevealOutcome::Continue);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.cell_view(Position::new(1, 1)).unwrap(), '1');
    }

    #[test]
    fn revealing_a_mine_loses_the_round() {
        let mut game = corner_mine_game();
        let outcome = game.reveal(Position::new(0, 0)).unwrap();
        assert_eq!(outcome, RevealOutcome::MineHit);
        assert!(game.is_game_over());
        assert!(!game.did_win());
    }

    #[test]
    fn a_flag_vetoes_the_reveal() {
        let mut game = corner_mine_game();
        game.toggle_flag(Position::new(0, 0)).unwrap();
        let outcome = game.reveal(Position::new(0, 0)).unwrap();
        assert_eq!(outcome, RevealOutcome::Continue);
        assert!(!game.is_game_over());
        assert_eq!(game.cell_view(Position::new(0, 0)).unwrap(), '>');
    }

    #[test]
    fn blank_reveal_floods_and_wins_in_one_action() {
        let mut game = corner_mine_game();
        let outcome = game.reveal(Position::new(4, 4)).unwrap();
        assert_eq!(outcome, RevealOutcome::Win);
        assert!(game.did_win());
        assert_eq!(game.board().count_hidden(), 1);
    }

    #[test]
    fn flood_fill_stops_at_the_numbered_border() {
        // A full mine column splits the zero cells into two regions;
        // the fill must not cross the numbered wall around it.
        let wall: Vec<Position> = (0..5).map(|y| Position::new(2, y)).collect();
        let mut game = Game::with_fixed_board(Board::with_mines(5, 5, &wall));

        game.reveal(Position::new(0, 0)).unwrap();

        for y in 0..5 {
            assert!(!game.board().cell(Position::new(0, y)).unwrap().is_hidden());
            assert!(!game.board().cell(Position::new(1, y)).unwrap().is_hidden());
            assert!(game.board().cell(Position::new(3, y)).unwrap().is_hidden());
            assert!(game.board().cell(Position::new(4, y)).unwrap().is_hidden());
        }
    }

    #[test]
    fn flood_fill_is_idempotent() {
        let wall: Vec<Position> = (0..5).map(|y| Position::new(2, y)).collect();
        let mut game = Game::with_fixed_board(Board::with_mines(5, 5, &wall));

        game.reveal(Position::new(0, 0)).unwrap();
        let snapshot = game.board().clone();

        let outcome = game.reveal(Position::new(0, 0)).unwrap();
        assert_eq!(outcome, RevealOutcome::Continue);
        assert_eq!(game.board(), &snapshot);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let wall: Vec<Position> = (0..5).map(|y| Position::new(2, y)).collect();
        let mut game = Game::with_fixed_board(Board::with_mines(5, 5, &wall));

        game.toggle_flag(Position::new(0, 3)).unwrap();
        game.reveal(Position::new(0, 0)).unwrap();

        let flagged = game.board().cell(Position::new(0, 3)).unwrap();
        assert!(flagged.is_hidden());
        assert!(flagged.is_flagged());
        // Cells above the flag are swept, the corridor past it stays shut.
        assert!(!game.board().cell(Position::new(0, 2)).unwrap().is_hidden());
        assert!(!game.board().cell(Position::new(1, 3)).unwrap().is_hidden());
        assert!(game.board().cell(Position::new(0, 4)).unwrap().is_hidden());
        assert!(game.board().cell(Position::new(1, 4)).unwrap().is_hidden());
    }

    #[test]
    fn flag_toggle_is_an_involution() {
        let mut game = corner_mine_game();
        let pos = Position::new(3, 3);

        let first = game.toggle_flag(pos).unwrap();
        assert!(first.flagged);
        assert_eq!(first.remaining, 0);

        let second = game.toggle_flag(pos).unwrap();
        assert!(!second.flagged);
        assert_eq!(second.remaining, 1);
        assert!(!game.board().cell(pos).unwrap().is_flagged());
    }

    #[test]
    fn flag_budget_goes_negative_when_overspent() {
        let mut game = corner_mine_game();
        game.toggle_flag(Position::new(1, 1)).unwrap();
        let toggle = game.toggle_flag(Position::new(2, 2)).unwrap();
        assert_eq!(toggle.remaining, -1);
        assert_eq!(game.flags_left(), -1);
    }

    #[test]
    fn mode_switch_routes_check_input() {
        let mut game = corner_mine_game();
        let pos = Position::new(3, 3);

        game.set_mode(Mode::Flag);
        game.check_input(pos).unwrap();
        assert!(game.board().cell(pos).unwrap().is_flagged());
        assert_eq!(game.flags_left(), 0);

        game.check_input(pos).unwrap();
        game.set_mode(Mode::Reveal);
        game.check_input(pos).unwrap();
        assert!(!game.board().cell(pos).unwrap().is_hidden());
    }

    #[test]
    fn out_of_bounds_input_is_an_error() {
        let mut game = corner_mine_game();
        let pos = Position::new(9, 9);
        assert_eq!(game.reveal(pos), Err(GameError::OutOfBounds(pos)));
        assert_eq!(game.toggle_flag(pos), Err(GameError::OutOfBounds(pos)));
    }

    #[test]
    fn terminal_rounds_ignore_further_actions() {
        let mut game = corner_mine_game();
        game.reveal(Position::new(0, 0)).unwrap();
        assert!(game.is_game_over());

        let outcome = game.reveal(Position::new(4, 4)).unwrap();
        assert_eq!(outcome, RevealOutcome::Continue);
        assert!(game.board().cell(Position::new(4, 4)).unwrap().is_hidden());

        let flags_before = game.flags_left();
        let toggle = game.toggle_flag(Position::new(3, 3)).unwrap();
        assert!(!toggle.flagged);
        assert_eq!(toggle.remaining, flags_before);
    }

    #[test]
    fn resign_loses_and_expose_uncovers_everything() {
        let mut game = corner_mine_game();
        game.resign();
        assert!(game.is_game_over());
        assert!(!game.did_win());

        game.expose_board();
        assert_eq!(game.board().count_hidden(), 0);
        assert_eq!(game.cell_view(Position::new(0, 0)).unwrap(), '#');
    }

    #[test]
    fn restart_regenerates_with_the_same_parameters() {
        let mut game = Game::from_seed(7, 7, 5, 11).unwrap();
        game.reveal(Position::new(3, 3)).unwrap();
        game.restart().unwrap();

        assert_eq!(game.dimensions(), (7, 7));
        assert_eq!(game.bomb_count(), 5);
        assert_eq!(game.flags_left(), 5);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.board().count_hidden(), 49);
    }

    #[test]
    fn difficulty_presets_and_validation() {
        assert_eq!(Difficulty::Beginner.params(), (7, 7, 5));
        assert_eq!(Difficulty::Intermediate.params(), (12, 12, 15));
        assert_eq!(Difficulty::Advanced.params(), (15, 15, 20));

        assert_eq!(
            Difficulty::custom(4, 10, 3),
            Err(GameError::InvalidDimension {
                columns: 4,
                rows: 10
            })
        );
        assert_eq!(
            Difficulty::custom(27, 10, 3),
            Err(GameError::InvalidDimension {
                columns: 27,
                rows: 10
            })
        );
        assert_eq!(
            Difficulty::custom(5, 5, 25),
            Err(GameError::InvalidBombCount {
                columns: 5,
                rows: 5,
                bombs: 25
            })
        );
        assert_eq!(
            Difficulty::custom(6, 8, 12).unwrap().params(),
            (6, 8, 12)
        );
    }
}
