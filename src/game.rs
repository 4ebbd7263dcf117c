//! Connect-Four game rules: board, players, and immutable game states.
//!
//! The board is the standard 7-wide, 6-tall grid; pieces drop to the lowest
//! empty cell of a column. Win detection scans only the four lines through
//! the last-placed piece rather than the whole board.

use std::fmt;
use std::sync::Arc;

use crate::{Error, Result};

/// Number of columns on the board.
pub const COLS: usize = 7;

/// Number of rows in each column.
pub const ROWS: usize = 6;

/// Length of a winning line.
const CONNECT: usize = 4;

/// The two players, in move order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Returns the opponent of this player.
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "First"),
            Player::Second => write!(f, "Second"),
        }
    }
}

/// The landing cell of a completed drop.
///
/// Knowing where the last piece landed lets win detection scan only the
/// four lines through that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedMove {
    /// Column the piece was dropped into (0..7).
    pub column: usize,
    /// Row the piece came to rest in (0 = bottom).
    pub row: usize,
}

/// The 7x6 grid plus per-column fill heights.
///
/// Invariant: cell `(col, row)` is occupied iff `row < heights[col]`.
/// Pieces are never removed; columns fill bottom-up only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Column-major cells, `cells[col][row]`, row 0 at the bottom.
    cells: [[Option<Player>; ROWS]; COLS],
    heights: [usize; COLS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Board {
            cells: [[None; ROWS]; COLS],
            heights: [0; COLS],
        }
    }

    /// Returns the piece at `(col, row)`, or `None` for empty or
    /// off-board coordinates.
    ///
    /// Signed coordinates let the win scan walk past the board edges
    /// without special-casing them.
    pub fn get(&self, col: isize, row: isize) -> Option<Player> {
        if col < 0 || col >= COLS as isize || row < 0 || row >= ROWS as isize {
            return None;
        }
        self.cells[col as usize][row as usize]
    }

    /// Drops a piece for `player` into `column`, returning the landing cell.
    pub fn drop_piece(&mut self, player: Player, column: usize) -> Result<PlacedMove> {
        if column >= COLS || self.is_full_column(column) {
            return Err(Error::InvalidMove(column));
        }
        let row = self.heights[column];
        self.cells[column][row] = Some(player);
        self.heights[column] += 1;
        Ok(PlacedMove { column, row })
    }

    /// Returns true if no more pieces fit in `column`.
    pub fn is_full_column(&self, column: usize) -> bool {
        self.heights[column] == ROWS
    }

    /// Returns true if every column is full.
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|column| self.is_full_column(column))
    }

    /// Walks offsets -3..=+3 from the placed cell along one axis, counting
    /// consecutive cells owned by the placing player. Off-board or
    /// mismatched cells reset the streak.
    fn is_winning_line(&self, placed: PlacedMove, step_col: isize, step_row: isize) -> bool {
        let owner = self.get(placed.column as isize, placed.row as isize);
        debug_assert!(owner.is_some(), "win scan from an empty cell");

        let mut connected = 0;
        for offset in -3..=3isize {
            let col = placed.column as isize + step_col * offset;
            let row = placed.row as isize + step_row * offset;
            if self.get(col, row) == owner {
                connected += 1;
            } else {
                connected = 0;
            }
            if connected == CONNECT {
                return true;
            }
        }
        false
    }

    /// Returns true if the given placed move completed four in a row along
    /// any of the four axes through its cell.
    pub fn is_winning_move(&self, placed: PlacedMove) -> bool {
        self.is_winning_line(placed, 1, 0)
            || self.is_winning_line(placed, 0, 1)
            || self.is_winning_line(placed, 1, 1)
            || self.is_winning_line(placed, 1, -1)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let glyph = match self.cells[col][row] {
                    Some(Player::First) => 'O',
                    Some(Player::Second) => 'X',
                    None => '.',
                };
                write!(f, "{} ", glyph)?;
            }
            writeln!(f)?;
        }
        write!(f, "0 1 2 3 4 5 6")
    }
}

/// An immutable snapshot of a game in progress.
///
/// States form a singly-linked history chain through `previous`; older
/// states are read-only and cheap to share across search trees rooted at
/// forks of the same position.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    next_player: Player,
    previous: Option<Arc<GameState>>,
    last_move: Option<PlacedMove>,
}

impl GameState {
    /// Creates the starting position: empty board, `First` to move.
    pub fn new_game() -> Self {
        GameState {
            board: Board::new(),
            next_player: Player::First,
            previous: None,
            last_move: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    /// Returns the state this one was reached from, if any.
    pub fn previous(&self) -> Option<&Arc<GameState>> {
        self.previous.as_ref()
    }

    /// Returns the move that produced this state, if any.
    pub fn last_move(&self) -> Option<PlacedMove> {
        self.last_move
    }

    /// Drops a piece for the player to move, returning the successor state
    /// with the mover flipped and history linked back to this state.
    pub fn apply_move(&self, column: usize) -> Result<GameState> {
        let mut board = self.board.clone();
        let placed = board.drop_piece(self.next_player, column)?;
        Ok(GameState {
            board,
            next_player: self.next_player.other(),
            previous: Some(Arc::new(self.clone())),
            last_move: Some(placed),
        })
    }

    /// Returns true if the last move won the game or the board is full.
    /// The initial state (no last move) is never over.
    pub fn is_over(&self) -> bool {
        match self.last_move {
            None => false,
            Some(placed) => self.board.is_winning_move(placed) || self.board.is_full(),
        }
    }

    /// Returns true if dropping into `column` is currently allowed.
    pub fn is_valid_move(&self, column: usize) -> bool {
        if self.is_over() || column >= COLS {
            return false;
        }
        !self.board.is_full_column(column)
    }

    /// Returns all playable columns in ascending order.
    ///
    /// Empty only on a terminal position.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&c| self.is_valid_move(c)).collect()
    }

    /// Returns the winner, if the game is over and the last move won.
    ///
    /// The winner is the player who made the last move, i.e. the opponent
    /// of the player to move. `None` for draws and unfinished games.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_over() {
            return None;
        }
        match self.last_move {
            Some(placed) if self.board.is_winning_move(placed) => {
                Some(self.next_player.other())
            }
            _ => None,
        }
    }
}
