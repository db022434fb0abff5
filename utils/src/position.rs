use cozy_chess::{util::parse_uci_move, Board};
use thiserror::Error;

/// FEN of the standard initial position.
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("illegal move '{mv}' in position {fen}")]
    IllegalMove { mv: String, fen: String },
    #[error("malformed position line: {0}")]
    Malformed(String),
}

/// A game position as seen by evaluators: where the game started, the moves played
/// since, and the resulting board.
///
/// Only valid boards can be represented. The base FEN is checked on construction and
/// every move is checked for legality before it is applied.
#[derive(Clone, Debug)]
pub struct Position {
    base_fen: String,
    moves: Vec<String>,
    board: Board,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self {
            base_fen: String::new(),
            moves: Vec::new(),
            board: Board::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let fen = fen.trim();
        let board = Board::from_fen(fen, false).map_err(|e| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{:?}", e),
        })?;

        Ok(Self {
            base_fen: fen.to_string(),
            moves: Vec::new(),
            board,
        })
    }

    /// Parses `startpos [moves ...]` or `fen <fen> [moves ...]`, the argument syntax
    /// of the UCI `position` command.
    pub fn from_uci(line: &str) -> Result<Self, PositionError> {
        let line = line.trim();
        let line = line.strip_prefix("position").unwrap_or(line).trim();

        let (base, moves) = match line.split_once("moves") {
            Some((base, moves)) => (base.trim(), Some(moves)),
            None => (line, None),
        };

        let mut position = if base == "startpos" {
            Self::startpos()
        } else if let Some(fen) = base.strip_prefix("fen") {
            Self::from_fen(fen)?
        } else {
            return Err(PositionError::Malformed(line.to_string()));
        };

        for mv in moves.into_iter().flat_map(str::split_whitespace) {
            position.play(mv)?;
        }

        Ok(position)
    }

    /// Applies a move given in long algebraic notation (e.g. `e2e4`, `e7e8q`, `e1g1`).
    pub fn play(&mut self, mv: &str) -> Result<(), PositionError> {
        let illegal = || PositionError::IllegalMove {
            mv: mv.to_string(),
            fen: self.board.to_string(),
        };

        let parsed = parse_uci_move(&self.board, mv).map_err(|_| illegal())?;
        if !self.board.is_legal(parsed) {
            return Err(illegal());
        }

        self.board.play_unchecked(parsed);
        self.moves.push(mv.to_string());
        Ok(())
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// FEN the game started from. Empty when the game started from the initial position.
    #[inline(always)]
    pub fn base_fen(&self) -> &str {
        &self.base_fen
    }

    #[inline(always)]
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// FEN of the current board.
    pub fn fen(&self) -> String {
        self.board.to_string()
    }
}
