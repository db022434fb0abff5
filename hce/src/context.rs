use cozy_chess::{BitBoard, Board, Color, Piece};
use utils::board_metrics::BoardMetrics;
use utils::{game_phase, Position};

// Evaluation inputs shared by every term
pub struct EvalContext<'a> {
    pub board: &'a Board,
    pub phase: i32,
    pub metrics: BoardMetrics,
}

impl<'a> EvalContext<'a> {
    #[inline(always)]
    pub fn new(position: &'a Position) -> Self {
        let board = position.board();
        Self {
            board,
            phase: game_phase(board),
            metrics: BoardMetrics::new(board),
        }
    }

    #[inline(always)]
    pub fn pieces_for(&self, color: Color, piece: Piece) -> BitBoard {
        self.board.colored_pieces(color, piece)
    }

    #[inline(always)]
    pub fn pawns_for(&self, color: Color) -> BitBoard {
        self.pieces_for(color, Piece::Pawn)
    }
}
