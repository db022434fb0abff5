use cozy_chess::{Board, Color, Piece};

/// Phase weight of a full set of non-pawn material.
pub const MAX_PHASE: i32 = 24;

/// Game phase from remaining non-pawn material: `MAX_PHASE` = opening, 0 = bare kings and pawns.
///
/// Minor pieces weigh 1, rooks 2, queens 4. Promotions can push the raw sum above
/// `MAX_PHASE`, so it is clamped.
#[inline(always)]
pub fn game_phase(board: &Board) -> i32 {
    let knights = board.pieces(Piece::Knight).len() as i32;
    let bishops = board.pieces(Piece::Bishop).len() as i32;
    let rooks = board.pieces(Piece::Rook).len() as i32;
    let queens = board.pieces(Piece::Queen).len() as i32;

    (knights + bishops + 2 * rooks + 4 * queens).min(MAX_PHASE)
}

/// Flip eval perspective between White's view and side-to-move's view.
#[inline(always)]
pub fn flip_eval_perspective(board: &Board, score: i32) -> i32 {
    if board.side_to_move() == Color::White {
        score
    } else {
        -score
    }
}
