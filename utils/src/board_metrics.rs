use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_pawn_quiets,
    get_rook_moves, BitBoard, Board, Color, Piece,
};

/// Per-color counts derived from the piece layout alone, independent of whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardMetrics {
    // Pseudo-legal move count for each color
    pub mobility: [i32; Color::NUM],
}

impl BoardMetrics {
    pub fn new(board: &Board) -> Self {
        Self {
            mobility: [
                pseudo_legal_moves(board, Color::White),
                pseudo_legal_moves(board, Color::Black),
            ],
        }
    }
}

/// Counts pseudo-legal moves for `color`: every target square a piece could move to
/// ignoring pins and checks.
///
/// Pawn pushes (single and double) and pawn captures each count once, promotions
/// included. Castling and en passant are not counted. The count is the same whichever
/// side is to move, so both colors are measured on equal terms.
pub fn pseudo_legal_moves(board: &Board, color: Color) -> i32 {
    let occupied = board.occupied();
    let my_pieces = board.colors(color);
    let enemy_pieces = board.colors(!color);
    let targets = !my_pieces;

    let mut count = 0i32;

    for sq in board.colored_pieces(color, Piece::Pawn) {
        let pushes = get_pawn_quiets(sq, color, occupied);
        let captures = get_pawn_attacks(sq, color) & enemy_pieces;
        count += (pushes | captures).len() as i32;
    }

    for sq in board.colored_pieces(color, Piece::Knight) {
        count += (get_knight_moves(sq) & targets).len() as i32;
    }

    for sq in board.colored_pieces(color, Piece::Bishop) {
        count += (get_bishop_moves(sq, occupied) & targets).len() as i32;
    }

    for sq in board.colored_pieces(color, Piece::Rook) {
        count += (get_rook_moves(sq, occupied) & targets).len() as i32;
    }

    for sq in board.colored_pieces(color, Piece::Queen) {
        let squares: BitBoard = get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied);
        count += (squares & targets).len() as i32;
    }

    count += (get_king_moves(board.king(color)) & targets).len() as i32;

    count
}
