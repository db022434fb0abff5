use cozy_chess::{Color, Piece};

use crate::context::EvalContext;
use crate::pst::{get_pst, king_pst, sum_pst};
use crate::HCEConfig;

/// Material, bishop pair and piece-square placement for one side.
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let pst = get_pst(color);
    let mut cp = 0;

    for piece in [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        let pieces = ctx.pieces_for(color, piece);
        if pieces.is_empty() {
            continue;
        }
        cp += piece_value(piece, config) * pieces.len() as i32;
        cp += sum_pst(pieces, pst.table(piece));
    }

    cp += king_pst(ctx.pieces_for(color, Piece::King), pst, ctx.phase);

    if ctx.pieces_for(color, Piece::Bishop).len() >= 2 {
        cp += config.bishop_pair_bonus;
    }

    cp
}

#[inline(always)]
pub fn piece_value(piece: Piece, config: &HCEConfig) -> i32 {
    match piece {
        Piece::Pawn => config.pawn_value,
        Piece::Knight => config.knight_value,
        Piece::Bishop => config.bishop_value,
        Piece::Rook => config.rook_value,
        Piece::Queen => config.queen_value,
        Piece::King => 0,
    }
}
