use cozy_chess::{BitBoard, Color, Piece};
use utils::MAX_PHASE;

/// Piece-square tables in centipawns, defined for White (a1 = index 0, h8 = index 63).
/// Black reads the same tables mirrored vertically.
///
/// Every piece has a single table except the king, whose middlegame and endgame tables
/// are blended by game phase.
///
/// <https://www.chessprogramming.org/Piece-Square_Tables>
#[allow(clippy::upper_case_acronyms)]
pub struct PSTRefs {
    pub pawn: [i32; 64],
    pub knight: [i32; 64],
    pub bishop: [i32; 64],
    pub rook: [i32; 64],
    pub queen: [i32; 64],
    pub king_mg: [i32; 64],
    pub king_eg: [i32; 64],
}

impl PSTRefs {
    #[inline(always)]
    pub fn table(&self, piece: Piece) -> &[i32; 64] {
        match piece {
            Piece::Pawn => &self.pawn,
            Piece::Knight => &self.knight,
            Piece::Bishop => &self.bishop,
            Piece::Rook => &self.rook,
            Piece::Queen => &self.queen,
            Piece::King => &self.king_mg,
        }
    }
}

static PST_TABLE: [PSTRefs; 2] = [
    // index 0 → White
    PSTRefs {
        pawn: WHITE_PAWN_PST,
        knight: WHITE_KNIGHT_PST,
        bishop: WHITE_BISHOP_PST,
        rook: WHITE_ROOK_PST,
        queen: WHITE_QUEEN_PST,
        king_mg: WHITE_KING_MG_PST,
        king_eg: WHITE_KING_EG_PST,
    },
    // index 1 → Black
    PSTRefs {
        pawn: mirror(&WHITE_PAWN_PST),
        knight: mirror(&WHITE_KNIGHT_PST),
        bishop: mirror(&WHITE_BISHOP_PST),
        rook: mirror(&WHITE_ROOK_PST),
        queen: mirror(&WHITE_QUEEN_PST),
        king_mg: mirror(&WHITE_KING_MG_PST),
        king_eg: mirror(&WHITE_KING_EG_PST),
    },
];

#[inline(always)]
pub fn get_pst(color: Color) -> &'static PSTRefs {
    &PST_TABLE[color as usize]
}

#[inline(always)]
pub fn sum_pst(bitboard: BitBoard, table: &[i32; 64]) -> i32 {
    bitboard.into_iter().map(|sq| table[sq as usize]).sum()
}

/// King table value blended by phase: `MAX_PHASE` reads the middlegame table only, 0 the endgame table only.
#[inline(always)]
pub fn king_pst(king: BitBoard, pst: &PSTRefs, phase: i32) -> i32 {
    let mg = sum_pst(king, &pst.king_mg);
    let eg = sum_pst(king, &pst.king_eg);
    (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE
}

/// Mirrors a White table vertically: Black's a8 reads White's a1.
const fn mirror(source: &[i32; 64]) -> [i32; 64] {
    let mut table = [0; 64];
    let mut i = 0;
    while i < 64 {
        let rank = i / 8;
        let file = i % 8;
        table[i] = source[(7 - rank) * 8 + file];
        i += 1;
    }
    table
}

// Pawns: central pawns on ranks 4-5 are worth most.
pub const WHITE_PAWN_PST: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0, // rank 1
    0, 0, 0, 0, 0, 0, 0, 0, // rank 2
    10, 12, 15, 20, 20, 15, 12, 10, // rank 3
    15, 18, 25, 30, 30, 25, 18, 15, // rank 4
    20, 25, 35, 40, 40, 35, 25, 20, // rank 5
    10, 12, 15, 20, 20, 15, 12, 10, // rank 6
    -10, -10, -10, -10, -10, -10, -10, -10, // rank 7
    0, 0, 0, 0, 0, 0, 0, 0, // rank 8
];

// Knights: knight on the rim is dim.
pub const WHITE_KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50, // rank 1
    -40, -20, 0, 5, 5, 0, -20, -40, // rank 2
    -30, 5, 10, 15, 15, 10, 5, -30, // rank 3
    -30, 0, 15, 20, 20, 15, 0, -30, // rank 4
    -30, 5, 20, 25, 25, 20, 5, -30, // rank 5
    -30, 0, 15, 20, 20, 15, 0, -30, // rank 6
    -40, -20, 0, 0, 0, 0, -20, -40, // rank 7
    -50, -40, -30, -30, -30, -30, -40, -50, // rank 8
];

// Bishops: long diagonals and fianchetto squares.
pub const WHITE_BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20, // rank 1
    -10, 5, 0, 0, 0, 0, 5, -10, // rank 2
    -10, 10, 10, 10, 10, 10, 10, -10, // rank 3
    -10, 0, 10, 15, 15, 10, 0, -10, // rank 4
    -10, 5, 15, 20, 20, 15, 5, -10, // rank 5
    -10, 0, 10, 15, 15, 10, 0, -10, // rank 6
    -10, 0, 0, 0, 0, 0, 0, -10, // rank 7
    -20, -10, -10, -10, -10, -10, -10, -20, // rank 8
];

// Rooks: seventh rank.
pub const WHITE_ROOK_PST: [i32; 64] = [
    0, 0, 0, 5, 5, 0, 0, 0, // rank 1
    -5, 0, 0, 0, 0, 0, 0, -5, // rank 2
    -5, 0, 0, 0, 0, 0, 0, -5, // rank 3
    -5, 0, 0, 0, 0, 0, 0, -5, // rank 4
    -5, 0, 0, 0, 0, 0, 0, -5, // rank 5
    -5, 0, 0, 0, 0, 0, 0, -5, // rank 6
    5, 10, 10, 10, 10, 10, 10, 5, // rank 7
    0, 0, 0, 0, 0, 0, 0, 0, // rank 8
];

// Queens: mild center preference, no early excursions.
pub const WHITE_QUEEN_PST: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20, // rank 1
    -10, 0, 5, 0, 0, 0, 0, -10, // rank 2
    -10, 5, 5, 5, 5, 5, 0, -10, // rank 3
    0, 0, 5, 5, 5, 5, 0, -5, // rank 4
    -5, 0, 5, 5, 5, 5, 0, -5, // rank 5
    -10, 0, 5, 5, 5, 5, 0, -10, // rank 6
    -10, 0, 0, 0, 0, 0, 0, -10, // rank 7
    -20, -10, -10, -5, -5, -10, -10, -20, // rank 8
];

// King MG: castled corners are safest.
pub const WHITE_KING_MG_PST: [i32; 64] = [
    20, 30, 10, 0, 0, 10, 30, 20, // rank 1
    20, 20, 0, 0, 0, 0, 20, 20, // rank 2
    10, 0, -10, -20, -20, -10, 0, 10, // rank 3
    0, 0, -20, -30, -30, -20, 0, 0, // rank 4
    -10, -20, -30, -40, -40, -30, -20, -10, // rank 5
    -20, -30, -40, -50, -50, -40, -30, -20, // rank 6
    -30, -40, -50, -60, -60, -50, -40, -30, // rank 7
    -40, -50, -60, -70, -70, -60, -50, -40, // rank 8
];

// King EG: centralize.
pub const WHITE_KING_EG_PST: [i32; 64] = [
    -50, -30, -20, -10, -10, -20, -30, -50, // rank 1
    -30, -20, 0, 5, 5, 0, -20, -30, // rank 2
    -20, 0, 10, 20, 20, 10, 0, -20, // rank 3
    -10, 5, 20, 30, 30, 20, 5, -10, // rank 4
    -10, 5, 20, 30, 30, 20, 5, -10, // rank 5
    -20, 0, 10, 20, 20, 10, 0, -20, // rank 6
    -30, -20, 0, 5, 5, 0, -20, -30, // rank 7
    -50, -30, -20, -10, -10, -20, -30, -50, // rank 8
];

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Square;

    #[test]
    fn test_black_tables_mirror_white() {
        let white = get_pst(Color::White);
        let black = get_pst(Color::Black);
        for piece in Piece::ALL {
            for sq in Square::ALL {
                let mirrored = sq.flip_rank();
                assert_eq!(
                    white.table(piece)[sq as usize],
                    black.table(piece)[mirrored as usize]
                );
            }
        }
    }

    #[test]
    fn test_king_blend_endpoints() {
        let pst = get_pst(Color::White);
        let e1 = Square::E1.bitboard();
        assert_eq!(king_pst(e1, pst, MAX_PHASE), pst.king_mg[Square::E1 as usize]);
        assert_eq!(king_pst(e1, pst, 0), pst.king_eg[Square::E1 as usize]);
    }
}
