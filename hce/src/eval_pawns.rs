use cozy_chess::{BitBoard, Color, File};

use crate::context::EvalContext;
use crate::HCEConfig;

/// Pawn structure for one side: doubled, isolated and passed pawns.
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    let my_pawns = ctx.pawns_for(color);
    if my_pawns.is_empty() {
        return 0;
    }
    let enemy_pawns = ctx.pawns_for(!color);

    passed_pawns(my_pawns, enemy_pawns, color, config)
        - doubled_pawns(my_pawns) * config.doubled_pawn_penalty
        - isolated_pawns(my_pawns) * config.isolated_pawn_penalty
}

/// Pawns beyond the first on each file.
fn doubled_pawns(my_pawns: BitBoard) -> i32 {
    File::ALL
        .iter()
        .map(|file| (my_pawns & file.bitboard()).len() as i32)
        .filter(|&count| count > 1)
        .map(|count| count - 1)
        .sum()
}

/// Pawns with no friendly pawn on either adjacent file.
fn isolated_pawns(my_pawns: BitBoard) -> i32 {
    File::ALL
        .iter()
        .filter(|file| (my_pawns & file.adjacent()).is_empty())
        .map(|file| (my_pawns & file.bitboard()).len() as i32)
        .sum()
}

fn passed_pawns(my_pawns: BitBoard, enemy_pawns: BitBoard, color: Color, config: &HCEConfig) -> i32 {
    let mut score = 0;
    for sq in my_pawns {
        let blockers = PASSED_PAWN_MASKS[color as usize][sq as usize];
        if !(enemy_pawns & blockers).is_empty() {
            continue;
        }

        // convert to white's perspective: rank 0..7, pawns live on 1..6
        let rank_from_white = match color {
            Color::White => sq.rank() as i32,
            Color::Black => 7 - sq.rank() as i32,
        };
        score += config.passed_pawn_bonus(rank_from_white - 1);
    }
    score
}

/// Pre-computed passed-pawn masks: [color][square].
pub const PASSED_PAWN_MASKS: [[BitBoard; 64]; 2] = {
    let mut table = [[BitBoard::EMPTY; 64]; 2];
    let mut square_idx = 0;
    while square_idx < 64 {
        let file_idx = (square_idx % 8) as i8;
        let rank_idx = (square_idx / 8) as i8;

        table[Color::White as usize][square_idx] =
            BitBoard(make_passed_pawn_mask(rank_idx, file_idx, 1));
        table[Color::Black as usize][square_idx] =
            BitBoard(make_passed_pawn_mask(rank_idx, file_idx, -1));

        square_idx += 1;
    }
    table
};

/// Bit-mask of every square that must be free of enemy pawns
/// for the pawn on (rank_idx, file_idx) to be counted as passed.
const fn make_passed_pawn_mask(
    mut rank_idx: i8, // starting rank of the pawn
    file_idx: i8,     // starting file of the pawn
    step: i8,         // +1 for white, -1 for black
) -> u64 {
    let mut mask = 0u64;
    rank_idx += step; // start one rank in front
    while rank_idx >= 0 && rank_idx < 8 {
        let mut scan_file = file_idx - 1;
        while scan_file <= file_idx + 1 {
            if scan_file >= 0 && scan_file < 8 {
                mask |= 1u64 << ((rank_idx as u64) * 8 + scan_file as u64);
            }
            scan_file += 1;
        }
        rank_idx += step;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Board;

    fn pawns(fen: &str, color: Color) -> (BitBoard, BitBoard) {
        let board: Board = fen.parse().unwrap();
        (
            board.colored_pieces(color, cozy_chess::Piece::Pawn),
            board.colored_pieces(!color, cozy_chess::Piece::Pawn),
        )
    }

    #[test]
    fn test_doubled_and_isolated() {
        // a2/a3 doubled and isolated, c2/d2 connected, f2/f3/f4 tripled and isolated
        let (white, _) = pawns("4k3/8/8/8/5P2/P4P2/P1PP1P2/4K3 w - - 0 1", Color::White);
        assert_eq!(doubled_pawns(white), 1 + 2);
        assert_eq!(isolated_pawns(white), 2 + 3);
    }

    #[test]
    fn test_passed_pawn_detection() {
        // e5 is passed, a2 is blocked by the a7 pawn, h2 is stopped by the g3 pawn
        let (white, black) = pawns("4k3/p7/8/4P3/8/6p1/P6P/4K3 w - - 0 1", Color::White);
        let config = HCEConfig::default();
        assert_eq!(
            passed_pawns(white, black, Color::White, &config),
            config.passed_pawn_bonus(3)
        );
    }

    #[test]
    fn test_passed_pawn_bonus_grows_with_advancement() {
        let config = HCEConfig::default();
        let bonuses: Vec<i32> = (0..=5).map(|r| config.passed_pawn_bonus(r)).collect();
        assert_eq!(bonuses, [20, 30, 50, 80, 120, 170]);

        let (low, _) = pawns("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", Color::White);
        let (high, _) = pawns("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1", Color::White);
        assert!(
            passed_pawns(high, BitBoard::EMPTY, Color::White, &config)
                > passed_pawns(low, BitBoard::EMPTY, Color::White, &config)
        );
    }

    #[test]
    fn test_black_passed_pawn_mirrors_white() {
        let config = HCEConfig::default();
        let (white, _) = pawns("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1", Color::White);
        let (black, _) = pawns("4k3/8/8/4p3/8/8/8/4K3 w - - 0 1", Color::Black);
        assert_eq!(
            passed_pawns(white, BitBoard::EMPTY, Color::White, &config),
            passed_pawns(black, BitBoard::EMPTY, Color::Black, &config)
        );
    }
}
