//! Conversions between the score encodings engines report and the normalized Q value.
//!
//! Q is a logistic squash of centipawns into [-1, 1]:
//!
//! ```text
//! Q = 2 / (1 + exp(-0.4 * cp / 100)) - 1
//! ```
//!
//! `cp_to_q` is the single source of truth. `q_to_cp` is its algebraic inverse and is
//! what turns a win/draw/loss triple back into centipawns.

/// Magnitude from which a score is treated as a forced mate. `cp_to_q` saturates here.
pub const MATE_SCORE: i32 = 10_000;

/// Mate distances beyond this many moves all map to `MATE_SCORE`.
const MATE_DISTANCE_RANGE: i32 = 100;

/// Logistic slope per pawn.
const SLOPE: f64 = 0.4;

/// |Q| at or above this is reported as a decided game.
const Q_SATURATION: f64 = 0.99;

/// Normalize centipawns to Q in [-1, 1].
pub fn cp_to_q(score_cp: i32) -> f32 {
    if score_cp >= MATE_SCORE {
        return 1.0;
    }
    if score_cp <= -MATE_SCORE {
        return -1.0;
    }

    let pawns = score_cp as f64 / 100.0;
    let q = 2.0 / (1.0 + (-SLOPE * pawns).exp()) - 1.0;
    q.clamp(-1.0, 1.0) as f32
}

/// Inverse of `cp_to_q`, saturating to `±MATE_SCORE` once |Q| reaches 0.99.
///
/// Returns `None` for a Q that has no centipawn equivalent (NaN).
pub fn q_to_cp(q: f64) -> Option<i32> {
    if q >= Q_SATURATION {
        return Some(MATE_SCORE);
    }
    if q <= -Q_SATURATION {
        return Some(-MATE_SCORE);
    }

    let odds = 2.0 / (q + 1.0) - 1.0;
    if odds.is_nan() || odds <= 0.0 {
        return None;
    }

    Some((100.0 * odds.ln() / -SLOPE).round() as i32)
}

/// Convert a win/draw/loss triple in per-mille to centipawns.
pub fn wdl_to_cp(wins: u32, _draws: u32, losses: u32) -> Option<i32> {
    let q = (wins as f64 - losses as f64) / 1000.0;
    q_to_cp(q)
}

/// Convert a mate distance in moves to centipawns.
///
/// Positive = side to move mates, negative = side to move gets mated. Nearer mates get
/// strictly larger magnitudes than farther ones and every mate is at least `MATE_SCORE`
/// in magnitude. `mate 0` means the side to move is already mated.
pub fn mate_to_cp(moves: i32) -> i32 {
    let distance = moves.unsigned_abs().min(MATE_DISTANCE_RANGE as u32) as i32;
    let magnitude = MATE_SCORE + (MATE_DISTANCE_RANGE - distance);

    if moves > 0 {
        magnitude
    } else {
        -magnitude
    }
}
