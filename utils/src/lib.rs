mod board;
pub mod board_metrics;
mod position;

pub use board::{flip_eval_perspective, game_phase, MAX_PHASE};
pub use position::{Position, PositionError, STARTPOS_FEN};
