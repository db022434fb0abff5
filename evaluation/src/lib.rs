pub mod scores;
mod traits;

pub use scores::{cp_to_q, mate_to_cp, q_to_cp, wdl_to_cp, MATE_SCORE};
pub use traits::{EvalError, EvaluationResult, Evaluator};
