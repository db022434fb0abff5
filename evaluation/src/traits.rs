// Evaluator capability for position evaluation.
//
// The `evaluation` crate provides the shared interface and score types.
// Concrete implementations live in their own crates:
// - `hce` crate: heuristic evaluation, in-process and infallible
// - `engine` crate: an external UCI engine driven over pipes
//
// Callers pick one at construction time and hold it as `Box<dyn Evaluator>`.

use std::error::Error;
use thiserror::Error;
use utils::Position;

use crate::scores::cp_to_q;

/// Outcome of evaluating one position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationResult {
    /// Centipawns from the side to move's perspective.
    pub score_cp: i32,
    /// Best move in long algebraic notation, when the evaluator searched for one.
    pub best_move: Option<String>,
    pub nodes: u64,
}

impl EvaluationResult {
    pub fn from_cp(score_cp: i32) -> Self {
        Self {
            score_cp,
            ..Default::default()
        }
    }

    /// Normalized score in [-1, 1].
    #[inline]
    pub fn q(&self) -> f32 {
        cp_to_q(self.score_cp)
    }
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("evaluator failed: {0}")]
    Backend(#[source] Box<dyn Error + Send + Sync>),
}

pub trait Evaluator: Send {
    fn name(&self) -> String;

    /// Evaluate position from the side to move's perspective. Positive = side to move is better.
    ///
    /// `effort` is the search depth for evaluators that search and is ignored by those
    /// that don't.
    fn evaluate(&mut self, position: &Position, effort: u8) -> Result<EvaluationResult, EvalError>;
}
