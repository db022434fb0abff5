mod config;
mod context;
mod eval_material;
mod eval_mobility;
mod eval_pawns;
mod pst;

pub use config::HCEConfig;
pub use eval_material::piece_value;

use context::EvalContext;
use cozy_chess::Color;
use evaluation::{EvalError, EvaluationResult, Evaluator};
use utils::{flip_eval_perspective, Position};

/// Heuristic evaluation: material, piece placement, pawn structure and mobility.
///
/// Stateless and deterministic. The same position always gets the same score, and one
/// instance can be shared across threads.
///
/// <https://www.chessprogramming.org/Evaluation>
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    config: HCEConfig,
}

impl HeuristicEvaluator {
    pub fn new(config: HCEConfig) -> Self {
        Self { config }
    }

    /// Evaluates from White's perspective. Positive = White advantage.
    pub fn evaluate_white(&self, position: &Position) -> i32 {
        let ctx = EvalContext::new(position);

        let mut cp = 0;

        cp += eval_material::evaluate(&ctx, Color::White, &self.config);
        cp -= eval_material::evaluate(&ctx, Color::Black, &self.config);

        cp += eval_pawns::evaluate(&ctx, Color::White, &self.config);
        cp -= eval_pawns::evaluate(&ctx, Color::Black, &self.config);

        cp += eval_mobility::evaluate(&ctx, Color::White, &self.config);
        cp -= eval_mobility::evaluate(&ctx, Color::Black, &self.config);

        cp
    }

    /// Evaluates from the side to move's perspective.
    pub fn evaluate_cp(&self, position: &Position) -> i32 {
        flip_eval_perspective(position.board(), self.evaluate_white(position))
    }
}

impl Evaluator for HeuristicEvaluator {
    fn name(&self) -> String {
        "HCE".to_string()
    }

    fn evaluate(&mut self, position: &Position, _effort: u8) -> Result<EvaluationResult, EvalError> {
        Ok(EvaluationResult::from_cp(self.evaluate_cp(position)))
    }
}
