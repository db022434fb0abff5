use cozy_chess::Color;

use crate::context::EvalContext;
use crate::HCEConfig;

/// Mobility bonus for one side, from its pseudo-legal move count.
pub(super) fn evaluate(ctx: &EvalContext, color: Color, config: &HCEConfig) -> i32 {
    config.mobility_bonus * ctx.metrics.mobility[color as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils::board_metrics::pseudo_legal_moves;
    use utils::Position;

    #[test]
    fn test_mobility_follows_the_current_board() {
        let config = HCEConfig::default();
        let mut position = Position::startpos();

        let before = evaluate(&EvalContext::new(&position), Color::White, &config);
        assert_eq!(before, config.mobility_bonus * 20);

        position.play("e2e4").unwrap();
        let after = evaluate(&EvalContext::new(&position), Color::White, &config);
        assert_eq!(
            after,
            config.mobility_bonus * pseudo_legal_moves(position.board(), Color::White)
        );
        assert!(after > before);
    }
}
