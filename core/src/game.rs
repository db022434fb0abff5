use std::io::{self, BufRead};

use evaluation::{EvalError, Evaluator};
use thiserror::Error;
use utils::{Position, PositionError};

use crate::samples::Annotation;

#[derive(Debug, Error)]
pub enum GameError {
    /// The game line itself is bad. Only this game is affected.
    #[error(transparent)]
    Position(#[from] PositionError),
    /// The evaluator failed and should not be given more work.
    #[error(transparent)]
    Evaluator(#[from] EvalError),
}

/// Reads game lines, skipping blank lines and `#` comments.
pub fn read_games<R: BufRead>(reader: R, max_games: Option<usize>) -> io::Result<Vec<String>> {
    let mut games = Vec::new();

    for line in reader.lines() {
        if max_games.is_some_and(|max| games.len() >= max) {
            break;
        }

        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        games.push(line.to_string());
    }

    Ok(games)
}

/// Scores the starting position and the position after every move of one game.
pub fn annotate_game(
    evaluator: &mut dyn Evaluator,
    game: usize,
    line: &str,
    depth: u8,
) -> Result<Vec<Annotation>, GameError> {
    // Parsing the whole line first rejects a bad game before any evaluation is spent on it.
    let full = Position::from_uci(line)?;

    let mut position = match full.base_fen() {
        "" => Position::startpos(),
        fen => Position::from_fen(fen)?,
    };

    let mut annotations = Vec::with_capacity(full.moves().len() + 1);
    for ply in 0..=full.moves().len() {
        if ply > 0 {
            position.play(&full.moves()[ply - 1])?;
        }

        let result = evaluator.evaluate(&position, depth)?;
        annotations.push(Annotation {
            game,
            ply,
            fen: position.fen(),
            score_cp: result.score_cp,
            q: result.q(),
            best_move: result.best_move,
        });
    }

    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evaluation::{cp_to_q, EvalError, EvaluationResult};
    use hce::HeuristicEvaluator;

    /// Records what it was asked to evaluate.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Vec<String>, u8)>,
    }

    impl Evaluator for Recorder {
        fn name(&self) -> String {
            "Recorder".to_string()
        }

        fn evaluate(
            &mut self,
            position: &Position,
            effort: u8,
        ) -> Result<EvaluationResult, EvalError> {
            self.seen.push((
                position.base_fen().to_string(),
                position.moves().to_vec(),
                effort,
            ));
            Ok(EvaluationResult::from_cp(self.seen.len() as i32))
        }
    }

    #[test]
    fn test_read_games_skips_comments_and_limits() {
        let input = "# opening set\nstartpos moves e2e4\n\n  startpos  \nfen 8/8/8/8/8/8/4k3/4K3 w - - 0 1\n";

        let games = read_games(input.as_bytes(), None).unwrap();
        assert_eq!(
            games,
            vec![
                "startpos moves e2e4",
                "startpos",
                "fen 8/8/8/8/8/8/4k3/4K3 w - - 0 1"
            ]
        );

        let games = read_games(input.as_bytes(), Some(2)).unwrap();
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn test_annotate_every_ply() {
        let mut recorder = Recorder::default();
        let annotations =
            annotate_game(&mut recorder, 3, "startpos moves e2e4 e7e5", 9).unwrap();

        assert_eq!(annotations.len(), 3);
        assert!(annotations.iter().all(|a| a.game == 3));
        assert_eq!(
            annotations.iter().map(|a| a.ply).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(
            annotations[1].fen,
            Position::from_uci("startpos moves e2e4").unwrap().fen()
        );
        assert!(annotations[1].fen.starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq"));
        assert_eq!(annotations[2].score_cp, 3);
        assert_eq!(annotations[2].q, cp_to_q(3));

        // Each position carries the game's history up to that ply.
        assert_eq!(
            recorder.seen,
            vec![
                (String::new(), vec![], 9),
                (String::new(), vec!["e2e4".to_string()], 9),
                (String::new(), vec!["e2e4".to_string(), "e7e5".to_string()], 9),
            ]
        );
    }

    #[test]
    fn test_annotate_from_fen() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
        let mut recorder = Recorder::default();
        let annotations =
            annotate_game(&mut recorder, 0, &format!("fen {} moves e2e4", fen), 1).unwrap();

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].fen, fen);
        assert_eq!(recorder.seen[1].0, fen);
    }

    #[test]
    fn test_illegal_game_is_rejected_before_evaluating() {
        let mut recorder = Recorder::default();

        assert!(matches!(
            annotate_game(&mut recorder, 0, "startpos moves e2e5", 1),
            Err(GameError::Position(_))
        ));
        assert!(matches!(
            annotate_game(&mut recorder, 0, "somewhere moves e2e4", 1),
            Err(GameError::Position(_))
        ));
        assert!(recorder.seen.is_empty());
    }

    #[test]
    fn test_annotate_with_heuristic() {
        let mut evaluator = HeuristicEvaluator::default();
        let annotations = annotate_game(&mut evaluator, 0, "startpos", 0).unwrap();

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].score_cp, 0);
        assert_eq!(annotations[0].q, 0.0);
        assert_eq!(annotations[0].best_move, None);
    }
}
