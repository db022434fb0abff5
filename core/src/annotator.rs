use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use engine::{EngineClient, EngineConfig};
use evaluation::Evaluator;
use hce::{HCEConfig, HeuristicEvaluator};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::game::{annotate_game, GameError};
use crate::samples::Annotation;

pub struct Annotator {
    depth: u8,
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl Annotator {
    /// One engine subprocess per worker, or the heuristic when no engine is configured.
    pub fn new(
        workers: usize,
        depth: u8,
        engine: Option<EngineConfig>,
    ) -> Result<Self, Box<dyn Error>> {
        let workers = workers.max(1);
        let mut evaluators: Vec<Box<dyn Evaluator>> = Vec::with_capacity(workers);

        for _ in 0..workers {
            match &engine {
                Some(config) => evaluators.push(Box::new(EngineClient::start(config.clone())?)),
                None => evaluators.push(Box::new(HeuristicEvaluator::new(HCEConfig::default()))),
            }
        }

        Ok(Self::with_evaluators(depth, evaluators))
    }

    pub fn with_evaluators(depth: u8, evaluators: Vec<Box<dyn Evaluator>>) -> Self {
        Self { depth, evaluators }
    }

    /// Annotates `games` until done or `stop` is raised. A stopped run keeps
    /// every game that was finished. Results are ordered by game, then ply.
    ///
    /// A worker whose evaluator fails is retired. The game it was on is handed to a
    /// surviving evaluator once the parallel pass is over.
    pub fn run(
        self,
        games: &[String],
        stop: &AtomicBool,
        progress: &ProgressBar,
    ) -> Result<Vec<Annotation>, Box<dyn Error>> {
        let workers = self.evaluators.len();
        if let Some(first) = self.evaluators.first() {
            log::info!(
                "Annotating {} games with {} x {} at depth {}",
                games.len(),
                workers,
                first.name(),
                self.depth
            );
        }

        let pool = ThreadPoolBuilder::new().num_threads(workers.max(1)).build()?;
        let next_game = AtomicUsize::new(0);
        let depth = self.depth;

        let outputs: Vec<WorkerOutput> = pool.install(|| {
            self.evaluators
                .into_par_iter()
                .enumerate()
                .map(|(tid, evaluator)| {
                    run_worker(tid, evaluator, games, depth, &next_game, stop, progress)
                })
                .collect()
        });

        let mut annotations = Vec::new();
        let mut survivors = Vec::new();
        let mut orphaned = Vec::new();
        for output in outputs {
            annotations.extend(output.annotations);
            match output.evaluator {
                Ok(evaluator) => survivors.push(evaluator),
                Err(game) => orphaned.push(game),
            }
        }

        if !orphaned.is_empty() {
            match survivors.first_mut() {
                Some(evaluator) => {
                    for game in orphaned {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        match annotate_game(evaluator.as_mut(), game, &games[game], depth) {
                            Ok(game_annotations) => annotations.extend(game_annotations),
                            Err(e) => log::warn!("Skipping game {}: {}", game, e),
                        }
                        progress.inc(1);
                    }
                }
                None => log::error!(
                    "Every evaluator failed, {} games left unannotated",
                    games.len().saturating_sub(progress.position() as usize)
                ),
            }
        }

        annotations.sort_by_key(|a| (a.game, a.ply));
        Ok(annotations)
    }
}

struct WorkerOutput {
    annotations: Vec<Annotation>,
    // The evaluator back when it is still healthy, otherwise the game it failed on
    evaluator: Result<Box<dyn Evaluator>, usize>,
}

fn run_worker(
    tid: usize,
    mut evaluator: Box<dyn Evaluator>,
    games: &[String],
    depth: u8,
    next_game: &AtomicUsize,
    stop: &AtomicBool,
    progress: &ProgressBar,
) -> WorkerOutput {
    let mut annotations = Vec::new();

    while !stop.load(Ordering::Relaxed) {
        let game = next_game.fetch_add(1, Ordering::Relaxed);
        let Some(line) = games.get(game) else {
            break;
        };

        match annotate_game(evaluator.as_mut(), game, line, depth) {
            Ok(game_annotations) => annotations.extend(game_annotations),
            Err(GameError::Position(e)) => log::warn!("[{}] Skipping game {}: {}", tid, game, e),
            Err(GameError::Evaluator(e)) => {
                log::error!("[{}] {} failed, retiring worker: {}", tid, evaluator.name(), e);
                return WorkerOutput {
                    annotations,
                    evaluator: Err(game),
                };
            }
        }
        progress.inc(1);
    }

    WorkerOutput {
        annotations,
        evaluator: Ok(evaluator),
    }
}

pub fn progress_bar(games: usize) -> Result<ProgressBar, Box<dyn Error>> {
    let bar = ProgressBar::new(games as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {pos}/{len} games [{wide_bar:.cyan/blue}] {eta_precise}")?,
    );
    Ok(bar)
}
