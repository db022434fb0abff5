use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use engine::EngineConfig;

#[derive(Parser, Debug)]
#[command(name = "annotate")]
#[command(author = "Jørgen Hanssen <jorgen@hanssen.io>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scores every position of a set of games for training data")]
pub struct Args {
    /// Games, one per line: `startpos [moves ...]` or `fen <FEN> [moves ...]`.
    pub input: PathBuf,

    /// UCI engine to score with. Without one the built-in heuristic is used.
    #[arg(short, long)]
    pub engine: Option<PathBuf>,

    /// Search depth per position (engine only).
    #[arg(short, long, default_value_t = 12)]
    pub depth: u8,

    /// Engine search threads, per worker.
    #[arg(long, default_value_t = 1)]
    pub threads: u32,

    /// Engine hash size in MB, per worker.
    #[arg(long, default_value_t = 16)]
    pub hash: u32,

    #[arg(long, default_value_t = 5000)]
    pub handshake_timeout_ms: u64,

    #[arg(long, default_value_t = 30)]
    pub eval_timeout_s: u64,

    /// Games annotated in parallel, each worker owning one evaluator.
    #[arg(short, long, default_value_t = num_cpus::get())]
    pub workers: usize,

    /// CSV destination. Defaults to a timestamped file under `annotations/`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop reading input after this many games.
    #[arg(long)]
    pub max_games: Option<usize>,

    /// Log to a file instead of stderr.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Log engine traffic.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn engine_config(&self) -> Option<EngineConfig> {
        let path = self.engine.as_ref()?;

        Some(EngineConfig {
            threads: self.threads,
            hash_mb: self.hash,
            handshake_timeout: Duration::from_millis(self.handshake_timeout_ms),
            eval_timeout: Duration::from_secs(self.eval_timeout_s),
            ..EngineConfig::new(path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_heuristic() {
        let args = Args::parse_from(["annotate", "games.txt"]);

        assert_eq!(args.input, PathBuf::from("games.txt"));
        assert_eq!(args.depth, 12);
        assert!(args.engine_config().is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_engine_config_from_flags() {
        let args = Args::parse_from([
            "annotate",
            "games.txt",
            "--engine",
            "/usr/bin/stockfish",
            "--threads",
            "2",
            "--hash",
            "64",
            "--handshake-timeout-ms",
            "1500",
            "--eval-timeout-s",
            "10",
        ]);

        let config = args.engine_config().unwrap();
        assert_eq!(config.path, PathBuf::from("/usr/bin/stockfish"));
        assert_eq!(config.threads, 2);
        assert_eq!(config.hash_mb, 64);
        assert!(config.show_wdl);
        assert_eq!(config.handshake_timeout, Duration::from_millis(1500));
        assert_eq!(config.eval_timeout, Duration::from_secs(10));
    }
}
