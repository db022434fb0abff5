use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Executable to launch. Started without arguments.
    pub path: PathBuf,

    pub threads: u32,
    pub hash_mb: u32,
    /// Ask the engine for `wdl <w> <d> <l>` in its info lines.
    pub show_wdl: bool,

    /// Bound on each handshake wait (`uciok`, `readyok`).
    pub handshake_timeout: Duration,
    /// Wall-clock bound on one `go` exchange.
    pub eval_timeout: Duration,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("stockfish"),
            threads: 1,
            hash_mb: 16,
            show_wdl: true,
            handshake_timeout: Duration::from_millis(5000),
            eval_timeout: Duration::from_secs(30),
        }
    }
}
