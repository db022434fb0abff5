//! Scripted stand-in engines for the client tests.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use engine::{EngineClient, EngineConfig, EngineError};
use tempfile::TempDir;

pub const T_HANDSHAKE: Duration = Duration::from_millis(2000);
pub const T_EVAL: Duration = Duration::from_millis(2000);
pub const T_SHORT: Duration = Duration::from_millis(300);

// Writing an executable while another test forks can fail the exec with ETXTBSY,
// so script creation and engine start-up are serialized.
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

pub fn start_engine(config: EngineConfig) -> Result<EngineClient, EngineError> {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    EngineClient::start(config)
}

pub fn initialize(client: &mut EngineClient) -> Result<(), EngineError> {
    let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    client.initialize()
}

/// A shell-script engine living in its own temp directory. Every line it
/// receives is appended to `received.log` next to it.
pub struct FakeEngine {
    dir: TempDir,
    script: PathBuf,
}

impl FakeEngine {
    /// Standard UCI handshake; `on_go` is the shell snippet run for each `go`.
    pub fn new(on_go: &str) -> Self {
        Self::with_handlers(on_go, "")
    }

    /// Like `new`, with extra `case` arms inserted before the defaults.
    pub fn with_handlers(on_go: &str, extra_cases: &str) -> Self {
        Self::from_body(&format!(
            r#"while IFS= read -r line; do
  echo "$line" >> "$LOG"
  case "$line" in
{extra_cases}
    uci) echo "id name Fake"; echo "id author Tests"; echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) {on_go} ;;
    quit) exit 0 ;;
  esac
done
"#
        ))
    }

    /// A script with an arbitrary body. `$LOG` points at the receive log.
    pub fn from_body(body: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let script = dir.path().join("fake-engine.sh");
        let log = dir.path().join("received.log");

        let source = format!("#!/bin/sh\nLOG='{}'\n{}", log.display(), body);

        let _guard = SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        fs::write(&script, source).expect("write script");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod script");

        Self { dir, script }
    }

    pub fn path(&self) -> &Path {
        &self.script
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            handshake_timeout: T_HANDSHAKE,
            eval_timeout: T_EVAL,
            ..EngineConfig::new(&self.script)
        }
    }

    pub fn start(&self) -> Result<EngineClient, EngineError> {
        self.start_with(self.config())
    }

    pub fn start_with(&self, config: EngineConfig) -> Result<EngineClient, EngineError> {
        start_engine(config)
    }

    /// Lines the engine has read so far. Call after `quit()` to see everything.
    pub fn received(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("received.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
