use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine '{}': {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("engine did not answer '{command}' with '{expected}' within {timeout:?}")]
    HandshakeTimeout {
        command: &'static str,
        expected: &'static str,
        timeout: Duration,
    },

    #[error("engine session is not ready (state: {0:?})")]
    NotReady(SessionState),

    #[error("engine process terminated")]
    ProcessTerminated,

    #[error("engine I/O error: {0}")]
    Io(#[from] io::Error),
}
