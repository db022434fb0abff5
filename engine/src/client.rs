use std::time::Instant;

use evaluation::{mate_to_cp, wdl_to_cp, EvalError, EvaluationResult, Evaluator};
use uci::{Decoder, Encoder, EngineOutput, Info, Score, UciCommand};
use utils::Position;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::process::{EngineProcess, Recv};
use crate::session::{RecentLines, SessionState};

/// Drives one external UCI engine. One exchange at a time: run one client per worker.
pub struct EngineClient {
    config: EngineConfig,
    process: Option<EngineProcess>,
    state: SessionState,
    recent: RecentLines,
    encoder: Encoder,
    decoder: Decoder,

    // Set when a search was abandoned; the next exchange must flush its leftovers first.
    needs_resync: bool,
}

impl EngineClient {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            process: None,
            state: SessionState::Uninitialized,
            recent: RecentLines::default(),
            encoder: Encoder {},
            decoder: Decoder::new(),
            needs_resync: false,
        }
    }

    /// Creates a client and runs the handshake.
    pub fn start(config: EngineConfig) -> Result<Self, EngineError> {
        let mut client = Self::new(config);
        client.initialize()?;
        Ok(client)
    }

    /// Launches the engine and brings the session to `Ready`.
    ///
    /// On failure every resource is released and the session is `Terminated`.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.state != SessionState::Uninitialized {
            return Err(EngineError::NotReady(self.state));
        }

        if let Err(e) = self.handshake() {
            log::error!(
                "failed to initialize engine '{}': {}",
                self.config.path.display(),
                e
            );
            self.shutdown();
            return Err(e);
        }

        log::info!("engine '{}' ready", self.config.path.display());
        Ok(())
    }

    fn handshake(&mut self) -> Result<(), EngineError> {
        self.state = SessionState::Starting;
        self.process = Some(EngineProcess::spawn(&self.config.path)?);

        self.state = SessionState::AwaitingHandshakeAck;
        self.send(&UciCommand::Uci)?;
        self.wait_for("uci", "uciok", |out| *out == EngineOutput::UciOk)?;

        self.state = SessionState::ConfiguringOptions;
        self.send(&UciCommand::set_option("Threads", self.config.threads))?;
        self.send(&UciCommand::set_option("Hash", self.config.hash_mb))?;
        if self.config.show_wdl {
            self.send(&UciCommand::set_option("UCI_ShowWDL", true))?;
        }

        self.state = SessionState::AwaitingReadyAck;
        self.send(&UciCommand::IsReady)?;
        self.wait_for("isready", "readyok", |out| *out == EngineOutput::ReadyOk)?;

        self.state = SessionState::Ready;
        Ok(())
    }

    /// Sends the position to search next. An empty `base_fen` or the initial
    /// position's FEN is sent as `startpos`.
    pub fn set_position(&mut self, base_fen: &str, moves: &[String]) -> Result<(), EngineError> {
        self.ensure_ready()?;
        self.send(&UciCommand::position(base_fen, moves))
    }

    pub fn set_position_fen(&mut self, fen: &str) -> Result<(), EngineError> {
        self.set_position(fen, &[])
    }

    /// Searches the current position to `depth` and collects the engine's verdict.
    ///
    /// A search that outlives the evaluation timeout is abandoned: the default
    /// result is returned and the session stays usable.
    pub fn evaluate(&mut self, depth: u8) -> Result<EvaluationResult, EngineError> {
        self.ensure_ready()?;

        self.recent.clear();
        self.state = SessionState::Busy;
        self.send(&UciCommand::Go { depth })?;

        let deadline = Instant::now() + self.config.eval_timeout;
        let mut result = EvaluationResult::default();

        loop {
            let line = match self.recv_line(deadline) {
                Recv::Line(line) => line,
                Recv::Timeout => return Ok(self.abandon_search()),
                Recv::Closed => return Err(self.terminated()),
            };

            match self.decoder.decode(&line) {
                EngineOutput::Info(info) => apply_info(&mut result, &info),
                EngineOutput::BestMove { best_move, .. } => {
                    result.best_move = best_move;
                    self.state = SessionState::Ready;
                    return Ok(result);
                }
                EngineOutput::Error(line) => log::warn!("engine reported: {}", line),
                other => log::trace!("ignoring engine output: {:?}", other),
            }
        }
    }

    /// Ends the session. Safe to call any number of times, in any state.
    pub fn quit(&mut self) {
        let Some(mut process) = self.process.take() else {
            self.state = SessionState::Terminated;
            return;
        };

        if process.is_open() {
            let quit = self.encoder.encode(&UciCommand::Quit);
            log::debug!(">> {}", quit);
            let _ = process.send(&quit);
        }
        process.close();

        self.state = SessionState::Terminated;
    }

    /// True while commands can still be written to the engine.
    pub fn is_running(&self) -> bool {
        self.process.as_ref().is_some_and(EngineProcess::is_open)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn ensure_ready(&mut self) -> Result<(), EngineError> {
        if !self.state.is_ready() {
            return Err(EngineError::NotReady(self.state));
        }
        if self.needs_resync {
            self.resync()?;
        }
        Ok(())
    }

    // Flushes the tail of an abandoned search: everything up to `readyok` is stale.
    fn resync(&mut self) -> Result<(), EngineError> {
        self.state = SessionState::AwaitingReadyAck;
        self.send(&UciCommand::IsReady)?;

        if let Err(e) = self.wait_for("isready", "readyok", |out| *out == EngineOutput::ReadyOk) {
            log::error!("engine did not resynchronize: {}", e);
            self.shutdown();
            return Err(e);
        }

        self.needs_resync = false;
        self.state = SessionState::Ready;
        Ok(())
    }

    fn abandon_search(&mut self) -> EvaluationResult {
        log::warn!(
            "engine search timed out after {:?}, last output:",
            self.config.eval_timeout
        );
        for line in self.recent.iter() {
            log::warn!("  {}", line);
        }

        // Best effort; a dead engine surfaces on the next exchange.
        let _ = self.send(&UciCommand::Stop);
        self.needs_resync = true;
        if !self.state.is_terminated() {
            self.state = SessionState::Ready;
        }

        EvaluationResult::default()
    }

    fn wait_for(
        &mut self,
        command: &'static str,
        expected: &'static str,
        is_expected: impl Fn(&EngineOutput) -> bool,
    ) -> Result<(), EngineError> {
        let timeout = self.config.handshake_timeout;
        let deadline = Instant::now() + timeout;

        loop {
            let line = match self.recv_line(deadline) {
                Recv::Line(line) => line,
                Recv::Timeout => {
                    return Err(EngineError::HandshakeTimeout {
                        command,
                        expected,
                        timeout,
                    })
                }
                Recv::Closed => return Err(self.terminated()),
            };

            match self.decoder.decode(&line) {
                output if is_expected(&output) => return Ok(()),
                EngineOutput::Error(line) => log::warn!("engine reported: {}", line),
                other => log::trace!("skipping while waiting for {}: {:?}", expected, other),
            }
        }
    }

    fn send(&mut self, command: &UciCommand) -> Result<(), EngineError> {
        let line = self.encoder.encode(command);
        let Some(process) = self.process.as_mut() else {
            return Err(EngineError::NotReady(self.state));
        };

        log::debug!(">> {}", line);
        if let Err(e) = process.send(&line) {
            log::warn!("failed to write '{}' to engine: {}", line, e);
            return Err(self.terminated());
        }
        Ok(())
    }

    fn recv_line(&mut self, deadline: Instant) -> Recv {
        let Some(process) = self.process.as_ref() else {
            return Recv::Closed;
        };

        let received = process.recv_line(deadline);
        if let Recv::Line(line) = &received {
            log::debug!("<< {}", line);
            self.recent.push(line);
        }
        received
    }

    fn terminated(&mut self) -> EngineError {
        log::warn!("engine '{}' terminated", self.config.path.display());
        self.shutdown();
        EngineError::ProcessTerminated
    }

    fn shutdown(&mut self) {
        if let Some(mut process) = self.process.take() {
            process.close();
        }
        self.state = SessionState::Terminated;
    }
}

fn apply_info(result: &mut EvaluationResult, info: &Info) {
    if let Some(nodes) = info.nodes {
        result.nodes = nodes;
    }

    match info.score {
        Some(Score::Centipawns(cp)) => result.score_cp = cp,
        Some(Score::Mate(moves)) => result.score_cp = mate_to_cp(moves),
        None => {}
    }

    // Applied after the score so a line carrying both resolves to the WDL value.
    if let Some(wdl) = info.wdl {
        if let Some(cp) = wdl_to_cp(wdl.wins, wdl.draws, wdl.losses) {
            result.score_cp = cp;
        }
    }
}

impl Evaluator for EngineClient {
    fn name(&self) -> String {
        let path = &self.config.path;
        let name = path.file_name().unwrap_or(path.as_os_str());
        format!("UCI ({})", name.to_string_lossy())
    }

    fn evaluate(&mut self, position: &Position, effort: u8) -> Result<EvaluationResult, EvalError> {
        let backend = |e: EngineError| EvalError::Backend(Box::new(e));

        self.set_position(position.base_fen(), position.moves())
            .map_err(backend)?;
        EngineClient::evaluate(self, effort).map_err(backend)
    }
}

impl Drop for EngineClient {
    fn drop(&mut self) {
        self.quit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uci::Wdl;

    fn info(score: Option<Score>, wdl: Option<(u32, u32, u32)>, nodes: Option<u64>) -> Info {
        Info {
            depth: None,
            nodes,
            score,
            wdl: wdl.map(|(wins, draws, losses)| Wdl {
                wins,
                draws,
                losses,
            }),
        }
    }

    #[test]
    fn test_apply_info_last_value_wins() {
        let mut result = EvaluationResult::default();

        apply_info(&mut result, &info(Some(Score::Centipawns(12)), None, Some(100)));
        apply_info(&mut result, &info(Some(Score::Centipawns(35)), None, Some(1000)));
        apply_info(&mut result, &info(None, None, None));

        assert_eq!(result.score_cp, 35);
        assert_eq!(result.nodes, 1000);
    }

    #[test]
    fn test_apply_info_mate() {
        let mut result = EvaluationResult::default();
        apply_info(&mut result, &info(Some(Score::Mate(3)), None, None));
        assert_eq!(result.score_cp, mate_to_cp(3));

        apply_info(&mut result, &info(Some(Score::Mate(-1)), None, None));
        assert_eq!(result.score_cp, mate_to_cp(-1));
        assert!(result.score_cp <= -10_000);

        // Out-of-range distances from a misbehaving engine still give a mate score.
        apply_info(&mut result, &info(Some(Score::Mate(i32::MIN)), None, None));
        assert_eq!(result.score_cp, -10_000);
    }

    #[test]
    fn test_apply_info_wdl_overrides_cp() {
        let mut result = EvaluationResult::default();
        apply_info(
            &mut result,
            &info(Some(Score::Centipawns(-300)), Some((1000, 0, 0)), None),
        );
        assert_eq!(result.score_cp, 10_000);
    }

    #[test]
    fn test_new_client_is_idle() {
        let mut client = EngineClient::new(EngineConfig::new("/nonexistent/engine"));

        assert_eq!(client.state(), SessionState::Uninitialized);
        assert!(!client.is_running());
        assert!(matches!(
            client.evaluate(5),
            Err(EngineError::NotReady(SessionState::Uninitialized))
        ));

        client.quit();
        client.quit();
        assert_eq!(client.state(), SessionState::Terminated);
    }

    #[test]
    fn test_name_uses_executable() {
        let client = EngineClient::new(EngineConfig::new("/usr/local/bin/stockfish"));
        assert_eq!(Evaluator::name(&client), "UCI (stockfish)");
    }
}
