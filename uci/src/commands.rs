use utils::STARTPOS_FEN;

/// Commands sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    SetOption { name: String, value: String },
    Position {
        // None = the initial position
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go { depth: u8 },
    Stop,
    Quit,
}

impl UciCommand {
    /// Builds a `position` command, using the `startpos` shorthand when `base_fen` is empty
    /// or is the initial position.
    pub fn position(base_fen: &str, moves: &[String]) -> Self {
        let base_fen = base_fen.trim();
        let fen = if base_fen.is_empty() || base_fen == STARTPOS_FEN {
            None
        } else {
            Some(base_fen.to_string())
        };

        UciCommand::Position {
            fen,
            moves: moves.to_vec(),
        }
    }

    pub fn set_option(name: &str, value: impl ToString) -> Self {
        UciCommand::SetOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Lines received from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutput {
    UciOk,
    ReadyOk,
    Info(Info),
    BestMove {
        // None when the engine has no move to play ("0000" or "(none)")
        best_move: Option<String>,
        ponder: Option<String>,
    },
    /// A line the engine uses to report a problem. Never fatal.
    Error(String),
    /// Anything else: `id`, `option`, blank lines, unrecognised output.
    Unknown(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub score: Option<Score>,
    pub wdl: Option<Wdl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Centipawns(i32), // centipawns
    Mate(i32),       // Positive for mate-in-n, negative for mated-in-n
}

/// Win/draw/loss expectation in per-mille, from the side to move's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wdl {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}
