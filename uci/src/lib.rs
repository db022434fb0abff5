mod decoder;
mod encoder;

pub mod commands;

pub use commands::{EngineOutput, Info, Score, UciCommand, Wdl};
pub use decoder::{is_uci_move, Decoder};
pub use encoder::Encoder;
