use std::str::FromStr;

use super::commands::{EngineOutput, Info, Score, Wdl};

// Prefixes (lowercased) of lines an engine uses to complain about its input or setup.
const ERROR_MARKERS: [&str; 4] = ["error", "unknown command", "no such option", "illegal"];

pub struct Decoder;

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &str) -> EngineOutput {
        let input = input.trim();

        match input {
            "uciok" => EngineOutput::UciOk,
            "readyok" => EngineOutput::ReadyOk,

            _ if is_error_marker(input) => EngineOutput::Error(input.to_string()),
            _ if first_token(input) == Some("bestmove") => self.decode_bestmove(input),
            _ if first_token(input) == Some("info") => self.decode_info(input),

            _ => EngineOutput::Unknown(input.to_string()),
        }
    }

    fn decode_bestmove(&self, input: &str) -> EngineOutput {
        // Parse: bestmove <move> [ponder <move>]
        let tokens: Vec<&str> = input.split_whitespace().collect();

        EngineOutput::BestMove {
            best_move: tokens.get(1).copied().and_then(parse_move),
            ponder: extract_param::<String>(&tokens, "ponder").and_then(|m| parse_move(&m)),
        }
    }

    fn decode_info(&self, input: &str) -> EngineOutput {
        let tokens: Vec<&str> = input.split_whitespace().collect();

        // Free text; any "cp" or "wdl" inside it is not a score.
        if tokens.get(1) == Some(&"string") {
            return EngineOutput::Unknown(input.to_string());
        }

        // Everything after "pv" is a move list.
        let end = tokens
            .iter()
            .position(|&t| t == "pv")
            .unwrap_or(tokens.len());
        let tokens = &tokens[..end];

        let score = match extract_param::<i32>(tokens, "cp") {
            Some(cp) if has_pair(tokens, "score", "cp") => Some(Score::Centipawns(cp)),
            _ => match extract_param::<i32>(tokens, "mate") {
                Some(k) if has_pair(tokens, "score", "mate") => Some(Score::Mate(k)),
                _ => None,
            },
        };

        EngineOutput::Info(Info {
            depth: extract_param(tokens, "depth"),
            nodes: extract_param(tokens, "nodes"),
            score,
            wdl: extract_wdl(tokens),
        })
    }
}

/// True for long-algebraic moves: `[a-h][1-8][a-h][1-8]` plus an optional `[qrbn]` promotion.
pub fn is_uci_move(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return false;
    }

    let file = |b: u8| (b'a'..=b'h').contains(&b);
    let rank = |b: u8| (b'1'..=b'8').contains(&b);

    file(bytes[0])
        && rank(bytes[1])
        && file(bytes[2])
        && rank(bytes[3])
        && match bytes.get(4) {
            Some(promotion) => b"qrbn".contains(promotion),
            None => true,
        }
}

fn parse_move(token: &str) -> Option<String> {
    is_uci_move(token).then(|| token.to_string())
}

fn is_error_marker(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    let text = lower
        .strip_prefix("info string")
        .map(str::trim_start)
        .unwrap_or(&lower);

    ERROR_MARKERS.iter().any(|marker| text.starts_with(marker))
}

fn first_token(input: &str) -> Option<&str> {
    input.split_whitespace().next()
}

fn has_pair(tokens: &[&str], first: &str, second: &str) -> bool {
    tokens.windows(2).any(|w| w[0] == first && w[1] == second)
}

fn extract_param<T: FromStr>(tokens: &[&str], param: &str) -> Option<T> {
    tokens
        .windows(2)
        .find(|w| w[0] == param)
        .and_then(|w| w[1].parse().ok())
}

fn extract_wdl(tokens: &[&str]) -> Option<Wdl> {
    tokens.windows(4).find(|w| w[0] == "wdl").and_then(|w| {
        Some(Wdl {
            wins: w[1].parse().ok()?,
            draws: w[2].parse().ok()?,
            losses: w[3].parse().ok()?,
        })
    })
}
