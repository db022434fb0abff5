use super::commands::UciCommand;

pub struct Encoder {}

impl Encoder {
    pub fn encode(&self, command: &UciCommand) -> String {
        match command {
            UciCommand::Uci => "uci".to_string(),
            UciCommand::IsReady => "isready".to_string(),
            UciCommand::SetOption { name, value } => {
                format!("setoption name {} value {}", name, value)
            }
            UciCommand::Position { fen, moves } => {
                let mut line = match fen {
                    Some(fen) => format!("position fen {}", fen),
                    None => "position startpos".to_string(),
                };
                if !moves.is_empty() {
                    line.push_str(" moves ");
                    line.push_str(&moves.join(" "));
                }
                line
            }
            UciCommand::Go { depth } => format!("go depth {}", depth),
            UciCommand::Stop => "stop".to_string(),
            UciCommand::Quit => "quit".to_string(),
        }
    }
}
