use std::io::{self, Write};

/// One scored position of one game.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub game: usize,
    pub ply: usize,
    pub fen: String,
    pub score_cp: i32,
    pub q: f32,
    pub best_move: Option<String>,
}

pub fn write_csv<W: Write>(annotations: &[Annotation], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "game,ply,fen,score_cp,q,best_move")?; // Header

    for a in annotations {
        writeln!(
            writer,
            "{},{},{},{},{:.6},{}",
            a.game,
            a.ply,
            a.fen,
            a.score_cp,
            a.q,
            a.best_move.as_deref().unwrap_or("")
        )?;
    }

    Ok(())
}
