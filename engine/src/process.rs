use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::EngineError;

// How long a closing engine gets to exit on its own before it is killed.
const EXIT_GRACE: Duration = Duration::from_millis(500);
const EXIT_POLL: Duration = Duration::from_millis(10);

const READ_CHUNK: usize = 4096;

// Lines buffered ahead of the client. A full channel stalls the readers, and the engine
// blocks on its own output pipe.
const LINE_BACKLOG: usize = 1024;

pub(crate) enum Recv {
    Line(String),
    Timeout,
    Closed,
}

/// A child process seen as a duplex line stream.
///
/// stdout and stderr are each drained by a reader thread into one channel, so
/// the owner sees a single merged stream of lines and can wait on it with a deadline.
pub(crate) struct EngineProcess {
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
    lines: Receiver<String>,
}

impl EngineProcess {
    pub fn spawn(path: &Path) -> Result<Self, EngineError> {
        let spawn_error = |source| EngineError::Spawn {
            path: path.to_path_buf(),
            source,
        };

        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(spawn_error(io::Error::other("child pipes unavailable")));
        };

        let (tx, lines) = mpsc::sync_channel(LINE_BACKLOG);
        let readers = spawn_reader("engine-stdout", stdout, tx.clone())
            .and_then(|_| spawn_reader("engine-stderr", stderr, tx));

        if let Err(e) = readers {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EngineError::Io(e));
        }

        Ok(Self {
            child,
            stdin: Some(BufWriter::new(stdin)),
            lines,
        })
    }

    pub fn is_open(&self) -> bool {
        self.stdin.is_some()
    }

    /// Writes one command line. A failed write closes the outbound stream.
    pub fn send(&mut self, line: &str) -> io::Result<()> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"));
        };

        let result = stdin
            .write_all(line.as_bytes())
            .and_then(|_| stdin.write_all(b"\n"))
            .and_then(|_| stdin.flush());

        if result.is_err() {
            self.stdin = None;
        }
        result
    }

    /// Waits for the next line until `deadline`. Past the deadline nothing is
    /// returned, even when lines are queued.
    pub fn recv_line(&self, deadline: Instant) -> Recv {
        let now = Instant::now();
        if now >= deadline {
            return Recv::Timeout;
        }

        match self.lines.recv_timeout(deadline - now) {
            Ok(line) => Recv::Line(line),
            Err(RecvTimeoutError::Timeout) => Recv::Timeout,
            Err(RecvTimeoutError::Disconnected) => Recv::Closed,
        }
    }

    /// Drops the outbound stream and reaps the child, killing it if it does not
    /// exit within the grace period.
    pub fn close(&mut self) {
        self.stdin = None;

        let deadline = Instant::now() + EXIT_GRACE;
        loop {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) if Instant::now() < deadline => thread::sleep(EXIT_POLL),
                Ok(None) | Err(_) => break,
            }
        }

        log::debug!("engine did not exit in {:?}, killing it", EXIT_GRACE);
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            self.close();
        }
    }
}

fn spawn_reader<R>(name: &str, source: R, tx: SyncSender<String>) -> io::Result<()>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || read_lines(source, tx))
        .map(|_| ())
}

fn read_lines<R: Read>(mut source: R, tx: SyncSender<String>) {
    let mut buffer = LineBuffer::default();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match source.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        };

        for line in buffer.push(&chunk[..n]) {
            if tx.send(line).is_err() {
                return;
            }
        }
    }

    if let Some(line) = buffer.finish() {
        let _ = tx.send(line);
    }
}

/// Reassembles lines from arbitrary byte chunks. `\r` is dropped, `\n` ends a line.
#[derive(Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        for &byte in chunk {
            match byte {
                b'\n' => lines.push(self.take()),
                b'\r' => {}
                _ => self.pending.push(byte),
            }
        }

        lines
    }

    /// Whatever is left after the stream ends without a final newline.
    fn finish(mut self) -> Option<String> {
        (!self.pending.is_empty()).then(|| self.take())
    }

    fn take(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_buffer_joins_partial_chunks() {
        let mut buffer = LineBuffer::default();

        assert!(buffer.push(b"info dep").is_empty());
        assert_eq!(buffer.push(b"th 5\nbest"), vec!["info depth 5"]);
        assert_eq!(buffer.push(b"move e2e4\n"), vec!["bestmove e2e4"]);
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_line_buffer_strips_carriage_returns() {
        let mut buffer = LineBuffer::default();

        assert_eq!(
            buffer.push(b"uciok\r\nreadyok\r\n\r\n"),
            vec!["uciok", "readyok", ""]
        );
    }

    #[test]
    fn test_line_buffer_flushes_unterminated_tail() {
        let mut buffer = LineBuffer::default();

        assert!(buffer.push(b"bestmove a7a8q").is_empty());
        assert_eq!(buffer.finish(), Some("bestmove a7a8q".to_string()));
    }

    #[test]
    fn test_read_lines_from_reader() {
        let (tx, rx) = mpsc::sync_channel(LINE_BACKLOG);
        read_lines(&b"uciok\nreadyok\npartial"[..], tx);

        let lines: Vec<String> = rx.iter().collect();
        assert_eq!(lines, vec!["uciok", "readyok", "partial"]);
    }
}
