use std::collections::VecDeque;

/// Lifecycle of one engine subprocess.
///
/// `Terminated` is absorbing: nothing leaves it, and `quit()` on a terminated
/// session is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Starting,
    AwaitingHandshakeAck,
    ConfiguringOptions,
    AwaitingReadyAck,
    Ready,
    Busy,
    Terminated,
}

impl SessionState {
    pub fn is_ready(self) -> bool {
        self == SessionState::Ready
    }

    pub fn is_terminated(self) -> bool {
        self == SessionState::Terminated
    }
}

const RECENT_LINES: usize = 10;

/// The last few non-empty lines of an exchange, dumped to the log when it goes wrong.
#[derive(Debug, Default)]
pub(crate) struct RecentLines {
    lines: VecDeque<String>,
}

impl RecentLines {
    pub fn push(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if self.lines.len() == RECENT_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
