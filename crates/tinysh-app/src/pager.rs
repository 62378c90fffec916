//! Tracks how much of the shell's output stream has been shown on stdout.

use tinysh_terminal::OutputStream;

/// New output since the last poll.
#[derive(Debug, PartialEq, Eq)]
pub struct Delta<'a> {
    /// The stream was cleared since the last poll.
    pub cleared: bool,
    pub text: &'a str,
}

/// Read position into an [`OutputStream`].
#[derive(Debug, Default)]
pub struct OutputCursor {
    epoch: u64,
    offset: usize,
}

impl OutputCursor {
    pub fn new(out: &OutputStream) -> Self {
        Self {
            epoch: out.epoch(),
            offset: out.read_all().len(),
        }
    }

    /// Everything appended since the previous poll.
    pub fn poll<'a>(&mut self, out: &'a OutputStream) -> Delta<'a> {
        let cleared = out.epoch() != self.epoch;
        if cleared {
            self.epoch = out.epoch();
            self.offset = 0;
        }
        let all = out.read_all();
        let text = all.get(self.offset..).unwrap_or_default();
        self.offset = all.len();
        Delta { cleared, text }
    }
}

/// Drop the first line of `text` (the echoed prompt line the terminal
/// already shows).
pub fn skip_echo(text: &str) -> &str {
    text.split_once('\n').map_or("", |(_, rest)| rest)
}
