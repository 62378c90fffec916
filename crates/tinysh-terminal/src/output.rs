//! Append-only output buffer shared with the presentation layer.

/// Text produced by the shell, polled and rendered by the presentation layer.
///
/// Only [`clear`](Self::clear) ever removes text. Each clear bumps
/// [`epoch`](Self::epoch) so a poller can tell a cleared buffer from one that
/// merely has not grown.
#[derive(Debug, Default, Clone)]
pub struct OutputStream {
    data: String,
    epoch: u64,
}

impl OutputStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text without a line break.
    pub fn write(&mut self, text: &str) {
        self.data.push_str(text);
    }

    /// Append text followed by a line break.
    pub fn write_line(&mut self, text: &str) {
        self.data.push_str(text);
        self.data.push('\n');
    }

    /// Everything written since the last clear.
    pub fn read_all(&self) -> &str {
        &self.data
    }

    /// Completed and partial lines, without the trailing empty line.
    pub fn lines(&self) -> Vec<&str> {
        self.data.lines().collect()
    }

    /// Drop all buffered text.
    pub fn clear(&mut self) {
        self.data.clear();
        self.epoch += 1;
    }

    /// Number of clears so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
