//! Input-line editor.
//!
//! The buffer always starts with the prompt prefix. The cursor never moves
//! into the prefix and the buffer never shrinks below it.

use tinysh_types::input::EditEvent;

/// Result of applying one edit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The line is still being edited.
    Editing,
    /// Enter was pressed.
    Submitted {
        /// The full line, prompt included, as it should be echoed.
        line: String,
        /// The text after the prompt.
        command: String,
    },
}

/// Line buffer with cursor and command history.
#[derive(Debug, Clone)]
pub struct LineEditor {
    buffer: Vec<char>,
    prompt: String,
    prompt_len: usize,
    cursor: usize,
    history: Vec<String>,
    /// Offset from the newest history entry; 0 is the fresh prompt.
    history_pos: usize,
    history_limit: usize,
}

impl LineEditor {
    /// Create an editor showing `prompt`. `history_limit` of 0 keeps every
    /// entry.
    pub fn new(prompt: &str, history_limit: usize) -> Self {
        let mut editor = Self {
            buffer: Vec::new(),
            prompt: String::new(),
            prompt_len: 0,
            cursor: 0,
            history: Vec::new(),
            history_pos: 0,
            history_limit,
        };
        editor.reset(prompt);
        editor
    }

    /// Apply one edit event.
    pub fn apply(&mut self, event: EditEvent) -> EditOutcome {
        match event {
            EditEvent::Insert(ch) => {
                self.buffer.insert(self.cursor, ch);
                self.cursor += 1;
            },
            EditEvent::Backspace => {
                self.cursor = self.cursor.saturating_sub(1).max(self.prompt_len);
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
            },
            EditEvent::Submit => {
                return EditOutcome::Submitted {
                    line: self.text(),
                    command: self.command(),
                };
            },
            EditEvent::HistoryPrev => {
                self.history_pos = (self.history_pos + 1).min(self.history.len());
                self.show_history_entry();
            },
            EditEvent::HistoryNext => {
                self.history_pos = self.history_pos.saturating_sub(1);
                self.show_history_entry();
            },
            EditEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1).max(self.prompt_len);
            },
            EditEvent::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.buffer.len());
            },
            EditEvent::LineStart => self.cursor = self.prompt_len,
            EditEvent::LineEnd => self.cursor = self.buffer.len(),
        }
        EditOutcome::Editing
    }

    /// Start a fresh line with a (possibly new) prompt.
    pub fn reset(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.prompt_len = prompt.chars().count();
        self.buffer = prompt.chars().collect();
        self.cursor = self.prompt_len;
        self.history_pos = 0;
    }

    /// Append a submitted command to the history, dropping the oldest
    /// entries past the limit. Empty commands are ignored.
    pub fn push_history(&mut self, command: &str) {
        if command.is_empty() {
            return;
        }
        self.history.push(command.to_string());
        if self.history_limit > 0 && self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(..excess);
        }
    }

    /// The whole buffer, prompt included.
    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// The text after the prompt.
    pub fn command(&self) -> String {
        self.buffer[self.prompt_len..].iter().collect()
    }

    /// Cursor position in characters, counted from the start of the prompt.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Submitted commands, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_position(&self) -> usize {
        self.history_pos
    }

    fn show_history_entry(&mut self) {
        self.buffer.truncate(self.prompt_len);
        if self.history_pos > 0 {
            let entry = &self.history[self.history.len() - self.history_pos];
            self.buffer.extend(entry.chars());
        }
        self.cursor = self.buffer.len();
    }
}
