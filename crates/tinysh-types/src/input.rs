//! Line-edit events.
//!
//! The presentation layer maps its native keyboard input to these events.
//! The shell core never sees raw key codes.

use serde::{Deserialize, Serialize};

/// A single edit applied to the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditEvent {
    /// Character typed at the cursor.
    Insert(char),
    /// Delete-left.
    Backspace,
    /// Enter: run the current line.
    Submit,
    /// Recall the previous (older) history entry.
    HistoryPrev,
    /// Recall the next (newer) history entry.
    HistoryNext,
    /// Move the cursor one position left.
    CursorLeft,
    /// Move the cursor one position right.
    CursorRight,
    /// Jump to the first editable position (modifier + left).
    LineStart,
    /// Jump to the end of the line (modifier + right).
    LineEnd,
}

impl EditEvent {
    /// Map a key name as reported by common keyboard APIs (`"Enter"`,
    /// `"ArrowUp"`, a single printable character, ...) to an edit event.
    ///
    /// `modifier` selects the jump variants of the horizontal arrows.
    /// Returns `None` for keys the editor ignores (Shift, Control, Meta, ...).
    pub fn from_key(key: &str, modifier: bool) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Submit),
            "Backspace" => Some(Self::Backspace),
            "ArrowUp" => Some(Self::HistoryPrev),
            "ArrowDown" => Some(Self::HistoryNext),
            "ArrowLeft" if modifier => Some(Self::LineStart),
            "ArrowLeft" => Some(Self::CursorLeft),
            "ArrowRight" if modifier => Some(Self::LineEnd),
            "ArrowRight" => Some(Self::CursorRight),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if !ch.is_control() => Some(Self::Insert(ch)),
                    _ => None,
                }
            },
        }
    }
}
