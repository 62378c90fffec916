//! Error types for tinysh.

use std::io;

/// Errors produced by the shell core.
///
/// The `Display` text of the user-facing variants is exactly the line the
/// shell prints for them, e.g. `not a directory: /home/x.txt`.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid handle: {0}")]
    InvalidHandle(usize),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("unterminated quote: {0}")]
    UnterminatedQuote(char),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ShellError {
    /// Whether this error is an expected outcome of normal use.
    ///
    /// User-facing errors are rendered as a single output line and the shell
    /// returns to the prompt. Everything else is a contract violation that
    /// propagates to the caller.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NotADirectory(_)
                | Self::NotAFile(_)
                | Self::AlreadyExists(_)
                | Self::MissingArgument(_)
                | Self::CommandNotFound(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_directory_display() {
        let e = ShellError::NotADirectory("/home/about".into());
        assert_eq!(format!("{e}"), "not a directory: /home/about");
    }

    #[test]
    fn not_a_file_display() {
        let e = ShellError::NotAFile("/home".into());
        assert_eq!(format!("{e}"), "not a file: /home");
    }

    #[test]
    fn already_exists_display() {
        let e = ShellError::AlreadyExists("/home/friends".into());
        assert_eq!(format!("{e}"), "already exists: /home/friends");
    }

    #[test]
    fn invalid_handle_display() {
        let e = ShellError::InvalidHandle(7);
        assert_eq!(format!("{e}"), "invalid handle: 7");
    }

    #[test]
    fn missing_argument_display() {
        let e = ShellError::MissingArgument("path".into());
        assert_eq!(format!("{e}"), "missing argument: path");
    }

    #[test]
    fn command_not_found_display() {
        let e = ShellError::CommandNotFound("frobnicate".into());
        assert_eq!(format!("{e}"), "command not found: frobnicate");
    }

    #[test]
    fn unterminated_quote_display() {
        let e = ShellError::UnterminatedQuote('\'');
        assert_eq!(format!("{e}"), "unterminated quote: '");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: ShellError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: ShellError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn user_facing_classification() {
        assert!(ShellError::NotADirectory("/x".into()).is_user_facing());
        assert!(ShellError::NotAFile("/x".into()).is_user_facing());
        assert!(ShellError::AlreadyExists("/x".into()).is_user_facing());
        assert!(ShellError::MissingArgument("path".into()).is_user_facing());
        assert!(ShellError::CommandNotFound("x".into()).is_user_facing());
        assert!(!ShellError::InvalidHandle(0).is_user_facing());
        assert!(!ShellError::UnterminatedQuote('"').is_user_facing());
        assert!(!ShellError::Config("bad".into()).is_user_facing());
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(ShellError::InvalidHandle(3));
        assert!(r.is_err());
    }
}
