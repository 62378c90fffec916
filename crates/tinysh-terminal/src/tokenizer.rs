//! Command-line tokenizer.

use tinysh_types::error::{Result, ShellError};

/// Split a command line into argument tokens.
///
/// - Spaces separate tokens; runs of spaces never produce empty tokens.
/// - `'...'` and `"..."` quote a region in which spaces and the other quote
///   character are literal. The quotes themselves are dropped.
/// - Unquoted `>` and `|` end the current token and are emitted as
///   one-character tokens of their own.
/// - An empty line yields a single empty token.
/// - A line ending inside a quote is rejected with `UnterminatedQuote`.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    if line.is_empty() {
        return Ok(vec![String::new()]);
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            } else {
                current.push(ch);
            }
            continue;
        }
        match ch {
            '\'' | '"' => quote = Some(ch),
            ' ' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            },
            '>' | '|' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            },
            _ => current.push(ch),
        }
    }

    if let Some(q) = quote {
        return Err(ShellError::UnterminatedQuote(q));
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}
