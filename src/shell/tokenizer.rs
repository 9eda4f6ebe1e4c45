//! Splits a completed line into an argument vector.

use crate::config::MAX_COMMAND_ARGS;
use heapless::Vec;

/// Arguments of one line, borrowed from the line buffer.
pub type Args<'a> = Vec<&'a str, MAX_COMMAND_ARGS>;

/// Split `line` on ASCII whitespace.
///
/// Runs of whitespace count as one delimiter and leading or trailing
/// whitespace is ignored. At most [`MAX_COMMAND_ARGS`] tokens are returned;
/// any further tokens are dropped.
///
/// ```rust
/// use ushell::shell::tokenize;
///
/// let args = tokenize("  add 3   4 ");
/// assert_eq!(&args[..], &["add", "3", "4"]);
/// ```
pub fn tokenize(line: &str) -> Args<'_> {
    let mut args = Args::new();
    for token in line.split_ascii_whitespace() {
        if args.push(token).is_err() {
            debug!("argument limit reached, dropping the rest of the line");
            break;
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(&tokenize("  add 3   4 ")[..], &["add", "3", "4"]);
        assert_eq!(&tokenize("a\tb")[..], &["a", "b"]);
    }

    #[test]
    fn test_blank_lines() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("     ").is_empty());
    }

    #[test]
    fn test_single_token() {
        assert_eq!(&tokenize("reset")[..], &["reset"]);
    }

    #[test]
    fn test_quotes_are_plain_characters() {
        assert_eq!(&tokenize("say \"a b\"")[..], &["say", "\"a", "b\""]);
    }

    #[test]
    fn test_excess_tokens_dropped() {
        let args = tokenize("c 1 2 3 4 5 6 7 8 9 10 11 12");
        assert_eq!(args.len(), MAX_COMMAND_ARGS);
        assert_eq!(args[0], "c");
        assert_eq!(args[MAX_COMMAND_ARGS - 1], "9");
    }
}
