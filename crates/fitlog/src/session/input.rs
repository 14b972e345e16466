//! Line-oriented prompting and validation of typed numbers.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Why a typed number was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The text is not a whole number.
    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    /// The number is zero or negative.
    #[error("Duration and calories must be positive numbers")]
    NotPositive,
}

/// Print `message` and read one line.
///
/// Returns `None` once input is exhausted. The line terminator is removed but
/// other whitespace is kept. Bytes that are not valid UTF-8 are replaced
/// rather than rejected, so the caller decides whether the line is usable.
pub(crate) fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    let mut line = String::from_utf8_lossy(&buf).into_owned();

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Parse a strictly positive integer, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns an [`InputError`] if `text` is not an integer or is not above zero.
pub fn parse_positive(text: &str) -> Result<i64, InputError> {
    let value = text
        .trim()
        .parse::<i64>()
        .map_err(|_| InputError::NotAnInteger(text.to_string()))?;

    if value <= 0 {
        return Err(InputError::NotPositive);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_reads_line() {
        let mut input = "Running\nnext\n".as_bytes();
        let mut output = Vec::new();

        let line = prompt(&mut input, &mut output, "Enter activity type: ").unwrap();

        assert_eq!(line.as_deref(), Some("Running"));
        assert_eq!(String::from_utf8(output).unwrap(), "Enter activity type: ");
    }

    #[test]
    fn test_prompt_strips_crlf_only() {
        let mut input = "  Trail run \r\n".as_bytes();
        let line = prompt(&mut input, &mut Vec::<u8>::new(), "> ").unwrap();
        assert_eq!(line.as_deref(), Some("  Trail run "));
    }

    #[test]
    fn test_prompt_empty_line() {
        let mut input = "\n".as_bytes();
        let line = prompt(&mut input, &mut Vec::<u8>::new(), "> ").unwrap();
        assert_eq!(line.as_deref(), Some(""));
    }

    #[test]
    fn test_prompt_last_line_without_newline() {
        let mut input = "3".as_bytes();
        let line = prompt(&mut input, &mut Vec::<u8>::new(), "> ").unwrap();
        assert_eq!(line.as_deref(), Some("3"));
    }

    #[test]
    fn test_prompt_replaces_invalid_utf8() {
        let mut input: &[u8] = b"Run\xff\n";
        let line = prompt(&mut input, &mut Vec::<u8>::new(), "> ").unwrap();
        assert_eq!(line.as_deref(), Some("Run\u{fffd}"));
    }

    #[test]
    fn test_prompt_end_of_input() {
        let mut input = "".as_bytes();
        let line = prompt(&mut input, &mut Vec::<u8>::new(), "> ").unwrap();
        assert!(line.is_none());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("30"), Ok(30));
        assert_eq!(parse_positive(" 45 "), Ok(45));
        assert_eq!(parse_positive("+7"), Ok(7));
    }

    #[test]
    fn test_parse_positive_rejects_non_positive() {
        assert_eq!(parse_positive("0"), Err(InputError::NotPositive));
        assert_eq!(parse_positive("-5"), Err(InputError::NotPositive));
    }

    #[test]
    fn test_parse_positive_rejects_non_integer() {
        assert_eq!(
            parse_positive("12.5"),
            Err(InputError::NotAnInteger("12.5".to_string()))
        );
        assert_eq!(
            parse_positive(""),
            Err(InputError::NotAnInteger(String::new()))
        );
    }
}
