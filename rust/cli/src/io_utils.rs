//! Line-oriented input for the interactive session.

use std::io::BufRead;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Trims surrounding whitespace and returns `None` on EOF or read errors.
/// An empty string means the user just pressed Enter.
///
/// # Example
///
/// ```rust,no_run
/// use std::io;
/// # use fivedraw_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_trimmed_lines_until_eof() {
        let mut input = Cursor::new("  1 \n\nq\n");
        assert_eq!(read_stdin_line(&mut input).as_deref(), Some("1"));
        assert_eq!(read_stdin_line(&mut input).as_deref(), Some(""));
        assert_eq!(read_stdin_line(&mut input).as_deref(), Some("q"));
        assert_eq!(read_stdin_line(&mut input), None);
    }
}
