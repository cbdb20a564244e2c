//! Common test helper functions.

use nix::pty::{openpty, OpenptyResult};

/// Open a pseudo-terminal pair, or `None` where PTYs are unavailable.
///
/// Minimal containers often lack `/dev/ptmx`; tests that need a real
/// terminal should return early instead of failing there.
#[must_use]
pub fn open_pty() -> Option<OpenptyResult> {
    match openpty(None, None) {
        Ok(pty) => Some(pty),
        Err(err) => {
            eprintln!("skipping: pseudo-terminal unavailable ({err})");
            None
        }
    }
}

/// Split captured output into lines, dropping the `\r\n` terminators.
///
/// # Panics
///
/// Panics if the output is not UTF-8 or the last line is unterminated.
#[must_use]
pub fn output_lines(output: &[u8]) -> Vec<String> {
    let text = std::str::from_utf8(output).expect("output is not UTF-8");
    if text.is_empty() {
        return Vec::new();
    }
    let body = text
        .strip_suffix("\r\n")
        .expect("output does not end with a line terminator");
    body.split("\r\n").map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lines_splits_on_crlf() {
        let lines = output_lines(b"Scancode 1 pressed.\r\nScancode 1 released.\r\n");
        assert_eq!(lines, vec!["Scancode 1 pressed.", "Scancode 1 released."]);
    }

    #[test]
    fn output_lines_handles_empty_output() {
        assert!(output_lines(b"").is_empty());
    }
}
