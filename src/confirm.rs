//! Confirmation gate between planning and applying.

use std::io::{self, BufRead};

/// The only answer that allows a plan to be applied.
pub const CONFIRMATION_WORD: &str = "yes";

/// Decide whether a line typed by the user accepts the plan.
///
/// Only the line terminator is stripped: `"Yes"`, `"y"`, `" yes"` and the
/// empty line are all refusals.
pub fn is_confirmed(answer: &str) -> bool {
    let answer = answer
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(answer);
    answer == CONFIRMATION_WORD
}

/// Read one line of input. Returns `None` at end of input.
pub fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
