//! Argument splitting.
//!
//! A comma ends an argument only at top level: outside `()`, `[]`, `{}` and
//! outside string literals. Arguments are trimmed and empty ones dropped.

use crate::error::TranspileError;
use crate::scan::{Nesting, Step};

/// Arguments of one call, plus the reason the text was unbalanced, if it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split<'a> {
    pub args: Vec<&'a str>,
    pub problem: Option<String>,
}

/// Split `raw` at top-level commas, best effort on unbalanced input.
///
/// Unbalanced text never fails here; whatever is left open is flushed as the
/// last argument and the imbalance is reported in [`Split::problem`].
pub fn split_lossy(raw: &str) -> Split<'_> {
    let mut nesting = Nesting::new();
    let mut split = Split::default();
    let mut start = 0;

    for (index, c) in raw.char_indices() {
        let was_top = nesting.is_top_level();
        match nesting.step(c) {
            Step::Code if was_top && c == ',' => {
                push_arg(&mut split.args, &raw[start..index]);
                start = index + 1;
            }
            Step::Mismatch if split.problem.is_none() => {
                split.problem = Some(format!("unexpected `{c}` in arguments"));
            }
            _ => {}
        }
    }
    push_arg(&mut split.args, &raw[start..]);

    if split.problem.is_none() {
        split.problem = nesting.imbalance();
    }
    split
}

/// Split `raw` at top-level commas, failing on unbalanced input.
pub fn split_args(raw: &str) -> Result<Vec<&str>, TranspileError> {
    let split = split_lossy(raw);
    match split.problem {
        Some(reason) => Err(TranspileError::malformed(raw, reason)),
        None => Ok(split.args),
    }
}

fn push_arg<'a>(args: &mut Vec<&'a str>, arg: &'a str) {
    let arg = arg.trim();
    if !arg.is_empty() {
        args.push(arg);
    }
}
