//! `START...END^STEP` range shorthand.

use crate::error::TranspileError;
use crate::ir::Expr;
use crate::scan;

/// The three textual parts of a range shorthand, defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeParts<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub step: &'a str,
}

/// Whether `text` contains a top-level `...`.
pub fn is_range(text: &str) -> bool {
    scan::find_top_level(text, "...").next().is_some()
}

/// Split a range shorthand into its parts.
///
/// A missing start is `0`, a missing step is `1`.
pub fn split_range(text: &str) -> Option<RangeParts<'_>> {
    let dots = scan::find_top_level(text, "...").next()?;
    let start = text[..dots].trim();
    let rest = &text[dots + 3..];

    let (end, step) = match scan::find_top_level(rest, "^").last() {
        Some(caret) => (rest[..caret].trim(), rest[caret + 1..].trim()),
        None => (rest.trim(), ""),
    };

    Some(RangeParts {
        start: if start.is_empty() { "0" } else { start },
        end,
        step: if step.is_empty() { "1" } else { step },
    })
}

/// Desugar a range shorthand, resolving each part with `resolve`.
///
/// Returns `Ok(None)` when `text` is not a range.
pub fn desugar<F>(text: &str, mut resolve: F) -> Result<Option<Expr>, TranspileError>
where
    F: FnMut(&str) -> Result<Expr, TranspileError>,
{
    let Some(parts) = split_range(text) else {
        return Ok(None);
    };
    if parts.end.is_empty() {
        return Err(TranspileError::malformed(text, "range without an end"));
    }
    Ok(Some(Expr::range(
        resolve(parts.start)?,
        resolve(parts.end)?,
        resolve(parts.step)?,
    )))
}
