//! Quote-aware bracket scanning.
//!
//! Everything that needs to know "is this character at top level" goes
//! through [`Nesting`], so the call parser, the argument splitter and the
//! range desugarer agree on what nesting means.

use serde::Serialize;

/// Running bracket and quote state over a piece of text.
#[derive(Debug, Clone, Default)]
pub struct Nesting {
    stack: Vec<char>,
    quote: Option<char>,
    escaped: bool,
}

/// What a single character did to the [`Nesting`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Plain code character.
    Code,
    /// Inside (or delimiting) a string literal.
    Quoted,
    Open,
    Close,
    /// Closing bracket that does not match the innermost opener.
    Mismatch,
}

impl Nesting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state over `c`.
    pub fn step(&mut self, c: char) -> Step {
        if let Some(quote) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == quote {
                self.quote = None;
            }
            return Step::Quoted;
        }

        match c {
            '"' | '\'' => {
                self.quote = Some(c);
                Step::Quoted
            }
            '(' | '[' | '{' => {
                self.stack.push(c);
                Step::Open
            }
            ')' | ']' | '}' => {
                if self.stack.last() == Some(&opener(c)) {
                    self.stack.pop();
                    Step::Close
                } else {
                    Step::Mismatch
                }
            }
            _ => Step::Code,
        }
    }

    /// Total bracket depth, all kinds together.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn in_string(&self) -> bool {
        self.quote.is_some()
    }

    pub fn is_top_level(&self) -> bool {
        self.stack.is_empty() && self.quote.is_none()
    }

    /// Describe why the state is not balanced, if it is not.
    pub fn imbalance(&self) -> Option<String> {
        if let Some(quote) = self.quote {
            return Some(format!("unterminated string starting with `{quote}`"));
        }
        self.stack
            .last()
            .map(|open| format!("unclosed `{open}`"))
    }
}

fn opener(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

/// A top-level balanced `( ... )` block: byte offsets, parens included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Text between the parentheses.
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start + 1..self.end - 1]
    }
}

/// Result of scanning a line for top-level blocks.
#[derive(Debug, Clone, Default)]
pub struct Blocks {
    pub spans: Vec<Span>,
    /// Set when the line is not balanced; `spans` then holds what was
    /// found before the problem.
    pub problem: Option<String>,
}

/// Find all top-level parenthesized blocks of `text`, left to right.
pub fn top_level_blocks(text: &str) -> Blocks {
    let mut nesting = Nesting::new();
    let mut blocks = Blocks::default();
    let mut start = None;

    for (index, c) in text.char_indices() {
        let was_top = nesting.is_top_level();
        match nesting.step(c) {
            Step::Open if was_top && c == '(' => start = Some(index),
            Step::Close if nesting.depth() == 0 => {
                if let Some(start) = start.take() {
                    blocks.spans.push(Span {
                        start,
                        end: index + 1,
                    });
                }
            }
            Step::Mismatch => {
                blocks.problem = Some(format!("unexpected `{c}` at offset {index}"));
                return blocks;
            }
            _ => {}
        }
    }

    blocks.problem = nesting.imbalance();
    blocks
}

/// Group spans into runs separated only by whitespace.
pub fn runs<'s>(text: &str, spans: &'s [Span]) -> Vec<&'s [Span]> {
    let mut runs = Vec::new();
    let mut first = 0;
    for index in 1..=spans.len() {
        let split = index == spans.len()
            || !text[spans[index - 1].end..spans[index].start]
                .chars()
                .all(char::is_whitespace);
        if split {
            runs.push(&spans[first..index]);
            first = index;
        }
    }
    runs
}

/// Byte offset of the quote closing the string literal that starts `text`.
pub fn string_end(text: &str, quote: char) -> Option<usize> {
    let mut chars = text.char_indices();
    if chars.next().map(|(_, c)| c) != Some(quote) {
        return None;
    }
    let mut escaped = false;
    for (index, c) in chars {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some(index);
        }
    }
    None
}

/// Whether the bracket opening `text` is closed by its last character.
pub fn closes_at_end(text: &str) -> bool {
    let mut nesting = Nesting::new();
    for (index, c) in text.char_indices() {
        match nesting.step(c) {
            Step::Mismatch => return false,
            Step::Close if nesting.depth() == 0 => return index + c.len_utf8() == text.len(),
            _ => {}
        }
    }
    false
}

/// Byte offsets of `needle` occurrences outside brackets and strings.
pub fn find_top_level<'a>(text: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut nesting = Nesting::new();
    text.char_indices().filter_map(move |(index, c)| {
        let was_top = nesting.is_top_level();
        nesting.step(c);
        (was_top && text[index..].starts_with(needle)).then_some(index)
    })
}

/// Split a line into code and trailing `#` comment (outside strings).
pub fn strip_comment(line: &str) -> (&str, Option<&str>) {
    let mut nesting = Nesting::new();
    for (index, c) in line.char_indices() {
        if c == '#' && !nesting.in_string() {
            return (&line[..index], Some(&line[index..]));
        }
        nesting.step(c);
    }
    (line, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inners<'a>(text: &'a str) -> Vec<&'a str> {
        top_level_blocks(text)
            .spans
            .iter()
            .map(|span| span.inner(text))
            .collect()
    }

    #[test]
    fn test_top_level_blocks() {
        assert_eq!(inners("(x)(add)(1, 2)"), vec!["x", "add", "1, 2"]);
        assert_eq!(inners("y = (f)((g)(a))"), vec!["f", "(g)(a)"]);
        assert_eq!(inners("no calls here"), Vec::<&str>::new());
    }

    #[test]
    fn test_blocks_ignore_strings_and_other_brackets() {
        assert_eq!(inners("(print)(\")(\")"), vec!["print", "\")(\""]);
        assert_eq!(inners("[(a), (b)]"), Vec::<&str>::new());
        assert_eq!(inners("{'k': (1)}(f)(x)"), vec!["f", "x"]);
    }

    #[test]
    fn test_unbalanced_reports_problem() {
        let blocks = top_level_blocks("(f)(a");
        assert_eq!(blocks.spans.len(), 1);
        assert_eq!(blocks.problem.as_deref(), Some("unclosed `(`"));

        let blocks = top_level_blocks("(f)(a])");
        assert!(blocks.problem.unwrap().starts_with("unexpected `]`"));

        let blocks = top_level_blocks("(print)('oops)");
        assert!(blocks.problem.unwrap().starts_with("unterminated string"));
    }

    #[test]
    fn test_runs() {
        let text = "x = (len)(a) + (len) (b)";
        let blocks = top_level_blocks(text);
        let runs = runs(text, &blocks.spans);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 2);
        assert_eq!(runs[1][0].inner(text), "len");
    }

    #[test]
    fn test_string_end() {
        assert_eq!(string_end("'abc'", '\''), Some(4));
        assert_eq!(string_end("'a\\'b'", '\''), Some(5));
        assert_eq!(string_end("'abc", '\''), None);
    }

    #[test]
    fn test_closes_at_end() {
        assert!(closes_at_end("[1, [2]]"));
        assert!(!closes_at_end("[1][0]"));
        assert!(closes_at_end("{'}': 1}"));
    }

    #[test]
    fn test_find_top_level() {
        let found: Vec<usize> = find_top_level("a^(b^c)^'^'", "^").collect();
        assert_eq!(found, vec![1, 7]);
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("x = 1 # set x"), ("x = 1 ", Some("# set x")));
        assert_eq!(strip_comment("s = '#not'"), ("s = '#not'", None));
    }
}
