//! Block level tracking across lines.

/// Columns a tab counts for when measuring leading whitespace.
pub const TAB_WIDTH: usize = 4;

/// Block-opening marker at the end of a line.
pub const BLOCK_MARKER: char = ':';

/// Tracks open blocks for one translation run.
///
/// Each block remembers the source width of the line that opened it; a later
/// line at that width or shallower closes it. The emitted level is the number
/// of blocks still open.
#[derive(Debug, Clone, Default)]
pub struct IndentTracker {
    openers: Vec<usize>,
}

impl IndentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the blocks a line of `width` leaves and return its level.
    pub fn enter(&mut self, width: usize) -> usize {
        while self.openers.last().is_some_and(|&opener| width <= opener) {
            self.openers.pop();
        }
        self.openers.len()
    }

    /// Open a block for lines deeper than `width`.
    pub fn open(&mut self, width: usize) {
        self.openers.push(width);
    }

    pub fn level(&self) -> usize {
        self.openers.len()
    }
}

/// Width of the leading whitespace of `line`.
pub fn leading_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

pub fn opens_block(code: &str) -> bool {
    code.trim_end().ends_with(BLOCK_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_body_is_one_level_deeper() {
        let mut tracker = IndentTracker::new();
        assert_eq!(tracker.enter(0), 0);
        tracker.open(0);
        assert_eq!(tracker.enter(4), 1);
        assert_eq!(tracker.enter(4), 1);
        assert_eq!(tracker.enter(0), 0);
    }

    #[test]
    fn test_any_source_indent_width() {
        let mut tracker = IndentTracker::new();
        tracker.enter(0);
        tracker.open(0);
        assert_eq!(tracker.enter(2), 1);
        tracker.open(2);
        assert_eq!(tracker.enter(3), 2);
        assert_eq!(tracker.enter(2), 1);
        assert_eq!(tracker.enter(0), 0);
    }

    #[test]
    fn test_dedent_closes_several_blocks() {
        let mut tracker = IndentTracker::new();
        tracker.open(0);
        tracker.open(4);
        tracker.open(8);
        assert_eq!(tracker.enter(12), 3);
        assert_eq!(tracker.enter(4), 1);
        assert_eq!(tracker.level(), 1);
    }

    #[test]
    fn test_leading_width() {
        assert_eq!(leading_width("    x"), 4);
        assert_eq!(leading_width("\tx"), TAB_WIDTH);
        assert_eq!(leading_width("x"), 0);
    }

    #[test]
    fn test_opens_block() {
        assert!(opens_block("for i in 1...3:"));
        assert!(opens_block("else:  "));
        assert!(!opens_block("x = 1"));
    }
}
