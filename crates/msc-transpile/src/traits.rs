//! Traits for source readers and target writers.

use crate::error::LineError;
use crate::ir::Program;

/// A reader parses source notation into the IR.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "msc").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["msc"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Parse source code into the IR, failing on the first bad line.
    fn read(&self, source: &str) -> Result<Program, LineError>;
}

/// A writer emits the IR as source code in a target language.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "python").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "py").
    fn extension(&self) -> &'static str;

    /// Emit the IR as source code.
    fn write(&self, program: &Program) -> String;
}
