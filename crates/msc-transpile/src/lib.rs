//! Line-by-line translation of MSC into Python.
//!
//! MSC writes every computation as chained parenthesized groups instead of
//! infix or call syntax: `(x)(add)(1)` is `x = (x + 1)`, `(len)(xs)` is
//! `len(xs)`. On top of that it has a range shorthand (`1...10^2`), a
//! placeholder for "use the default" (`~`), and binding flags on function
//! names (`!f`, `?f`).
//!
//! # Architecture
//!
//! ```text
//! MSC source          IR                    Python
//! ──────────    ───────────────────    ──────────────
//!  line ─────> MscReader ──> Program ──> PythonWriter
//!              │  scan, args,  (ir.rs)    │  registry
//!              │  range, indent           │  templates
//!              └─ registry (checks)       └─ bind forms
//! ```
//!
//! # Example
//!
//! ```
//! let python = msc_transpile::transpile("(x)(add)(1)\nfor i in ...3:\n    (print)(i)").unwrap();
//! assert_eq!(python, "x = (x + 1)\nfor i in range(0, 3, 1):\n    print(i)");
//! ```
//!
//! # Failure
//!
//! Translation is fail-fast: the first arity, type or bracket error aborts
//! the run with a [`LineError`] naming the line. An empty `Ok` string only
//! ever means the input was empty.

pub mod args;
pub mod config;
pub mod error;
pub mod indent;
pub mod ir;
pub mod range;
pub mod registry;
pub mod scan;
pub mod traits;

pub mod input;
pub mod output;

// Re-exports: IR types
pub use ir::{Bind, BindMode, Call, CallShape, Expr, Guard, Line, Program, Stmt};

// Re-exports: Errors and config
pub use config::TranspileConfig;
pub use error::{ConfigError, ErrorKind, LineError, TranspileError};

// Re-exports: Traits
pub use traits::{Reader, Writer};

// Re-exports: Reader and writer
pub use input::msc::{CallParser, MscReader, read_msc};
pub use output::python::{PythonWriter, PythonWriterImpl};

/// Reader and writer sharing one configuration.
///
/// Holds no per-run state; every call to [`Transpiler::transpile`] starts
/// from a fresh indentation tracker.
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    reader: MscReader,
    writer: PythonWriterImpl,
}

impl Transpiler {
    pub fn new(config: TranspileConfig) -> Self {
        let writer = PythonWriterImpl::new(&config);
        Self {
            reader: MscReader::new(config),
            writer,
        }
    }

    pub fn config(&self) -> &TranspileConfig {
        self.reader.config()
    }

    /// Parse MSC source into IR.
    pub fn read(&self, source: &str) -> Result<Program, LineError> {
        self.reader.read(source)
    }

    /// Translate MSC source into Python source.
    pub fn transpile(&self, source: &str) -> Result<String, LineError> {
        let program = self.read(source)?;
        Ok(self.writer.write(&program))
    }
}

/// Translate MSC source into Python with the default configuration.
pub fn transpile(source: &str) -> Result<String, LineError> {
    Transpiler::default().transpile(source)
}
