//! Input readers - parse source notation into IR.

pub mod msc;

pub use msc::{CallParser, LogicalLine, MscReader, read_msc};
