//! Output writers - emit IR as source code.

pub mod python;

pub use python::{PythonWriter, PythonWriterImpl};
