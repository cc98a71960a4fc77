//! Python writer for the MSC IR.
//!
//! Emits one Python line per IR line. Builtin calls are filled in from their
//! registry templates; unknown functions are written as ordinary calls.

use crate::config::TranspileConfig;
use crate::ir::*;
use crate::traits::Writer;

/// Python writer implementing the Writer trait.
#[derive(Debug, Clone)]
pub struct PythonWriterImpl {
    indent_unit: String,
}

impl PythonWriterImpl {
    pub fn new(config: &TranspileConfig) -> Self {
        Self {
            indent_unit: config.indent_unit(),
        }
    }
}

impl Default for PythonWriterImpl {
    fn default() -> Self {
        Self::new(&TranspileConfig::default())
    }
}

impl Writer for PythonWriterImpl {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extension(&self) -> &'static str {
        "py"
    }

    fn write(&self, program: &Program) -> String {
        PythonWriter::with_indent(self.indent_unit.clone()).finish(program)
    }
}

/// Emits IR as Python source code.
pub struct PythonWriter {
    output: String,
    indent_unit: String,
}

impl PythonWriter {
    pub fn new() -> Self {
        Self::with_indent("    ".to_string())
    }

    pub fn with_indent(indent_unit: String) -> Self {
        Self {
            output: String::new(),
            indent_unit,
        }
    }

    /// Emit a program to Python source with four-space indentation.
    pub fn emit(program: &Program) -> String {
        Self::new().finish(program)
    }

    /// Render a single expression.
    pub fn expr_to_string(expr: &Expr) -> String {
        let mut writer = Self::new();
        writer.write_expr(expr, false);
        writer.output
    }

    fn finish(mut self, program: &Program) -> String {
        for (index, line) in program.lines.iter().enumerate() {
            if index > 0 {
                self.output.push('\n');
            }
            self.write_line(line);
        }
        self.output
    }

    fn write_line(&mut self, line: &Line) {
        if matches!(line.stmt, Stmt::Blank) && line.comment.is_none() {
            return;
        }
        for _ in 0..line.level {
            self.output.push_str(&self.indent_unit);
        }
        self.write_stmt(&line.stmt);
        if let Some(comment) = &line.comment {
            if !matches!(line.stmt, Stmt::Blank) {
                self.output.push_str("  ");
            }
            self.output.push_str(comment);
        }
    }

    fn write_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Blank => {}

            Stmt::For { target, iterable } => {
                self.output.push_str("for ");
                self.output.push_str(target);
                self.output.push_str(" in ");
                self.write_expr(iterable, true);
                self.output.push(':');
            }

            Stmt::Guarded { guard, test } => {
                self.output.push_str(guard.keyword());
                self.output.push(' ');
                self.write_expr(test, false);
                self.output.push(':');
            }

            Stmt::Assign { target, value } => {
                self.output.push_str(target);
                self.output.push_str(" = ");
                self.write_expr(value, true);
            }

            Stmt::Expr { expr } => self.write_expr(expr, false),

            Stmt::Verbatim { text } => self.output.push_str(text),
        }
    }

    /// `nested` is set when the expression sits inside a larger one, where an
    /// inline bind needs parentheses.
    fn write_expr(&mut self, expr: &Expr, nested: bool) {
        match expr {
            Expr::Raw { text } => self.output.push_str(text),

            Expr::Concat { parts } => {
                for part in parts {
                    self.write_expr(part, true);
                }
            }

            Expr::Call(call) => self.write_call(call),

            Expr::Bind(bind) => {
                let parenthesize = nested && bind.mode == BindMode::Inline;
                if parenthesize {
                    self.output.push('(');
                }
                self.write_expr(&bind.target, true);
                self.output.push_str(match bind.mode {
                    BindMode::Statement => " = ",
                    BindMode::Inline => " := ",
                });
                self.write_expr(&bind.value, true);
                if parenthesize {
                    self.output.push(')');
                }
            }

            Expr::Range { start, end, step } => {
                self.output.push_str("range(");
                self.write_expr(start, true);
                self.output.push_str(", ");
                self.write_expr(end, true);
                self.output.push_str(", ");
                self.write_expr(step, true);
                self.output.push(')');
            }
        }
    }

    fn write_call(&mut self, call: &Call) {
        let args: Vec<String> = call.args.iter().map(|arg| self.render_nested(arg)).collect();
        match call.builtin {
            Some(builtin) => self.output.push_str(&builtin.render(&args)),
            None => {
                self.output.push_str(&call.function);
                self.output.push('(');
                self.output.push_str(&args.join(", "));
                self.output.push(')');
            }
        }
    }

    fn render_nested(&self, expr: &Expr) -> String {
        let mut writer = Self::with_indent(self.indent_unit.clone());
        writer.write_expr(expr, true);
        writer.output
    }
}

impl Default for PythonWriter {
    fn default() -> Self {
        Self::new()
    }
}
