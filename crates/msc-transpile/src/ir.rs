//! Intermediate representation between the MSC reader and the Python writer.
//!
//! One [`Line`] per source line, and expressions that are
//! either untouched source text or one of the few constructs the notation
//! adds (builtin calls, bindings, ranges).

use crate::registry::Builtin;
use serde::Serialize;

/// A translated program, one entry per source line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub lines: Vec<Line>,
}

impl Program {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

/// One logical line at a block level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub level: usize,
    pub stmt: Stmt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Line {
    pub fn new(level: usize, stmt: Stmt) -> Self {
        Self {
            level,
            stmt,
            comment: None,
        }
    }

    pub fn blank() -> Self {
        Self::new(0, Stmt::Blank)
    }
}

/// Keyword introducing a guarded block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Guard {
    If,
    Elif,
}

impl Guard {
    pub fn keyword(self) -> &'static str {
        match self {
            Guard::If => "if",
            Guard::Elif => "elif",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    Blank,
    /// `for target in iterable:`
    For { target: String, iterable: Expr },
    /// `if test:` / `elif test:`
    Guarded { guard: Guard, test: Expr },
    /// `target = value` from a plain assignment line.
    Assign { target: String, value: Expr },
    Expr { expr: Expr },
    /// Emitted as written.
    Verbatim { text: String },
}

impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr { expr }
    }

    pub fn verbatim(text: impl Into<String>) -> Self {
        Stmt::Verbatim { text: text.into() }
    }
}

/// How a bound result is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    /// `var = expr`
    Statement,
    /// `var := expr`, usable inside a condition or argument.
    Inline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Source text carried through unchanged.
    Raw { text: String },
    /// Parts written back to back.
    Concat { parts: Vec<Expr> },
    Call(Call),
    Bind(Bind),
    /// `range(start, end, step)`
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
        step: Box<Expr>,
    },
}

impl Expr {
    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw { text: text.into() }
    }

    /// Concatenate parts, dropping empty raw text and flattening one part.
    pub fn concat(parts: Vec<Expr>) -> Self {
        let mut parts: Vec<Expr> = parts
            .into_iter()
            .filter(|part| !matches!(part, Expr::Raw { text } if text.is_empty()))
            .collect();
        match parts.len() {
            0 => Expr::raw(""),
            1 => parts.remove(0),
            _ => Expr::Concat { parts },
        }
    }

    pub fn range(start: Expr, end: Expr, step: Expr) -> Self {
        Expr::Range {
            start: Box::new(start),
            end: Box::new(end),
            step: Box::new(step),
        }
    }

    /// Whether anything in this expression was translated.
    pub fn is_translated(&self) -> bool {
        !matches!(self, Expr::Raw { .. })
    }
}

/// A call to a builtin (rendered from its template) or an unknown function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub function: String,
    #[serde(skip)]
    pub builtin: Option<&'static Builtin>,
    pub args: Vec<Expr>,
}

/// A call result bound to a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bind {
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub mode: BindMode,
}

/// Classification of a call run within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape<'a> {
    /// `prefix (target)(function)(args) suffix`
    Assignment {
        prefix: &'a str,
        target: &'a str,
        function: &'a str,
        args: &'a str,
        suffix: &'a str,
    },
    /// `prefix (function)(args) suffix`
    Normal {
        prefix: &'a str,
        function: &'a str,
        args: &'a str,
        suffix: &'a str,
    },
    NotACall(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_flattens() {
        assert_eq!(Expr::concat(vec![Expr::raw(""), Expr::raw("x")]), Expr::raw("x"));
        assert_eq!(Expr::concat(vec![]), Expr::raw(""));
        assert!(matches!(
            Expr::concat(vec![Expr::raw("a"), Expr::raw("b")]),
            Expr::Concat { .. }
        ));
    }

    #[test]
    fn test_serialize_skips_builtin() {
        let call = Expr::Call(Call {
            function: "len".into(),
            builtin: crate::registry::builtin("len"),
            args: vec![Expr::raw("xs")],
        });
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["kind"], "call");
        assert_eq!(json["function"], "len");
        assert!(json.get("builtin").is_none());
        assert_eq!(json["args"][0]["text"], "xs");
    }
}
