//! Reader for MSC, the paren-chained source notation.
//!
//! Every computation is written as chained parenthesized groups:
//!
//! ```text
//! (f)(a, b)        call f with a, b
//! (x)(f)(a)        x = f(x, a)
//! (!f)(xs)         xs = f(xs)
//! (xs)(?f)(a)      f(xs, a), result discarded
//! ```
//!
//! Lines are read one at a time. The statement shape is chosen from the
//! leading keyword, and calls are resolved by [`CallParser`].
//!
//! Only groups at bracket depth zero and inside call arguments are read as
//! notation. Groups inside list, dict or set literals (`[(a)(add)(1)]`) are
//! left as written, and a debug event is logged for them.

use crate::config::TranspileConfig;
use crate::error::{LineError, TranspileError};
use crate::indent::{self, IndentTracker};
use crate::ir::{Bind, BindMode, Call, CallShape, Expr, Guard, Line, Program, Stmt};
use crate::registry::{self, SENTINEL};
use crate::scan::{self, Span};
use crate::traits::Reader;
use crate::{args, range};

/// MSC reader implementing the [`Reader`] trait.
#[derive(Debug, Clone, Default)]
pub struct MscReader {
    config: TranspileConfig,
}

impl Reader for MscReader {
    fn language(&self) -> &'static str {
        "msc"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["msc"]
    }

    fn read(&self, source: &str) -> Result<Program, LineError> {
        self.read_program(source)
    }
}

/// Parse MSC source into IR with the default configuration.
pub fn read_msc(source: &str) -> Result<Program, LineError> {
    MscReader::default().read_program(source)
}

/// One source line with its comment split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine<'a> {
    /// 1-based.
    pub number: usize,
    pub raw: &'a str,
    /// Code without comment or surrounding whitespace.
    pub code: &'a str,
    pub width: usize,
    pub comment: Option<&'a str>,
}

impl<'a> LogicalLine<'a> {
    pub fn new(number: usize, raw: &'a str) -> Self {
        let (code, comment) = scan::strip_comment(raw);
        Self {
            number,
            raw,
            code: code.trim(),
            width: indent::leading_width(raw),
            comment: comment.map(str::trim_end),
        }
    }
}

impl MscReader {
    pub fn new(config: TranspileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranspileConfig {
        &self.config
    }

    /// Read a whole program; the first failing line aborts the run.
    pub fn read_program(&self, source: &str) -> Result<Program, LineError> {
        let parser = CallParser::new(&self.config);
        let mut tracker = IndentTracker::new();
        let mut lines = Vec::new();

        for (index, raw) in source.lines().enumerate() {
            let line = LogicalLine::new(index + 1, raw);
            let comment = line
                .comment
                .filter(|_| self.config.preserve_comments)
                .map(str::to_string);

            if line.code.is_empty() {
                let level = if comment.is_some() { tracker.level() } else { 0 };
                lines.push(Line {
                    level,
                    stmt: Stmt::Blank,
                    comment,
                });
                continue;
            }

            let level = tracker.enter(line.width);
            let stmt = read_stmt(&parser, line.code).map_err(|error| {
                tracing::debug!(line = line.number, %error, "translation aborted");
                LineError {
                    line: line.number,
                    source_text: raw.to_string(),
                    error,
                }
            })?;
            if indent::opens_block(line.code) {
                tracker.open(line.width);
            }

            tracing::debug!(line = line.number, level, stmt = stmt_kind(&stmt), "read line");
            lines.push(Line {
                level,
                stmt,
                comment,
            });
        }

        Ok(Program::new(lines))
    }
}

/// Choose the statement shape of one line of code.
pub fn read_stmt(parser: &CallParser<'_>, code: &str) -> Result<Stmt, TranspileError> {
    if let Some(rest) = keyword(code, "for") {
        if let Some(stmt) = read_for(parser, rest)? {
            return Ok(stmt);
        }
    }

    if keyword(code, "while").is_some() {
        return Ok(Stmt::verbatim(code));
    }

    if let Some(rest) = keyword(code, "if") {
        return read_guard(parser, Guard::If, rest);
    }
    if let Some(rest) = keyword(code, "elif") {
        return read_guard(parser, Guard::Elif, rest);
    }

    if code == "break" || code == "continue" {
        return Ok(Stmt::verbatim(code));
    }

    let expr = parser.parse(code, BindMode::Statement)?;
    if expr.is_translated() {
        return Ok(Stmt::expr(expr));
    }

    if let Some((target, value)) = split_assignment(code) {
        return Ok(Stmt::Assign {
            target: target.to_string(),
            value: parser.parse(value, BindMode::Inline)?,
        });
    }

    Ok(Stmt::verbatim(code))
}

fn read_for(parser: &CallParser<'_>, rest: &str) -> Result<Option<Stmt>, TranspileError> {
    let Some(header) = rest.trim().strip_suffix(indent::BLOCK_MARKER) else {
        return Ok(None);
    };
    let Some(in_at) = scan::find_top_level(header, " in ").next() else {
        return Ok(None);
    };
    let target = header[..in_at].trim();
    let iterable = header[in_at + 4..].trim();
    if !is_target_list(target) || iterable.is_empty() {
        return Ok(None);
    }

    let resolve = |part: &str| parser.parse(part, BindMode::Inline);
    let iterable = match range::desugar(iterable, resolve)? {
        Some(range) => range,
        None => parser.parse(iterable, BindMode::Inline)?,
    };
    Ok(Some(Stmt::For {
        target: target.to_string(),
        iterable,
    }))
}

fn read_guard(parser: &CallParser<'_>, guard: Guard, rest: &str) -> Result<Stmt, TranspileError> {
    let rest = rest.trim();
    let test = rest.strip_suffix(indent::BLOCK_MARKER).unwrap_or(rest).trim();
    Ok(Stmt::Guarded {
        guard,
        test: parser.parse(test, BindMode::Inline)?,
    })
}

/// Text after `word` when `code` starts with it as a whole word.
fn keyword<'a>(code: &'a str, word: &str) -> Option<&'a str> {
    let rest = code.strip_prefix(word)?;
    match rest.chars().next() {
        Some(c) if is_ident_char(c) => None,
        _ => Some(rest),
    }
}

/// Split `target = value` at the first top-level plain `=`.
///
/// Comparisons and augmented assignments are not split.
fn split_assignment(code: &str) -> Option<(&str, &str)> {
    let at = scan::find_top_level(code, "=").next()?;
    let before = code[..at].chars().next_back();
    let after = code[at + 1..].chars().next();
    if after == Some('=') || before.is_some_and(|c| "=!<>:+-*/%&|^@".contains(c)) {
        return None;
    }
    let target = code[..at].trim();
    (!target.is_empty()).then(|| (target, code[at + 1..].trim()))
}

fn is_target_list(target: &str) -> bool {
    !target.is_empty()
        && target.split(',').all(|name| {
            let name = name.trim();
            name.starts_with(|c: char| c.is_alphabetic() || c == '_') && name.chars().all(is_ident_char)
        })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn stmt_kind(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Blank => "blank",
        Stmt::For { .. } => "for",
        Stmt::Guarded { .. } => "guard",
        Stmt::Assign { .. } => "assign",
        Stmt::Expr { .. } => "call",
        Stmt::Verbatim { .. } => "verbatim",
    }
}

/// How a function name prefix changes binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallFlag {
    /// `!f`: bind the result to the first argument.
    ArgTarget,
    /// `?f`: evaluate for effect, bind nothing.
    Discard,
}

/// Split a `!`/`?` prefix off a function name.
pub fn strip_flag(function: &str) -> (Option<CallFlag>, &str) {
    if let Some(name) = function.strip_prefix('!') {
        (Some(CallFlag::ArgTarget), name)
    } else if let Some(name) = function.strip_prefix('?') {
        (Some(CallFlag::Discard), name)
    } else {
        (None, function)
    }
}

fn is_function_name(text: &str) -> bool {
    let (_, name) = strip_flag(text);
    name.starts_with(|c: char| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| is_ident_char(c) || c == '.')
        && !name.ends_with('.')
}

const KEYWORDS: &[&str] = &[
    "and", "elif", "else", "if", "in", "is", "lambda", "not", "or", "return", "while", "yield",
];

/// Whether the block at `start` is the argument list of ordinary call or
/// index syntax, like `print(x)` or `xs[0](y)`.
fn is_attached(text: &str, start: usize) -> bool {
    let before = &text[..start];
    match before.chars().next_back() {
        Some(']' | '}' | '"' | '\'' | '.') => true,
        Some(c) if is_ident_char(c) => {
            let word_start = before
                .char_indices()
                .rev()
                .take_while(|(_, c)| is_ident_char(*c))
                .last()
                .map_or(0, |(index, _)| index);
            !KEYWORDS.contains(&&before[word_start..])
        }
        _ => false,
    }
}

/// Classify the call shape of `text` from its top-level blocks.
///
/// The last run of two or three adjacent blocks whose function block holds a
/// function name decides the shape; anything else is [`CallShape::NotACall`].
pub fn classify<'t>(text: &'t str, spans: &[Span]) -> CallShape<'t> {
    for run in scan::runs(text, spans).into_iter().rev() {
        let run = match run.first() {
            Some(first) if is_attached(text, first.start) => &run[1..],
            _ => run,
        };
        if !(2..=3).contains(&run.len()) {
            continue;
        }

        let function = run[run.len() - 2].inner(text).trim();
        if !is_function_name(function) {
            continue;
        }

        let prefix = &text[..run[0].start];
        let args = run[run.len() - 1].inner(text);
        let suffix = &text[run[run.len() - 1].end..];
        return match run.len() {
            3 => CallShape::Assignment {
                prefix,
                target: run[0].inner(text),
                function,
                args,
                suffix,
            },
            _ => CallShape::Normal {
                prefix,
                function,
                args,
                suffix,
            },
        };
    }
    CallShape::NotACall(text)
}

/// Resolves call shapes into IR expressions.
#[derive(Debug, Clone, Copy)]
pub struct CallParser<'c> {
    config: &'c TranspileConfig,
}

impl<'c> CallParser<'c> {
    pub fn new(config: &'c TranspileConfig) -> Self {
        Self { config }
    }

    /// Resolve every call in `text`.
    ///
    /// Text without a call shape comes back as [`Expr::Raw`], unchanged.
    /// Recursion only descends into strictly smaller pieces (prefix, suffix,
    /// arguments, block interiors), so it always terminates.
    pub fn parse(&self, text: &str, mode: BindMode) -> Result<Expr, TranspileError> {
        let blocks = scan::top_level_blocks(text);
        if let Some(problem) = blocks.problem {
            self.malformed(text, problem)?;
        }

        let shape = classify(text, &blocks.spans);
        tracing::trace!(?shape, "classified");

        match shape {
            CallShape::NotACall(text) => {
                if text.contains(")(") {
                    tracing::debug!(text, "call notation below bracket depth zero left untranslated");
                }
                Ok(Expr::raw(text))
            }
            CallShape::Normal {
                prefix,
                function,
                args,
                suffix,
            } => {
                let mode = nested_mode(prefix, suffix, mode);
                let call = self.call(function, None, args, mode)?;
                self.splice(prefix, call, suffix)
            }
            CallShape::Assignment {
                prefix,
                target,
                function,
                args,
                suffix,
            } => {
                let mode = nested_mode(prefix, suffix, mode);
                let leading = self.leading(target)?;
                let call = self.call(function, leading, args, mode)?;
                self.splice(prefix, call, suffix)
            }
        }
    }

    /// Interpret the first block of an assignment call.
    ///
    /// A name is both the bound variable and the first argument; a call is
    /// piped in as the first argument with nothing bound.
    fn leading<'t>(&self, target: &'t str) -> Result<Option<Leading<'t>>, TranspileError> {
        let text = target.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let expr = self.parse(text, BindMode::Inline)?;
        let bind = is_assignable(&expr);
        Ok(Some(Leading { text, expr, bind }))
    }

    fn splice(&self, prefix: &str, call: Expr, suffix: &str) -> Result<Expr, TranspileError> {
        let mut parts = Vec::with_capacity(3);
        if !prefix.is_empty() {
            parts.push(self.parse(prefix, BindMode::Inline)?);
        }
        parts.push(call);
        if !suffix.is_empty() {
            parts.push(self.parse(suffix, BindMode::Inline)?);
        }
        Ok(Expr::concat(parts))
    }

    fn call(
        &self,
        function: &str,
        leading: Option<Leading<'_>>,
        raw_args: &str,
        mode: BindMode,
    ) -> Result<Expr, TranspileError> {
        let (flag, name) = strip_flag(function);

        let mut texts = Vec::new();
        let mut exprs = Vec::new();
        let mut target = None;
        if let Some(leading) = leading {
            if leading.bind {
                target = Some(leading.expr.clone());
            }
            texts.push(leading.text);
            exprs.push(leading.expr);
        }
        for arg in self.split(raw_args)? {
            texts.push(arg);
            exprs.push(self.parse(arg, BindMode::Inline)?);
        }

        let builtin = registry::builtin(name);
        match builtin {
            Some(builtin) => {
                let signature = &builtin.signature;
                signature.check(name, &texts, &self.config.placeholder)?;
                for position in exprs.len()..signature.params.len() {
                    exprs.push(Expr::raw(signature.default_at(position)));
                    texts.push(signature.default_at(position));
                }
                for (position, text) in texts.iter().enumerate() {
                    if *text == self.config.placeholder {
                        exprs[position] = Expr::raw(signature.default_at(position));
                    }
                }
                tracing::trace!(function = name, args = exprs.len(), "builtin call");
            }
            None => {
                for (position, text) in texts.iter().enumerate() {
                    if *text == self.config.placeholder {
                        exprs[position] = Expr::raw(SENTINEL);
                    }
                }
                tracing::trace!(function = name, "opaque call");
            }
        }

        let target = match flag {
            Some(CallFlag::ArgTarget) => exprs.first().filter(|expr| is_assignable(expr)).cloned(),
            Some(CallFlag::Discard) => None,
            None => target,
        };

        let call = Expr::Call(Call {
            function: name.to_string(),
            builtin,
            args: exprs,
        });
        Ok(match target {
            Some(target) => Expr::Bind(Bind {
                target: Box::new(target),
                value: Box::new(call),
                mode,
            }),
            None => call,
        })
    }

    fn split<'t>(&self, raw: &'t str) -> Result<Vec<&'t str>, TranspileError> {
        let split = args::split_lossy(raw);
        if let Some(problem) = split.problem {
            self.malformed(raw, problem)?;
        }
        Ok(split.args)
    }

    fn malformed(&self, text: &str, problem: String) -> Result<(), TranspileError> {
        if self.config.strict_brackets {
            return Err(TranspileError::malformed(text.trim(), problem));
        }
        tracing::warn!(text, %problem, "unbalanced text passed through");
        Ok(())
    }
}

/// Whether `expr` can stand on the left of `=`: a name, attribute or
/// subscript, never a call or literal.
fn is_assignable(expr: &Expr) -> bool {
    let Expr::Raw { text } = expr else {
        return false;
    };
    let path_end = text
        .find(|c: char| !(is_ident_char(c) || c == '.'))
        .unwrap_or(text.len());
    let (path, rest) = text.split_at(path_end);
    let subscripted = rest.is_empty()
        || (rest.starts_with('[')
            && rest.ends_with(']')
            && scan::top_level_blocks(rest).spans.is_empty());
    path.starts_with(|c: char| c.is_alphabetic() || c == '_')
        && !matches!(path, "True" | "False" | "None")
        && !KEYWORDS.contains(&path)
        && subscripted
}

struct Leading<'t> {
    text: &'t str,
    expr: Expr,
    bind: bool,
}

/// A call with text around it is part of a larger expression and can only
/// bind inline.
fn nested_mode(prefix: &str, suffix: &str, mode: BindMode) -> BindMode {
    if prefix.trim().is_empty() && suffix.trim().is_empty() {
        mode
    } else {
        BindMode::Inline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(text: &str) -> CallShape<'_> {
        classify(text, &scan::top_level_blocks(text).spans)
    }

    fn parse(text: &str, mode: BindMode) -> Expr {
        let config = TranspileConfig::default();
        CallParser::new(&config).parse(text, mode).unwrap()
    }

    #[test]
    fn test_classify_normal_call() {
        assert_eq!(
            shape("(add)(1, 2)"),
            CallShape::Normal {
                prefix: "",
                function: "add",
                args: "1, 2",
                suffix: "",
            }
        );
    }

    #[test]
    fn test_classify_assignment_call() {
        assert_eq!(
            shape("(x)(add)(1)"),
            CallShape::Assignment {
                prefix: "",
                target: "x",
                function: "add",
                args: "1",
                suffix: "",
            }
        );
    }

    #[test]
    fn test_classify_keeps_prefix_and_suffix() {
        assert_eq!(
            shape("x = (len)(txt) + 1"),
            CallShape::Normal {
                prefix: "x = ",
                function: "len",
                args: "txt",
                suffix: " + 1",
            }
        );
    }

    #[test]
    fn test_fewer_than_two_blocks_is_not_a_call() {
        assert_eq!(shape("x = 1"), CallShape::NotACall("x = 1"));
        assert_eq!(shape("(x)"), CallShape::NotACall("(x)"));
        assert_eq!(shape("def f(x):"), CallShape::NotACall("def f(x):"));
    }

    #[test]
    fn test_long_runs_and_non_names_are_not_calls() {
        assert_eq!(shape("(a)(b)(c)(d)"), CallShape::NotACall("(a)(b)(c)(d)"));
        assert_eq!(shape("(a + b)(c)"), CallShape::NotACall("(a + b)(c)"));
    }

    #[test]
    fn test_attached_parens_are_python_calls() {
        assert_eq!(shape("print(x)"), CallShape::NotACall("print(x)"));
        assert!(matches!(
            shape("return (x)(add)(1)"),
            CallShape::Assignment { prefix: "return ", .. }
        ));
        assert!(matches!(
            shape("print(x)(len)(y)"),
            CallShape::Normal { prefix: "print(x)", function: "len", .. }
        ));
    }

    #[test]
    fn test_flags() {
        assert_eq!(strip_flag("!sort"), (Some(CallFlag::ArgTarget), "sort"));
        assert_eq!(strip_flag("?append"), (Some(CallFlag::Discard), "append"));
        assert_eq!(strip_flag("len"), (None, "len"));
        assert!(is_function_name("math.sqrt"));
        assert!(is_function_name("!sort"));
        assert!(!is_function_name("1abc"));
        assert!(!is_function_name("a + b"));
    }

    #[test]
    fn test_calls_inside_literals_are_left_alone() {
        assert_eq!(
            parse("[(a)(add)(1)]", BindMode::Inline),
            Expr::raw("[(a)(add)(1)]")
        );
    }

    #[test]
    fn test_not_a_call_is_unchanged() {
        assert_eq!(parse("while x < 3:", BindMode::Statement), Expr::raw("while x < 3:"));
    }

    #[test]
    fn test_assignment_prepends_bound_variable() {
        let Expr::Bind(bind) = parse("(x)(sub)(1)", BindMode::Statement) else {
            panic!("expected a bind");
        };
        assert_eq!(*bind.target, Expr::raw("x"));
        assert_eq!(bind.mode, BindMode::Statement);
        let Expr::Call(call) = *bind.value else {
            panic!("expected a call");
        };
        assert_eq!(call.function, "sub");
        assert_eq!(call.args, vec![Expr::raw("x"), Expr::raw("1")]);
    }

    #[test]
    fn test_prefix_forces_inline_bind() {
        let Expr::Concat { parts } = parse("y = (x)(sub)(1)", BindMode::Statement) else {
            panic!("expected concat");
        };
        assert_eq!(parts[0], Expr::raw("y = "));
        assert!(matches!(&parts[1], Expr::Bind(bind) if bind.mode == BindMode::Inline));
    }

    #[test]
    fn test_discard_flag_binds_nothing() {
        let expr = parse("(xs)(?append)(4)", BindMode::Statement);
        let Expr::Call(call) = expr else {
            panic!("expected an unbound call");
        };
        assert_eq!(call.args, vec![Expr::raw("xs"), Expr::raw("4")]);
    }

    #[test]
    fn test_arg_target_flag_binds_first_argument() {
        let Expr::Bind(bind) = parse("(!sort)(xs)", BindMode::Statement) else {
            panic!("expected a bind");
        };
        assert_eq!(*bind.target, Expr::raw("xs"));
    }

    #[test]
    fn test_arg_target_flag_skips_unassignable_argument() {
        let expr = parse("(!len)((list)(s))", BindMode::Statement);
        let Expr::Call(call) = expr else {
            panic!("expected an unbound call, got {expr:?}");
        };
        assert_eq!(call.function, "len");

        let Expr::Bind(bind) = parse("(!sort)(rows[0])", BindMode::Statement) else {
            panic!("expected a bind");
        };
        assert_eq!(*bind.target, Expr::raw("rows[0]"));
    }

    #[test]
    fn test_assignable_targets() {
        assert!(is_assignable(&Expr::raw("xs")));
        assert!(is_assignable(&Expr::raw("self.items")));
        assert!(is_assignable(&Expr::raw("grid[i][j]")));
        assert!(!is_assignable(&Expr::raw("5")));
        assert!(!is_assignable(&Expr::raw("'a'")));
        assert!(!is_assignable(&Expr::raw("None")));
        assert!(!is_assignable(&Expr::raw("f(x)")));
        assert!(!is_assignable(&Expr::raw("a + b")));
    }

    #[test]
    fn test_piped_leading_call() {
        let Expr::Call(call) = parse("((sub)(x, 1))(mul)(2)", BindMode::Statement) else {
            panic!("expected an unbound call");
        };
        assert_eq!(call.function, "mul");
        assert!(matches!(&call.args[0], Expr::Call(inner) if inner.function == "sub"));
    }

    #[test]
    fn test_defaults_backfilled() {
        let Expr::Call(call) = parse("(pop)(xs)", BindMode::Statement) else {
            panic!("expected a call");
        };
        assert_eq!(call.args, vec![Expr::raw("xs"), Expr::raw("-1")]);

        let Expr::Call(call) = parse("(get)(d, 'k', ~)", BindMode::Statement) else {
            panic!("expected a call");
        };
        assert_eq!(call.args[2], Expr::raw("None"));
    }

    #[test]
    fn test_placeholder_in_unknown_call_is_sentinel() {
        let Expr::Call(call) = parse("(frob)(~, 1)", BindMode::Statement) else {
            panic!("expected a call");
        };
        assert_eq!(call.args, vec![Expr::raw("None"), Expr::raw("1")]);
        assert!(call.builtin.is_none());
    }

    #[test]
    fn test_arity_and_type_errors() {
        let config = TranspileConfig::default();
        let parser = CallParser::new(&config);
        let err = parser.parse("(sub)(1, 2, 3)", BindMode::Statement).unwrap_err();
        assert!(matches!(err, TranspileError::Arity { .. }));

        let err = parser.parse("(add)('x', 1)", BindMode::Statement).unwrap_err();
        assert!(matches!(err, TranspileError::Type { .. }));
        assert!(parser.parse("(str)('x')", BindMode::Statement).is_ok());
    }

    #[test]
    fn test_malformed_strict_and_lenient() {
        let config = TranspileConfig::default();
        let err = CallParser::new(&config)
            .parse("(len)(xs", BindMode::Statement)
            .unwrap_err();
        assert!(matches!(err, TranspileError::MalformedCall { .. }));

        let lenient = TranspileConfig {
            strict_brackets: false,
            ..TranspileConfig::default()
        };
        let expr = CallParser::new(&lenient)
            .parse("(len)(xs", BindMode::Statement)
            .unwrap();
        assert_eq!(expr, Expr::raw("(len)(xs"));
    }

    #[test]
    fn test_keyword_is_whole_word() {
        assert_eq!(keyword("for i in xs:", "for"), Some(" i in xs:"));
        assert_eq!(keyword("format = 1", "for"), None);
        assert_eq!(keyword("if(x):", "if"), Some("(x):"));
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("x = 5"), Some(("x", "5")));
        assert_eq!(split_assignment("xs[i]=[1, 2]"), Some(("xs[i]", "[1, 2]")));
        assert_eq!(split_assignment("x == 5"), None);
        assert_eq!(split_assignment("x += 1"), None);
        assert_eq!(split_assignment("f(a=1)"), None);
    }

    #[test]
    fn test_read_stmt_shapes() {
        let config = TranspileConfig::default();
        let parser = CallParser::new(&config);
        assert!(matches!(read_stmt(&parser, "for i in 1...5:").unwrap(), Stmt::For { .. }));
        assert!(matches!(read_stmt(&parser, "while x:").unwrap(), Stmt::Verbatim { .. }));
        assert!(matches!(
            read_stmt(&parser, "elif (gt)(x, 1):").unwrap(),
            Stmt::Guarded { guard: Guard::Elif, .. }
        ));
        assert!(matches!(read_stmt(&parser, "break").unwrap(), Stmt::Verbatim { .. }));
        assert!(matches!(read_stmt(&parser, "(print)(x)").unwrap(), Stmt::Expr { .. }));
        assert!(matches!(read_stmt(&parser, "x=5").unwrap(), Stmt::Assign { .. }));
        assert!(matches!(read_stmt(&parser, "else:").unwrap(), Stmt::Verbatim { .. }));
        assert!(matches!(
            read_stmt(&parser, "format = 1").unwrap(),
            Stmt::Assign { .. }
        ));
    }

    #[test]
    fn test_logical_line() {
        let line = LogicalLine::new(3, "    x = 1  # note");
        assert_eq!(line.code, "x = 1");
        assert_eq!(line.width, 4);
        assert_eq!(line.comment, Some("# note"));
        assert_eq!(line.number, 3);
    }
}
