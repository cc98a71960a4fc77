//! Builtin function registry.
//!
//! A static table mapping builtin names to their [`Signature`] and to the
//! Python template used to emit a call. Unknown names are not an error: they
//! get the [`FALLBACK`] signature and are emitted as opaque calls.
//!
//! Templates use positional holes `{0}`, `{1}`, ... and `{*}` for the whole
//! argument list joined with `", "`.

use crate::error::TranspileError;
use crate::scan;
use serde::Serialize;
use std::fmt;

/// Statically classifiable type of a literal argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Int,
    Float,
    Str,
    Bool,
    List,
    Dict,
    None,
    Type,
    Any,
}

impl TypeTag {
    const ALL: [TypeTag; 8] = [
        TypeTag::Int,
        TypeTag::Float,
        TypeTag::Str,
        TypeTag::Bool,
        TypeTag::List,
        TypeTag::Dict,
        TypeTag::None,
        TypeTag::Type,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Str => "str",
            TypeTag::Bool => "bool",
            TypeTag::List => "list",
            TypeTag::Dict => "dict",
            TypeTag::None => "None",
            TypeTag::Type => "type",
            TypeTag::Any => "any",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A union of [`TypeTag`]s, or `any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSet(u16);

impl TypeSet {
    pub const ANY: TypeSet = TypeSet(TypeTag::Any.bit());
    pub const INT: TypeSet = TypeSet::of(TypeTag::Int);
    pub const FLOAT: TypeSet = TypeSet::of(TypeTag::Float);
    pub const STR: TypeSet = TypeSet::of(TypeTag::Str);
    pub const BOOL: TypeSet = TypeSet::of(TypeTag::Bool);
    pub const LIST: TypeSet = TypeSet::of(TypeTag::List);
    pub const DICT: TypeSet = TypeSet::of(TypeTag::Dict);
    pub const NONE: TypeSet = TypeSet::of(TypeTag::None);
    pub const TYPE: TypeSet = TypeSet::of(TypeTag::Type);
    pub const NUMBER: TypeSet = TypeSet::INT.union(TypeSet::FLOAT);

    pub const fn of(tag: TypeTag) -> Self {
        TypeSet(tag.bit())
    }

    pub const fn union(self, other: TypeSet) -> Self {
        TypeSet(self.0 | other.0)
    }

    pub fn is_any(self) -> bool {
        self.0 & TypeTag::Any.bit() != 0
    }

    /// Whether an argument classified as `tag` may be passed here.
    ///
    /// Unclassifiable arguments (`any`) are always accepted.
    pub fn accepts(self, tag: TypeTag) -> bool {
        self.is_any() || tag == TypeTag::Any || self.0 & tag.bit() != 0
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return f.write_str("any");
        }
        let names: Vec<&str> = TypeTag::ALL
            .iter()
            .filter(|tag| self.0 & tag.bit() != 0)
            .map(|tag| tag.name())
            .collect();
        f.write_str(&names.join("|"))
    }
}

impl Serialize for TypeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One declared parameter of a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub types: TypeSet,
    /// Default expression; a parameter with a default is optional.
    pub default: Option<&'static str>,
}

impl Param {
    pub const fn required(types: TypeSet) -> Self {
        Self {
            types,
            default: None,
        }
    }

    pub const fn optional(types: TypeSet, default: &'static str) -> Self {
        Self {
            types,
            default: Some(default),
        }
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

/// Argument and return types of a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub params: &'static [Param],
    /// Type accepted by any number of extra trailing arguments.
    pub variadic: Option<TypeSet>,
    pub returns: TypeSet,
}

/// Stands in for a missing value when a parameter has no default.
pub const SENTINEL: &str = "None";

/// Signature assumed for names not in the registry.
pub static FALLBACK: Signature = Signature {
    params: &[Param::required(TypeSet::ANY), Param::required(TypeSet::ANY)],
    variadic: None,
    returns: TypeSet::ANY,
};

impl Signature {
    /// Number of non-optional parameters.
    pub fn required(&self) -> usize {
        self.params.iter().filter(|p| !p.is_optional()).count()
    }

    /// Maximum number of arguments, `None` when variadic.
    pub fn maximum(&self) -> Option<usize> {
        match self.variadic {
            Some(_) => None,
            None => Some(self.params.len()),
        }
    }

    fn param_types(&self, position: usize) -> TypeSet {
        match self.params.get(position) {
            Some(param) => param.types,
            None => self.variadic.unwrap_or(TypeSet::ANY),
        }
    }

    /// Default expression for a missing or placeholder argument at `position`.
    pub fn default_at(&self, position: usize) -> &'static str {
        self.params
            .get(position)
            .and_then(|p| p.default)
            .unwrap_or(SENTINEL)
    }

    /// Check argument count and statically classifiable literal types.
    ///
    /// Arguments equal to `placeholder` count towards arity but are not
    /// type-checked.
    pub fn check(&self, name: &str, args: &[&str], placeholder: &str) -> Result<(), TranspileError> {
        let min = self.required();
        let max = self.maximum();
        let got = args.len();
        if got < min || max.is_some_and(|max| got > max) {
            return Err(TranspileError::Arity {
                function: name.to_string(),
                min,
                max,
                got,
            });
        }

        for (position, arg) in args.iter().enumerate() {
            if *arg == placeholder {
                continue;
            }
            let expected = self.param_types(position);
            let found = classify(arg);
            if !expected.accepts(found) {
                return Err(TranspileError::Type {
                    function: name.to_string(),
                    position: position + 1,
                    argument: arg.to_string(),
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// A builtin function: name, signature and Python template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    pub name: &'static str,
    pub signature: Signature,
    pub template: &'static str,
}

impl Builtin {
    /// Fill the template with already-rendered arguments.
    pub fn render(&self, args: &[String]) -> String {
        let mut out = String::with_capacity(self.template.len() + 16);
        let mut rest = self.template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let hole = &after[..close];
            if hole == "*" {
                out.push_str(&args.join(", "));
            } else if let Ok(index) = hole.parse::<usize>() {
                out.push_str(args.get(index).map(String::as_str).unwrap_or(SENTINEL));
            } else {
                out.push_str(&rest[open..open + close + 2]);
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

macro_rules! builtin {
    (@variadic) => { None };
    (@variadic $variadic:expr) => { Some($variadic) };
    ($name:literal, [$($param:expr),* $(,)?] $(, ...$variadic:expr)? => $returns:expr, $template:literal) => {
        Builtin {
            name: $name,
            signature: Signature {
                params: &[$($param),*],
                variadic: builtin!(@variadic $($variadic)?),
                returns: $returns,
            },
            template: $template,
        }
    };
}

use Param as P;
use TypeSet as T;

const LIST_OR_STR: TypeSet = T::LIST.union(T::STR);
const NUMBER_OR_STR: TypeSet = T::NUMBER.union(T::STR);

static BUILTINS: &[Builtin] = &[
    // casts
    builtin!("int", [P::required(NUMBER_OR_STR)] => T::INT, "int({0})"),
    builtin!("float", [P::required(NUMBER_OR_STR)] => T::FLOAT, "float({0})"),
    builtin!("str", [P::required(T::ANY)] => T::STR, "str({0})"),
    builtin!("bool", [P::required(T::ANY)] => T::BOOL, "bool({0})"),
    builtin!("list", [P::required(T::ANY)] => T::LIST, "list({0})"),
    builtin!("dict", [P::required(T::ANY)] => T::DICT, "dict({0})"),
    // arithmetic
    builtin!("add", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::NUMBER, "({0} + {1})"),
    builtin!("sub", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::NUMBER, "({0} - {1})"),
    builtin!("mul", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::NUMBER, "({0} * {1})"),
    builtin!("div", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::FLOAT, "({0} / {1})"),
    builtin!("pow", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::NUMBER, "({0} ** {1})"),
    builtin!("mod", [P::required(T::INT), P::required(T::INT)] => T::INT, "({0} % {1})"),
    builtin!("abs", [P::required(T::NUMBER)] => T::NUMBER, "abs({0})"),
    builtin!("round", [P::required(T::NUMBER), P::optional(T::INT, "None")] => T::NUMBER, "round({0}, {1})"),
    builtin!("max", [P::required(T::LIST.union(T::NUMBER))], ...T::NUMBER => T::NUMBER, "max({*})"),
    builtin!("min", [P::required(T::LIST.union(T::NUMBER))], ...T::NUMBER => T::NUMBER, "min({*})"),
    // strings
    builtin!("split", [P::required(T::STR), P::optional(T::STR, "None")] => T::LIST, "{0}.split({1})"),
    builtin!("join", [P::required(T::LIST), P::optional(T::STR, "\"\"")] => T::STR, "{1}.join({0})"),
    builtin!("strcat", [P::required(T::STR), P::required(T::STR)] => T::STR, "({0} + {1})"),
    builtin!("lower", [P::required(T::STR)] => T::STR, "{0}.lower()"),
    builtin!("upper", [P::required(T::STR)] => T::STR, "{0}.upper()"),
    builtin!("chr", [P::required(T::INT)] => T::STR, "chr({0})"),
    builtin!("ord", [P::required(T::STR)] => T::INT, "ord({0})"),
    // containers
    builtin!("len", [P::required(LIST_OR_STR.union(T::DICT))] => T::INT, "len({0})"),
    builtin!(
        "get",
        [P::required(T::ANY), P::required(T::ANY), P::optional(T::ANY, "None")] => T::ANY,
        "(lambda c, k, d: c[k] if isinstance(c, (list, tuple, str)) and isinstance(k, int) \
         and -len(c) <= k < len(c) else c.get(k, d) if isinstance(c, dict) else d)({0}, {1}, {2})"
    ),
    builtin!("index", [P::required(LIST_OR_STR), P::required(T::ANY)] => T::INT, "{0}.index({1})"),
    builtin!("append", [P::required(T::LIST), P::required(T::ANY)] => T::NONE, "{0}.append({1})"),
    builtin!("remove", [P::required(T::LIST), P::required(T::ANY)] => T::NONE, "{0}.remove({1})"),
    builtin!("pop", [P::required(T::LIST), P::optional(T::INT, "-1")] => T::ANY, "{0}.pop({1})"),
    builtin!("sort", [P::required(LIST_OR_STR)] => T::LIST, "sorted({0})"),
    builtin!("reverse", [P::required(T::LIST)] => T::NONE, "{0}.reverse()"),
    builtin!("insert", [P::required(T::LIST), P::required(T::INT), P::required(T::ANY)] => T::NONE, "{0}.insert({1}, {2})"),
    builtin!("count", [P::required(LIST_OR_STR), P::required(T::ANY)] => T::INT, "{0}.count({1})"),
    builtin!("extend", [P::required(T::LIST), P::required(T::LIST)] => T::NONE, "{0}.extend({1})"),
    // comparisons and logic
    builtin!("eq", [P::required(T::ANY), P::required(T::ANY)] => T::BOOL, "({0} == {1})"),
    builtin!("neq", [P::required(T::ANY), P::required(T::ANY)] => T::BOOL, "({0} != {1})"),
    builtin!("gt", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::BOOL, "({0} > {1})"),
    builtin!("lt", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::BOOL, "({0} < {1})"),
    builtin!("gte", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::BOOL, "({0} >= {1})"),
    builtin!("lte", [P::required(T::NUMBER), P::required(T::NUMBER)] => T::BOOL, "({0} <= {1})"),
    builtin!("and", [P::required(T::BOOL), P::required(T::BOOL)] => T::BOOL, "({0} and {1})"),
    builtin!("or", [P::required(T::BOOL), P::required(T::BOOL)] => T::BOOL, "({0} or {1})"),
    builtin!("not", [P::required(T::BOOL)] => T::BOOL, "(not {0})"),
    builtin!("in", [P::required(T::ANY), P::required(LIST_OR_STR.union(T::DICT))] => T::BOOL, "({0} in {1})"),
    // misc
    builtin!("print", [], ...T::ANY => T::NONE, "print({*})"),
    builtin!("type", [P::required(T::ANY)] => T::TYPE, "type({0})"),
];

/// Look up a builtin by name.
pub fn builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// Signature for `name`, or [`FALLBACK`] for unknown names.
pub fn signature(name: &str) -> &'static Signature {
    builtin(name).map(|b| &b.signature).unwrap_or(&FALLBACK)
}

/// All registered builtins.
pub fn builtins() -> &'static [Builtin] {
    BUILTINS
}

/// Classify a literal argument by its text.
pub fn classify(arg: &str) -> TypeTag {
    let arg = arg.trim();
    match arg {
        "True" | "False" => return TypeTag::Bool,
        "" => return TypeTag::Any,
        _ => {}
    }

    if is_string_literal(arg) {
        return TypeTag::Str;
    }
    if arg.starts_with('[') && scan::closes_at_end(arg) {
        return TypeTag::List;
    }
    if arg.starts_with('{') && scan::closes_at_end(arg) {
        return TypeTag::Dict;
    }

    let digits = arg.strip_prefix(['-', '+']).unwrap_or(arg);
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return TypeTag::Any;
    }
    if digits.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return TypeTag::Int;
    }
    if digits.replace('_', "").parse::<f64>().is_ok() {
        return TypeTag::Float;
    }
    TypeTag::Any
}

fn is_string_literal(arg: &str) -> bool {
    let body = arg.trim_start_matches(['f', 'F', 'r', 'R']);
    if arg.len() - body.len() > 2 {
        return false;
    }
    match body.chars().next() {
        Some(quote @ ('"' | '\'')) => scan::string_end(body, quote) == Some(body.len() - 1),
        _ => false,
    }
}
