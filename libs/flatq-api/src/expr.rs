//! Query-expression interface consumed by header resolution.
//!
//! The parser owns the full AST; these are the reference shapes the result
//! layer needs to bind a field: qualified/unqualified names, positional
//! column numbers, aggregate calls and literals.

use std::fmt;

use crate::value::{Value, format_datetime, format_float};

/// Position of an expression in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Identifier {
    pub literal: String,
    pub pos: Option<SourcePos>,
}

impl Identifier {
    pub fn new(literal: impl Into<String>) -> Self {
        Self { literal: literal.into(), pos: None }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.pos = Some(SourcePos { line, column });
        self
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// `column` or `view.column`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReference {
    pub view: Option<Identifier>,
    pub column: Identifier,
}

impl FieldReference {
    pub fn new(column: impl Into<String>) -> Self {
        Self { view: None, column: Identifier::new(column) }
    }

    pub fn qualified(view: impl Into<String>, column: impl Into<String>) -> Self {
        Self { view: Some(Identifier::new(view)), column: Identifier::new(column) }
    }

    pub fn pos(&self) -> Option<SourcePos> {
        self.view.as_ref().and_then(|v| v.pos).or(self.column.pos)
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.view {
            Some(view) if !view.literal.is_empty() => write!(f, "{}.{}", view, self.column),
            _ => write!(f, "{}", self.column),
        }
    }
}

/// Positional reference `view.N`, 1-based within the originating table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNumber {
    pub view: Identifier,
    pub number: i64,
}

impl ColumnNumber {
    pub fn new(view: impl Into<String>, number: i64) -> Self {
        Self { view: Identifier::new(view), number }
    }
}

impl fmt::Display for ColumnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.view, self.number)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpression {
    FieldReference(FieldReference),
    ColumnNumber(ColumnNumber),
    /// `*` inside a function call, as in `COUNT(*)`.
    AllColumns,
    AggregateFunction {
        name: String,
        distinct: bool,
        args: Vec<QueryExpression>,
    },
    Function {
        name: String,
        args: Vec<QueryExpression>,
    },
    Literal {
        value: Value,
        pos: Option<SourcePos>,
    },
}

impl QueryExpression {
    pub fn integer(i: i64) -> Self {
        QueryExpression::Literal { value: Value::Integer(i), pos: None }
    }

    /// Integer literal as the parser would produce it from source text.
    pub fn integer_from_str(s: &str) -> Option<Self> {
        s.parse::<i64>().ok().map(Self::integer)
    }

    pub fn pos(&self) -> Option<SourcePos> {
        match self {
            QueryExpression::FieldReference(r) => r.pos(),
            QueryExpression::ColumnNumber(n) => n.view.pos,
            QueryExpression::Literal { pos, .. } => *pos,
            QueryExpression::AllColumns
            | QueryExpression::AggregateFunction { .. }
            | QueryExpression::Function { .. } => None,
        }
    }

    /// Text a projected column gets when this expression is selected
    /// without an alias. String literals project their raw content.
    pub fn field_identifier(&self) -> String {
        match self {
            QueryExpression::Literal { value: Value::String(s), .. } => s.clone(),
            other => other.to_string(),
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[QueryExpression]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpression::FieldReference(r) => write!(f, "{r}"),
            QueryExpression::ColumnNumber(n) => write!(f, "{n}"),
            QueryExpression::AllColumns => f.write_str("*"),
            QueryExpression::AggregateFunction { name, distinct, args } => {
                write!(f, "{name}(")?;
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                write_args(f, args)?;
                f.write_str(")")
            }
            QueryExpression::Function { name, args } => {
                write!(f, "{name}(")?;
                write_args(f, args)?;
                f.write_str(")")
            }
            QueryExpression::Literal { value, .. } => match value {
                Value::String(s) => write!(f, "'{s}'"),
                Value::Integer(i) => write!(f, "{i}"),
                Value::Float(v) => f.write_str(&format_float(*v)),
                Value::Boolean(b) => write!(f, "{b}"),
                Value::Ternary(t) => write!(f, "{t}"),
                Value::Datetime(dt) => f.write_str(&format_datetime(dt)),
                Value::Null => f.write_str("NULL"),
            },
        }
    }
}

impl From<FieldReference> for QueryExpression {
    fn from(r: FieldReference) -> Self {
        QueryExpression::FieldReference(r)
    }
}

impl From<ColumnNumber> for QueryExpression {
    fn from(n: ColumnNumber) -> Self {
        QueryExpression::ColumnNumber(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(FieldReference::qualified("t1", "c1").to_string(), "t1.c1");
        assert_eq!(FieldReference::new("c1").to_string(), "c1");
        assert_eq!(ColumnNumber::new("t1", 2).to_string(), "t1.2");

        let count = QueryExpression::AggregateFunction {
            name: "count".to_string(),
            distinct: false,
            args: vec![QueryExpression::AllColumns],
        };
        assert_eq!(count.to_string(), "count(*)");

        let distinct = QueryExpression::AggregateFunction {
            name: "COUNT".to_string(),
            distinct: true,
            args: vec![FieldReference::new("c1").into()],
        };
        assert_eq!(distinct.to_string(), "COUNT(DISTINCT c1)");
    }

    #[test]
    fn string_literal_identifier_is_raw() {
        let lit = QueryExpression::Literal { value: Value::string("abc"), pos: None };
        assert_eq!(lit.to_string(), "'abc'");
        assert_eq!(lit.field_identifier(), "abc");
        assert_eq!(QueryExpression::integer_from_str("12").unwrap().field_identifier(), "12");
    }

    #[test]
    fn reference_position_prefers_view() {
        let r = FieldReference {
            view: Some(Identifier::new("t").at(1, 8)),
            column: Identifier::new("c").at(1, 10),
        };
        assert_eq!(r.pos(), Some(SourcePos { line: 1, column: 8 }));
    }
}
