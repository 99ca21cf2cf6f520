//! Literal value rendering.
//!
//! Statement text inlines values as literals rather than binding parameters,
//! so every value that can appear in a statement is one of a closed set of
//! [`SqlValue`] variants, each with a fixed literalization.

use std::fmt;

/// A value rendered into statement text as a literal.
///
/// # Example
/// ```
/// use pgforge::SqlValue;
///
/// assert_eq!(SqlValue::from("o'brien").to_string(), "'o''brien'");
/// assert_eq!(SqlValue::from(42i64).to_string(), "42");
/// assert_eq!(SqlValue::from(true).to_string(), "TRUE");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Text, single-quoted with embedded quotes doubled.
    Text(String),
    /// Integer, bare decimal.
    Int(i64),
    /// Boolean, bare `TRUE` / `FALSE`.
    Bool(bool),
    /// Anything else in its default text form, emitted verbatim.
    Raw(String),
    /// A parenthesized value list, as the right-hand side of `IN`.
    List(Vec<SqlValue>),
    /// A `lo AND hi` pair, as the right-hand side of `BETWEEN`.
    Range(Box<SqlValue>, Box<SqlValue>),
}

impl SqlValue {
    /// Create a range value for `BETWEEN`.
    pub fn range(lo: impl Into<SqlValue>, hi: impl Into<SqlValue>) -> Self {
        SqlValue::Range(Box::new(lo.into()), Box::new(hi.into()))
    }

    /// Create a list value for `IN`.
    pub fn list<T: Into<SqlValue>>(values: impl IntoIterator<Item = T>) -> Self {
        SqlValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Create a raw value emitted verbatim (e.g. `NOW()`).
    pub fn raw(text: impl Into<String>) -> Self {
        SqlValue::Raw(text.into())
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(s) => {
                f.write_str("'")?;
                for ch in s.chars() {
                    if ch == '\'' {
                        f.write_str("''")?;
                    } else {
                        write!(f, "{ch}")?;
                    }
                }
                f.write_str("'")
            }
            SqlValue::Int(n) => write!(f, "{n}"),
            SqlValue::Bool(true) => f.write_str("TRUE"),
            SqlValue::Bool(false) => f.write_str("FALSE"),
            SqlValue::Raw(s) => f.write_str(s),
            SqlValue::List(values) => {
                f.write_str("(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str(")")
            }
            SqlValue::Range(lo, hi) => write!(f, "{lo} AND {hi}"),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

impl From<i16> for SqlValue {
    fn from(n: i16) -> Self {
        SqlValue::Int(n.into())
    }
}

impl From<i32> for SqlValue {
    fn from(n: i32) -> Self {
        SqlValue::Int(n.into())
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Int(n)
    }
}

impl From<u32> for SqlValue {
    fn from(n: u32) -> Self {
        SqlValue::Int(n.into())
    }
}

impl From<f32> for SqlValue {
    fn from(n: f32) -> Self {
        SqlValue::Raw(n.to_string())
    }
}

impl From<f64> for SqlValue {
    fn from(n: f64) -> Self {
        SqlValue::Raw(n.to_string())
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for SqlValue {
    fn from(values: Vec<T>) -> Self {
        SqlValue::list(values)
    }
}
