//! Boolean condition expressions for WHERE clauses.
//!
//! A [`Predicate`] is a single comparison (`column op literal`, optionally
//! negated). A [`Condition`] joins exactly two operands with `AND`/`OR`; each
//! operand is either a predicate leaf or a nested condition, so arbitrary
//! boolean trees compose out of the two types.
//!
//! Rendering follows one grouping rule on both operands: an operand is
//! parenthesized iff it is itself a nested condition. Leaves contain no
//! conjunctive operator and are never grouped.

use crate::ident::ColumnRef;
use crate::value::SqlValue;
use std::fmt;

/// Comparison operator between a column and a literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlOperator {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `<=`
    LessThanOrEqual,
    /// `BETWEEN`
    Between,
    /// `LIKE`
    Like,
    /// `IN`
    In,
}

impl SqlOperator {
    /// The literal text form of the operator.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SqlOperator::Equal => "=",
            SqlOperator::NotEqual => "!=",
            SqlOperator::GreaterThan => ">",
            SqlOperator::LessThan => "<",
            SqlOperator::GreaterThanOrEqual => ">=",
            SqlOperator::LessThanOrEqual => "<=",
            SqlOperator::Between => "BETWEEN",
            SqlOperator::Like => "LIKE",
            SqlOperator::In => "IN",
        }
    }

    /// Look an operator up by its literal text form, case-insensitively.
    pub fn from_literal(s: &str) -> Option<Self> {
        const ALL: [SqlOperator; 9] = [
            SqlOperator::Equal,
            SqlOperator::NotEqual,
            SqlOperator::GreaterThan,
            SqlOperator::LessThan,
            SqlOperator::GreaterThanOrEqual,
            SqlOperator::LessThanOrEqual,
            SqlOperator::Between,
            SqlOperator::Like,
            SqlOperator::In,
        ];
        ALL.into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for SqlOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunctive operator joining the two operands of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Conjunction {
    /// The literal text form of the conjunction.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }

    /// Look a conjunction up by its literal text form, case-insensitively.
    pub fn from_literal(s: &str) -> Option<Self> {
        [Conjunction::And, Conjunction::Or]
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single comparison: `[NOT ]column op literal`.
///
/// All required parts are constructor arguments, so a predicate is complete by
/// construction.
///
/// # Example
/// ```
/// use pgforge::Predicate;
///
/// assert_eq!(Predicate::eq("status", "active").to_sql(), "status = 'active'");
/// assert_eq!(
///     Predicate::eq("status", "active").negated().to_sql(),
///     "NOT status = 'active'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    negated: bool,
    column: ColumnRef,
    operator: SqlOperator,
    value: SqlValue,
}

impl Predicate {
    /// Create a predicate from column, operator and value.
    pub fn new(
        column: impl Into<ColumnRef>,
        operator: SqlOperator,
        value: impl Into<SqlValue>,
    ) -> Self {
        Self {
            negated: false,
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// Negate the predicate (`NOT` prefix).
    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// `column = value`
    pub fn eq(column: impl Into<ColumnRef>, value: impl Into<SqlValue>) -> Self {
        Self::new(column, SqlOperator::Equal, value)
    }

    /// `column != value`
    pub fn ne(column: impl Into<ColumnRef>, value: impl Into<SqlValue>) -> Self {
        Self::new(column, SqlOperator::NotEqual, value)
    }

    /// `column > value`
    pub fn gt(column: impl Into<ColumnRef>, value: impl Into<SqlValue>) -> Self {
        Self::new(column, SqlOperator::GreaterThan, value)
    }

    /// `column >= value`
    pub fn gte(column: impl Into<ColumnRef>, value: impl Into<SqlValue>) -> Self {
        Self::new(column, SqlOperator::GreaterThanOrEqual, value)
    }

    /// `column < value`
    pub fn lt(column: impl Into<ColumnRef>, value: impl Into<SqlValue>) -> Self {
        Self::new(column, SqlOperator::LessThan, value)
    }

    /// `column <= value`
    pub fn lte(column: impl Into<ColumnRef>, value: impl Into<SqlValue>) -> Self {
        Self::new(column, SqlOperator::LessThanOrEqual, value)
    }

    /// `column LIKE pattern`
    pub fn like(column: impl Into<ColumnRef>, pattern: impl Into<SqlValue>) -> Self {
        Self::new(column, SqlOperator::Like, pattern)
    }

    /// `column BETWEEN lo AND hi`
    pub fn between(
        column: impl Into<ColumnRef>,
        lo: impl Into<SqlValue>,
        hi: impl Into<SqlValue>,
    ) -> Self {
        Self::new(column, SqlOperator::Between, SqlValue::range(lo, hi))
    }

    /// `column IN (values...)`
    pub fn in_list<T: Into<SqlValue>>(
        column: impl Into<ColumnRef>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(column, SqlOperator::In, SqlValue::list(values))
    }

    /// Render the predicate as SQL.
    ///
    /// The column renders qualified but without its alias; aliases belong in
    /// SELECT lists, not comparisons.
    pub fn to_sql(&self) -> String {
        format!(
            "{}{} {} {}",
            if self.negated { "NOT " } else { "" },
            self.column.qualified_name(),
            self.operator,
            self.value
        )
    }
}

/// One operand of a [`Condition`]: a predicate leaf or a nested tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A leaf comparison.
    Predicate(Predicate),
    /// A nested boolean tree.
    Condition(Box<Condition>),
}

impl Expr {
    /// Render the operand, ungrouped.
    pub fn to_sql(&self) -> String {
        match self {
            Expr::Predicate(p) => p.to_sql(),
            Expr::Condition(c) => c.to_sql(),
        }
    }

    /// Render the operand as it appears inside a parent condition:
    /// parenthesized iff it is itself a condition.
    fn to_sql_grouped(&self) -> String {
        match self {
            Expr::Predicate(p) => p.to_sql(),
            Expr::Condition(c) => format!("({})", c.to_sql()),
        }
    }
}

impl From<Predicate> for Expr {
    fn from(p: Predicate) -> Self {
        Expr::Predicate(p)
    }
}

impl From<Condition> for Expr {
    fn from(c: Condition) -> Self {
        Expr::Condition(Box::new(c))
    }
}

/// Two operands joined by a conjunction.
///
/// A condition cannot exist without both operands and the conjunction between
/// them; a lone comparison is a [`Predicate`], not a condition.
///
/// # Example
/// ```
/// use pgforge::{Condition, Predicate};
///
/// let cond = Condition::or(
///     Condition::and(Predicate::eq("a", 1i64), Predicate::eq("b", 2i64)),
///     Predicate::eq("c", 3i64),
/// );
/// assert_eq!(cond.to_sql(), "(a = 1 AND b = 2) OR c = 3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    first: Expr,
    conjunction: Conjunction,
    second: Expr,
}

impl Condition {
    /// Join two operands with `AND`.
    pub fn and(first: impl Into<Expr>, second: impl Into<Expr>) -> Self {
        Self {
            first: first.into(),
            conjunction: Conjunction::And,
            second: second.into(),
        }
    }

    /// Join two operands with `OR`.
    pub fn or(first: impl Into<Expr>, second: impl Into<Expr>) -> Self {
        Self {
            first: first.into(),
            conjunction: Conjunction::Or,
            second: second.into(),
        }
    }

    /// Start a staged condition from its first operand.
    ///
    /// The returned stage only offers `and`/`or`; `build` appears once the
    /// second operand is supplied.
    pub fn builder(first: impl Into<Expr>) -> ConditionBuilder {
        ConditionBuilder {
            first: first.into(),
        }
    }

    /// Render the condition as SQL.
    pub fn to_sql(&self) -> String {
        format!(
            "{} {} {}",
            self.first.to_sql_grouped(),
            self.conjunction,
            self.second.to_sql_grouped()
        )
    }
}

/// First builder stage: holds the first operand, awaits the conjunction.
#[derive(Debug, Clone)]
pub struct ConditionBuilder {
    first: Expr,
}

impl ConditionBuilder {
    /// Supply the second operand joined with `AND`.
    pub fn and(self, second: impl Into<Expr>) -> JoinedCondition {
        JoinedCondition {
            first: self.first,
            conjunction: Conjunction::And,
            second: second.into(),
        }
    }

    /// Supply the second operand joined with `OR`.
    pub fn or(self, second: impl Into<Expr>) -> JoinedCondition {
        JoinedCondition {
            first: self.first,
            conjunction: Conjunction::Or,
            second: second.into(),
        }
    }
}

/// Terminal builder stage: both operands present.
#[derive(Debug, Clone)]
pub struct JoinedCondition {
    first: Expr,
    conjunction: Conjunction,
    second: Expr,
}

impl JoinedCondition {
    /// Produce the immutable condition.
    pub fn build(self) -> Condition {
        Condition {
            first: self.first,
            conjunction: self.conjunction,
            second: self.second,
        }
    }
}
