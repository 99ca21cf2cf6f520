//! UPDATE statement and builder.

use crate::cond::Expr;
use crate::error::ForgeResult;
use crate::ident::TableRef;
use crate::stmt::SqlRender;
use crate::stmt::validate::RuleCheck;
use crate::value::SqlValue;

/// An immutable UPDATE statement: `UPDATE t SET a = 1[ WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    table: TableRef,
    assignments: Vec<(String, SqlValue)>,
    where_clause: Option<Expr>,
}

impl UpdateStatement {
    /// Start a builder for the given table.
    pub fn builder(table: impl Into<TableRef>) -> UpdateBuilder {
        UpdateBuilder::new(table)
    }
}

impl SqlRender for UpdateStatement {
    fn to_sql(&self) -> String {
        let sets: Vec<String> = self
            .assignments
            .iter()
            .map(|(col, val)| format!("{col} = {val}"))
            .collect();
        let mut sql = format!("UPDATE {} SET {}", self.table.to_sql(), sets.join(", "));
        if let Some(cond) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&cond.to_sql());
        }
        sql
    }
}

/// Fluent UPDATE builder.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: TableRef,
    assignments: Vec<(String, SqlValue)>,
    where_clause: Option<Expr>,
}

impl UpdateBuilder {
    pub(crate) fn new(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            where_clause: None,
        }
    }

    /// Append a `column = value` assignment.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    /// Set the WHERE clause.
    pub fn where_clause(mut self, cond: impl Into<Expr>) -> Self {
        self.where_clause = Some(cond.into());
        self
    }

    /// Validate and produce the immutable statement.
    pub fn build(self) -> ForgeResult<UpdateStatement> {
        let mut check = RuleCheck::new();
        check.expect(!self.table.name().is_empty(), "the table requires a non-empty name");
        check.expect(
            !self.assignments.is_empty(),
            "at least one SET assignment is required",
        );
        check.expect(
            self.assignments.iter().all(|(c, _)| !c.is_empty()),
            "every SET column requires a non-empty name",
        );
        check.finish("UpdateStatement")?;
        Ok(UpdateStatement {
            table: self.table,
            assignments: self.assignments,
            where_clause: self.where_clause,
        })
    }
}
