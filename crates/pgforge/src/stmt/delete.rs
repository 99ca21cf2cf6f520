//! DELETE statement and builder.

use crate::cond::Expr;
use crate::error::ForgeResult;
use crate::ident::TableRef;
use crate::stmt::SqlRender;
use crate::stmt::validate::RuleCheck;

/// An immutable DELETE statement: `DELETE FROM t[ WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    table: TableRef,
    where_clause: Option<Expr>,
}

impl DeleteStatement {
    /// Start a builder for the given table.
    pub fn builder(table: impl Into<TableRef>) -> DeleteBuilder {
        DeleteBuilder::new(table)
    }
}

impl SqlRender for DeleteStatement {
    fn to_sql(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table.to_sql());
        if let Some(cond) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&cond.to_sql());
        }
        sql
    }
}

/// Fluent DELETE builder.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    table: TableRef,
    where_clause: Option<Expr>,
}

impl DeleteBuilder {
    pub(crate) fn new(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            where_clause: None,
        }
    }

    /// Set the WHERE clause.
    pub fn where_clause(mut self, cond: impl Into<Expr>) -> Self {
        self.where_clause = Some(cond.into());
        self
    }

    /// Validate and produce the immutable statement.
    pub fn build(self) -> ForgeResult<DeleteStatement> {
        let mut check = RuleCheck::new();
        check.expect(!self.table.name().is_empty(), "the table requires a non-empty name");
        check.finish("DeleteStatement")?;
        Ok(DeleteStatement {
            table: self.table,
            where_clause: self.where_clause,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cond::{Condition, Predicate};
    use crate::stmt::delete_from;

    #[test]
    fn delete_whole_table() {
        let sql = delete_from("sessions").build().unwrap().to_sql();
        assert_eq!(sql, "DELETE FROM sessions");
    }

    #[test]
    fn delete_with_condition_tree() {
        let cond = Condition::and(
            Predicate::eq("status", "expired"),
            Predicate::lt("last_seen", "2026-01-01"),
        );
        let sql = delete_from("sessions")
            .where_clause(cond)
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(
            sql,
            "DELETE FROM sessions WHERE status = 'expired' AND last_seen < '2026-01-01'"
        );
    }

    #[test]
    fn empty_table_name_is_reported() {
        let err = delete_from("").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encountered the following errors trying to build a DeleteStatement:\n\
             the table requires a non-empty name"
        );
    }
}
