//! INSERT statement and builder.

use crate::error::ForgeResult;
use crate::ident::TableRef;
use crate::stmt::SqlRender;
use crate::stmt::validate::RuleCheck;
use crate::value::SqlValue;

/// An immutable INSERT statement: `INSERT INTO t (cols) VALUES (literals)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    table: TableRef,
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl InsertStatement {
    /// Start a builder for the given table.
    pub fn builder(table: impl Into<TableRef>) -> InsertBuilder {
        InsertBuilder::new(table)
    }
}

impl SqlRender for InsertStatement {
    fn to_sql(&self) -> String {
        let values: Vec<String> = self.values.iter().map(SqlValue::to_string).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table.to_sql(),
            self.columns.join(", "),
            values.join(", ")
        )
    }
}

/// Fluent INSERT builder.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: TableRef,
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl InsertBuilder {
    pub(crate) fn new(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Append one target column.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Append several target columns.
    pub fn columns<C: Into<String>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append one value.
    pub fn value(mut self, value: impl Into<SqlValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Append several values.
    pub fn values<V: Into<SqlValue>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append a column/value pair.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.columns.push(column.into());
        self.values.push(value.into());
        self
    }

    /// Validate and produce the immutable statement.
    pub fn build(self) -> ForgeResult<InsertStatement> {
        let mut check = RuleCheck::new();
        check.expect(!self.table.name().is_empty(), "the table requires a non-empty name");
        check.expect(!self.columns.is_empty(), "at least one column is required");
        check.expect(
            self.columns.iter().all(|c| !c.is_empty()),
            "every column requires a non-empty name",
        );
        check.expect(
            self.columns.len() == self.values.len(),
            format!(
                "column count ({}) does not match value count ({})",
                self.columns.len(),
                self.values.len()
            ),
        );
        check.finish("InsertStatement")?;
        Ok(InsertStatement {
            table: self.table,
            columns: self.columns,
            values: self.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::insert_into;

    #[test]
    fn simple_insert() {
        let sql = insert_into("users")
            .set("username", "alice")
            .set("age", 30i64)
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(
            sql,
            "INSERT INTO users (username, age) VALUES ('alice', 30)"
        );
    }

    #[test]
    fn separate_column_and_value_lists() {
        let sql = insert_into("events")
            .columns(["kind", "seen"])
            .value("login")
            .value(true)
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(
            sql,
            "INSERT INTO events (kind, seen) VALUES ('login', TRUE)"
        );
    }

    #[test]
    fn raw_value_is_inlined_verbatim() {
        let sql = insert_into("events")
            .set("created_at", SqlValue::raw("NOW()"))
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(sql, "INSERT INTO events (created_at) VALUES (NOW())");
    }

    #[test]
    fn count_mismatch_is_reported() {
        let err = insert_into("users")
            .column("username")
            .values(["alice", "bob"])
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encountered the following errors trying to build a InsertStatement:\n\
             column count (1) does not match value count (2)"
        );
    }

    #[test]
    fn every_violation_is_listed() {
        let err = insert_into("").value(1i64).build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encountered the following errors trying to build a InsertStatement:\n\
             the table requires a non-empty name\n\
             at least one column is required\n\
             column count (0) does not match value count (1)"
        );
    }
}
