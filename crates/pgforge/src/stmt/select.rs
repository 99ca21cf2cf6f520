//! SELECT statement and builder.

use crate::cond::Expr;
use crate::error::ForgeResult;
use crate::ident::{ColumnRef, TableRef};
use crate::stmt::SqlRender;
use crate::stmt::validate::RuleCheck;

/// Sort direction for an ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    const fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// An immutable SELECT statement.
///
/// No explicit return columns renders `*`. FROM tables comma-join in
/// insertion order; absent optional clauses are omitted entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    distinct: bool,
    columns: Vec<ColumnRef>,
    from: Vec<TableRef>,
    where_clause: Option<Expr>,
    order_by: Vec<(ColumnRef, OrderDirection)>,
    limit: Option<u64>,
}

impl SelectStatement {
    /// Start a builder anchored on the first FROM table.
    pub fn builder(table: impl Into<TableRef>) -> SelectBuilder {
        SelectBuilder::new(table)
    }
}

impl SqlRender for SelectStatement {
    fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            let cols: Vec<String> = self.columns.iter().map(ColumnRef::to_sql).collect();
            sql.push_str(&cols.join(", "));
        }
        sql.push_str(" FROM ");
        let tables: Vec<String> = self.from.iter().map(TableRef::to_sql).collect();
        sql.push_str(&tables.join(", "));
        if let Some(cond) = &self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&cond.to_sql());
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            let keys: Vec<String> = self
                .order_by
                .iter()
                .map(|(col, dir)| format!("{} {}", col.to_sql(), dir.as_str()))
                .collect();
            sql.push_str(&keys.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }
        sql
    }
}

/// Fluent SELECT builder.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    distinct: bool,
    columns: Vec<ColumnRef>,
    from: Vec<TableRef>,
    where_clause: Option<Expr>,
    order_by: Vec<(ColumnRef, OrderDirection)>,
    limit: Option<u64>,
}

impl SelectBuilder {
    pub(crate) fn new(table: impl Into<TableRef>) -> Self {
        Self {
            distinct: false,
            columns: Vec::new(),
            from: vec![table.into()],
            where_clause: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Request DISTINCT rows.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Append one return column.
    pub fn column(mut self, column: impl Into<ColumnRef>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Append several return columns.
    pub fn columns<C: Into<ColumnRef>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append another FROM table.
    pub fn from(mut self, table: impl Into<TableRef>) -> Self {
        self.from.push(table.into());
        self
    }

    /// Set the WHERE clause.
    pub fn where_clause(mut self, cond: impl Into<Expr>) -> Self {
        self.where_clause = Some(cond.into());
        self
    }

    /// Append an ORDER BY key.
    pub fn order_by(mut self, column: impl Into<ColumnRef>, direction: OrderDirection) -> Self {
        self.order_by.push((column.into(), direction));
        self
    }

    /// Set the LIMIT.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Validate and produce the immutable statement.
    pub fn build(self) -> ForgeResult<SelectStatement> {
        let mut check = RuleCheck::new();
        check.expect(
            self.from.iter().all(|t| !t.name().is_empty()),
            "every FROM table requires a non-empty name",
        );
        check.expect(
            self.columns.iter().all(|c| !c.name().is_empty()),
            "every return column requires a non-empty name",
        );
        check.expect(
            self.order_by.iter().all(|(c, _)| !c.name().is_empty()),
            "every ORDER BY column requires a non-empty name",
        );
        check.finish("SelectStatement")?;
        Ok(SelectStatement {
            distinct: self.distinct,
            columns: self.columns,
            from: self.from,
            where_clause: self.where_clause,
            order_by: self.order_by,
            limit: self.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cond::{Condition, Predicate};
    use crate::stmt::select;

    #[test]
    fn no_columns_renders_star() {
        let sql = select("users").build().unwrap().to_sql();
        assert_eq!(sql, "SELECT * FROM users");
    }

    #[test]
    fn distinct_and_columns() {
        let sql = select("users")
            .distinct()
            .column("id")
            .column("email")
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(sql, "SELECT DISTINCT id, email FROM users");
    }

    #[test]
    fn multiple_from_tables_join_in_insertion_order() {
        let sql = select(TableRef::new("users").alias("u"))
            .from(TableRef::new("orders").alias("o"))
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(sql, "SELECT * FROM users AS u, orders AS o");
    }

    #[test]
    fn where_clause_with_leaf() {
        let sql = select("users")
            .where_clause(Predicate::eq("status", "active"))
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(sql, "SELECT * FROM users WHERE status = 'active'");
    }

    #[test]
    fn where_clause_with_tree() {
        let cond = Condition::or(
            Condition::and(Predicate::eq("a", 1i64), Predicate::eq("b", 2i64)),
            Predicate::eq("c", 3i64),
        );
        let sql = select("t").where_clause(cond).build().unwrap().to_sql();
        assert_eq!(sql, "SELECT * FROM t WHERE (a = 1 AND b = 2) OR c = 3");
    }

    #[test]
    fn aliased_column_renders_in_select_list() {
        let sql = select("users")
            .column(ColumnRef::new("id").alias("user id"))
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(sql, r#"SELECT id AS "user id" FROM users"#);
    }

    #[test]
    fn order_by_and_limit() {
        let sql = select("users")
            .order_by("created_at", OrderDirection::Desc)
            .order_by("id", OrderDirection::Asc)
            .limit(10)
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM users ORDER BY created_at DESC, id ASC LIMIT 10"
        );
    }

    #[test]
    fn empty_names_aggregate_into_one_report() {
        let err = select("")
            .column("")
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encountered the following errors trying to build a SelectStatement:\n\
             every FROM table requires a non-empty name\n\
             every return column requires a non-empty name"
        );
    }
}
