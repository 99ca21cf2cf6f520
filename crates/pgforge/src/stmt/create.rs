//! CREATE DATABASE / CREATE TABLE statements and builders.

use crate::error::ForgeResult;
use crate::stmt::SqlRender;
use crate::stmt::validate::RuleCheck;
use crate::value::SqlValue;

/// A column definition inside CREATE TABLE / ALTER TABLE ADD COLUMN.
///
/// Renders `name type[ PRIMARY KEY][ NOT NULL][ DEFAULT literal]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    name: String,
    sql_type: String,
    primary_key: bool,
    not_null: bool,
    default: Option<SqlValue>,
}

impl ColumnDef {
    /// Create a definition from a column name and its SQL type.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            primary_key: false,
            not_null: false,
            default: None,
        }
    }

    /// Mark the column PRIMARY KEY.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Attach a DEFAULT literal.
    pub fn default_value(mut self, value: impl Into<SqlValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn sql_type(&self) -> &str {
        &self.sql_type
    }

    pub(crate) fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_string());
        }
        sql
    }
}

/// An immutable CREATE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateStatement {
    /// `CREATE DATABASE name`
    Database { name: String },
    /// `CREATE TABLE [IF NOT EXISTS ]name (defs)`
    Table {
        name: String,
        if_not_exists: bool,
        columns: Vec<ColumnDef>,
    },
}

impl SqlRender for CreateStatement {
    fn to_sql(&self) -> String {
        match self {
            CreateStatement::Database { name } => format!("CREATE DATABASE {name}"),
            CreateStatement::Table {
                name,
                if_not_exists,
                columns,
            } => {
                let defs: Vec<String> = columns.iter().map(ColumnDef::to_sql).collect();
                format!(
                    "CREATE TABLE {}{} ({})",
                    if *if_not_exists { "IF NOT EXISTS " } else { "" },
                    name,
                    defs.join(", ")
                )
            }
        }
    }
}

/// Builder for `CREATE DATABASE`.
#[derive(Debug, Clone)]
pub struct CreateDatabaseBuilder {
    name: String,
}

impl CreateDatabaseBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Validate and produce the immutable statement.
    pub fn build(self) -> ForgeResult<CreateStatement> {
        let mut check = RuleCheck::new();
        check.expect(!self.name.is_empty(), "the database requires a non-empty name");
        check.finish("CreateStatement")?;
        Ok(CreateStatement::Database { name: self.name })
    }
}

/// Builder for `CREATE TABLE`.
#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    name: String,
    if_not_exists: bool,
    columns: Vec<ColumnDef>,
}

impl CreateTableBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            if_not_exists: false,
            columns: Vec::new(),
        }
    }

    /// Add `IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Append a column definition.
    pub fn column(mut self, def: ColumnDef) -> Self {
        self.columns.push(def);
        self
    }

    /// Validate and produce the immutable statement.
    pub fn build(self) -> ForgeResult<CreateStatement> {
        let mut check = RuleCheck::new();
        check.expect(!self.name.is_empty(), "the table requires a non-empty name");
        check.expect(!self.columns.is_empty(), "at least one column definition is required");
        check.expect(
            self.columns
                .iter()
                .all(|c| !c.name().is_empty() && !c.sql_type().is_empty()),
            "every column definition requires a non-empty name and type",
        );
        check.finish("CreateStatement")?;
        Ok(CreateStatement::Table {
            name: self.name,
            if_not_exists: self.if_not_exists,
            columns: self.columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::{create_database, create_table};

    #[test]
    fn create_database_renders() {
        let sql = create_database("analytics").build().unwrap().to_sql();
        assert_eq!(sql, "CREATE DATABASE analytics");
    }

    #[test]
    fn create_table_with_constraints() {
        let sql = create_table("users")
            .column(ColumnDef::new("id", "BIGINT").primary_key())
            .column(ColumnDef::new("email", "TEXT").not_null())
            .column(ColumnDef::new("active", "BOOLEAN").not_null().default_value(true))
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(
            sql,
            "CREATE TABLE users (id BIGINT PRIMARY KEY, email TEXT NOT NULL, \
             active BOOLEAN NOT NULL DEFAULT TRUE)"
        );
    }

    #[test]
    fn create_table_if_not_exists() {
        let sql = create_table("users")
            .if_not_exists()
            .column(ColumnDef::new("id", "BIGINT"))
            .build()
            .unwrap()
            .to_sql();
        assert_eq!(sql, "CREATE TABLE IF NOT EXISTS users (id BIGINT)");
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = create_table("users").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encountered the following errors trying to build a CreateStatement:\n\
             at least one column definition is required"
        );
    }

    #[test]
    fn empty_database_name_is_reported() {
        let err = create_database("").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encountered the following errors trying to build a CreateStatement:\n\
             the database requires a non-empty name"
        );
    }
}
