//! Statement model: one immutable value type per statement kind, each with a
//! dedicated staged builder.
//!
//! Builder entry points anchor the field the statement cannot exist without
//! (the table or object name), so that part of validity is settled at the
//! type level. Everything else is fluent, and `build()` runs a full semantic
//! pass that reports *every* violated rule in one aggregated error.
//!
//! # Usage
//!
//! ```
//! use pgforge::stmt::{self, SqlRender};
//! use pgforge::Predicate;
//!
//! let sql = stmt::select("users")
//!     .column("id")
//!     .column("email")
//!     .where_clause(Predicate::eq("status", "active"))
//!     .build()
//!     .unwrap()
//!     .to_sql();
//! assert_eq!(sql, "SELECT id, email FROM users WHERE status = 'active'");
//! ```

mod alter;
mod create;
mod delete;
mod drop;
mod insert;
mod select;
mod update;
mod validate;

pub use alter::{AlterAction, AlterBuilder, AlterStatement};
pub use create::{
    ColumnDef, CreateDatabaseBuilder, CreateStatement, CreateTableBuilder,
};
pub use delete::{DeleteBuilder, DeleteStatement};
pub use drop::{DropBuilder, DropObject, DropStatement};
pub use insert::{InsertBuilder, InsertStatement};
pub use select::{OrderDirection, SelectBuilder, SelectStatement};
pub use update::{UpdateBuilder, UpdateStatement};

use crate::ident::TableRef;

/// Anything that renders to a complete SQL statement.
pub trait SqlRender {
    /// Render the statement as literal SQL text.
    fn to_sql(&self) -> String;
}

/// Create a SELECT builder anchored on its first FROM table.
pub fn select(table: impl Into<TableRef>) -> SelectBuilder {
    SelectBuilder::new(table)
}

/// Create an INSERT builder for the given table.
pub fn insert_into(table: impl Into<TableRef>) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: impl Into<TableRef>) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

/// Create a DELETE builder for the given table.
pub fn delete_from(table: impl Into<TableRef>) -> DeleteBuilder {
    DeleteBuilder::new(table)
}

/// Create a CREATE TABLE builder for the given table name.
pub fn create_table(name: impl Into<String>) -> CreateTableBuilder {
    CreateTableBuilder::new(name)
}

/// Create a CREATE DATABASE builder for the given database name.
pub fn create_database(name: impl Into<String>) -> CreateDatabaseBuilder {
    CreateDatabaseBuilder::new(name)
}

/// Create a DROP TABLE builder for the given table name.
pub fn drop_table(name: impl Into<String>) -> DropBuilder {
    DropBuilder::new(DropObject::Table, name)
}

/// Create a DROP DATABASE builder for the given database name.
pub fn drop_database(name: impl Into<String>) -> DropBuilder {
    DropBuilder::new(DropObject::Database, name)
}

/// Create an ALTER TABLE builder for the given table name.
pub fn alter_table(name: impl Into<String>) -> AlterBuilder {
    AlterBuilder::new(name)
}
