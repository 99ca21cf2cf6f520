//! ALTER TABLE statement and builder.

use crate::error::ForgeResult;
use crate::stmt::SqlRender;
use crate::stmt::create::ColumnDef;
use crate::stmt::validate::RuleCheck;

/// A single ALTER TABLE action.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterAction {
    /// `ADD COLUMN def`
    AddColumn(ColumnDef),
    /// `DROP COLUMN name`
    DropColumn(String),
    /// `RENAME COLUMN from TO to` (must be the only action)
    RenameColumn { from: String, to: String },
    /// `RENAME TO name` (must be the only action)
    RenameTable(String),
}

impl AlterAction {
    fn is_rename(&self) -> bool {
        matches!(
            self,
            AlterAction::RenameColumn { .. } | AlterAction::RenameTable(_)
        )
    }

    fn to_sql(&self) -> String {
        match self {
            AlterAction::AddColumn(def) => format!("ADD COLUMN {}", def.to_sql()),
            AlterAction::DropColumn(name) => format!("DROP COLUMN {name}"),
            AlterAction::RenameColumn { from, to } => {
                format!("RENAME COLUMN {from} TO {to}")
            }
            AlterAction::RenameTable(name) => format!("RENAME TO {name}"),
        }
    }
}

/// An immutable ALTER TABLE statement.
///
/// ADD/DROP actions comma-join into one statement; RENAME actions stand
/// alone (a PostgreSQL restriction, enforced at build time).
#[derive(Debug, Clone, PartialEq)]
pub struct AlterStatement {
    table: String,
    actions: Vec<AlterAction>,
}

impl SqlRender for AlterStatement {
    fn to_sql(&self) -> String {
        let actions: Vec<String> = self.actions.iter().map(AlterAction::to_sql).collect();
        format!("ALTER TABLE {} {}", self.table, actions.join(", "))
    }
}

/// Fluent ALTER TABLE builder.
#[derive(Debug, Clone)]
pub struct AlterBuilder {
    table: String,
    actions: Vec<AlterAction>,
}

impl AlterBuilder {
    pub(crate) fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            actions: Vec::new(),
        }
    }

    /// Append an `ADD COLUMN` action.
    pub fn add_column(mut self, def: ColumnDef) -> Self {
        self.actions.push(AlterAction::AddColumn(def));
        self
    }

    /// Append a `DROP COLUMN` action.
    pub fn drop_column(mut self, name: impl Into<String>) -> Self {
        self.actions.push(AlterAction::DropColumn(name.into()));
        self
    }

    /// Append a `RENAME COLUMN` action.
    pub fn rename_column(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.actions.push(AlterAction::RenameColumn {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Append a `RENAME TO` action.
    pub fn rename_to(mut self, name: impl Into<String>) -> Self {
        self.actions.push(AlterAction::RenameTable(name.into()));
        self
    }

    /// Validate and produce the immutable statement.
    pub fn build(self) -> ForgeResult<AlterStatement> {
        let mut check = RuleCheck::new();
        check.expect(!self.table.is_empty(), "the table requires a non-empty name");
        check.expect(!self.actions.is_empty(), "at least one action is required");
        check.expect(
            !self.actions.iter().any(AlterAction::is_rename) || self.actions.len() == 1,
            "a rename action cannot be combined with other actions",
        );
        check.expect(
            self.actions.iter().all(|a| match a {
                AlterAction::AddColumn(def) => {
                    !def.name().is_empty() && !def.sql_type().is_empty()
                }
                AlterAction::DropColumn(name) => !name.is_empty(),
                AlterAction::RenameColumn { from, to } => !from.is_empty() && !to.is_empty(),
                AlterAction::RenameTable(name) => !name.is_empty(),
            }),
            "every action requires non-empty names",
        );
        check.finish("AlterStatement")?;
        Ok(AlterStatement {
            table: self.table,
            actions: self.actions,
        })
    }
}
