//! DROP DATABASE / DROP TABLE statements and builder.

use crate::error::ForgeResult;
use crate::stmt::SqlRender;
use crate::stmt::validate::RuleCheck;

/// The kind of object a DROP statement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropObject {
    Database,
    Table,
}

impl DropObject {
    const fn as_str(&self) -> &'static str {
        match self {
            DropObject::Database => "DATABASE",
            DropObject::Table => "TABLE",
        }
    }
}

/// An immutable DROP statement: `DROP <DATABASE|TABLE>[ IF EXISTS] name`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropStatement {
    object: DropObject,
    name: String,
    if_exists: bool,
}

impl SqlRender for DropStatement {
    fn to_sql(&self) -> String {
        format!(
            "DROP {}{} {}",
            self.object.as_str(),
            if self.if_exists { " IF EXISTS" } else { "" },
            self.name
        )
    }
}

/// Fluent DROP builder.
#[derive(Debug, Clone)]
pub struct DropBuilder {
    object: DropObject,
    name: String,
    if_exists: bool,
}

impl DropBuilder {
    pub(crate) fn new(object: DropObject, name: impl Into<String>) -> Self {
        Self {
            object,
            name: name.into(),
            if_exists: false,
        }
    }

    /// Add `IF EXISTS`.
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    /// Validate and produce the immutable statement.
    pub fn build(self) -> ForgeResult<DropStatement> {
        let mut check = RuleCheck::new();
        check.expect(
            !self.name.is_empty(),
            "the dropped object requires a non-empty name",
        );
        check.finish("DropStatement")?;
        Ok(DropStatement {
            object: self.object,
            name: self.name,
            if_exists: self.if_exists,
        })
    }
}
