//! Column and table references.
//!
//! [`ColumnRef`] and [`TableRef`] are immutable named references with optional
//! aliases. They render themselves into the exact textual forms the statement
//! builders splice into SQL:
//!
//! - column: `[table.]name[ AS alias]`, alias double-quoted when it contains a
//!   space
//! - table: `name[ AS alias]`

/// A reference to a column, optionally qualified by table and aliased.
///
/// # Example
/// ```
/// use pgforge::ColumnRef;
///
/// let col = ColumnRef::new("id").table("users").alias("user id");
/// assert_eq!(col.to_sql(), r#"users.id AS "user id""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    table: Option<String>,
    name: String,
    alias: Option<String>,
}

impl ColumnRef {
    /// Create a column reference from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Qualify the column with a table name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Attach an output alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The bare column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The qualified name without any alias, as used inside predicates.
    pub(crate) fn qualified_name(&self) -> String {
        match &self.table {
            Some(table) => format!("{}.{}", table, self.name),
            None => self.name.clone(),
        }
    }

    /// Render the reference as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = self.qualified_name();
        if let Some(alias) = &self.alias {
            out.push_str(" AS ");
            if alias.contains(' ') {
                out.push('"');
                out.push_str(alias);
                out.push('"');
            } else {
                out.push_str(alias);
            }
        }
        out
    }
}

impl From<&str> for ColumnRef {
    /// A single `.` splits into `table.column`.
    fn from(s: &str) -> Self {
        match s.split_once('.') {
            Some((table, name)) if !table.is_empty() && !name.is_empty() => {
                ColumnRef::new(name).table(table)
            }
            _ => ColumnRef::new(s),
        }
    }
}

impl From<String> for ColumnRef {
    fn from(s: String) -> Self {
        ColumnRef::from(s.as_str())
    }
}

/// A reference to a table, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    name: String,
    alias: Option<String>,
}

impl TableRef {
    /// Create a table reference from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Attach an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The bare table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the reference as SQL.
    pub fn to_sql(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.name, alias),
            None => self.name.clone(),
        }
    }
}

impl From<&str> for TableRef {
    fn from(s: &str) -> Self {
        TableRef::new(s)
    }
}

impl From<String> for TableRef {
    fn from(s: String) -> Self {
        TableRef::new(s)
    }
}
