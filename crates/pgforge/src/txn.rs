//! Transaction units: named, retryable bodies of work.
//!
//! A [`SqlTransaction`] couples a name with a body that runs against one open
//! connection. The engine (see [`crate::engine`]) decides commit, rollback and
//! retry; units only execute statements and report progress through the
//! [`Logger`] contract.

use crate::client::{Connection, ExecuteOutcome};
use crate::error::{ForgeError, ForgeResult};
use crate::log::Logger;
use crate::row::RowSet;
use crate::stmt::{InsertStatement, SelectStatement, SqlRender};
use std::marker::PhantomData;

/// A named unit of work executed against one connection.
pub trait SqlTransaction<C: Connection>: Send + Sync {
    /// The typed result the unit produces.
    type Output: Send;

    /// The unit's name, used in log events and failure reports.
    fn name(&self) -> &str;

    /// Run the body against an open connection.
    fn run(
        &self,
        conn: &mut C,
        logger: &dyn Logger,
    ) -> impl std::future::Future<Output = ForgeResult<Self::Output>> + Send;
}

/// A unit that runs one SELECT and converts the result rows.
///
/// The converter is caller-supplied (`Fn(&RowSet) -> ForgeResult<T>`). Log
/// events use the unit's name, falling back to the raw SQL text when unnamed.
///
/// # Example
/// ```ignore
/// let unit = Query::new("SELECT id FROM users", |rows| {
///     rows.rows().map(|r| r.try_get(0).map(str::to_string)).collect()
/// })
/// .named("load-user-ids");
/// ```
pub struct Query<T, F> {
    name: Option<String>,
    sql: String,
    convert: F,
    marker: PhantomData<fn() -> T>,
}

impl<T, F> Query<T, F>
where
    F: Fn(&RowSet) -> ForgeResult<T> + Send + Sync,
{
    /// Create a query unit from raw SQL and a row converter.
    pub fn new(sql: impl Into<String>, convert: F) -> Self {
        Self {
            name: None,
            sql: sql.into(),
            convert,
            marker: PhantomData,
        }
    }

    /// Create a query unit from a built SELECT statement.
    pub fn from_select(statement: &SelectStatement, convert: F) -> Self {
        Self::new(statement.to_sql(), convert)
    }

    /// Name the unit for log events and failure reports.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<C, T, F> SqlTransaction<C> for Query<T, F>
where
    C: Connection,
    T: Send + Sync,
    F: Fn(&RowSet) -> ForgeResult<T> + Send + Sync,
{
    type Output = T;

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.sql)
    }

    async fn run(&self, conn: &mut C, logger: &dyn Logger) -> ForgeResult<T> {
        let label = <Self as SqlTransaction<C>>::name(self);
        logger.info(&format!("query '{label}' started"));
        match conn.execute(&self.sql).await? {
            ExecuteOutcome::Rows(rows) => {
                let value = (self.convert)(&rows)?;
                logger.info(&format!("query '{label}' finished"));
                Ok(value)
            }
            ExecuteOutcome::Affected(_) => Err(ForgeError::conversion(format!(
                "query '{label}' did not produce a result set"
            ))),
        }
    }
}

/// A unit that runs an ordered sequence of statements.
///
/// Optional per-statement labels drive per-statement start/finish log events;
/// their count must equal the statement count, checked before anything
/// executes. The unit start/finish is logged regardless, and the per-statement
/// affected counts are the unit's result.
pub struct Updates {
    name: String,
    statements: Vec<String>,
    labels: Option<Vec<String>>,
}

impl Updates {
    /// Create a unit from raw SQL statements.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        statements: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            statements: statements.into_iter().map(Into::into).collect(),
            labels: None,
        }
    }

    /// Create an empty unit, to be filled with [`Updates::push`].
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statements: Vec::new(),
            labels: None,
        }
    }

    /// Append a built statement.
    pub fn push(mut self, statement: &impl SqlRender) -> Self {
        self.statements.push(statement.to_sql());
        self
    }

    /// Attach per-statement labels.
    pub fn labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

impl<C: Connection> SqlTransaction<C> for Updates {
    type Output = Vec<u64>;

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, conn: &mut C, logger: &dyn Logger) -> ForgeResult<Vec<u64>> {
        if let Some(labels) = &self.labels {
            if labels.len() != self.statements.len() {
                return Err(ForgeError::argument_mismatch(format!(
                    "{} labels supplied for {} statements",
                    labels.len(),
                    self.statements.len()
                )));
            }
        }

        logger.info(&format!("updates '{}' started", self.name));
        let mut counts = Vec::with_capacity(self.statements.len());
        for (i, sql) in self.statements.iter().enumerate() {
            let label = self.labels.as_ref().map(|labels| labels[i].as_str());
            if let Some(label) = label {
                logger.info(&format!("update '{label}' started"));
            }
            let count = match conn.execute(sql).await? {
                ExecuteOutcome::Affected(n) => n,
                ExecuteOutcome::Rows(rows) => rows.len() as u64,
            };
            counts.push(count);
            if let Some(label) = label {
                logger.info(&format!("update '{label}' finished"));
            }
        }
        logger.info(&format!("updates '{}' finished", self.name));
        Ok(counts)
    }
}

/// A unit that runs one INSERT, then one SELECT expected to produce exactly
/// one row and column, returning that value as the generated id.
pub struct InsertAndGetId {
    name: String,
    insert_sql: String,
    select_sql: String,
    insert_description: Option<String>,
    select_description: Option<String>,
}

impl InsertAndGetId {
    /// Create a unit from raw INSERT and SELECT text.
    pub fn new(
        name: impl Into<String>,
        insert_sql: impl Into<String>,
        select_sql: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            insert_sql: insert_sql.into(),
            select_sql: select_sql.into(),
            insert_description: None,
            select_description: None,
        }
    }

    /// Create a unit from built statements.
    pub fn from_statements(
        name: impl Into<String>,
        insert: &InsertStatement,
        select: &SelectStatement,
    ) -> Self {
        Self::new(name, insert.to_sql(), select.to_sql())
    }

    /// Describe the insert step for log events.
    pub fn describe_insert(mut self, description: impl Into<String>) -> Self {
        self.insert_description = Some(description.into());
        self
    }

    /// Describe the select step for log events.
    pub fn describe_select(mut self, description: impl Into<String>) -> Self {
        self.select_description = Some(description.into());
        self
    }
}

impl<C: Connection> SqlTransaction<C> for InsertAndGetId {
    type Output = i64;

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, conn: &mut C, logger: &dyn Logger) -> ForgeResult<i64> {
        if let Some(description) = &self.insert_description {
            logger.info(&format!("{description} started"));
        }
        conn.execute(&self.insert_sql).await?;
        if let Some(description) = &self.insert_description {
            logger.info(&format!("{description} finished"));
        }

        if let Some(description) = &self.select_description {
            logger.info(&format!("{description} started"));
        }
        let rows = match conn.execute(&self.select_sql).await? {
            ExecuteOutcome::Rows(rows) => rows,
            ExecuteOutcome::Affected(_) => {
                return Err(ForgeError::conversion(format!(
                    "id lookup for '{}' did not produce a result set",
                    self.name
                )));
            }
        };
        let value = rows.single_value()?;
        let id = value.parse::<i64>().map_err(|_| {
            ForgeError::conversion(format!("generated id '{value}' is not an integer"))
        })?;
        if let Some(description) = &self.select_description {
            logger.info(&format!("{description} finished"));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ConnectionProvider;
    use crate::client::testing::ScriptedProvider;
    use crate::log::NoopLogger;
    use crate::log::testing::{LogEntry, RecordingLogger};

    fn row_set(columns: &[&str], rows: &[&[&str]]) -> RowSet {
        RowSet::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| Some(v.to_string())).collect()),
        )
    }

    #[tokio::test]
    async fn query_converts_rows_and_logs_start_finish() {
        let provider = ScriptedProvider::new([Ok(ExecuteOutcome::Rows(row_set(
            &["id"],
            &[&["1"], &["2"]],
        )))]);
        let mut conn = provider.open().await.unwrap();
        let logger = RecordingLogger::new();

        let unit = Query::new("SELECT id FROM users", |rows: &RowSet| {
            rows.rows()
                .map(|r| {
                    r.try_get(0)?
                        .parse::<i64>()
                        .map_err(|e| ForgeError::conversion(e.to_string()))
                })
                .collect::<ForgeResult<Vec<i64>>>()
        })
        .named("load-users");

        let ids = unit.run(&mut conn, &logger).await.unwrap();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(
            logger.entries(),
            vec![
                LogEntry::Info("query 'load-users' started".to_string()),
                LogEntry::Info("query 'load-users' finished".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn unnamed_query_logs_the_sql_text() {
        let provider = ScriptedProvider::new([Ok(ExecuteOutcome::Rows(row_set(&["n"], &[])))]);
        let mut conn = provider.open().await.unwrap();
        let logger = RecordingLogger::new();

        let unit = Query::new("SELECT n FROM t", |rows: &RowSet| Ok(rows.len()));
        unit.run(&mut conn, &logger).await.unwrap();
        assert_eq!(
            logger.entries()[0],
            LogEntry::Info("query 'SELECT n FROM t' started".to_string())
        );
    }

    #[tokio::test]
    async fn query_on_non_row_outcome_is_a_conversion_error() {
        let provider = ScriptedProvider::new([Ok(ExecuteOutcome::Affected(3))]);
        let mut conn = provider.open().await.unwrap();

        let unit = Query::new("SELECT 1", |rows: &RowSet| Ok(rows.len()));
        let err = unit.run(&mut conn, &NoopLogger).await.unwrap_err();
        assert!(matches!(err, ForgeError::Conversion(_)));
    }

    #[tokio::test]
    async fn updates_label_mismatch_fails_before_any_statement() {
        let provider = ScriptedProvider::new([]);
        let log = provider.log();
        let mut conn = provider.open().await.unwrap();

        let unit = Updates::new("cleanup", ["DELETE FROM sessions"])
            .labels(["first", "second"]);
        let err = unit.run(&mut conn, &NoopLogger).await.unwrap_err();
        assert!(matches!(err, ForgeError::ArgumentMismatch(_)));
        assert!(log.lock().unwrap().executed.is_empty());
    }

    #[tokio::test]
    async fn updates_run_in_order_and_return_counts() {
        let provider = ScriptedProvider::new([
            Ok(ExecuteOutcome::Affected(2)),
            Ok(ExecuteOutcome::Affected(5)),
        ]);
        let log = provider.log();
        let mut conn = provider.open().await.unwrap();
        let logger = RecordingLogger::new();

        let unit = Updates::new(
            "cleanup",
            ["DELETE FROM sessions", "DELETE FROM tokens"],
        )
        .labels(["drop-sessions", "drop-tokens"]);
        let counts = unit.run(&mut conn, &logger).await.unwrap();
        assert_eq!(counts, vec![2, 5]);
        assert_eq!(
            log.lock().unwrap().executed,
            vec![
                "DELETE FROM sessions".to_string(),
                "DELETE FROM tokens".to_string(),
            ]
        );
        assert_eq!(
            logger.entries(),
            vec![
                LogEntry::Info("updates 'cleanup' started".to_string()),
                LogEntry::Info("update 'drop-sessions' started".to_string()),
                LogEntry::Info("update 'drop-sessions' finished".to_string()),
                LogEntry::Info("update 'drop-tokens' started".to_string()),
                LogEntry::Info("update 'drop-tokens' finished".to_string()),
                LogEntry::Info("updates 'cleanup' finished".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn unlabeled_updates_log_only_the_unit() {
        let provider = ScriptedProvider::new([Ok(ExecuteOutcome::Affected(1))]);
        let mut conn = provider.open().await.unwrap();
        let logger = RecordingLogger::new();

        let unit = Updates::new("cleanup", ["DELETE FROM sessions"]);
        unit.run(&mut conn, &logger).await.unwrap();
        assert_eq!(logger.info_count(), 2);
    }

    #[tokio::test]
    async fn insert_and_get_id_returns_the_integer() {
        let provider = ScriptedProvider::new([
            Ok(ExecuteOutcome::Affected(1)),
            Ok(ExecuteOutcome::Rows(row_set(&["id"], &[&["42"]]))),
        ]);
        let log = provider.log();
        let mut conn = provider.open().await.unwrap();
        let logger = RecordingLogger::new();

        let unit = InsertAndGetId::new(
            "create-user",
            "INSERT INTO users (name) VALUES ('alice')",
            "SELECT LASTVAL()",
        )
        .describe_insert("insert user")
        .describe_select("fetch user id");

        let id = unit.run(&mut conn, &logger).await.unwrap();
        assert_eq!(id, 42);
        assert_eq!(log.lock().unwrap().executed.len(), 2);
        assert_eq!(
            logger.entries(),
            vec![
                LogEntry::Info("insert user started".to_string()),
                LogEntry::Info("insert user finished".to_string()),
                LogEntry::Info("fetch user id started".to_string()),
                LogEntry::Info("fetch user id finished".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn insert_and_get_id_rejects_multi_row_lookup() {
        let provider = ScriptedProvider::new([
            Ok(ExecuteOutcome::Affected(1)),
            Ok(ExecuteOutcome::Rows(row_set(&["id"], &[&["1"], &["2"]]))),
        ]);
        let mut conn = provider.open().await.unwrap();

        let unit = InsertAndGetId::new("create", "INSERT ...", "SELECT ...");
        let err = unit.run(&mut conn, &NoopLogger).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Conversion error: expected exactly one row but found 2"
        );
    }

    #[tokio::test]
    async fn insert_and_get_id_rejects_non_integer_id() {
        let provider = ScriptedProvider::new([
            Ok(ExecuteOutcome::Affected(1)),
            Ok(ExecuteOutcome::Rows(row_set(&["id"], &[&["oops"]]))),
        ]);
        let mut conn = provider.open().await.unwrap();

        let unit = InsertAndGetId::new("create", "INSERT ...", "SELECT ...");
        let err = unit.run(&mut conn, &NoopLogger).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Conversion error: generated id 'oops' is not an integer"
        );
    }
}
