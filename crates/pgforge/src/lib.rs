//! # pgforge
//!
//! Typed SQL statement construction and retrying transaction execution for
//! PostgreSQL.
//!
//! ## Features
//!
//! - **Typed statements**: SELECT/INSERT/UPDATE/DELETE/CREATE/DROP/ALTER as
//!   immutable value objects built through staged builders
//! - **Complete validation**: `build()` reports *every* violated rule in one
//!   aggregated error, never just the first
//! - **Literal rendering**: statements render to exact, deterministic SQL text
//!   (values inlined as literals; no parameter binding)
//! - **Retrying execution**: named transaction units run with a bounded
//!   attempt budget, commit-on-success, rollback-and-retry on recoverable
//!   failures, and structured log events throughout
//!
//! ## Building statements
//!
//! ```
//! use pgforge::stmt::{self, SqlRender};
//! use pgforge::{Condition, Predicate};
//!
//! let sql = stmt::select("users")
//!     .distinct()
//!     .column("id")
//!     .where_clause(Condition::and(
//!         Predicate::eq("status", "active"),
//!         Predicate::gt("age", 18i64),
//!     ))
//!     .build()
//!     .unwrap()
//!     .to_sql();
//! assert_eq!(
//!     sql,
//!     "SELECT DISTINCT id FROM users WHERE status = 'active' AND age > 18"
//! );
//! ```
//!
//! ## Executing transactions
//!
//! ```ignore
//! use pgforge::{Executor, PgConnectionProvider, Updates};
//!
//! let provider = PgConnectionProvider::new("postgres://localhost/app")?;
//! let executor = Executor::new(provider);
//!
//! let counts = executor
//!     .execute_transaction(&Updates::new(
//!         "expire-sessions",
//!         ["DELETE FROM sessions WHERE expired = TRUE"],
//!     ))
//!     .await?;
//! ```

pub mod client;
pub mod cond;
pub mod engine;
pub mod error;
pub mod ident;
pub mod log;
pub mod row;
pub mod stmt;
pub mod txn;
pub mod value;

pub use client::{Connection, ConnectionProvider, ExecuteOutcome, PgConnection, PgConnectionProvider};
pub use cond::{
    Condition, ConditionBuilder, Conjunction, Expr, JoinedCondition, Predicate, SqlOperator,
};
pub use engine::{Executor, MAX_ATTEMPTS};
pub use error::{ForgeError, ForgeResult};
pub use ident::{ColumnRef, TableRef};
pub use log::{Logger, NoopLogger, StderrLogger};
pub use row::{RowData, RowSet};
pub use txn::{InsertAndGetId, Query, SqlTransaction, Updates};
pub use value::SqlValue;

// Re-export stmt entry points for easy access
pub use stmt::{
    AlterStatement, ColumnDef, CreateStatement, DeleteStatement, DropStatement,
    InsertStatement, SelectStatement, SqlRender, UpdateStatement,
};

#[cfg(feature = "tracing")]
pub use log::TracingLogger;
