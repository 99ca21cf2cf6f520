//! Example demonstrating pgforge's statement builders + condition trees.
//!
//! Run with:
//!   cargo run --example sql_builder -p pgforge

use pgforge::stmt::{self, OrderDirection, SqlRender};
use pgforge::{ColumnDef, ColumnRef, Condition, ForgeResult, Predicate, TableRef};

fn main() -> ForgeResult<()> {
    // SELECT with a nested condition tree. Nested trees parenthesize
    // themselves; leaves never do.
    let active_adults = Condition::and(
        Condition::or(
            Predicate::eq("status", "active"),
            Predicate::eq("status", "trial"),
        ),
        Predicate::gte("age", 18i64),
    );
    let select = stmt::select(TableRef::new("users").alias("u"))
        .column(ColumnRef::new("id").table("u"))
        .column(ColumnRef::new("email").table("u").alias("contact email"))
        .where_clause(active_adults)
        .order_by("created_at", OrderDirection::Desc)
        .limit(50)
        .build()?;
    println!("{}", select.to_sql());

    // INSERT with inlined literals.
    let insert = stmt::insert_into("users")
        .set("email", "alice@example.com")
        .set("age", 30i64)
        .set("active", true)
        .build()?;
    println!("{}", insert.to_sql());

    // UPDATE and DELETE share the same WHERE model.
    let update = stmt::update("users")
        .set("status", "inactive")
        .where_clause(Predicate::lt("last_seen", "2026-01-01"))
        .build()?;
    println!("{}", update.to_sql());

    let delete = stmt::delete_from("sessions")
        .where_clause(Predicate::eq("expired", true))
        .build()?;
    println!("{}", delete.to_sql());

    // DDL: CREATE / ALTER / DROP.
    let create = stmt::create_table("users")
        .if_not_exists()
        .column(ColumnDef::new("id", "BIGINT").primary_key())
        .column(ColumnDef::new("email", "TEXT").not_null())
        .column(ColumnDef::new("active", "BOOLEAN").not_null().default_value(true))
        .build()?;
    println!("{}", create.to_sql());

    let alter = stmt::alter_table("users")
        .add_column(ColumnDef::new("age", "INTEGER"))
        .drop_column("legacy_flag")
        .build()?;
    println!("{}", alter.to_sql());

    let drop = stmt::drop_table("sessions").if_exists().build()?;
    println!("{}", drop.to_sql());

    // Builders report every violated rule at once.
    let err = stmt::insert_into("users")
        .column("email")
        .values(["a@example.com", "b@example.com"])
        .build()
        .unwrap_err();
    println!("---\n{err}");

    Ok(())
}
