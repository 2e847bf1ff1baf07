use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;

use crate::config::Config;
use crate::validation::{Amount, Memo};

/// A single recorded outlay.
/// `id` and `created_on` are fixed by the store at insert time and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub amount: Amount,
    pub memo: String,
    pub created_on: NaiveDate,
}

/// Persistence operations the dispatcher needs.
///
/// Any error returned here is a store failure (connection lost, query failed)
/// and is treated as fatal by the caller.
pub trait ExpenseStore {
    /// Insert a new expense and return its assigned id
    fn add(&mut self, amount: Amount, memo: &Memo, created_on: NaiveDate) -> Result<i64>;

    /// All expenses in insertion order (ascending id)
    fn list(&self) -> Result<Vec<Expense>>;

    /// Case-insensitive substring match on memo, ascending id
    fn search(&self, query: &str) -> Result<Vec<Expense>>;

    fn find(&self, id: i64) -> Result<Option<Expense>>;

    /// Remove one expense. Returns false when the id was not present.
    fn delete(&mut self, id: i64) -> Result<bool>;

    /// Remove every expense and return how many were deleted
    fn clear(&mut self) -> Result<usize>;

    fn count(&self) -> Result<i64>;
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // amount is stored in whole cents
    conn.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount INTEGER NOT NULL CHECK (amount BETWEEN 0 AND 999999),
            memo TEXT NOT NULL,
            created_on TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        amount: Amount::from_cents(row.get(1)?),
        memo: row.get(2)?,
        created_on: row.get(3)?,
    })
}

// ============================================================================
// SQLITE STORE
// ============================================================================

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database selected by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.database_path();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;

        let init = || -> Result<()> {
            // Enable WAL mode for crash recovery
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            setup_database(&conn)
        };
        init().with_context(|| format!("Failed to initialize database {}", path.display()))?;

        info!("Opened {:?} database at {}", config.environment, path.display());
        Ok(SqliteStore { conn })
    }

    /// Fresh private database, used by tests
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(SqliteStore { conn })
    }

    /// Restart id assignment at 1. Only meaningful on an empty table.
    pub fn reset_sequence(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM sqlite_sequence WHERE name = 'expenses'", [])?;
        Ok(())
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(sql)?;
        let expenses = stmt
            .query_map(params, expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(expenses)
    }
}

impl ExpenseStore for SqliteStore {
    fn add(&mut self, amount: Amount, memo: &Memo, created_on: NaiveDate) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO expenses (amount, memo, created_on) VALUES (?1, ?2, ?3)",
                params![amount.cents(), memo.as_str(), created_on],
            )
            .context("Error adding expense")?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted expense {} ({} | {})", id, amount, memo);
        Ok(id)
    }

    fn list(&self) -> Result<Vec<Expense>> {
        self.query(
            "SELECT id, amount, memo, created_on FROM expenses ORDER BY id",
            [],
        )
        .context("Error listing expenses")
    }

    fn search(&self, query: &str) -> Result<Vec<Expense>> {
        // SQLite LIKE is case-insensitive for ASCII; memos are ASCII letters only
        self.query(
            "SELECT id, amount, memo, created_on FROM expenses
             WHERE memo LIKE '%' || ?1 || '%'
             ORDER BY id",
            params![query],
        )
        .context("Error searching expenses")
    }

    fn find(&self, id: i64) -> Result<Option<Expense>> {
        self.conn
            .query_row(
                "SELECT id, amount, memo, created_on FROM expenses WHERE id = ?1",
                params![id],
                expense_from_row,
            )
            .optional()
            .context("Error looking up expense")
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])
            .context("Error removing expense")?;
        debug!("Deleted {} row(s) for id {}", removed, id);
        Ok(removed == 1)
    }

    fn clear(&mut self) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM expenses", [])
            .context("Error clearing expenses")?;
        info!("Cleared {} expense(s)", removed);
        Ok(removed)
    }

    fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }
}
