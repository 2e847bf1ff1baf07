// Expense Tracker - Core Library
// Exposes all modules for use in the CLI binary and tests

pub mod config;
pub mod confirm;
pub mod db;
pub mod dispatch;
pub mod display;
pub mod memory;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, Environment};
pub use confirm::{stdin_keys, KeyReader, ReaderKeys, TerminalKeys};
pub use db::{setup_database, Expense, ExpenseStore, SqliteStore};
pub use dispatch::{Command, Dispatcher};
pub use display::{format_row, HELP};
pub use memory::MemoryStore;
pub use validation::{
    validate_amount, validate_id, validate_memo, validate_new_expense, Amount, ExpenseId, Memo,
    ValidationError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
