// Command Dispatcher
// Splits argv into a command and its payload, validates, then calls the store

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::debug;
use std::io::Write;

use crate::confirm::KeyReader;
use crate::db::ExpenseStore;
use crate::display::{write_rows, HELP};
use crate::validation::{validate_id, validate_memo, validate_new_expense};

// ============================================================================
// COMMANDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add AMOUNT MEMO...` (memo tokens joined with single spaces)
    Add { amount: String, memo: String },
    List,
    /// `search QUERY...` (query tokens joined with single spaces)
    Search { query: String },
    Delete { id: String },
    /// `clear`, keeping any stray arguments so they can be rejected
    Clear { extra: Vec<String> },
    Help,
}

impl Command {
    /// Parse arguments after the program name. Unknown or missing commands map to `Help`.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Command {
        let Some((name, rest)) = args.split_first() else {
            return Command::Help;
        };
        let rest: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();

        match name.as_ref() {
            "add" => Command::Add {
                amount: rest.first().copied().unwrap_or_default().to_string(),
                memo: rest.get(1..).unwrap_or_default().join(" "),
            },
            "list" => Command::List,
            "search" => Command::Search {
                query: rest.join(" "),
            },
            "delete" => Command::Delete {
                id: rest.first().copied().unwrap_or_default().to_string(),
            },
            "clear" => Command::Clear {
                extra: rest.iter().map(|s| s.to_string()).collect(),
            },
            _ => Command::Help,
        }
    }
}

// ============================================================================
// DISPATCHER
// ============================================================================

/// Runs one command against a store, writing user-facing text to `out`.
///
/// Validation failures and not-found results are printed and return `Ok`.
/// An `Err` is always a store or output failure and should end the process.
pub struct Dispatcher<'a, W: Write> {
    store: &'a mut dyn ExpenseStore,
    keys: &'a mut dyn KeyReader,
    out: W,
    today: NaiveDate,
}

impl<'a, W: Write> Dispatcher<'a, W> {
    pub fn new(store: &'a mut dyn ExpenseStore, keys: &'a mut dyn KeyReader, out: W) -> Self {
        Dispatcher {
            store,
            keys,
            out,
            today: Local::now().date_naive(),
        }
    }

    /// Builder: override the date stamped on new expenses
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        let command = Command::parse(args);
        debug!("Dispatching {:?}", command);
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add { amount, memo } => self.add(&amount, &memo),
            Command::List => self.list(),
            Command::Search { query } => self.search(&query),
            Command::Delete { id } => self.delete(&id),
            Command::Clear { extra } => self.clear(&extra),
            Command::Help => {
                write!(self.out, "{}", HELP)?;
                Ok(())
            }
        }
    }

    fn add(&mut self, amount: &str, memo: &str) -> Result<()> {
        let (amount, memo) = match validate_new_expense(amount, memo) {
            Ok(valid) => valid,
            Err(e) => return self.report(e),
        };

        self.store.add(amount, &memo, self.today)?;
        writeln!(self.out, "The expense has been added successfully.")?;
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let expenses = self.store.list()?;
        if expenses.is_empty() {
            writeln!(self.out, "No expenses found.")?;
        } else {
            write_rows(&mut self.out, &expenses)?;
        }
        Ok(())
    }

    fn search(&mut self, query: &str) -> Result<()> {
        let memo = match validate_memo(query) {
            Ok(memo) => memo,
            Err(e) => return self.report(e),
        };

        let matches = self.store.search(memo.as_str())?;
        if matches.is_empty() {
            writeln!(self.out, "No record found for this expense.")?;
        } else {
            write_rows(&mut self.out, &matches)?;
        }
        Ok(())
    }

    fn delete(&mut self, raw_id: &str) -> Result<()> {
        let id = match validate_id(raw_id) {
            Ok(id) => id,
            Err(e) => return self.report(e),
        };

        let found = match id.value() {
            Some(value) => self.store.find(value)?,
            None => None,
        };

        match found {
            Some(expense) => {
                self.store.delete(expense.id)?;
                writeln!(self.out, "The following expense has been deleted:")?;
                write_rows(&mut self.out, std::slice::from_ref(&expense))?;
            }
            None => {
                writeln!(self.out, "The expense with id {} doesn't exist in the database.", id)?;
            }
        }
        Ok(())
    }

    fn clear(&mut self, extra: &[String]) -> Result<()> {
        if !extra.is_empty() {
            writeln!(self.out, "The clear command doesn't take any arguments.")?;
            return Ok(());
        }

        writeln!(self.out, "This will remove all expenses. Are you sure? (y/n)")?;
        self.out.flush()?;

        let answer = self.keys.read_key()?;
        debug!("Clear confirmation answer: {:?}", answer);
        if answer == Some('y') {
            self.store.clear()?;
            writeln!(self.out, "All expenses have been deleted.")?;
        }
        Ok(())
    }

    fn report(&mut self, error: impl std::fmt::Display) -> Result<()> {
        writeln!(self.out, "{}", error)?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
