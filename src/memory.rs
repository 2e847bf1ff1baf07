// In-memory store
// Vec-backed ExpenseStore with the same id and ordering rules as SQLite, for tests

use anyhow::Result;
use chrono::NaiveDate;

use crate::db::{Expense, ExpenseStore};
use crate::validation::{Amount, Memo};

#[derive(Debug, Default)]
pub struct MemoryStore {
    expenses: Vec<Expense>,
    last_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpenseStore for MemoryStore {
    fn add(&mut self, amount: Amount, memo: &Memo, created_on: NaiveDate) -> Result<i64> {
        self.last_id += 1;
        self.expenses.push(Expense {
            id: self.last_id,
            amount,
            memo: memo.as_str().to_string(),
            created_on,
        });
        Ok(self.last_id)
    }

    fn list(&self) -> Result<Vec<Expense>> {
        Ok(self.expenses.clone())
    }

    fn search(&self, query: &str) -> Result<Vec<Expense>> {
        let needle = query.to_ascii_lowercase();
        Ok(self
            .expenses
            .iter()
            .filter(|e| e.memo.to_ascii_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn find(&self, id: i64) -> Result<Option<Expense>> {
        Ok(self.expenses.iter().find(|e| e.id == id).cloned())
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        Ok(self.expenses.len() != before)
    }

    fn clear(&mut self) -> Result<usize> {
        let removed = self.expenses.len();
        self.expenses.clear();
        Ok(removed)
    }

    fn count(&self) -> Result<i64> {
        Ok(self.expenses.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_amount, validate_memo};

    fn add(store: &mut MemoryStore, amount: &str, memo: &str) -> i64 {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        store
            .add(validate_amount(amount).unwrap(), &validate_memo(memo).unwrap(), today)
            .unwrap()
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let mut store = MemoryStore::new();
        assert_eq!(add(&mut store, "1.00", "one"), 1);
        assert_eq!(add(&mut store, "2.00", "two"), 2);

        assert!(store.delete(2).unwrap());
        assert_eq!(add(&mut store, "3.00", "three"), 3);

        let ids: Vec<i64> = store.list().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_search_matches_sqlite_semantics() {
        let mut store = MemoryStore::new();
        add(&mut store, "1000.00", "cheap car");
        add(&mut store, "4231.32", "cheap bike");
        add(&mut store, "21.32", "oil filter");

        assert_eq!(store.search("CHEAP").unwrap().len(), 2);
        assert_eq!(store.search("il fi").unwrap()[0].memo, "oil filter");
        assert!(store.search("boat").unwrap().is_empty());
    }

    #[test]
    fn test_clear_reports_removed_count() {
        let mut store = MemoryStore::new();
        add(&mut store, "1.00", "one");
        add(&mut store, "2.00", "two");

        assert_eq!(store.clear().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
        assert!(!store.delete(1).unwrap());
    }
}
