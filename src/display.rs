// Terminal output for expense rows and help text

use std::io::{self, Write};

use crate::db::Expense;

pub const HELP: &str = "\
An expenses recording system

Commands:

add AMOUNT MEMO - record a new expense
clear - delete all expenses
list - list all expenses
delete NUMBER - remove expense with id NUMBER
search QUERY - list expenses with a matching memo field
";

/// `id | date | amount | memo`, first three right-aligned to 3, 10 and 12 columns.
pub fn format_row(expense: &Expense) -> String {
    format!(
        "{:>3} | {:>10} | {:>12} | {}",
        expense.id,
        expense.created_on.format("%Y-%m-%d").to_string(),
        expense.amount,
        expense.memo
    )
}

pub fn write_rows<W: Write>(out: &mut W, expenses: &[Expense]) -> io::Result<()> {
    for expense in expenses {
        writeln!(out, "{}", format_row(expense))?;
    }
    Ok(())
}
