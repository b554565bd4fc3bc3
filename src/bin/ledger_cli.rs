use std::env;
use std::process::ExitCode;

use chrono::NaiveDate;
use colored::Colorize;
use dialoguer::Input;
use thiserror::Error;

use ledger_core::config::ConfigManager;
use ledger_core::core::LedgerManager;
use ledger_core::errors::LedgerError;
use ledger_core::ledger::Transaction;
use ledger_core::storage::CsvStore;
use ledger_core::validation::DATE_FORMAT;

const DEFAULT_TOP_N: usize = 5;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("invalid input: {0}")]
    Input(String),
}

fn main() -> ExitCode {
    ledger_core::init();
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    let config = ConfigManager::new().load()?;
    let store = CsvStore::new(config.data_file);
    let mut manager = LedgerManager::open(Box::new(store))?;

    match args.first().map(String::as_str) {
        None | Some("list") => {
            print_table(&manager.get_all_transactions());
            Ok(())
        }
        Some("add") => add_interactive(&mut manager),
        Some("delete") => {
            let index = parse_arg::<usize>(args.get(1), "delete expects a row index")?;
            let removed = manager.delete_transaction(index).map_err(|err| {
                report_unsaved(&manager);
                err
            })?;
            println!(
                "{} {} {} ({})",
                "Deleted".green(),
                removed.kind,
                format_amount(removed.amount),
                removed.category_display()
            );
            Ok(())
        }
        Some("balance") => {
            println!("Balance: {}", format_amount(manager.balance()).bold());
            Ok(())
        }
        Some("categories") => {
            for (category, total) in manager.category_totals() {
                println!("{:<24} {}", category, format_amount(total));
            }
            Ok(())
        }
        Some("top") => {
            let n = match args.get(1) {
                Some(_) => parse_arg::<usize>(args.get(1), "top expects a count")?,
                None => DEFAULT_TOP_N,
            };
            print_table(&manager.top_expenses(n));
            Ok(())
        }
        Some("period") => {
            let start = parse_date(args.get(1))?;
            let end = parse_date(args.get(2))?;
            let (income, expense) = manager.period_totals(start, end);
            println!("Income:  {}", format_amount(income).green());
            println!("Expense: {}", format_amount(expense).red());
            Ok(())
        }
        Some("filter") => {
            let category = args
                .get(1)
                .ok_or_else(|| CliError::Input("filter expects a category".into()))?;
            print_table(&manager.filter_by_category(category));
            Ok(())
        }
        Some(other) => {
            print_usage();
            Err(CliError::Input(format!("unknown command `{}`", other)))
        }
    }
}

fn add_interactive(manager: &mut LedgerManager) -> Result<(), CliError> {
    let amount = prompt("Amount")?;
    let kind = prompt("Type (Income/Expense)")?;
    let date = prompt("Date (YYYY-MM-DD)")?;
    let category = prompt("Category")?;
    let comment: String = Input::new()
        .with_prompt("Comment")
        .allow_empty(true)
        .interact_text()
        .map_err(|err| CliError::Input(err.to_string()))?;

    match manager.add_transaction(&amount, &kind, &date, &category, &comment) {
        Ok(_) => {
            println!("{}", "Transaction recorded.".green());
            Ok(())
        }
        Err(LedgerError::Validation(messages)) => {
            for message in &messages {
                eprintln!("  {} {}", "-".red(), message);
            }
            Err(CliError::Input("transaction rejected".into()))
        }
        Err(err) => {
            report_unsaved(manager);
            Err(err.into())
        }
    }
}

fn prompt(label: &str) -> Result<String, CliError> {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|err| CliError::Input(err.to_string()))
}

fn parse_arg<T: std::str::FromStr>(raw: Option<&String>, message: &str) -> Result<T, CliError> {
    raw.and_then(|value| value.parse().ok())
        .ok_or_else(|| CliError::Input(message.into()))
}

fn parse_date(raw: Option<&String>) -> Result<NaiveDate, CliError> {
    let raw = raw.ok_or_else(|| CliError::Input("period expects <start> <end> dates".into()))?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| CliError::Input(format!("`{}` is not a YYYY-MM-DD date", raw)))
}

fn report_unsaved(manager: &LedgerManager) {
    if manager.is_dirty() {
        eprintln!(
            "{}",
            "warning: the change was applied in memory but not written to disk".yellow()
        );
    }
}

fn print_table(rows: &[Transaction]) {
    if rows.is_empty() {
        println!("{}", "No transactions.".dimmed());
        return;
    }
    println!(
        "{}",
        format!(
            "{:>4}  {:>12}  {:<8}  {:<10}  {:<18}  {}",
            "#", "Amount", "Type", "Date", "Category", "Comment"
        )
        .bold()
    );
    for (position, txn) in rows.iter().enumerate() {
        println!(
            "{:>4}  {:>12}  {:<8}  {:<10}  {:<18}  {}",
            position,
            format_amount(txn.amount),
            txn.kind.to_string(),
            txn.date,
            txn.category_display(),
            txn.comment
        );
    }
}

fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn print_usage() {
    eprintln!("usage: ledger_cli [list|add|delete <index>|balance|categories|top [n]|period <start> <end>|filter <category>]");
}
