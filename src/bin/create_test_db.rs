use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, Duration, OffsetDateTime};

use expense_tracker::{
    CategoryName, ExpenseAmount, ExpenseTitle, NewExpense, create_category, create_expense,
    initialize_db,
};

/// A utility for creating a test database for the expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Each entry is a title, amount in cents, category name, and how many days ago it was.
const TEST_EXPENSES: [(&str, i64, &str, i64); 10] = [
    ("Flight to Wellington", 32_950, "Travel", 2),
    ("Hotel, two nights", 41_800, "Travel", 3),
    ("Taxi from airport", 4_520, "Travel", 3),
    ("Printer paper", 1_899, "Office Supplies", 6),
    ("Desk lamp", 6_450, "Office Supplies", 12),
    ("Client lunch", 8_730, "Meals", 9),
    ("Team coffee", 2_360, "Meals", 1),
    ("Text editor licence", 9_900, "Software", 20),
    ("Cloud hosting", 2_500, "Software", 31),
    ("Conference ticket", 59_900, "Training", 45),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test categories and expenses...");

    let today = OffsetDateTime::now_utc().date();
    let mut category_ids = Vec::new();

    for (title, cents, category_name, days_ago) in TEST_EXPENSES {
        let category_id = match category_ids
            .iter()
            .find(|(name, _)| *name == category_name)
        {
            Some((_, id)) => *id,
            None => {
                let category = create_category(CategoryName::new(category_name)?, &conn)?;
                category_ids.push((category_name, category.id));
                category.id
            }
        };

        let date: Date = today - Duration::days(days_ago);
        let new_expense = NewExpense::new(
            ExpenseTitle::new(title)?,
            ExpenseAmount::new(Decimal::new(cents, 2))?,
            category_id,
            date,
        );

        create_expense(new_expense, &conn)?;
    }

    println!(
        "Created {} categories and {} expenses.",
        category_ids.len(),
        TEST_EXPENSES.len()
    );
    println!("Success!");

    Ok(())
}
