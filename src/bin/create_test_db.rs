use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use email_address::EmailAddress;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use centsible::{
    CategoryName, Color, NewTransaction, PRESET_COLORS, PasswordHash, TransactionType,
    ValidatedPassword, create_category, create_transaction, create_user, initialize_db,
};

/// A utility for creating a test database for the Centsible server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many days of transactions to create, counting back from today.
    #[arg(long, default_value_t = 90)]
    days: i64,
}

const TEST_EMAIL: &str = "test@example.com";
const TEST_PASSWORD: &str = "test";

const CATEGORIES: [&str; 6] = ["Food", "Rent", "Transport", "Entertainment", "Salary", "Gifts"];

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

    println!("Creating test user {TEST_EMAIL} with password \"{TEST_PASSWORD}\"...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked(TEST_PASSWORD),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user(TEST_EMAIL.parse::<EmailAddress>()?, password_hash, &conn)?;

    println!("Creating categories...");

    for (name, color) in CATEGORIES.iter().zip(PRESET_COLORS) {
        create_category(
            user.id,
            CategoryName::new(name)?,
            Color::new(color)?,
            &conn,
        )?;
    }

    println!("Creating {} days of transactions...", args.days);

    let today = OffsetDateTime::now_utc().date();
    let mut count = 0;

    for day in 0..args.days {
        let date = today - Duration::days(day);

        // Spending every day, income and rent twice a month.
        let mut transactions = vec![NewTransaction {
            amount: 8.5 + (day % 7) as f64 * 3.25,
            type_: TransactionType::Expense,
            category: "Food".to_owned(),
            date,
            note: (day % 3 == 0).then(|| "Groceries".to_owned()),
        }];

        if day % 5 == 0 {
            transactions.push(NewTransaction {
                amount: 4.2,
                type_: TransactionType::Expense,
                category: "Transport".to_owned(),
                date,
                note: None,
            });
        }

        if day % 14 == 0 {
            transactions.push(NewTransaction {
                amount: 2150.0,
                type_: TransactionType::Income,
                category: "Salary".to_owned(),
                date,
                note: Some("Fortnightly pay".to_owned()),
            });
            transactions.push(NewTransaction {
                amount: 780.0,
                type_: TransactionType::Expense,
                category: "Rent".to_owned(),
                date,
                note: None,
            });
        }

        for transaction in transactions {
            create_transaction(user.id, transaction, &conn)?;
            count += 1;
        }
    }

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}
