use std::{error::Error, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use engine::{CreateTransactionCmd, Engine, MoneyCents};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "tally_admin")]
#[command(about = "Admin utilities for Tally (imports, balance, cleanup)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./tally.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a CSV file of `title,type,value,category` rows.
    Import(ImportArgs),
    /// Record one validated transaction.
    Add(AddArgs),
    /// Print income, outcome and total.
    Balance,
    /// Print every transaction with its category, then the total.
    List,
    /// Delete a transaction by id.
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
struct ImportArgs {
    file: PathBuf,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    title: String,
    /// `income` or `outcome`.
    #[arg(long = "type")]
    kind: String,
    /// Decimal amount, e.g. `12.50`.
    #[arg(long, value_parser = parse_amount)]
    value: MoneyCents,
    #[arg(long)]
    category: String,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    id: Uuid,
}

fn parse_amount(raw: &str) -> Result<MoneyCents, String> {
    raw.parse::<MoneyCents>().map_err(|err| err.to_string())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Import(args) => {
            let imported = engine.import_file(&args.file).await?;
            println!(
                "imported {} transactions from {}",
                imported.len(),
                args.file.display()
            );
        }
        Command::Add(args) => {
            let tx = engine
                .create_transaction(CreateTransactionCmd::new(
                    args.title,
                    args.kind,
                    args.value,
                    args.category,
                ))
                .await?;
            println!("created transaction: {} ({})", tx.title, tx.id);
        }
        Command::Balance => {
            let balance = engine.balance().await?;
            println!("income:  {}", balance.income);
            println!("outcome: {}", balance.outcome);
            println!("total:   {}", balance.total);
        }
        Command::List => {
            let ledger = engine.ledger().await?;
            for (tx, category) in &ledger.transactions {
                println!(
                    "{}  {:<7}  {:>12}  {:<20}  {}",
                    tx.id,
                    tx.kind.as_str(),
                    tx.value.to_string(),
                    category.title,
                    tx.title
                );
            }
            println!("total:   {}", ledger.balance.total);
        }
        Command::Delete(args) => {
            engine.delete_transaction(args.id).await?;
            println!("deleted transaction: {}", args.id);
        }
    }

    Ok(())
}
