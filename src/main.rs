//! pantry - a date-scoped shopping list client
//!
//! Talks to the shopping backend configured in `config.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use pantry::domain::{display_label, ItemId, ShoppingItem};
use pantry::services::{
    AddOutcome, DashboardService, DeleteOutcome, SearchOutcome, ShoppingService,
};
use pantry::store::HttpShoppingStore;
use pantry::{logging, Config};

/// pantry - a date-scoped shopping list client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Day to work on (defaults to today)
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the day's list
    List,
    /// Add one unit of an item to the day
    Add { text: String },
    /// Mark an item as bought
    Buy { id: i64 },
    /// Star or unstar an item name
    Fav { id: i64 },
    /// Remove an item from the day
    Rm { id: i64 },
    /// Jump to the most recent purchase of an item
    Search { text: String },
    /// Show starred item names
    Favorites,
    /// Show the dashboard shopping card
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let bootstrap = logging::bootstrap_subscriber(
        logging::env_filter(logging::BOOTSTRAP_FILTER)?,
        std::io::stderr,
    );
    let config = tracing::subscriber::with_default(bootstrap, || Config::load(args.config))?;

    logging::init(logging::env_filter(&config.log_filter)?);

    tracing::debug!("Backend: {}", config.api_url);

    let store = Arc::new(HttpShoppingStore::new(
        &config.api_url,
        config.request_timeout(),
    )?);
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    match args.command {
        Command::Summary => print_summary(store, date).await,
        command => {
            let service =
                ShoppingService::new(store, date).with_settings(config.shopping_settings());
            run(&service, date, command).await
        }
    }
}

async fn print_summary(store: Arc<HttpShoppingStore>, date: NaiveDate) -> Result<()> {
    let summary = DashboardService::new(store).shopping_summary(date).await?;
    println!("{}", summary.label);
    for item in &summary.items {
        println!("  {}", render(item));
    }
    if summary.has_unconfirmed {
        println!("Unbought items remain.");
    }
    Ok(())
}

async fn run(
    service: &ShoppingService<HttpShoppingStore>,
    date: NaiveDate,
    command: Command,
) -> Result<()> {
    service.select_date(date).await?;

    match command {
        Command::List | Command::Summary => {}
        Command::Add { text } => match service.add_item(&text, date).await? {
            AddOutcome::Ignored => println!("Nothing to add."),
            AddOutcome::Incremented(item) => println!("More of: {}", render(&item)),
            AddOutcome::Reactivated(item) => println!("From favorites: {}", render(&item)),
            AddOutcome::Created(item) => println!("Added: {}", render(&item)),
        },
        Command::Buy { id } => {
            let item = service.mark_bought(ItemId(id)).await?;
            println!("Bought: {}", render(&item));
        }
        Command::Fav { id } => {
            let item = service.toggle_favorite(ItemId(id)).await?;
            let verb = if item.is_favorite { "Starred" } else { "Unstarred" };
            println!("{verb}: {}", item.text);
        }
        Command::Rm { id } => match service.delete_item(ItemId(id)).await? {
            DeleteOutcome::Removed(id) => println!("Deleted #{id}"),
            DeleteOutcome::Templated(item) => println!("Kept in favorites: {}", item.text),
        },
        Command::Search { text } => match service.search_by_text(&text).await? {
            SearchOutcome::Ignored => println!("Nothing to search."),
            SearchOutcome::NotFound => {
                let snapshot = service.snapshot().await;
                println!("{}", snapshot.search_message().unwrap_or_default());
            }
            SearchOutcome::Found { matches, .. } => {
                for item in &matches {
                    if let Some(date) = item.shopping_date {
                        println!("  {date}  {}", item.text);
                    }
                }
            }
        },
        Command::Favorites => {
            for item in service.unique_favorites().await {
                println!("  ★ {}", item.text);
            }
            return Ok(());
        }
    }

    print_day(service).await;
    Ok(())
}

async fn print_day(service: &ShoppingService<HttpShoppingStore>) {
    let snapshot = service.snapshot().await;
    println!("{}", display_label(snapshot.selected_date()));
    for item in snapshot.today_items() {
        let marker = if snapshot.is_highlighted(item) { ">" } else { " " };
        println!("{marker} {}", render(item));
    }
}

fn render(item: &ShoppingItem) -> String {
    let star = if item.is_favorite { "★" } else { "☆" };
    let check = if item.is_bought { "[x]" } else { "[ ]" };
    let count = if item.count > 1 {
        format!(" x{}", item.count)
    } else {
        String::new()
    };
    format!("#{} {check} {star} {}{count}", item.id, item.text)
}
