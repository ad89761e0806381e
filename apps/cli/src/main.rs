//! Gamedex CLI
//!
//! Terminal shell around the catalog state engine: the part the reference
//! UI pages play. It opens a session, drives the engine, and reacts to the
//! session-expired settlement by asking the user to log in again.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gamedex_core::api::{CatalogApi, HttpCatalogApi};
use gamedex_core::config::{ApiConfig, CategoryMap};
use gamedex_core::engine::{CatalogStateEngine, Settlement};
use gamedex_core::ident::preview_next_identifier;
use gamedex_core::model::GameDraft;
use gamedex_core::notify::{NoteKind, NotificationSink};

/// Page size used when a command must find one item by identifier.
const LOOKUP_PAGE_SIZE: u64 = 500;

/// Prints notifications as plain terminal lines.
struct StdoutSink;

impl NotificationSink for StdoutSink {
    fn notify(&self, kind: NoteKind, message: &str) {
        match kind {
            NoteKind::Success => println!("ok: {message}"),
            NoteKind::Error => eprintln!("error: {message}"),
        }
    }
}

#[derive(Parser)]
#[command(name = "gamedex", about = "Catalog client for the gamedex API")]
struct Cli {
    /// API base URL.
    #[arg(long, env = "GAMEDEX_API_URL")]
    api_url: String,

    /// Account name for commands that need a session.
    #[arg(long, env = "GAMEDEX_USERNAME")]
    username: Option<String>,

    /// Password for commands that need a session.
    #[arg(long, env = "GAMEDEX_PASSWORD")]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Register {
        username: String,
        password: String,
        confirm_password: String,
    },
    /// List games, optionally filtered client-side.
    List {
        #[arg(long, default_value_t = 12)]
        page_size: u64,
        /// How many pages to load before filtering.
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Keep identifiers containing this category prefix.
        #[arg(long)]
        category: Option<String>,
        /// Keep names containing this substring (case-insensitive).
        #[arg(long)]
        name: Option<String>,
    },
    /// Add a game to the catalog.
    Add {
        /// Category name; must appear in GAMEDEX_CATEGORIES.
        #[arg(long)]
        category: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        release_date: NaiveDate,
        #[arg(long)]
        author: String,
        #[arg(long)]
        price: f64,
        /// Image path or data URI.
        #[arg(long)]
        image: Option<String>,
    },
    /// Patch fields of an existing game.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        release_date: Option<NaiveDate>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a game by identifier.
    Delete { id: String },
    /// Show the next identifier for a category.
    NextId { category: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::new(&cli.api_url);
    let api = Arc::new(HttpCatalogApi::new(&config)?);
    let mut engine = CatalogStateEngine::new(api.clone(), Arc::new(StdoutSink));

    match &cli.command {
        Command::Register {
            username,
            password,
            confirm_password,
        } => {
            api.register(username, password, confirm_password).await?;
            println!("ok: account created, you can log in now");
        }

        Command::List {
            page_size,
            pages,
            category,
            name,
        } => {
            ensure_session(&api, &cli).await?;
            settle(engine.load_initial(*page_size).await)?;
            // Extra pages load before any filter is set; load_more is a
            // no-op once a filter is active.
            for _ in 1..*pages {
                settle(engine.load_more(*page_size).await)?;
            }
            engine.set_filter(category.clone(), name.clone());

            let visible = engine.state().visible_items();
            if visible.is_empty() {
                println!("no games match");
            }
            for game in visible {
                println!(
                    "{}  {}  by {}  released {}  {}$",
                    game.id, game.name, game.author, game.release_date, game.price
                );
            }
        }

        Command::Add {
            category,
            name,
            description,
            release_date,
            author,
            price,
            image,
        } => {
            ensure_session(&api, &cli).await?;
            let draft = GameDraft {
                category: Some(category.clone()),
                name: Some(name.clone()),
                description: description.clone(),
                release_date: Some(*release_date),
                author: Some(author.clone()),
                price: Some(*price),
                image: image.clone(),
            };
            engine.stage_creation(draft)?;
            settle(engine.confirm_creation().await?)?;
        }

        Command::Update {
            id,
            name,
            description,
            release_date,
            author,
            price,
            image,
        } => {
            ensure_session(&api, &cli).await?;
            settle(engine.load_initial(LOOKUP_PAGE_SIZE).await)?;
            if !engine.state().contains(id) {
                bail!("no loaded game with id {id}");
            }
            let draft = GameDraft {
                category: None,
                name: name.clone(),
                description: description.clone(),
                release_date: *release_date,
                author: author.clone(),
                price: *price,
                image: image.clone(),
            };
            engine.stage_update(id, draft)?;
            settle(engine.confirm_update().await?)?;
        }

        Command::Delete { id } => {
            ensure_session(&api, &cli).await?;
            settle(engine.load_initial(LOOKUP_PAGE_SIZE).await)?;
            if !engine.state().contains(id) {
                bail!("no loaded game with id {id}");
            }
            engine.stage_deletion(id)?;
            settle(engine.confirm_deletion().await?)?;
        }

        Command::NextId { category } => {
            let categories = CategoryMap::from_env();
            let code = categories
                .code_for(category)
                .with_context(|| format!("unknown category {category:?}; set GAMEDEX_CATEGORIES"))?;

            ensure_session(&api, &cli).await?;
            match api.next_identifier(code).await {
                Ok(id) => println!("{id}"),
                Err(err) => {
                    // The preview is advisory; the server assigns the real id.
                    tracing::warn!("server next-id unavailable ({err}), showing local preview");
                    println!("{}", preview_next_identifier(code, None));
                }
            }
        }
    }

    Ok(())
}

/// Log in with the credentials from flags or environment.
async fn ensure_session(api: &HttpCatalogApi, cli: &Cli) -> Result<()> {
    let (Some(username), Some(password)) = (&cli.username, &cli.password) else {
        bail!("this command needs --username/--password (or GAMEDEX_USERNAME/GAMEDEX_PASSWORD)");
    };
    api.login(username, password).await.context("login failed")?;
    Ok(())
}

/// Turn a session-expired settlement into a terminal error; the engine has
/// already notified any other failure.
fn settle(settlement: Settlement) -> Result<()> {
    if settlement.session_expired() {
        bail!("session is no longer valid; log in again");
    }
    Ok(())
}
