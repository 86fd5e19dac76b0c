//! # Hypermedia Contacts CLI (`contacts`)
//!
//! ## Usage
//!
//! ```bash
//! contacts --config ./config/contacts.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `contacts init` | Create the database schema and seed the placeholder contact |
//! | `contacts list [--query q]` | List all contacts, or search them |
//! | `contacts get <id>` | Show one contact |
//! | `contacts add --first-name …` | Create a contact |
//! | `contacts edit <id> --phone …` | Change only the given fields |
//! | `contacts delete <id>` | Delete a contact |
//! | `contacts serve` | Start the HTTP server |

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use hypermedia_contacts::{commands, config, logging, server};
use hypermedia_contacts::ContactForm;

/// Hypermedia Contacts: a server-rendered contact manager.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file.
#[derive(Parser)]
#[command(name = "contacts", version)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/contacts.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database and the `contacts` table, and inserts a
    /// placeholder contact if the table is empty. Safe to run repeatedly.
    Init,

    /// List contacts, or search them when `--query` has text.
    List {
        /// Case-insensitive substring matched against every field.
        #[arg(long, short)]
        query: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show a contact by id.
    Get {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Create a contact. Omitted fields are stored empty.
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit a contact. Omitted or empty fields keep their current value.
    Edit {
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a contact by id.
    Delete { id: String },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

impl From<FieldArgs> for ContactForm {
    fn from(args: FieldArgs) -> Self {
        ContactForm {
            first_name: args.first_name.unwrap_or_default(),
            last_name: args.last_name.unwrap_or_default(),
            phone: args.phone.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;
    logging::init(&cfg.log);

    match cli.command {
        Commands::Init => commands::run_init(&cfg).await?,
        Commands::List { query, json } => {
            commands::run_list(&cfg, query.as_deref(), json).await?;
        }
        Commands::Get { id, json } => commands::run_get(&cfg, &id, json).await?,
        Commands::Add { fields } => commands::run_add(&cfg, fields.into()).await?,
        Commands::Edit { id, fields } => commands::run_edit(&cfg, &id, fields.into()).await?,
        Commands::Delete { id } => commands::run_delete(&cfg, &id).await?,
        Commands::Serve => server::run_server(&cfg).await?,
    }

    Ok(())
}
