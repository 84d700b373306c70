//! CLI entry and dispatch.

use alganews_core::config;
use alganews_core::sdk::cash_flow::EntryType;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "alganews")]
#[command(version = "0.1")]
#[command(about = "AlgaNews admin from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the API base URL from config
    #[arg(long, env = "ALGANEWS_API_URL", global = true)]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Start a login and print the authorization URL
    Login {
        /// Do not open the login page in the browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Finish a login with the URL the auth server redirected to
    Authorize {
        /// Redirect URL, e.g. http://localhost:3000/authorize?code=...
        url: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Latest posts and the revenue/expense chart
    Dashboard,

    /// List users
    Users,

    /// Manage scheduled payments
    Payments {
        #[command(subcommand)]
        command: PaymentCommands,
    },

    /// Manage expenses
    Expenses {
        #[command(subcommand)]
        command: EntryCommands,
    },

    /// Manage revenues
    Revenues {
        #[command(subcommand)]
        command: EntryCommands,
    },

    /// Manage cash-flow categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
    /// Print the default configuration
    Generate,
}

#[derive(clap::Subcommand)]
enum PaymentCommands {
    /// List payments
    List {
        /// Scheduled month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Zero-based page number
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Show one payment
    Show { id: u64 },
    /// Approve payments (irreversible)
    Approve {
        #[arg(required = true)]
        ids: Vec<u64>,
        /// Accept both confirmations
        #[arg(long, short)]
        yes: bool,
    },
    /// Remove a payment that was not approved yet
    Remove {
        id: u64,
        #[arg(long, short)]
        yes: bool,
    },
    /// Preview a payment before scheduling it
    Preview {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Schedule a payment
    Schedule {
        #[command(flatten)]
        draft: DraftArgs,
        /// Payment date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
}

/// Payee and accounting period of a payment.
#[derive(clap::Args, Debug, Clone)]
struct DraftArgs {
    /// Editor receiving the payment
    #[arg(long)]
    payee: u64,
    /// First day of the accounting period (YYYY-MM-DD)
    #[arg(long)]
    from: NaiveDate,
    /// Last day of the accounting period (YYYY-MM-DD)
    #[arg(long)]
    to: NaiveDate,
    /// Bonus as TITLE=AMOUNT, repeatable
    #[arg(long = "bonus", value_name = "TITLE=AMOUNT")]
    bonuses: Vec<String>,
}

#[derive(clap::Subcommand)]
enum EntryCommands {
    /// List entries of a month
    List {
        /// Month (YYYY-MM), defaults to the current one
        #[arg(long)]
        month: Option<String>,
    },
    /// Remove entries
    Remove {
        #[arg(required = true)]
        ids: Vec<u64>,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(clap::Subcommand)]
enum CategoryCommands {
    /// List categories
    List {
        /// Only expense or revenue categories
        #[arg(long = "type", value_enum)]
        entry_type: Option<EntryKind>,
    },
    /// Remove a category without entries
    Remove { id: u64 },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum EntryKind {
    Expense,
    Revenue,
}

impl From<EntryKind> for EntryType {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Expense => EntryType::Expense,
            EntryKind::Revenue => EntryType::Revenue,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, api_url } = cli;

    // Config commands must work even when the file is broken.
    let command = match command {
        Commands::Config { command } => {
            return match command {
                ConfigCommands::Path => commands::config::path(),
                ConfigCommands::Init => commands::config::init(),
                ConfigCommands::Generate => commands::config::generate(),
            };
        }
        other => other,
    };

    let mut config = config::Config::load().context("load config")?;
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    let _log_guard = alganews_core::logging::init(&config.log).context("init logging")?;
    tracing::debug!(base_url = %config.api.base_url, "config loaded");

    match command {
        Commands::Config { .. } => Ok(()),
        Commands::Login { no_browser } => commands::auth::login(&config, !no_browser).await,
        Commands::Authorize { url } => commands::auth::authorize(&config, &url).await,
        Commands::Logout => commands::auth::logout(&config).await,
        Commands::Whoami => commands::auth::whoami(&config).await,
        Commands::Dashboard => commands::dashboard::show(&config).await,
        Commands::Users => commands::users::list(&config).await,
        Commands::Payments { command } => match command {
            PaymentCommands::List { month, page } => {
                commands::payments::list(&config, month, page).await
            }
            PaymentCommands::Show { id } => commands::payments::show(&config, id).await,
            PaymentCommands::Approve { ids, yes } => {
                commands::payments::approve(&config, ids, yes).await
            }
            PaymentCommands::Remove { id, yes } => {
                commands::payments::remove(&config, id, yes).await
            }
            PaymentCommands::Preview { draft } => {
                commands::payments::preview(&config, &draft.into_draft()?).await
            }
            PaymentCommands::Schedule { draft, date } => {
                commands::payments::schedule(&config, &draft.into_draft()?, date).await
            }
        },
        Commands::Expenses { command } => entries(&config, EntryType::Expense, command).await,
        Commands::Revenues { command } => entries(&config, EntryType::Revenue, command).await,
        Commands::Categories { command } => match command {
            CategoryCommands::List { entry_type } => {
                commands::cash_flow::categories(&config, entry_type.map(Into::into)).await
            }
            CategoryCommands::Remove { id } => {
                commands::cash_flow::remove_category(&config, id).await
            }
        },
    }
}

async fn entries(config: &config::Config, entry_type: EntryType, command: EntryCommands) -> Result<()> {
    match command {
        EntryCommands::List { month } => commands::cash_flow::list(config, entry_type, month).await,
        EntryCommands::Remove { ids, yes } => {
            commands::cash_flow::remove(config, entry_type, ids, yes).await
        }
    }
}

impl DraftArgs {
    fn into_draft(self) -> Result<commands::payments::Draft> {
        let bonuses = self
            .bonuses
            .iter()
            .map(|raw| commands::payments::parse_bonus(raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(commands::payments::Draft {
            payee: self.payee,
            starts_on: self.from,
            ends_on: self.to,
            bonuses,
        })
    }
}
