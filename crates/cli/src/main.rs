//! `jobly` CLI entry-point.
//!
//! Available sub-commands:
//! - `migrate` — run pending database migrations.
//! - `jobs`    — create, list, get, update or remove job postings.
//!
//! Records are printed to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use db::repository::jobs;
use db::{DbPool, JobUpdate, NewJob};

#[derive(Parser)]
#[command(name = "jobly", about = "Job posting store", version)]
struct Cli {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatabaseArgs {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Upper bound on pooled connections.
    #[arg(
        long,
        env = "DATABASE_MAX_CONNECTIONS",
        global = true,
        default_value_t = db::pool::DEFAULT_MAX_CONNECTIONS
    )]
    max_connections: u32,
}

impl DatabaseArgs {
    async fn connect(&self) -> Result<DbPool> {
        let url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL is not set (pass --database-url)")?;
        db::pool::create_pool(url, self.max_connections)
            .await
            .context("failed to connect to database")
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run pending database migrations.
    Migrate,
    /// Manage job postings.
    #[command(subcommand)]
    Jobs(JobsCommand),
}

#[derive(Subcommand)]
enum JobsCommand {
    /// Create a job posting.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company_handle: String,
        #[arg(long)]
        salary: Option<i32>,
        /// Decimal fraction, e.g. `0.5`.
        #[arg(long)]
        equity: Option<String>,
    },
    /// List every job posting.
    List,
    /// Show one job posting.
    Get { id: i32 },
    /// Partially update a job posting.
    ///
    /// CHANGES is a JSON object, e.g. '{"salary": null, "companyHandle": "c2"}'.
    Update { id: i32, changes: String },
    /// Delete a job posting.
    Remove { id: i32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pool = cli.database.connect().await?;

    match cli.command {
        Command::Migrate => {
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
        }
        Command::Jobs(cmd) => {
            let output = run_jobs(&pool, cmd).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

async fn run_jobs(pool: &DbPool, cmd: JobsCommand) -> Result<Value> {
    let output = match cmd {
        JobsCommand::Create { title, company_handle, salary, equity } => {
            let new_job = NewJob { title, salary, equity, company_handle };
            serde_json::to_value(jobs::create_job(pool, &new_job).await?)?
        }
        JobsCommand::List => serde_json::to_value(jobs::list_jobs(pool).await?)?,
        JobsCommand::Get { id } => serde_json::to_value(jobs::get_job(pool, id).await?)?,
        JobsCommand::Update { id, changes } => {
            let changes: JobUpdate =
                serde_json::from_str(&changes).context("invalid update JSON")?;
            serde_json::to_value(jobs::update_job(pool, id, &changes).await?)?
        }
        JobsCommand::Remove { id } => {
            let removed = jobs::remove_job(pool, id).await?;
            info!("Removed job {} ({})", removed.id, removed.title);
            serde_json::to_value(removed)?
        }
    };
    Ok(output)
}
