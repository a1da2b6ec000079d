mod config;
mod graphql;
mod http;
mod page;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, EmployeeStore, connect};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{EmployeeService, NewEmployee};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "employee-directory", version, about = "Employee directory server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the directory page, the GraphQL endpoint and the health check.
    Serve(ServeCommand),
    /// Apply or roll back the employees schema.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Create a handful of demo employees.
    Seed,
    /// Write the GraphQL SDL to a file.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", default_value = DEFAULT_SDL_PATH)]
        output: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Bring the schema up to date.
    Up,
    /// Undo the newest applied migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Serve even if the schema is behind the binary")]
    allow_dirty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

const DEFAULT_SDL_PATH: &str = "schema.graphql";

const DEMO_EMPLOYEES: [[&str; 4]; 3] = [
    ["Ann Lee", "Engineer", "R&D", "ann@example.com"],
    ["Bo Chen", "Recruiter", "People", "bo@example.com"],
    ["Cy Park", "Accountant", "Finance", "cy@example.com"],
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed => run_seed(&app_config).await,
        Command::SchemaPrint { output } => schema_print(output),
    }
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env();
    connect(&settings).await.context("failed to open database")
}

fn employee_service(pool: DbPool, config: &AppConfig) -> EmployeeService {
    EmployeeService::new(EmployeeStore::new(pool)).with_create_attempts(config.create_attempts)
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = setup_pool().await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let service = employee_service(pool, &config);
    let state = AppState {
        schema: graphql::build_schema(service.clone()),
        service,
        config,
    };
    http::serve((&cmd).into(), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool.as_ref()).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `employee-directory migrate up` or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(pool.as_ref(), None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(pool.as_ref(), Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn run_seed(config: &AppConfig) -> Result<()> {
    let pool = setup_pool().await?;
    ensure_migrations(&pool, false).await?;
    let service = employee_service(pool, config);
    for [name, position, department, contact] in DEMO_EMPLOYEES {
        let input = NewEmployee::new(name, position, department, contact)?;
        let created = service.create(input).await?;
        info!(id = created.id, name, "seeded employee");
    }
    Ok(())
}

fn schema_print(target: PathBuf) -> Result<()> {
    std::fs::write(&target, graphql::sdl())
        .with_context(|| format!("failed to write {}", target.display()))?;
    info!(path = %target.display(), "GraphQL schema written");
    Ok(())
}
