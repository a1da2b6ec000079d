//! Fixtures shared by the cross-crate tests.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, EmployeeStore, connect};
use products_hr::EmployeeService;

/// A migrated in-memory database wrapped in the directory service.
pub async fn memory_service() -> Result<EmployeeService> {
    let settings = DatabaseSettings::with_url("sqlite::memory:").max_connections(1);
    let pool = connect(&settings)
        .await
        .context("open in-memory database")?;
    Migrator::up(pool.as_ref(), None)
        .await
        .context("apply migrations")?;
    Ok(EmployeeService::new(EmployeeStore::new(pool)))
}
