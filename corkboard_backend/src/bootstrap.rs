use crate::config::CorkboardConfig;
use crate::database::Database;
use anyhow::{Context, Result};
use std::fs;

/// Prepares everything the HTTP server needs before it accepts traffic:
/// the data directory, the database file, and the schema.
pub fn initialize(config: &CorkboardConfig) -> Result<Database> {
    fs::create_dir_all(&config.paths.data_dir).with_context(|| {
        format!(
            "failed to create data directory {}",
            config.paths.data_dir.display()
        )
    })?;

    let database = Database::connect(&config.paths)?;
    let newly_created = database.ensure_migrations()?;
    tracing::info!(
        db_path = %config.paths.db_path.display(),
        newly_created,
        "database ready"
    );
    Ok(database)
}
