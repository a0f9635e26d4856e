//! One bootstrap run: open the store, converge the schema, record bookkeeping,
//! write the connection artifacts.

use crate::config::Config;
use crate::error::Result;
use crate::metadata::upsert_app_info;
use crate::report::{self, BootstrapReport, ConnectionInfo};
use crate::sqlite::{ensure_schema, open_store, probe_store, store_stats};
use tracing::{info, warn};

/// Run the bootstrap described by `config`.
///
/// Store and statement failures abort the run. Failures writing the
/// connection artifacts are logged and collected in the report's warnings.
pub fn run(config: &Config) -> Result<BootstrapReport> {
    let output_dir = config.output_dir()?;
    let db_path = config.db_path()?;
    let mut warnings = Vec::new();

    let existed = db_path.exists();
    if existed {
        info!("SQLite database already exists at {}", db_path.display());
        match probe_store(&db_path) {
            Ok(()) => info!("Database is accessible and working"),
            Err(e) => {
                warn!("Database exists but may be corrupted: {}", e);
                warnings.push(format!("Database exists but may be corrupted: {}", e));
            }
        }
    } else {
        info!("Creating new SQLite database at {}", db_path.display());
    }

    let mut conn = open_store(&db_path)?;
    ensure_schema(&mut conn)?;
    upsert_app_info(&mut conn, &config.metadata)?;
    let stats = store_stats(&conn)?;
    drop(conn);

    let connection = ConnectionInfo::new(config.db_name(), db_path);
    let mut artifacts = Vec::new();
    for written in [
        report::write_connection_file(&output_dir, &connection),
        report::write_env_file(&output_dir, &connection),
    ] {
        match written {
            Ok(path) => {
                info!("Saved {}", path.display());
                artifacts.push(path);
            }
            Err(e) => {
                warn!("{}", e);
                warnings.push(e.to_string());
            }
        }
    }

    Ok(BootstrapReport {
        existed,
        connection,
        stats,
        artifacts,
        warnings,
        sqlite_cli: report::sqlite_cli_available(),
    })
}
