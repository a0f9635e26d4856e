//! Bookkeeping rows in `app_info`.

use crate::error::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Deserialize;
use tracing::info;

/// Deployment facts written to `app_info` on every bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppInfo {
    pub project_name: String,
    pub version: String,
    pub author: String,
    pub description: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            project_name: "database".to_string(),
            version: "0.1.0".to_string(),
            author: "John Doe".to_string(),
            description: String::new(),
        }
    }
}

impl AppInfo {
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("project_name", self.project_name.as_str()),
            ("version", self.version.as_str()),
            ("author", self.author.as_str()),
            ("description", self.description.as_str()),
        ]
    }
}

/// Replace the four bookkeeping keys; any other keys are left alone.
pub fn upsert_app_info(conn: &mut Connection, info: &AppInfo) -> Result<()> {
    let tx = conn.transaction()?;
    for (key, value) in info.entries() {
        tx.execute(
            "INSERT OR REPLACE INTO app_info (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|source| Error::StatementRejected {
            object: format!("app_info.{}", key),
            source,
        })?;
    }
    tx.commit()?;
    info!("App info recorded: {} v{}", info.project_name, info.version);
    Ok(())
}

pub fn read_app_info(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM app_info WHERE key = ?1",
            params![key],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?;
    Ok(value.flatten())
}
