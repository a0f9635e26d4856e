//! Connection artifacts and the status summary printed after a bootstrap.

use crate::error::{Error, Result};
use crate::sqlite::StoreStats;
use std::path::{Path, PathBuf};

pub const CONNECTION_FILE: &str = "db_connection.txt";
pub const VISUALIZER_DIR: &str = "db_visualizer";
pub const ENV_FILE: &str = "sqlite.env";

/// How to reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub db_name: String,
    /// Absolute path to the database file
    pub db_path: PathBuf,
    pub connection_string: String,
    /// What to hand to `Connection::open` or `sqlite3`: the bare name when the
    /// store sits in the working directory, the absolute path otherwise
    pub open_target: String,
}

impl ConnectionInfo {
    pub fn new(db_name: impl Into<String>, db_path: PathBuf) -> Self {
        let cwd = std::env::current_dir().ok();
        Self::relative_to(db_name, db_path, cwd.as_deref())
    }

    /// Like [`ConnectionInfo::new`] with an explicit working directory.
    pub fn relative_to(db_name: impl Into<String>, db_path: PathBuf, cwd: Option<&Path>) -> Self {
        let db_name = db_name.into();
        // an absolute unix path yields the four-slash form sqlite:////abs/path
        let connection_string = format!("sqlite:///{}", db_path.display());
        let in_cwd = cwd.is_some() && db_path.parent() == cwd;
        let open_target = if in_cwd {
            db_name.clone()
        } else {
            db_path.display().to_string()
        };
        Self {
            db_name,
            db_path,
            connection_string,
            open_target,
        }
    }
}

fn write_artifact(path: PathBuf, content: &str) -> Result<PathBuf> {
    match std::fs::write(&path, content) {
        Ok(()) => Ok(path),
        Err(source) => Err(Error::AuxiliaryWrite { path, source }),
    }
}

/// Write `db_connection.txt` into `dir`.
pub fn write_connection_file(dir: &Path, info: &ConnectionInfo) -> Result<PathBuf> {
    let content = format!(
        "# SQLite connection methods:\n\
         # Rust: rusqlite::Connection::open(\"{}\")\n\
         # Connection string: {}\n\
         # File path: {}\n",
        info.open_target,
        info.connection_string,
        info.db_path.display()
    );
    write_artifact(dir.join(CONNECTION_FILE), &content)
}

/// Write `db_visualizer/sqlite.env` into `dir`, creating the directory if needed.
pub fn write_env_file(dir: &Path, info: &ConnectionInfo) -> Result<PathBuf> {
    let visualizer = dir.join(VISUALIZER_DIR);
    if !visualizer.exists() {
        std::fs::create_dir_all(&visualizer).map_err(|source| Error::AuxiliaryWrite {
            path: visualizer.clone(),
            source,
        })?;
        tracing::info!("Created {} directory", VISUALIZER_DIR);
    }
    let content = format!("export SQLITE_DB=\"{}\"\n", info.db_path.display());
    write_artifact(visualizer.join(ENV_FILE), &content)
}

/// Whether an executable `sqlite3` is on `PATH`.
pub fn sqlite_cli_available() -> bool {
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|dir| is_executable(&dir.join("sqlite3")))
        })
        .unwrap_or(false)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Outcome of one bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub existed: bool,
    pub connection: ConnectionInfo,
    pub stats: StoreStats,
    /// Artifacts that were written
    pub artifacts: Vec<PathBuf>,
    /// Non-fatal problems
    pub warnings: Vec<String>,
    pub sqlite_cli: bool,
}

/// Human-readable status block for standard output.
pub fn render_summary(report: &BootstrapReport) -> String {
    let info = &report.connection;
    let path = info.db_path.display();
    let mut lines = vec![
        "SQLite setup complete!".to_string(),
        format!("Database: {}", info.db_name),
        format!("Location: {}", path),
        String::new(),
        format!(
            "To use with Node.js viewer, run: source {}/{}",
            VISUALIZER_DIR, ENV_FILE
        ),
        String::new(),
        "To connect to the database, use one of the following methods:".to_string(),
        format!("1. Rust: rusqlite::Connection::open(\"{}\")", info.open_target),
        format!("2. Connection string: {}", info.connection_string),
        format!("3. Direct file access: {}", path),
        String::new(),
        "Database statistics:".to_string(),
        format!("  Tables: {}", report.stats.table_count),
        format!("  App info records: {}", report.stats.app_info_count),
    ];
    if report.sqlite_cli {
        lines.push(String::new());
        lines.push("SQLite CLI is available. You can also use:".to_string());
        lines.push(format!("  sqlite3 {}", info.open_target));
    }
    lines.extend(report.warnings.iter().map(|w| format!("Warning: {}", w)));
    lines.push(String::new());
    lines.push("Script completed successfully.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> ConnectionInfo {
        ConnectionInfo::new("myapp.db", PathBuf::from("/srv/app/myapp.db"))
    }

    #[test]
    fn test_connection_string_form() {
        assert_eq!(sample_info().connection_string, "sqlite:////srv/app/myapp.db");
    }

    #[test]
    fn test_open_target_uses_bare_name_only_in_cwd() {
        let cwd = Path::new("/srv/app");
        let here = ConnectionInfo::relative_to("myapp.db", cwd.join("myapp.db"), Some(cwd));
        assert_eq!(here.open_target, "myapp.db");

        let elsewhere = ConnectionInfo::relative_to(
            "myapp.db",
            PathBuf::from("/var/lib/app/myapp.db"),
            Some(cwd),
        );
        assert_eq!(elsewhere.open_target, "/var/lib/app/myapp.db");

        let unknown = ConnectionInfo::relative_to("myapp.db", cwd.join("myapp.db"), None);
        assert_eq!(unknown.open_target, "/srv/app/myapp.db");
    }

    #[test]
    fn test_connection_file_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_connection_file(dir.path(), &sample_info()).unwrap();
        assert_eq!(path, dir.path().join(CONNECTION_FILE));

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "# SQLite connection methods:\n\
             # Rust: rusqlite::Connection::open(\"/srv/app/myapp.db\")\n\
             # Connection string: sqlite:////srv/app/myapp.db\n\
             # File path: /srv/app/myapp.db\n"
        );
    }

    #[test]
    fn test_env_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env_file(dir.path(), &sample_info()).unwrap();
        assert_eq!(path, dir.path().join("db_visualizer").join("sqlite.env"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "export SQLITE_DB=\"/srv/app/myapp.db\"\n"
        );

        // second write reuses the directory
        assert!(write_env_file(dir.path(), &sample_info()).is_ok());
    }

    #[test]
    fn test_unwritable_target_is_auxiliary_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = write_connection_file(&missing, &sample_info()).unwrap_err();
        assert!(matches!(err, Error::AuxiliaryWrite { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_summary_lists_statistics() {
        let report = BootstrapReport {
            existed: false,
            connection: sample_info(),
            stats: StoreStats {
                table_count: 3,
                app_info_count: 4,
            },
            artifacts: Vec::new(),
            warnings: vec!["could not write env file".to_string()],
            sqlite_cli: true,
        };
        let summary = render_summary(&report);
        assert!(summary.contains("Location: /srv/app/myapp.db"));
        assert!(summary.contains("  Tables: 3"));
        assert!(summary.contains("  App info records: 4"));
        assert!(summary.contains("Database: myapp.db"));
        assert!(summary.contains("  sqlite3 /srv/app/myapp.db"));
        assert!(summary.contains("rusqlite::Connection::open(\"/srv/app/myapp.db\")"));
        assert!(summary.contains("Warning: could not write env file"));
        assert!(summary.ends_with("Script completed successfully."));
    }
}
