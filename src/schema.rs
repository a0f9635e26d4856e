//! Declarative description of the target schema.
//!
//! Tables and indexes are described as data and rendered to
//! `CREATE ... IF NOT EXISTS` statements. Adding a table or index means adding
//! an entry to [`target_schema`]; the convergence routine walks
//! [`Schema::objects`] without knowing what is in it.

use std::fmt;

/// Schema definition for the SQLite database
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// Every object to create, tables first, then indexes, both in declaration order.
    pub fn objects(&self) -> Vec<SchemaObject> {
        let tables = self.tables.iter().map(|table| SchemaObject {
            name: table.name.clone(),
            kind: ObjectKind::Table,
            definition: table.create_sql(),
        });
        let indexes = self.tables.iter().flat_map(|table| {
            table.indexes.iter().map(move |index| SchemaObject {
                name: index.name.clone(),
                kind: ObjectKind::Index,
                definition: index.create_sql(&table.name),
            })
        });
        tables.chain(indexes).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Table,
    Index,
}

impl ObjectKind {
    /// Value of `sqlite_master.type` for this kind of object
    pub fn catalog_type(self) -> &'static str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::Index => "index",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_type())
    }
}

/// A named schema object together with the statement that creates it if absent.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject {
    pub name: String,
    pub kind: ObjectKind,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| format!("    {}", column.to_sql()))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n)", self.name, columns)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
    pub default_value: Option<DefaultValue>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
            default_value: None,
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Column clause as it appears inside `CREATE TABLE`, constraints in declaration order.
    pub fn to_sql(&self) -> String {
        let mut parts = vec![self.name.clone(), self.data_type.to_string()];
        parts.extend(self.constraints.iter().map(ToString::to_string));
        if let Some(default) = &self.default_value {
            parts.push(format!("DEFAULT {}", default));
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
    Real,
    Blob,
    Timestamp,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Real => "REAL",
            DataType::Blob => "BLOB",
            DataType::Timestamp => "TIMESTAMP",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
    Unique,
    NotNull,
    /// Explicit `NULL`, documents that the column is optional
    Nullable,
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::AutoIncrement => "AUTOINCREMENT",
            ColumnConstraint::Unique => "UNIQUE",
            ColumnConstraint::NotNull => "NOT NULL",
            ColumnConstraint::Nullable => "NULL",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Text(String),
    Real(f64),
    Null,
    CurrentTimestamp,
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Integer(v) => write!(f, "{}", v),
            DefaultValue::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            DefaultValue::Real(v) => write!(f, "{}", v),
            DefaultValue::Null => f.write_str("NULL"),
            DefaultValue::CurrentTimestamp => f.write_str("CURRENT_TIMESTAMP"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexDefinition {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique: false,
        }
    }

    pub fn create_sql(&self, table: &str) -> String {
        format!(
            "CREATE {}INDEX IF NOT EXISTS {} ON {}({})",
            if self.unique { "UNIQUE " } else { "" },
            self.name,
            table,
            self.columns.join(", ")
        )
    }
}

fn id_column() -> ColumnDefinition {
    ColumnDefinition::new("id", DataType::Integer)
        .with_constraint(ColumnConstraint::PrimaryKey)
        .with_constraint(ColumnConstraint::AutoIncrement)
}

fn created_at_default_now() -> ColumnDefinition {
    ColumnDefinition::new("created_at", DataType::Timestamp)
        .with_default(DefaultValue::CurrentTimestamp)
}

/// Key/value bookkeeping records.
pub fn app_info_table() -> TableDefinition {
    TableDefinition::new("app_info")
        .with_column(id_column())
        .with_column(
            ColumnDefinition::new("key", DataType::Text)
                .with_constraint(ColumnConstraint::Unique)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(ColumnDefinition::new("value", DataType::Text))
        .with_column(created_at_default_now())
}

/// Sample users table, kept for existing databases that already carry it.
pub fn users_table() -> TableDefinition {
    TableDefinition::new("users")
        .with_column(id_column())
        .with_column(
            ColumnDefinition::new("username", DataType::Text)
                .with_constraint(ColumnConstraint::Unique)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(
            ColumnDefinition::new("email", DataType::Text)
                .with_constraint(ColumnConstraint::Unique)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(created_at_default_now())
}

/// To-do tasks. `created_at`/`updated_at` hold UTC ISO-8601 text such as
/// `2026-01-28T12:34:56Z` (see [`crate::time::now_utc_iso8601`]) and `completed`
/// holds 0 or 1.
pub fn tasks_table() -> TableDefinition {
    TableDefinition::new("tasks")
        .with_column(id_column())
        .with_column(
            ColumnDefinition::new("title", DataType::Text)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(
            ColumnDefinition::new("notes", DataType::Text)
                .with_constraint(ColumnConstraint::Nullable),
        )
        .with_column(
            ColumnDefinition::new("completed", DataType::Integer)
                .with_constraint(ColumnConstraint::NotNull)
                .with_default(DefaultValue::Integer(0)),
        )
        .with_column(
            ColumnDefinition::new("created_at", DataType::Text)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_column(
            ColumnDefinition::new("updated_at", DataType::Text)
                .with_constraint(ColumnConstraint::NotNull),
        )
        .with_index(IndexDefinition::new("idx_tasks_completed", &["completed"]))
        .with_index(IndexDefinition::new("idx_tasks_updated_at", &["updated_at"]))
}

/// The fixed schema every bootstrap converges to.
pub fn target_schema() -> Schema {
    Schema::new()
        .add_table(app_info_table())
        .add_table(users_table())
        .add_table(tasks_table())
}
