//! Catalog descriptor types
//!
//! Metadata about the remote database, fetched per navigation and never
//! mutated locally. Field names match the RPC payload shapes.

use serde::{Deserialize, Serialize};

/// Table-level metadata from `get_all_tables`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    /// Row-count estimate from provider statistics, not an exact COUNT(*)
    #[serde(default)]
    pub row_count: Option<i64>,
    /// On-disk size, already formatted by the provider (e.g. "128 kB")
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TableDescriptor {
    /// Row count for display, with a placeholder when unknown
    pub fn format_row_count(&self) -> String {
        self.row_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Size for display, with a placeholder when unknown
    pub fn format_size(&self) -> String {
        self.size.clone().unwrap_or_else(|| "-".to_string())
    }
}

/// Column-level metadata from `get_table_structure`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Declared type as a database-specific string (e.g. "timestamp with time zone")
    pub data_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub foreign_key: Option<ForeignKeyRef>,
}

impl ColumnDescriptor {
    /// Whether the provider fills this column itself (serial/identity or
    /// expression default). Such columns get no input field on insert.
    pub fn is_generated(&self) -> bool {
        self.default_value
            .as_deref()
            .map(|d| {
                let d = d.to_ascii_lowercase();
                d.starts_with("nextval(") || d.contains("generated") || d.starts_with("gen_random")
            })
            .unwrap_or(false)
    }
}

/// Foreign key reference carried on a column descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub table: String,
    pub column: String,
}

/// Index metadata from `get_table_indexes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDescriptor {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub is_unique: bool,
    /// Index access method (e.g. "btree", "gin")
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub size: Option<String>,
}

/// Stored routine kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    #[default]
    Function,
    Procedure,
    Aggregate,
    Window,
}

impl FunctionKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Function => "Function",
            Self::Procedure => "Procedure",
            Self::Aggregate => "Aggregate",
            Self::Window => "Window",
        }
    }
}

/// Stored function metadata from `get_all_functions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    /// Argument signature as one provider-formatted string
    #[serde(default)]
    pub arguments: String,
    #[serde(default)]
    pub return_type: String,
    /// Implementation language tag (e.g. "plpgsql", "sql")
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub kind: FunctionKind,
    #[serde(default)]
    pub description: Option<String>,
    /// Full source text, exactly as stored
    #[serde(default)]
    pub source: String,
}
