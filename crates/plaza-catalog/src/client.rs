//! Schema catalog client

use std::sync::Arc;

use plaza_core::{
    ColumnDescriptor, FunctionDescriptor, IndexDescriptor, PlazaError, Result, TableDescriptor,
};
use plaza_rpc::{procedures, RpcClient};
use serde_json::json;

/// Client for enumerating remote-database metadata.
///
/// One round-trip per call. Remote errors are wrapped with a fixed
/// human-readable prefix and re-thrown; callers surface them verbatim.
pub struct CatalogClient {
    rpc: Arc<dyn RpcClient>,
}

impl CatalogClient {
    pub fn new(rpc: Arc<dyn RpcClient>) -> Self {
        Self { rpc }
    }

    /// List every table the provider exposes
    #[tracing::instrument(skip(self))]
    pub async fn list_tables(&self) -> Result<Vec<TableDescriptor>> {
        let payload = self
            .rpc
            .invoke(procedures::GET_ALL_TABLES, json!({}))
            .await
            .map_err(|e| wrap("Failed to load tables", e))?;
        serde_json::from_value(payload).map_err(|e| wrap("Failed to load tables", e.into()))
    }

    /// Fetch the column descriptors of one table
    #[tracing::instrument(skip(self))]
    pub async fn table_structure(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let payload = self
            .rpc
            .invoke(
                procedures::GET_TABLE_STRUCTURE,
                json!({ "table_name": table }),
            )
            .await
            .map_err(|e| wrap("Failed to load table structure", e))?;
        serde_json::from_value(payload)
            .map_err(|e| wrap("Failed to load table structure", e.into()))
    }

    /// Fetch the index descriptors of one table
    #[tracing::instrument(skip(self))]
    pub async fn table_indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>> {
        let payload = self
            .rpc
            .invoke(procedures::GET_TABLE_INDEXES, json!({ "table_name": table }))
            .await
            .map_err(|e| wrap("Failed to load indexes", e))?;
        serde_json::from_value(payload).map_err(|e| wrap("Failed to load indexes", e.into()))
    }

    /// List every stored function the provider exposes
    #[tracing::instrument(skip(self))]
    pub async fn list_functions(&self) -> Result<Vec<FunctionDescriptor>> {
        let payload = self
            .rpc
            .invoke(procedures::GET_ALL_FUNCTIONS, json!({}))
            .await
            .map_err(|e| wrap("Failed to load functions", e))?;
        serde_json::from_value(payload).map_err(|e| wrap("Failed to load functions", e.into()))
    }
}

fn wrap(prefix: &str, err: PlazaError) -> PlazaError {
    tracing::error!(error = %err, "{}", prefix);
    PlazaError::Catalog(format!("{}: {}", prefix, err))
}

/// Filter an already-fetched table list client-side.
///
/// The criteria are explicit parameters: a free-text term matched
/// case-insensitively against name and description, and a name exclusion
/// set. No ambient state is consulted.
pub fn filter_tables<'a>(
    tables: &'a [TableDescriptor],
    search: &str,
    excluded: &[String],
) -> Vec<&'a TableDescriptor> {
    let needle = search.to_lowercase();
    tables
        .iter()
        .filter(|t| !excluded.iter().any(|x| x == &t.name))
        .filter(|t| {
            needle.is_empty()
                || t.name.to_lowercase().contains(&needle)
                || t.description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}
