//! Table grid controller
//!
//! Orchestrates the structure fetch and the paginated data fetch for the
//! selected table. Every fetch is stamped with a monotonic sequence number;
//! a response arriving after a newer request was issued is dropped instead
//! of overwriting newer state.

use std::sync::Arc;

use plaza_catalog::{CatalogClient, RowIdentity};
use plaza_core::{ColumnDescriptor, PageResult, PlazaError, Record, Result};
use plaza_rpc::{procedures, RpcClient};
use serde_json::Value as JsonValue;

use crate::GridQuery;

/// One stamped fetch, ready to execute
#[derive(Debug, Clone)]
pub struct FetchRequest {
    seq: u64,
    page_size: usize,
    args: JsonValue,
}

impl FetchRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A settled fetch carrying its stamp
#[derive(Debug, Clone)]
pub struct FetchResponse {
    seq: u64,
    page: PageResult,
}

/// Controller for one table's grid
pub struct GridController {
    rpc: Arc<dyn RpcClient>,
    catalog: CatalogClient,
    table: Option<String>,
    columns: Vec<ColumnDescriptor>,
    identity: Option<RowIdentity>,
    query: GridQuery,
    /// Stamp of the newest issued fetch
    seq: u64,
    page: Option<PageResult>,
}

impl GridController {
    pub fn new(rpc: Arc<dyn RpcClient>) -> Self {
        Self {
            catalog: CatalogClient::new(rpc.clone()),
            rpc,
            table: None,
            columns: Vec::new(),
            identity: None,
            query: GridQuery::new(),
            seq: 0,
            page: None,
        }
    }

    /// Select a table: fetch its structure, resolve the row identity from
    /// that very structure fetch, reset the query state, and load page 1.
    #[tracing::instrument(skip(self))]
    pub async fn open_table(&mut self, table: &str) -> Result<()> {
        let columns = self.catalog.table_structure(table).await?;
        // Identity must come from the structure just fetched, never from a
        // previous table's columns.
        self.identity = RowIdentity::resolve(&columns);
        self.columns = columns;
        self.table = Some(table.to_string());
        self.query = GridQuery::new().with_page_sizes(self.query.page_sizes().to_vec());
        self.page = None;
        self.refresh().await?;
        Ok(())
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Row identity discovered by the latest structure fetch, if any
    pub fn identity(&self) -> Option<&RowIdentity> {
        self.identity.as_ref()
    }

    pub fn query(&self) -> &GridQuery {
        &self.query
    }

    /// Mutable query state, for callers that batch state changes before
    /// stamping their own fetch instead of using the one-shot setters
    pub fn query_mut(&mut self) -> &mut GridQuery {
        &mut self.query
    }

    /// Most recently applied page
    pub fn page(&self) -> Option<&PageResult> {
        self.page.as_ref()
    }

    /// Change the search term and re-fetch
    pub async fn set_search(&mut self, term: impl Into<String>) -> Result<()> {
        self.query.set_search(term);
        self.refresh().await.map(|_| ())
    }

    /// Navigate to a page and re-fetch
    pub async fn set_page(&mut self, page: u64) -> Result<()> {
        self.query.set_page(page);
        self.refresh().await.map(|_| ())
    }

    /// Change the page size and re-fetch. Rejected sizes are a no-op.
    pub async fn set_page_size(&mut self, size: usize) -> Result<()> {
        if self.query.set_page_size(size) {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Click a column header and re-fetch
    pub async fn toggle_sort(&mut self, column: &str) -> Result<()> {
        self.query.toggle_sort(column);
        self.refresh().await.map(|_| ())
    }

    /// Stamp a fetch against the current query state
    pub fn stamp_fetch(&mut self) -> Result<FetchRequest> {
        let table = self
            .table
            .as_deref()
            .ok_or_else(|| PlazaError::Grid("no table selected".to_string()))?;
        self.seq += 1;
        Ok(FetchRequest {
            seq: self.seq,
            page_size: self.query.page_size(),
            args: self.query.as_args(table),
        })
    }

    /// Execute a stamped fetch. Separate from `apply` so callers (and the
    /// out-of-order tests) can settle requests in any order.
    #[tracing::instrument(skip(self, request), fields(seq = request.seq))]
    pub async fn execute(&self, request: &FetchRequest) -> Result<FetchResponse> {
        let payload = self
            .rpc
            .invoke(procedures::GET_TABLE_DATA, request.args.clone())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "data fetch failed");
                e
            })?;

        let rows = payload
            .get("rows")
            .and_then(|v| v.as_array())
            .map(|rows| rows.iter().cloned().map(Record::from_json).collect())
            .unwrap_or_default();
        let total_count = payload
            .get("total_count")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        // Page math follows the size the request was stamped with, not
        // whatever the query holds by the time the response settles.
        Ok(FetchResponse {
            seq: request.seq,
            page: PageResult::new(rows, total_count, request.page_size),
        })
    }

    /// Apply a settled fetch. Returns false when the response is stale,
    /// i.e. a newer fetch was issued after this one; stale responses leave
    /// the grid untouched.
    pub fn apply(&mut self, response: FetchResponse) -> bool {
        if response.seq < self.seq {
            tracing::debug!(
                seq = response.seq,
                latest = self.seq,
                "dropping stale fetch response"
            );
            return false;
        }
        self.page = Some(response.page);
        true
    }

    /// Stamp, execute, and apply one fetch for the current state
    pub async fn refresh(&mut self) -> Result<bool> {
        let request = self.stamp_fetch()?;
        let response = self.execute(&request).await?;
        Ok(self.apply(response))
    }
}
