//! Record editor
//!
//! Turns a row into a mutation against the remote table, keyed by the
//! discovered row identity. Mutations are never optimistic: the grid is
//! only told to re-fetch after the round-trip succeeds, and a failed
//! round-trip raises no signal at all.

use std::sync::Arc;

use plaza_catalog::RowIdentity;
use plaza_core::{CellValue, ColumnDescriptor, PlazaError, Record, Result};
use plaza_rpc::{procedures, RpcClient};
use serde_json::json;

use crate::{is_temporal_type, RefetchSignal};

/// Input widget kind for one form field, inferred from the declared type
/// by substring match. Presentation guidance only; no value coercion
/// happens on this basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidget {
    Number,
    Checkbox,
    DateTime,
    Text,
}

/// Pick the input widget for a declared column type
pub fn widget_for(data_type: &str) -> FieldWidget {
    let lowered = data_type.to_lowercase();
    if lowered.contains("bool") {
        FieldWidget::Checkbox
    } else if is_temporal_type(&lowered) {
        FieldWidget::DateTime
    } else if ["int", "numeric", "decimal", "real", "double", "serial", "float"]
        .iter()
        .any(|t| lowered.contains(t))
    {
        FieldWidget::Number
    } else {
        FieldWidget::Text
    }
}

/// One field of the generated insert form
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub column: String,
    pub widget: FieldWidget,
    pub required: bool,
}

/// Build the insert form: one field per non-generated column
pub fn insert_form(columns: &[ColumnDescriptor]) -> Vec<FieldSpec> {
    columns
        .iter()
        .filter(|c| !c.is_generated())
        .map(|c| FieldSpec {
            column: c.name.clone(),
            widget: widget_for(&c.data_type),
            required: !c.nullable && c.default_value.is_none(),
        })
        .collect()
}

/// Editor for one table's rows
pub struct RecordEditor {
    rpc: Arc<dyn RpcClient>,
    table: String,
    identity: Option<RowIdentity>,
    refetch: RefetchSignal,
}

impl RecordEditor {
    pub fn new(
        rpc: Arc<dyn RpcClient>,
        table: impl Into<String>,
        identity: Option<RowIdentity>,
        refetch: RefetchSignal,
    ) -> Self {
        Self {
            rpc,
            table: table.into(),
            identity,
            refetch,
        }
    }

    /// Whether update/delete are available for this table
    pub fn can_mutate(&self) -> bool {
        self.identity.is_some()
    }

    fn identity(&self) -> Result<&RowIdentity> {
        self.identity.as_ref().ok_or_else(|| {
            PlazaError::Editor("row mutations are disabled: no primary key discovered".to_string())
        })
    }

    /// Insert a new row gathered from the generated form
    #[tracing::instrument(skip(self, record), fields(table = %self.table))]
    pub async fn insert(&self, record: Record) -> Result<()> {
        self.rpc
            .invoke(
                procedures::INSERT_TABLE_RECORD,
                json!({ "table_name": self.table, "data": record.to_json() }),
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "insert failed");
                e
            })?;
        self.refetch.request();
        Ok(())
    }

    /// Update one row, sending the entire edited record (not a diff),
    /// keyed by the row's current identity value
    #[tracing::instrument(skip(self, record), fields(table = %self.table))]
    pub async fn update(&self, id: &CellValue, record: Record) -> Result<()> {
        self.identity()?;
        self.rpc
            .invoke(
                procedures::UPDATE_TABLE_RECORD,
                json!({ "table_name": self.table, "id": id.to_json(), "data": record.to_json() }),
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "update failed");
                e
            })?;
        self.refetch.request();
        Ok(())
    }

    /// Delete one row by identity value. The caller is responsible for
    /// interactive confirmation before invoking this. The procedure
    /// reports logical failure as `false`, which has no further detail.
    #[tracing::instrument(skip(self), fields(table = %self.table))]
    pub async fn delete(&self, id: &CellValue) -> Result<()> {
        self.identity()?;
        let outcome = self
            .rpc
            .invoke(
                procedures::DELETE_TABLE_RECORD,
                json!({ "table_name": self.table, "id": id.to_json() }),
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "delete failed");
                e
            })?;

        if outcome.as_bool() == Some(true) {
            self.refetch.request();
            Ok(())
        } else {
            tracing::warn!("delete reported logical failure");
            Err(PlazaError::Editor("could not delete record".to_string()))
        }
    }
}
