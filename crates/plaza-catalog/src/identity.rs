//! Row identity resolution
//!
//! Edit and delete are keyed by whichever column the most recent structure
//! fetch flags as primary. The mutation procedures address a single id, so
//! identity resolution fails closed: no flagged primary key, or a composite
//! one, yields no identity and the editor stays disabled for that table.

use plaza_core::{CellValue, ColumnDescriptor, Record};

/// The column the client currently believes uniquely identifies a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIdentity {
    column: String,
}

impl RowIdentity {
    /// Resolve the identity column from a fetched column set.
    ///
    /// Returns `None` unless exactly one column is flagged primary. A table
    /// that merely happens to have a column named "id" gets no identity.
    pub fn resolve(columns: &[ColumnDescriptor]) -> Option<Self> {
        let mut flagged = columns.iter().filter(|c| c.is_primary_key);
        match (flagged.next(), flagged.next()) {
            (Some(column), None) => Some(Self {
                column: column.name.clone(),
            }),
            (Some(_), Some(_)) => {
                tracing::warn!("composite primary key, disabling row mutations");
                None
            }
            _ => {
                tracing::warn!("no primary key flagged, disabling row mutations");
                None
            }
        }
    }

    /// Name of the identity column
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Current identity value of a record, if the record carries the column
    pub fn value_of<'a>(&self, record: &'a Record) -> Option<&'a CellValue> {
        record.get(&self.column)
    }
}
