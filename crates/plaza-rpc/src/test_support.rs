//! In-memory RPC client for tests
//!
//! Implements the full procedure contract over an in-memory fixture so the
//! catalog, grid, and console crates can test their behavior without a
//! remote provider. Pagination, filtering, and sorting are performed here
//! the way the hosted procedures perform them server-side.

use std::cmp::Ordering;
use std::collections::VecDeque;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use plaza_core::{ColumnDescriptor, FunctionDescriptor, IndexDescriptor, PlazaError, Result, TableDescriptor};
use serde_json::{json, Map as JsonMap, Value as JsonValue};

use crate::{procedures, RpcClient};

/// One fixture table: descriptors plus raw JSON rows
#[derive(Debug, Clone)]
pub struct MockTable {
    pub descriptor: TableDescriptor,
    pub columns: Vec<ColumnDescriptor>,
    pub indexes: Vec<IndexDescriptor>,
    pub rows: Vec<JsonMap<String, JsonValue>>,
}

impl MockTable {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        let name = name.into();
        Self {
            descriptor: TableDescriptor {
                name,
                row_count: Some(0),
                size: Some("8 kB".to_string()),
                description: None,
            },
            columns,
            indexes: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<JsonValue>) -> Self {
        self.rows = rows
            .into_iter()
            .filter_map(|r| match r {
                JsonValue::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.descriptor.row_count = Some(self.rows.len() as i64);
        self
    }

    pub fn with_indexes(mut self, indexes: Vec<IndexDescriptor>) -> Self {
        self.indexes = indexes;
        self
    }

    fn primary_key(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.is_primary_key)
            .map(|c| c.name.as_str())
    }
}

struct MockState {
    tables: IndexMap<String, MockTable>,
    functions: Vec<FunctionDescriptor>,
    sql_results: VecDeque<std::result::Result<JsonValue, String>>,
    fail_next: Option<String>,
    next_id: i64,
    calls: Vec<String>,
}

/// In-memory `RpcClient` implementation
pub struct MockRpcClient {
    state: Mutex<MockState>,
}

impl Default for MockRpcClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRpcClient {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                tables: IndexMap::new(),
                functions: Vec::new(),
                sql_results: VecDeque::new(),
                fail_next: None,
                next_id: 1000,
                calls: Vec::new(),
            }),
        }
    }

    pub fn with_table(self, table: MockTable) -> Self {
        self.state
            .lock()
            .tables
            .insert(table.descriptor.name.clone(), table);
        self
    }

    pub fn with_function(self, function: FunctionDescriptor) -> Self {
        self.state.lock().functions.push(function);
        self
    }

    /// Queue a payload for the next `exec_sql` call
    pub fn queue_sql_result(&self, payload: JsonValue) {
        self.state.lock().sql_results.push_back(Ok(payload));
    }

    /// Queue a provider error for the next `exec_sql` call
    pub fn queue_sql_error(&self, message: impl Into<String>) {
        self.state.lock().sql_results.push_back(Err(message.into()));
    }

    /// Make the next invocation of any procedure fail with this message
    pub fn fail_next_call(&self, message: impl Into<String>) {
        self.state.lock().fail_next = Some(message.into());
    }

    /// Procedure names invoked so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    /// Current row count of a fixture table
    pub fn row_count(&self, table: &str) -> usize {
        self.state
            .lock()
            .tables
            .get(table)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }
}

fn arg_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| PlazaError::Rpc(format!("missing argument {}", key)))
}

fn arg_u64(args: &JsonValue, key: &str) -> Result<u64> {
    args.get(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| PlazaError::Rpc(format!("missing argument {}", key)))
}

fn compare_cells(a: &JsonValue, b: &JsonValue) -> Ordering {
    match (a, b) {
        (JsonValue::Null, JsonValue::Null) => Ordering::Equal,
        (JsonValue::Null, _) => Ordering::Less,
        (_, JsonValue::Null) => Ordering::Greater,
        (JsonValue::Number(x), JsonValue::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}

fn row_matches(row: &JsonMap<String, JsonValue>, term: &str) -> bool {
    let needle = term.to_lowercase();
    row.values().any(|v| {
        let text = match v {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        text.to_lowercase().contains(&needle)
    })
}

impl MockState {
    fn table(&self, name: &str) -> Result<&MockTable> {
        self.tables
            .get(name)
            .ok_or_else(|| PlazaError::Rpc(format!("relation \"{}\" does not exist", name)))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut MockTable> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| PlazaError::Rpc(format!("relation \"{}\" does not exist", name)))
    }

    fn table_data(&self, args: &JsonValue) -> Result<JsonValue> {
        let table = self.table(arg_str(args, "table_name")?)?;
        let page = arg_u64(args, "page")?.max(1) as usize;
        let page_size = arg_u64(args, "page_size")? as usize;
        let search = args.get("search_term").and_then(|v| v.as_str()).unwrap_or("");
        let sort_column = args.get("sort_column").and_then(|v| v.as_str());
        let descending = args.get("sort_direction").and_then(|v| v.as_str()) == Some("desc");

        let mut rows: Vec<&JsonMap<String, JsonValue>> = table
            .rows
            .iter()
            .filter(|row| search.is_empty() || row_matches(row, search))
            .collect();

        if let Some(column) = sort_column {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(
                    a.get(column).unwrap_or(&JsonValue::Null),
                    b.get(column).unwrap_or(&JsonValue::Null),
                );
                if descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let total_count = rows.len() as u64;
        let start = (page - 1).saturating_mul(page_size).min(rows.len());
        let end = start.saturating_add(page_size).min(rows.len());
        let page_rows: Vec<JsonValue> = rows[start..end]
            .iter()
            .map(|r| JsonValue::Object((*r).clone()))
            .collect();

        Ok(json!({ "rows": page_rows, "total_count": total_count }))
    }

    fn insert_record(&mut self, args: &JsonValue) -> Result<JsonValue> {
        let table_name = arg_str(args, "table_name")?.to_string();
        let data = args
            .get("data")
            .and_then(|v| v.as_object())
            .ok_or_else(|| PlazaError::Rpc("missing argument data".to_string()))?
            .clone();
        let id = self.next_id;
        self.next_id += 1;

        let table = self.table_mut(&table_name)?;
        let mut row = data;
        for column in &table.columns {
            let missing = row
                .get(&column.name)
                .map(|v| v.is_null())
                .unwrap_or(true);
            if missing && column.is_generated() && column.is_primary_key {
                row.insert(column.name.clone(), json!(id));
            } else if missing && !column.nullable && column.default_value.is_none() {
                return Err(PlazaError::Rpc(format!(
                    "null value in column \"{}\" violates not-null constraint",
                    column.name
                )));
            }
        }
        table.rows.push(row.clone());
        table.descriptor.row_count = Some(table.rows.len() as i64);
        Ok(JsonValue::Object(row))
    }

    fn update_record(&mut self, args: &JsonValue) -> Result<JsonValue> {
        let table_name = arg_str(args, "table_name")?.to_string();
        let id = args
            .get("id")
            .cloned()
            .ok_or_else(|| PlazaError::Rpc("missing argument id".to_string()))?;
        let data = args
            .get("data")
            .and_then(|v| v.as_object())
            .ok_or_else(|| PlazaError::Rpc("missing argument data".to_string()))?
            .clone();

        let table = self.table_mut(&table_name)?;
        let pk = table
            .primary_key()
            .ok_or_else(|| PlazaError::Rpc(format!("table \"{}\" has no primary key", table_name)))?
            .to_string();

        let row = table
            .rows
            .iter_mut()
            .find(|r| r.get(&pk) == Some(&id))
            .ok_or_else(|| PlazaError::Rpc(format!("record {} does not exist", id)))?;
        // Whole-row replacement, as the procedure contract specifies
        *row = data;
        row.insert(pk, id);
        Ok(JsonValue::Object(row.clone()))
    }

    fn delete_record(&mut self, args: &JsonValue) -> Result<JsonValue> {
        let table_name = arg_str(args, "table_name")?.to_string();
        let id = args
            .get("id")
            .cloned()
            .ok_or_else(|| PlazaError::Rpc("missing argument id".to_string()))?;

        let table = self.table_mut(&table_name)?;
        let pk = match table.primary_key() {
            Some(pk) => pk.to_string(),
            None => return Ok(JsonValue::Bool(false)),
        };

        let before = table.rows.len();
        table.rows.retain(|r| r.get(&pk) != Some(&id));
        table.descriptor.row_count = Some(table.rows.len() as i64);
        // Logical failure is a `false`, not an error
        Ok(JsonValue::Bool(table.rows.len() < before))
    }
}

#[async_trait]
impl RpcClient for MockRpcClient {
    async fn invoke(&self, procedure: &str, args: JsonValue) -> Result<JsonValue> {
        let mut state = self.state.lock();
        if let Some(message) = state.fail_next.take() {
            return Err(PlazaError::Rpc(message));
        }
        state.calls.push(procedure.to_string());

        match procedure {
            procedures::GET_ALL_TABLES => {
                let tables: Vec<_> = state.tables.values().map(|t| &t.descriptor).collect();
                Ok(serde_json::to_value(tables)?)
            }
            procedures::GET_TABLE_STRUCTURE => {
                let table = state.table(arg_str(&args, "table_name")?)?;
                Ok(serde_json::to_value(&table.columns)?)
            }
            procedures::GET_TABLE_INDEXES => {
                let table = state.table(arg_str(&args, "table_name")?)?;
                Ok(serde_json::to_value(&table.indexes)?)
            }
            procedures::GET_ALL_FUNCTIONS => Ok(serde_json::to_value(&state.functions)?),
            procedures::GET_TABLE_DATA => state.table_data(&args),
            procedures::INSERT_TABLE_RECORD => state.insert_record(&args),
            procedures::UPDATE_TABLE_RECORD => state.update_record(&args),
            procedures::DELETE_TABLE_RECORD => state.delete_record(&args),
            procedures::EXEC_SQL => match state.sql_results.pop_front() {
                Some(Ok(payload)) => Ok(payload),
                Some(Err(message)) => Err(PlazaError::Rpc(message)),
                None => Ok(JsonValue::Null),
            },
            other => Err(PlazaError::Rpc(format!(
                "function {} does not exist",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn widgets_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor {
                name: "id".to_string(),
                data_type: "integer".to_string(),
                nullable: false,
                default_value: Some("nextval('widgets_id_seq'::regclass)".to_string()),
                is_primary_key: true,
                foreign_key: None,
            },
            ColumnDescriptor {
                name: "name".to_string(),
                data_type: "text".to_string(),
                nullable: false,
                default_value: None,
                is_primary_key: false,
                foreign_key: None,
            },
        ]
    }

    fn widgets(rows: usize) -> MockTable {
        MockTable::new("widgets", widgets_columns()).with_rows(
            (1..=rows)
                .map(|i| json!({"id": i, "name": format!("widget {:02}", i)}))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_table_data_pages_and_totals() {
        let client = MockRpcClient::new().with_table(widgets(23));
        let page = client
            .invoke(
                procedures::GET_TABLE_DATA,
                json!({"table_name": "widgets", "page": 3, "page_size": 10, "search_term": "", "sort_column": "name", "sort_direction": "asc"}),
            )
            .await
            .unwrap();
        assert_eq!(page["total_count"], json!(23));
        assert_eq!(page["rows"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_not_an_error() {
        let client = MockRpcClient::new().with_table(widgets(23));
        let page = client
            .invoke(
                procedures::GET_TABLE_DATA,
                json!({"table_name": "widgets", "page": 4, "page_size": 10, "search_term": ""}),
            )
            .await
            .unwrap();
        assert_eq!(page["rows"].as_array().unwrap().len(), 0);
        assert_eq!(page["total_count"], json!(23));
    }

    #[tokio::test]
    async fn test_insert_enforces_not_null() {
        let client = MockRpcClient::new().with_table(widgets(1));
        let err = client
            .invoke(
                procedures::INSERT_TABLE_RECORD,
                json!({"table_name": "widgets", "data": {}}),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not-null constraint"));
        assert_eq!(client.row_count("widgets"), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_logical_failure_as_false() {
        let client = MockRpcClient::new().with_table(widgets(2));
        let first = client
            .invoke(
                procedures::DELETE_TABLE_RECORD,
                json!({"table_name": "widgets", "id": 1}),
            )
            .await
            .unwrap();
        assert_eq!(first, json!(true));

        let second = client
            .invoke(
                procedures::DELETE_TABLE_RECORD,
                json!({"table_name": "widgets", "id": 1}),
            )
            .await
            .unwrap();
        assert_eq!(second, json!(false));
        assert_eq!(client.row_count("widgets"), 1);
    }
}
