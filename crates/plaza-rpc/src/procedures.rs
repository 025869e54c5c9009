//! Remote procedure names
//!
//! These names are part of the provider contract and must not be renamed.

pub const GET_ALL_TABLES: &str = "get_all_tables";
pub const GET_TABLE_STRUCTURE: &str = "get_table_structure";
pub const GET_TABLE_DATA: &str = "get_table_data";
pub const INSERT_TABLE_RECORD: &str = "insert_table_record";
pub const UPDATE_TABLE_RECORD: &str = "update_table_record";
pub const DELETE_TABLE_RECORD: &str = "delete_table_record";
pub const GET_ALL_FUNCTIONS: &str = "get_all_functions";
pub const GET_TABLE_INDEXES: &str = "get_table_indexes";
pub const EXEC_SQL: &str = "exec_sql";
