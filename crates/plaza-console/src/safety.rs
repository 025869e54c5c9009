//! Destructive-statement advisory
//!
//! Parses the statement with a generic SQL dialect and flags operations
//! that deserve a confirmation prompt: DELETE or UPDATE without a WHERE
//! clause, DROP, and TRUNCATE. Advisory only; the console executes
//! whatever it is given, and a statement that fails to parse is simply
//! not checked.

use sqlparser::ast::{FromTable, Statement};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Types of destructive operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestructiveKind {
    /// DELETE without WHERE clause
    DeleteWithoutWhere,
    /// UPDATE without WHERE clause
    UpdateWithoutWhere,
    /// DROP statement
    Drop,
    /// TRUNCATE statement
    Truncate,
}

impl DestructiveKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DeleteWithoutWhere => "DELETE without WHERE",
            Self::UpdateWithoutWhere => "UPDATE without WHERE",
            Self::Drop => "DROP",
            Self::Truncate => "TRUNCATE",
        }
    }
}

/// A flagged operation requiring user confirmation
#[derive(Clone, Debug)]
pub struct DestructiveWarning {
    pub kind: DestructiveKind,
    /// The table or object being affected
    pub affected_object: String,
    /// Why this operation is considered risky
    pub reason: String,
}

/// Analyze a statement for operations worth a confirmation prompt
pub fn analyze_destructive(sql: &str) -> Option<DestructiveWarning> {
    tracing::trace!(sql_preview = %sql.chars().take(100).collect::<String>(), "analyzing SQL for destructive operations");

    let dialect = GenericDialect {};
    let Ok(statements) = Parser::parse_sql(&dialect, sql) else {
        tracing::debug!("failed to parse SQL, skipping destructive operation check");
        return None;
    };

    for statement in statements {
        match statement {
            Statement::Delete(delete) => {
                if delete.selection.is_none() {
                    let table_name = match &delete.from {
                        FromTable::WithFromKeyword(tables)
                        | FromTable::WithoutKeyword(tables) => tables
                            .first()
                            .map(|t| t.relation.to_string())
                            .unwrap_or_else(|| "unknown".to_string()),
                    };
                    return Some(DestructiveWarning {
                        kind: DestructiveKind::DeleteWithoutWhere,
                        affected_object: table_name.clone(),
                        reason: format!(
                            "This DELETE statement will remove ALL rows from table '{}'",
                            table_name
                        ),
                    });
                }
            }
            Statement::Update {
                table, selection, ..
            } => {
                if selection.is_none() {
                    let table_name = table.relation.to_string();
                    return Some(DestructiveWarning {
                        kind: DestructiveKind::UpdateWithoutWhere,
                        affected_object: table_name.clone(),
                        reason: format!(
                            "This UPDATE statement will modify ALL rows in table '{}'",
                            table_name
                        ),
                    });
                }
            }
            Statement::Drop {
                object_type, names, ..
            } => {
                let object_names = names
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Some(DestructiveWarning {
                    kind: DestructiveKind::Drop,
                    affected_object: object_names.clone(),
                    reason: format!(
                        "This DROP statement will permanently delete {} '{}'",
                        object_type, object_names
                    ),
                });
            }
            Statement::Truncate { table_names, .. } => {
                let table_names_str = table_names
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Some(DestructiveWarning {
                    kind: DestructiveKind::Truncate,
                    affected_object: table_names_str.clone(),
                    reason: format!(
                        "This TRUNCATE statement will remove ALL rows from table(s) '{}'",
                        table_names_str
                    ),
                });
            }
            _ => {}
        }
    }

    tracing::trace!("no destructive operations detected");
    None
}
