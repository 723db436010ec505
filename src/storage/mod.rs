pub mod sqlite;

pub use sqlite::SqliteStorage;

use crate::model::{CleanTable, StorageError};
use tracing::info;

/// Persists the cleaned table, replacing any prior contents of `table_name`.
///
/// The connection lives only for the duration of this call and is released
/// on every path, including errors.
pub fn save_to_db(table: &CleanTable, table_name: &str, db_path: &str) -> Result<(), StorageError> {
    info!("Saving {} rows into table '{table_name}' at {db_path}", table.rows.len());
    let mut storage = SqliteStorage::new(db_path)?;
    storage.replace_table(table_name, table)?;
    info!("Data saved successfully.");
    Ok(())
}
