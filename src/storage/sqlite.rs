use crate::model::{CleanTable, StorageError};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (and creates if absent) the database file, creating its parent
    /// directory first.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    /// Drops and recreates `table_name` with the given rows, all inside one
    /// transaction. Replace, never append.
    ///
    /// Column names come from the standardizer and the table name from config,
    /// so both are safe to splice into SQL.
    pub fn replace_table(
        &mut self,
        table_name: &str,
        table: &CleanTable,
    ) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;

        tx.execute(&format!("DROP TABLE IF EXISTS {table_name}"), [])?;

        let mut ddl_columns = vec![
            "data TEXT NOT NULL".to_string(),
            "semana_do_mes INTEGER NOT NULL".to_string(),
        ];
        ddl_columns.extend(table.columns.iter().map(|c| format!("{c} REAL NOT NULL")));
        tx.execute(
            &format!("CREATE TABLE {table_name} ({})", ddl_columns.join(", ")),
            [],
        )?;

        let mut insert_columns = vec!["data".to_string(), "semana_do_mes".to_string()];
        insert_columns.extend(table.columns.iter().cloned());
        let placeholders = (1..=insert_columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {table_name} ({}) VALUES ({placeholders})",
            insert_columns.join(", ")
        );

        {
            let mut stmt = tx.prepare(&sql)?;
            for row in &table.rows {
                let mut params = Vec::with_capacity(2 + row.values.len());
                params.push(Value::Text(row.data.clone()));
                params.push(Value::Integer(i64::from(row.semana_do_mes)));
                params.extend(row.values.iter().map(|v| Value::Real(*v)));
                stmt.execute(params_from_iter(params))?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}
