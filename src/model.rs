// Core structs: price tables flowing between pipeline stages, plus per-stage errors
use chrono::NaiveDate;
use thiserror::Error;

/// Daily price fields retained from the provider. Adjusted close and volume
/// are dropped at parse time and never reach a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Open, Field::High, Field::Low, Field::Close];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Open => "open",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
        }
    }
}

/// Column tag of a freshly fetched table.
///
/// A multi-instrument fetch produces `(field, symbol)` keyed columns; a
/// single-instrument fetch collapses to field-only keys, which flattening
/// re-keys with the one requested symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    Field(Field),
    FieldAndSymbol(Field, String),
}

#[derive(Debug, Clone)]
pub struct RawColumn {
    pub key: ColumnKey,
    pub values: Vec<Option<f64>>,
}

/// Fetcher output: rows indexed by date, columns tagged by `ColumnKey`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    /// Flattens tagged column keys into single-level lowercase names.
    ///
    /// `("close", "AAA")` becomes `"close_aaa"`. Field-only keys (single
    /// instrument fetch) are re-keyed with `single_symbol` so the output is
    /// always keyed by instrument.
    pub fn flatten(self, single_symbol: &str) -> PriceTable {
        let columns = self
            .columns
            .into_iter()
            .map(|col| {
                let name = match &col.key {
                    ColumnKey::Field(field) => {
                        format!("{}_{}", field.as_str(), single_symbol.to_lowercase())
                    }
                    ColumnKey::FieldAndSymbol(field, symbol) => {
                        format!("{}_{}", field.as_str(), symbol.to_lowercase())
                    }
                };
                PriceColumn {
                    name,
                    values: col.values,
                }
            })
            .collect();

        PriceTable {
            dates: self.dates,
            columns,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriceColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Flattened price table: one row per date, `None` cells mark provider gaps.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<PriceColumn>,
}

impl PriceTable {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// One persisted row: canonical date string, week-of-month, one value per
/// price column (same order as `CleanTable::columns`).
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub data: String,
    pub semana_do_mes: u8,
    pub values: Vec<f64>,
}

/// Cleaner output and persister input. Invariant: no missing cells.
#[derive(Debug, Clone, Default)]
pub struct CleanTable {
    pub columns: Vec<String>,
    pub rows: Vec<CleanRow>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("provider error {code}: {description}")]
    Provider { code: String, description: String },
    #[error("unexpected response shape: {0}")]
    BadResponse(String),
}

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("missing values remain after fill in columns {columns:?} ({cells} cells)")]
    MissingValues { columns: Vec<String>, cells: usize },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn flatten_joins_field_and_symbol_case_folded() {
        let table = RawTable {
            dates: vec![date(2024, 1, 2)],
            columns: vec![
                RawColumn {
                    key: ColumnKey::FieldAndSymbol(Field::Close, "AAA".into()),
                    values: vec![Some(1.0)],
                },
                RawColumn {
                    key: ColumnKey::FieldAndSymbol(Field::Close, "BBB".into()),
                    values: vec![Some(2.0)],
                },
            ],
        };

        let flat = table.flatten("AAA");
        assert_eq!(flat.column_names(), vec!["close_aaa", "close_bbb"]);
    }

    #[test]
    fn flatten_rekeys_single_instrument_columns() {
        let table = RawTable {
            dates: vec![date(2024, 1, 2)],
            columns: vec![RawColumn {
                key: ColumnKey::Field(Field::Close),
                values: vec![Some(1.0)],
            }],
        };

        let flat = table.flatten("PETR4.SA");
        assert_eq!(flat.column_names(), vec!["close_petr4.sa"]);
    }

    #[test]
    fn empty_table_is_empty() {
        assert!(RawTable::default().is_empty());
        assert!(PriceTable::default().is_empty());
    }
}
