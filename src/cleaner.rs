// Gap filling, date enrichment and validation of the fetched table
use crate::config::TickerAlias;
use crate::model::{CleanError, CleanRow, CleanTable, PriceTable};
use crate::standardizer::standardize_columns;
use chrono::{Datelike, NaiveDate};
use tracing::info;

/// Buckets a calendar day into a week of the month, 1..=5.
pub fn week_of_month(date: NaiveDate) -> u8 {
    ((date.day() - 1) / 7 + 1) as u8
}

/// Forward-fills then backward-fills every column in place.
///
/// Assumes price continuity across non-trading gaps. A column with no known
/// value at all stays empty and is rejected later by validation.
pub fn fill_missing_values(table: &mut PriceTable) {
    for column in &mut table.columns {
        let mut last = None;
        for value in &mut column.values {
            match value {
                Some(v) => last = Some(*v),
                None => *value = last,
            }
        }

        let mut next = None;
        for value in column.values.iter_mut().rev() {
            match value {
                Some(v) => next = Some(*v),
                None => *value = next,
            }
        }
    }
}

/// Runs the cleaning steps in their contractual order:
/// fill -> date-enrich -> standardize-names -> validate.
///
/// Week-of-month is computed from the native date before it is rendered as a
/// string. Any cell still missing after the fill step is a fatal
/// `CleanError::MissingValues`.
pub fn clean_data(table: PriceTable, aliases: &[TickerAlias]) -> Result<CleanTable, CleanError> {
    info!("Cleaning and standardizing fetched data...");

    let mut table = table;
    fill_missing_values(&mut table);

    let columns = standardize_columns(&table.column_names(), aliases);

    let mut missing_columns = Vec::new();
    let mut missing_cells = 0usize;
    for (column, name) in table.columns.iter().zip(&columns) {
        let gaps = column.values.iter().filter(|v| v.is_none()).count();
        if gaps > 0 {
            missing_columns.push(name.clone());
            missing_cells += gaps;
        }
    }
    if !missing_columns.is_empty() {
        return Err(CleanError::MissingValues {
            columns: missing_columns,
            cells: missing_cells,
        });
    }

    let rows = table
        .dates
        .iter()
        .enumerate()
        .map(|(i, date)| CleanRow {
            data: date.format("%Y-%m-%d").to_string(),
            semana_do_mes: week_of_month(*date),
            values: table
                .columns
                .iter()
                .map(|c| c.values[i].unwrap_or(f64::NAN))
                .collect(),
        })
        .collect();

    let clean = CleanTable { columns, rows };
    info!(
        "Cleaning done: {} rows, columns: data, semana_do_mes, {}",
        clean.rows.len(),
        clean.columns.join(", ")
    );
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceColumn;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(dates: Vec<NaiveDate>, columns: Vec<(&str, Vec<Option<f64>>)>) -> PriceTable {
        PriceTable {
            dates,
            columns: columns
                .into_iter()
                .map(|(name, values)| PriceColumn {
                    name: name.into(),
                    values,
                })
                .collect(),
        }
    }

    #[test]
    fn forward_fill_propagates_last_known_value() {
        let mut t = table(
            vec![date(2024, 3, 4), date(2024, 3, 5), date(2024, 3, 6)],
            vec![("close_a", vec![Some(10.0), None, None])],
        );
        fill_missing_values(&mut t);
        assert_eq!(t.columns[0].values, vec![Some(10.0), Some(10.0), Some(10.0)]);
    }

    #[test]
    fn backward_fill_resolves_leading_gaps() {
        let mut t = table(
            vec![date(2024, 3, 4), date(2024, 3, 5), date(2024, 3, 6)],
            vec![("close_a", vec![None, None, Some(7.5)])],
        );
        fill_missing_values(&mut t);
        assert_eq!(t.columns[0].values, vec![Some(7.5), Some(7.5), Some(7.5)]);
    }

    #[test]
    fn fully_missing_column_stays_missing() {
        let mut t = table(
            vec![date(2024, 3, 4), date(2024, 3, 5)],
            vec![("close_a", vec![None, None])],
        );
        fill_missing_values(&mut t);
        assert_eq!(t.columns[0].values, vec![None, None]);
    }

    #[test]
    fn week_of_month_boundaries() {
        for day in 1..=7 {
            assert_eq!(week_of_month(date(2024, 1, day)), 1);
        }
        for day in 8..=14 {
            assert_eq!(week_of_month(date(2024, 1, day)), 2);
        }
        for day in 29..=31 {
            assert_eq!(week_of_month(date(2024, 1, day)), 5);
        }
    }

    #[test]
    fn clean_data_fills_enriches_and_standardizes() {
        let aliases = vec![TickerAlias {
            symbol: "^BVSP".into(),
            friendly_name: "ibovespa".into(),
        }];
        let t = table(
            vec![date(2024, 3, 4), date(2024, 3, 5), date(2024, 3, 12)],
            vec![("close_^bvsp", vec![Some(1.0), None, Some(3.0)])],
        );

        let clean = clean_data(t, &aliases).unwrap();
        assert_eq!(clean.columns, vec!["close_ibovespa"]);
        assert_eq!(
            clean.rows[0],
            CleanRow {
                data: "2024-03-04".into(),
                semana_do_mes: 1,
                values: vec![1.0],
            }
        );
        // gap filled forward from the 4th
        assert_eq!(clean.rows[1].values, vec![1.0]);
        assert_eq!(clean.rows[2].semana_do_mes, 2);
    }

    #[test]
    fn residual_missing_values_are_fatal_and_named() {
        let t = table(
            vec![date(2024, 3, 4), date(2024, 3, 5)],
            vec![
                ("close_a", vec![Some(1.0), Some(2.0)]),
                ("close_b", vec![None, None]),
            ],
        );

        match clean_data(t, &[]) {
            Err(CleanError::MissingValues { columns, cells }) => {
                assert_eq!(columns, vec!["close_b"]);
                assert_eq!(cells, 2);
            }
            other => panic!("expected MissingValues, got {other:?}"),
        }
    }
}
