use std::collections::HashMap;

use crate::config::SourceConfig;
use crate::error::{ColumnRole, ConfigError};
use crate::series::{Point, Series, SeriesKey};
use crate::table::{Field, RawRow, Table};

/// Turns a table into year-ordered series, one per retained entity and value
/// column.
///
/// Malformed rows never fail the call: rows without a usable year or entity,
/// or too short to reach a value column, are dropped; values that aren't
/// numbers become missing points. The only error is a configured column that
/// isn't part of the table's header, in which case no series is produced.
///
/// Series come out in the order their entity first appears.
pub fn normalize(table: &Table, config: &SourceConfig) -> Result<Vec<Series>, ConfigError> {
    validate(table, config)?;

    let mut order: Vec<Option<String>> = Vec::new();
    let mut groups: HashMap<Option<String>, Vec<(i32, &RawRow)>> = HashMap::new();
    let mut dropped = 0;

    for row in &table.rows {
        let Some((entity, year)) = identify(row, config) else {
            dropped += 1;
            continue;
        };
        groups
            .entry(entity.clone())
            .or_insert_with(|| {
                order.push(entity);
                Vec::new()
            })
            .push((year, row));
    }

    if dropped > 0 {
        tracing::debug!("dropped {dropped} of {} rows", table.rows.len());
    }

    let mut series = Vec::new();
    for entity in order {
        if let Some(name) = &entity {
            if !config.keeps(name) {
                tracing::trace!("excluding entity {name}");
                continue;
            }
        }
        let rows = &groups[&entity];
        for column in &config.value_columns {
            let points = rows.iter().map(|(year, row)| {
                Point::new(*year, row.get(column).and_then(Field::as_value))
            });
            series.push(Series::from_points(
                series_key(entity.as_deref(), column, config),
                points,
            ));
        }
    }

    Ok(series)
}

fn validate(table: &Table, config: &SourceConfig) -> Result<(), ConfigError> {
    if config.value_columns.is_empty() {
        return Err(ConfigError::NoValueColumns);
    }

    let required = std::iter::once((ColumnRole::Year, &config.year_column))
        .chain(config.value_columns.iter().map(|c| (ColumnRole::Value, c)))
        .chain(config.entity_column.iter().map(|c| (ColumnRole::Entity, c)));
    for (role, column) in required {
        if !table.has_column(column) {
            return Err(ConfigError::MissingColumn {
                role,
                column: column.clone(),
                available: table.columns.clone(),
            });
        }
    }
    Ok(())
}

/// The entity and year of a row, or `None` if the row must be dropped.
fn identify(row: &RawRow, config: &SourceConfig) -> Option<(Option<String>, i32)> {
    let year = row.get(&config.year_column)?.as_year()?;
    if config.value_columns.iter().any(|c| row.get(c).is_none()) {
        return None;
    }
    let entity = match &config.entity_column {
        Some(column) => Some(row.get(column)?.as_name()?),
        None => None,
    };
    Some((entity, year))
}

fn series_key(entity: Option<&str>, column: &str, config: &SourceConfig) -> SeriesKey {
    match entity {
        None => SeriesKey::from(column),
        Some(entity) if config.value_columns.len() == 1 => SeriesKey::from(entity),
        Some(entity) => SeriesKey(format!("{entity} ({column})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableFormat;
    use pretty_assertions::assert_eq;

    fn owid_config() -> SourceConfig {
        SourceConfig::builder()
            .year_column("Year")
            .value_columns(vec![String::from("Anomaly")])
            .entity_column("Entity")
            .exclude(vec![String::from("ocean")])
            .build()
    }

    fn owid_table() -> Table {
        Table::parse(
            "Entity,Year,Anomaly
World,2020,1.0
Atlantic Ocean,2020,0.4
France,2019,0.9
World,2019,0.8
France,2020,1.3
World,2020,1.5
",
            &TableFormat::csv(0),
            "owid.csv",
        )
        .unwrap()
    }

    fn keys(series: &[Series]) -> Vec<&str> {
        series.iter().map(|s| s.key.as_str()).collect()
    }

    #[test]
    fn excluded_entities_are_dropped_in_first_seen_order() {
        let series = normalize(&owid_table(), &owid_config()).unwrap();
        assert_eq!(keys(&series), vec!["World", "France"]);
    }

    #[test]
    fn allow_list_keeps_excluded_entity() {
        let mut config = owid_config();
        config.exclude.push(String::from("world"));
        config.allow.push(String::from("World"));
        let series = normalize(&owid_table(), &config).unwrap();
        assert_eq!(keys(&series), vec!["World", "France"]);
    }

    #[test]
    fn later_row_wins_for_duplicate_year() {
        let series = normalize(&owid_table(), &owid_config()).unwrap();
        assert_eq!(
            series[0].points(),
            &[Point::new(2019, 0.8), Point::new(2020, 1.5)]
        );
    }

    #[test]
    fn sentinel_becomes_missing_point_and_processing_continues() {
        let table = Table::parse(
            "Land-Ocean: Global Means
Year,J-D
1880,-.17
1881,***
1882,-.10
",
            &TableFormat::csv(1),
            "GLB.csv",
        )
        .unwrap();
        let series = normalize(&table, &SourceConfig::columns("Year", ["J-D"])).unwrap();
        assert_eq!(keys(&series), vec!["J-D"]);
        assert_eq!(
            series[0].points(),
            &[
                Point::new(1880, -0.17),
                Point::new(1881, None),
                Point::new(1882, -0.10),
            ]
        );
    }

    #[test]
    fn malformed_rows_are_dropped() {
        let table = Table::parse(
            "Year No_Smoothing Lowess(5)
----------------------------
1880 -0.17 -0.10
18x1 -0.09 -0.13
1882 -0.11
1883 nope -0.17
",
            &TableFormat::whitespace(0),
            "graph.txt",
        )
        .unwrap();
        let config = SourceConfig::columns("Year", ["No_Smoothing", "Lowess(5)"]);
        let series = normalize(&table, &config).unwrap();

        assert_eq!(keys(&series), vec!["No_Smoothing", "Lowess(5)"]);
        assert_eq!(
            series[0].points(),
            &[Point::new(1880, -0.17), Point::new(1883, None)]
        );
        assert_eq!(
            series[1].points(),
            &[Point::new(1880, -0.10), Point::new(1883, -0.17)]
        );
    }

    #[test]
    fn blank_entity_rows_are_dropped() {
        let table = Table::parse(
            "Entity,Year,Anomaly\n,2020,1.0\nWorld,2020,1.1\n",
            &TableFormat::csv(0),
            "x",
        )
        .unwrap();
        let series = normalize(&table, &owid_config()).unwrap();
        assert_eq!(keys(&series), vec!["World"]);
    }

    #[test]
    fn several_value_columns_per_entity() {
        let table = Table::from_rows(vec![RawRow::from_iter([
            ("Entity", Field::from("World")),
            ("Year", Field::from(2020.0)),
            ("Land", Field::from(1.4)),
            ("Sea", Field::from(0.6)),
        ])]);
        let config = SourceConfig::builder()
            .year_column("Year")
            .value_columns(vec![String::from("Land"), String::from("Sea")])
            .entity_column("Entity")
            .build();
        let series = normalize(&table, &config).unwrap();
        assert_eq!(keys(&series), vec!["World (Land)", "World (Sea)"]);
    }

    #[test]
    fn unknown_year_column_is_a_config_error() {
        let mut config = owid_config();
        config.year_column = String::from("Annee");
        let err = normalize(&owid_table(), &config).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingColumn {
                role: ColumnRole::Year,
                column: String::from("Annee"),
                available: vec![
                    String::from("Entity"),
                    String::from("Year"),
                    String::from("Anomaly"),
                ],
            }
        );
    }

    #[test]
    fn unknown_entity_column_is_a_config_error() {
        let mut config = owid_config();
        config.entity_column = Some(String::from("Country"));
        assert!(matches!(
            normalize(&owid_table(), &config),
            Err(ConfigError::MissingColumn { role: ColumnRole::Entity, .. })
        ));
    }

    #[test]
    fn no_value_columns_is_a_config_error() {
        let config = SourceConfig::columns("Year", Vec::<String>::new());
        assert_eq!(
            normalize(&owid_table(), &config),
            Err(ConfigError::NoValueColumns)
        );
    }
}
