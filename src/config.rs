use bon::Builder;
use serde::{Deserialize, Serialize};

/// Per-dataset column roles and entity filters.
///
/// ```
/// use anomaly::SourceConfig;
///
/// let config = SourceConfig::builder()
///     .year_column("Year")
///     .value_columns(vec![String::from("Anomaly")])
///     .entity_column("Entity")
///     .exclude(vec![String::from("ocean")])
///     .allow(vec![String::from("World")])
///     .build();
/// assert!(config.keeps("World"));
/// assert!(!config.keeps("Atlantic Ocean"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder, Serialize, Deserialize)]
pub struct SourceConfig {
    #[builder(into)]
    pub year_column: String,
    pub value_columns: Vec<String>,
    /// Without an entity column every value column is its own series.
    #[builder(into)]
    #[serde(default)]
    pub entity_column: Option<String>,
    /// Entities whose lowercased name contains one of these are dropped.
    #[builder(default)]
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Entities kept whatever `exclude` says.
    #[builder(default)]
    #[serde(default)]
    pub allow: Vec<String>,
}

impl SourceConfig {
    /// A config for a table without an entity column.
    pub fn columns<I, S>(year_column: impl Into<String>, value_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            year_column: year_column.into(),
            value_columns: value_columns.into_iter().map(Into::into).collect(),
            entity_column: None,
            exclude: Vec::new(),
            allow: Vec::new(),
        }
    }

    pub fn is_allowed(&self, entity: &str) -> bool {
        let entity = entity.to_lowercase();
        self.allow.iter().any(|allowed| allowed.to_lowercase() == entity)
    }

    pub fn is_excluded(&self, entity: &str) -> bool {
        let entity = entity.to_lowercase();
        self.exclude
            .iter()
            .any(|keyword| entity.contains(&keyword.to_lowercase()))
    }

    /// Allow-list membership overrides exclusion.
    pub fn keeps(&self, entity: &str) -> bool {
        self.is_allowed(entity) || !self.is_excluded(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn owid() -> SourceConfig {
        SourceConfig::builder()
            .year_column("Year")
            .value_columns(vec![String::from("Anomaly")])
            .entity_column("Entity")
            .exclude(vec![String::from("OCEAN"), String::from("(")])
            .allow(vec![String::from("world")])
            .build()
    }

    #[rstest]
    #[case("World", true)]
    #[case("France", true)]
    #[case("Atlantic Ocean", false)]
    #[case("Micronesia (country)", false)]
    #[case("World Ocean", false)]
    fn entity_selection(#[case] entity: &str, #[case] kept: bool) {
        assert_eq!(owid().keeps(entity), kept);
    }

    #[test]
    fn allow_list_overrides_exclusion() {
        let mut config = owid();
        config.allow.push(String::from("Pacific Ocean"));
        assert!(config.is_excluded("Pacific Ocean"));
        assert!(config.keeps("PACIFIC OCEAN"));
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: SourceConfig =
            serde_json::from_str(r#"{ "year_column": "Year", "value_columns": ["J-D"] }"#).unwrap();
        assert_eq!(config, SourceConfig::columns("Year", ["J-D"]));
    }
}
