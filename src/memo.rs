use std::collections::HashMap;

use crate::config::SourceConfig;
use crate::error::Error;
use crate::fetch::Source;
use crate::series::Series;

/// In-process cache of normalized series keyed by source and config.
/// Entries are never evicted; only successful loads are stored.
#[derive(Debug, Default)]
pub struct Memo {
    entries: HashMap<Source, HashMap<SourceConfig, Vec<Series>>>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: &Source, config: &SourceConfig) -> Option<&[Series]> {
        self.entries
            .get(source)?
            .get(config)
            .map(Vec::as_slice)
    }

    /// Returns the cached series, or runs `load` and caches its result.
    pub fn get_or_load<F>(
        &mut self,
        source: &Source,
        config: &SourceConfig,
        load: F,
    ) -> Result<&[Series], Error>
    where
        F: FnOnce() -> Result<Vec<Series>, Error>,
    {
        if self.get(source, config).is_some() {
            tracing::debug!("cache hit for {}", source.location);
        } else {
            let series = load()?;
            self.entries
                .entry(source.clone())
                .or_default()
                .insert(config.clone(), series);
        }
        Ok(&self.entries[source][config])
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, FetchError};
    use crate::series::Point;
    use crate::table::TableFormat;
    use std::cell::Cell;

    fn source() -> Source {
        Source::new("https://example.org/GLB.csv", TableFormat::csv(1))
    }

    #[test]
    fn loader_runs_once_per_key() {
        let mut memo = Memo::new();
        let config = SourceConfig::columns("Year", ["J-D"]);
        let calls = Cell::new(0);
        let load = || {
            calls.set(calls.get() + 1);
            Ok(vec![Series::from_points("J-D", [Point::new(2020, 1.0)])])
        };

        assert_eq!(memo.get_or_load(&source(), &config, load).unwrap().len(), 1);
        assert_eq!(memo.get_or_load(&source(), &config, load).unwrap().len(), 1);
        assert_eq!(calls.get(), 1);

        let other = SourceConfig::columns("Year", ["DJF"]);
        memo.get_or_load(&source(), &other, load).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn configs_of_one_source_are_cached_apart() {
        let mut memo = Memo::new();
        let annual = SourceConfig::columns("Year", ["J-D"]);
        let winter = SourceConfig::columns("Year", ["DJF"]);

        memo.get_or_load(&source(), &annual, || {
            Ok(vec![Series::from_points("J-D", [Point::new(2020, 1.0)])])
        })
        .unwrap();
        memo.get_or_load(&source(), &winter, || {
            Ok(vec![Series::from_points("DJF", [Point::new(2020, 1.4)])])
        })
        .unwrap();

        let hit = memo
            .get_or_load(&source(), &annual, || panic!("loaded a cached entry"))
            .unwrap();
        assert_eq!(hit[0].key.as_str(), "J-D");
        assert_eq!(memo.get(&source(), &winter).unwrap()[0].key.as_str(), "DJF");
        assert!(memo.get(&Source::new("NH.csv", TableFormat::csv(1)), &annual).is_none());
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut memo = Memo::new();
        let config = SourceConfig::columns("Year", ["J-D"]);

        let err = memo
            .get_or_load(&source(), &config, || {
                Err(ConfigError::NoValueColumns.into())
            })
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(memo.get(&source(), &config).is_none());

        let err = memo
            .get_or_load(&source(), &config, || {
                Err(FetchError::MissingHeader {
                    location: String::from("GLB.csv"),
                }
                .into())
            })
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
        assert!(memo.is_empty());
        assert_eq!(memo.len(), 0);

        memo.get_or_load(&source(), &config, || Ok(Vec::new())).unwrap();
        assert!(memo.get(&source(), &config).is_some());
        memo.clear();
        assert!(memo.is_empty());
    }
}
