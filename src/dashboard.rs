use crate::config::SourceConfig;
use crate::error::{ConfigError, Error};
use crate::fetch::{DataSource, Source};
use crate::memo::Memo;
use crate::merge::merge;
use crate::normalize::normalize;
use crate::render::{ChartSpec, Renderer};
use crate::series::{Series, SeriesKey};

/// Where the series of a section come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    Single(Source),
    /// One source per region, merged into one series per label.
    Regions(Vec<(SeriesKey, Source)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub feed: Feed,
    pub config: SourceConfig,
    pub chart: ChartSpec,
}

/// An ordered list of charts. Each section is fetched, normalized and
/// rendered on its own: a failing section never stops the others.
#[derive(Debug, Default)]
pub struct Dashboard {
    sections: Vec<Section>,
    memo: Memo,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    /// Renders every section and returns their outcomes in section order.
    pub fn render<D, R>(&mut self, data: &D, renderer: &mut R) -> Vec<Result<(), Error>>
    where
        D: DataSource,
        R: Renderer,
    {
        let Self { sections, memo } = self;
        sections
            .iter()
            .map(|section| {
                let outcome = load(memo, data, &section.feed, &section.config).and_then(|series| {
                    renderer
                        .render(&section.chart, &series)
                        .map_err(|e| Error::Render(Box::new(e)))
                });
                if let Err(e) = &outcome {
                    tracing::warn!("skipping chart `{}`: {e}", section.chart.title);
                }
                outcome
            })
            .collect()
    }
}

fn load<D: DataSource>(
    memo: &mut Memo,
    data: &D,
    feed: &Feed,
    config: &SourceConfig,
) -> Result<Vec<Series>, Error> {
    match feed {
        Feed::Single(source) => Ok(fetch_normalized(memo, data, source, config)?.to_vec()),
        Feed::Regions(regions) => {
            check_regional(config)?;
            let mut sets = Vec::with_capacity(regions.len());
            for (label, source) in regions {
                let series = fetch_normalized(memo, data, source, config)?;
                sets.push((label.clone(), series.to_vec()));
            }
            Ok(merge(sets))
        }
    }
}

/// Each regional source must normalize to a single series, or `merge` would
/// fold several lines into one region.
fn check_regional(config: &SourceConfig) -> Result<(), ConfigError> {
    if let Some(entity) = &config.entity_column {
        return Err(ConfigError::AmbiguousRegion {
            series: format!("one per `{entity}` value"),
        });
    }
    if config.value_columns.len() > 1 {
        return Err(ConfigError::AmbiguousRegion {
            series: format!("one per column of {}", config.value_columns.join(", ")),
        });
    }
    Ok(())
}

fn fetch_normalized<'a, D: DataSource>(
    memo: &'a mut Memo,
    data: &D,
    source: &Source,
    config: &SourceConfig,
) -> Result<&'a [Series], Error> {
    memo.get_or_load(source, config, || {
        let table = data.fetch(source)?;
        Ok(normalize(&table, config)?)
    })
}
