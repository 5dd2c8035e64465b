use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Label of a line on a chart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKey(pub String);

impl SeriesKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SeriesKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub year: i32,
    /// `None` is the missing marker.
    pub value: Option<f64>,
}

impl Point {
    pub fn new(year: i32, value: impl Into<Option<f64>>) -> Self {
        Self {
            year,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub key: SeriesKey,
    // Points are sorted by strictly increasing year
    points: Vec<Point>,
}

impl Series {
    /// Orders the points by year. When a year repeats, the point that comes
    /// last in `points` wins.
    pub fn from_points(key: impl Into<SeriesKey>, points: impl IntoIterator<Item = Point>) -> Self {
        let by_year: BTreeMap<i32, Option<f64>> = points
            .into_iter()
            .map(|point| (point.year, point.value))
            .collect();
        Self {
            key: key.into(),
            points: by_year
                .into_iter()
                .map(|(year, value)| Point { year, value })
                .collect(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, year: i32) -> Option<&Point> {
        self.points
            .binary_search_by_key(&year, |point| point.year)
            .ok()
            .map(|idx| &self.points[idx])
    }

    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|point| point.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|point| point.year)
    }

    /// Points carrying a value, skipping the missing ones.
    pub fn values(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|point| point.value.map(|value| (point.year, value)))
    }

    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values()
            .fold((0.0, 0usize), |(sum, count), (_, value)| (sum + value, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    pub fn value_range(&self) -> Option<Range<f64>> {
        let min = self.values().map(|(_, v)| v).min_by(|l, r| l.total_cmp(r))?;
        let max = self.values().map(|(_, v)| v).max_by(|l, r| l.total_cmp(r))?;
        Some(min..max)
    }

    /// Runs of consecutive points with a value; a missing value breaks the line.
    pub fn segments(&self) -> Vec<Vec<(i32, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.value {
                Some(value) => current.push((point.year, value)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => (),
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Year span and value range covered by a set of series, as chart bounds.
pub fn bounds(series: &[Series]) -> Option<(Range<i32>, Range<f64>)> {
    let first = series.iter().filter_map(Series::first_year).min()?;
    let last = series.iter().filter_map(Series::last_year).max()?;
    let ranges: Vec<Range<f64>> = series.iter().filter_map(Series::value_range).collect();
    let low = ranges.iter().map(|r| r.start).min_by(|l, r| l.total_cmp(r))?;
    let high = ranges.iter().map(|r| r.end).max_by(|l, r| l.total_cmp(r))?;
    Some((first..last, low..high))
}
