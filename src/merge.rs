use crate::series::{Point, Series, SeriesKey};

/// Combines series sets fetched separately (for instance one file per
/// hemisphere) into one series per region label.
///
/// Labels keep their first-seen order. Points of every input tagged with the
/// same label are concatenated in input order, then ordered by year with the
/// later point winning on a repeated year.
pub fn merge<L, I>(sets: I) -> Vec<Series>
where
    L: Into<SeriesKey>,
    I: IntoIterator<Item = (L, Vec<Series>)>,
{
    let mut regions: Vec<(SeriesKey, Vec<Point>)> = Vec::new();
    for (label, set) in sets {
        let label = label.into();
        let points = set.into_iter().flat_map(Series::into_points);
        match regions.iter_mut().find(|(key, _)| *key == label) {
            Some((_, existing)) => existing.extend(points),
            None => regions.push((label, points.collect())),
        }
    }

    regions
        .into_iter()
        .map(|(label, points)| Series::from_points(label, points))
        .collect()
}
