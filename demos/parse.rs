use anomaly::{normalize, presets, DataSource, Fetcher, Location, Source, TableFormat};

/// Prints the mean anomaly of every series of a local GISTEMP file: a
/// `*.csv` tabledata file or a `graph.txt` land-ocean index.
fn main() -> miette::Result<()> {
    let file = std::env::args().nth(1).expect("Missing filename");
    println!("opening {file}");

    let (format, config) = if file.ends_with(".csv") {
        (TableFormat::csv(1), presets::annual_mean_config())
    } else {
        (TableFormat::whitespace(2), presets::land_ocean_config())
    };
    let source = Source::new(Location::Path(file.into()), format);

    let table = Fetcher::default().fetch(&source)?;
    for series in normalize(&table, &config)? {
        let missing = series.points().iter().filter(|p| p.value.is_none()).count();
        match series.mean() {
            Some(mean) => println!(
                "{}: mean anomaly {mean:.2} over {} years ({missing} missing)",
                series.key,
                series.len()
            ),
            None => println!("{}: no values", series.key),
        }
    }

    Ok(())
}
