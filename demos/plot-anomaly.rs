use anomaly::{normalize, presets, DataSource, Fetcher, Location, Renderer, Source, TableFormat};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

mod png_renderer;

use png_renderer::PngRenderer;

/// Plots the land-ocean temperature index. An optional argument points to a
/// local copy of `graph.txt` instead of the GISS endpoint.
fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = match std::env::args().nth(1) {
        Some(path) => Source::new(Location::Path(path.into()), TableFormat::whitespace(2)),
        None => presets::land_ocean_source(),
    };
    println!("opening {}", source.location);

    let table = Fetcher::default().fetch(&source)?;
    let series = normalize(&table, &presets::land_ocean_config())?;

    let mut renderer = PngRenderer::new(".");
    renderer
        .render(&presets::land_ocean_chart(), &series)
        .into_diagnostic()?;
    for path in &renderer.written {
        println!("wrote {}", path.display());
    }

    Ok(())
}
