use anomaly::{presets, Dashboard, Fetcher};
use tracing_subscriber::EnvFilter;

mod png_renderer;

use png_renderer::PngRenderer;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let output = std::env::args().nth(1).unwrap_or_else(|| String::from("."));
    let mut dashboard = Dashboard::new()
        .section(presets::land_ocean_section())
        .section(presets::hemispheres_section());

    let mut renderer = PngRenderer::new(&output);
    let outcomes = dashboard.render(&Fetcher::default(), &mut renderer);

    for (section, outcome) in dashboard.sections().iter().zip(outcomes) {
        match outcome {
            Ok(()) => println!("{}: ok", section.chart.title),
            Err(e) => eprintln!("{:?}", miette::Report::new(e)),
        }
    }
    for path in &renderer.written {
        println!("wrote {}", path.display());
    }

    Ok(())
}
