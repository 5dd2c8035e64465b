use anomaly::{presets, Fetcher, Location};
use tracing_subscriber::EnvFilter;

/// Downloads the GISTEMP files next to the current directory.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let fetcher = Fetcher::default();
    let mut files = vec![(String::from("graph.txt"), presets::LAND_OCEAN_URL.to_string())];
    for zone in presets::Zone::ALL {
        let url = zone.url();
        let name = url.rsplit('/').next().unwrap_or(&url).to_string();
        files.push((name, url));
    }

    for (name, url) in files {
        let text = match fetcher.text(&Location::Url(url.clone())) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Could not fetch `{url}`: {e}");
                continue;
            }
        };
        if let Err(e) = std::fs::write(&name, &text) {
            tracing::error!("Could not write {name}: {e}");
            continue;
        }
        println!("Wrote {name}");
    }
}
