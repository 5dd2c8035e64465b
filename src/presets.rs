//! Ready-made sources for the NASA GISS surface temperature analysis
//! (GISTEMP).

use crate::config::SourceConfig;
use crate::dashboard::{Feed, Section};
use crate::fetch::Source;
use crate::render::{ChartSpec, Rgb, SeriesStyle};
use crate::series::SeriesKey;
use crate::table::TableFormat;

pub const LAND_OCEAN_URL: &str = "https://data.giss.nasa.gov/gistemp/graphs/graph_data/Global_Mean_Estimates_based_on_Land_and_Ocean_Data/graph.txt";

const TABLEDATA_URL: &str = "https://data.giss.nasa.gov/gistemp/tabledata_v4";

/// Annual land-ocean temperature index with its LOWESS smoothing.
/// Two title lines precede the header.
pub fn land_ocean_source() -> Source {
    Source::new(LAND_OCEAN_URL, TableFormat::whitespace(2))
}

pub fn land_ocean_config() -> SourceConfig {
    SourceConfig::columns("Year", ["No_Smoothing", "Lowess(5)"])
}

pub fn land_ocean_chart() -> ChartSpec {
    ChartSpec::builder()
        .title("Indice Global de Température Terre-Océan")
        .x_label("Année")
        .y_label("Anomalie de Température (°C)")
        .styles(vec![
            (
                SeriesKey::from("No_Smoothing"),
                SeriesStyle::points(Rgb::GREY),
            ),
            (SeriesKey::from("Lowess(5)"), SeriesStyle::line(Rgb::BLACK)),
        ])
        .build()
}

pub fn land_ocean_section() -> Section {
    Section {
        feed: Feed::Single(land_ocean_source()),
        config: land_ocean_config(),
        chart: land_ocean_chart(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Global,
    Northern,
    Southern,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Global, Zone::Northern, Zone::Southern];

    fn file(self) -> &'static str {
        match self {
            Zone::Global => "GLB",
            Zone::Northern => "NH",
            Zone::Southern => "SH",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::Global => "Monde",
            Zone::Northern => "Hémisphère Nord",
            Zone::Southern => "Hémisphère Sud",
        }
    }

    fn color(self) -> Rgb {
        match self {
            Zone::Global => Rgb::BLACK,
            Zone::Northern => Rgb::RED,
            Zone::Southern => Rgb::BLUE,
        }
    }

    pub fn url(self) -> String {
        format!("{TABLEDATA_URL}/{}.Ts+dSST.csv", self.file())
    }

    /// Monthly and seasonal means per year, `***` where a mean is unknown.
    /// One title line precedes the header.
    pub fn source(self) -> Source {
        Source::new(self.url().as_str(), TableFormat::csv(1))
    }
}

/// The annual (January-December) mean column of the tabledata files.
pub fn annual_mean_config() -> SourceConfig {
    SourceConfig::columns("Year", ["J-D"])
}

pub fn hemispheres_section() -> Section {
    Section {
        feed: Feed::Regions(
            Zone::ALL
                .into_iter()
                .map(|zone| (SeriesKey::from(zone.label()), zone.source()))
                .collect(),
        ),
        config: annual_mean_config(),
        chart: ChartSpec::builder()
            .title("Anomalie annuelle par hémisphère")
            .x_label("Année")
            .y_label("Anomalie de Température (°C)")
            .styles(
                Zone::ALL
                    .into_iter()
                    .map(|zone| (SeriesKey::from(zone.label()), SeriesStyle::line(zone.color())))
                    .collect(),
            )
            .build(),
    }
}
