use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::series::{Series, SeriesKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREY: Rgb = Rgb(128, 128, 128);
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const BLUE: Rgb = Rgb(31, 119, 180);
    pub const GREEN: Rgb = Rgb(44, 160, 44);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    Line,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Rgb,
    #[serde(default)]
    pub mark: Mark,
}

impl SeriesStyle {
    pub fn line(color: Rgb) -> Self {
        Self {
            color,
            mark: Mark::Line,
        }
    }

    pub fn points(color: Rgb) -> Self {
        Self {
            color,
            mark: Mark::Points,
        }
    }
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self::line(Rgb::BLACK)
    }
}

/// Display metadata handed to a [`Renderer`] along with the series.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct ChartSpec {
    #[builder(into)]
    pub title: String,
    #[builder(into, default = String::from("Year"))]
    pub x_label: String,
    #[builder(into, default = String::from("Anomaly (°C)"))]
    pub y_label: String,
    #[builder(default)]
    #[serde(default)]
    pub styles: Vec<(SeriesKey, SeriesStyle)>,
}

impl ChartSpec {
    /// The style configured for `key`, or a black line.
    pub fn style_for(&self, key: &SeriesKey) -> SeriesStyle {
        self.styles
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, style)| *style)
            .unwrap_or_default()
    }
}

/// Draws a chart. Implementations live outside this crate.
pub trait Renderer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&mut self, chart: &ChartSpec, series: &[Series]) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_falls_back_to_black_line() {
        let chart = ChartSpec::builder()
            .title("Indice Global de Température Terre-Océan")
            .styles(vec![(
                SeriesKey::from("No_Smoothing"),
                SeriesStyle::points(Rgb::GREY),
            )])
            .build();

        assert_eq!(chart.x_label, "Year");
        assert_eq!(
            chart.style_for(&SeriesKey::from("No_Smoothing")),
            SeriesStyle::points(Rgb::GREY)
        );
        assert_eq!(
            chart.style_for(&SeriesKey::from("Lowess(5)")),
            SeriesStyle::line(Rgb::BLACK)
        );
    }
}
