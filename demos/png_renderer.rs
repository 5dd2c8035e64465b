use std::path::PathBuf;

use anomaly::{bounds, ChartSpec, Mark, Renderer, Series};
use plotters::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Nothing to plot for `{0}`")]
    Empty(String),
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw<T, E: std::fmt::Display>(result: Result<T, E>) -> Result<T, PlotError> {
    result.map_err(|e| PlotError::Draw(e.to_string()))
}

/// Writes each chart to `<dir>/<n>.png`, numbered in render order.
pub struct PngRenderer {
    dir: PathBuf,
    rendered: usize,
    pub written: Vec<PathBuf>,
}

impl PngRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            rendered: 0,
            written: Vec::new(),
        }
    }
}

impl Renderer for PngRenderer {
    type Error = PlotError;

    fn render(&mut self, layout: &ChartSpec, series: &[Series]) -> Result<(), PlotError> {
        let (years, values) = bounds(series).ok_or_else(|| PlotError::Empty(layout.title.clone()))?;
        let output = self.dir.join(format!("{}.png", self.rendered));
        self.rendered += 1;

        let root = BitMapBackend::new(&output, (1920, 1080)).into_drawing_area();
        draw(root.fill(&WHITE))?;
        let mut chart = draw(
            ChartBuilder::on(&root)
                .caption(&layout.title, ("sans-serif", 60).into_font())
                .margin(5)
                .x_label_area_size(80)
                .y_label_area_size(80)
                .build_cartesian_2d(
                    years.start..years.end + 1,
                    values.start - 0.1..values.end + 0.1,
                ),
        )?;

        draw(
            chart
                .configure_mesh()
                .x_desc(layout.x_label.as_str())
                .y_desc(layout.y_label.as_str())
                .draw(),
        )?;

        for serie in series {
            let style = layout.style_for(&serie.key);
            let color = RGBColor(style.color.0, style.color.1, style.color.2);
            let label = serie.key.to_string();
            match style.mark {
                Mark::Points => {
                    draw(chart.draw_series(
                        serie
                            .values()
                            .map(|(year, value)| Circle::new((year, value), 4, color.filled())),
                    ))?
                    .label(label)
                    .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
                }
                Mark::Line => {
                    // A missing year breaks the line
                    for (idx, segment) in serie.segments().into_iter().enumerate() {
                        let drawn = draw(chart.draw_series(LineSeries::new(segment, color)))?;
                        if idx == 0 {
                            drawn.label(label.clone()).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 20, y)], color)
                            });
                        }
                    }
                }
            }
        }

        draw(
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw(),
        )?;

        draw(root.present())?;
        tracing::info!("wrote {}", output.display());
        self.written.push(output.clone());
        Ok(())
    }
}
