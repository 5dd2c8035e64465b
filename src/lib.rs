//! Fetch climate-anomaly tables, normalize them into year-ordered series and
//! hand them to a chart renderer.
//!
//! ```no_run
//! use anomaly::{normalize, presets, DataSource, Fetcher};
//!
//! let table = Fetcher::default().fetch(&presets::land_ocean_source())?;
//! for series in normalize(&table, &presets::land_ocean_config())? {
//!     println!("{}: {:?}", series.key, series.mean());
//! }
//! # Ok::<(), anomaly::Error>(())
//! ```

mod config;
mod dashboard;
mod error;
mod fetch;
mod lexer;
mod memo;
mod merge;
mod normalize;
pub mod presets;
mod render;
mod series;
mod table;

pub use config::SourceConfig;
pub use dashboard::{Dashboard, Feed, Section};
pub use error::{ColumnRole, ConfigError, Error, FetchError};
pub use fetch::{DataSource, Fetcher, Location, Source};
pub use memo::Memo;
pub use merge::merge;
pub use normalize::normalize;
pub use render::{ChartSpec, Mark, Renderer, Rgb, SeriesStyle};
pub use series::{bounds, Point, Series, SeriesKey};
pub use table::{Delimiter, Field, RawRow, Table, TableFormat};
