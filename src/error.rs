use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// The source could not be reached or is not tabular text.
#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("Could not fetch `{url}`")]
    #[diagnostic(code(anomaly::fetch::http))]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("Could not read the body of `{url}`")]
    #[diagnostic(code(anomaly::fetch::body))]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not read `{}`", .path.display())]
    #[diagnostic(code(anomaly::fetch::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No header line in `{location}`")]
    #[diagnostic(
        code(anomaly::fetch::missing_header),
        help("check how many leading lines the source format skips")
    )]
    MissingHeader { location: String },
}

/// What a configured column is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Year,
    Value,
    Entity,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Year => f.write_str("year"),
            ColumnRole::Value => f.write_str("value"),
            ColumnRole::Entity => f.write_str("entity"),
        }
    }
}

/// The configuration doesn't match the shape of the data.
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum ConfigError {
    #[error("The {role} column `{column}` does not exist, available columns: {}", .available.join(", "))]
    #[diagnostic(
        code(anomaly::config::missing_column),
        help("column names are case sensitive and must match the header line")
    )]
    MissingColumn {
        role: ColumnRole,
        column: String,
        available: Vec<String>,
    },
    #[error("No value column configured")]
    #[diagnostic(code(anomaly::config::no_value_columns))]
    NoValueColumns,
    #[error("A regional feed needs exactly one series per source, this config yields {series}")]
    #[diagnostic(
        code(anomaly::config::ambiguous_region),
        help("use a single value column and no entity column for regional feeds")
    )]
    AmbiguousRegion { series: String },
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not render the chart")]
    #[diagnostic(code(anomaly::render))]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}
