use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::table::{Table, TableFormat};

/// Where a dataset lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Url(String),
    Path(PathBuf),
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Location::Url(value.to_string())
        } else {
            Location::Path(PathBuf::from(value))
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Url(url) => f.write_str(url),
            Location::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A dataset to fetch and how its text is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    pub location: Location,
    #[serde(default)]
    pub format: TableFormat,
}

impl Source {
    pub fn new(location: impl Into<Location>, format: TableFormat) -> Self {
        Self {
            location: location.into(),
            format,
        }
    }
}

/// Produces the rows of a source.
pub trait DataSource {
    fn fetch(&self, source: &Source) -> Result<Table, FetchError>;
}

/// Blocking fetcher for URLs and local files. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Fetcher {
    agent: ureq::Agent,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// Raw text of a source, without parsing it.
    pub fn text(&self, location: &Location) -> Result<String, FetchError> {
        match location {
            Location::Url(url) => {
                tracing::info!("downloading {url}");
                let response = self.agent.get(url).call().map_err(|e| FetchError::Http {
                    url: url.clone(),
                    source: Box::new(e),
                })?;
                response.into_string().map_err(|e| FetchError::Body {
                    url: url.clone(),
                    source: e,
                })
            }
            Location::Path(path) => {
                tracing::info!("reading {}", path.display());
                std::fs::read_to_string(path).map_err(|e| FetchError::Io {
                    path: path.clone(),
                    source: e,
                })
            }
        }
    }
}

impl DataSource for Fetcher {
    fn fetch(&self, source: &Source) -> Result<Table, FetchError> {
        let text = self.text(&source.location)?;
        Table::parse(&text, &source.format, &source.location.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Field;
    use std::io::Write;

    #[test]
    fn location_from_str() {
        assert_eq!(
            Location::from("https://data.giss.nasa.gov/graph.txt"),
            Location::Url(String::from("https://data.giss.nasa.gov/graph.txt"))
        );
        assert_eq!(
            Location::from("data/graph.txt"),
            Location::Path(PathBuf::from("data/graph.txt"))
        );
    }

    #[test]
    fn fetch_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Land-Ocean: Global Means").unwrap();
        writeln!(file, "Year,J-D").unwrap();
        writeln!(file, "2023,1.17").unwrap();

        let source = Source::new(
            Location::Path(file.path().to_path_buf()),
            TableFormat::csv(1),
        );
        let table = Fetcher::default().fetch(&source).unwrap();
        assert_eq!(table.columns, vec!["Year", "J-D"]);
        assert_eq!(table.rows[0].get("J-D"), Some(&Field::Number(1.17)));
    }

    #[test]
    fn unreadable_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source::new(
            Location::Path(dir.path().join("missing.csv")),
            TableFormat::csv(0),
        );
        let err = Fetcher::default().fetch(&source).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn source_deserializes() {
        let source: Source = serde_json::from_str(
            r#"{ "location": { "url": "https://example.org/a.csv" }, "format": { "skip_rows": 1, "delimiter": "comma" } }"#,
        )
        .unwrap();
        assert_eq!(
            source,
            Source::new("https://example.org/a.csv", TableFormat::csv(1))
        );
    }
}
