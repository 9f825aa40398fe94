use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Row placed in an unreadable chart so that it still reports a single entry.
pub const EMPTY_CHART_MARKER: &str = "File is empty";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Empty,
    NotFound,
}

impl LoadStatus {
    /// Human-readable status for on-screen diagnostics.
    pub fn message(self) -> &'static str {
        match self {
            LoadStatus::Loaded => "File loaded",
            LoadStatus::Empty => "file empty",
            LoadStatus::NotFound => "file not loaded",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ChartLoadError {
    #[error("chart file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read chart file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chart file '{}' has no rows", path.display())]
    Empty { path: PathBuf },
}

impl ChartLoadError {
    fn status(&self) -> LoadStatus {
        match self {
            ChartLoadError::NotFound { .. } => LoadStatus::NotFound,
            ChartLoadError::Io { .. } | ChartLoadError::Empty { .. } => LoadStatus::Empty,
        }
    }
}

/// Ordered step-chart rows, one per line of the source file.
#[derive(Clone, Debug)]
pub struct Chart {
    rows: Vec<String>,
    status: LoadStatus,
}

impl Chart {
    #[cfg(test)]
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            status: LoadStatus::Loaded,
        }
    }

    fn degraded(status: LoadStatus) -> Self {
        let rows = match status {
            LoadStatus::NotFound => Vec::new(),
            _ => vec![EMPTY_CHART_MARKER.to_string()],
        };
        Self { rows, status }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn load_message(&self) -> &'static str {
        self.status.message()
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(String::as_str)
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn read_rows(path: &Path) -> Result<Vec<String>, ChartLoadError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ChartLoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ChartLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    // Encoding is not validated; undecodable bytes become U+FFFD.
    let text = String::from_utf8_lossy(&bytes);
    let rows: Vec<String> = text.lines().map(str::to_string).collect();
    if rows.is_empty() {
        return Err(ChartLoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}

/// Loads a chart from disk. Failures never propagate: they are folded into
/// the returned chart's `LoadStatus`.
pub fn load(path: &Path) -> Chart {
    match read_rows(path) {
        Ok(rows) => {
            info!("Step chart '{}' loaded with {} rows.", path.display(), rows.len());
            Chart {
                rows,
                status: LoadStatus::Loaded,
            }
        }
        Err(e) => {
            warn!("Could not load step chart: {}", e);
            Chart::degraded(e.status())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_rows_in_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "0000\r\n1000\n0010\n").unwrap();

        let chart = load(file.path());
        assert_eq!(chart.status(), LoadStatus::Loaded);
        assert_eq!(chart.load_message(), "File loaded");
        assert_eq!(chart.rows(), &["0000", "1000", "0010"]);
        assert_eq!(chart.row(1), Some("1000"));
        assert_eq!(chart.row(3), None);
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let chart = load(&dir.path().join("missing.sm"));
        assert_eq!(chart.status(), LoadStatus::NotFound);
        assert_eq!(chart.load_message(), "file not loaded");
        assert!(chart.is_empty());
    }

    #[test]
    fn empty_file_keeps_marker_row() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let chart = load(file.path());
        assert_eq!(chart.status(), LoadStatus::Empty);
        assert_eq!(chart.load_message(), "file empty");
        assert_eq!(chart.rows(), &[EMPTY_CHART_MARKER]);
    }

    #[test]
    fn invalid_utf8_still_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'0', 0xff, b'0', b'1', b'\n', b'1', b'0', b'0', b'0', b'\n']).unwrap();
        let chart = load(file.path());
        assert_eq!(chart.status(), LoadStatus::Loaded);
        assert_eq!(chart.load_message(), "File loaded");
        assert_eq!(chart.row(0), Some("0\u{FFFD}01"));
        assert_eq!(chart.row(1), Some("1000"));
    }

    #[test]
    fn directory_path_reports_empty() {
        let dir = tempfile::tempdir().unwrap();
        let chart = load(dir.path());
        assert_eq!(chart.status(), LoadStatus::Empty);
    }
}
