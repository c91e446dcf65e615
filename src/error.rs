use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for the scrape pipeline.
///
/// Handling differs per variant: a `FetchFailure` skips the whole source, a
/// `TableNotFound` skips one table, a `MalformedRow` drops one row, and a
/// `PersistFailure` ends that source's remaining steps. Nothing is retried.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch of {url} failed{}", status.map(|s| format!(" with status {s}")).unwrap_or_default())]
    FetchFailure {
        url: String,
        status: Option<StatusCode>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no table matches selector `{selector}`")]
    TableNotFound { selector: String },

    #[error("row {index} has {got} cells, expected {expected}")]
    MalformedRow {
        index: usize,
        got: usize,
        expected: usize,
    },

    #[error("failed to persist {name}")]
    PersistFailure {
        name: String,
        #[source]
        source: csv::Error,
    },

    #[error("column `{column}` missing from table")]
    MissingColumn { column: String },
}

impl ScrapeError {
    pub fn fetch(url: &str, source: reqwest::Error) -> Self {
        ScrapeError::FetchFailure {
            url: url.to_string(),
            status: source.status(),
            source: Box::new(source),
        }
    }

    pub fn bad_url(url: &str, source: url::ParseError) -> Self {
        ScrapeError::FetchFailure {
            url: url.to_string(),
            status: None,
            source: Box::new(source),
        }
    }

    pub fn persist(name: &str, source: csv::Error) -> Self {
        ScrapeError::PersistFailure {
            name: name.to_string(),
            source,
        }
    }
}
