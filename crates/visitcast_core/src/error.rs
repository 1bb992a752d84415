use std::fmt;

use crate::model::ParameterField;

/// Errors raised when library parameters fall outside the model's domain
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Value is NaN or infinite
    NonFinite { field: ParameterField, value: f64 },
    /// Value is used as a divisor and must be strictly positive
    NonPositive { field: ParameterField, value: f64 },
    /// Count-like value that cannot be negative
    Negative { field: ParameterField, value: f64 },
    /// The back-transformed prediction does not fit in an f64
    Overflow { log_visits: f64 },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NonFinite { field, value } => {
                write!(f, "{} must be a finite number (got {value})", field.label())
            }
            DomainError::NonPositive { field, value } => {
                write!(f, "{} must be greater than zero (got {value})", field.label())
            }
            DomainError::Negative { field, value } => {
                write!(f, "{} cannot be negative (got {value})", field.label())
            }
            DomainError::Overflow { log_visits } => {
                write!(
                    f,
                    "predicted visits overflow (log-scale prediction {log_visits:.3})"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Errors related to fetching or decoding the observation dataset
#[derive(Debug)]
pub enum DataLoadError {
    Io(std::io::Error),
    /// Remote source answered with a non-success status
    Http { status: u16, url: String },
    /// Transport failure before any status was received
    Transport(String),
    Csv { line: Option<u64>, message: String },
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLoadError::Io(e) => write!(f, "failed to read dataset: {e}"),
            DataLoadError::Http { status, url } => {
                write!(f, "failed to fetch {url}: HTTP {status}")
            }
            DataLoadError::Transport(msg) => write!(f, "failed to fetch dataset: {msg}"),
            DataLoadError::Csv {
                line: Some(line),
                message,
            } => write!(f, "failed to parse CSV at line {line}: {message}"),
            DataLoadError::Csv {
                line: None,
                message,
            } => write!(f, "failed to parse CSV: {message}"),
        }
    }
}

impl std::error::Error for DataLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataLoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataLoadError {
    fn from(err: std::io::Error) -> Self {
        DataLoadError::Io(err)
    }
}

impl From<csv::Error> for DataLoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(e) => DataLoadError::Io(e),
            kind => DataLoadError::Csv {
                line,
                message: csv_kind_message(&kind),
            },
        }
    }
}

fn csv_kind_message(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {err}"),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::Serialize(msg) => msg.clone(),
        other => format!("{other:?}"),
    }
}

/// Errors surfaced by the dataset boundary.
///
/// `Empty` is kept apart from `Load` so the dashboard can show a
/// "no data" state rather than a failure.
#[derive(Debug)]
pub enum DatasetError {
    Load(DataLoadError),
    /// Parsed successfully but no row survived filtering
    Empty { discarded: usize },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Load(e) => write!(f, "{e}"),
            DatasetError::Empty { discarded: 0 } => write!(f, "dataset contains no rows"),
            DatasetError::Empty { discarded } => write!(
                f,
                "dataset contains no usable rows ({discarded} discarded for missing location or visits)"
            ),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Load(e) => Some(e),
            DatasetError::Empty { .. } => None,
        }
    }
}

impl From<DataLoadError> for DatasetError {
    fn from(err: DataLoadError) -> Self {
        DatasetError::Load(err)
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Load(DataLoadError::Io(err))
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Load(err.into())
    }
}
