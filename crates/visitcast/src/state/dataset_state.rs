//! Load status of the observation dataset shown in the GWR view.

use visitcast_core::dataset::{Dataset, DatasetSummary};
use visitcast_core::error::DatasetError;

/// Lifecycle of the single dataset load: `Loading` moves to one of the other
/// three states exactly once. There is no retry.
#[derive(Debug)]
pub enum DatasetState {
    Loading {
        source: String,
    },
    Ready {
        source: String,
        dataset: Dataset,
        summary: DatasetSummary,
    },
    Failed {
        source: String,
        message: String,
    },
    Empty {
        source: String,
        discarded: usize,
    },
}

impl DatasetState {
    pub fn loading(source: impl Into<String>) -> Self {
        DatasetState::Loading {
            source: source.into(),
        }
    }

    pub fn from_result(source: impl Into<String>, result: Result<Dataset, DatasetError>) -> Self {
        let source = source.into();
        match result {
            Ok(dataset) => {
                let summary = DatasetSummary::compute(&dataset);
                DatasetState::Ready {
                    source,
                    dataset,
                    summary,
                }
            }
            Err(DatasetError::Empty { discarded }) => DatasetState::Empty { source, discarded },
            Err(e) => DatasetState::Failed {
                source,
                message: e.to_string(),
            },
        }
    }

    pub fn source(&self) -> &str {
        match self {
            DatasetState::Loading { source }
            | DatasetState::Ready { source, .. }
            | DatasetState::Failed { source, .. }
            | DatasetState::Empty { source, .. } => source,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DatasetState::Loading { .. })
    }

    /// Short status for the status bar
    pub fn label(&self) -> String {
        match self {
            DatasetState::Loading { .. } => "loading dataset…".to_string(),
            DatasetState::Ready { dataset, .. } => format!("{} observations", dataset.len()),
            DatasetState::Failed { .. } => "dataset failed".to_string(),
            DatasetState::Empty { .. } => "dataset empty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visitcast_core::dataset::parse_observations;
    use visitcast_core::error::DataLoadError;

    #[test]
    fn test_ready_state_carries_summary() {
        let dataset =
            parse_observations("LATITUDE,LONGITUD,log_VISITS,gwr_local_r2\n41,-96,10,0.8\n".as_bytes())
                .unwrap();
        let state = DatasetState::from_result("gwr.csv", Ok(dataset));

        match &state {
            DatasetState::Ready { summary, .. } => assert_eq!(summary.observations, 1),
            other => panic!("expected ready, got {other:?}"),
        }
        assert_eq!(state.label(), "1 observations");
        assert_eq!(state.source(), "gwr.csv");
    }

    #[test]
    fn test_empty_is_distinct_from_failure() {
        let empty = DatasetState::from_result("gwr.csv", Err(DatasetError::Empty { discarded: 4 }));
        assert!(matches!(empty, DatasetState::Empty { discarded: 4, .. }));

        let failed = DatasetState::from_result(
            "http://host/gwr.csv",
            Err(DatasetError::Load(DataLoadError::Http {
                status: 404,
                url: "http://host/gwr.csv".into(),
            })),
        );
        match failed {
            DatasetState::Failed { message, .. } => assert!(message.contains("404")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
