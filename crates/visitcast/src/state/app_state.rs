use std::path::{Path, PathBuf};

use visitcast_core::analysis::SweepDimension;
use visitcast_core::dataset::{CoefficientField, Dataset};
use visitcast_core::error::{DatasetError, DomainError};
use visitcast_core::model::{LibraryParameters, ParameterField};
use visitcast_core::pipeline::Evaluation;
use visitcast_core::prediction::PredictionEngine;

use super::{CachedValue, DatasetState, RegionalTab, TabId};
use crate::config::AppConfig;
use crate::controls::adjust_field;
use crate::util::io::atomic_write;

/// File name of the evaluation export inside the data directory
pub const EXPORT_FILE: &str = "evaluation.json";

pub struct AppState {
    pub active_tab: TabId,
    pub exit: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub data_dir: PathBuf,

    // Predictor
    pub engine: PredictionEngine,
    /// Parameters restored by a reset
    pub defaults: LibraryParameters,
    pub params: LibraryParameters,
    pub selected_field: usize,
    pub dimension: SweepDimension,
    pub multipliers: Vec<f64>,
    /// Bumped whenever an input to the evaluation changes
    input_version: u64,
    pub evaluation: CachedValue<Result<Evaluation, DomainError>>,

    // GWR analysis
    pub dataset: DatasetState,
    pub coefficient: CoefficientField,

    // Urban vs rural
    pub regional_tab: RegionalTab,
}

impl AppState {
    pub fn new(config: &AppConfig, data_dir: PathBuf, dataset_source: impl Into<String>) -> Self {
        let mut state = Self {
            active_tab: TabId::Predictor,
            exit: false,
            error_message: None,
            status_message: None,
            data_dir,
            engine: PredictionEngine::new(config.coefficients),
            defaults: config.parameters.clone(),
            params: config.parameters.clone(),
            selected_field: 0,
            dimension: config.sweep_dimension,
            multipliers: config.multipliers.values(),
            input_version: 1,
            evaluation: CachedValue::new(),
            dataset: DatasetState::loading(dataset_source),
            coefficient: CoefficientField::default(),
            regional_tab: RegionalTab::default(),
        };
        state.refresh_evaluation();
        state
    }

    pub fn input_version(&self) -> u64 {
        self.input_version
    }

    /// Mark the evaluation inputs as modified
    pub fn mark_modified(&mut self) {
        self.input_version += 1;
    }

    /// Recompute the evaluation if an input changed since the last run.
    ///
    /// A domain error replaces the status-bar error; a successful run clears
    /// an error left by an earlier one.
    pub fn refresh_evaluation(&mut self) {
        let engine = self.engine;
        let params = &self.params;
        let dimension = self.dimension;
        let multipliers = &self.multipliers;

        let ran = self.evaluation.refresh(self.input_version, || {
            Evaluation::compute(&engine, params, dimension, multipliers)
        });
        if !ran {
            return;
        }

        match self.evaluation.get(self.input_version) {
            Some(Err(e)) => {
                tracing::debug!(error = %e, "evaluation rejected parameters");
                self.error_message = Some(e.to_string());
            }
            Some(Ok(_)) => self.error_message = None,
            None => {}
        }
    }

    /// Current evaluation, if the parameters are valid
    pub fn current_evaluation(&self) -> Option<&Evaluation> {
        match self.evaluation.get(self.input_version) {
            Some(Ok(evaluation)) => Some(evaluation),
            _ => None,
        }
    }

    pub fn switch_tab(&mut self, tab: TabId) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        let next = (self.active_tab.index() + 1) % TabId::ALL.len();
        self.active_tab = TabId::from_index(next).unwrap_or(TabId::Predictor);
    }

    pub fn prev_tab(&mut self) {
        let len = TabId::ALL.len();
        let prev = (self.active_tab.index() + len - 1) % len;
        self.active_tab = TabId::from_index(prev).unwrap_or(TabId::Predictor);
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn selected_field(&self) -> ParameterField {
        ParameterField::ALL[self.selected_field.min(ParameterField::ALL.len() - 1)]
    }

    pub fn select_next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % ParameterField::ALL.len();
    }

    pub fn select_prev_field(&mut self) {
        let len = ParameterField::ALL.len();
        self.selected_field = (self.selected_field + len - 1) % len;
    }

    /// Move the selected slider by `steps` steps
    pub fn adjust_selected(&mut self, steps: f64) {
        let field = self.selected_field();
        if adjust_field(&mut self.params, field, steps) {
            tracing::debug!(?field, value = self.params.get(field), "parameter adjusted");
            self.mark_modified();
        }
    }

    pub fn cycle_dimension(&mut self) {
        self.dimension = self.dimension.next();
        self.mark_modified();
    }

    pub fn cycle_coefficient(&mut self) {
        self.coefficient = self.coefficient.next();
    }

    pub fn reset_parameters(&mut self) {
        self.params = self.defaults.clone();
        self.mark_modified();
        self.set_status("Parameters reset".to_string());
    }

    /// Record the finished dataset load
    pub fn dataset_loaded(&mut self, source: String, result: Result<Dataset, DatasetError>) {
        self.dataset = DatasetState::from_result(source, result);
    }

    /// Write the current evaluation as JSON into the data directory
    pub fn export_evaluation(&self) -> Result<PathBuf, String> {
        let evaluation = self
            .current_evaluation()
            .ok_or_else(|| "Nothing to export: parameters are invalid".to_string())?;
        let json = serde_json::to_string_pretty(evaluation).map_err(|e| e.to_string())?;
        let path = self.data_dir.join(EXPORT_FILE);
        write_export(&path, &json).map_err(|e| format!("Failed to export: {e}"))?;
        Ok(path)
    }
}

fn write_export(path: &Path, json: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    atomic_write(path, json)
}
