//! Background worker that loads the observation dataset without blocking the UI.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use visitcast_core::dataset::{Dataset, load_from_path, parse_observations};
use visitcast_core::error::{DataLoadError, DatasetError};

use crate::config::DatasetSource;

/// Request sent to the background worker
#[derive(Debug)]
pub enum DatasetRequest {
    Load(DatasetSource),
    /// Graceful shutdown
    Shutdown,
}

/// Response from the background worker
#[derive(Debug)]
pub enum DatasetResponse {
    Finished {
        source: DatasetSource,
        result: Result<Dataset, DatasetError>,
    },
}

/// Owns the loader thread; dropping it joins the thread
pub struct DatasetWorker {
    request_tx: Sender<DatasetRequest>,
    response_rx: Receiver<DatasetResponse>,
    thread: Option<JoinHandle<()>>,
}

impl DatasetWorker {
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel();
        let (response_tx, response_rx) = channel();

        let thread = thread::spawn(move || run(request_rx, response_tx));

        Self {
            request_tx,
            response_rx,
            thread: Some(thread),
        }
    }

    /// Queue a load; returns false if the worker is gone
    pub fn send(&self, request: DatasetRequest) -> bool {
        self.request_tx.send(request).is_ok()
    }

    /// Try to receive a response (non-blocking)
    pub fn try_recv(&self) -> Option<DatasetResponse> {
        self.response_rx.try_recv().ok()
    }

    pub fn shutdown(&self) {
        let _ = self.request_tx.send(DatasetRequest::Shutdown);
    }
}

impl Default for DatasetWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DatasetWorker {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run(request_rx: Receiver<DatasetRequest>, response_tx: Sender<DatasetResponse>) {
    while let Ok(request) = request_rx.recv() {
        match request {
            DatasetRequest::Shutdown => break,
            DatasetRequest::Load(source) => {
                tracing::info!(%source, "loading dataset");
                let result = load(&source);
                match &result {
                    Ok(dataset) => {
                        tracing::info!(observations = dataset.len(), "dataset ready")
                    }
                    Err(e) => tracing::warn!(error = %e, "dataset load failed"),
                }
                if response_tx
                    .send(DatasetResponse::Finished { source, result })
                    .is_err()
                {
                    break;
                }
            }
        }
    }
}

/// Fetch and parse a dataset from either kind of source
pub fn load(source: &DatasetSource) -> Result<Dataset, DatasetError> {
    match source {
        DatasetSource::Path(path) => load_from_path(path),
        DatasetSource::Url(url) => {
            let body = fetch(url)?;
            parse_observations(body.as_bytes())
        }
    }
}

fn fetch(url: &str) -> Result<String, DataLoadError> {
    let response =
        reqwest::blocking::get(url).map_err(|e| DataLoadError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DataLoadError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    response
        .text()
        .map_err(|e| DataLoadError::Transport(e.to_string()))
}
