//! CSV decoding of the observation file.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{DataLoadError, DatasetError};

use super::{Dataset, GwrObservation};

/// Parse a headered GWR CSV, dropping rows without a location or visits.
///
/// Header names are trimmed and blank lines skipped. Rows may have fewer or
/// more fields than the header. A malformed record aborts the whole load.
pub fn parse_observations<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let mut observations = Vec::new();
    let mut discarded = 0;

    for row in csv_reader.deserialize::<GwrObservation>() {
        let observation = row.map_err(DataLoadError::from)?;
        if observation.is_usable() {
            observations.push(observation);
        } else {
            discarded += 1;
        }
    }

    if observations.is_empty() {
        tracing::warn!(discarded, "dataset has no usable observations");
        return Err(DatasetError::Empty { discarded });
    }

    tracing::info!(
        observations = observations.len(),
        discarded,
        "loaded GWR observations"
    );

    Ok(Dataset {
        observations,
        discarded,
    })
}

/// Read and parse a local CSV file
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening dataset");
    let file = File::open(path).map_err(DataLoadError::from)?;
    parse_observations(BufReader::new(file))
}
