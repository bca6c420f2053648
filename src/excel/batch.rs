use anyhow::anyhow;
use std::path::PathBuf;
use std::thread;

use crate::excel::open_workbook;
use crate::plate::Well;
use crate::session::PlateFile;

/// A file to ingest and the start well requested for it.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub path: PathBuf,
    pub start_well: Well,
}

impl LoadRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            start_well: Well::A1,
        }
    }
}

#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Result of ingesting one batch. Files keep the order of their requests.
#[derive(Debug, Default)]
pub struct BatchLoad {
    pub files: Vec<PlateFile>,
    pub failures: Vec<LoadFailure>,
}

/// Parses every requested file concurrently and returns once the whole batch is done.
///
/// A file that fails to parse is reported in `failures` and never affects the others.
pub fn load_batch(requests: &[LoadRequest]) -> BatchLoad {
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|request| scope.spawn(move || open_workbook(&request.path)))
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(anyhow!("Spreadsheet parser panicked")))
            })
            .collect()
    });

    let mut batch = BatchLoad::default();

    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(sheets) => {
                batch.files.push(
                    PlateFile::from_path(&request.path, sheets).with_start_well(request.start_well),
                );
            }
            Err(error) => {
                tracing::warn!("Skipping {}: {:#}", request.path.display(), error);
                batch.failures.push(LoadFailure {
                    path: request.path.clone(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        "Loaded {} of {} file(s)",
        batch.files.len(),
        requests.len()
    );

    batch
}
