use uuid::Uuid;

use crate::merge::{MergeResult, merge};
use crate::placement::{PlacementBlock, PlacementOutcome, PlacementStatus, resolve_placements};
use crate::plate::Well;
use crate::session::PlateFile;

/// A change to the session. Every mutation goes through [`Session::apply`].
#[derive(Debug, Clone)]
pub enum Mutation {
    AddFiles(Vec<PlateFile>),
    RemoveFile(Uuid),
    SetStartWell { id: Uuid, well: Well },
    /// Moves a file one position towards the front (`-1`) or back (`1`) of the list.
    MoveFile { id: Uuid, offset: isize },
    SetActiveSheet(usize),
    SetPreviewColumn(usize),
    Clear,
}

/// A file whose start well changed during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub file_name: String,
    pub from: Well,
    pub to: Well,
}

/// What changed placement-wise as a result of one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub corrections: Vec<Correction>,
    pub unplaceable: Vec<String>,
}

/// The loaded files, the two global selectors and the derived plate.
///
/// Files are resolved in list order and the merge is recomputed after
/// every mutation, so `outcomes` and `result` always describe `files`.
#[derive(Debug, Default)]
pub struct Session {
    files: Vec<PlateFile>,
    active_sheet: usize,
    preview_column: usize,
    outcomes: Vec<PlacementOutcome>,
    result: MergeResult,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(active_sheet: usize, preview_column: usize) -> Self {
        Self {
            active_sheet,
            preview_column,
            ..Self::default()
        }
    }

    pub fn files(&self) -> &[PlateFile] {
        &self.files
    }

    pub fn file(&self, id: Uuid) -> Option<&PlateFile> {
        self.files.iter().find(|file| file.id == id)
    }

    pub fn outcomes(&self) -> &[PlacementOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, id: Uuid) -> Option<&PlacementOutcome> {
        let position = self.position(id)?;
        self.outcomes.get(position)
    }

    pub fn result(&self) -> &MergeResult {
        &self.result
    }

    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    pub fn preview_column(&self) -> usize {
        self.preview_column
    }

    /// Largest sheet count across the loaded files.
    pub fn sheet_count(&self) -> usize {
        self.files
            .iter()
            .map(|file| file.sheets.len())
            .max()
            .unwrap_or(0)
    }

    /// Sheet name for the active sheet, taken from the first file that has it.
    pub fn active_sheet_name(&self) -> Option<&str> {
        self.files
            .iter()
            .find_map(|file| file.sheet(self.active_sheet))
            .map(|sheet| sheet.name.as_str())
    }

    /// One name per sheet index, each taken from the first file that has that sheet.
    pub fn sheet_names(&self) -> Vec<String> {
        (0..self.sheet_count())
            .filter_map(|index| {
                self.files
                    .iter()
                    .find_map(|file| file.sheet(index))
                    .map(|sheet| sheet.name.clone())
            })
            .collect()
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.files.iter().position(|file| file.id == id)
    }

    /// Applies one mutation, then re-resolves every placement and rebuilds the plate.
    pub fn apply(&mut self, mutation: Mutation) -> UpdateReport {
        match mutation {
            Mutation::AddFiles(files) => self.files.extend(files),
            Mutation::RemoveFile(id) => self.files.retain(|file| file.id != id),
            Mutation::SetStartWell { id, well } => {
                if let Some(file) = self.files.iter_mut().find(|file| file.id == id) {
                    file.start_well = well;
                }
            }
            Mutation::MoveFile { id, offset } => {
                if let Some(from) = self.position(id) {
                    let to = from
                        .saturating_add_signed(offset)
                        .min(self.files.len().saturating_sub(1));
                    let file = self.files.remove(from);
                    self.files.insert(to, file);
                }
            }
            Mutation::SetActiveSheet(sheet) => self.active_sheet = sheet,
            Mutation::SetPreviewColumn(column) => self.preview_column = column,
            Mutation::Clear => self.files.clear(),
        }

        self.recompute()
    }

    fn recompute(&mut self) -> UpdateReport {
        let blocks: Vec<PlacementBlock> = self
            .files
            .iter()
            .map(|file| file.block(self.active_sheet))
            .collect();

        let outcomes = resolve_placements(&blocks);
        let mut report = UpdateReport::default();

        for (file, outcome) in self.files.iter_mut().zip(&outcomes) {
            match outcome.status {
                PlacementStatus::Corrected { requested } => {
                    tracing::debug!("{} moved from {} to {}", file.name, requested, outcome.start);
                    file.start_well = outcome.start;
                    report.corrections.push(Correction {
                        file_name: file.name.clone(),
                        from: requested,
                        to: outcome.start,
                    });
                }
                PlacementStatus::Unplaceable => {
                    tracing::warn!(
                        "{} needs {} wells and no free run is left",
                        file.name,
                        outcome.length
                    );
                    report.unplaceable.push(file.name.clone());
                }
                PlacementStatus::Requested => {}
            }
        }

        self.result = merge(
            &self.files,
            &outcomes,
            self.active_sheet,
            self.preview_column,
        );
        self.outcomes = outcomes;

        report
    }
}
