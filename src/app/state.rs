use std::path::PathBuf;

use crate::excel::{BatchLoad, LoadRequest, load_batch};
use crate::plate::Well;
use crate::session::{Mutation, PlateFile, Session, UpdateReport};

pub enum InputMode {
    Normal,
    Command,
    Help,
}

pub struct AppState {
    pub session: Session,
    pub selected_file: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub should_quit: bool,
    pub output_dir: PathBuf,
    pub info_panel_height: usize,
    pub notification_messages: Vec<String>,
    pub max_notifications: usize,
    pub help_text: String,
    pub help_scroll: usize,
    pub help_visible_lines: usize,
}

impl AppState {
    pub fn new(session: Session, output_dir: PathBuf) -> Self {
        Self {
            session,
            selected_file: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            should_quit: false,
            output_dir,
            info_panel_height: 8,
            notification_messages: Vec::new(),
            max_notifications: 50,
            help_text: String::new(),
            help_scroll: 0,
            help_visible_lines: 20,
        }
    }

    pub fn add_notification(&mut self, message: String) {
        self.notification_messages.push(message);

        if self.notification_messages.len() > self.max_notifications {
            self.notification_messages.remove(0);
        }
    }

    pub fn selected(&self) -> Option<&PlateFile> {
        self.session.files().get(self.selected_file)
    }

    /// Applies a mutation and turns the resulting placement changes into notifications.
    pub fn update(&mut self, mutation: Mutation) {
        let report = self.session.apply(mutation);
        self.report_placement(&report);
        self.clamp_selection();
    }

    fn report_placement(&mut self, report: &UpdateReport) {
        for correction in &report.corrections {
            self.add_notification(format!(
                "{} overlapped another file; moved from {} to {}",
                correction.file_name, correction.from, correction.to
            ));
        }

        for name in &report.unplaceable {
            self.add_notification(format!(
                "{} does not fit in the remaining free wells",
                name
            ));
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.session.files().len();
        if self.selected_file >= count {
            self.selected_file = count.saturating_sub(1);
        }
    }

    /// Parses a batch of files and adds the successful ones in one step.
    pub fn open_files(&mut self, paths: Vec<PathBuf>) {
        let requests: Vec<LoadRequest> = paths.into_iter().map(LoadRequest::new).collect();
        let BatchLoad { files, failures } = load_batch(&requests);

        for failure in failures {
            self.add_notification(format!(
                "Failed to open {}: {:#}",
                failure.path.display(),
                failure.error
            ));
        }

        if files.is_empty() {
            return;
        }

        let loaded = files.len();
        self.update(Mutation::AddFiles(files));
        self.add_notification(format!("Opened {} file(s)", loaded));
    }

    pub fn set_selected_start_well(&mut self, well: Well) {
        let Some(file) = self.selected() else {
            self.add_notification("No file selected".to_string());
            return;
        };

        let id = file.id;
        let name = file.name.clone();
        self.update(Mutation::SetStartWell { id, well });

        if let Some(file) = self.session.file(id) {
            if file.start_well == well {
                self.add_notification(format!("{} now starts at {}", name, well));
            }
        }
    }

    pub fn remove_selected_file(&mut self) {
        let Some(file) = self.selected() else {
            self.add_notification("No file selected".to_string());
            return;
        };

        let id = file.id;
        let name = file.name.clone();
        self.update(Mutation::RemoveFile(id));
        self.add_notification(format!("Removed {}", name));
    }

    pub fn move_selected_file(&mut self, offset: isize) {
        let Some(file) = self.selected() else {
            return;
        };

        let id = file.id;
        self.update(Mutation::MoveFile { id, offset });

        if let Some(position) = self.session.files().iter().position(|f| f.id == id) {
            self.selected_file = position;
        }
    }

    pub fn is_selected_placeable(&self) -> bool {
        self.selected()
            .and_then(|file| self.session.outcome(file.id))
            .is_some_and(|outcome| outcome.is_placed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::Sheet;

    fn app_with_files() -> AppState {
        let mut app = AppState::new(Session::new(), PathBuf::from("."));
        let rows = [vec!["S"], vec!["a"], vec!["b"], vec!["c"]];
        app.update(Mutation::AddFiles(vec![
            PlateFile::new("one.xlsx", vec![Sheet::from_values("S", &rows)]),
            PlateFile::new("two.xlsx", vec![Sheet::from_values("S", &rows)]),
        ]));
        app
    }

    #[test]
    fn test_collision_is_reported_as_notification() {
        let app = app_with_files();

        assert_eq!(app.notification_messages.len(), 1);
        assert!(app.notification_messages[0].contains("moved from A1 to D1"));
    }

    #[test]
    fn test_remove_clamps_selection() {
        let mut app = app_with_files();
        app.selected_file = 1;

        app.remove_selected_file();

        assert_eq!(app.selected_file, 0);
        assert_eq!(app.session.files().len(), 1);
    }

    #[test]
    fn test_move_follows_selected_file() {
        let mut app = app_with_files();
        app.selected_file = 1;

        app.move_selected_file(-1);

        assert_eq!(app.selected_file, 0);
        assert_eq!(app.selected().unwrap().name, "two.xlsx");
    }

    #[test]
    fn test_open_missing_file_only_notifies() {
        let mut app = app_with_files();

        app.open_files(vec![PathBuf::from("no-such-plate.xlsx")]);

        assert_eq!(app.session.files().len(), 2);
        assert!(
            app.notification_messages
                .last()
                .unwrap()
                .starts_with("Failed to open no-such-plate.xlsx")
        );
    }
}
