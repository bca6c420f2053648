use crate::app::AppState;
use crate::session::Mutation;
use crate::utils::column_letter;

impl AppState {
    pub fn select_next_file(&mut self) {
        let count = self.session.files().len();
        if self.selected_file + 1 < count {
            self.selected_file += 1;
        }
    }

    pub fn select_prev_file(&mut self) {
        self.selected_file = self.selected_file.saturating_sub(1);
    }

    pub fn next_column(&mut self) {
        let column = self.session.preview_column() + 1;
        self.set_preview_column(column);
    }

    pub fn prev_column(&mut self) {
        let column = self.session.preview_column().saturating_sub(1);
        self.set_preview_column(column);
    }

    /// Columns past every file's width are allowed; the preview then reports out of range.
    pub fn set_preview_column(&mut self, column: usize) {
        self.update(Mutation::SetPreviewColumn(column));

        let name = self
            .session
            .result()
            .column_names
            .get(column)
            .cloned()
            .unwrap_or_else(|| column_letter(column));
        self.add_notification(format!("Previewing column {} ({})", column_letter(column), name));
    }

    pub fn next_sheet(&mut self) {
        let count = self.session.sheet_count();
        if count == 0 {
            return;
        }

        let sheet = (self.session.active_sheet() + 1) % count;
        self.switch_sheet(sheet);
    }

    pub fn prev_sheet(&mut self) {
        let count = self.session.sheet_count();
        if count == 0 {
            return;
        }

        let sheet = (self.session.active_sheet() + count - 1) % count;
        self.switch_sheet(sheet);
    }

    pub fn switch_sheet(&mut self, sheet: usize) {
        self.update(Mutation::SetActiveSheet(sheet));

        let name = self
            .session
            .active_sheet_name()
            .unwrap_or("(missing)")
            .to_string();
        self.add_notification(format!("Switched to sheet {}: {}", sheet + 1, name));
    }

    /// Resolves a sheet argument given as a 1-based number or a sheet name.
    pub fn find_sheet(&self, arg: &str) -> Option<usize> {
        if let Ok(number) = arg.parse::<usize>() {
            return number.checked_sub(1).filter(|&i| i < self.session.sheet_count());
        }

        self.session
            .files()
            .iter()
            .find_map(|file| file.sheets.iter().position(|sheet| sheet.name == arg))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::app::AppState;
    use crate::excel::Sheet;
    use crate::session::{Mutation, PlateFile, Session};

    fn app() -> AppState {
        let mut app = AppState::new(Session::new(), PathBuf::from("."));
        app.update(Mutation::AddFiles(vec![PlateFile::new(
            "f.xlsx",
            vec![
                Sheet::from_values("Plate", &[vec!["S", "OD"], vec!["a", "1"]]),
                Sheet::from_values("Notes", &[vec!["N"]]),
            ],
        )]));
        app
    }

    #[test]
    fn test_sheet_cycling_wraps() {
        let mut app = app();

        app.prev_sheet();
        assert_eq!(app.session.active_sheet(), 1);

        app.next_sheet();
        assert_eq!(app.session.active_sheet(), 0);
    }

    #[test]
    fn test_find_sheet_by_name_or_number() {
        let app = app();

        assert_eq!(app.find_sheet("Notes"), Some(1));
        assert_eq!(app.find_sheet("1"), Some(0));
        assert_eq!(app.find_sheet("3"), None);
        assert_eq!(app.find_sheet("Missing"), None);
    }

    #[test]
    fn test_column_change_updates_preview() {
        let mut app = app();

        app.next_column();

        assert_eq!(app.session.preview_column(), 1);
        assert!(app.notification_messages.last().unwrap().contains("(OD)"));
    }
}
