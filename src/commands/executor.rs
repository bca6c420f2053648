use std::path::PathBuf;

use crate::app::{AppState, InputMode};
use crate::plate::Well;
use crate::session::Mutation;
use crate::utils::parse_column;

impl AppState {
    pub fn execute_command(&mut self) {
        let command = self.input_buffer.trim().to_string();
        self.input_mode = InputMode::Normal;
        self.input_buffer = String::new();

        if command.is_empty() {
            return;
        }

        // A bare well name (e.g., :C4) re-assigns the selected file
        if let Ok(well) = command.parse::<Well>() {
            self.set_selected_start_well(well);
            return;
        }

        let parts: Vec<&str> = command.split_whitespace().collect();
        let args = &parts[1..];

        match parts[0] {
            "q" | "quit" => self.should_quit = true,
            "help" => self.show_help(),
            "w" => self.export_xlsx(optional_path(args)),
            "ej" => self.export_plate_json(optional_path(args)),
            "rm" => self.remove_selected_file(),
            "clear" => {
                self.update(Mutation::Clear);
                self.add_notification("Removed all files".to_string());
            }
            "open" | "e" => self.handle_open_command(args),
            "well" => self.handle_well_command(args),
            "col" => self.handle_column_command(args),
            "sheet" => self.handle_sheet_command(args),
            _ => self.add_notification(format!("Unknown command: {}", command)),
        }
    }

    fn handle_open_command(&mut self, args: &[&str]) {
        if args.is_empty() {
            self.add_notification("Usage: :open [paths...]".to_string());
            return;
        }

        self.open_files(args.iter().map(PathBuf::from).collect());
    }

    fn handle_well_command(&mut self, args: &[&str]) {
        let Some(arg) = args.first() else {
            self.add_notification("Usage: :well [A1-H12]".to_string());
            return;
        };

        match arg.parse::<Well>() {
            Ok(well) => self.set_selected_start_well(well),
            Err(e) => self.add_notification(e.to_string()),
        }
    }

    fn handle_column_command(&mut self, args: &[&str]) {
        let Some(arg) = args.first() else {
            self.add_notification("Usage: :col [letter|number]".to_string());
            return;
        };

        match parse_column(arg) {
            Some(column) => self.set_preview_column(column),
            None => self.add_notification(format!("Invalid column: {}", arg)),
        }
    }

    fn handle_sheet_command(&mut self, args: &[&str]) {
        if args.is_empty() {
            self.add_notification("Usage: :sheet [name|number]".to_string());
            return;
        }

        let name = args.join(" ");
        match self.find_sheet(&name) {
            Some(sheet) => self.switch_sheet(sheet),
            None => self.add_notification(format!("Sheet not found: {}", name)),
        }
    }
}

fn optional_path(args: &[&str]) -> Option<PathBuf> {
    if args.is_empty() {
        None
    } else {
        Some(PathBuf::from(args.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::Sheet;
    use crate::session::{PlateFile, Session};

    fn run(app: &mut AppState, command: &str) {
        app.input_mode = InputMode::Command;
        app.input_buffer = command.to_string();
        app.execute_command();
    }

    fn app() -> AppState {
        let mut app = AppState::new(Session::new(), std::env::temp_dir());
        app.update(Mutation::AddFiles(vec![PlateFile::new(
            "f.xlsx",
            vec![Sheet::from_values("Plate", &[vec!["S", "OD"], vec!["a", "1"], vec!["b", "2"]])],
        )]));
        app
    }

    #[test]
    fn test_bare_well_moves_selected_file() {
        let mut app = app();

        run(&mut app, "c4");

        assert_eq!(app.session.files()[0].start_well.to_string(), "C4");
        assert!(matches!(app.input_mode, InputMode::Normal));
    }

    #[test]
    fn test_invalid_well_is_reported() {
        let mut app = app();

        run(&mut app, "well J9");

        assert_eq!(app.session.files()[0].start_well, Well::A1);
        assert!(app.notification_messages.last().unwrap().contains("invalid well"));
    }

    #[test]
    fn test_column_command_accepts_letters() {
        let mut app = app();

        run(&mut app, "col B");

        assert_eq!(app.session.preview_column(), 1);
    }

    #[test]
    fn test_unknown_command() {
        let mut app = app();

        run(&mut app, "frobnicate");

        assert_eq!(
            app.notification_messages.last().map(String::as_str),
            Some("Unknown command: frobnicate")
        );
    }

    #[test]
    fn test_clear_removes_every_file() {
        let mut app = app();

        run(&mut app, "clear");

        assert!(app.session.files().is_empty());
        assert!(app.session.result().records.is_empty());
        assert_eq!(app.selected_file, 0);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        run(&mut app, "q");
        assert!(app.should_quit);
    }
}
