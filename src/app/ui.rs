use std::path::PathBuf;

use crate::app::AppState;
use crate::app::InputMode;
use crate::export::{ExportTable, default_output_path, export_json, write_xlsx};

impl AppState {
    pub fn show_help(&mut self) {
        self.help_scroll = 0;

        self.help_text = "FILES:\n\
             :open [paths...] - Load one or more Excel files (parsed as one batch)\n\
             :rm          - Remove the selected file\n\
             :clear       - Remove all files\n\
             x            - Remove the selected file\n\
             j/k, Up/Down - Select next/previous file\n\
             J/K          - Move the selected file down/up the list\n\n\
             PLACEMENT:\n\
             :[well]      - Start the selected file at a well (e.g., :C4)\n\
             :well [well] - Same as above\n\
             Files are placed in list order. A file that overlaps an earlier\n\
             one is moved to the first free run of wells that fits it.\n\n\
             PREVIEW:\n\
             h/l          - Previous/next preview column\n\
             [ ]          - Previous/next sheet\n\
             :col [col]   - Preview a column by letter or number (e.g., :col B)\n\
             :sheet [name/number] - Switch the active sheet\n\n\
             EXPORT:\n\
             :w [path]    - Export the plate layout to xlsx\n\
             :ej [path]   - Export the plate layout to JSON\n\n\
             OTHER:\n\
             :help        - Show this help\n\
             :q           - Quit\n\
             +/=          - Increase info panel height\n\
             -            - Decrease info panel height"
            .to_string();

        self.input_mode = InputMode::Help;
    }

    pub fn export_xlsx(&mut self, path: Option<PathBuf>) {
        let path = path.unwrap_or_else(|| default_output_path(&self.output_dir));
        let table = ExportTable::from_merge(self.session.result());

        match write_xlsx(&table, &path) {
            Ok(()) => self.add_notification(format!(
                "Exported {} filled well(s) to {}",
                table.filled_rows(),
                path.display()
            )),
            Err(e) => self.add_notification(format!("Export failed: {e:#}")),
        }
    }

    pub fn export_plate_json(&mut self, path: Option<PathBuf>) {
        let path = path.unwrap_or_else(|| default_output_path(&self.output_dir).with_extension("json"));

        match export_json(&self.session, &path) {
            Ok(()) => self.add_notification(format!("Exported JSON to {}", path.display())),
            Err(e) => self.add_notification(format!("JSON export failed: {e:#}")),
        }
    }

    pub fn adjust_info_panel_height(&mut self, delta: isize) {
        self.info_panel_height = self
            .info_panel_height
            .saturating_add_signed(delta)
            .clamp(4, 20);
    }
}
