use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{AppState, InputMode};

pub fn handle_key_event(app_state: &mut AppState, key: KeyEvent) {
    match app_state.input_mode {
        InputMode::Normal => handle_normal_mode(app_state, key.code),
        InputMode::Command => handle_command_mode(app_state, key.code),
        InputMode::Help => handle_help_mode(app_state, key.code),
    }
}

fn handle_command_mode(app_state: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Enter => app_state.execute_command(),
        KeyCode::Esc => {
            app_state.input_mode = InputMode::Normal;
            app_state.input_buffer.clear();
        }
        KeyCode::Backspace => {
            app_state.input_buffer.pop();
        }
        KeyCode::Char(c) => app_state.input_buffer.push(c),
        _ => {}
    }
}

fn handle_normal_mode(app_state: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('j') | KeyCode::Down => app_state.select_next_file(),
        KeyCode::Char('k') | KeyCode::Up => app_state.select_prev_file(),
        KeyCode::Char('J') => app_state.move_selected_file(1),
        KeyCode::Char('K') => app_state.move_selected_file(-1),
        KeyCode::Char('h') | KeyCode::Left => app_state.prev_column(),
        KeyCode::Char('l') | KeyCode::Right => app_state.next_column(),
        KeyCode::Char('[') => app_state.prev_sheet(),
        KeyCode::Char(']') => app_state.next_sheet(),
        KeyCode::Char('x') | KeyCode::Delete => app_state.remove_selected_file(),
        KeyCode::Char('=') | KeyCode::Char('+') => app_state.adjust_info_panel_height(1),
        KeyCode::Char('-') => app_state.adjust_info_panel_height(-1),
        KeyCode::Char(':') => {
            app_state.input_mode = InputMode::Command;
            app_state.input_buffer.clear();
        }
        KeyCode::Char('?') => app_state.show_help(),
        _ => {}
    }
}

fn handle_help_mode(app_state: &mut AppState, key_code: KeyCode) {
    let line_count = app_state.help_text.lines().count();
    let max_scroll = line_count.saturating_sub(app_state.help_visible_lines);

    match key_code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app_state.input_mode = InputMode::Normal;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app_state.help_scroll = (app_state.help_scroll + 1).min(max_scroll);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app_state.help_scroll = app_state.help_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
