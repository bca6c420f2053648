use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};
use std::{io, time::Duration};
use uuid::Uuid;

use crate::app::AppState;
use crate::app::InputMode;
use crate::placement::PlacementStatus;
use crate::plate::{PLATE_COLUMNS, PLATE_ROWS, Well};
use crate::ui::handlers::handle_key_event;
use crate::utils::{column_letter, truncate_to_width};

const FILE_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::LightBlue,
    Color::LightRed,
    Color::LightGreen,
    Color::LightMagenta,
];

const ROW_HEADER_WIDTH: u16 = 3;

pub fn run_app(mut app_state: AppState) -> Result<()> {
    // Setup terminal
    let mut terminal = setup_terminal()?;

    // Main event loop
    while !app_state.should_quit {
        terminal.draw(|f| ui(f, &mut app_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(&mut app_state, key);
                }
            }
        }
    }

    // Restore terminal
    restore_terminal(&mut terminal)?;

    Ok(())
}

/// Setup the terminal for the application
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn file_color(app_state: &AppState, id: Uuid) -> Color {
    let position = app_state
        .session
        .files()
        .iter()
        .position(|file| file.id == id)
        .unwrap_or(0);

    FILE_COLORS[position % FILE_COLORS.len()]
}

fn ui(f: &mut Frame, app_state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar and sheet tabs
            Constraint::Min(PLATE_ROWS as u16 + 3), // Plate and file list
            Constraint::Length(app_state.info_panel_height as u16), // Info panel
            Constraint::Length(1), // Status bar
        ])
        .split(f.size());

    draw_title_with_tabs(f, app_state, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    draw_plate(f, app_state, body[0]);
    draw_file_list(f, app_state, body[1]);
    draw_info_panel(f, app_state, chunks[2]);
    draw_status_bar(f, app_state, chunks[3]);

    if let InputMode::Help = app_state.input_mode {
        draw_help_popup(f, app_state, f.size());
    }
}

fn draw_plate(f: &mut Frame, app_state: &AppState, area: Rect) {
    let result = app_state.session.result();
    let column = app_state.session.preview_column();
    let column_label = result
        .column_names
        .get(column)
        .cloned()
        .unwrap_or_else(|| column_letter(column));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightCyan))
        .title(format!(" Plate preview: column {} ({}) ", column_letter(column), column_label));

    // Empty preview: show the reason instead of an empty grid
    if let Some(diagnostic) = &result.diagnostic {
        let message = Paragraph::new(diagnostic.to_string())
            .block(block)
            .style(Style::default().fg(Color::Yellow))
            .wrap(ratatui::widgets::Wrap { trim: false });
        f.render_widget(message, area);
        return;
    }

    let available_width = area.width.saturating_sub(2 + ROW_HEADER_WIDTH);
    let cell_width = (available_width / PLATE_COLUMNS as u16).max(3);

    let mut constraints = Vec::with_capacity(PLATE_COLUMNS + 1);
    constraints.push(Constraint::Length(ROW_HEADER_WIDTH));
    constraints.extend((0..PLATE_COLUMNS).map(|_| Constraint::Length(cell_width)));

    let header_style = Style::default().bg(Color::DarkGray).fg(Color::Gray);

    let mut header_cells = Vec::with_capacity(PLATE_COLUMNS + 1);
    header_cells.push(Cell::from("").style(header_style));
    for col in 1..=PLATE_COLUMNS {
        header_cells.push(Cell::from(col.to_string()).style(header_style));
    }
    let header = Row::new(header_cells).height(1);

    let selected_id = app_state.selected().map(|file| file.id);

    let rows = result.preview.rows().into_iter().enumerate().map(|(row, cells)| {
        let mut row_cells = Vec::with_capacity(PLATE_COLUMNS + 1);

        let letter = Well::from_row_column(row, 1)
            .map(|well| well.row_letter().to_string())
            .unwrap_or_default();
        row_cells.push(Cell::from(letter).style(header_style));

        for cell in cells {
            let content = truncate_to_width(&cell.value, cell_width.saturating_sub(1) as usize);

            let style = match cell.source_file_id {
                Some(id) if Some(id) == selected_id => Style::default()
                    .bg(file_color(app_state, id))
                    .fg(Color::Black),
                Some(id) => Style::default().fg(file_color(app_state, id)),
                None => Style::default().fg(Color::DarkGray),
            };

            let content = if cell.source_file_id.is_none() {
                "·".to_string()
            } else {
                content
            };

            row_cells.push(Cell::from(content).style(style));
        }

        Row::new(row_cells)
    });

    let table = Table::new(std::iter::once(header).chain(rows))
        .block(block)
        .widths(&constraints);

    f.render_widget(table, area);
}

fn draw_file_list(f: &mut Frame, app_state: &AppState, area: Rect) {
    let sheet = app_state.session.active_sheet();
    let files = app_state.session.files();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Files ({}) ", files.len()));

    if files.is_empty() {
        let hint = Paragraph::new("No files loaded. Use :open [paths...]")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, area);
        return;
    }

    let lines: Vec<Line> = files
        .iter()
        .zip(app_state.session.outcomes())
        .enumerate()
        .map(|(index, (file, outcome))| {
            let color = FILE_COLORS[index % FILE_COLORS.len()];
            let marker = if index == app_state.selected_file { "> " } else { "  " };

            let (placement, placement_style) = match outcome.status {
                PlacementStatus::Unplaceable => (
                    format!("{} (no room)", outcome.start),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
                ),
                PlacementStatus::Corrected { .. } | PlacementStatus::Requested => {
                    let end = outcome
                        .start
                        .offset(outcome.length.saturating_sub(1))
                        .unwrap_or(outcome.start);
                    (format!("{}-{}", outcome.start, end), Style::default())
                }
            };

            let rows = file.row_count(sheet);
            let rows_label = if rows > outcome.length {
                format!(" {}/{} rows", outcome.length, rows)
            } else {
                format!(" {} rows", rows)
            };

            let name_style = if index == app_state.selected_file {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };

            Line::from(vec![
                Span::raw(marker),
                Span::styled(file.name.clone(), name_style),
                Span::raw(" "),
                Span::styled(placement, placement_style),
                Span::styled(rows_label, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}

fn draw_info_panel(f: &mut Frame, app_state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let result = app_state.session.result();

    let mut warnings = Vec::new();
    if let Some(overflow) = &result.overflow {
        warnings.push(Line::from(Span::styled(
            overflow.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }
    if !app_state.is_selected_placeable() {
        if let Some(file) = app_state.selected() {
            warnings.push(Line::from(Span::styled(
                format!("{} cannot be placed: not enough free wells", file.name),
                Style::default().fg(Color::LightRed),
            )));
        }
    }
    if warnings.is_empty() {
        warnings.push(Line::from(format!(
            "{} of 96 wells filled, {} column(s)",
            result.preview.filled_count(),
            result.universal_width
        )));
    }

    let warning_paragraph = Paragraph::new(warnings)
        .block(Block::default().borders(Borders::ALL).title(" Plate "))
        .wrap(ratatui::widgets::Wrap { trim: false });
    f.render_widget(warning_paragraph, chunks[0]);

    let notification_block = Block::default()
        .borders(Borders::ALL)
        .title(" Notifications ");

    // Calculate how many notifications can be shown
    let notification_height = notification_block.inner(chunks[1]).height as usize;

    let notifications_text = if app_state.notification_messages.len() <= notification_height {
        app_state.notification_messages.join("\n")
    } else {
        // Show only the most recent notifications that fit
        let start_idx = app_state.notification_messages.len() - notification_height;
        app_state.notification_messages[start_idx..].join("\n")
    };

    let notification_paragraph = Paragraph::new(notifications_text)
        .block(notification_block)
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(notification_paragraph, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, app_state: &AppState, area: Rect) {
    match app_state.input_mode {
        InputMode::Normal => {
            let status = "?=help | j/k=select J/K=reorder h/l=column [ ]=sheet x=remove :C4=start well :w=xlsx :ej=json :q=quit";

            let status_widget = Paragraph::new(status)
                .style(Style::default())
                .alignment(ratatui::layout::Alignment::Left);

            f.render_widget(status_widget, area);
        }

        InputMode::Command => {
            let text = Line::from(vec![
                Span::styled(":", Style::default()),
                Span::styled(
                    app_state.input_buffer.clone(),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
            ]);

            let status_widget = Paragraph::new(text)
                .style(Style::default())
                .alignment(ratatui::layout::Alignment::Left);

            f.render_widget(status_widget, area);
        }

        InputMode::Help => {
            // No status bar in help mode
        }
    }
}

fn draw_help_popup(f: &mut Frame, app_state: &mut AppState, area: Rect) {
    // Clear the background
    f.render_widget(Clear, area);

    let line_count = app_state.help_text.lines().count() as u16;
    let content_height = line_count + 2; // +2 for borders

    let max_line_width = app_state
        .help_text
        .lines()
        .map(|line| line.chars().count() as u16)
        .max()
        .unwrap_or(40);

    let content_width = max_line_width + 4; // +4 for borders and padding

    // Ensure popup fits within screen
    let popup_width = content_width.min(area.width.saturating_sub(4));
    let popup_height = content_height.min(area.height.saturating_sub(4));

    // Center the popup on screen
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    let visible_lines = popup_height.saturating_sub(2) as usize;
    app_state.help_visible_lines = visible_lines;

    let max_scroll = (line_count as usize).saturating_sub(visible_lines);
    app_state.help_scroll = app_state.help_scroll.min(max_scroll);

    let mut title = " [ESC/Enter to close] ".to_string();

    if max_scroll > 0 {
        let scroll_indicator = if app_state.help_scroll == 0 {
            " [↓ or j to scroll] "
        } else if app_state.help_scroll >= max_scroll {
            " [↑ or k to scroll] "
        } else {
            " [↑↓ or j/k to scroll] "
        };
        title.push_str(scroll_indicator);
    }

    let help_block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightCyan))
        .style(Style::default().bg(Color::Blue).fg(Color::White));

    let help_paragraph = Paragraph::new(app_state.help_text.clone())
        .block(help_block)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .scroll((app_state.help_scroll as u16, 0));

    f.render_widget(help_paragraph, popup_area);
}

fn draw_title_with_tabs(f: &mut Frame, app_state: &AppState, area: Rect) {
    let sheet_names = app_state.session.sheet_names();
    let current_index = app_state.session.active_sheet();

    let title_content = format!(" plate-merge: {} file(s) ", app_state.session.files().len());
    let title_width = title_content.chars().count() as u16;

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(title_width), Constraint::Min(0)])
        .split(area);

    let title_widget = Paragraph::new(title_content)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(title_widget, horizontal_layout[0]);

    let spans: Vec<Span> = sheet_names
        .iter()
        .enumerate()
        .flat_map(|(index, name)| {
            let style = if index == current_index {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            [Span::styled(format!(" {} ", name), style), Span::raw(" ")]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)), horizontal_layout[1]);
}
