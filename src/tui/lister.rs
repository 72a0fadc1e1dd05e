use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::io::open::open_ticket;
use crate::io::settings::{WindowSettings, read_settings, settings_path, write_settings};
use crate::io::store::TicketStore;
use crate::model::config::load_config;
use crate::model::ticket::Ticket;
use crate::ops::placement::{Bounds, WorkArea, capture_bounds, restore_bounds};
use crate::ops::search;
use crate::util::unicode;

use super::editor::EditLine;
use super::theme::Theme;
use super::widgets::render_modal;
use super::{normalize_message, with_terminal};

/// Current interaction mode
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// Typing in the search box (initial mode)
    Search,
    /// Moving the row cursor
    Navigate,
    /// Yes/no confirmation for deleting the row at the given index
    ConfirmDelete(usize),
    /// Blocking error modal
    Error(String),
}

/// Lister window state
struct ListerApp {
    store: TicketStore,
    tickets: Vec<Ticket>,
    /// Rows stay visible after deletion but turn inert
    deleted: Vec<bool>,
    /// One emphasis flag per ticket; `None` means no search is active
    matches: Option<Vec<bool>>,
    search: EditLine,
    mode: Mode,
    cursor: usize,
    scroll: usize,
    /// List viewport height from the last render, for paging
    list_height: usize,
    theme: Theme,
    should_quit: bool,
}

impl ListerApp {
    fn new(store: TicketStore, tickets: Vec<Ticket>, theme: Theme) -> Self {
        let deleted = vec![false; tickets.len()];
        ListerApp {
            store,
            tickets,
            deleted,
            matches: None,
            search: EditLine::new(),
            mode: Mode::Search,
            cursor: 0,
            scroll: 0,
            list_height: 1,
            theme,
            should_quit: false,
        }
    }

    fn max_scroll(&self) -> usize {
        self.tickets.len().saturating_sub(self.list_height)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) {
        match &self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Navigate => self.handle_navigate_key(key),
            Mode::ConfirmDelete(index) => {
                let index = *index;
                self.handle_confirm_key(key, index);
            }
            Mode::Error(_) => {
                // Blocking modal: any key dismisses it.
                self.mode = Mode::Navigate;
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.run_search(),
            KeyCode::Esc | KeyCode::Tab => self.mode = Mode::Navigate,
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(self.list_height),
            KeyCode::PageDown => {
                self.scroll = (self.scroll + self.list_height).min(self.max_scroll())
            }
            _ => {
                self.search.handle_key(key);
            }
        }
    }

    fn handle_navigate_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('/') | KeyCode::Tab => self.mode = Mode::Search,
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.tickets.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::PageUp => self.cursor = self.cursor.saturating_sub(self.list_height),
            KeyCode::PageDown => {
                if !self.tickets.is_empty() {
                    self.cursor = (self.cursor + self.list_height).min(self.tickets.len() - 1);
                }
            }
            KeyCode::Char('g') | KeyCode::Home => self.cursor = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.cursor = self.tickets.len().saturating_sub(1);
            }
            KeyCode::Enter => self.open_row(),
            KeyCode::Char('x') | KeyCode::Char('d') | KeyCode::Delete => {
                if self.row_active(self.cursor) {
                    self.mode = Mode::ConfirmDelete(self.cursor);
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, index: usize) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = Mode::Navigate;
                self.delete_row(index);
            }
            KeyCode::Char('n') | KeyCode::Esc => self.mode = Mode::Navigate,
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    fn row_active(&self, index: usize) -> bool {
        index < self.tickets.len() && !self.deleted[index]
    }

    /// Run the query in the search box: normalize it, write the normalized
    /// form back into the box, and recompute row emphasis.
    fn run_search(&mut self) {
        let normalized = search::normalize_query(self.search.text());
        self.matches = search::search(&self.tickets, &normalized);
        self.search.set_text(normalized);
    }

    fn open_row(&mut self) {
        if !self.row_active(self.cursor) {
            return;
        }
        if let Err(e) = open_ticket(&self.tickets[self.cursor].path) {
            self.mode = Mode::Error(normalize_message(&e.to_string()));
        }
    }

    /// Remove the row's file. The row stays in the list either way; on
    /// success it turns inert.
    fn delete_row(&mut self, index: usize) {
        match self.store.delete(&self.tickets[index]) {
            Ok(()) => self.deleted[index] = true,
            Err(e) => self.mode = Mode::Error(normalize_message(&e.to_string())),
        }
    }

    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.list_height {
            self.scroll = self.cursor + 1 - self.list_height;
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run the ticket lister window.
pub fn run_lister(store: TicketStore) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::from_config(&load_config().ui);
    let settings_file = settings_path();
    let mut settings = read_settings(&settings_file).unwrap_or_default();

    // A scan failure still opens the window, with the error up front and an
    // empty list behind it.
    let (tickets, scan_error) = match store.scan() {
        Ok(tickets) => (tickets, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    let mut app = ListerApp::new(store, tickets, theme);
    if let Some(message) = scan_error {
        app.mode = Mode::Error(normalize_message(&message));
    }

    with_terminal(|terminal| {
        // The terminal is the only display region the shell can see: one
        // work area at the origin. The terminal itself cannot be
        // repositioned, so a position reset (saved display gone) shows up
        // as the list starting back at the top instead.
        let size = terminal.size()?;
        let areas = [WorkArea {
            x: 0,
            y: 0,
            width: size.width as u32,
            height: size.height as u32,
        }];
        let bounds = restore_bounds(&settings, &areas);
        app.scroll = if (bounds.x, bounds.y) == (settings.x, settings.y) {
            settings.scroll.min(app.tickets.len().saturating_sub(1))
        } else {
            0
        };

        while !app.should_quit {
            terminal.draw(|frame| render(frame, &mut app))?;

            if event::poll(Duration::from_millis(250))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                app.handle_key(key);
            }
        }

        // Record the closing bounds and display corner. A failed settings
        // write is not worth blocking shutdown over.
        let size = terminal.size()?;
        capture_bounds(
            &mut settings,
            Bounds {
                x: 0,
                y: 0,
                width: size.width as u32,
                height: size.height as u32,
            },
            &areas,
        );
        settings.scroll = app.scroll;
        let _ = write_settings(&settings_file, &settings);

        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(frame: &mut Frame, app: &mut ListerApp) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let [search_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_search(frame, app, search_area);
    render_list(frame, app, list_area);
    render_status(frame, app, status_area);

    match &app.mode {
        Mode::ConfirmDelete(index) => {
            let number = app.tickets[*index].number;
            render_modal(
                frame,
                &app.theme,
                area,
                "Delete Ticket?",
                &format!("Really delete ticket {}?", number),
                "y delete   n cancel",
                app.theme.red,
            );
        }
        Mode::Error(message) => {
            render_modal(
                frame,
                &app.theme,
                area,
                "Error",
                message,
                "press any key",
                app.theme.red,
            );
        }
        _ => {}
    }
}

fn render_search(frame: &mut Frame, app: &ListerApp, area: Rect) {
    let focused = app.mode == Mode::Search;
    let border = if focused {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.dim)
    };
    let block = Block::default()
        .title(Span::styled(" Search ", border))
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            app.search.text().to_string(),
            Style::default().fg(app.theme.text_bright),
        ))
        .block(block),
        area,
    );

    if focused {
        let col = (app.search.cursor_col() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + col, inner.y));
    }
}

fn render_list(frame: &mut Frame, app: &mut ListerApp, area: Rect) {
    app.list_height = area.height.max(1) as usize;
    if app.mode == Mode::Navigate {
        app.ensure_cursor_visible();
    }

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, ticket) in app
        .tickets
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(app.list_height)
    {
        lines.push(row_line(app, i, ticket, width));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Build one list row: bold number, then the title, emphasized when the
/// active search matches the ticket and dimmed once the row is deleted.
fn row_line<'a>(app: &ListerApp, index: usize, ticket: &'a Ticket, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let deleted = app.deleted[index];
    let selected = app.mode != Mode::Search && app.cursor == index;

    let row_bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };

    let number_style = if deleted {
        Style::default().fg(theme.dim).bg(row_bg)
    } else {
        Style::default()
            .fg(theme.highlight)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    };

    let emphasized = app
        .matches
        .as_ref()
        .map(|flags| flags[index])
        .unwrap_or(false);
    let mut title_style = Style::default().bg(row_bg);
    title_style = if deleted {
        title_style.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else if emphasized {
        title_style
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD)
    } else {
        title_style.fg(theme.text)
    };

    let number = format!("{:>4}  ", ticket.number);
    let title_width = width.saturating_sub(number.len() + 1);
    let title = unicode::truncate_to_width(&ticket.title, title_width);

    let pad_width = width
        .saturating_sub(number.len())
        .saturating_sub(unicode::display_width(&title));
    let pad = " ".repeat(pad_width);

    Line::from(vec![
        Span::styled(number, number_style),
        Span::styled(title, title_style),
        Span::styled(pad, Style::default().bg(row_bg)),
    ])
}

fn render_status(frame: &mut Frame, app: &ListerApp, area: Rect) {
    let hint = match app.mode {
        Mode::Search => "enter search   tab rows   \u{2191}\u{2193} scroll",
        _ => "\u{2191}\u{2193} move   enter open   x delete   / search   q quit",
    };
    let count = app.tickets.len();
    let left = format!(
        "{} ticket{}   ",
        count,
        if count == 1 { "" } else { "s" }
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(left, Style::default().fg(app.theme.text)),
            Span::styled(hint, Style::default().fg(app.theme.dim)),
        ])),
        area,
    );
}
