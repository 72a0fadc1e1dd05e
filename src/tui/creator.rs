use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::io::store::TicketStore;
use crate::model::config::load_config;

use super::editor::{EditLine, TextEdit};
use super::theme::Theme;
use super::widgets::render_modal;
use super::{normalize_message, with_terminal};

/// Which control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Title,
    Description,
}

/// Creator window state
struct CreatorApp {
    store: TicketStore,
    title: EditLine,
    description: TextEdit,
    focus: Focus,
    /// Blocking error modal, shown until dismissed
    error: Option<String>,
    /// Set when the ticket has been written and the window should close
    created: Option<u64>,
    should_quit: bool,
    theme: Theme,
    /// First visible description line
    description_scroll: usize,
}

impl CreatorApp {
    fn new(store: TicketStore, theme: Theme) -> Self {
        CreatorApp {
            store,
            title: EditLine::with_text("Title"),
            description: TextEdit::with_text("Description\n..."),
            focus: Focus::Title,
            error: None,
            created: None,
            should_quit: false,
            theme,
            description_scroll: 0,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.error.is_some() {
            // Blocking modal: any key dismisses, the operation stays
            // aborted.
            self.error = None;
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.submit(),
            (_, KeyCode::Esc) => self.should_quit = true,
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
                self.focus = match self.focus {
                    Focus::Title => Focus::Description,
                    Focus::Description => Focus::Title,
                };
            }
            _ => match self.focus {
                Focus::Title => {
                    // Enter moves on to the description, like tabbing.
                    if key.code == KeyCode::Enter {
                        self.focus = Focus::Description;
                    } else {
                        self.title.handle_key(key);
                    }
                }
                Focus::Description => {
                    self.description.handle_key(key);
                }
            },
        }
    }

    /// Write the ticket and advance the counter. Failure keeps the window
    /// open with a blocking error; success closes it.
    fn submit(&mut self) {
        match self.store.create(self.title.text(), self.description.text()) {
            Ok(number) => {
                self.created = Some(number);
                self.should_quit = true;
            }
            Err(e) => self.error = Some(normalize_message(&e.to_string())),
        }
    }
}

/// Run the ticket creator window. Returns after the ticket is created or
/// the window is dismissed.
pub fn run_creator(store: TicketStore) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::from_config(&load_config().ui);
    let mut app = CreatorApp::new(store, theme);

    with_terminal(|terminal| {
        while !app.should_quit {
            terminal.draw(|frame| render(frame, &mut app))?;

            if event::poll(Duration::from_millis(250))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                app.handle_key(key);
            }
        }
        Ok(())
    })?;

    if let Some(number) = app.created {
        println!("created ticket {}", number);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(frame: &mut Frame, app: &mut CreatorApp) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let [title_area, description_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_title(frame, app, title_area);
    render_description(frame, app, description_area);
    render_status(frame, app, status_area);

    if let Some(message) = &app.error {
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
}

fn field_block(app: &CreatorApp, name: &'static str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.dim)
    };
    Block::default()
        .title(Span::styled(format!(" {} ", name), border))
        .borders(Borders::ALL)
        .border_style(border)
}

fn render_title(frame: &mut Frame, app: &CreatorApp, area: Rect) {
    let focused = app.focus == Focus::Title;
    let block = field_block(app, "Title", focused);
    let inner = block.inner(area);

    let style = Style::default()
        .fg(app.theme.text_bright)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Span::styled(app.title.text().to_string(), style)).block(block),
        area,
    );

    if focused && app.error.is_none() {
        let col = (app.title.cursor_col() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + col, inner.y));
    }
}

fn render_description(frame: &mut Frame, app: &mut CreatorApp, area: Rect) {
    let focused = app.focus == Focus::Description;
    let block = field_block(app, "Description", focused);
    let inner = block.inner(area);

    // Keep the cursor line inside the viewport.
    let (cursor_line, cursor_col) = app.description.cursor_position();
    let visible = inner.height.max(1) as usize;
    if cursor_line < app.description_scroll {
        app.description_scroll = cursor_line;
    } else if cursor_line >= app.description_scroll + visible {
        app.description_scroll = cursor_line + 1 - visible;
    }

    let style = Style::default().fg(app.theme.text);
    let lines: Vec<Line> = app
        .description
        .lines()
        .into_iter()
        .skip(app.description_scroll)
        .take(visible)
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if focused && app.error.is_none() {
        let row = (cursor_line - app.description_scroll) as u16;
        let col = (cursor_col as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + col, inner.y + row));
    }
}

fn render_status(frame: &mut Frame, app: &CreatorApp, area: Rect) {
    let hint = "tab switch field   ctrl-s create   esc cancel";
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(app.theme.dim))),
        area,
    );
}
