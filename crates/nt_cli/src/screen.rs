use std::io;

use crossterm::cursor::Show;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use nt_core::{Result, SearchResult};
use nt_feed::{Screen, SearchController};
use tracing::{debug, info, warn};
use tui::backend::{Backend, CrosstermBackend};
use tui::layout::{Constraint, Direction, Layout};
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans, Text};
use tui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use tui::{Frame, Terminal};

use crate::view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit(String),
    Redraw,
    Ignore,
}

/// Input state of the screen. Search state lives in the controller.
#[derive(Debug, Default)]
pub struct App {
    input: String,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// `loading` disables submission; typing stays allowed.
    pub fn handle_key(&mut self, key: KeyEvent, loading: bool) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::Ignore;
        }
        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Enter if loading => Action::Ignore,
            KeyCode::Enter => Action::Submit(self.input.clone()),
            KeyCode::Backspace => {
                self.input.pop();
                Action::Redraw
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                Action::Redraw
            }
            _ => Action::Ignore,
        }
    }
}

/// Runs `restore` when dropped, so early returns and panics unwind through it.
struct Restore<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for Restore<F> {
    fn drop(&mut self) {
        (self.restore)()
    }
}

fn enter_terminal() -> Result<Restore<fn()>> {
    enable_raw_mode()?;
    let guard = Restore {
        restore: restore_terminal as fn(),
    };
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(guard)
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!("Failed to leave raw mode: {}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!("Failed to leave the alternate screen: {}", e);
    }
}

/// Runs the interactive screen until the user quits.
pub async fn run(controller: SearchController) -> Result<()> {
    let _terminal_guard = enter_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut terminal, controller).await
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: SearchController,
) -> Result<()> {
    let mut app = App::new();
    let mut screens = controller.subscribe();
    let mut events = EventStream::new();

    info!("Screen mounted, loading initial headlines");
    tokio::spawn({
        let controller = controller.clone();
        async move { controller.mount().await }
    });

    loop {
        let screen = screens.borrow_and_update().clone();
        terminal.draw(|f| draw(f, &app, &screen))?;

        tokio::select! {
            changed = screens.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    let loading = screen.state.is_loading() || controller.is_in_flight();
                    match app.handle_key(key, loading) {
                        Action::Quit => break,
                        Action::Submit(query) => {
                            debug!("Submitting {:?}", query);
                            let controller = controller.clone();
                            tokio::spawn(async move { controller.search(&query).await });
                        }
                        Action::Redraw | Action::Ignore => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        }
    }
    Ok(())
}

fn draw<B: Backend>(f: &mut Frame<B>, app: &App, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(f.size());

    let header = Paragraph::new(view::status_line(screen.device.as_ref()))
        .block(Block::default().borders(Borders::ALL).title("Noticias"));
    f.render_widget(header, chunks[0]);

    let loading = screen.state.is_loading();
    let (title, style) = if loading {
        ("Buscar (en curso...)", Style::default().fg(Color::DarkGray))
    } else {
        ("Buscar [Enter] · Salir [Esc]", Style::default())
    };
    let input = Paragraph::new(app.input())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, chunks[1]);
    if !loading {
        f.set_cursor(chunks[1].x + app.input().chars().count() as u16 + 1, chunks[1].y + 1);
    }

    let body = Block::default().borders(Borders::ALL);
    let result = screen.state.view();
    match (&result, view::message(&result)) {
        (SearchResult::Results(articles), None) => {
            let items: Vec<ListItem> = articles.iter().map(article_item).collect();
            f.render_widget(List::new(items).block(body), chunks[2]);
        }
        (_, message) => {
            let style = match &result {
                SearchResult::Error(_) | SearchResult::NoConnection => {
                    Style::default().fg(Color::Red)
                }
                _ => Style::default(),
            };
            let paragraph = Paragraph::new(message.unwrap_or_default())
                .style(style)
                .wrap(Wrap { trim: true })
                .block(body);
            f.render_widget(paragraph, chunks[2]);
        }
    }
}

fn article_item(article: &nt_core::Article) -> ListItem<'static> {
    let mut lines = view::article_lines(article).into_iter();
    let mut spans = Vec::new();
    if let Some(title) = lines.next() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        spans.push(Spans::from(Span::styled(title, bold)));
    }
    if let Some(description) = lines.next() {
        spans.push(Spans::from(description));
    }
    for meta in lines {
        spans.push(Spans::from(Span::styled(meta, Style::default().fg(Color::DarkGray))));
    }
    spans.push(Spans::from(""));
    ListItem::new(Text::from(spans))
}
