use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent};
use crossterm::event::{KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Terminal;

use folio_core::config::GalleryConfig;
use folio_core::{
    GalleryAction, GalleryController, GalleryRenderer, JsonFileSessionStore, LoadPhase,
    MemoryNavigation, ProjectRecord, ProjectSource,
};

use crate::cards::CardView;

type TuiController = GalleryController<TuiRenderer, MemoryNavigation, JsonFileSessionStore>;

/// Card list shown in the content pane.
#[derive(Debug, Default)]
pub struct TuiRenderer {
    cards: Vec<CardView>,
    load_more_visible: bool,
    error: Option<String>,
    scroll: u16,
}

impl GalleryRenderer for TuiRenderer {
    fn render(&mut self, items: &[ProjectRecord], append: bool) {
        if !append {
            self.cards.clear();
            self.scroll = 0;
        }
        self.cards.extend(items.iter().map(CardView::from_project));
    }

    fn set_load_more_visible(&mut self, visible: bool) {
        self.load_more_visible = visible;
    }

    fn show_fetch_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

struct App {
    controller: TuiController,
    source_label: String,
    status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    border: Color,
    muted: Color,
    danger: Color,
}

const PALETTE: UiPalette = UiPalette {
    accent: Color::Cyan,
    border: Color::DarkGray,
    muted: Color::Gray,
    danger: Color::Red,
};

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            crossterm::cursor::Show
        );
    }
}

pub fn run(
    config: &GalleryConfig,
    source: &dyn ProjectSource,
    navigation: MemoryNavigation,
    session: JsonFileSessionStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller =
        GalleryController::new(config, TuiRenderer::default(), navigation, session)?;
    let mut app = App {
        controller,
        source_label: source.describe(),
        status: None,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        crossterm::cursor::Hide
    )?;
    let _guard = TuiGuard; // Ensures terminal is restored on exit or panic

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The fetch blocks, so show the loading frame first.
    terminal.draw(|f| ui(f, &app))?;
    let resolved = app.controller.bootstrap(source);
    app.status = Some(format!(
        "opened {} (from {})",
        resolved.tab_id,
        resolved.origin.label()
    ));

    run_app(&mut terminal, &mut app).map_err(|e| e.into())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(key, app) == KeyOutcome::Quit {
                return Ok(());
            }
        }
    }
}

fn handle_key(key: KeyEvent, app: &mut App) -> KeyOutcome {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Quit
        }
        KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => select_adjacent(app, -1),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => select_adjacent(app, 1),
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            let tab_id = app
                .controller
                .state()
                .tabs
                .get(index)
                .map(|tab| tab.id.clone());
            match tab_id {
                Some(tab_id) => select_tab(app, tab_id),
                None => app.status = Some(format!("no tab {digit}")),
            }
        }
        KeyCode::Char('m') | KeyCode::Enter => {
            app.status = if app.controller.load_more() {
                None
            } else {
                Some("nothing more to load".to_string())
            };
        }
        KeyCode::Char('b') | KeyCode::Backspace => {
            if app.controller.navigation_mut().back() {
                app.controller.on_history_navigation();
                app.status = None;
            } else {
                app.status = Some("no earlier history".to_string());
            }
        }
        KeyCode::Char('f') => {
            if app.controller.navigation_mut().forward() {
                app.controller.on_history_navigation();
                app.status = None;
            } else {
                app.status = Some("no later history".to_string());
            }
        }
        KeyCode::Up | KeyCode::Char('k') => scroll_by(app, -1),
        KeyCode::Down | KeyCode::Char('j') => scroll_by(app, 1),
        KeyCode::PageUp => scroll_by(app, -10),
        KeyCode::PageDown => scroll_by(app, 10),
        _ => {}
    }
    KeyOutcome::Continue
}

fn select_tab(app: &mut App, tab_id: String) {
    let warnings = app
        .controller
        .dispatch(GalleryAction::select_tab(tab_id, true));
    app.status = warnings.first().map(ToString::to_string);
}

fn select_adjacent(app: &mut App, delta: isize) {
    let state = app.controller.state();
    if state.tabs.is_empty() {
        return;
    }
    let len = state.tabs.len() as isize;
    let next = match state
        .active_tab
        .as_deref()
        .and_then(|id| state.tabs.position(id))
    {
        Some(index) => (index as isize + delta).rem_euclid(len) as usize,
        None => 0,
    };
    let tab_id = state.tabs.get(next).map(|tab| tab.id.clone());
    if let Some(tab_id) = tab_id {
        select_tab(app, tab_id);
    }
}

fn scroll_by(app: &mut App, delta: i32) {
    let renderer = app.controller.renderer_mut();
    renderer.scroll = if delta < 0 {
        renderer.scroll.saturating_sub(delta.unsigned_abs() as u16)
    } else {
        renderer.scroll.saturating_add(delta as u16)
    };
}

fn card_lines(card: &CardView, palette: UiPalette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(card.year.clone(), Style::default().fg(palette.muted)),
            Span::raw("  "),
            Span::styled(card.kind.clone(), Style::default().fg(palette.accent)),
        ]),
        Line::from(Span::styled(
            card.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if !card.address.is_empty() {
        lines.push(Line::from(card.address.clone()));
    }
    if !card.tags.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Scope of work: ", Style::default().fg(palette.muted)),
            Span::raw(card.tags.clone()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("-> {}", card.link),
        Style::default().fg(palette.border),
    )));
    lines.push(Line::from(""));
    lines
}

fn ui(f: &mut ratatui::Frame, app: &App) {
    let palette = PALETTE;
    let state = app.controller.state();
    let renderer = app.controller.renderer();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Cards
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    // Header
    let header_text = format!(
        "Folio | {} | {} | step {} | {} of {} shown | {}",
        app.source_label,
        state.phase.label(),
        state.filter.step,
        renderer.cards.len(),
        state.filtered().len(),
        app.controller.navigation().location()
    );
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(palette.accent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
    f.render_widget(header, chunks[0]);

    // Tabs
    let titles: Vec<Line> = state
        .tabs
        .iter()
        .enumerate()
        .map(|(idx, tab)| Line::from(format!("{} {}", idx + 1, tab.label)))
        .collect();
    let mut tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title("Portfolio"),
        )
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    if let Some(index) = state
        .active_tab
        .as_deref()
        .and_then(|id| state.tabs.position(id))
    {
        tabs = tabs.select(index);
    }
    f.render_widget(tabs, chunks[1]);

    // Cards
    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = &renderer.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(palette.danger),
        )));
        lines.push(Line::from(""));
    }
    if state.phase == LoadPhase::Pending {
        lines.push(Line::from("Loading projects..."));
    } else if renderer.cards.is_empty() && renderer.error.is_none() {
        lines.push(Line::from(Span::styled(
            "No projects in this category.",
            Style::default().fg(palette.muted),
        )));
    }
    for card in &renderer.cards {
        lines.extend(card_lines(card, palette));
    }
    if renderer.load_more_visible {
        lines.push(Line::from(Span::styled(
            "[ m ] Load more",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
    }
    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((renderer.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
    f.render_widget(content, chunks[2]);

    // Footer
    let mut footer = vec![Span::styled(
        "←/→ tabs · 1-9 jump · m more · b/f history · j/k scroll · q quit",
        Style::default().fg(palette.muted),
    )];
    if let Some(status) = &app.status {
        footer.push(Span::raw("  "));
        footer.push(Span::styled(status.clone(), Style::default().fg(palette.accent)));
    }
    f.render_widget(Paragraph::new(Line::from(footer)), chunks[3]);
}

#[cfg(test)]
mod tests {
    use folio_core::StaticProjectSource;
    use ratatui::backend::TestBackend;

    use super::*;
    use pretty_assertions::assert_eq;

    fn project(id: &str, kind: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            name: format!("Project {id}"),
            kind: kind.to_string(),
            year: 2024,
            tags: vec!["Interior".to_string()],
            image: String::new(),
            address: String::new(),
        }
    }

    #[test]
    fn renderer_replaces_then_appends() {
        let mut renderer = TuiRenderer {
            scroll: 5,
            ..TuiRenderer::default()
        };
        renderer.render(&[project("1", "Premium")], false);
        assert_eq!(renderer.scroll, 0);
        renderer.render(&[project("2", "Premium")], true);
        assert_eq!(renderer.cards.len(), 2);
        renderer.render(&[project("3", "Comfort")], false);
        assert_eq!(renderer.cards.len(), 1);
        assert_eq!(renderer.cards[0].link, "projects-3");
    }

    #[test]
    fn gallery_frame_draws_tabs_and_cards() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let session = JsonFileSessionStore::open(dir.path().join("session.json")).expect("session");
        let mut controller = GalleryController::new(
            &GalleryConfig::default(),
            TuiRenderer::default(),
            MemoryNavigation::new("#premium"),
            session,
        )
        .expect("valid config");
        controller.bootstrap(&StaticProjectSource::ok(vec![
            project("1", "Premium"),
            project("2", "Comfort"),
        ]));
        let app = App {
            controller,
            source_label: "test".to_string(),
            status: None,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|f| ui(f, &app)).expect("draw");

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Project 1"));
        assert!(!screen.contains("Project 2"));
        assert!(screen.contains("Portfolio"));
        assert_eq!(app.controller.state().active_tab.as_deref(), Some("premium"));
    }
}
