//! select-demo - two select fields backed by a store
//!
//! A single select and a multi select share one option list. Every change is
//! an action reduced into the store, and the fields render from the store.
//!
//! Keys: Tab = switch field, q/Esc = quit, Ctrl+C = quit. Mouse: click the
//! fields, their options and chips; scroll long menus.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, KeyCode,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Position},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tui_select::{
    process_raw_event, spawn_event_poller, Action, Component, ComponentId, EventContext,
    EventKind, FeatureToggles, LayerStack, LoggingMiddleware, RawEvent, SelectField,
    SelectFieldProps, SelectOption, Selection, StoreWithMiddleware, DEFAULT_PLACEHOLDER,
};

const SINGLE: ComponentId = ComponentId(0);
const MULTI: ComponentId = ComponentId(1);

const FIELD_WIDTH: u16 = 44;
const TICK_INTERVAL: Duration = Duration::from_millis(50);

type Choice = SelectOption<u32>;

/// Select field demo - tui-select example
#[derive(Parser, Debug)]
#[command(name = "select-demo")]
#[command(about = "Single and multi select fields with search and portal menus")]
struct Args {
    /// Disable the search box in the menus
    #[arg(long)]
    no_search: bool,

    /// Render menus in a top-level layer instead of inline
    #[arg(long)]
    portal: bool,

    /// Text shown while nothing is selected
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,

    /// JSON object of feature toggles applied to both fields
    #[arg(long, value_name = "FILE")]
    toggles: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG filters, default `debug`)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug)]
enum DemoError {
    Io(io::Error),
    Toggles {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::Io(e) => write!(f, "Terminal I/O failed: {}", e),
            DemoError::Toggles { path, source } => {
                write!(f, "Invalid toggles file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::Io(e) => Some(e),
            DemoError::Toggles { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(e: io::Error) -> Self {
        DemoError::Io(e)
    }
}

// ============================================================================
// State, actions, reducer
// ============================================================================

struct AppState {
    fruit: Selection<Choice>,
    tags: Selection<Choice>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            fruit: Selection::empty(false),
            tags: Selection::empty(true),
        }
    }
}

#[derive(Clone, Debug)]
enum AppAction {
    FruitChanged(Selection<Choice>),
    TagsChanged(Selection<Choice>),
    Quit,
}

impl Action for AppAction {
    fn name(&self) -> &'static str {
        match self {
            AppAction::FruitChanged(_) => "FruitChanged",
            AppAction::TagsChanged(_) => "TagsChanged",
            AppAction::Quit => "Quit",
        }
    }
}

fn reducer(state: &mut AppState, action: AppAction) -> bool {
    match action {
        AppAction::FruitChanged(value) => {
            state.fruit = value;
            true
        }
        AppAction::TagsChanged(value) => {
            state.tags = value;
            true
        }
        AppAction::Quit => false, // handled in main loop
    }
}

// ============================================================================
// UI
// ============================================================================

struct Settings {
    options: Vec<Choice>,
    searchable: bool,
    portal: bool,
    placeholder: String,
    toggles: FeatureToggles,
}

impl Settings {
    fn props<'a>(
        &'a self,
        value: &'a Selection<Choice>,
        on_change: fn(Selection<Choice>) -> AppAction,
        multiple: bool,
        is_focused: bool,
    ) -> SelectFieldProps<'a, Choice, AppAction> {
        SelectFieldProps::new(&self.options, value, on_change)
            .multiple(multiple)
            .searchable(self.searchable)
            .use_portal(self.portal)
            .placeholder(&self.placeholder)
            .feature_toggles(&self.toggles)
            .focused(is_focused)
    }
}

fn single_props<'a>(
    settings: &'a Settings,
    ctx: &EventContext,
    state: &'a AppState,
) -> SelectFieldProps<'a, Choice, AppAction> {
    settings.props(
        &state.fruit,
        AppAction::FruitChanged,
        false,
        ctx.is_focused(SINGLE),
    )
}

fn multi_props<'a>(
    settings: &'a Settings,
    ctx: &EventContext,
    state: &'a AppState,
) -> SelectFieldProps<'a, Choice, AppAction> {
    settings.props(&state.tags, AppAction::TagsChanged, true, ctx.is_focused(MULTI))
}

fn describe(selection: &Selection<Choice>) -> String {
    if selection.is_empty() {
        return "nothing".to_string();
    }
    selection
        .items()
        .iter()
        .map(|o| o.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

struct DemoUi {
    single: SelectField<Choice>,
    multi: SelectField<Choice>,
    ctx: EventContext,
    settings: Settings,
}

impl DemoUi {
    fn new(settings: Settings) -> Self {
        let mut ctx = EventContext::new();
        ctx.set_focus(Some(SINGLE));
        Self {
            single: SelectField::new(),
            multi: SelectField::new(),
            ctx,
            settings,
        }
    }

    fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(FIELD_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(area);

        let single_height = self.single.height(
            &single_props(&self.settings, &self.ctx, state),
            column.width,
        );
        let multi_height = self
            .multi
            .height(&multi_props(&self.settings, &self.ctx, state), column.width);

        let [title, single_label, single_area, multi_label, multi_area, _, summary, help] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(single_height),
                Constraint::Length(1),
                Constraint::Length(multi_height),
                Constraint::Fill(1),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .areas(column);

        let dim = Style::default().fg(Color::DarkGray);
        frame.render_widget(
            Paragraph::new(" Select demo ").style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            title,
        );
        frame.render_widget(Paragraph::new("Single select").style(dim), single_label);
        frame.render_widget(Paragraph::new("Multi select").style(dim), multi_label);

        let mut layers = LayerStack::new();
        self.single.render(
            frame,
            single_area,
            single_props(&self.settings, &self.ctx, state).portal(&mut layers),
        );
        self.multi.render(
            frame,
            multi_area,
            multi_props(&self.settings, &self.ctx, state).portal(&mut layers),
        );
        self.ctx.set_component_area(SINGLE, single_area);
        self.ctx.set_component_area(MULTI, multi_area);

        let lines = vec![
            Line::from(format!("Selected: {}", describe(&state.fruit))),
            Line::from(format!("Selected: {}", describe(&state.tags))),
        ];
        frame.render_widget(Paragraph::new(lines), summary);
        frame.render_widget(
            Paragraph::new("Tab: switch field  q/Esc: quit").style(dim),
            help,
        );

        layers.flush(frame);
    }

    fn handle(&mut self, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        let menu_hit = event.left_click().and_then(|pos| self.menu_at(pos));
        if let Some(pos) = event.left_click() {
            match menu_hit {
                Some(id) => self.ctx.set_focus(Some(id)),
                None => {
                    self.ctx.focus_at(pos.x, pos.y);
                }
            }
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Tab => self.focus_next(),
                KeyCode::Esc => return vec![AppAction::Quit],
                KeyCode::Char('q') if !self.typing(state) => return vec![AppAction::Quit],
                _ => {}
            }
        }

        // A click on an open menu belongs to that field alone
        let tick = EventKind::Tick;
        let (single_event, multi_event) = match menu_hit {
            Some(SINGLE) => (event, &tick),
            Some(_) => (&tick, event),
            None => (event, event),
        };

        let mut actions: Vec<AppAction> = self
            .single
            .handle_event(single_event, single_props(&self.settings, &self.ctx, state))
            .into_iter()
            .collect();
        actions.extend(
            self.multi
                .handle_event(multi_event, multi_props(&self.settings, &self.ctx, state)),
        );
        actions
    }

    /// Whether a pending blur close needs ticks
    fn close_pending(&self) -> bool {
        self.single.is_close_pending() || self.multi.is_close_pending()
    }

    /// Whether keys currently go to a search box
    fn typing(&self, state: &AppState) -> bool {
        match self.ctx.focused_component {
            Some(SINGLE) => {
                self.single.is_open()
                    && single_props(&self.settings, &self.ctx, state)
                        .config()
                        .searchable
            }
            Some(MULTI) => {
                self.multi.is_open()
                    && multi_props(&self.settings, &self.ctx, state)
                        .config()
                        .searchable
            }
            _ => false,
        }
    }

    fn focus_next(&mut self) {
        let next = match self.ctx.focused_component {
            Some(SINGLE) => MULTI,
            _ => SINGLE,
        };
        self.ctx.set_focus(Some(next));
    }

    /// Field whose open menu is under `pos`
    ///
    /// Portal menus sit outside the fields' areas and above them. The multi
    /// field mounts last, so its menu is checked first.
    fn menu_at(&self, pos: Position) -> Option<ComponentId> {
        [(MULTI, &self.multi), (SINGLE, &self.single)]
            .into_iter()
            .find(|(_, field)| field.menu_contains(pos))
            .map(|(id, _)| id)
    }
}

// ============================================================================
// Main - Setup terminal, run event loop, cleanup
// ============================================================================

fn init_logging(path: &Path) -> Result<(), DemoError> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_toggles(path: &Path) -> Result<FeatureToggles, DemoError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| DemoError::Toggles {
        path: path.to_path_buf(),
        source,
    })
}

fn demo_options() -> Vec<Choice> {
    vec![
        SelectOption::new("Option 1", 1),
        SelectOption::new("Option 2", 2),
        SelectOption::new("Option 3", 3),
        SelectOption::new("Long Option 4", 4),
        SelectOption::new("Long Long Option 5", 5),
    ]
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), DemoError> {
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let toggles = match &args.toggles {
        Some(path) => load_toggles(path)?,
        None => FeatureToggles::new(),
    };
    tracing::info!(
        searchable = !args.no_search,
        portal = args.portal,
        toggles = toggles.len(),
        "select demo starting"
    );

    let settings = Settings {
        options: demo_options(),
        searchable: !args.no_search,
        portal: args.portal,
        placeholder: args.placeholder,
        toggles,
    };

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, settings).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    settings: Settings,
) -> Result<(), DemoError> {
    let mut store =
        StoreWithMiddleware::new(AppState::default(), reducer, LoggingMiddleware::new());
    let mut ui = DemoUi::new(settings);

    // Event poller
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    let mut should_render = true;

    'main: loop {
        if should_render {
            terminal.draw(|frame| ui.render(frame, store.state()))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                if event.is_interrupt() {
                    break;
                }
                for action in ui.handle(&event, store.state()) {
                    if matches!(action, AppAction::Quit) {
                        break 'main;
                    }
                    store.dispatch(action);
                }
                should_render = true;
            }

            _ = ticker.tick() => {
                // Ticks only matter while a blur close is waiting
                if ui.close_pending() {
                    for action in ui.handle(&EventKind::Tick, store.state()) {
                        store.dispatch(action);
                    }
                    should_render = true;
                }
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use tui_select::testing::click;

    fn portal_settings() -> Settings {
        Settings {
            options: demo_options(),
            searchable: true,
            portal: true,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            toggles: FeatureToggles::new(),
        }
    }

    fn send(ui: &mut DemoUi, state: &mut AppState, event: EventKind) -> Vec<AppAction> {
        let actions = ui.handle(&event, state);
        for action in &actions {
            reducer(state, action.clone());
        }
        actions
    }

    #[test]
    fn test_portal_menu_click_goes_only_to_its_field() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut ui = DemoUi::new(portal_settings());
        let mut state = AppState {
            tags: Selection::Multiple(vec![SelectOption::new("Option 1", 1)]),
            ..AppState::default()
        };

        // Multi control sits on rows 7..10; its chip is on row 8
        terminal.draw(|frame| ui.render(frame, &state)).unwrap();
        let remove_x = (0..80u16)
            .find(|&x| terminal.backend().buffer()[(x, 8)].symbol() == "×")
            .expect("chip remove button on the multi control");

        let actions = send(&mut ui, &mut state, click(20, 4));
        assert!(actions.is_empty());
        assert!(ui.single.is_open());

        // The single menu now covers the multi control, "Option 1" on row 8
        terminal.draw(|frame| ui.render(frame, &state)).unwrap();
        let actions = send(&mut ui, &mut state, click(remove_x, 8));

        assert_eq!(actions.len(), 1);
        assert!(matches!(
            &actions[0],
            AppAction::FruitChanged(Selection::Single(Some(o))) if o.value == 1
        ));
        assert!(!ui.single.is_open());
        assert!(!ui.multi.is_open());
        assert_eq!(state.tags.items().len(), 1);
    }

    #[test]
    fn test_click_outside_menus_reaches_both_fields() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut ui = DemoUi::new(portal_settings());
        let mut state = AppState::default();

        terminal.draw(|frame| ui.render(frame, &state)).unwrap();
        send(&mut ui, &mut state, click(20, 4));
        terminal.draw(|frame| ui.render(frame, &state)).unwrap();

        // Below the single menu: the single field sees a click outside
        send(&mut ui, &mut state, click(20, 20));
        assert!(ui.single.is_close_pending());
        assert_eq!(ui.ctx.focused_component, None);
    }
}
