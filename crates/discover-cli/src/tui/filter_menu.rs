//! Filter menu TUI main loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use discover_api::tmdb::TmdbApi;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::filter_options::{Control, FilterOptions, GenreRequest, GenreResponse, MAX_STARS};
use super::ui;
use crate::store::{FilterStore, MediaStore};

/// Idle time between two loop iterations when no key is pending.
const TICK: Duration = Duration::from_millis(50);

/// How the user left the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// User applied the filter.
    Applied,
    /// User cancelled.
    Cancelled,
}

/// Result of a filter menu session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOutcome {
    /// How the menu was left.
    pub exit: MenuExit,
    /// Messages of genre requests that failed during the session.
    pub fetch_errors: Vec<String>,
}

/// Runs genre requests on spawned tasks and collects their responses.
///
/// Starting a request aborts the one still in flight.
#[derive(Debug)]
pub struct GenreFetcher<C> {
    api: Arc<C>,
    language: String,
    tx: mpsc::UnboundedSender<GenreResponse>,
    rx: mpsc::UnboundedReceiver<GenreResponse>,
    in_flight: Option<JoinHandle<()>>,
}

impl<C> GenreFetcher<C>
where
    C: TmdbApi + Sync + 'static,
{
    /// Creates a fetcher requesting genres in `language`.
    pub fn new(api: Arc<C>, language: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            language: language.into(),
            tx,
            rx,
            in_flight: None,
        }
    }

    /// Spawns `request`, aborting the previous request if it is still running.
    pub fn start(&mut self, request: GenreRequest) {
        self.abort();

        let api = Arc::clone(&self.api);
        let language = self.language.clone();
        let tx = self.tx.clone();
        tracing::debug!(
            generation = request.generation,
            media_type = %request.media_type,
            "starting genre request"
        );
        self.in_flight = Some(tokio::spawn(async move {
            let result = api.genre_list(request.media_type, &language).await;
            let response = GenreResponse {
                generation: request.generation,
                media_type: request.media_type,
                result,
            };
            if tx.send(response).is_err() {
                tracing::debug!("filter menu closed before genres arrived");
            }
        }));
    }

    /// Returns a completed response without waiting.
    pub fn try_next(&mut self) -> Option<GenreResponse> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next completed response.
    #[cfg(test)]
    pub async fn next(&mut self) -> Option<GenreResponse> {
        self.rx.recv().await
    }

    /// Aborts the request in flight, if any.
    pub fn abort(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// Runs the filter menu TUI against `store`.
///
/// Returns the exit kind and any genre fetch errors seen while running.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing, or event handling fails.
pub async fn run_filter_menu<C>(
    api: Arc<C>,
    language: &str,
    store: &mut MediaStore,
) -> Result<MenuOutcome>
where
    C: TmdbApi + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut options = FilterOptions::default();
    let mut fetcher = GenreFetcher::new(api, language);

    let result = run_event_loop(&mut terminal, &mut options, store, &mut fetcher).await;
    fetcher.abort();

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    let exit = result?;
    Ok(MenuOutcome {
        exit,
        fetch_errors: options.fetch_errors().to_vec(),
    })
}

/// Main event loop.
///
/// Async so spawned genre requests make progress on the current-thread
/// runtime between key presses.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    options: &mut FilterOptions,
    store: &mut MediaStore,
    fetcher: &mut GenreFetcher<C>,
) -> Result<MenuExit>
where
    C: TmdbApi + Sync + 'static,
{
    loop {
        if let Some(request) = options.sync(store) {
            fetcher.start(request);
        }
        while let Some(response) = fetcher.try_next() {
            options.apply_genres(response);
        }

        terminal
            .draw(|frame| ui::draw(frame, options, store))
            .context("failed to draw TUI")?;

        if !event::poll(Duration::ZERO).context("failed to poll events")? {
            tokio::time::sleep(TICK).await;
            continue;
        }

        if let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
            && let Some(exit) = handle_key(options, store, key)
        {
            return Ok(exit);
        }
    }
}

/// Dispatches a key press. Returns `Some` to exit the loop.
fn handle_key(
    options: &mut FilterOptions,
    store: &mut MediaStore,
    key: KeyEvent,
) -> Option<MenuExit> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(MenuExit::Cancelled);
    }

    if options.dropdown.is_some() {
        handle_dropdown_input(options, store, key.code);
        return None;
    }

    handle_normal_input(options, store, key.code)
}

/// Handles key input while a dropdown is open.
fn handle_dropdown_input(options: &mut FilterOptions, store: &mut MediaStore, key: KeyCode) {
    match key {
        KeyCode::Esc => options.close_dropdown(),
        KeyCode::Up | KeyCode::Char('k') => options.dropdown_up(),
        KeyCode::Down | KeyCode::Char('j') => options.dropdown_down(),
        KeyCode::Enter | KeyCode::Char(' ') => options.confirm_dropdown(store),
        _ => {}
    }
}

/// Handles key input with no dropdown open. Returns `Some` to exit the loop.
fn handle_normal_input(
    options: &mut FilterOptions,
    store: &mut MediaStore,
    key: KeyCode,
) -> Option<MenuExit> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(MenuExit::Cancelled),
        KeyCode::Char('s') => return Some(MenuExit::Applied),
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => options.focus_next(),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => options.focus_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => options.open_dropdown(store),
        KeyCode::Char('c') => store.set_category(store.category().next()),
        KeyCode::Left | KeyCode::Char('h') if options.focus == Control::Rating => {
            options.step_stars(store, false);
        }
        KeyCode::Right | KeyCode::Char('l') if options.focus == Control::Rating => {
            options.step_stars(store, true);
        }
        KeyCode::Char(c) if options.focus == Control::Rating => {
            if let Some(stars) = c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                && stars <= MAX_STARS
            {
                if stars == 0 {
                    options.change_rating(store, None);
                } else {
                    options.pick_stars(store, stars);
                }
            }
        }
        _ => {}
    }
    None
}
