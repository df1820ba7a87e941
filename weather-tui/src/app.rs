//! Widget state and the event loop driving it.

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Position, Rect},
};
use tokio::sync::mpsc;
use tracing::{debug, error};
use weather_core::{Config, DisplayState, FetchError, WeatherClient, WeatherReading};

use crate::ui;

pub type FetchOutcome = Result<WeatherReading, FetchError>;

/// A dispatched search: the city to look up plus the fence token that
/// decides whether its completion still applies when it arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub city: String,
}

/// Everything the renderer needs, owned by the event loop alone.
pub struct App {
    /// Contents of the search field.
    pub input: String,
    /// Last applied fetch outcome.
    pub display: DisplayState,
    /// Pending user-facing notice, shown until the next search.
    pub notice: Option<String>,
    /// Where the search button was last rendered, for mouse hit tests.
    pub search_button: Rect,
    latest_seq: u64,
}

impl App {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            display: DisplayState::Empty,
            notice: None,
            search_button: Rect::default(),
            latest_seq: 0,
        }
    }

    /// Issue a search for `city`. Clears any pending notice and bumps
    /// the fence, so completions of earlier searches become stale.
    pub fn begin_search(&mut self, city: String) -> SearchTicket {
        self.notice = None;
        self.latest_seq += 1;
        SearchTicket {
            seq: self.latest_seq,
            city,
        }
    }

    /// Submit whatever the search field currently holds, unmodified.
    /// An empty field still produces a ticket; the client rejects it
    /// without touching the network.
    pub fn submit(&mut self) -> SearchTicket {
        let city = self.input.clone();
        self.begin_search(city)
    }

    /// Apply a completed fetch.
    ///
    /// Outcomes whose token is not the latest issued one are dropped.
    /// The three failure kinds keep their distinct effects: empty input
    /// and provider failures raise a notice and leave the panel as it
    /// was, transport and parse failures silently clear the panel and
    /// log a diagnostic.
    pub fn apply(&mut self, seq: u64, outcome: FetchOutcome) {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "dropping stale completion");
            return;
        }

        match outcome {
            Ok(reading) => {
                self.display = DisplayState::Loaded(reading);
            }
            Err(err @ (FetchError::EmptyCity | FetchError::Provider { .. })) => {
                self.notice = Some(err.to_string());
            }
            Err(err) => {
                self.display = DisplayState::Empty;
                error!(error = %err, "error fetching weather data");
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// What an input event asks the loop to do.
enum Action {
    None,
    Search(SearchTicket),
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Enter => Action::Search(app.submit()),
        KeyCode::Char(c) => {
            app.input.push(c);
            Action::None
        }
        KeyCode::Backspace => {
            app.input.pop();
            Action::None
        }
        KeyCode::Esc => {
            // Esc dismisses a pending notice first, then quits.
            if app.notice.take().is_some() {
                Action::None
            } else {
                Action::Quit
            }
        }
        _ => Action::None,
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Action {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        let clicked = Position::new(mouse.column, mouse.row);
        if app.search_button.contains(clicked) {
            return Action::Search(app.submit());
        }
    }
    Action::None
}

fn handle_event(app: &mut App, event: Event) -> Action {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => Action::None,
    }
}

/// Spawn the lookup and report its outcome back with the fence token.
/// In-flight requests are never cancelled; the fence in [`App::apply`]
/// keeps a late arrival from clobbering a newer result.
fn spawn_search(
    client: &WeatherClient,
    ticket: SearchTicket,
    tx: &mpsc::UnboundedSender<(u64, FetchOutcome)>,
) {
    let client = client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let outcome = client.current_weather(&ticket.city).await;
        // The loop may have exited already; nothing to do then.
        let _ = tx.send((ticket.seq, outcome));
    });
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    client: WeatherClient,
    config: &Config,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new();

    // The one automatic search on startup.
    let ticket = app.begin_search(config.default_city.clone());
    spawn_search(&client, ticket, &tx);

    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    return Ok(());
                };
                match handle_event(&mut app, event?) {
                    Action::Quit => return Ok(()),
                    Action::Search(ticket) => spawn_search(&client, ticket, &tx),
                    Action::None => {}
                }
            }
            Some((seq, outcome)) = rx.recv() => {
                app.apply(seq, outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use weather_core::Icon;

    fn reading(location: &str) -> WeatherReading {
        WeatherReading {
            temperature: 15,
            humidity: 60,
            wind_speed: 5.0,
            location: location.to_string(),
            icon: Icon::Drizzle,
        }
    }

    fn provider_error(message: &str) -> FetchError {
        FetchError::Provider {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }

    fn parse_error() -> FetchError {
        FetchError::from(serde_json::from_str::<serde_json::Value>("not json").unwrap_err())
    }

    #[test]
    fn parse_error_clears_the_display_with_no_notice() {
        let mut app = App::new();
        let first = app.begin_search("Testville".to_string());
        app.apply(first.seq, Ok(reading("Testville")));

        let second = app.begin_search("Testville".to_string());
        app.apply(second.seq, Err(parse_error()));

        assert!(app.display.is_empty());
        assert_eq!(app.notice, None);
    }

    #[test]
    fn startup_issues_the_first_ticket() {
        let mut app = App::new();
        let ticket = app.begin_search("Portland".to_string());

        assert_eq!(ticket, SearchTicket { seq: 1, city: "Portland".to_string() });
    }

    #[test]
    fn success_replaces_the_display_record() {
        let mut app = App::new();
        let first = app.begin_search("Testville".to_string());
        app.apply(first.seq, Ok(reading("Testville")));

        let second = app.begin_search("Othertown".to_string());
        app.apply(second.seq, Ok(reading("Othertown")));

        assert_eq!(app.display, DisplayState::Loaded(reading("Othertown")));
        assert_eq!(app.notice, None);
    }

    #[test]
    fn provider_error_raises_notice_and_keeps_stale_reading() {
        let mut app = App::new();
        let first = app.begin_search("Testville".to_string());
        app.apply(first.seq, Ok(reading("Testville")));

        let second = app.begin_search("Nowhereville".to_string());
        app.apply(second.seq, Err(provider_error("city not found")));

        assert_eq!(app.notice.as_deref(), Some("city not found"));
        assert_eq!(app.display, DisplayState::Loaded(reading("Testville")));
    }

    #[test]
    fn empty_city_raises_the_fixed_notice() {
        let mut app = App::new();
        let ticket = app.submit();
        assert_eq!(ticket.city, "");

        app.apply(ticket.seq, Err(FetchError::EmptyCity));

        assert_eq!(app.notice.as_deref(), Some("Enter City Name"));
        assert!(app.display.is_empty());
    }

    #[test]
    fn stale_completion_is_rejected() {
        let mut app = App::new();
        let first = app.begin_search("Testville".to_string());
        let second = app.begin_search("Othertown".to_string());

        // Second search resolves first; the late first completion must
        // not overwrite it even though it arrives last.
        app.apply(second.seq, Ok(reading("Othertown")));
        app.apply(first.seq, Ok(reading("Testville")));

        assert_eq!(app.display, DisplayState::Loaded(reading("Othertown")));
    }

    #[test]
    fn new_search_clears_pending_notice() {
        let mut app = App::new();
        let ticket = app.begin_search("Nowhereville".to_string());
        app.apply(ticket.seq, Err(provider_error("city not found")));
        assert!(app.notice.is_some());

        app.begin_search("Testville".to_string());
        assert_eq!(app.notice, None);
    }

    #[test]
    fn submit_passes_input_through_unmodified() {
        let mut app = App::new();
        app.input = "  new york  ".to_string();

        let ticket = app.submit();
        assert_eq!(ticket.city, "  new york  ");
    }

    #[test]
    fn enter_key_submits_the_current_input() {
        let mut app = App::new();
        app.input = "Testville".to_string();

        let action = handle_key(&mut app, KeyEvent::from(KeyCode::Enter));
        match action {
            Action::Search(ticket) => assert_eq!(ticket.city, "Testville"),
            _ => panic!("expected a search action"),
        }
    }

    #[test]
    fn typed_characters_extend_the_input() {
        let mut app = App::new();

        handle_key(&mut app, KeyEvent::from(KeyCode::Char('a')));
        handle_key(&mut app, KeyEvent::from(KeyCode::Char('b')));
        handle_key(&mut app, KeyEvent::from(KeyCode::Backspace));

        assert_eq!(app.input, "a");
    }

    #[test]
    fn esc_dismisses_notice_before_quitting() {
        let mut app = App::new();
        app.notice = Some("city not found".to_string());

        assert!(matches!(
            handle_key(&mut app, KeyEvent::from(KeyCode::Esc)),
            Action::None
        ));
        assert_eq!(app.notice, None);

        assert!(matches!(
            handle_key(&mut app, KeyEvent::from(KeyCode::Esc)),
            Action::Quit
        ));
    }

    #[test]
    fn click_on_search_button_submits() {
        let mut app = App::new();
        app.input = "Testville".to_string();
        app.search_button = Rect::new(20, 1, 5, 3);

        let inside = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 22,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert!(matches!(
            handle_mouse(&mut app, inside),
            Action::Search(_)
        ));

        let outside = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        assert!(matches!(handle_mouse(&mut app, outside), Action::None));
    }
}
