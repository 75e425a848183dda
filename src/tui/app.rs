//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::clipboard::Clipboard;
use crate::debug::{ClearOutcome, IssueClient};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Main TUI application.
pub struct App {
    state: AppState,
    clipboard: Box<dyn Clipboard>,
    issues: Arc<dyn IssueClient>,
    /// A clear-issues request is in flight.
    clear_pending: bool,
    should_quit: bool,
}

impl App {
    pub fn new(state: AppState, clipboard: Box<dyn Clipboard>, issues: Box<dyn IssueClient>) -> Self {
        Self {
            state,
            clipboard,
            issues: Arc::from(issues),
            clear_pending: false,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        info!(records = self.state.table.items().len(), "tui started");

        let result = self.event_loop(&mut terminal, &events);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => self.state.tick(Instant::now()),
                Ok(Event::Key(key)) => {
                    let action = handle_key(&mut self.state, key);
                    self.apply(action, events);
                }
                Ok(Event::Resize) => {}
                Ok(Event::IssuesCleared(outcome)) => {
                    self.clear_pending = false;
                    let state = &mut self.state;
                    state.debug.apply_clear_outcome(&outcome, &mut state.notifier);
                }
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn apply(&mut self, action: KeyAction, events: &EventHandler) {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::CopyMarkdown => {
                let state = &mut self.state;
                state
                    .debug
                    .copy_markdown(self.clipboard.as_mut(), &mut state.notifier);
            }
            KeyAction::ClearIssues => {
                if self.clear_pending {
                    debug!("clear issues already in flight");
                    return;
                }
                self.clear_pending = true;
                spawn_clear_issues(Arc::clone(&self.issues), events.sender());
            }
        }
    }
}

/// Sends the clear-issues request on a worker thread and posts the outcome
/// back as [`Event::IssuesCleared`].
fn spawn_clear_issues(client: Arc<dyn IssueClient>, events: Sender<Event>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let outcome = ClearOutcome::from(client.clear_issues());
        // The loop may have exited already; nothing left to notify then.
        let _ = events.send(Event::IssuesCleared(outcome));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::mpsc::RecvTimeoutError;

    use crate::debug::IssueError;

    /// Blocks until released, like a server that does not answer.
    struct StalledClient {
        release: std::sync::Mutex<mpsc::Receiver<()>>,
    }

    impl IssueClient for StalledClient {
        fn clear_issues(&self) -> Result<(), IssueError> {
            let release = self.release.lock().unwrap();
            let _ = release.recv();
            Err(IssueError::Status(502))
        }
    }

    #[test]
    fn test_clear_issues_runs_off_the_caller_thread() {
        let (release_tx, release_rx) = mpsc::channel();
        let client: Arc<dyn IssueClient> = Arc::new(StalledClient {
            release: std::sync::Mutex::new(release_rx),
        });
        let (tx, rx) = mpsc::channel();

        let worker = spawn_clear_issues(client, tx);
        // Returned while the request is still pending.
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(50)),
            Err(RecvTimeoutError::Timeout)
        ));

        release_tx.send(()).unwrap();
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            event,
            Event::IssuesCleared(ClearOutcome::Rejected(502))
        ));
        worker.join().unwrap();
    }
}
