// Event handling and main UI loop

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::engine::{BatchHandle, BatchPlan};
use crate::ui::{Dashboard, state::DashboardState};

// Event types sent from dedicated event thread to main loop
enum UiEvent {
    Input(Event), // Keyboard or other terminal events
    Tick,         // Periodic redraw / worker poll
}

/// Spawn a dedicated thread for event polling.
fn spawn_event_thread(tx: mpsc::Sender<UiEvent>) {
    let tick_rate = Duration::from_millis(100);

    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::from_secs(0));

            if event::poll(timeout).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(UiEvent::Input(evt)).is_err() {
                        break; // Main thread dropped the receiver
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(UiEvent::Tick).is_err() {
                    break;
                }
                last_tick = Instant::now();
            }
        }
    });
}

fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Show the dashboard for a running batch until the user leaves after completion.
///
/// Quit keys are refused while files are still converting. The handle is only
/// borrowed: on an error the batch keeps running and the caller still owns it.
pub fn run_batch_dashboard(handle: &BatchHandle, plan: &BatchPlan) -> io::Result<()> {
    enable_raw_mode()?;
    let mut terminal = match enter_screen() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e);
        }
    };

    let mut state = DashboardState::new(plan);
    let result = event_loop(&mut terminal, handle, &mut state);

    // Restore the terminal before reporting any loop error
    let restored = restore_screen(&mut terminal);
    result.and(restored)
}

fn enter_screen() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_screen(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    raw
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    handle: &BatchHandle,
    state: &mut DashboardState,
) -> io::Result<()> {
    let (event_tx, event_rx) = mpsc::channel();
    spawn_event_thread(event_tx);

    loop {
        while let Some(msg) = handle.try_next() {
            state.apply(msg);
        }

        terminal.draw(|frame| Dashboard::render(frame, state))?;

        let Ok(evt) = event_rx.recv() else {
            // Event thread died; wait out the batch without a screen
            return Ok(());
        };

        match evt {
            UiEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if is_quit_key(&key) {
                    if state.is_finished() {
                        return Ok(());
                    }
                    state.quit_refused = true;
                }
            }
            UiEvent::Input(_) | UiEvent::Tick => {}
        }
    }
}
