//! branchlens: browse branches, commits, and per-file change explanations.
//!
//! # Startup sequence
//!
//! 1. Parse flags, read the config file, install file logging. All of this
//!    happens before the terminal is touched so errors print normally.
//! 2. Load the dataset and build the backend and session.
//! 3. `install_panic_hook()`, then `register_sigterm()`, then `init_tui()`.
//! 4. Spawn the input task and the branch-list load, then run the loop.
//!
//! The loop exits only via `break`, so `restore_tui()` is always reached.
//! Selection fetches are polled in their own `select!` arm through
//! `Session::next_settled`; everything else arrives over the event channel.

mod app;
mod config;
mod diff_render;
mod event;
mod highlight;
mod logging;
mod theme;
mod tui;
mod ui;

use std::io;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use branchlens_core::{Backend, Dataset, MockBackend, Session};
use clap::Parser;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppState;
use crate::config::{Cli, ConfigError, FileConfig, Settings};
use crate::event::AppEvent;
use crate::ui::keybindings::{self, KeyAction};

/// Resolves settings. A bad config file is returned alongside the defaults
/// so it can be logged once logging is up.
fn load_settings(cli: &Cli) -> (Settings, Option<ConfigError>) {
    let path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let (file, error) = match FileConfig::load(&path) {
        Ok(file) => (file.unwrap_or_default(), None),
        Err(e) => {
            eprintln!("branchlens: {e}; using defaults");
            (FileConfig::default(), Some(e))
        }
    };
    (Settings::resolve(cli, file), error)
}

fn build_session(settings: &Settings) -> io::Result<Session> {
    let dataset = match &settings.dataset {
        Some(path) => Dataset::load(path),
        None => Dataset::builtin(),
    }
    .map_err(io::Error::other)?;

    let backend = MockBackend::new(dataset);
    let backend = if settings.latency.is_zero() {
        backend.instant()
    } else {
        backend.with_latency(settings.latency)
    };
    Ok(Session::new(Arc::new(backend)))
}

/// Runs the submission off the UI task and reports back over the channel.
fn spawn_submission(state: &mut AppState, tx: &UnboundedSender<AppEvent>) {
    let Some(pending) = state.prepare_submission() else {
        return;
    };
    tracing::info!(change_id = %pending.change_id, "submitting edge cases");
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = pending.backend.submit_edge_cases(&pending.change_id, &pending.draft).await;
        let _ = tx.send(AppEvent::EdgeCasesSubmitted { draft: pending.draft, result });
    });
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let (settings, config_error) = load_settings(&cli);
    logging::init(&settings.log_file, &settings.log_filter)?;
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring config file");
    }
    tracing::info!(?settings, "starting branchlens");

    let session = build_session(&settings)?;
    let mut state = AppState::new(session);
    let theme = theme::Theme::from_name(&settings.theme);
    highlight::warm_up();

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    let tx = handler.tx.clone();
    let mut rx = handler.rx;
    event::spawn_event_task(tx.clone());

    {
        let backend = state.session.backend();
        let tx = tx.clone();
        tokio::spawn(async move {
            let branches = branchlens_core::session::load_branches(backend.as_ref()).await;
            let _ = tx.send(AppEvent::BranchesLoaded(branches));
        });
    }

    'event_loop: loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when nothing else happens.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {}

            Some(applied) = state.session.next_settled(), if state.session.pending() > 0 => {
                state.apply_settled(applied);
            }

            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(AppEvent::Key(key)) => match keybindings::handle_key(key, &mut state) {
                        KeyAction::Quit => break 'event_loop,
                        KeyAction::SubmitEdgeCases => spawn_submission(&mut state, &tx),
                        KeyAction::Continue => {}
                    },
                    Some(AppEvent::Mouse(mouse)) => {
                        if keybindings::handle_mouse(mouse, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Tick) => state.tick(),
                    Some(AppEvent::BranchesLoaded(branches)) => state.set_branches(branches),
                    Some(AppEvent::EdgeCasesSubmitted { draft, result }) => {
                        state.apply_submission(&draft, result);
                    }
                    // ratatui picks up the new size on the next draw.
                    Some(AppEvent::Resize(..)) => {}
                    Some(AppEvent::Quit) | None => break 'event_loop,
                }
            }
        }

        if term_flag.load(Ordering::Relaxed) {
            tracing::info!("SIGTERM received");
            break 'event_loop;
        }
    }

    tui::restore_tui()?;
    tracing::info!("exiting");
    Ok(())
}
