//! Terminal-backed [`Cockpit`]: raw-mode key polling in, dashboard frames out.

use std::io;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use camshaft_core::command::{ControlCommand, InputEvent};
use camshaft_core::runner::Cockpit;
use camshaft_core::snapshot::DisplaySnapshot;

use crate::render::Dashboard;

/// Interactive cockpit over the controlling terminal.
///
/// [`enter`] switches the terminal into raw mode on a hidden-cursor
/// alternate screen; [`leave`] restores it. Callers pair the two around the
/// run so the shell prompt comes back intact even when the loop errors.
///
/// [`enter`]: TerminalCockpit::enter
/// [`leave`]: TerminalCockpit::leave
pub struct TerminalCockpit {
    dashboard: Dashboard,
}

impl TerminalCockpit {
    /// Take over the terminal.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide) {
            // No Self to leave() through yet, so undo raw mode here.
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self {
            dashboard: Dashboard::new(),
        })
    }

    /// Hand the terminal back.
    pub fn leave(self) -> io::Result<()> {
        execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Cockpit for TerminalCockpit {
    type Error = io::Error;

    /// Read at most one pending key event; raw mode turns Ctrl+C into an
    /// ordinary key, so quitting is mapped here rather than signalled.
    fn poll_input(&mut self) -> io::Result<Option<InputEvent>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return Ok(None);
        }

        let input = match key.code {
            KeyCode::Char('a') => InputEvent::Command(ControlCommand::Accelerate),
            KeyCode::Char('d') => InputEvent::Command(ControlCommand::Decelerate),
            KeyCode::Char('e') => InputEvent::Command(ControlCommand::ShiftUp),
            KeyCode::Char('q') => InputEvent::Command(ControlCommand::ShiftDown),
            KeyCode::Char('m') => InputEvent::Command(ControlCommand::ToggleMode),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputEvent::Quit
            }
            KeyCode::Esc => InputEvent::Quit,
            _ => return Ok(None),
        };
        Ok(Some(input))
    }

    fn present(&mut self, snapshot: &DisplaySnapshot) -> io::Result<()> {
        self.dashboard.draw(snapshot)
    }
}
