//! Blocking modal dialogs drawn in the terminal.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::warn;

use crate::controller::Dialogs;
use crate::tui::{
    enums::DialogKind,
    view::{draw_dialog, draw_screen, Backdrop},
};

/// Dialogs that take over the event loop until answered.
pub struct TerminalDialogs<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    backdrop: Backdrop,
}

impl<'a, B: Backend> TerminalDialogs<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, backdrop: Backdrop) -> Self {
        Self { terminal, backdrop }
    }

    /// Draw the dialog over the backdrop and wait for an answer.
    fn show(&mut self, kind: DialogKind, message: &str) -> io::Result<bool> {
        loop {
            self.terminal.draw(|f| {
                let area = f.area();
                draw_screen(f, self.backdrop.view());
                draw_dialog(f, area, kind, message);
            })?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match (kind, key.code) {
                (DialogKind::Alert, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
                    return Ok(true)
                }
                (DialogKind::Confirm, KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter) => {
                    return Ok(true)
                }
                (DialogKind::Confirm, KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc) => {
                    return Ok(false)
                }
                _ => {}
            }
        }
    }
}

impl<B: Backend> Dialogs for TerminalDialogs<'_, B> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = self.show(DialogKind::Alert, message) {
            warn!("alert dialog failed: {e}");
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.show(DialogKind::Confirm, message).unwrap_or_else(|e| {
            warn!("confirm dialog failed: {e}");
            false
        })
    }
}
