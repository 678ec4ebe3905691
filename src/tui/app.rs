//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, maps key
//! and mouse events to controller gestures, and draws the screen after every
//! event.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::Backend, layout::Rect, widgets::TableState, Frame, Terminal};

use crate::controller::{self, ListGesture};
use crate::render::{visible_indices, Control, DisplayRow};
use crate::storage::TaskStorage;
use crate::store::TaskStore;
use crate::task_form::TaskForm;
use crate::tui::{
    dialog::TerminalDialogs,
    enums::AppState,
    view::{control_at, draw_help, draw_screen, Backdrop, ScreenView},
};

/// Main application state for the terminal user interface.
pub struct App<S: TaskStorage> {
    state: AppState,
    store: TaskStore<S>,
    form: TaskForm,
    table_state: TableState,
    table_area: Rect,
    status_message: String,
}

impl<S: TaskStorage> App<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            store,
            form: TaskForm::new(),
            table_state: TableState::default(),
            table_area: Rect::default(),
            status_message: String::new(),
        };
        app.clamp_selection();
        app
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Keep the selection on a visible row after the row list changed.
    fn clamp_selection(&mut self) {
        let visible = visible_indices(self.store.rows()).len();
        match self.table_state.selected() {
            _ if visible == 0 => self.table_state.select(None),
            Some(i) if i >= visible => self.table_state.select(Some(visible - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Index into the store's rows of the selected visible row.
    fn selected_row(&self) -> Option<usize> {
        let visible = visible_indices(self.store.rows());
        self.table_state.selected().and_then(|i| visible.get(i).copied())
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop {
            rows: self.store.rows().to_vec(),
            filter_active: self.store.filter_active(),
            counts: self.store.counts(),
            form: self.form.clone(),
            editing: self.state == AppState::AddTask,
            table_state: self.table_state.clone(),
        }
    }

    /// Apply a row control. Gestures that hit no task leave the status bar alone.
    fn apply_gesture(&mut self, gesture: ListGesture) {
        let Some(control) = gesture.control else {
            return;
        };
        let hits_task = gesture
            .row
            .and_then(|i| self.store.rows().get(i))
            .and_then(DisplayRow::task_id)
            .is_some();
        if !hits_task {
            return;
        }
        match controller::handle_list_gesture(&mut self.store, gesture) {
            Ok(()) => {
                self.clamp_selection();
                let msg = match control {
                    Control::Delete => "Task deleted",
                    Control::ToggleComplete => "Task status updated",
                };
                self.set_status_message(msg);
            }
            Err(e) => {
                self.clamp_selection();
                self.set_status_message(format!("Error saving: {e}"));
            }
        }
    }

    fn toggle_filter(&mut self) {
        let label = controller::toggle_filter(&mut self.store);
        self.clamp_selection();
        let counts = self.store.counts();
        self.set_status_message(if self.store.filter_active() {
            format!("Hiding completed tasks ({} visible) - '{label}'", counts.pending)
        } else {
            format!("Showing all tasks ({} total) - '{label}'", counts.total)
        });
    }

    fn delete_all<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        let mut dialogs = TerminalDialogs::new(terminal, self.backdrop());
        match controller::delete_all(&mut self.store, &mut dialogs) {
            Ok(true) => self.set_status_message("All tasks deleted"),
            Ok(false) => self.set_status_message("Nothing deleted"),
            Err(e) => self.set_status_message(format!("Error saving: {e}")),
        }
        self.clamp_selection();
    }

    fn submit_form<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        let mut dialogs = TerminalDialogs::new(terminal, self.backdrop());
        match controller::submit(&mut self.store, &mut self.form, &mut dialogs) {
            Ok(Some(task)) => {
                self.state = AppState::TaskList;
                self.table_state.select(Some(0));
                self.set_status_message(format!("Added task {}", task.id));
            }
            Ok(None) => {}
            Err(e) => {
                self.state = AppState::TaskList;
                self.table_state.select(Some(0));
                self.set_status_message(format!("Error saving: {e}"));
            }
        }
    }

    /// Handle keyboard input on the task list.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input<B: Backend>(
        &mut self,
        key: KeyEvent,
        terminal: &mut Terminal<B>,
    ) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if let Some(selected) = self.table_state.selected() {
                    self.table_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down => {
                let visible = visible_indices(self.store.rows()).len();
                if let Some(selected) = self.table_state.selected() {
                    if selected + 1 < visible {
                        self.table_state.select(Some(selected + 1));
                    }
                }
            }
            KeyCode::Char('a') => {
                self.form.update_active_field();
                self.state = AppState::AddTask;
            }
            KeyCode::Char('c') | KeyCode::Char(' ') => self.apply_gesture(ListGesture {
                row: self.selected_row(),
                control: Some(Control::ToggleComplete),
            }),
            KeyCode::Char('d') | KeyCode::Delete => self.apply_gesture(ListGesture {
                row: self.selected_row(),
                control: Some(Control::Delete),
            }),
            KeyCode::Char('f') => self.toggle_filter(),
            KeyCode::Char('D') => self.delete_all(terminal),
            KeyCode::Char('h') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Handle keyboard input in the add-task form.
    fn handle_form_input<B: Backend>(&mut self, key: KeyEvent, terminal: &mut Terminal<B>) {
        match key.code {
            KeyCode::Esc => self.state = AppState::TaskList,
            KeyCode::Enter => self.submit_form(terminal),
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.current_input_mut().move_cursor_left(),
            KeyCode::Right => self.form.current_input_mut().move_cursor_right(),
            KeyCode::Backspace => self.form.current_input_mut().handle_backspace(),
            KeyCode::Delete => self.form.current_input_mut().handle_delete(),
            KeyCode::Char(c) => self.form.current_input_mut().handle_char(c),
            _ => {}
        }
    }

    /// Map a mouse position to a list gesture. `None` when the position is
    /// outside the table body.
    fn gesture_at(&self, column: u16, row: u16) -> Option<ListGesture> {
        let area = self.table_area;
        // Border plus header row.
        let first_row = area.y.saturating_add(2);
        let last_row = area.bottom().saturating_sub(1);
        let inner_left = area.x.saturating_add(1);
        let inner_right = area.right().saturating_sub(1);
        if row < first_row || row >= last_row || column < inner_left || column >= inner_right {
            return None;
        }

        let position = (row - first_row) as usize + self.table_state.offset();
        let visible = visible_indices(self.store.rows());
        Some(ListGesture {
            row: visible.get(position).copied(),
            control: control_at(column - inner_left),
        })
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::TaskList {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let Some(gesture) = self.gesture_at(mouse.column, mouse.row) else {
                return;
            };
            if let Some(row) = gesture.row {
                let visible = visible_indices(self.store.rows());
                if let Some(position) = visible.iter().position(|&i| i == row) {
                    self.table_state.select(Some(position));
                }
            }
            self.apply_gesture(gesture);
        }
    }

    /// Poll for and handle terminal events based on current application state.
    ///
    /// Returns true if the application should quit.
    fn handle_input<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<bool> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(false);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.status_message.clear();
                match self.state {
                    AppState::TaskList => return Ok(self.handle_task_list_input(key, terminal)),
                    AppState::AddTask => self.handle_form_input(key, terminal),
                    AppState::Help => self.state = AppState::TaskList,
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
        Ok(false)
    }

    fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        let view = ScreenView {
            rows: self.store.rows(),
            filter_active: self.store.filter_active(),
            counts: self.store.counts(),
            form: &self.form,
            editing: self.state == AppState::AddTask,
            status: &self.status_message,
            table_state: &mut self.table_state,
        };
        self.table_area = draw_screen(f, view);
        if self.state == AppState::Help {
            draw_help(f, area);
        }
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input(terminal)? {
                break;
            }
        }
        Ok(())
    }
}
