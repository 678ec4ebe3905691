//! The authoritative task collection.
//!
//! `TaskStore` owns the ordered task list (newest first) and the filter flag.
//! Every operation runs mutate, persist, render to completion before it
//! returns, so the stored entry and the displayed rows always reflect the
//! in-memory list.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{TodoError, ValidationError};
use crate::render::{render, DisplayRow};
use crate::storage::TaskStorage;
use crate::task::Task;

/// Summary counts over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Task collection bound to a storage backend.
pub struct TaskStore<S: TaskStorage> {
    storage: S,
    tasks: Vec<Task>,
    filter_active: bool,
    rows: Vec<DisplayRow>,
    last_id: u64,
    clock: fn() -> u64,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Hydrate a store from `storage`. The filter always starts off.
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, now_millis)
    }

    /// Hydrate a store whose ids are seeded from `clock` (milliseconds).
    pub fn with_clock(storage: S, clock: fn() -> u64) -> Self {
        let mut seen = HashSet::new();
        let mut tasks = Vec::new();
        for task in storage.load() {
            if seen.insert(task.id) {
                tasks.push(task);
            } else {
                warn!(id = task.id, "dropping stored task with duplicate id");
            }
        }
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        debug!(count = tasks.len(), "loaded tasks");

        let mut store = TaskStore {
            storage,
            tasks,
            filter_active: false,
            rows: Vec::new(),
            last_id,
            clock,
        };
        store.refresh();
        store
    }

    /// Issue an id from the clock, bumped past the last issued id so rapid
    /// creation never repeats one. Once the id space is exhausted the lowest
    /// unused id is issued instead.
    fn next_id(&mut self) -> u64 {
        match self.last_id.checked_add(1) {
            Some(floor) => {
                let id = (self.clock)().max(floor);
                self.last_id = id;
                id
            }
            None => {
                let used: HashSet<u64> = self.tasks.iter().map(|t| t.id).collect();
                let id = (1..u64::MAX).find(|id| !used.contains(id)).unwrap_or(0);
                warn!(id, "task ids exhausted, reusing lowest free id");
                id
            }
        }
    }

    fn refresh(&mut self) {
        self.rows = render(&self.tasks, self.filter_active);
    }

    /// Persist then re-render. The displayed rows are refreshed even when the
    /// save fails.
    fn commit(&mut self) -> Result<(), TodoError> {
        let saved = self.storage.save(&self.tasks);
        self.refresh();
        saved.map_err(TodoError::from)
    }

    /// Create a task and place it first.
    pub fn add_task(&mut self, text: &str, date: &str) -> Result<Task, TodoError> {
        let text = text.trim();
        let date = date.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        if date.is_empty() {
            return Err(ValidationError::EmptyDate.into());
        }

        let task = Task::new(self.next_id(), text, date);
        self.tasks.insert(0, task.clone());
        debug!(id = task.id, "added task");
        self.commit()?;
        Ok(task)
    }

    /// Flip the completion flag of a task and return the new value.
    pub fn toggle_complete(&mut self, id: u64) -> Result<bool, TodoError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))?;
        task.completed = !task.completed;
        let completed = task.completed;
        debug!(id, completed, "toggled task");
        self.commit()?;
        Ok(completed)
    }

    /// Remove a task. Unknown ids are not an error.
    pub fn delete_task(&mut self, id: u64) -> Result<(), TodoError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        debug!(id, removed = before != self.tasks.len(), "deleted task");
        self.commit()
    }

    /// Remove every task. Callers are responsible for confirming first.
    pub fn delete_all(&mut self) -> Result<(), TodoError> {
        debug!(count = self.tasks.len(), "deleting all tasks");
        self.tasks.clear();
        self.commit()
    }

    /// Flip the filter flag and return the new value.
    pub fn toggle_filter(&mut self) -> bool {
        self.filter_active = !self.filter_active;
        self.refresh();
        self.filter_active
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filter_active(&self) -> bool {
        self.filter_active
    }

    /// The current displayed list.
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn counts(&self) -> Counts {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        Counts {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
        }
    }
}
