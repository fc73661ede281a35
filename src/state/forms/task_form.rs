//! Create/update task form

use super::field::FormField;
use super::form_state::{Form, FormEffect, FormMode, FormPhase};
use super::rules::{self, DUE_TIME_FORMAT};
use crate::backend::TaskSubmission;
use chrono::{Local, NaiveDateTime};

/// Source of the current local time
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

const TITLE: usize = 0;
const DUE_TIME: usize = 1;
const SUBMIT: usize = 2;

/// Validity of each task field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFlags {
    pub title: bool,
    pub due_time: bool,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub mode: FormMode,
    pub title: FormField,
    pub due_time: FormField,
    pub flags: TaskFlags,
    pub active_field_index: usize,
    submitting: bool,
    clock: Clock,
}

impl TaskForm {
    /// Empty form for a new task; nothing is valid yet
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: FormField::text("title", "Title"),
            due_time: FormField::text("due_time", "Due time (YYYY-MM-DDTHH:MM)"),
            flags: TaskFlags::default(),
            active_field_index: 0,
            submitting: false,
            clock: local_now,
        }
    }

    /// Pre-filled form for an existing task. The stored values are presumed
    /// valid, so both flags start true.
    pub fn update(
        todo_id: u32,
        created_time: NaiveDateTime,
        title: String,
        due_time: String,
    ) -> Self {
        let mut form = Self::create();
        form.mode = FormMode::Update {
            todo_id,
            created_time,
        };
        form.title.set_text(title);
        form.due_time.set_text(due_time);
        form.flags = TaskFlags {
            title: true,
            due_time: true,
        };
        form
    }

    /// Replace the time source
    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn validate_title(&mut self) {
        let check = rules::check_title(self.title.as_text());
        self.flags.title = check.valid;
        self.title.check = Some(check);
    }

    pub fn validate_due_time(&mut self) {
        let now = (self.clock)();
        let check = rules::check_due_time(self.due_time.as_text(), &self.mode, now);
        self.flags.due_time = check.valid;
        self.due_time.check = Some(check);
    }

    /// Periodic re-check: "in the future" goes stale as time passes.
    /// Only create mode depends on the current time.
    pub fn on_minute_elapsed(&mut self) {
        if self.mode.is_create() {
            self.validate_due_time();
        }
    }

    /// Called once the backend has answered a submission
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded && self.mode.is_create() {
            self.title.clear();
            self.due_time.clear();
            self.flags = TaskFlags::default();
            self.active_field_index = TITLE;
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::create()
    }
}

impl Form for TaskForm {
    fn title(&self) -> &str {
        match self.mode {
            FormMode::Create => "New task",
            FormMode::Update { .. } => "Edit task",
        }
    }

    fn submit_label(&self) -> &str {
        "Submit"
    }

    fn field_count(&self) -> usize {
        3 // title, due time, submit
    }

    fn active_field(&self) -> usize {
        self.active_field_index
    }

    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT);
    }

    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            TITLE => Some(&self.title),
            DUE_TIME => Some(&self.due_time),
            _ => None,
        }
    }

    fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        match index {
            TITLE => Some(&mut self.title),
            DUE_TIME => Some(&mut self.due_time),
            _ => None,
        }
    }

    fn validate_field(&mut self, index: usize) -> Option<FormEffect> {
        match index {
            TITLE => self.validate_title(),
            DUE_TIME => self.validate_due_time(),
            _ => {}
        }
        None
    }

    fn phase(&self) -> FormPhase {
        if self.submitting {
            FormPhase::Submitting
        } else if self.flags.title && self.flags.due_time {
            FormPhase::Submittable
        } else {
            FormPhase::Editing
        }
    }

    fn submit(&mut self) -> Option<FormEffect> {
        if self.submitting {
            return None;
        }
        // Time has moved on since the last keystroke
        if self.mode.is_create() {
            self.validate_due_time();
        }
        if !self.can_submit() {
            return None;
        }
        let due = rules::parse_due_time(self.due_time.as_text())?;

        self.submitting = true;
        let todo_id = match self.mode {
            FormMode::Create => None,
            FormMode::Update { todo_id, .. } => Some(todo_id),
        };
        tracing::info!(?todo_id, "Submitting task");
        Some(FormEffect::SubmitTask(TaskSubmission {
            todo_id,
            title: self.title.as_text().trim().to_string(),
            due_time: due.format(DUE_TIME_FORMAT).to_string(),
        }))
    }
}
