//! Application state with a single update entry point.
//!
//! Everything the screen shows lives in [`AppState`]. It only changes
//! through [`AppState::apply`], so the collection and its statistics are
//! always updated together.

use serde::Serialize;

use crate::cache::StudentCollection;
use crate::chart::ChartMode;
use crate::model::Student;
use crate::session::{DeleteConfirmation, EditSession};
use crate::statistics::ClassStats;

/// State transitions driven by user input and store responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A listing arrived from the store.
    Loaded(Vec<Student>),
    BeginEdit(Student),
    EditName(String),
    EditAverage(String),
    CancelEdit,
    /// The edit was stored and the collection refreshed.
    EditCommitted,
    RequestDelete(i64),
    CancelDelete,
    /// The pending deletion has been handed to the store.
    DeleteConfirmed,
    ToggleChart,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    collection: StudentCollection,
    stats: Option<ClassStats>,
    edit_session: EditSession,
    pending_delete: DeleteConfirmation,
    chart_mode: ChartMode,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Loaded(students) => {
                self.collection.replace_all(students);
                self.stats = ClassStats::compute(self.collection.get());
                tracing::debug!(count = self.collection.len(), "collection replaced");
            }
            Action::BeginEdit(student) => self.edit_session.begin(&student),
            Action::EditName(name) => {
                self.edit_session.set_name(name);
            }
            Action::EditAverage(average) => {
                self.edit_session.set_average(average);
            }
            Action::CancelEdit => self.edit_session.cancel(),
            Action::EditCommitted => self.edit_session.close(),
            Action::RequestDelete(id) => self.pending_delete.request(id),
            Action::CancelDelete => self.pending_delete.cancel(),
            Action::DeleteConfirmed => {
                self.pending_delete.confirm();
            }
            Action::ToggleChart => self.chart_mode = self.chart_mode.toggle(),
        }
    }

    pub fn students(&self) -> &[Student] {
        self.collection.get()
    }

    pub fn collection(&self) -> &StudentCollection {
        &self.collection
    }

    /// `None` while the collection is empty.
    pub fn stats(&self) -> Option<&ClassStats> {
        self.stats.as_ref()
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit_session
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete.pending()
    }

    pub fn chart_mode(&self) -> ChartMode {
        self.chart_mode
    }

    /// Serializable view of the whole state.
    pub fn snapshot(&self) -> StateSnapshot<'_> {
        StateSnapshot {
            students: self.students(),
            stats: self.stats.as_ref(),
            edit_session: &self.edit_session,
            pending_delete: self.pending_delete,
            chart_mode: self.chart_mode,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StateSnapshot<'a> {
    pub students: &'a [Student],
    pub stats: Option<&'a ClassStats>,
    pub edit_session: &'a EditSession,
    pub pending_delete: DeleteConfirmation,
    pub chart_mode: ChartMode,
}
