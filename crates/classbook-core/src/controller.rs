//! Drives store calls and feeds their results into [`AppState`].
//!
//! Consistency model: every successful mutation is followed by a full
//! listing refresh. Nothing is patched locally. A failed call is logged and
//! returned, and the collection keeps its previous contents.

use std::sync::Arc;

use tracing::instrument;

use crate::error::{ClientError, StoreError};
use crate::model::NewStudent;
use crate::state::{Action, AppState};
use crate::traits::StudentStore;

pub struct Controller {
    store: Arc<dyn StudentStore>,
    state: AppState,
}

impl Controller {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self {
            store,
            state: AppState::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Replace the collection with a fresh listing.
    #[instrument(skip(self), fields(store = %self.store.name()))]
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let students = self
            .store
            .list_students()
            .await
            .map_err(|e| log_store_error("list", e))?;
        self.state.apply(Action::Loaded(students));
        Ok(())
    }

    /// Validate the add form, create the student, and refresh.
    #[instrument(skip(self), fields(store = %self.store.name()))]
    pub async fn add(&mut self, name: &str, average: &str) -> Result<(), ClientError> {
        let new = NewStudent::parse(name, average)?;
        self.store
            .create_student(&new.name, new.average)
            .await
            .map_err(|e| log_store_error("create", e))?;
        self.refresh().await
    }

    /// Open an edit session on a student from the current collection.
    pub fn begin_edit(&mut self, id: i64) -> Result<(), ClientError> {
        let student = self
            .state
            .collection()
            .find(id)
            .cloned()
            .ok_or(ClientError::UnknownStudent(id))?;
        self.state.apply(Action::BeginEdit(student));
        Ok(())
    }

    pub fn edit_name(&mut self, name: impl Into<String>) -> Result<(), ClientError> {
        self.require_edit()?;
        self.state.apply(Action::EditName(name.into()));
        Ok(())
    }

    pub fn edit_average(&mut self, average: impl Into<String>) -> Result<(), ClientError> {
        self.require_edit()?;
        self.state.apply(Action::EditAverage(average.into()));
        Ok(())
    }

    /// Close the session without touching the store.
    pub fn cancel_edit(&mut self) {
        self.state.apply(Action::CancelEdit);
    }

    /// Validate the drafts, send the update, and refresh. The session only
    /// closes once both calls succeed.
    #[instrument(skip(self), fields(store = %self.store.name()))]
    pub async fn confirm_edit(&mut self) -> Result<(), ClientError> {
        let commit = self
            .state
            .edit_session()
            .validate()
            .ok_or(ClientError::NoEditSession)??;
        self.store
            .update_student(commit.id, &commit.name, commit.average)
            .await
            .map_err(|e| log_store_error("update", e))?;
        self.refresh().await?;
        self.state.apply(Action::EditCommitted);
        Ok(())
    }

    /// First step of deletion. Nothing is sent until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, id: i64) -> Result<(), ClientError> {
        if self.state.collection().find(id).is_none() {
            return Err(ClientError::UnknownStudent(id));
        }
        self.state.apply(Action::RequestDelete(id));
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.state.apply(Action::CancelDelete);
    }

    #[instrument(skip(self), fields(store = %self.store.name()))]
    pub async fn confirm_delete(&mut self) -> Result<(), ClientError> {
        let id = self
            .state
            .pending_delete()
            .ok_or(ClientError::NoPendingDelete)?;
        self.state.apply(Action::DeleteConfirmed);
        self.store
            .delete_student(id)
            .await
            .map_err(|e| log_store_error("delete", e))?;
        self.refresh().await
    }

    pub fn toggle_chart(&mut self) {
        self.state.apply(Action::ToggleChart);
    }

    fn require_edit(&self) -> Result<(), ClientError> {
        if self.state.edit_session().is_open() {
            Ok(())
        } else {
            Err(ClientError::NoEditSession)
        }
    }
}

fn log_store_error(operation: &str, error: StoreError) -> StoreError {
    tracing::error!(operation, transport = error.is_transport(), "store call failed: {error}");
    error
}
