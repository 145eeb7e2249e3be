//! Edit-session and delete-confirmation state machines.

use serde::Serialize;

use crate::error::ValidationError;
use crate::model::{format_average, parse_average, parse_name, Student};

/// Single-slot state for an in-progress edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EditSession {
    #[default]
    Closed,
    Open {
        target_id: i64,
        draft_name: String,
        /// Free text until the edit is validated.
        draft_average: String,
    },
}

/// A validated edit, ready to send to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCommit {
    pub id: i64,
    pub name: String,
    pub average: f64,
}

impl EditSession {
    /// Open a session seeded from `student`. Any session already open is
    /// discarded.
    pub fn begin(&mut self, student: &Student) {
        *self = EditSession::Open {
            target_id: student.id,
            draft_name: student.name.clone(),
            draft_average: format_average(student.average),
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open { .. })
    }

    pub fn target_id(&self) -> Option<i64> {
        match self {
            EditSession::Open { target_id, .. } => Some(*target_id),
            EditSession::Closed => None,
        }
    }

    /// Returns `false` if no session is open.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        match self {
            EditSession::Open { draft_name, .. } => {
                *draft_name = name.into();
                true
            }
            EditSession::Closed => false,
        }
    }

    /// Returns `false` if no session is open.
    pub fn set_average(&mut self, average: impl Into<String>) -> bool {
        match self {
            EditSession::Open { draft_average, .. } => {
                *draft_average = average.into();
                true
            }
            EditSession::Closed => false,
        }
    }

    /// Check the drafts without closing the session. `None` when closed.
    pub fn validate(&self) -> Option<Result<EditCommit, ValidationError>> {
        match self {
            EditSession::Open {
                target_id,
                draft_name,
                draft_average,
            } => Some(
                parse_name(draft_name).and_then(|name| {
                    Ok(EditCommit {
                        id: *target_id,
                        name,
                        average: parse_average(draft_average)?,
                    })
                }),
            ),
            EditSession::Closed => None,
        }
    }

    /// Discard the drafts.
    pub fn cancel(&mut self) {
        *self = EditSession::Closed;
    }

    /// Close after the commit has been stored.
    pub fn close(&mut self) {
        *self = EditSession::Closed;
    }
}

/// Two-step deletion: request, then confirm or cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "lowercase")]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(i64),
}

impl DeleteConfirmation {
    pub fn request(&mut self, id: i64) {
        *self = DeleteConfirmation::Pending(id);
    }

    pub fn pending(&self) -> Option<i64> {
        match self {
            DeleteConfirmation::Pending(id) => Some(*id),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    /// Take the pending id, returning to idle.
    pub fn confirm(&mut self) -> Option<i64> {
        let id = self.pending();
        *self = DeleteConfirmation::Idle;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bo() -> Student {
        Student::new(2, "Bo", 4.0)
    }

    #[test]
    fn begin_seeds_drafts() {
        let mut session = EditSession::default();
        session.begin(&bo());
        assert_eq!(
            session,
            EditSession::Open {
                target_id: 2,
                draft_name: "Bo".into(),
                draft_average: "4.0".into(),
            }
        );
    }

    #[test]
    fn cancel_discards() {
        let mut session = EditSession::default();
        session.begin(&bo());
        session.set_name("Bob");
        session.cancel();
        assert_eq!(session, EditSession::Closed);
        assert!(session.validate().is_none());
    }

    #[test]
    fn validate_produces_commit() {
        let mut session = EditSession::default();
        session.begin(&bo());
        assert!(session.set_average("6.0"));
        let commit = session.validate().unwrap().unwrap();
        assert_eq!(
            commit,
            EditCommit {
                id: 2,
                name: "Bo".into(),
                average: 6.0
            }
        );
        assert!(session.is_open());
    }

    #[test]
    fn validate_rejects_bad_drafts() {
        let mut session = EditSession::default();
        session.begin(&bo());
        session.set_average("six");
        assert_eq!(
            session.validate().unwrap(),
            Err(ValidationError::InvalidAverage("six".into()))
        );

        session.set_average("6");
        session.set_name(" ");
        assert_eq!(session.validate().unwrap(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn setters_on_closed_session_are_noops() {
        let mut session = EditSession::default();
        assert!(!session.set_name("x"));
        assert!(!session.set_average("1"));
        assert_eq!(session, EditSession::Closed);
    }

    #[test]
    fn begin_replaces_open_session() {
        let mut session = EditSession::default();
        session.begin(&bo());
        session.begin(&Student::new(1, "Ana", 12.5));
        assert_eq!(session.target_id(), Some(1));
    }

    #[test]
    fn delete_confirmation_flow() {
        let mut confirm = DeleteConfirmation::default();
        assert_eq!(confirm.confirm(), None);

        confirm.request(2);
        assert_eq!(confirm.pending(), Some(2));
        confirm.cancel();
        assert_eq!(confirm, DeleteConfirmation::Idle);

        confirm.request(3);
        assert_eq!(confirm.confirm(), Some(3));
        assert_eq!(confirm, DeleteConfirmation::Idle);
    }
}
