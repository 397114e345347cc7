// src/workflow.rs
//
// Mutations arrive as discrete commands. Deletes go through a two-step
// confirm keyed by StableId, never by position in a rendered list.

use crate::db::directory::{DirectoryStore, StoreError};
use crate::domain::{Listing, ListingDraft, StableId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteState {
    #[default]
    Idle,
    PendingConfirm(StableId),
}

/// Per-session delete confirmation. Held in memory only.
#[derive(Debug, Default)]
pub struct DeleteWorkflow {
    state: DeleteState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(ListingDraft),
    RequestDelete(StableId),
    ConfirmDelete,
    CancelDelete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Inserted(Listing),
    DeletePending(StableId),
    Deleted(Listing),
    /// The confirmed id was already gone; nothing changed.
    AlreadyRemoved(StableId),
    Cancelled,
    /// Confirm or cancel with nothing pending.
    NothingPending,
}

impl DeleteWorkflow {
    pub fn state(&self) -> DeleteState {
        self.state
    }

    pub fn pending(&self) -> Option<StableId> {
        match self.state {
            DeleteState::PendingConfirm(id) => Some(id),
            DeleteState::Idle => None,
        }
    }

    /// A new request replaces whatever was pending.
    pub fn request(&mut self, id: StableId) {
        self.state = DeleteState::PendingConfirm(id);
    }

    pub fn cancel(&mut self) -> Option<StableId> {
        let pending = self.pending();
        self.state = DeleteState::Idle;
        pending
    }

    /// Always returns to Idle, whether or not the delete succeeded.
    pub fn confirm(&mut self, store: &mut DirectoryStore) -> Result<Outcome, StoreError> {
        let Some(id) = self.cancel() else {
            return Ok(Outcome::NothingPending);
        };

        match store.delete(id) {
            Ok(removed) => Ok(Outcome::Deleted(removed)),
            Err(StoreError::NotFound(id)) => {
                log::info!("listing {id} was already removed");
                Ok(Outcome::AlreadyRemoved(id))
            }
            Err(e) => Err(e),
        }
    }
}

pub fn apply_command(
    store: &mut DirectoryStore,
    workflow: &mut DeleteWorkflow,
    command: Command,
) -> Result<Outcome, StoreError> {
    match command {
        Command::Insert(draft) => store.insert(draft).map(Outcome::Inserted),
        Command::RequestDelete(id) => {
            workflow.request(id);
            Ok(Outcome::DeletePending(id))
        }
        Command::ConfirmDelete => workflow.confirm(store),
        Command::CancelDelete => Ok(match workflow.cancel() {
            Some(_) => Outcome::Cancelled,
            None => Outcome::NothingPending,
        }),
    }
}
