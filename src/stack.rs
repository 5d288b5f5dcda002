//! Alert stack - the ordered sequence of pending alert requests
//!
//! Only the last request is active (rendered and receiving input). Showing a
//! request pushes it on top; closing the top reveals the one beneath it.
//!
//! # Invariants
//!
//! - The active request is always the last element, or none when empty.
//! - Removal by id leaves the relative order of the remaining requests intact.
//! - Every mutation bumps the revision so the view knows to redraw.
//!
//! # Failure Modes
//!
//! - `close()` on an empty stack returns `None` (no panic).
//! - `close_by_id()` for an id that is not pending returns `false`.
//!
//! The stack is a cheap `Rc` handle: clones share the same sequence. It is
//! single-threaded by construction; handlers run while no borrow is held, so
//! they may freely show or close alerts on the same stack.

use crate::request::{AlertId, AlertRequest};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Default)]
struct StackState {
    /// Pending requests, bottom to top
    pending: Vec<Rc<AlertRequest>>,
    revision: u64,
}

impl StackState {
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Lifecycle position of a request relative to a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Enqueued under at least one other request
    Pending,
    /// Top of the stack
    Active,
    /// Not (or no longer) in the stack
    Dismissed,
}

/// Shared LIFO stack of alert requests
#[derive(Clone, Default)]
pub struct AlertStack {
    state: Rc<RefCell<StackState>>,
}

impl AlertStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Stack Operations ---

    /// Push a request on top; it becomes the active request.
    pub fn show(&self, request: AlertRequest) -> AlertId {
        let id = request.id;
        let mut state = self.state.borrow_mut();
        state.pending.push(Rc::new(request));
        state.bump();
        tracing::debug!(%id, depth = state.pending.len(), "alert shown");
        id
    }

    /// Remove the top request.
    ///
    /// Returns its id, or `None` if the stack was empty.
    pub fn close(&self) -> Option<AlertId> {
        let mut state = self.state.borrow_mut();
        let id = state.pending.pop()?.id;
        state.bump();
        tracing::debug!(%id, depth = state.pending.len(), "alert closed");
        Some(id)
    }

    /// Remove a specific request wherever it sits.
    ///
    /// Returns `false` if no pending request has this id.
    pub fn close_by_id(&self, id: AlertId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(idx) = state.pending.iter().position(|r| r.id == id) else {
            return false;
        };
        let was_top = idx + 1 == state.pending.len();
        state.pending.remove(idx);
        state.bump();
        tracing::debug!(%id, was_top, depth = state.pending.len(), "alert closed by id");
        true
    }

    /// Remove every request; returns how many were pending.
    pub fn close_all(&self) -> usize {
        let mut state = self.state.borrow_mut();
        let count = state.pending.len();
        state.pending.clear();
        state.bump();
        tracing::debug!(count, "all alerts closed");
        count
    }

    // --- State Queries ---

    /// The request currently on top.
    pub fn active(&self) -> Option<Rc<AlertRequest>> {
        self.state.borrow().pending.last().cloned()
    }

    pub fn active_id(&self) -> Option<AlertId> {
        self.state.borrow().pending.last().map(|r| r.id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().pending.is_empty()
    }

    /// Number of pending requests.
    #[inline]
    pub fn depth(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn contains(&self, id: AlertId) -> bool {
        self.state.borrow().pending.iter().any(|r| r.id == id)
    }

    /// Ids of all pending requests, bottom to top.
    pub fn ids(&self) -> Vec<AlertId> {
        self.state.borrow().pending.iter().map(|r| r.id).collect()
    }

    pub fn state_of(&self, id: AlertId) -> RequestState {
        let state = self.state.borrow();
        match state.pending.iter().position(|r| r.id == id) {
            None => RequestState::Dismissed,
            Some(idx) if idx + 1 == state.pending.len() => RequestState::Active,
            Some(_) => RequestState::Pending,
        }
    }

    /// Counter bumped by every mutation, including no-op `close_all`.
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    /// Handle that removes `id` from this stack when invoked.
    pub fn manual_close(&self, id: AlertId) -> ManualClose {
        ManualClose {
            target: Some((Rc::downgrade(&self.state), id)),
        }
    }

    fn from_state(state: Rc<RefCell<StackState>>) -> Self {
        AlertStack { state }
    }

    #[cfg(test)]
    pub(crate) fn ptr_eq(&self, other: &AlertStack) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for AlertStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AlertStack")
            .field("ids", &state.pending.iter().map(|r| r.id).collect::<Vec<_>>())
            .field("revision", &state.revision)
            .finish()
    }
}

/// Removes one specific request from its stack
///
/// Handed to button handlers. Calling it again after the request is gone does
/// nothing, and it holds only a weak reference so handlers that stash it do
/// not keep the stack alive.
#[derive(Clone, Default)]
pub struct ManualClose {
    target: Option<(Weak<RefCell<StackState>>, AlertId)>,
}

impl ManualClose {
    /// A close handle bound to nothing
    pub fn noop() -> Self {
        Self::default()
    }

    /// Remove the request; returns `true` only if this call removed it.
    pub fn close(&self) -> bool {
        let Some((state, id)) = &self.target else {
            return false;
        };
        match state.upgrade() {
            Some(state) => AlertStack::from_state(state).close_by_id(*id),
            None => false,
        }
    }

    /// The request this handle targets
    pub fn id(&self) -> Option<AlertId> {
        self.target.as_ref().map(|(_, id)| *id)
    }
}

impl fmt::Debug for ManualClose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClose").field("id", &self.id()).finish()
    }
}
