//! Process-wide authentication state. The store is constructed explicitly and
//! handed to every consumer (guards, token layer, flows); clones share the same
//! state. Only `log_in`/`log_out` mutate it, and both publish to every live
//! subscriber before returning.

use super::identity::SessionIdentity;
use std::{
    fmt,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    task::{Context, Poll},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_stream::Stream;
use tracing::debug;

#[derive(Default)]
struct StoreState {
    // `Some` iff authenticated; the flag is derived, so the two cannot disagree.
    identity: Option<Arc<SessionIdentity>>,
    subscribers: Vec<UnboundedSender<bool>>,
}

impl StoreState {
    fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    fn publish(&mut self) {
        let value = self.is_authenticated();
        self.subscribers.retain(|tx| tx.send(value).is_ok());
    }
}

/// Shared handle to the authentication state.
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Arc<Mutex<StoreState>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("SessionStore")
            .field("authenticated", &state.is_authenticated())
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Holders never panic mid-update, so a poisoned lock still holds a whole state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces any held identity and publishes `true`.
    pub fn log_in(&self, identity: SessionIdentity) {
        let mut state = self.lock();
        debug!(user_id = identity.user_id, admin = identity.is_admin, "session log in");
        state.identity = Some(Arc::new(identity));
        state.publish();
    }

    /// Clears the identity and publishes `false`, even when already anonymous.
    pub fn log_out(&self) {
        let mut state = self.lock();
        debug!(was_authenticated = state.is_authenticated(), "session log out");
        state.identity = None;
        state.publish();
    }

    /// Logs out only while `expected` is still the held identity. Returns
    /// whether the store was cleared; a newer login is left untouched.
    pub fn log_out_if_current(&self, expected: &Arc<SessionIdentity>) -> bool {
        let mut state = self.lock();
        match &state.identity {
            Some(current) if Arc::ptr_eq(current, expected) => {
                debug!(user_id = current.user_id, "session log out (token rejected)");
                state.identity = None;
                state.publish();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    #[must_use]
    pub fn current_identity(&self) -> Option<Arc<SessionIdentity>> {
        self.lock().identity.clone()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.lock()
            .identity
            .as_ref()
            .is_some_and(|identity| identity.is_admin)
    }

    /// Subscribes to the authenticated flag.
    ///
    /// The current value is queued before this returns, so the first item a
    /// subscriber sees is the state at subscription time, followed by every
    /// later change in call order.
    #[must_use]
    pub fn observe_authenticated(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock();
        // The receiver is alive, so this send cannot fail.
        let _ = tx.send(state.is_authenticated());
        state.subscribers.push(tx);
        Subscription { receiver: rx }
    }

    /// Number of subscriptions that have not been dropped yet.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.lock();
        state.subscribers.retain(|tx| !tx.is_closed());
        state.subscribers.len()
    }
}

/// Stream of authenticated-flag values for one subscriber.
///
/// Ends only once every handle to the store has been dropped.
#[derive(Debug)]
pub struct Subscription {
    receiver: UnboundedReceiver<bool>,
}

impl Subscription {
    /// Next value that has already been published, without waiting.
    pub fn try_next(&mut self) -> Option<bool> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next published value.
    pub async fn recv(&mut self) -> Option<bool> {
        self.receiver.recv().await
    }

    /// Every value published since the last read.
    pub fn drain(&mut self) -> Vec<bool> {
        let mut values = Vec::new();
        while let Some(value) = self.try_next() {
            values.push(value);
        }
        values
    }
}

impl Stream for Subscription {
    type Item = bool;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<bool>> {
        self.receiver.poll_recv(cx)
    }
}
