//! Session change notifications.
//!
//! Each subscriber owns an unbounded queue. The manager publishes while it
//! holds its state lock, so every subscriber sees transitions in the order
//! they happened and pulls them one at a time.

use async_channel::{Receiver, Sender, TryRecvError};

use crate::session::ConnectionSession;

#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<ConnectionSession>>,
}

impl Subscribers {
    pub(crate) fn register(&mut self, current: &ConnectionSession) -> Subscription {
        let (tx, rx) = async_channel::unbounded();
        // Unbounded and freshly created: cannot be full or closed.
        let _ = tx.try_send(current.clone());
        self.senders.push(tx);
        Subscription { rx }
    }

    /// Deliver to every live subscriber, dropping those that went away.
    pub(crate) fn publish(&mut self, session: &ConnectionSession) {
        self.senders.retain(|tx| tx.try_send(session.clone()).is_ok());
    }

    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}

/// Receiving end of a session subscription.
///
/// The first item is the session as it was when subscribing. Dropping the
/// subscription unregisters it.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<ConnectionSession>,
}

impl Subscription {
    /// Wait for the next transition. `None` once the manager is gone.
    pub async fn next(&self) -> Option<ConnectionSession> {
        self.rx.recv().await.ok()
    }

    /// Next queued transition without waiting.
    pub fn try_next(&self) -> Option<ConnectionSession> {
        match self.rx.try_recv() {
            Ok(session) => Some(session),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => None,
        }
    }

    /// Drain everything queued so far.
    pub fn drain(&self) -> Vec<ConnectionSession> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
