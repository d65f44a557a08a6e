//! Change notification for store observers.
//!
//! Frontends subscribe for a receiver and re-read store getters when an
//! event arrives; events carry no data beyond what identifies the change.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::{Mutex, PoisonError};

/// A mutation that observers may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    SurahsLoaded,
    TextTypesLoaded,
    TranslationsChanged,
    ArabicTextTypeChanged,
    DarkModeChanged(bool),
    AuthChanged,
    BookmarksChanged,
}

/// Fan-out hub for [`StoreEvent`]s. Disconnected subscribers are pruned
/// on the next emit.
#[derive(Default)]
pub(crate) struct EventHub {
    senders: Mutex<Vec<Sender<StoreEvent>>>,
}

impl EventHub {
    pub(crate) fn subscribe(&self) -> Receiver<StoreEvent> {
        let (sender, receiver) = unbounded();
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        receiver
    }

    pub(crate) fn emit(&self, event: StoreEvent) {
        let mut senders = self.senders.lock().unwrap_or_else(PoisonError::into_inner);
        senders.retain(|sender| sender.send(event).is_ok());
    }
}
