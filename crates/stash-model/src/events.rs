#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventState {
    Before,
    After,
}

/// Progress notifications emitted around every blocking call of the
/// [`Model`](crate::Model), on the thread that issued the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    Authenticating {
        identity: String,
        state: EventState,
    },
    StashLoading {
        index: usize,
        /// Unknown (`None`) until the tab document has been read.
        number_of_tabs: Option<usize>,
        state: EventState,
    },
    ImageLoading {
        name: String,
        state: EventState,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ModelEvent) + Send>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub(crate) fn notify(&mut self, event: &ModelEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish()
    }
}
