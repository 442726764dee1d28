//! Client-owned event bus for update listeners.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::updates::{Update, UpdateType};

pub type Listener = Arc<dyn Fn(&Update) + Send + Sync>;

#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<HashMap<UpdateType, Vec<Listener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, event: UpdateType, listener: F)
    where
        F: Fn(&Update) + Send + Sync + 'static,
    {
        let mut map = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        map.entry(event).or_default().push(Arc::new(listener));
    }

    /// Invoke every listener for `event`; returns how many ran.
    ///
    /// Listeners are snapshotted first so they may call back into the bus.
    pub fn emit(&self, event: UpdateType, update: &Update) -> usize {
        let snapshot: Vec<Listener> = {
            let map = self.listeners.read().unwrap_or_else(|e| e.into_inner());
            map.get(&event).cloned().unwrap_or_default()
        };
        for listener in &snapshot {
            listener(update);
        }
        snapshot.len()
    }

    pub fn listener_count(&self, event: UpdateType) -> usize {
        let map = self.listeners.read().unwrap_or_else(|e| e.into_inner());
        map.get(&event).map_or(0, Vec::len)
    }

    pub fn clear(&self) {
        let mut map = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        map.clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.listeners.read().unwrap_or_else(|e| e.into_inner());
        let counts: HashMap<_, _> = map.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn emit_reaches_only_matching_listeners() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        bus.on(UpdateType::BotStarted, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        let u = Update::from_value(json!({"update_type": "bot_started"})).unwrap();
        assert_eq!(bus.emit(UpdateType::BotStarted, &u), 1);
        assert_eq!(bus.emit(UpdateType::BotAdded, &u), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_may_register_another_listener() {
        let bus = Arc::new(EventBus::new());
        let inner = bus.clone();
        bus.on(UpdateType::BotStarted, move |_| {
            inner.on(UpdateType::BotStarted, |_| {});
        });

        let u = Update::from_value(json!({"update_type": "bot_started"})).unwrap();
        assert_eq!(bus.emit(UpdateType::BotStarted, &u), 1);
        assert_eq!(bus.listener_count(UpdateType::BotStarted), 2);

        bus.clear();
        assert_eq!(bus.listener_count(UpdateType::BotStarted), 0);
    }
}
