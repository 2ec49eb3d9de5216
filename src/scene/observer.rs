use std::rc::{Rc, Weak};

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle for a registered scene observer.
    pub struct ObserverId;
}

/// Something that wants to hear about scene changes.
pub trait SceneObserver {
    /// Called synchronously after the observed scene changed.
    fn observed_changed(&self);
}

impl<F: Fn()> SceneObserver for F {
    fn observed_changed(&self) {
        self();
    }
}

/// The set of observers of one scene, plus the gate that batches updates.
///
/// Observers are held weakly: the registry never keeps a listener alive,
/// and listeners that have been dropped are forgotten on the next
/// notification. Registering the same listener twice yields the same id.
/// Notification order is unspecified.
pub struct ObserverRegistry {
    observers: SlotMap<ObserverId, Weak<dyn SceneObserver>>,
    enabled: bool,
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObserverRegistry {
    /// Creates an empty registry with updates enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: SlotMap::with_key(),
            enabled: true,
        }
    }

    /// Adds `observer`, or returns its existing id if already registered.
    pub fn register<O: SceneObserver + 'static>(&mut self, observer: &Rc<O>) -> ObserverId {
        if let Some(id) = self.find(observer) {
            return id;
        }
        let weak: Weak<O> = Rc::downgrade(observer);
        let weak: Weak<dyn SceneObserver> = weak;
        self.observers.insert(weak)
    }

    /// Removes the observer registered under `id`. Returns whether it was present.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id).is_some()
    }

    /// Removes `observer` if registered. Returns whether it was present.
    pub fn unregister_observer<O: SceneObserver + 'static>(&mut self, observer: &Rc<O>) -> bool {
        self.find(observer).is_some_and(|id| self.unregister(id))
    }

    /// Returns the number of registered observers that are still alive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.values().filter(|w| w.strong_count() > 0).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether [`notify`](Self::notify) currently reaches observers.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Opens or closes the update gate. Re-enabling does not notify.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Calls every live observer, unless updates are disabled.
    ///
    /// Returns the number of observers called.
    pub fn notify(&mut self) -> usize {
        if !self.enabled {
            tracing::trace!("scene updates disabled, notification suppressed");
            return 0;
        }
        self.observers.retain(|_, w| w.strong_count() > 0);
        let live: Vec<Rc<dyn SceneObserver>> =
            self.observers.values().filter_map(Weak::upgrade).collect();
        for observer in &live {
            observer.observed_changed();
        }
        tracing::debug!(count = live.len(), "scene observers notified");
        live.len()
    }

    fn find<O: SceneObserver + 'static>(&self, observer: &Rc<O>) -> Option<ObserverId> {
        let target = Rc::as_ptr(observer).cast::<()>();
        self.observers
            .iter()
            .find(|(_, w)| w.as_ptr().cast::<()>() == target)
            .map(|(id, _)| id)
    }
}
