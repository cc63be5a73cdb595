// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::error::EmitError;
use super::listener::Listener;
use super::map::{Declares, Event, EventMap};
use crate::config::EmitterConfig;

/// One registration in an event's listener sequence.
struct Entry<P> {
    /// Unique per registration; the same handle may appear in several entries.
    id: u64,
    listener: Listener<P>,
    once: bool,
}

impl<P> Clone for Entry<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            listener: self.listener.clone(),
            once: self.once,
        }
    }
}

/// The listener sequence of one event key, with its payload type erased.
struct Slot {
    name: &'static str,
    /// Set once the leak warning has been logged for this key.
    warned: bool,
    entries: Box<dyn Any>,
}

impl Slot {
    fn new<E: Event>() -> Self {
        Self {
            name: E::NAME,
            warned: false,
            entries: Box::new(Vec::<Entry<E::Payload>>::new()),
        }
    }

    fn entries<P: 'static>(&self) -> Option<&Vec<Entry<P>>> {
        self.entries.downcast_ref()
    }

    fn entries_mut<P: 'static>(&mut self) -> Option<&mut Vec<Entry<P>>> {
        self.entries.downcast_mut()
    }
}

#[derive(Clone, Copy)]
enum Placement {
    Front,
    Back,
}

/// A synchronous, single-threaded event emitter over the event map `M`.
///
/// Each event key owns an ordered sequence of listeners. [`emit`](Self::emit)
/// takes a snapshot of that sequence and runs every listener of the snapshot
/// in order on the caller's thread, so listeners may freely subscribe or
/// unsubscribe (on this emitter) while being dispatched: the changes only
/// affect later emits.
///
/// All methods take `&self`. The emitter is neither `Send` nor `Sync`; share
/// it inside one thread through an `Rc`.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use tidings_core::{Emitter, Event, EventMap, Listener};
///
/// #[derive(Event)]
/// #[event(payload = Vec<String>)]
/// struct Joined;
///
/// #[derive(EventMap)]
/// #[events(Joined)]
/// struct LobbyEvents;
///
/// let emitter = Rc::new(Emitter::<LobbyEvents>::new());
/// let greeter = emitter.on(Joined, Listener::new(|names: &mut Vec<String>| {
///     names.push("welcome".to_string());
/// }));
///
/// let mut names = vec!["ada".to_string()];
/// emitter.emit(Joined, &mut names).unwrap();
/// assert_eq!(names, ["ada", "welcome"]);
///
/// emitter.off(Joined, &greeter);
/// assert_eq!(emitter.listener_count(Joined), 0);
/// ```
pub struct Emitter<M: EventMap> {
    slots: RefCell<HashMap<TypeId, Slot>>,
    next_entry: Cell<u64>,
    config: EmitterConfig,
    _map: PhantomData<M>,
}

impl<M: EventMap> Emitter<M> {
    /// Creates an emitter with the default [`EmitterConfig`].
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an emitter with the given configuration.
    pub fn with_config(config: EmitterConfig) -> Self {
        log::debug!("Emitter `{}` initialized.", config.label);
        Self {
            slots: RefCell::new(HashMap::new()),
            next_entry: Cell::new(0),
            config,
            _map: PhantomData,
        }
    }

    /// Returns the configuration this emitter was built with.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Appends `listener` to the sequence of `event`.
    ///
    /// The same handle may be registered several times; each registration
    /// fires independently.
    ///
    /// ## Returns
    /// The handle that was registered, for a later [`off`](Self::off).
    pub fn on<E, I>(&self, _event: E, listener: Listener<E::Payload>) -> Listener<E::Payload>
    where
        E: Event,
        M: Declares<E, I>,
    {
        self.insert::<E>(listener.clone(), false, Placement::Back);
        listener
    }

    /// Inserts `listener` at the front of the sequence of `event`, so it runs
    /// before every listener registered so far.
    ///
    /// ## Returns
    /// The handle that was registered, for a later [`off`](Self::off).
    pub fn prepend_on<E, I>(&self, _event: E, listener: Listener<E::Payload>) -> Listener<E::Payload>
    where
        E: Event,
        M: Declares<E, I>,
    {
        self.insert::<E>(listener.clone(), false, Placement::Front);
        listener
    }

    /// Appends a one-shot registration of `listener`.
    ///
    /// It is removed from the live sequence by the next emit of `event` that
    /// reaches it, and stays registered until then.
    pub fn once<E, I>(&self, _event: E, listener: Listener<E::Payload>)
    where
        E: Event,
        M: Declares<E, I>,
    {
        self.insert::<E>(listener, true, Placement::Back);
    }

    /// Inserts a one-shot registration of `listener` at the front of the
    /// sequence of `event`.
    pub fn prepend_once<E, I>(&self, _event: E, listener: Listener<E::Payload>)
    where
        E: Event,
        M: Declares<E, I>,
    {
        self.insert::<E>(listener, true, Placement::Front);
    }

    /// Removes the first registration of `listener` for `event`.
    ///
    /// Does nothing if the listener is not registered. An emit already in
    /// progress still runs the listener if it was part of its snapshot.
    pub fn off<E, I>(&self, _event: E, listener: &Listener<E::Payload>)
    where
        E: Event,
        M: Declares<E, I>,
    {
        if self.remove_first::<E>(|entry| entry.listener == *listener) {
            log::trace!("Removed a listener from `{}` on `{}`.", E::NAME, self.config.label);
        }
    }

    /// Dispatches `data` to every listener of `event`.
    ///
    /// All listeners receive the same `data`, so a mutation made by one
    /// listener is visible to the next ones and to the caller.
    ///
    /// ## Errors
    /// Returns [`EmitError`] if a listener fails. Listeners after it in the
    /// snapshot are not run.
    pub fn emit<E, I>(&self, _event: E, data: &mut E::Payload) -> Result<(), EmitError>
    where
        E: Event,
        M: Declares<E, I>,
    {
        self.dispatch::<E>(|listener| listener.call(&mut *data))
    }

    /// Dispatches a fresh clone of `data` to every listener of `event`.
    ///
    /// Mutations made by a listener are invisible to the other listeners and
    /// to the caller.
    ///
    /// ## Errors
    /// Returns [`EmitError`] if a listener fails. Listeners after it in the
    /// snapshot are not run.
    pub fn emit_copied<E, I>(&self, _event: E, data: &E::Payload) -> Result<(), EmitError>
    where
        E: Event,
        E::Payload: Clone,
        M: Declares<E, I>,
    {
        self.dispatch::<E>(|listener| listener.call(&mut data.clone()))
    }

    /// Returns a copy of the listener sequence of `event`, in dispatch order.
    pub fn listeners<E, I>(&self, _event: E) -> Vec<Listener<E::Payload>>
    where
        E: Event,
        M: Declares<E, I>,
    {
        self.snapshot::<E>()
            .into_iter()
            .map(|entry| entry.listener)
            .collect()
    }

    /// Returns the number of registrations for `event`.
    pub fn listener_count<E, I>(&self, _event: E) -> usize
    where
        E: Event,
        M: Declares<E, I>,
    {
        self.slots
            .borrow()
            .get(&TypeId::of::<E>())
            .and_then(|slot| slot.entries::<E::Payload>())
            .map_or(0, Vec::len)
    }

    /// Returns `true` if at least one listener is registered for `event`.
    pub fn has_listeners<E, I>(&self, event: E) -> bool
    where
        E: Event,
        M: Declares<E, I>,
    {
        self.listener_count::<E, I>(event) > 0
    }

    /// Removes every listener registered for `event`.
    pub fn remove_all_listeners<E, I>(&self, _event: E)
    where
        E: Event,
        M: Declares<E, I>,
    {
        if self.slots.borrow_mut().remove(&TypeId::of::<E>()).is_some() {
            log::trace!("Cleared listeners of `{}` on `{}`.", E::NAME, self.config.label);
        }
    }

    /// Removes every listener of every event.
    pub fn clear(&self) {
        self.slots.borrow_mut().clear();
        log::trace!("Cleared all listeners on `{}`.", self.config.label);
    }

    /// Returns the names of the events that currently have listeners, sorted.
    pub fn event_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.slots.borrow().values().map(|slot| slot.name).collect();
        names.sort_unstable();
        names
    }

    /// Returns `true` if no event has any listener.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    fn insert<E: Event>(&self, listener: Listener<E::Payload>, once: bool, placement: Placement) {
        let id = self.next_entry.get();
        self.next_entry.set(id + 1);

        let mut slots = self.slots.borrow_mut();
        let slot = slots.entry(TypeId::of::<E>()).or_insert_with(Slot::new::<E>);
        let Some(entries) = slot.entries_mut::<E::Payload>() else {
            return;
        };

        let entry = Entry { id, listener, once };
        match placement {
            Placement::Front => entries.insert(0, entry),
            Placement::Back => entries.push(entry),
        }
        let count = entries.len();
        log::trace!(
            "Registered a {}listener for `{}` on `{}` ({count} total).",
            if once { "one-shot " } else { "" },
            E::NAME,
            self.config.label
        );

        if self.config.exceeds_limit(count) && !slot.warned {
            slot.warned = true;
            log::warn!(
                "Possible listener leak: `{}` on `{}` has {count} listeners (limit {}).",
                E::NAME,
                self.config.label,
                self.config.max_listeners
            );
        }
    }

    /// Removes the first live entry of `E` matching `predicate`, dropping the
    /// key once its sequence is empty.
    fn remove_first<E: Event>(&self, predicate: impl Fn(&Entry<E::Payload>) -> bool) -> bool {
        let key = TypeId::of::<E>();
        let mut slots = self.slots.borrow_mut();
        let Some(entries) = slots
            .get_mut(&key)
            .and_then(|slot| slot.entries_mut::<E::Payload>())
        else {
            return false;
        };
        let Some(index) = entries.iter().position(predicate) else {
            return false;
        };

        entries.remove(index);
        if entries.is_empty() {
            slots.remove(&key);
        }
        true
    }

    fn snapshot<E: Event>(&self) -> Vec<Entry<E::Payload>> {
        self.slots
            .borrow()
            .get(&TypeId::of::<E>())
            .and_then(|slot| slot.entries::<E::Payload>())
            .map(|entries| entries.to_vec())
            .unwrap_or_default()
    }

    /// Runs `invoke` for each entry of the current snapshot of `E`.
    ///
    /// No borrow of the registry is held while a listener runs.
    fn dispatch<E: Event>(
        &self,
        mut invoke: impl FnMut(&Listener<E::Payload>) -> anyhow::Result<()>,
    ) -> Result<(), EmitError> {
        let snapshot = self.snapshot::<E>();
        if snapshot.is_empty() {
            return Ok(());
        }
        log::trace!(
            "Emitting `{}` to {} listener(s) on `{}`.",
            E::NAME,
            snapshot.len(),
            self.config.label
        );

        for (position, entry) in snapshot.iter().enumerate() {
            // One-shot entries leave the live sequence before their callback runs.
            if entry.once {
                self.remove_first::<E>(|live| live.id == entry.id);
            }
            if let Err(source) = invoke(&entry.listener) {
                log::debug!(
                    "Listener #{position} for `{}` on `{}` failed: {source}",
                    E::NAME,
                    self.config.label
                );
                return Err(EmitError::listener_failed(E::NAME, position, source));
            }
        }
        Ok(())
    }
}

impl<M: EventMap> Default for Emitter<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: EventMap> fmt::Debug for Emitter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("label", &self.config.label)
            .field("events", &self.event_names())
            .finish_non_exhaustive()
    }
}
