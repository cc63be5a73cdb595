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


//! Compile-time description of which events an emitter accepts.
//!
//! An [`Event`] is a key type carrying its payload type. An [`EventMap`] is a
//! type listing accepted events through [`Declares`] impls, usually generated
//! by `#[derive(EventMap)]`. [`Extend`] widens one map with the events of
//! another, so a specialised emitter keeps every event of its parent.
//!
//! The second parameter of [`Declares`] is a type-level path telling the
//! compiler where the event was found (`Here`, or inside one half of an
//! [`Extend`]). It is always inferred; callers never spell it out.

use std::marker::PhantomData;

/// A key type identifying one event and the payload it carries.
///
/// The runtime identity of an event is the [`TypeId`](std::any::TypeId) of
/// the implementing type, so two keys with the same `NAME` never collide.
///
/// # Example
///
/// ```rust
/// use tidings_core::Event;
///
/// #[derive(Event)]
/// #[event(payload = String, name = "chat.message")]
/// struct Message;
///
/// assert_eq!(<Message as Event>::NAME, "chat.message");
/// ```
pub trait Event: 'static {
    /// Data handed to every listener of this event.
    type Payload: 'static;
    /// Name used in diagnostics and [`Emitter::event_names`](super::Emitter::event_names).
    const NAME: &'static str;
}

/// Marker for a type describing the set of events an emitter accepts.
pub trait EventMap: 'static {}

/// Declares that the event map accepts event `E`.
///
/// `Index` locates the declaration; direct declarations use [`Here`].
pub trait Declares<E: Event, Index>: EventMap {}

/// Index of an event declared directly on a map.
pub struct Here;

/// Index of an event found in the base half of an [`Extend`].
pub struct InBase<I>(PhantomData<I>);

/// Index of an event found in the extension half of an [`Extend`].
pub struct InExt<I>(PhantomData<I>);

/// An event map accepting every event of `Base` and every event of `Ext`.
///
/// Declaring the same event in both halves makes uses of that event ambiguous
/// and is rejected at the call site.
///
/// ```rust
/// use tidings_core::{Emitter, Event, EventMap, Extend};
///
/// #[derive(Event)]
/// #[event(payload = ())]
/// struct Opened;
///
/// #[derive(Event)]
/// #[event(payload = u32)]
/// struct Progress;
///
/// #[derive(EventMap)]
/// #[events(Opened)]
/// struct BaseEvents;
///
/// #[derive(EventMap)]
/// #[events(Progress)]
/// struct DownloadOnly;
///
/// let emitter = Emitter::<Extend<BaseEvents, DownloadOnly>>::new();
/// assert_eq!(emitter.listener_count(Opened), 0);
/// assert_eq!(emitter.listener_count(Progress), 0);
/// ```
pub struct Extend<Base, Ext>(PhantomData<fn() -> (Base, Ext)>);

impl<Base: EventMap, Ext: EventMap> EventMap for Extend<Base, Ext> {}

impl<Base, Ext, E, I> Declares<E, InBase<I>> for Extend<Base, Ext>
where
    Base: Declares<E, I>,
    Ext: EventMap,
    E: Event,
{
}

impl<Base, Ext, E, I> Declares<E, InExt<I>> for Extend<Base, Ext>
where
    Base: EventMap,
    Ext: Declares<E, I>,
    E: Event,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;
    impl Event for Ping {
        type Payload = u8;
        const NAME: &'static str = "ping";
    }

    struct Pong;
    impl Event for Pong {
        type Payload = u16;
        const NAME: &'static str = "pong";
    }

    struct Left;
    impl EventMap for Left {}
    impl Declares<Ping, Here> for Left {}

    struct Right;
    impl EventMap for Right {}
    impl Declares<Pong, Here> for Right {}

    fn declares<M: Declares<E, I>, E: Event, I>() -> &'static str {
        E::NAME
    }

    #[test]
    fn test_direct_declaration() {
        assert_eq!(declares::<Left, Ping, _>(), "ping");
    }

    #[test]
    fn test_extend_reaches_both_halves() {
        assert_eq!(declares::<Extend<Left, Right>, Ping, _>(), "ping");
        assert_eq!(declares::<Extend<Left, Right>, Pong, _>(), "pong");
    }

    #[test]
    fn test_nested_extend() {
        struct Solo;
        impl Event for Solo {
            type Payload = ();
            const NAME: &'static str = "solo";
        }
        struct Third;
        impl EventMap for Third {}
        impl Declares<Solo, Here> for Third {}

        type Wide = Extend<Extend<Left, Right>, Third>;
        assert_eq!(declares::<Wide, Ping, _>(), "ping");
        assert_eq!(declares::<Wide, Solo, _>(), "solo");
    }
}
