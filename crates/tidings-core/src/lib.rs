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


//! # Tidings Core
//!
//! A strongly-typed, synchronous, in-process event emitter.
//!
//! Events are key types implementing [`Event`](trait@Event); an
//! [`EventMap`](trait@EventMap) lists the events an [`Emitter`] accepts, and
//! [`Extend`] widens a map with the events of another. Subscribing to or
//! emitting an undeclared event does not compile.

#![warn(missing_docs)]

extern crate self as tidings_core;

pub mod config;
pub mod event;

pub use config::EmitterConfig;
pub use event::{
    Declares, EmitError, Emitter, Event, EventMap, Extend, Listener, ListenerOutcome,
};

/// Implements [`Event`](trait@Event) for a key type.
///
/// Takes `#[event(payload = Type)]` and an optional `#[event(name = "...")]`
/// (the type's identifier by default).
pub use tidings_macros::Event;

/// Implements [`EventMap`](trait@EventMap) and one [`Declares`] per event listed in
/// `#[events(A, B, ...)]`.
pub use tidings_macros::EventMap;
