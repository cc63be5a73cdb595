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


//! Typed publish/subscribe primitives.
//!
//! The [`Emitter`] maps event keys to ordered sequences of [`Listener`]s.
//! Which keys an emitter accepts, and the payload each key carries, is fixed
//! at compile time by its [`EventMap`].

mod emitter;
mod error;
mod listener;
mod map;

pub use self::emitter::Emitter;
pub use self::error::EmitError;
pub use self::listener::{Listener, ListenerOutcome};
pub use self::map::{Declares, Event, EventMap, Extend, Here, InBase, InExt};
