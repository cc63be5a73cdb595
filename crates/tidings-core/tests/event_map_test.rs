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


//! Composition of event maps with `Extend`.

use anyhow::Result;
use std::cell::Cell;
use std::rc::Rc;
use tidings_core::{Emitter, EmitterConfig, Event, EventMap, Extend, Listener};

#[derive(Event)]
#[event(payload = String, name = "session.opened")]
struct Opened;

#[derive(Event)]
#[event(payload = String, name = "session.closed")]
struct Closed;

#[derive(Event)]
#[event(payload = u64, name = "upload.progress")]
struct Progress;

#[derive(Event)]
#[event(payload = (), name = "upload.done")]
struct Done;

#[derive(EventMap)]
#[events(Opened, Closed)]
struct SessionEvents;

#[derive(EventMap)]
#[events(Progress)]
#[events(Done)]
struct UploadOnly;

type UploadEvents = Extend<SessionEvents, UploadOnly>;

#[test]
fn test_extended_map_accepts_parent_and_own_events() -> Result<()> {
    let emitter = Emitter::<UploadEvents>::with_config(EmitterConfig::labeled("upload"));
    let bytes = Rc::new(Cell::new(0));
    let opened = Rc::new(Cell::new(false));

    let opened_flag = Rc::clone(&opened);
    emitter.on(
        Opened,
        Listener::new(move |_: &mut String| opened_flag.set(true)),
    );
    let total = Rc::clone(&bytes);
    emitter.on(
        Progress,
        Listener::new(move |chunk: &mut u64| total.set(total.get() + *chunk)),
    );

    emitter.emit(Opened, &mut "upload-1".to_string())?;
    emitter.emit(Progress, &mut 512)?;
    emitter.emit(Progress, &mut 256)?;
    emitter.emit(Done, &mut ())?;

    assert!(opened.get());
    assert_eq!(bytes.get(), 768);
    assert_eq!(emitter.event_names(), ["session.opened", "upload.progress"]);
    Ok(())
}

#[test]
fn test_same_payload_type_keys_stay_separate() -> Result<()> {
    let emitter = Emitter::<UploadEvents>::new();
    let closed = Rc::new(Cell::new(0));

    let counter = Rc::clone(&closed);
    emitter.on(
        Closed,
        Listener::new(move |_: &mut String| counter.set(counter.get() + 1)),
    );

    emitter.emit(Opened, &mut String::new())?;
    assert_eq!(closed.get(), 0);
    assert_eq!(emitter.listener_count(Opened), 0);

    emitter.emit(Closed, &mut String::new())?;
    assert_eq!(closed.get(), 1);
    Ok(())
}

#[test]
fn test_nested_extension() -> Result<()> {
    #[derive(Event)]
    #[event(payload = u8)]
    struct Retry;

    #[derive(EventMap)]
    #[events(Retry)]
    struct RetryOnly;

    let emitter = Emitter::<Extend<UploadEvents, RetryOnly>>::new();
    let seen = Rc::new(Cell::new(0u8));

    let attempts = Rc::clone(&seen);
    emitter.prepend_on(
        Retry,
        Listener::new(move |attempt: &mut u8| attempts.set(*attempt)),
    );
    emitter.once(Opened, Listener::new(|_: &mut String| {}));

    emitter.emit(Retry, &mut 3)?;
    assert_eq!(seen.get(), 3);
    assert_eq!(emitter.listener_count(Opened), 1);

    emitter.remove_all_listeners(Opened);
    assert_eq!(emitter.event_names(), ["Retry"]);
    Ok(())
}
