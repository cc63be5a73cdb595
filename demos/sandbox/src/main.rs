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


//! A small chat lobby wired through a typed emitter.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tidings_core::{Emitter, EmitterConfig, Event, EventMap, Extend, Listener};

#[derive(Parser, Debug)]
#[command(about = "Runs a scripted chat lobby on a typed emitter")]
struct Cli {
    /// TOML file with emitter settings (`label`, `max_listeners`).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct Message {
    author: String,
    text: String,
}

#[derive(Event)]
#[event(payload = String, name = "lobby.joined")]
struct Joined;

#[derive(Event)]
#[event(payload = String, name = "lobby.left")]
struct Left;

#[derive(Event)]
#[event(payload = Message, name = "chat.message")]
struct Said;

#[derive(EventMap)]
#[events(Joined, Left)]
struct LobbyEvents;

#[derive(EventMap)]
#[events(Said)]
struct ChatOnly;

type ChatEvents = Extend<LobbyEvents, ChatOnly>;

fn load_config(path: Option<&PathBuf>) -> Result<EmitterConfig> {
    let Some(path) = path else {
        return Ok(EmitterConfig::labeled("lobby"));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let emitter = Rc::new(Emitter::<ChatEvents>::with_config(load_config(
        cli.config.as_ref(),
    )?));
    let members = Rc::new(RefCell::new(Vec::<String>::new()));

    let roster = Rc::clone(&members);
    emitter.on(
        Joined,
        Listener::new(move |name: &mut String| roster.borrow_mut().push(name.clone())),
    );
    let roster = Rc::clone(&members);
    emitter.on(
        Left,
        Listener::new(move |name: &mut String| roster.borrow_mut().retain(|m| *m != *name)),
    );
    emitter.once(
        Joined,
        Listener::new(|name: &mut String| log::info!("{name} opened the lobby")),
    );

    let roster = Rc::clone(&members);
    emitter.prepend_on(
        Said,
        Listener::new(move |message: &mut Message| -> Result<()> {
            if !roster.borrow().contains(&message.author) {
                bail!("{} is not in the lobby", message.author);
            }
            message.text = message.text.trim().to_string();
            Ok(())
        }),
    );
    let printer = emitter.on(
        Said,
        Listener::new(|message: &mut Message| {
            log::info!("<{}> {}", message.author, message.text);
        }),
    );

    for name in ["ada", "grace"] {
        emitter.emit(Joined, &mut name.to_string())?;
    }
    emitter.emit(
        Said,
        &mut Message {
            author: "ada".into(),
            text: "  hello there  ".into(),
        },
    )?;

    let stranger = Message {
        author: "mallory".into(),
        text: "hi".into(),
    };
    if let Err(err) = emitter.emit_copied(Said, &stranger) {
        log::warn!("{err}");
    }

    emitter.emit(Left, &mut "grace".to_string())?;
    emitter.off(Said, &printer);
    emitter.emit(
        Said,
        &mut Message {
            author: "ada".into(),
            text: "anyone?".into(),
        },
    )?;

    log::info!(
        "Members: {:?}; active events: {:?}",
        members.borrow(),
        emitter.event_names()
    );
    emitter.clear();
    Ok(())
}
