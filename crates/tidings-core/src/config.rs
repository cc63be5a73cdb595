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


//! Runtime settings for an [`Emitter`](crate::event::Emitter).

use serde::{Deserialize, Serialize};

/// Listener count above which an event key is reported as a possible leak.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Settings applied to a single emitter.
///
/// Every field has a default, so a partial TOML or JSON document is enough to
/// build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// A human-readable name used in log records.
    pub label: String,
    /// Number of listeners one event key may hold before a warning is logged.
    /// `0` disables the check. Registrations are never rejected.
    pub max_listeners: usize,
}

impl EmitterConfig {
    /// Creates a configuration with the given label and default limits.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if `count` listeners on one key should trigger a warning.
    pub(crate) fn exceeds_limit(&self, count: usize) -> bool {
        self.max_listeners > 0 && count > self.max_listeners
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            label: "emitter".to_string(),
            max_listeners: DEFAULT_MAX_LISTENERS,
        }
    }
}
