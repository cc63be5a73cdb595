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


use std::fmt;

/// Error returned by [`Emitter::emit`](super::Emitter::emit) when a listener fails.
///
/// Dispatch stops at the failing listener: listeners after `position` in the
/// snapshot did not run.
#[derive(Debug)]
pub struct EmitError {
    event: &'static str,
    position: usize,
    source: anyhow::Error,
}

impl EmitError {
    pub(crate) fn listener_failed(event: &'static str, position: usize, source: anyhow::Error) -> Self {
        Self {
            event,
            position,
            source,
        }
    }

    /// Name of the event being dispatched.
    pub fn event(&self) -> &'static str {
        self.event
    }

    /// Index of the failing listener in the dispatch snapshot.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The error returned by the listener.
    pub fn listener_error(&self) -> &anyhow::Error {
        &self.source
    }

    /// Consumes the error and returns the listener's error.
    pub fn into_listener_error(self) -> anyhow::Error {
        self.source
    }
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Listener #{} for event `{}` failed: {}",
            self.position, self.event, self.source
        )
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_and_source() {
        let err = EmitError::listener_failed("save", 2, anyhow::anyhow!("disk full"));

        assert_eq!(err.event(), "save");
        assert_eq!(err.position(), 2);
        assert_eq!(err.to_string(), "Listener #2 for event `save` failed: disk full");
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("disk full"));
    }
}
