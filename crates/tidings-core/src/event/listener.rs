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
use std::rc::Rc;

/// Conversion of a listener's return value into a dispatch outcome.
///
/// Implemented for `()` (infallible listeners) and for `Result<(), E>` with
/// any error convertible into [`anyhow::Error`].
pub trait ListenerOutcome {
    /// Converts the value returned by a callback.
    fn into_result(self) -> anyhow::Result<()>;
}

impl ListenerOutcome for () {
    fn into_result(self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<E> ListenerOutcome for Result<(), E>
where
    E: Into<anyhow::Error>,
{
    fn into_result(self) -> anyhow::Result<()> {
        self.map_err(Into::into)
    }
}

type Callback<P> = dyn Fn(&mut P) -> anyhow::Result<()>;

/// A shared handle to a listener callback for payloads of type `P`.
///
/// Cloning is cheap and keeps the identity of the callback: two handles are
/// equal only if one was cloned from the other. Keep the handle returned by
/// [`Emitter::on`](super::Emitter::on) to remove the registration later.
///
/// # Example
///
/// ```rust
/// use tidings_core::Listener;
///
/// let a = Listener::new(|n: &mut u32| *n += 1);
/// let b = Listener::new(|n: &mut u32| *n += 1);
///
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct Listener<P> {
    callback: Rc<Callback<P>>,
}

impl<P> Listener<P> {
    /// Wraps a callback into a new listener handle with its own identity.
    pub fn new<F, R>(callback: F) -> Self
    where
        F: Fn(&mut P) -> R + 'static,
        R: ListenerOutcome,
    {
        Self {
            callback: Rc::new(move |payload: &mut P| callback(payload).into_result()),
        }
    }

    /// Invokes the callback with `payload`.
    pub fn call(&self, payload: &mut P) -> anyhow::Result<()> {
        (self.callback)(payload)
    }
}

impl<P> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<P> PartialEq for Listener<P> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<P> Eq for Listener<P> {}

impl<P> fmt::Debug for Listener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Rc::as_ptr(&self.callback))
            .finish()
    }
}
