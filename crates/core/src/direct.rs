//! Direct-executor future composition
//!
//! Continuations run on whichever thread resolves the future. Transforms are
//! plain `FutureExt::map` combinators; [`add_callback`] additionally polls the
//! composed future once inline, so a callback on an already-resolved future
//! has run by the time `add_callback` returns.

use futures::future::{BoxFuture, FutureExt};
use std::future::Future;

/// State of a callback chain after [`add_callback`]
#[must_use = "a pending completion must be driven or the callback never runs"]
pub enum Completion {
    /// Future was already resolved; the callback has run
    Done,
    /// Future is still pending; the remainder must be driven by the caller
    Pending(BoxFuture<'static, ()>),
}

impl Completion {
    /// Whether the callback already ran
    pub fn is_done(&self) -> bool {
        matches!(self, Completion::Done)
    }

    /// The remaining work, if any
    pub fn into_pending(self) -> Option<BoxFuture<'static, ()>> {
        match self {
            Completion::Done => None,
            Completion::Pending(fut) => Some(fut),
        }
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Done => write!(f, "Completion::Done"),
            Completion::Pending(_) => write!(f, "Completion::Pending"),
        }
    }
}

/// Attach a completion callback to a fallible future
///
/// The callback receives the future's `Result`. It runs inline if the future
/// resolves on the first poll; otherwise it runs on the thread that later
/// drives the returned [`Completion::Pending`] future.
pub fn add_callback<F, T, E, C>(future: F, callback: C) -> Completion
where
    F: Future<Output = std::result::Result<T, E>> + Send + 'static,
    C: FnOnce(std::result::Result<T, E>) + Send + 'static,
{
    let mut composed = future.map(callback).boxed();
    match (&mut composed).now_or_never() {
        Some(()) => Completion::Done,
        None => Completion::Pending(composed),
    }
}
