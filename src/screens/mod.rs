//! Per-screen state machines.
//!
//! Each screen keeps its data slices, filters and drafts in one struct that is
//! only changed through [`Screen::update`]. An update returns the effects
//! (queries and writes) it needs; [`settle`] runs them and feeds the results
//! back until nothing is pending.

use std::thread;

use crate::repository::errors::RepositoryError;

pub mod dashboard;
pub mod fetch;
pub mod movement_list;
pub mod new_movement;

pub use fetch::{Fetch, RequestId, RequestSeq};

pub trait Screen {
    type Msg: Send;
    type Effect: Send;

    fn update(&mut self, msg: Self::Msg) -> Vec<Self::Effect>;

    /// Failure message delivered in place of an effect that panicked, so the
    /// slice it was loading or writing still resolves.
    fn abandoned(effect: &Self::Effect) -> Self::Msg;
}

/// Error carried by [`Screen::abandoned`] messages.
pub(crate) fn effect_panicked() -> RepositoryError {
    RepositoryError::Unexpected("screen effect panicked".to_string())
}

/// Feeds `msg` into the screen and runs the resulting effects to completion.
pub fn dispatch<S, F>(screen: &mut S, msg: S::Msg, run: F)
where
    S: Screen,
    F: Fn(S::Effect) -> S::Msg + Sync,
{
    let effects = screen.update(msg);
    settle(screen, effects, run);
}

/// Runs `effects` and every follow-up effect until the screen is quiescent.
///
/// Effects issued by the same update run concurrently and do not wait on each
/// other; their results are applied in issue order.
pub fn settle<S, F>(screen: &mut S, effects: Vec<S::Effect>, run: F)
where
    S: Screen,
    F: Fn(S::Effect) -> S::Msg + Sync,
{
    let mut pending = effects;
    while !pending.is_empty() {
        let messages = run_batch(pending, &run, S::abandoned);
        pending = messages
            .into_iter()
            .flat_map(|msg| screen.update(msg))
            .collect();
    }
}

fn run_batch<E, M, F>(effects: Vec<E>, run: &F, abandoned: fn(&E) -> M) -> Vec<M>
where
    E: Send,
    M: Send,
    F: Fn(E) -> M + Sync,
{
    thread::scope(|scope| {
        let handles = effects
            .into_iter()
            .map(|effect| {
                let fallback = abandoned(&effect);
                (scope.spawn(move || run(effect)), fallback)
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|(handle, fallback)| {
                handle.join().unwrap_or_else(|_| {
                    log::error!("Screen effect panicked; resolving it as failed");
                    fallback
                })
            })
            .collect()
    })
}
