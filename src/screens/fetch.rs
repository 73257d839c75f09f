//! Fetch lifecycle shared by every screen: idle → loading → loaded | errored.

use std::fmt::Display;

/// Identifies one issued request; later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Monotonic source of [`RequestId`]s, one per screen.
#[derive(Debug, Default)]
pub struct RequestSeq {
    last: u64,
}

impl RequestSeq {
    pub fn next(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

/// State of one independently fetched slice of screen data.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Idle,
    Loading(RequestId),
    Loaded(T),
    /// The last request failed; rendered as an empty collection.
    Errored,
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Fetch::Idle
    }
}

impl<T> Fetch<T> {
    /// Marks the slice as loading and returns the id its response must carry.
    pub fn begin(&mut self, seq: &mut RequestSeq) -> RequestId {
        let request = seq.next();
        *self = Fetch::Loading(request);
        request
    }

    /// Applies a response unless a newer request has been issued since.
    ///
    /// Returns `false` when the response was discarded as stale.
    pub fn resolve<E: Display>(
        &mut self,
        request: RequestId,
        result: Result<T, E>,
        what: &str,
    ) -> bool {
        match self {
            Fetch::Loading(current) if *current == request => {}
            _ => {
                log::debug!("Discarding stale {what} response {request:?}");
                return false;
            }
        }

        *self = match result {
            Ok(value) => Fetch::Loaded(value),
            Err(err) => {
                log::error!("Failed to load {what}: {err}");
                Fetch::Errored
            }
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading(_))
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Fetch::Errored)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Fetch::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Fetch<Vec<T>> {
    /// Loaded items; empty while idle, loading or after an error.
    pub fn items(&self) -> &[T] {
        self.value().map(Vec::as_slice).unwrap_or(&[])
    }
}
