//! Request progress as a single tagged state.

use std::fmt;

/// Progress of one backend call driven by a page.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded(T),
    /// The last request failed with a user-facing message.
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Check if a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Check if the last request succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchState::Loaded(_))
    }

    /// The loaded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to the loaded value.
    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            FetchState::Loaded(v) => Some(v),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Enter the loading state.
    pub fn start(&mut self) {
        *self = FetchState::Loading;
    }

    /// Settle from a result, keeping the error's display text.
    pub fn settle<E: fmt::Display>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(v) => FetchState::Loaded(v),
            Err(e) => FetchState::Failed(e.to_string()),
        };
    }

    /// Return to idle.
    pub fn reset(&mut self) {
        *self = FetchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_state_lifecycle() {
        let mut state: FetchState<u32> = FetchState::default();
        assert_eq!(state, FetchState::Idle);

        state.start();
        assert!(state.is_loading());

        state.settle::<String>(Ok(7));
        assert!(state.is_loaded());
        assert_eq!(state.value(), Some(&7));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_fetch_state_failure_keeps_message() {
        let mut state: FetchState<u32> = FetchState::Loading;
        state.settle(Err("bad input"));
        assert_eq!(state.error(), Some("bad input"));
        assert!(state.value().is_none());

        state.reset();
        assert_eq!(state, FetchState::Idle);
    }
}
