//! Per-view request state.
//!
//! A view goes Idle → Loading → Settled and back to Loading on the next
//! submission. Every submission takes a [`Ticket`]; only the holder of the
//! latest ticket may settle the view, so a slow response to an older
//! submission cannot replace a newer result.

use log::debug;

/// Identifies one submission.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, PartialEq, Clone)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Settled(T),
}

#[derive(Debug, Clone)]
pub struct PredictionSession<T> {
    generation: u64,
    state: ViewState<T>,
}

impl<T> Default for PredictionSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PredictionSession<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: ViewState::Idle,
        }
    }

    /// Start a submission; the previous result is dropped.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = ViewState::Loading;
        Ticket(self.generation)
    }

    /// Store `value` if `ticket` belongs to the latest submission.
    ///
    /// Returns whether the value was applied.
    pub fn settle(&mut self, ticket: Ticket, value: T) -> bool {
        if ticket.0 != self.generation {
            debug!(
                "Ignoring stale result for submission {} (latest is {})",
                ticket.0, self.generation
            );
            return false;
        }
        self.state = ViewState::Settled(value);
        true
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    pub fn settled(&self) -> Option<&T> {
        match &self.state {
            ViewState::Settled(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_settled(self) -> Option<T> {
        match self.state {
            ViewState::Settled(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut session: PredictionSession<&str> = PredictionSession::new();
        assert_eq!(session.state(), &ViewState::Idle);

        let ticket = session.begin();
        assert!(session.is_loading());
        assert!(session.settled().is_none());

        assert!(session.settle(ticket, "first"));
        assert_eq!(session.settled(), Some(&"first"));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_new_submission_clears_previous_result() {
        let mut session = PredictionSession::new();
        let first = session.begin();
        session.settle(first, 1);
        session.begin();
        assert!(session.settled().is_none());
        assert!(session.is_loading());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut session = PredictionSession::new();
        let older = session.begin();
        let newer = session.begin();
        assert!(older < newer);

        assert!(session.settle(newer, "fresh"));
        assert!(!session.settle(older, "stale"));
        assert_eq!(session.into_settled(), Some("fresh"));
    }

    #[test]
    fn test_stale_result_does_not_end_loading() {
        let mut session = PredictionSession::new();
        let older = session.begin();
        let _newer = session.begin();
        assert!(!session.settle(older, 0));
        assert!(session.is_loading());
    }
}
