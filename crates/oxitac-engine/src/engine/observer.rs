use serde::Serialize;

use crate::core::{CellIndex, Mark, Outcome};

/// Receives notifications from a [`GameSession`](super::GameSession).
///
/// Both methods default to doing nothing.
pub trait SessionObserver {
    /// Called after any accepted move, human or computer.
    fn move_applied(&mut self, _index: CellIndex, _mark: Mark) {}

    /// Called exactly once per game, when the session reaches a terminal state.
    fn terminal(&mut self, _outcome: Outcome) {}
}

impl SessionObserver for () {}

impl<O> SessionObserver for &mut O
where
    O: SessionObserver + ?Sized,
{
    fn move_applied(&mut self, index: CellIndex, mark: Mark) {
        (**self).move_applied(index, mark);
    }

    fn terminal(&mut self, outcome: Outcome) {
        (**self).terminal(outcome);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum SessionEvent {
    MoveApplied { index: CellIndex, mark: Mark },
    Terminal { outcome: Outcome },
}

/// Observer that records every notification in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SessionEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }
}

impl SessionObserver for EventLog {
    fn move_applied(&mut self, index: CellIndex, mark: Mark) {
        self.events.push(SessionEvent::MoveApplied { index, mark });
    }

    fn terminal(&mut self, outcome: Outcome) {
        self.events.push(SessionEvent::Terminal { outcome });
    }
}
