//! Controller - owns a session and its tick driver, and notifies observers.
//!
//! Front ends (the terminal loop, the TCP adapter bridge, tests) talk to the
//! game only through this type. Every action goes through [`Controller::dispatch`];
//! when it changes observable state the fresh [`SessionSnapshot`] is pushed to
//! every subscriber.

use crate::core::{CellSource, CoreResult, Outcome, Session, SessionSnapshot};
use crate::tick::TickSource;
use crate::types::{BoardPoint, GameAction};

/// Handle returned by [`Controller::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&SessionSnapshot)>;

pub struct Controller<R, T> {
    session: Session<R>,
    ticks: T,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
    snapshot: SessionSnapshot,
}

impl<R: CellSource, T: TickSource> Controller<R, T> {
    pub fn new(session: Session<R>, ticks: T) -> Self {
        let snapshot = session.snapshot();
        Self {
            session,
            ticks,
            observers: Vec::new(),
            next_id: 1,
            snapshot,
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    /// Latest published state.
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Register an observer. It is called once right away with the current
    /// state, then after every observable change.
    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&SessionSnapshot) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        observer(&self.snapshot);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Apply one action and notify observers if anything visible changed.
    pub fn dispatch(&mut self, action: GameAction) -> CoreResult<Outcome> {
        let outcome = self.session.apply(action)?;
        if matches!(outcome, Outcome::Started { .. }) {
            self.ticks.reset();
        }
        if outcome.changed() {
            self.publish();
        }
        Ok(outcome)
    }

    pub fn start(&mut self) -> CoreResult<Outcome> {
        self.dispatch(GameAction::Start)
    }

    pub fn begin_drag(&mut self, p: BoardPoint) -> CoreResult<Outcome> {
        self.dispatch(GameAction::BeginDrag(p))
    }

    pub fn move_drag(&mut self, p: BoardPoint) -> CoreResult<Outcome> {
        self.dispatch(GameAction::MoveDrag(p))
    }

    pub fn end_drag(&mut self, p: BoardPoint) -> CoreResult<Outcome> {
        self.dispatch(GameAction::EndDrag(p))
    }

    /// Deliver every tick the source reports as due.
    ///
    /// Returns the outcomes that changed state (at most one `GameOver`).
    pub fn pump_ticks(&mut self) -> TickReport {
        let due = self.ticks.poll();
        let mut report = TickReport::default();
        for _ in 0..due {
            match self.session.tick() {
                Outcome::Ignored => break,
                Outcome::GameOver { final_score } => {
                    report.applied += 1;
                    report.game_over = Some(final_score);
                    break;
                }
                _ => report.applied += 1,
            }
        }
        if report.applied > 0 {
            self.publish();
        }
        report
    }

    fn publish(&mut self) {
        self.session.snapshot_into(&mut self.snapshot);
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.snapshot);
        }
    }
}

/// What [`Controller::pump_ticks`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Ticks that reached a running session
    pub applied: u32,
    /// Set when the last applied tick ended the session
    pub game_over: Option<u32>,
}
