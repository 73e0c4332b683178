use std::time::Duration;

use serde::Serialize;

use crate::error::EngineError;
use crate::models::RecommendationRecord;

use super::deck::Deck;
use super::gesture::{Direction, GestureEvent, Offset, Verdict};

pub const DEFAULT_THRESHOLD_FRACTION: f64 = 0.25;
pub const DEFAULT_SETTLE_DURATION: Duration = Duration::from_millis(250);

/// Everything an engine needs, handed over at construction
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub items: Vec<RecommendationRecord>,
    pub viewport_width: f64,
    pub threshold_fraction: f64,
    pub settle_duration: Duration,
}

impl EngineConfig {
    pub fn new(items: Vec<RecommendationRecord>, viewport_width: f64) -> Self {
        Self {
            items,
            viewport_width,
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
            settle_duration: DEFAULT_SETTLE_DURATION,
        }
    }

    pub fn with_threshold_fraction(mut self, fraction: f64) -> Self {
        self.threshold_fraction = fraction;
        self
    }

    pub fn with_settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }
}

fn validate_width(width: f64) -> Result<f64, EngineError> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(EngineError::InvalidViewport(width))
    }
}

/// Interaction phase of the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Dragging,
    Settling { direction: Direction },
}

/// A committed swipe whose settle animation has just been scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub index: usize,
    pub direction: Direction,
    pub settle_for: Duration,
}

/// A finished decision, produced once the settle animation completes
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub index: usize,
    pub verdict: Verdict,
    pub record: RecommendationRecord,
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub cursor: usize,
    pub len: usize,
    #[serde(flatten)]
    pub phase: Phase,
    pub offset: Offset,
    pub rotation_degrees: f64,
    pub exhausted: bool,
    pub current: Option<RecommendationRecord>,
    pub next: Option<RecommendationRecord>,
}

#[derive(Debug, Clone)]
struct PendingDecision {
    index: usize,
    direction: Direction,
    record: RecommendationRecord,
}

/// Turns gestures and swipe commands into one decision per deck entry.
///
/// The machine has no clock: a [`Commit`] tells the caller how long to wait
/// before calling [`SwipeMachine::complete_settle`]. While settling, all input
/// is ignored, so a record can never be decided twice.
#[derive(Debug)]
pub struct SwipeMachine {
    deck: Deck,
    viewport_width: f64,
    threshold_fraction: f64,
    settle_duration: Duration,
    phase: Phase,
    offset: Offset,
    pending: Option<PendingDecision>,
}

impl SwipeMachine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let viewport_width = validate_width(config.viewport_width)?;
        let fraction = config.threshold_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(EngineError::InvalidThreshold(fraction));
        }

        Ok(Self {
            deck: Deck::new(config.items),
            viewport_width,
            threshold_fraction: fraction,
            settle_duration: config.settle_duration,
            phase: Phase::Idle,
            offset: Offset::ZERO,
            pending: None,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold_fraction * self.viewport_width
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn cursor(&self) -> usize {
        self.deck.cursor()
    }

    pub fn is_exhausted(&self) -> bool {
        self.deck.is_exhausted()
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling { .. })
    }

    /// Updates the surface width; the threshold follows it.
    pub fn resize(&mut self, viewport_width: f64) -> Result<(), EngineError> {
        self.viewport_width = validate_width(viewport_width)?;
        if let Phase::Settling { direction } = self.phase {
            self.offset = direction.exit_offset(self.viewport_width);
        }
        Ok(())
    }

    pub fn gesture(&mut self, event: GestureEvent) -> Option<Commit> {
        match (self.phase, event) {
            (Phase::Settling { .. }, _) => {
                tracing::debug!(cursor = self.cursor(), ?event, "Ignoring gesture while settling");
                None
            }
            (_, GestureEvent::Start) if self.deck.is_exhausted() => {
                tracing::debug!("Ignoring gesture on exhausted deck");
                None
            }
            (_, GestureEvent::Start) => {
                self.phase = Phase::Dragging;
                self.offset = Offset::ZERO;
                None
            }
            (Phase::Dragging, GestureEvent::Move { dx, dy }) => {
                let offset = Offset::new(dx, dy);
                if offset.is_finite() {
                    self.offset = offset;
                }
                None
            }
            (Phase::Dragging, GestureEvent::End { dx, dy }) => {
                let release = Offset::new(dx, dy);
                let direction = if release.is_finite() {
                    Direction::from_release(release.x, self.threshold())
                } else {
                    tracing::debug!(?release, "Malformed gesture release");
                    None
                };

                match direction {
                    Some(direction) => self.commit(direction),
                    None => {
                        self.spring_back();
                        None
                    }
                }
            }
            (Phase::Idle, _) => None,
        }
    }

    /// Discrete swipe, e.g. an arrow key or an accept/reject button
    pub fn swipe(&mut self, direction: Direction) -> Option<Commit> {
        if self.is_settling() || self.deck.is_exhausted() {
            tracing::debug!(cursor = self.cursor(), ?direction, "Ignoring swipe command");
            return None;
        }
        self.commit(direction)
    }

    /// Settle continuation: resets the card and advances the cursor.
    ///
    /// Returns `None` when nothing is settling.
    pub fn complete_settle(&mut self) -> Option<Decision> {
        let pending = self.pending.take()?;
        self.offset = Offset::ZERO;
        self.deck.advance();
        self.phase = Phase::Idle;

        Some(Decision {
            index: pending.index,
            verdict: pending.direction.verdict(),
            record: pending.record,
        })
    }

    /// Drops a pending settle without deciding. Returns true if one was dropped.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            self.spring_back();
        }
        cancelled
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            cursor: self.deck.cursor(),
            len: self.deck.len(),
            phase: self.phase,
            offset: self.offset,
            rotation_degrees: self.offset.rotation_degrees(self.viewport_width),
            exhausted: self.deck.is_exhausted(),
            current: self.deck.current().cloned(),
            next: self.deck.next().cloned(),
        }
    }

    fn commit(&mut self, direction: Direction) -> Option<Commit> {
        let index = self.deck.cursor();
        let record = self.deck.current()?.clone();

        self.pending = Some(PendingDecision {
            index,
            direction,
            record,
        });
        self.phase = Phase::Settling { direction };
        self.offset = direction.exit_offset(self.viewport_width);

        Some(Commit {
            index,
            direction,
            settle_for: self.settle_duration,
        })
    }

    fn spring_back(&mut self) {
        self.phase = Phase::Idle;
        self.offset = Offset::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(id: i64, title: &str) -> RecommendationRecord {
        RecommendationRecord::new(id, title)
    }

    fn machine(items: Vec<RecommendationRecord>) -> SwipeMachine {
        SwipeMachine::new(EngineConfig::new(items, 400.0)).unwrap()
    }

    fn drag(machine: &mut SwipeMachine, dx: f64) -> Option<Commit> {
        machine.gesture(GestureEvent::Start);
        machine.gesture(GestureEvent::Move { dx, dy: 10.0 });
        machine.gesture(GestureEvent::End { dx, dy: 10.0 })
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = SwipeMachine::new(EngineConfig::new(vec![], 0.0)).unwrap_err();
        assert_eq!(err, EngineError::InvalidViewport(0.0));

        let err =
            SwipeMachine::new(EngineConfig::new(vec![], 400.0).with_threshold_fraction(1.5))
                .unwrap_err();
        assert_eq!(err, EngineError::InvalidThreshold(1.5));
    }

    #[test]
    fn test_threshold_is_quarter_of_width() {
        let machine = machine(vec![]);
        assert_eq!(machine.threshold(), 100.0);
    }

    #[test]
    fn test_accept_then_reject_exhausts_deck() {
        let a = record(1, "A");
        let b = record(2, "B");
        let mut machine = machine(vec![a.clone(), b.clone()]);

        let commit = drag(&mut machine, 1000.0).unwrap();
        assert_eq!(commit.index, 0);
        assert_eq!(commit.direction, Direction::Right);
        assert_eq!(commit.settle_for, DEFAULT_SETTLE_DURATION);
        let first = machine.complete_settle().unwrap();

        drag(&mut machine, -1000.0).unwrap();
        let second = machine.complete_settle().unwrap();

        assert_eq!((first.verdict, first.record), (Verdict::Accept, a));
        assert_eq!((second.verdict, second.record), (Verdict::Reject, b));
        assert!(machine.is_exhausted());
        assert_eq!(machine.cursor(), 2);
    }

    #[test]
    fn test_short_drag_springs_back() {
        let mut machine = machine(vec![record(1, "A")]);

        machine.gesture(GestureEvent::Start);
        machine.gesture(GestureEvent::Move { dx: 50.0, dy: 5.0 });
        assert_eq!(machine.phase(), Phase::Dragging);
        assert_eq!(machine.offset(), Offset::new(50.0, 5.0));

        let commit = machine.gesture(GestureEvent::End { dx: 50.0, dy: 5.0 });
        assert!(commit.is_none());
        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(machine.offset(), Offset::ZERO);
        assert_eq!(machine.cursor(), 0);
        assert!(machine.complete_settle().is_none());
    }

    #[test]
    fn test_release_exactly_at_threshold_is_no_decision() {
        let mut machine = machine(vec![record(1, "A")]);
        assert!(drag(&mut machine, 100.0).is_none());
        assert!(drag(&mut machine, -100.0).is_none());
        assert_eq!(machine.cursor(), 0);
    }

    #[test]
    fn test_settling_ignores_further_input() {
        let mut machine = machine(vec![record(1, "A"), record(2, "B")]);
        drag(&mut machine, 500.0).unwrap();

        assert!(machine.gesture(GestureEvent::Start).is_none());
        assert!(machine
            .gesture(GestureEvent::End { dx: 500.0, dy: 0.0 })
            .is_none());
        assert!(machine.swipe(Direction::Left).is_none());
        assert_eq!(
            machine.phase(),
            Phase::Settling {
                direction: Direction::Right
            }
        );

        let decision = machine.complete_settle().unwrap();
        assert_eq!(decision.index, 0);
        assert!(machine.complete_settle().is_none());
        assert_eq!(machine.cursor(), 1);
    }

    #[test]
    fn test_settling_offset_is_exit_target() {
        let mut machine = machine(vec![record(1, "A")]);
        machine.swipe(Direction::Left).unwrap();
        assert_eq!(machine.offset(), Offset::new(-400.0, 0.0));

        machine.resize(800.0).unwrap();
        assert_eq!(machine.offset(), Offset::new(-800.0, 0.0));
    }

    #[test]
    fn test_command_matches_drag_just_past_threshold() {
        let items = vec![record(1, "A"), record(2, "B")];

        let mut by_drag = machine(items.clone());
        let mut by_command = machine(items);

        let drag_commit = drag(&mut by_drag, 101.0).unwrap();
        let command_commit = by_command.swipe(Direction::Right).unwrap();
        assert_eq!(drag_commit, command_commit);
        assert_eq!(by_drag.complete_settle(), by_command.complete_settle());
        assert_eq!(by_drag.snapshot(), by_command.snapshot());
    }

    #[test]
    fn test_swipe_from_dragging_commits() {
        let mut machine = machine(vec![record(1, "A")]);
        machine.gesture(GestureEvent::Start);
        machine.gesture(GestureEvent::Move { dx: 20.0, dy: 0.0 });
        let commit = machine.swipe(Direction::Left).unwrap();
        assert_eq!(commit.direction, Direction::Left);
    }

    #[test]
    fn test_malformed_gestures_are_no_ops() {
        let mut machine = machine(vec![record(1, "A")]);

        assert!(machine
            .gesture(GestureEvent::End { dx: 900.0, dy: 0.0 })
            .is_none());
        machine.gesture(GestureEvent::Move { dx: 30.0, dy: 0.0 });
        assert_eq!(machine.offset(), Offset::ZERO);

        machine.gesture(GestureEvent::Start);
        machine.gesture(GestureEvent::Move {
            dx: f64::NAN,
            dy: 0.0,
        });
        assert_eq!(machine.offset(), Offset::ZERO);
        assert!(machine
            .gesture(GestureEvent::End {
                dx: f64::INFINITY,
                dy: 0.0
            })
            .is_none());
        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(machine.cursor(), 0);
    }

    #[test]
    fn test_exhausted_deck_ignores_input() {
        let mut machine = machine(vec![]);
        assert!(machine.is_exhausted());
        assert!(machine.swipe(Direction::Right).is_none());
        machine.gesture(GestureEvent::Start);
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn test_cancel_discards_pending_decision() {
        let mut machine = machine(vec![record(1, "A")]);
        machine.swipe(Direction::Right).unwrap();

        assert!(machine.cancel());
        assert!(machine.complete_settle().is_none());
        assert_eq!(machine.cursor(), 0);
        assert!(!machine.cancel());
    }

    #[test]
    fn test_snapshot_reports_current_and_next() {
        let mut machine = machine(vec![record(1, "A"), record(2, "B")]);
        let snapshot = machine.snapshot();
        assert_eq!(snapshot.current.map(|r| r.id), Some(1));
        assert_eq!(snapshot.next.map(|r| r.id), Some(2));
        assert!(!snapshot.exhausted);

        machine.gesture(GestureEvent::Start);
        machine.gesture(GestureEvent::Move { dx: 300.0, dy: 0.0 });
        assert_eq!(machine.snapshot().rotation_degrees, 60.0);
    }

    proptest! {
        #[test]
        fn prop_every_committed_swipe_decides_once(directions in proptest::collection::vec(any::<bool>(), 0..20)) {
            let items: Vec<_> = (0..directions.len() as i64).map(|i| record(i, "M")).collect();
            let mut machine = machine(items);
            let mut decided = Vec::new();

            for right in &directions {
                let dx = if *right { 1000.0 } else { -1000.0 };
                prop_assert!(drag(&mut machine, dx).is_some());
                prop_assert!(drag(&mut machine, dx).is_none());
                decided.push(machine.complete_settle().unwrap().index);
            }

            prop_assert!(machine.is_exhausted());
            prop_assert_eq!(decided, (0..directions.len()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_release_rule(dx in -1000.0f64..1000.0) {
            let mut machine = machine(vec![record(1, "A")]);
            let commit = drag(&mut machine, dx);
            if dx > 100.0 {
                prop_assert_eq!(commit.map(|c| c.direction), Some(Direction::Right));
            } else if dx < -100.0 {
                prop_assert_eq!(commit.map(|c| c.direction), Some(Direction::Left));
            } else {
                prop_assert!(commit.is_none());
                prop_assert_eq!(machine.offset(), Offset::ZERO);
                prop_assert_eq!(machine.phase(), Phase::Idle);
            }
        }
    }
}
