use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::error::EngineError;
use crate::services::sinks::DecisionSink;

use super::dispatcher::{DispatchReport, Dispatcher};
use super::gesture::{Direction, GestureEvent};
use super::input::{Command, SessionInput};
use super::machine::{Commit, EngineConfig, EngineSnapshot, SwipeMachine};

/// Summary returned when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub cursor: usize,
    pub exhausted: bool,
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl SessionReport {
    pub fn decided(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Handle to a running swipe session.
///
/// The session owns one [`SwipeMachine`] on a tokio task. Inputs are applied
/// in arrival order; a commit arms the settle timer, and the decision is
/// dispatched only when it fires. Closing the session, or dropping every
/// handle, disarms a pending timer so the interrupted card is never decided.
pub struct SwipeSession {
    input_tx: mpsc::UnboundedSender<SessionInput>,
    state_rx: watch::Receiver<EngineSnapshot>,
    task: JoinHandle<SessionReport>,
}

impl SwipeSession {
    pub fn spawn(config: EngineConfig, sink: Arc<dyn DecisionSink>) -> Result<Self, EngineError> {
        let machine = SwipeMachine::new(config)?;
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(machine.snapshot());

        tracing::info!(
            deck_len = machine.snapshot().len,
            threshold = machine.threshold(),
            "Swipe session started"
        );

        let dispatcher = Dispatcher::spawn(sink);
        let task = tokio::spawn(Self::run(machine, input_rx, state_tx, dispatcher));

        Ok(Self {
            input_tx,
            state_rx,
            task,
        })
    }

    /// Queues an input; returns false once the session has ended
    pub fn send(&self, input: impl Into<SessionInput>) -> bool {
        self.input_tx.send(input.into()).is_ok()
    }

    pub fn gesture(&self, event: GestureEvent) -> bool {
        self.send(event)
    }

    pub fn swipe(&self, direction: Direction) -> bool {
        self.send(Command::from(direction))
    }

    pub fn resize(&self, viewport_width: f64) -> bool {
        self.send(SessionInput::Resize(viewport_width))
    }

    /// Latest published state
    pub fn snapshot(&self) -> EngineSnapshot {
        self.state_rx.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.state_rx.clone()
    }

    /// Tears the session down and waits for queued decisions to be delivered
    pub async fn close(self) -> SessionReport {
        let _ = self.input_tx.send(SessionInput::Command(Command::Close));
        drop(self.input_tx);

        match self.task.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Swipe session task failed");
                let snapshot = self.state_rx.borrow().clone();
                SessionReport {
                    cursor: snapshot.cursor,
                    exhausted: snapshot.exhausted,
                    accepted: 0,
                    rejected: 0,
                    failed: 0,
                }
            }
        }
    }

    async fn run(
        mut machine: SwipeMachine,
        mut input_rx: mpsc::UnboundedReceiver<SessionInput>,
        state_tx: watch::Sender<EngineSnapshot>,
        dispatcher: Dispatcher,
    ) -> SessionReport {
        let settle = time::sleep(std::time::Duration::ZERO);
        tokio::pin!(settle);
        let mut settling = false;

        loop {
            tokio::select! {
                () = &mut settle, if settling => {
                    settling = false;
                    if let Some(decision) = machine.complete_settle() {
                        tracing::debug!(
                            index = decision.index,
                            verdict = ?decision.verdict,
                            "Card settled"
                        );
                        dispatcher.send(decision);
                    }
                    if machine.is_exhausted() {
                        tracing::info!(cursor = machine.cursor(), "Deck exhausted");
                    }
                }
                input = input_rx.recv() => {
                    let commit = match input {
                        None | Some(SessionInput::Command(Command::Close)) => {
                            if machine.cancel() {
                                tracing::info!(
                                    cursor = machine.cursor(),
                                    "Session closed while settling, pending decision discarded"
                                );
                            }
                            break;
                        }
                        Some(SessionInput::Gesture(event)) => machine.gesture(event),
                        Some(SessionInput::Command(command)) => {
                            command.direction().and_then(|d| machine.swipe(d))
                        }
                        Some(SessionInput::Resize(width)) => {
                            if let Err(e) = machine.resize(width) {
                                tracing::warn!(error = %e, "Ignoring resize");
                            }
                            None
                        }
                    };

                    if let Some(Commit { index, direction, settle_for }) = commit {
                        tracing::debug!(index, ?direction, "Swipe committed");
                        settle.as_mut().reset(Instant::now() + settle_for);
                        settling = true;
                    }
                }
            }

            state_tx.send_replace(machine.snapshot());
        }

        state_tx.send_replace(machine.snapshot());
        let DispatchReport {
            accepted,
            rejected,
            failed,
        } = dispatcher.finish().await;

        tracing::info!(
            cursor = machine.cursor(),
            accepted,
            rejected,
            failed,
            "Swipe session ended"
        );

        SessionReport {
            cursor: machine.cursor(),
            exhausted: machine.is_exhausted(),
            accepted,
            rejected,
            failed,
        }
    }
}
