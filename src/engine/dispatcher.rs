use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::services::sinks::DecisionSink;

use super::gesture::Verdict;
use super::machine::Decision;

/// Tally of decisions handed to the sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Forwards decisions to a [`DecisionSink`] from a single background task.
///
/// The queue is FIFO with one call in flight, so the sink sees decisions in
/// deck order. Sink failures are logged and dropped.
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Decision>,
    worker: JoinHandle<DispatchReport>,
}

impl Dispatcher {
    pub fn spawn(sink: Arc<dyn DecisionSink>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(Self::dispatch_task(sink, rx));
        Self { tx, worker }
    }

    pub fn send(&self, decision: Decision) {
        if let Err(e) = self.tx.send(decision) {
            tracing::error!(index = e.0.index, "Dispatcher stopped, decision dropped");
        }
    }

    /// Closes the queue and waits until every queued decision reached the sink
    pub async fn finish(self) -> DispatchReport {
        drop(self.tx);
        match self.worker.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Dispatcher task failed");
                DispatchReport::default()
            }
        }
    }

    async fn dispatch_task(
        sink: Arc<dyn DecisionSink>,
        mut rx: mpsc::UnboundedReceiver<Decision>,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        while let Some(decision) = rx.recv().await {
            let record = &decision.record;
            let result = match decision.verdict {
                Verdict::Accept => {
                    report.accepted += 1;
                    sink.on_accept(record).await
                }
                Verdict::Reject => {
                    report.rejected += 1;
                    sink.on_reject(record).await
                }
            };

            match result {
                Ok(()) => tracing::info!(
                    sink = sink.name(),
                    index = decision.index,
                    movie_id = record.id,
                    verdict = ?decision.verdict,
                    "Decision recorded"
                ),
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        sink = sink.name(),
                        index = decision.index,
                        movie_id = record.id,
                        error = %e,
                        "Failed to record decision"
                    );
                }
            }
        }

        report
    }
}
