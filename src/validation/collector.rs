//! Fan-in of evaluation outcomes into the active and failed sequences

use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::core::error::{Result, UaCheckError};
use crate::core::types::{Candidate, FailedCandidate, Outcome};

/// Producer handle given to every evaluation task.
#[derive(Debug, Clone)]
pub struct OutcomeSender {
    active: UnboundedSender<Candidate>,
    failed: UnboundedSender<FailedCandidate>,
}

impl OutcomeSender {
    /// Route an outcome to its sequence. Returns false if the reader is gone.
    pub fn send(&self, outcome: Outcome) -> bool {
        let delivered = match outcome {
            Outcome::Active(candidate) => self.active.send(candidate).is_ok(),
            Outcome::Failed(failed) => self.failed.send(failed).is_ok(),
        };
        if !delivered {
            warn!("Outcome dropped: result collector is no longer receiving");
        }
        delivered
    }
}

/// Owns the two reader tasks. Each reader is the only writer of its sequence,
/// which keeps arrival order and needs no lock.
#[derive(Debug)]
pub struct ResultCollector {
    active_reader: JoinHandle<Vec<Candidate>>,
    failed_reader: JoinHandle<Vec<FailedCandidate>>,
}

impl ResultCollector {
    /// Start both readers on the current runtime.
    pub fn spawn() -> (OutcomeSender, ResultCollector) {
        let (active_tx, active_rx) = mpsc::unbounded_channel();
        let (failed_tx, failed_rx) = mpsc::unbounded_channel();

        let collector = ResultCollector {
            active_reader: tokio::spawn(drain(active_rx)),
            failed_reader: tokio::spawn(drain(failed_rx)),
        };
        let sender = OutcomeSender {
            active: active_tx,
            failed: failed_tx,
        };
        (sender, collector)
    }

    /// Wait for both streams to close and return their contents.
    ///
    /// Every [`OutcomeSender`] clone must be dropped first, otherwise this
    /// never returns.
    pub async fn finish(self) -> Result<(Vec<Candidate>, Vec<FailedCandidate>)> {
        let active = self
            .active_reader
            .await
            .map_err(|e| UaCheckError::Internal(format!("active reader failed: {e}")))?;
        let failed = self
            .failed_reader
            .await
            .map_err(|e| UaCheckError::Internal(format!("failed reader failed: {e}")))?;
        Ok((active, failed))
    }
}

async fn drain<T>(mut rx: UnboundedReceiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Some(item) = rx.recv().await {
        items.push(item);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FailureReason;

    fn candidate(value: &str) -> Candidate {
        Candidate::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_outcomes_split_by_kind_in_arrival_order() -> Result<()> {
        let (sender, collector) = ResultCollector::spawn();

        assert!(sender.send(Outcome::Active(candidate("a"))));
        assert!(sender.send(Outcome::failed(candidate("b"), FailureReason::Status(500))));
        assert!(sender.send(Outcome::Active(candidate("c"))));
        drop(sender);

        let (active, failed) = collector.finish().await?;
        assert_eq!(active, vec![candidate("a"), candidate("c")]);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].candidate, candidate("b"));
        Ok(())
    }

    #[tokio::test]
    async fn test_many_producers() -> Result<()> {
        let (sender, collector) = ResultCollector::spawn();

        let mut handles = Vec::new();
        for i in 0..50 {
            let sender = sender.clone();
            handles.push(tokio::spawn(async move {
                let ua = candidate(&format!("UA-{i}"));
                if i % 2 == 0 {
                    sender.send(Outcome::Active(ua))
                } else {
                    sender.send(Outcome::failed(ua, FailureReason::Status(404)))
                }
            }));
        }
        drop(sender);
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let (active, failed) = collector.finish().await?;
        assert_eq!(active.len(), 25);
        assert_eq!(failed.len(), 25);
        Ok(())
    }

    #[tokio::test]
    async fn test_finish_with_no_outcomes() -> Result<()> {
        let (sender, collector) = ResultCollector::spawn();
        drop(sender);

        let (active, failed) = collector.finish().await?;
        assert!(active.is_empty());
        assert!(failed.is_empty());
        Ok(())
    }
}
