//! Concurrent evaluation of a candidate list
//!
//! One task is spawned per candidate, in input order, each after taking an
//! admission slot. Tasks report their outcome to the [`ResultCollector`] and
//! a progress unit to a separate progress consumer. The run completes only
//! after every task has been joined and both streams have been drained.

use async_trait::async_trait;
use futures::FutureExt;
use log::{debug, error};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::core::constants::error_messages;
use crate::core::error::{Result, UaCheckError};
use crate::core::types::{Candidate, FailedCandidate, FailureReason, Outcome, ProgressUnit};
use crate::reporting::logging;
use crate::reporting::summary::RunSummary;
use crate::ui::progress::{ProgressSink, ProgressTick};
use crate::validation::collector::ResultCollector;
use crate::validation::gate::AdmissionGate;
use crate::validation::probe::{HttpProbe, Probe};
use crate::validation::retry::RetryPolicy;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Active candidates in completion order
    pub active: Vec<Candidate>,
    /// Failed candidates in completion order
    pub failed: Vec<FailedCandidate>,
    pub summary: RunSummary,
}

#[async_trait]
pub trait ValidateUserAgents {
    /// Evaluate every candidate exactly once.
    ///
    /// Fails with [`UaCheckError::NoCandidates`] on empty input. Individual
    /// candidate failures never fail the run.
    async fn validate(
        &self,
        candidates: Vec<Candidate>,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<RunReport>;
}

pub struct Engine<P: Probe + 'static> {
    probe: Arc<P>,
    policy: Arc<RetryPolicy>,
    gate: AdmissionGate,
}

impl<P: Probe + 'static> Engine<P> {
    pub fn new(probe: P, policy: RetryPolicy, concurrency: usize) -> Self {
        Self {
            probe: Arc::new(probe),
            policy: Arc::new(policy),
            gate: AdmissionGate::new(concurrency),
        }
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl Engine<HttpProbe> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            HttpProbe::from_config(config)?,
            RetryPolicy::from_config(config)?,
            config.concurrency_limit(),
        ))
    }
}

#[async_trait]
impl<P: Probe + 'static> ValidateUserAgents for Engine<P> {
    async fn validate(
        &self,
        candidates: Vec<Candidate>,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<RunReport> {
        if candidates.is_empty() {
            return Err(UaCheckError::NoCandidates);
        }

        let total = candidates.len();
        let started = Instant::now();

        let (outcomes, collector) = ResultCollector::spawn();
        let (progress_tx, progress_rx) = mpsc::unbounded_channel::<ProgressUnit>();
        let progress_task = tokio::spawn(report_progress(progress_rx, total, progress));

        let mut tasks = JoinSet::new();
        for candidate in candidates {
            let permit = self.gate.admit().await?;
            let probe = Arc::clone(&self.probe);
            let policy = Arc::clone(&self.policy);
            let outcomes = outcomes.clone();
            let progress_tx = progress_tx.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let evaluated = AssertUnwindSafe(policy.evaluate(probe.as_ref(), &candidate))
                    .catch_unwind()
                    .await;
                let outcome = match evaluated {
                    Ok(outcome) => outcome,
                    Err(panic) => {
                        let message = panic_message(panic.as_ref());
                        error!("Evaluation of '{candidate}' panicked: {message}");
                        Outcome::failed(candidate, FailureReason::Internal(message))
                    }
                };

                outcomes.send(outcome);
                // Progress is observational; a gone consumer is not an error
                let _ = progress_tx.send(ProgressUnit);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                error!("Evaluation task did not complete: {err}");
            }
        }

        // Close both streams; the readers finish once the last sender is gone
        drop(outcomes);
        drop(progress_tx);

        let (active, failed) = collector.finish().await?;
        let elapsed = started.elapsed();

        match progress_task.await {
            Ok(rendered) if rendered != total => {
                logging::log_warning(&format!("Progress rendered {rendered} of {total} units"));
            }
            Ok(_) => {}
            Err(err) => logging::log_warning(&format!("Progress reporter stopped early: {err}")),
        }

        debug!(
            "Run finished: {} active, {} failed, peak concurrency {}",
            active.len(),
            failed.len(),
            self.gate.peak()
        );

        let summary = RunSummary::new(total, active.len(), failed.len(), elapsed)?;
        Ok(RunReport {
            active,
            failed,
            summary,
        })
    }
}

/// Single consumer of progress units. Returns how many ticks it rendered.
async fn report_progress(
    mut units: UnboundedReceiver<ProgressUnit>,
    total: usize,
    sink: Arc<dyn ProgressSink>,
) -> usize {
    let mut current = 0;
    while units.recv().await.is_some() {
        current += 1;
        sink.render(ProgressTick::new(current, total));
    }
    current
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        error_messages::UNKNOWN_PANIC.to_string()
    }
}
