//! Property-based tests for the uacheck engine using proptest
//!
//! Candidates encode their own behaviour (how many attempts fail before one
//! succeeds), so every run can be checked against an exact expectation
//! regardless of completion order.

use async_trait::async_trait;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use uacheck::core::{Candidate, FailureReason};
use uacheck::ui::{ProgressSink, ProgressTick, SilentProgress};
use uacheck::validation::{Engine, Probe, ProbeResult, RetryPolicy, ValidateUserAgents};

/// Sentinel for "never succeeds"
const ALWAYS_FAILS: u32 = u32::MAX;

fn candidate_name(index: usize, failures: u32) -> String {
    format!("UA-{index}-f{failures}")
}

fn failures_of(candidate: &Candidate) -> u32 {
    let value = candidate.as_str();
    value
        .rsplit_once("-f")
        .and_then(|(_, n)| n.parse().ok())
        .unwrap_or(ALWAYS_FAILS)
}

/// Fails the first `failures` attempts of each candidate with a status
/// that encodes the attempt number, then succeeds.
#[derive(Default)]
struct ScriptedProbe {
    attempts: Arc<Mutex<HashMap<String, u32>>>,
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

#[async_trait]
impl Probe for ScriptedProbe {
    async fn probe(&self, candidate: &Candidate) -> ProbeResult {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let entry = attempts.entry(candidate.as_str().to_string()).or_insert(0);
            *entry += 1;
            *entry
        };
        tokio::task::yield_now().await;

        self.current.fetch_sub(1, Ordering::SeqCst);
        if attempt > failures_of(candidate) {
            Ok(())
        } else {
            Err(FailureReason::Status(500 + attempt as u16))
        }
    }
}

#[derive(Default)]
struct CountingSink {
    ticks: Mutex<Vec<ProgressTick>>,
}

impl ProgressSink for CountingSink {
    fn render(&self, tick: ProgressTick) {
        self.ticks.lock().unwrap().push(tick);
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap()
}

/// Per-candidate failure counts; `None` means the candidate never succeeds
fn behaviours_strategy() -> impl Strategy<Value = Vec<Option<u32>>> {
    prop::collection::vec(prop::option::weighted(0.8, 0u32..4), 1..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_every_candidate_gets_exactly_one_outcome(
        behaviours in behaviours_strategy(),
        concurrency in 1usize..8,
        max_attempts in 1u32..4,
    ) {
        let input: Vec<Candidate> = behaviours
            .iter()
            .enumerate()
            .map(|(i, b)| Candidate::new(candidate_name(i, b.unwrap_or(ALWAYS_FAILS))).unwrap())
            .collect();
        let total = input.len();

        let probe = ScriptedProbe::default();
        let attempts = probe.attempts.clone();
        let engine = Engine::new(probe, RetryPolicy::new(max_attempts), concurrency);
        let sink = Arc::new(CountingSink::default());

        let report = runtime()
            .block_on(engine.validate(input.clone(), sink.clone()))
            .unwrap();

        // Completeness and partition
        prop_assert_eq!(report.active.len() + report.failed.len(), total);
        prop_assert_eq!(report.summary.total(), total);
        prop_assert_eq!(
            report.summary.active_count() + report.summary.failed_count(),
            report.summary.total()
        );

        let mut seen: Vec<&str> = report
            .active
            .iter()
            .map(Candidate::as_str)
            .chain(report.failed.iter().map(|f| f.candidate.as_str()))
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = input.iter().map(Candidate::as_str).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);

        // Classification, retry count and last-reason-wins
        let attempts = attempts.lock().unwrap();
        for active in &report.active {
            let failures = failures_of(active);
            prop_assert!(failures < max_attempts);
            prop_assert_eq!(attempts[active.as_str()], failures + 1);
        }
        for failed in &report.failed {
            prop_assert!(failures_of(&failed.candidate) >= max_attempts);
            prop_assert_eq!(attempts[failed.candidate.as_str()], max_attempts);
            prop_assert_eq!(
                &failed.reason,
                &FailureReason::Status(500 + max_attempts as u16)
            );
        }

        // Exactly one progress tick per candidate, monotonic, last one final
        let ticks = sink.ticks.lock().unwrap();
        prop_assert_eq!(ticks.len(), total);
        for (i, tick) in ticks.iter().enumerate() {
            prop_assert_eq!(tick.current, i + 1);
            prop_assert_eq!(tick.is_final, i + 1 == total);
        }
    }

    #[test]
    fn test_concurrency_never_exceeds_limit(
        count in 1usize..60,
        concurrency in 1usize..10,
    ) {
        let input: Vec<Candidate> = (0..count)
            .map(|i| Candidate::new(candidate_name(i, 1)).unwrap())
            .collect();

        let probe = ScriptedProbe::default();
        let probe_peak = probe.peak.clone();
        let engine = Engine::new(probe, RetryPolicy::new(2), concurrency);

        let report = runtime()
            .block_on(engine.validate(input, Arc::new(SilentProgress)))
            .unwrap();

        prop_assert_eq!(report.active.len(), count);
        prop_assert!(engine.gate().peak() <= concurrency);
        prop_assert!(probe_peak.load(Ordering::SeqCst) <= concurrency);
        prop_assert!(engine.gate().is_idle());
    }

    #[test]
    fn test_duplicates_are_evaluated_independently(
        copies in 1usize..20,
    ) {
        let input: Vec<Candidate> = (0..copies)
            .map(|_| Candidate::new("UA-dup-f0").unwrap())
            .collect();

        let probe = ScriptedProbe::default();
        let attempts = probe.attempts.clone();
        let engine = Engine::new(probe, RetryPolicy::new(3), 4);

        let report = runtime()
            .block_on(engine.validate(input, Arc::new(SilentProgress)))
            .unwrap();

        prop_assert_eq!(report.summary.total(), copies);
        prop_assert_eq!(report.active.len() + report.failed.len(), copies);
        prop_assert_eq!(attempts.lock().unwrap()["UA-dup-f0"] as usize, copies);
    }
}
