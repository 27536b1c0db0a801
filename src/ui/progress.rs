use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// One rendered progress position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTick {
    pub current: usize,
    pub total: usize,
    /// Integer percentage, `current * 100 / total`
    pub percent: usize,
    /// Set only on the tick where `current == total`
    pub is_final: bool,
}

impl ProgressTick {
    pub fn new(current: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            current * 100 / total
        };
        Self {
            current,
            total,
            percent,
            is_final: current >= total,
        }
    }
}

/// Receives one tick per finished candidate.
pub trait ProgressSink: Send + Sync {
    fn render(&self, tick: ProgressTick);
}

/// Sink for quiet runs and machine-readable formats
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn render(&self, _tick: ProgressTick) {}
}

pub struct ProgressReporter {
    candidate_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            candidate_progress: None,
            enabled,
        }
    }

    pub fn start_validation(&mut self, total_candidates: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total_candidates as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Progress: [{bar:50.cyan/blue}] {percent}% ({pos}/{len}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▌-"),
        );
        pb.set_message("Checking User-Agents");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.candidate_progress = Some(pb);
    }

}

impl ProgressSink for ProgressReporter {
    fn render(&self, tick: ProgressTick) {
        let Some(ref pb) = self.candidate_progress else {
            return;
        };
        pb.set_position(tick.current as u64);
        if tick.is_final {
            pb.finish_with_message("✓ Review completed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_percent_is_integer_division() {
        assert_eq!(ProgressTick::new(1, 3).percent, 33);
        assert_eq!(ProgressTick::new(2, 3).percent, 66);
        assert_eq!(ProgressTick::new(3, 3).percent, 100);
    }

    #[test]
    fn test_tick_final_only_at_total() {
        assert!(!ProgressTick::new(1, 2).is_final);
        assert!(ProgressTick::new(2, 2).is_final);
    }

    #[test]
    fn test_tick_zero_total() {
        let tick = ProgressTick::new(0, 0);
        assert_eq!(tick.percent, 100);
        assert!(tick.is_final);
    }

    #[test]
    fn test_progress_reporter_disabled() {
        let mut reporter = ProgressReporter::new(false);
        reporter.start_validation(10);

        assert!(reporter.candidate_progress.is_none());

        // Rendering while disabled is a no-op
        reporter.render(ProgressTick::new(5, 10));
    }

    #[test]
    fn test_enabled_progress_reporter() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_validation(2);
        assert!(reporter.candidate_progress.is_some());

        reporter.render(ProgressTick::new(1, 2));
        reporter.render(ProgressTick::new(2, 2));
        assert!(
            reporter
                .candidate_progress
                .as_ref()
                .is_some_and(ProgressBar::is_finished)
        );
    }

    #[test]
    fn test_progress_reporter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProgressReporter>();
        assert_send_sync::<SilentProgress>();
    }
}
