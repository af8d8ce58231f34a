use std::time::Instant;

/// Failure bookkeeping of the capture loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecoveryState {
    pub consecutive_failures: u32,
    pub last_reset_attempt: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Back off and read again.
    Retry,
    /// Close and reopen the source before reading again.
    Reset,
}

/// Decides when a run of read failures warrants a source reset.
///
/// A reset is requested once the run exceeds `threshold`. The counter is
/// cleared when the reset finishes, so the next reset needs a whole new run.
/// `last_reset_attempt` records when the previous reset ended.
#[derive(Debug)]
pub struct RecoveryPolicy {
    threshold: u32,
    state: RecoveryState,
    resets: u64,
}

impl RecoveryPolicy {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            state: RecoveryState::default(),
            resets: 0,
        }
    }

    pub fn record_success(&mut self) {
        self.state.consecutive_failures = 0;
    }

    pub fn record_failure(&mut self) -> RecoveryAction {
        self.state.consecutive_failures += 1;
        if self.state.consecutive_failures > self.threshold {
            self.resets += 1;
            RecoveryAction::Reset
        } else {
            RecoveryAction::Retry
        }
    }

    /// Call after every reset attempt, whatever its outcome.
    pub fn reset_finished(&mut self) {
        self.state.consecutive_failures = 0;
        self.state.last_reset_attempt = Some(Instant::now());
    }

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.state.consecutive_failures
    }

    /// Number of resets requested so far.
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_on_sixth_failure_only() {
        let mut policy = RecoveryPolicy::new(5);
        for n in 1..=5 {
            assert_eq!(policy.record_failure(), RecoveryAction::Retry);
            assert_eq!(policy.consecutive_failures(), n);
        }
        assert!(policy.state().last_reset_attempt.is_none());

        assert_eq!(policy.record_failure(), RecoveryAction::Reset);
        assert!(policy.state().last_reset_attempt.is_none());
        policy.reset_finished();
        assert!(policy.state().last_reset_attempt.is_some());
        assert_eq!(policy.consecutive_failures(), 0);
        assert_eq!(policy.resets(), 1);
    }

    #[test]
    fn test_success_clears_the_run() {
        let mut policy = RecoveryPolicy::new(5);
        for _ in 0..5 {
            policy.record_failure();
        }
        policy.record_success();
        assert_eq!(policy.consecutive_failures(), 0);

        // a fresh run needs six more failures
        for _ in 0..5 {
            assert_eq!(policy.record_failure(), RecoveryAction::Retry);
        }
        assert_eq!(policy.record_failure(), RecoveryAction::Reset);
    }

    #[test]
    fn test_one_reset_per_run() {
        let mut policy = RecoveryPolicy::new(5);
        let mut resets = 0;
        for _ in 0..18 {
            if policy.record_failure() == RecoveryAction::Reset {
                resets += 1;
                policy.reset_finished();
            }
        }
        assert_eq!(resets, 3);
        assert_eq!(policy.resets(), 3);
    }

    #[test]
    fn test_second_reset_sees_the_first() {
        let mut policy = RecoveryPolicy::new(0);
        assert_eq!(policy.record_failure(), RecoveryAction::Reset);
        policy.reset_finished();
        let first = policy.state().last_reset_attempt.expect("no first reset");

        assert_eq!(policy.record_failure(), RecoveryAction::Reset);
        assert_eq!(policy.state().last_reset_attempt, Some(first));
        policy.reset_finished();
        assert!(policy.state().last_reset_attempt.expect("no second reset") >= first);
    }
}
