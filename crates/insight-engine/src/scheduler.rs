//! Concurrent task scheduler
//!
//! Fans the selected tasks out against one subject and always returns exactly
//! one outcome per task, in spec order. Two deadlines apply: a per-task budget
//! scoped to one task, and a global budget that cancels every still-pending
//! task at once. Failure of one task never aborts the others.

use insight_core::{InsightError, Result, SubjectProfile, TaskExecutor, TaskOutcome, TaskSpec};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

/// Configuration for the scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Overall budget for one analysis request
    pub global_budget: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            global_budget: Duration::from_secs(60),
        }
    }
}

/// Executes selected tasks concurrently under per-task and global deadlines
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Run every task spec against the subject
    ///
    /// Returns one [`TaskOutcome`] per spec, order-corresponding to the input.
    /// Task-level failures and timeouts are recovered locally and recorded on
    /// the outcome; only a missing executor is a structural error, raised
    /// before any task is dispatched.
    pub async fn run(
        &self,
        profile: &SubjectProfile,
        specs: &[TaskSpec],
        executors: &HashMap<insight_core::TaskKind, Arc<dyn TaskExecutor>>,
    ) -> Result<Vec<TaskOutcome>> {
        // Bind every executor up front so a configuration hole surfaces as a
        // hard error instead of a partial run.
        let bound: Vec<Arc<dyn TaskExecutor>> = specs
            .iter()
            .map(|spec| {
                executors
                    .get(&spec.kind)
                    .cloned()
                    .ok_or(InsightError::MissingExecutor(spec.kind))
            })
            .collect::<Result<_>>()?;

        let started = Instant::now();
        let global_deadline = started + self.config.global_budget;

        debug!(
            subject = %profile.symbol,
            tasks = specs.len(),
            global_budget_ms = self.config.global_budget.as_millis() as u64,
            "dispatching analysis tasks"
        );

        let mut handles = Vec::with_capacity(specs.len());
        for (spec, executor) in specs.iter().zip(bound) {
            // Per-task deadline, capped by the global one. Absolute instants
            // keep the budgets honest while handles are drained in order.
            let task_deadline = (started + spec.timeout).min(global_deadline);
            let kind = spec.kind;
            let subject = profile.symbol.clone();
            let profile = profile.clone();

            handles.push(tokio::spawn(async move {
                let deadline = task_deadline.into_std();
                match timeout_at(task_deadline, executor.execute(&subject, &profile, deadline))
                    .await
                {
                    Ok(Ok(report)) => TaskOutcome::success(kind, report),
                    Ok(Err(err)) => {
                        warn!(task = %kind, subject = %subject, error = %err, "analysis task failed");
                        TaskOutcome::failed(kind, err.to_string())
                    }
                    Err(_) => {
                        warn!(task = %kind, subject = %subject, "analysis task timed out");
                        TaskOutcome::timed_out(kind)
                    }
                }
            }));
        }

        let mut outcomes = Vec::with_capacity(specs.len());
        for (spec, mut handle) in specs.iter().zip(handles) {
            match timeout_at(global_deadline, &mut handle).await {
                Ok(Ok(outcome)) => outcomes.push(outcome),
                Ok(Err(join_err)) => {
                    warn!(task = %spec.kind, error = %join_err, "analysis task aborted");
                    outcomes.push(TaskOutcome::failed(
                        spec.kind,
                        format!("task aborted: {join_err}"),
                    ));
                }
                Err(_) => {
                    // Global budget elapsed; a late result from this task must
                    // never be merged in, so the task itself is cancelled.
                    warn!(task = %spec.kind, "global deadline reached, cancelling task");
                    handle.abort();
                    outcomes.push(TaskOutcome::timed_out(spec.kind));
                }
            }
        }

        debug!(
            subject = %profile.symbol,
            successes = outcomes.iter().filter(|o| o.is_success()).count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis tasks settled"
        );

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use insight_core::{OutcomeStatus, TaskKind, TaskReport, Verdict};
    use std::time::Instant as StdInstant;

    /// Test executor with a fixed delay and canned result
    struct StubExecutor {
        kind: TaskKind,
        delay: Duration,
        result: std::result::Result<Verdict, String>,
    }

    impl StubExecutor {
        fn ok(kind: TaskKind, delay: Duration, verdict: Verdict) -> Arc<dyn TaskExecutor> {
            Arc::new(Self {
                kind,
                delay,
                result: Ok(verdict),
            })
        }

        fn err(kind: TaskKind, delay: Duration, reason: &str) -> Arc<dyn TaskExecutor> {
            Arc::new(Self {
                kind,
                delay,
                result: Err(reason.to_string()),
            })
        }
    }

    #[async_trait]
    impl TaskExecutor for StubExecutor {
        fn kind(&self) -> TaskKind {
            self.kind
        }

        async fn execute(
            &self,
            _subject: &str,
            _profile: &SubjectProfile,
            _deadline: StdInstant,
        ) -> Result<TaskReport> {
            tokio::time::sleep(self.delay).await;
            match &self.result {
                Ok(verdict) => Ok(TaskReport::new(*verdict, "stubbed")),
                Err(reason) => Err(InsightError::TaskFailed(reason.clone())),
            }
        }
    }

    struct PanickingExecutor;

    #[async_trait]
    impl TaskExecutor for PanickingExecutor {
        fn kind(&self) -> TaskKind {
            TaskKind::Dcf
        }

        async fn execute(
            &self,
            _subject: &str,
            _profile: &SubjectProfile,
            _deadline: StdInstant,
        ) -> Result<TaskReport> {
            panic!("executor blew up");
        }
    }

    fn specs(entries: &[(TaskKind, Duration)]) -> Vec<TaskSpec> {
        entries
            .iter()
            .map(|(kind, timeout)| TaskSpec::new(*kind, 0.25, *timeout))
            .collect()
    }

    fn executor_map(
        executors: impl IntoIterator<Item = Arc<dyn TaskExecutor>>,
    ) -> HashMap<TaskKind, Arc<dyn TaskExecutor>> {
        executors.into_iter().map(|e| (e.kind(), e)).collect()
    }

    #[tokio::test]
    async fn test_one_outcome_per_task_in_spec_order() {
        let scheduler = Scheduler::default();
        let profile = SubjectProfile::new("ORD");
        let specs = specs(&[
            (TaskKind::Dcf, Duration::from_secs(1)),
            (TaskKind::PeerMultiple, Duration::from_secs(1)),
            (TaskKind::PricePattern, Duration::from_secs(1)),
        ]);
        let executors = executor_map([
            StubExecutor::ok(TaskKind::Dcf, Duration::from_millis(30), Verdict::Buy),
            StubExecutor::ok(TaskKind::PeerMultiple, Duration::from_millis(5), Verdict::Hold),
            StubExecutor::ok(TaskKind::PricePattern, Duration::from_millis(15), Verdict::Sell),
        ]);

        let outcomes = scheduler
            .run(&profile, &specs, &executors)
            .await
            .expect("run succeeds");

        assert_eq!(outcomes.len(), 3);
        let kinds: Vec<TaskKind> = outcomes.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![TaskKind::Dcf, TaskKind::PeerMultiple, TaskKind::PricePattern]
        );
        assert!(outcomes.iter().all(TaskOutcome::is_success));
    }

    #[tokio::test]
    async fn test_slow_task_times_out_alone() {
        let scheduler = Scheduler::default();
        let profile = SubjectProfile::new("SLOW");
        let specs = vec![
            TaskSpec::new(TaskKind::Dcf, 0.25, Duration::from_secs(1)),
            TaskSpec::new(TaskKind::PeerMultiple, 0.25, Duration::from_millis(50)),
            TaskSpec::new(TaskKind::PricePattern, 0.25, Duration::from_secs(1)),
        ];
        let executors = executor_map([
            StubExecutor::ok(TaskKind::Dcf, Duration::from_millis(10), Verdict::Buy),
            StubExecutor::ok(TaskKind::PeerMultiple, Duration::from_secs(5), Verdict::Buy),
            StubExecutor::ok(TaskKind::PricePattern, Duration::from_millis(10), Verdict::Hold),
        ]);

        let outcomes = scheduler
            .run(&profile, &specs, &executors)
            .await
            .expect("run succeeds");

        assert_eq!(outcomes[0].status, OutcomeStatus::Success);
        assert_eq!(outcomes[1].status, OutcomeStatus::TimedOut);
        assert_eq!(outcomes[1].verdict, None);
        assert_eq!(outcomes[2].status, OutcomeStatus::Success);
    }

    #[tokio::test]
    async fn test_failure_never_aborts_siblings() {
        let scheduler = Scheduler::default();
        let profile = SubjectProfile::new("MIX");
        let specs = specs(&[
            (TaskKind::Dcf, Duration::from_secs(1)),
            (TaskKind::PeerMultiple, Duration::from_secs(1)),
        ]);
        let executors = executor_map([
            StubExecutor::err(TaskKind::Dcf, Duration::from_millis(5), "provider down"),
            StubExecutor::ok(TaskKind::PeerMultiple, Duration::from_millis(40), Verdict::Buy),
        ]);

        let outcomes = scheduler
            .run(&profile, &specs, &executors)
            .await
            .expect("run succeeds");

        assert_eq!(outcomes[0].status, OutcomeStatus::Failed);
        assert!(outcomes[0].rationale.contains("provider down"));
        assert_eq!(outcomes[1].status, OutcomeStatus::Success);
    }

    #[tokio::test]
    async fn test_global_deadline_cancels_all_pending() {
        let scheduler = Scheduler::new(SchedulerConfig {
            global_budget: Duration::from_millis(60),
        });
        let profile = SubjectProfile::new("GLOB");
        let specs = specs(&[
            (TaskKind::Dcf, Duration::from_secs(5)),
            (TaskKind::PeerMultiple, Duration::from_secs(5)),
            (TaskKind::PricePattern, Duration::from_secs(5)),
        ]);
        let executors = executor_map([
            StubExecutor::ok(TaskKind::Dcf, Duration::from_millis(10), Verdict::Buy),
            StubExecutor::ok(TaskKind::PeerMultiple, Duration::from_secs(10), Verdict::Buy),
            StubExecutor::ok(TaskKind::PricePattern, Duration::from_secs(10), Verdict::Buy),
        ]);

        let outcomes = scheduler
            .run(&profile, &specs, &executors)
            .await
            .expect("run succeeds");

        // Partial results gathered before the global deadline are kept.
        assert_eq!(outcomes[0].status, OutcomeStatus::Success);
        assert_eq!(outcomes[1].status, OutcomeStatus::TimedOut);
        assert_eq!(outcomes[2].status, OutcomeStatus::TimedOut);
    }

    #[tokio::test]
    async fn test_missing_executor_is_structural_error() {
        let scheduler = Scheduler::default();
        let profile = SubjectProfile::new("HOLE");
        let specs = specs(&[
            (TaskKind::Dcf, Duration::from_secs(1)),
            (TaskKind::PeerMultiple, Duration::from_secs(1)),
        ]);
        let executors = executor_map([StubExecutor::ok(
            TaskKind::Dcf,
            Duration::from_millis(5),
            Verdict::Buy,
        )]);

        let err = scheduler
            .run(&profile, &specs, &executors)
            .await
            .expect_err("missing executor must fail");
        assert!(matches!(
            err,
            InsightError::MissingExecutor(TaskKind::PeerMultiple)
        ));
    }

    #[tokio::test]
    async fn test_panicking_executor_becomes_failed_outcome() {
        let scheduler = Scheduler::default();
        let profile = SubjectProfile::new("BOOM");
        let specs = specs(&[
            (TaskKind::Dcf, Duration::from_secs(1)),
            (TaskKind::PeerMultiple, Duration::from_secs(1)),
        ]);
        let executors = executor_map([
            Arc::new(PanickingExecutor) as Arc<dyn TaskExecutor>,
            StubExecutor::ok(TaskKind::PeerMultiple, Duration::from_millis(5), Verdict::Hold),
        ]);

        let outcomes = scheduler
            .run(&profile, &specs, &executors)
            .await
            .expect("run succeeds");

        assert_eq!(outcomes[0].status, OutcomeStatus::Failed);
        assert_eq!(outcomes[1].status, OutcomeStatus::Success);
    }
}
