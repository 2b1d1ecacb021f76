//! Analysis engine - single entry point composing classifier, registry,
//! scheduler and aggregator

use crate::aggregator::aggregate;
use crate::classifier::classify;
use crate::registry::TaskRegistry;
use crate::scheduler::{Scheduler, SchedulerConfig};
use insight_core::{
    AnalysisReport, InsightError, Result, SubjectProfile, TaskExecutor, TaskKind,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Derives one consensus recommendation per subject
///
/// Holds only read-only configuration (task registry, executor bindings,
/// deadlines); every request's outcomes and report are request-local, so one
/// engine is safely shared across concurrent requests.
pub struct InsightEngine {
    registry: Arc<TaskRegistry>,
    executors: HashMap<TaskKind, Arc<dyn TaskExecutor>>,
    scheduler: Scheduler,
}

impl InsightEngine {
    pub fn builder() -> InsightEngineBuilder {
        InsightEngineBuilder::new()
    }

    /// Analyze one subject: classify → select → schedule → aggregate
    ///
    /// Returns a well-formed report (possibly Indeterminate) or a structural
    /// error - never a partially built result.
    pub async fn analyze(&self, profile: &SubjectProfile) -> Result<AnalysisReport> {
        let category = classify(profile);
        info!(subject = %profile.symbol, category = %category, "starting analysis");

        let specs = self.registry.select(category);
        if specs.is_empty() {
            return Err(InsightError::NoApplicableTasks {
                symbol: profile.symbol.clone(),
                category,
            });
        }

        let outcomes = self.scheduler.run(profile, &specs, &self.executors).await?;
        let consensus = aggregate(&profile.symbol, profile.current_price, &specs, &outcomes)?;

        info!(
            subject = %profile.symbol,
            recommendation = %consensus.recommendation,
            successes = consensus.successful_tasks,
            tasks = outcomes.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            category,
            consensus,
            outcomes,
        })
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }
}

// Executors are opaque trait objects, so only their kinds are shown.
impl fmt::Debug for InsightEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<TaskKind> = self.executors.keys().copied().collect();
        kinds.sort_by_key(|k| k.as_str());
        f.debug_struct("InsightEngine")
            .field("registry", &self.registry)
            .field("executors", &kinds)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

/// Builder for [`InsightEngine`]
pub struct InsightEngineBuilder {
    registry: Option<TaskRegistry>,
    executors: HashMap<TaskKind, Arc<dyn TaskExecutor>>,
    global_budget: Duration,
}

impl InsightEngineBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            executors: HashMap::new(),
            global_budget: Duration::from_secs(60),
        }
    }

    /// Set the task registry (defaults to [`TaskRegistry::with_defaults`])
    pub fn registry(mut self, registry: TaskRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register one executor under its declared task kind
    pub fn executor(mut self, executor: Arc<dyn TaskExecutor>) -> Self {
        self.executors.insert(executor.kind(), executor);
        self
    }

    /// Register a batch of executors
    pub fn executors(mut self, executors: impl IntoIterator<Item = Arc<dyn TaskExecutor>>) -> Self {
        for executor in executors {
            self.executors.insert(executor.kind(), executor);
        }
        self
    }

    /// Set the overall budget for one analysis request
    pub fn global_budget(mut self, budget: Duration) -> Self {
        self.global_budget = budget;
        self
    }

    pub fn build(self) -> Result<InsightEngine> {
        if self.executors.is_empty() {
            return Err(InsightError::Config(
                "at least one task executor must be registered".to_string(),
            ));
        }

        Ok(InsightEngine {
            registry: Arc::new(self.registry.unwrap_or_default()),
            executors: self.executors,
            scheduler: Scheduler::new(SchedulerConfig {
                global_budget: self.global_budget,
            }),
        })
    }
}

impl Default for InsightEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
