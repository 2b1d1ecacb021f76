//! Task registry and selection
//!
//! The registry is constant configuration: loaded once, shared read-only
//! across requests. Declared weights of a selected set need not sum to 1 -
//! renormalization happens during aggregation, not here.

use insight_core::{Category, InsightError, Result, TaskKind, TaskSpec};
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(30);

fn default_weight(kind: TaskKind) -> f64 {
    match kind {
        TaskKind::Dcf | TaskKind::AnalystConsensus => 0.25,
        TaskKind::PeerMultiple => 0.20,
        TaskKind::PricePattern | TaskKind::AiInsights => 0.15,
        TaskKind::EarlyStageMetrics => 0.40,
        TaskKind::NewsSentiment => 0.0,
    }
}

/// Static table of task specs, ordered canonically by [`TaskKind::ALL`]
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    table: Vec<TaskSpec>,
}

impl TaskRegistry {
    /// Registry with the default weights and timeouts for every task kind
    pub fn with_defaults() -> Self {
        let table = TaskKind::ALL
            .into_iter()
            .map(|kind| TaskSpec::new(kind, default_weight(kind), DEFAULT_TASK_TIMEOUT))
            .collect();
        Self { table }
    }

    pub fn builder() -> TaskRegistryBuilder {
        TaskRegistryBuilder::new()
    }

    /// Ordered list of task specs applicable to the given category
    ///
    /// Pure and deterministic: same category, same list.
    pub fn select(&self, category: Category) -> Vec<TaskSpec> {
        self.table
            .iter()
            .copied()
            .filter(|spec| spec.kind.applies_to(category))
            .collect()
    }

    /// Look up the spec for one task kind, if enabled
    pub fn spec(&self, kind: TaskKind) -> Option<TaskSpec> {
        self.table.iter().copied().find(|spec| spec.kind == kind)
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for [`TaskRegistry`]
///
/// Weights and timeouts are externally supplied configuration; the builder
/// validates them before the registry is shared.
#[derive(Debug, Default)]
pub struct TaskRegistryBuilder {
    weights: HashMap<TaskKind, f64>,
    timeouts: HashMap<TaskKind, Duration>,
    enabled: Option<Vec<TaskKind>>,
}

impl TaskRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the declared weight for one task kind
    pub fn weight(mut self, kind: TaskKind, weight: f64) -> Self {
        self.weights.insert(kind, weight);
        self
    }

    /// Override the per-task budget for one task kind
    pub fn timeout(mut self, kind: TaskKind, timeout: Duration) -> Self {
        self.timeouts.insert(kind, timeout);
        self
    }

    /// Restrict the registry to the given kinds, in canonical order
    pub fn enabled(mut self, kinds: impl IntoIterator<Item = TaskKind>) -> Self {
        self.enabled = Some(kinds.into_iter().collect());
        self
    }

    pub fn build(self) -> Result<TaskRegistry> {
        let table: Vec<TaskSpec> = TaskKind::ALL
            .into_iter()
            .filter(|kind| {
                self.enabled
                    .as_ref()
                    .is_none_or(|enabled| enabled.contains(kind))
            })
            .map(|kind| {
                let weight = self.weights.get(&kind).copied().unwrap_or_else(|| default_weight(kind));
                let timeout = self
                    .timeouts
                    .get(&kind)
                    .copied()
                    .unwrap_or(DEFAULT_TASK_TIMEOUT);
                TaskSpec::new(kind, weight, timeout)
            })
            .collect();

        for spec in &table {
            if !spec.weight.is_finite() || !(0.0..=1.0).contains(&spec.weight) {
                return Err(InsightError::Config(format!(
                    "weight for {} must be in [0, 1], got {}",
                    spec.kind, spec.weight
                )));
            }
            if spec.timeout.is_zero() {
                return Err(InsightError::Config(format!(
                    "timeout for {} must be non-zero",
                    spec.kind
                )));
            }
        }

        Ok(TaskRegistry { table })
    }
}
