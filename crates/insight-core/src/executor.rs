//! The TaskExecutor trait implemented by every analysis method

use crate::error::Result;
use crate::outcome::TaskReport;
use crate::profile::SubjectProfile;
use crate::task::TaskKind;
use async_trait::async_trait;
use std::time::Instant;

/// One analysis method, bound at configuration time to a task kind
///
/// The executor is an opaque collaborator to the engine: provider fallback
/// chains, retries and data retrieval are internal concerns invisible to the
/// scheduler, which only ever observes a single [`TaskReport`] or error.
///
/// `deadline` is the absolute point at which this task is cancelled. An
/// executor doing real blocking work must honor it and stop promptly; the
/// scheduler additionally enforces it, and any result arriving after the
/// task was marked cancelled is discarded rather than merged in.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// The task kind this executor is bound to
    fn kind(&self) -> TaskKind;

    /// Run the analysis for one subject
    async fn execute(
        &self,
        subject: &str,
        profile: &SubjectProfile,
        deadline: Instant,
    ) -> Result<TaskReport>;
}
