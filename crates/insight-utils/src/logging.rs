//! Tracing setup shared by the insight binaries

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives applied when `RUST_LOG` is unset: dependencies stay quiet while
/// the workspace crates log at info, which covers task dispatch, per-task
/// settlement and the final consensus line.
const DEFAULT_DIRECTIVES: &str =
    "warn,insight_core=info,insight_engine=info,insight_analyzers=info,insight_cli=info";

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` overrides [`DEFAULT_DIRECTIVES`] entirely when set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
