use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "resumeai=info,resumeai_cli=info,resumeai_api_client=info,\
resumeai_storage=info,resumeai_infra=info,resumeai_core=info";

/// Initialize fmt tracing filtered by `RUST_LOG`. `json` switches to JSON lines.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_telemetry(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json, "Tracing initialized");
    }
}
