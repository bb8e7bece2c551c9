use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber writing to stderr, so command output on
/// stdout stays clean.
///
/// `RUST_LOG` takes over filtering entirely when set. Otherwise logging is
/// silent unless `verbose`, which enables debug output for this crate.
pub fn init_logging(verbose: bool) {
    let (env_filter, app_filter) = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => (Some(env_filter), None),
        Err(_) => (None, Some(default_filter(verbose))),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}

fn default_filter(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new().with_target("fxdash", level)
}
