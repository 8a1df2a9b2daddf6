//! This module sets up logging for the application using `tracing_subscriber`.
//! All output goes to stderr, stdout is reserved for the generated source.

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

/// Sets up logging based on the provided format preference
///
/// # Arguments
///
/// * `directives` - The default filter, used when `RUST_LOG` is not set
/// * `pretty` - Whether to log in the multi-line pretty format instead of
///   JSON
pub fn setup_logging(directives: &str, pretty: bool) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);

    let main_layer = match pretty {
        true => fmt_layer.pretty().boxed(),
        false => fmt_layer
            .json()
            .flatten_event(true)
            .with_target(false)
            .with_current_span(true)
            .with_span_list(true)
            .with_line_number(true)
            .with_file(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives)))
        .with(main_layer)
        .init()
}
