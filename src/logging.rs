use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a console subscriber for embedding processes that do not bring
/// their own. Library code only emits `tracing` events; initialization is
/// opt-in and should be called once at process start.
pub fn init_logging() {
    let filter = EnvFilter::from_default_env().add_directive(
        "fin_core=info"
            .parse()
            .expect("static logging directive parses"),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();
}
