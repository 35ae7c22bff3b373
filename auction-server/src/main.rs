use {
    anyhow::Result,
    clap::Parser,
    per_metrics::{
        is_metrics,
        MetricsLayer,
    },
    server::start_server,
    std::io::IsTerminal,
    tracing_subscriber::{
        filter::{
            self,
            LevelFilter,
        },
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
        Layer,
    },
};

mod api;
mod auction;
mod config;
mod kernel;
mod module;
mod per_metrics;
mod server;
mod session;
mod state;
mod team;

#[tokio::main]
async fn main() -> Result<()> {
    let is_terminal = std::io::stderr().is_terminal();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_ansi(is_terminal);

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    let fmt_layer = if is_terminal {
        fmt_layer.compact().boxed()
    } else {
        fmt_layer.json().boxed()
    };

    tracing_subscriber::registry()
        .with(
            fmt_layer
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::INFO.into())
                        .from_env_lossy(),
                )
                .with_filter(filter::filter_fn(|metadata| !is_metrics(metadata))),
        )
        .with(MetricsLayer.with_filter(filter::filter_fn(is_metrics)))
        .try_init()?;

    // Parse the command line arguments with clap, will exit automatically on `--help` or
    // with invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
