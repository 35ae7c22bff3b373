use {
    crate::{
        config::RunOptions,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::ServerState,
    },
    anyhow::Result,
    axum::{
        routing::get,
        Router,
    },
    axum_prometheus::metrics,
    std::{
        fmt::Debug,
        sync::{
            atomic::Ordering,
            Arc,
        },
        time::Instant,
    },
    tracing::{
        field::{
            Field,
            Visit,
        },
        span::{
            Attributes,
            Record,
        },
        Id,
        Metadata,
    },
    tracing_subscriber::{
        layer::Context,
        registry::LookupSpan,
        Layer,
    },
};

/// Bids received, labelled by `result`: accepted, replaced or rejected.
pub const BIDS_PLACED_TOTAL: &str = "bids_placed_total";
/// Resolutions, labelled by `outcome`: won or no_bids.
pub const ROUNDS_RESOLVED_TOTAL: &str = "rounds_resolved_total";

/// Timing and result of a span instrumented with `target = "metrics"`.
#[derive(Debug, Clone)]
struct SpanMetrics {
    category:   String,
    name:       String,
    result:     String,
    started_at: Instant,
}

impl SpanMetrics {
    fn new(name: &str) -> Self {
        Self {
            category:   "unknown".to_string(),
            name:       name.to_string(),
            result:     "unknown".to_string(),
            started_at: Instant::now(),
        }
    }
}

impl Visit for SpanMetrics {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "result" {
            self.result = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "category" => self.category = value.to_string(),
            "name" => self.name = value.to_string(),
            "result" => self.result = value.to_string(),
            _ => {}
        }
    }
}

/// Turns closed spans of the `metrics` target into `{category}_total` counters
/// and `{category}_duration_seconds` histograms.
pub struct MetricsLayer;

pub fn is_metrics(metadata: &Metadata) -> bool {
    metadata.target().starts_with("metrics")
}

impl<S> Layer<S> for MetricsLayer
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        match ctx.span(id) {
            Some(span) => {
                let mut data = SpanMetrics::new(span.metadata().name());
                attrs.record(&mut data);
                span.extensions_mut().replace(data);
            }
            None => tracing::error!("span not found: {:?}", id),
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            tracing::error!("span not found: {:?}", id);
            return;
        };
        let mut extensions = span.extensions_mut();
        match extensions.get_mut::<SpanMetrics>() {
            Some(data) => values.record(data),
            None => {
                tracing::warn!("metrics data not found for span: {:?}", id);
                extensions.replace(SpanMetrics::new(span.metadata().name()));
            }
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            tracing::error!("span not found: {:?}", id);
            return;
        };
        let extensions = span.extensions();
        let Some(data) = extensions.get::<SpanMetrics>() else {
            tracing::warn!("metrics data not found for span: {:?}", id);
            return;
        };
        let labels = [("name", data.name.clone()), ("result", data.result.clone())];
        metrics::histogram!(format!("{}_duration_seconds", data.category), &labels)
            .record(data.started_at.elapsed().as_secs_f64());
        metrics::counter!(format!("{}_total", data.category), &labels).increment(1);
    }
}

/// Serves the recorded metrics over /metrics in the prometheus text format.
pub async fn start_metrics(run_options: RunOptions, server_state: Arc<ServerState>) -> Result<()> {
    tracing::info!(addr = %run_options.server.metrics_addr, "Starting Metrics Server...");

    let app = Router::new().route(
        "/metrics",
        get(move || async move { server_state.metrics_recorder.render() }),
    );

    let listener = tokio::net::TcpListener::bind(&run_options.server.metrics_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down metrics server...");
        })
        .await?;
    Ok(())
}
