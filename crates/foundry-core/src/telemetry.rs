//! Telemetry — OpenTelemetry integration for the Foundry Agents demos.
//!
//! One pipeline per process, configured in `main`: structured JSON logs plus
//! an optional OTLP span exporter. Agent operations are traced through the
//! span helpers below so the control-plane CLI and the relay emit the same
//! attribute names.

use opentelemetry::trace::TracerProvider;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Initialize the telemetry pipeline. Call exactly once per binary.
///
/// Sets up:
/// - Structured JSON logging
/// - OpenTelemetry tracing with OTLP export (when enabled)
/// - Environment-based log filtering
pub fn init_telemetry(
    service_name: &'static str,
    agent_id: &str,
    config: &TelemetryConfig,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,foundry_core=debug,a2a_wire=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if config.enabled {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&config.otlp_endpoint)
            .build()?;

        let resource = opentelemetry_sdk::Resource::new(vec![
            KeyValue::new("service.name", service_name),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("service.instance.id", agent_id.to_string()),
            KeyValue::new("agent.id", agent_id.to_string()),
        ]);

        let provider = opentelemetry_sdk::trace::TracerProvider::builder()
            .with_simple_exporter(exporter)
            .with_resource(resource)
            .build();

        let tracer = provider.tracer(service_name);
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    Ok(())
}

/// Start a span for an agent operation (create, list, delete, test, invoke).
pub fn agent_operation_span(operation: &str, agent_name: &str) -> tracing::Span {
    tracing::info_span!(
        "agent.operation",
        agent.operation = %operation,
        agent.name = %agent_name,
        otel.status_code = tracing::field::Empty,
        error.message = tracing::field::Empty,
        gen_ai.usage.input_tokens = tracing::field::Empty,
        gen_ai.usage.output_tokens = tracing::field::Empty,
        gen_ai.usage.total_tokens = tracing::field::Empty,
    )
}

/// Record a failure on an operation span.
pub fn record_error(span: &tracing::Span, error: &dyn std::fmt::Display) {
    span.record("otel.status_code", "ERROR");
    span.record("error.message", tracing::field::display(error));
}

/// Record chat token usage on an operation span.
pub fn record_token_usage(span: &tracing::Span, input_tokens: u64, output_tokens: u64) {
    span.record("gen_ai.usage.input_tokens", input_tokens);
    span.record("gen_ai.usage.output_tokens", output_tokens);
    span.record("gen_ai.usage.total_tokens", input_tokens + output_tokens);
}
