//! Tracing bootstrap shared by the server binary and the tests.

use anyhow::Result;
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{self as sdk, Resource};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Telemetry settings. Unset fields fall back to the environment
/// (`RUST_LOG`, `OTLP_ENDPOINT`).
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    pub service_name: &'static str,
    pub log_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "hr-server",
            log_filter: None,
            otlp_endpoint: None,
        }
    }
}

/// Installs the fmt subscriber and, when an OTLP endpoint is configured,
/// a batch span exporter. Later calls are no-ops.
pub fn init_telemetry(config: TelemetryConfig) -> Result<()> {
    if INSTALLED.set(()).is_err() {
        return Ok(());
    }

    let registry = Registry::default()
        .with(env_filter(&config))
        .with(tracing_subscriber::fmt::layer().with_target(false));

    let endpoint = config
        .otlp_endpoint
        .clone()
        .or_else(|| std::env::var("OTLP_ENDPOINT").ok());
    match endpoint {
        Some(endpoint) => {
            let provider = span_provider(&endpoint, config.service_name)?;
            let tracer = provider.tracer(config.service_name);
            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
        }
        None => registry.try_init()?,
    }
    Ok(())
}

fn env_filter(config: &TelemetryConfig) -> EnvFilter {
    let directives = config
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info,tower_http=warn".to_string());
    EnvFilter::new(directives)
}

fn span_provider(endpoint: &str, service_name: &'static str) -> Result<sdk::trace::SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoint)
        .build()?;
    Ok(sdk::trace::SdkTracerProvider::builder()
        .with_resource(Resource::builder().with_service_name(service_name).build())
        .with_batch_exporter(exporter)
        .build())
}
