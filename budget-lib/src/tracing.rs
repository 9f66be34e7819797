use crate::config::TelemetryConfig;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::Error;
use anyhow::{anyhow, Context};
use opentelemetry::sdk::trace::Tracer;
use opentelemetry::sdk::Resource;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use tonic::metadata::{Ascii, MetadataKey, MetadataMap};
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder, TracingLogger};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;

/// Root span with an empty `user_id` field, filled in once the session is known.
pub struct BudgetRootSpanBuilder;

impl RootSpanBuilder for BudgetRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        tracing_actix_web::root_span!(request, user_id = tracing::field::Empty)
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: Span,
        outcome: &Result<ServiceResponse<B>, Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

pub fn create_middleware() -> TracingLogger<BudgetRootSpanBuilder> {
    TracingLogger::<BudgetRootSpanBuilder>::new()
}

fn metadata_map(config: &TelemetryConfig) -> Result<MetadataMap, anyhow::Error> {
    let mut metadata_map = MetadataMap::with_capacity(config.headers.len());
    for (name, value) in &config.headers {
        let key = MetadataKey::<Ascii>::from_bytes(name.as_bytes())
            .map_err(|_| anyhow!("Invalid telemetry header name: {}", name))?;
        let value = value
            .parse()
            .with_context(|| format!("Invalid value for telemetry header {}", name))?;
        metadata_map.insert(key, value);
    }
    Ok(metadata_map)
}

pub fn create_opentelemetry_layer<S>(
    service_name: &'static str,
    config: &TelemetryConfig,
) -> Result<OpenTelemetryLayer<S, Tracer>, anyhow::Error>
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(config.endpoint.clone())
        .with_metadata(metadata_map(config)?);

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_trace_config(
            opentelemetry::sdk::trace::config().with_resource(Resource::new(vec![KeyValue::new(
                "service.name",
                service_name,
            )])),
        )
        .with_exporter(exporter)
        .install_batch(opentelemetry::runtime::Tokio)
        .context("Unable to create tracer")?;
    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    Ok(telemetry_layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn telemetry_config(headers: &[(&str, &str)]) -> TelemetryConfig {
        TelemetryConfig {
            endpoint: "https://otlp.example.com".to_owned(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn headers_become_metadata() {
        let map = metadata_map(&telemetry_config(&[("x-api-key", "abc")])).unwrap();
        assert_eq!(Some("abc"), map.get("x-api-key").and_then(|v| v.to_str().ok()));
    }

    #[test]
    fn invalid_header_name() {
        assert!(metadata_map(&telemetry_config(&[("bad key", "abc")])).is_err());
    }
}
