//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use self::metrics::{
    PrometheusMetrics, create_metrics_router, init_metrics, record_cache_reload,
    record_http_request, record_resolution,
};
