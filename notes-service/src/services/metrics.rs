//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics recorder and renders the /metrics payload.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// Safe to call more than once; only the first call installs the recorder.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        if metrics::set_global_recorder(recorder).is_err() {
            tracing::warn!("Metrics recorder already installed; keeping the existing one");
        }
        handle
    });
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_note_created() {
    metrics::counter!("notes_created_total").increment(1);
}

pub fn record_notes_listed(count: usize) {
    metrics::counter!("notes_list_requests_total").increment(1);
    metrics::histogram!("notes_list_size").record(count as f64);
}
