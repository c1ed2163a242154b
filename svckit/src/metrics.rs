use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    pub static ref OPERATION_DURATION: HistogramVec = register_histogram_vec!(
        "demo_operation_duration_seconds",
        "Database operation duration in seconds",
        &["operation", "backend", "status"]
    ).expect("operation duration histogram registers once");

    pub static ref OPERATION_COUNTER: IntCounterVec = register_int_counter_vec!(
        "demo_operations_total",
        "Total number of database operations",
        &["operation", "backend", "status"]
    ).expect("operation counter registers once");
}

pub fn record_operation(operation: &str, backend: &str, success: bool, duration: f64) {
    let status = if success { "success" } else { "failure" };
    OPERATION_DURATION
        .with_label_values(&[operation, backend, status])
        .observe(duration);
    OPERATION_COUNTER
        .with_label_values(&[operation, backend, status])
        .inc();
}

/// Everything in the default registry, in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operation_counts_by_status() {
        let before = OPERATION_COUNTER
            .with_label_values(&["metrics-test", "redis", "failure"])
            .get();
        record_operation("metrics-test", "redis", false, 0.01);
        record_operation("metrics-test", "redis", false, 0.02);
        let after = OPERATION_COUNTER
            .with_label_values(&["metrics-test", "redis", "failure"])
            .get();
        assert_eq!(after - before, 2);
    }

    #[test]
    fn test_render_exports_recorded_operations() {
        record_operation("render-test", "scylla", true, 0.5);
        let text = render().unwrap();
        assert!(text.contains("demo_operations_total"));
        assert!(text.contains("demo_operation_duration_seconds"));
        assert!(text.contains("operation=\"render-test\""));
    }
}
