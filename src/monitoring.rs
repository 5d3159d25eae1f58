// src/monitoring.rs

use std::future::Future;
use std::time::Instant;

use log::debug;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

/// Сколько раз выполнялась каждая операция (успешно или нет)
pub static DB_QUERY_COUNTER: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "students_db_query_total",
        "Total number of DB operations executed by the demo",
        &["operation"]
    )
    .expect("Failed to create DB_QUERY_COUNTER")
});

pub static DB_QUERY_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "students_db_query_errors_total",
        "Number of failed DB operations",
        &["operation"]
    )
    .expect("Failed to create DB_QUERY_ERRORS")
});

pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "students_db_query_duration_seconds",
        "Duration of DB operations in seconds",
        &["operation"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to create DB_QUERY_DURATION")
});

/// Обёртка над операцией с базой: считает вызовы, ошибки и время.
pub async fn measure_db_operation<F, T, E>(operation: &str, f: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let result = f.await;
    let secs = start.elapsed().as_secs_f64();

    DB_QUERY_COUNTER.with_label_values(&[operation]).inc();
    DB_QUERY_DURATION.with_label_values(&[operation]).observe(secs);
    if result.is_err() {
        DB_QUERY_ERRORS.with_label_values(&[operation]).inc();
    }

    debug!("DB operation {} took {:.4} seconds", operation, secs);
    result
}

/// Метрики в текстовом формате Prometheus.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        log::warn!("failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_calls_and_errors() {
        let ok: Result<i32, String> =
            measure_db_operation("unit_ok", async { Ok(1) }).await;
        assert_eq!(ok, Ok(1));

        let err: Result<i32, String> =
            measure_db_operation("unit_err", async { Err("boom".to_string()) }).await;
        assert!(err.is_err());

        assert_eq!(DB_QUERY_COUNTER.with_label_values(&["unit_ok"]).get(), 1);
        assert_eq!(DB_QUERY_ERRORS.with_label_values(&["unit_ok"]).get(), 0);
        assert_eq!(DB_QUERY_ERRORS.with_label_values(&["unit_err"]).get(), 1);

        let text = gather_metrics();
        assert!(text.contains("students_db_query_total"));
        assert!(text.contains("operation=\"unit_err\""));
    }
}
