//! Prometheus metrics: request middleware plus per-store gauges.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use prometheus::{IntGaugeVec, Opts, Registry};
use tracing::warn;

use hr_console::domain::ports::{StoreMonitor, StoreStatus};

const NAMESPACE: &str = "hr_console";

/// How often the store gauges are refreshed.
pub(crate) const STORE_GAUGE_INTERVAL: Duration = Duration::from_secs(15);

/// Gauges mirroring [`StoreStatus`] for every store.
#[derive(Clone)]
pub(crate) struct StoreGauges {
    records: IntGaugeVec,
    revisions: IntGaugeVec,
    loading: IntGaugeVec,
}

impl StoreGauges {
    pub(crate) fn register(registry: &Registry) -> prometheus::Result<Self> {
        let gauge = |name: &str, help: &str| -> prometheus::Result<IntGaugeVec> {
            let vec = IntGaugeVec::new(Opts::new(name, help).namespace(NAMESPACE), &["store"])?;
            registry.register(Box::new(vec.clone()))?;
            Ok(vec)
        };
        Ok(Self {
            records: gauge("store_records", "Records held by each store")?,
            revisions: gauge("store_revision", "Successful mutations per store")?,
            loading: gauge("store_loading", "1 while a store mutation is in flight")?,
        })
    }

    pub(crate) fn observe(&self, statuses: &[StoreStatus]) {
        for status in statuses {
            let labels = [status.name];
            self.records
                .with_label_values(&labels)
                .set(i64::try_from(status.record_count).unwrap_or(i64::MAX));
            self.revisions
                .with_label_values(&labels)
                .set(i64::try_from(status.revision).unwrap_or(i64::MAX));
            self.loading
                .with_label_values(&labels)
                .set(i64::from(status.loading));
        }
    }
}

/// Request metrics middleware serving `/metrics` from `registry`.
pub(crate) fn make_metrics(registry: Registry) -> io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .registry(registry)
        .endpoint("/metrics")
        .build()
        .map_err(|err| io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Refresh `gauges` from `monitor` until the runtime shuts down.
pub(crate) fn spawn_store_gauge_refresh(gauges: StoreGauges, monitor: Arc<dyn StoreMonitor>) {
    actix_web::rt::spawn(async move {
        let mut ticker = actix_web::rt::time::interval(STORE_GAUGE_INTERVAL);
        loop {
            ticker.tick().await;
            gauges.observe(&monitor.statuses());
        }
    });
}

/// Build middleware and gauges sharing one registry.
pub(crate) fn build_metrics() -> io::Result<(PrometheusMetrics, StoreGauges)> {
    let registry = Registry::new();
    let gauges = StoreGauges::register(&registry).map_err(|err| {
        warn!(error = %err, "store gauge registration failed");
        io::Error::other(format!("register store gauges: {err}"))
    })?;
    Ok((make_metrics(registry)?, gauges))
}
