use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::cache::CacheOutcome;
use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

pub(crate) fn record_view(view: &'static str, outcome: CacheOutcome) {
    match outcome {
        CacheOutcome::Hit => metrics::counter!("analytics_cache_hits_total", "view" => view).increment(1),
        CacheOutcome::Miss => {
            metrics::counter!("analytics_pipeline_runs_total", "view" => view).increment(1)
        }
    }
}
