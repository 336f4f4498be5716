use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dot_matrix::consultants::{Consultant, ConsultantRepository};
use dot_matrix::error::AppError;
use dot_matrix::store::Repository;
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared per-process state handed to every request.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<Repository>,
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(registry: Repository, metrics: PrometheusHandle) -> Self {
        Self {
            registry: Arc::new(registry),
            readiness: Arc::new(AtomicBool::new(false)),
            metrics,
        }
    }

    pub fn registry(&self) -> &Repository {
        &self.registry
    }

    pub fn mark_ready(&self) {
        self.readiness.store(true, Ordering::Release);
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.readiness.load(Ordering::Acquire)
    }

    pub(crate) fn render_metrics(&self) -> String {
        self.metrics.render()
    }

    pub(crate) fn consultants(&self) -> Result<Arc<ConsultantRepository>, AppError> {
        Ok(self.registry.for_kind::<Consultant>()?)
    }
}

/// Pulls each listed key out of the request parameters. Absent keys are never defaulted.
pub(crate) fn required_params<'a>(
    params: &'a HashMap<String, String>,
    keys: &[&'static str],
) -> Result<Vec<(&'static str, &'a str)>, AppError> {
    keys.iter()
        .map(|&key| {
            params
                .get(key)
                .map(|value| (key, value.as_str()))
                .ok_or_else(|| AppError::missing_parameter(key))
        })
        .collect()
}
