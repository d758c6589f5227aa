use crate::facts::Metadata;
use crate::metrics::{MetricRegistry, MetricValue};
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, spawn_blocking};

const LOG_TARGET: &str = "  executor";

/// Runs every registered metric against one metadata snapshot on a bounded pool of blocking workers.
#[derive(Debug, Clone)]
pub struct MetricExecutor {
    registry: Arc<MetricRegistry>,
    semaphore: Arc<Semaphore>,
}

impl MetricExecutor {
    /// Create an executor that runs at most `max_concurrent` metrics at a time.
    #[must_use]
    pub fn new(registry: Arc<MetricRegistry>, max_concurrent: usize) -> Self {
        Self {
            registry,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }

    /// Compute every registered metric.
    ///
    /// The result holds exactly one entry per registered metric. A metric that panics is logged and recorded
    /// as a zero value; it never affects the other metrics.
    pub async fn run(&self, metadata: Arc<Metadata>) -> BTreeMap<String, MetricValue> {
        let metrics = self.registry.all();
        let mut tasks: Vec<(&'static str, JoinHandle<MetricValue>)> = Vec::with_capacity(metrics.len());

        for metric in metrics {
            let permit_res = Arc::clone(&self.semaphore).acquire_owned().await;
            let metric = Arc::clone(metric);
            let metadata = Arc::clone(&metadata);
            let name = metric.name();

            let task = spawn_blocking(move || {
                let _permit = permit_res;
                metric.score(&metadata)
            });

            tasks.push((name, task));
        }

        let (names, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
        let results = join_all(handles).await;

        names
            .into_iter()
            .zip(results)
            .map(|(name, result)| {
                let value = result.unwrap_or_else(|e| {
                    log::warn!(target: LOG_TARGET, "Metric '{name}' failed and was scored 0: {e}");
                    MetricValue::failed(name)
                });

                (name.to_string(), value)
            })
            .collect()
    }
}
