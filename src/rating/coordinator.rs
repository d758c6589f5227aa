use super::aggregate::aggregate;
use super::executor::MetricExecutor;
use super::record::{RatingOutcome, RatingSnapshot, Terminal, Unavailability};
use super::store::{Admission, CycleWatch, RatingStore};
use crate::Result;
use crate::config::Config;
use crate::facts::{ArtifactId, ArtifactRef, Collector, MetadataSource};
use crate::metrics::MetricRegistry;
use core::time::Duration;
use std::sync::Arc;

const LOG_TARGET: &str = "    rating";

/// Rates artifacts, making sure each artifact is rated by at most one computation at a time.
///
/// The first caller for an artifact starts a rating cycle on a spawned task. Callers that arrive while the cycle
/// is running wait for it instead of starting another one. Every caller waits at most the configured timeout;
/// a caller that gives up does not stop the computation, which still records its result in the store.
#[derive(Debug)]
pub struct RatingCoordinator<S> {
    collector: Collector<S>,
    executor: MetricExecutor,
    store: Arc<RatingStore>,
    pass_threshold: f64,
    wait_timeout: Duration,
}

impl<S: MetadataSource> RatingCoordinator<S> {
    /// Create a coordinator that rates artifacts described by `source` with the metrics in `registry`.
    #[must_use]
    pub fn new(source: Arc<S>, registry: Arc<MetricRegistry>, store: Arc<RatingStore>, config: &Config) -> Self {
        Self {
            collector: Collector::new(source),
            executor: MetricExecutor::new(registry, config.metric_parallelism()),
            store,
            pass_threshold: config.pass_threshold,
            wait_timeout: config.wait_timeout(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<RatingStore> {
        &self.store
    }

    /// Rate `artifact`, or return its existing rating.
    ///
    /// A terminal record is returned as is; use [`Self::rerate`] to compute a fresh rating.
    pub async fn rate(&self, artifact: &ArtifactRef) -> RatingOutcome {
        self.admit(artifact, false).await
    }

    /// Compute a fresh rating for `artifact`, replacing a terminal record.
    ///
    /// If a rating of the artifact is already running, the caller waits for it instead.
    pub async fn rerate(&self, artifact: &ArtifactRef) -> RatingOutcome {
        self.admit(artifact, true).await
    }

    /// The current state of `id`'s rating, without starting a computation.
    #[must_use]
    pub fn status(&self, id: &ArtifactId) -> Option<RatingSnapshot> {
        self.store.snapshot(id)
    }

    /// Remove the terminal rating record for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is still being rated.
    pub fn forget(&self, id: &ArtifactId) -> Result<bool> {
        self.store.forget(id)
    }

    async fn admit(&self, artifact: &ArtifactRef, restart: bool) -> RatingOutcome {
        match self.store.admit(&artifact.id(), restart) {
            Admission::Owner { cycle, watch } => {
                log::info!(target: LOG_TARGET, "Rating {artifact} (cycle {cycle})");
                self.spawn_cycle(artifact.clone(), cycle);
                self.wait(artifact, watch).await
            }
            Admission::Waiter(watch) => {
                log::debug!(target: LOG_TARGET, "Waiting for the in-flight rating of {artifact}");
                self.wait(artifact, watch).await
            }
            Admission::Finished(terminal) => terminal.into(),
        }
    }

    async fn wait(&self, artifact: &ArtifactRef, mut watch: CycleWatch) -> RatingOutcome {
        match tokio::time::timeout(self.wait_timeout, watch.wait_for(Option::is_some)).await {
            Ok(Ok(state)) => state.clone().map_or(RatingOutcome::Unavailable(Unavailability::TimedOut), Into::into),
            Ok(Err(_)) => RatingOutcome::Unavailable(Unavailability::Failed(Arc::from("the rating record was removed"))),
            Err(_) => {
                log::info!(
                    target: LOG_TARGET,
                    "Rating of {artifact} is still in progress after {}ms; reporting it as unavailable",
                    self.wait_timeout.as_millis()
                );
                RatingOutcome::Unavailable(Unavailability::TimedOut)
            }
        }
    }

    fn spawn_cycle(&self, artifact: ArtifactRef, cycle: u64) {
        let collector = self.collector.clone();
        let executor = self.executor.clone();
        let pass_threshold = self.pass_threshold;
        let store = Arc::clone(&self.store);
        let id = artifact.id();

        let computation = tokio::spawn(async move { run_cycle(&collector, &executor, &artifact, pass_threshold).await });

        drop(tokio::spawn(async move {
            let terminal = computation.await.unwrap_or_else(|e| {
                log::error!(target: LOG_TARGET, "Rating task for {id} was lost: {e}");
                Terminal::Failed(Arc::from(format!("rating task was lost: {e}")))
            });

            if !store.finish(&id, cycle, terminal) {
                log::debug!(target: LOG_TARGET, "Discarded result of rating cycle {cycle} for {id}: record is gone or already settled");
            }
        }));
    }
}

async fn run_cycle<S: MetadataSource>(
    collector: &Collector<S>,
    executor: &MetricExecutor,
    artifact: &ArtifactRef,
    pass_threshold: f64,
) -> Terminal {
    let metadata = match collector.collect(artifact).await {
        Ok(metadata) => Arc::new(metadata),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not rate {artifact}: {e:#}");
            return Terminal::Failed(Arc::from(format!("{e:#}")));
        }
    };

    let result = Arc::new(aggregate(executor.run(metadata).await));

    if result.net_score >= pass_threshold {
        log::info!(target: LOG_TARGET, "Rated {artifact}: net score {:.2}", result.net_score);
        Terminal::Completed(result)
    } else {
        log::info!(
            target: LOG_TARGET,
            "Rated {artifact}: net score {:.2} is below the pass threshold {pass_threshold:.2}",
            result.net_score
        );
        Terminal::Disqualified(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{ArtifactKind, Metadata};
    use crate::metrics::{Measurement, Metric};
    use crate::rating::RatingStatus;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use ohno::bail;
    use tokio::sync::Notify;

    #[derive(Debug, Default)]
    struct GatedSource {
        fetches: AtomicUsize,
        gate: Option<Arc<Notify>>,
        fail: bool,
    }

    impl MetadataSource for GatedSource {
        async fn fetch_metadata(&self, _artifact: &ArtifactRef) -> Result<Metadata> {
            let _ = self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            if self.fail {
                bail!("registry is unreachable");
            }

            Ok(Metadata::default())
        }
    }

    #[derive(Debug)]
    struct Fixed(f64);

    impl Metric for Fixed {
        fn name(&self) -> &'static str {
            "license"
        }

        fn measure(&self, _metadata: &Metadata) -> Measurement {
            Measurement::scalar(self.0)
        }
    }

    fn coordinator(source: GatedSource, license_score: f64, wait: Duration) -> RatingCoordinator<GatedSource> {
        let mut registry = MetricRegistry::new();
        registry.register(Fixed(license_score)).unwrap();

        let config = Config {
            pass_threshold: 0.1,
            rating_wait_timeout_ms: u64::try_from(wait.as_millis()).unwrap(),
            ..Config::default()
        };

        RatingCoordinator::new(Arc::new(source), Arc::new(registry), Arc::new(RatingStore::new()), &config)
    }

    fn artifact() -> ArtifactRef {
        ArtifactRef::new(ArtifactKind::Model, "org/model", None)
    }

    #[tokio::test]
    async fn completed_ratings_are_cached() {
        let coordinator = coordinator(GatedSource::default(), 1.0, Duration::from_secs(5));

        let first = coordinator.rate(&artifact()).await;
        let second = coordinator.rate(&artifact()).await;

        assert!(first.is_completed());
        assert_eq!(first, second);
        assert_eq!(coordinator.collector.source().fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn low_scores_are_disqualified() {
        let coordinator = coordinator(GatedSource::default(), 0.0, Duration::from_secs(5));

        let outcome = coordinator.rate(&artifact()).await;
        assert!(matches!(outcome, RatingOutcome::Disqualified(_)));
        assert_eq!(coordinator.status(&artifact().id()).unwrap().status, RatingStatus::Disqualified);
    }

    #[tokio::test]
    async fn fetch_failures_are_terminal() {
        let source = GatedSource {
            fail: true,
            ..GatedSource::default()
        };
        let coordinator = coordinator(source, 1.0, Duration::from_secs(5));

        let outcome = coordinator.rate(&artifact()).await;
        let RatingOutcome::Unavailable(Unavailability::Failed(reason)) = outcome else {
            panic!("expected a failure, got {outcome:?}");
        };
        assert!(reason.contains("registry is unreachable"));

        let _ = coordinator.rate(&artifact()).await;
        assert_eq!(coordinator.collector.source().fetches.load(Ordering::SeqCst), 1, "failures are not retried");
    }

    #[tokio::test]
    async fn timed_out_callers_do_not_cancel_the_rating() {
        let gate = Arc::new(Notify::new());
        let source = GatedSource {
            gate: Some(Arc::clone(&gate)),
            ..GatedSource::default()
        };
        let coordinator = coordinator(source, 1.0, Duration::from_millis(50));

        let outcome = coordinator.rate(&artifact()).await;
        assert_eq!(outcome, RatingOutcome::Unavailable(Unavailability::TimedOut));
        assert_eq!(coordinator.status(&artifact().id()).unwrap().status, RatingStatus::Pending);

        gate.notify_one();

        let mut status = coordinator.status(&artifact().id()).unwrap().status;
        for _ in 0..100 {
            if status.is_terminal() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            status = coordinator.status(&artifact().id()).unwrap().status;
        }

        assert_eq!(status, RatingStatus::Completed);
        assert_eq!(coordinator.collector.source().fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rerate_starts_a_new_cycle() {
        let coordinator = coordinator(GatedSource::default(), 1.0, Duration::from_secs(5));

        let _ = coordinator.rate(&artifact()).await;
        let outcome = coordinator.rerate(&artifact()).await;

        assert!(outcome.is_completed());
        assert_eq!(coordinator.status(&artifact().id()).unwrap().cycle, 2);
        assert_eq!(coordinator.collector.source().fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn forget_removes_finished_ratings() {
        let coordinator = coordinator(GatedSource::default(), 1.0, Duration::from_secs(5));
        let _ = coordinator.rate(&artifact()).await;

        assert!(coordinator.forget(&artifact().id()).unwrap());
        assert!(coordinator.status(&artifact().id()).is_none());
    }
}
