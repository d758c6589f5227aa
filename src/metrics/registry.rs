use super::Metric;
use super::scorers::{
    BusFactor, CodeQuality, DatasetAndCodeScore, DatasetQuality, LicenseMetric, PerformanceClaims, RampUpTime, ReadmeRisk,
    Reproducibility, Reviewedness, SizeScore, TreeScore,
};
use crate::Result;
use crate::config::Config;
use ohno::bail;
use std::collections::HashMap;
use std::sync::Arc;

/// The set of metrics computed for every artifact.
///
/// Metrics are registered once at startup; the registry is then shared read-only through an `Arc`.
/// Iteration follows registration order.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    metrics: Vec<Arc<dyn Metric>>,
    by_name: HashMap<&'static str, usize>,
}

impl MetricRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry holding every built-in metric, configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if two built-in metrics share a name.
    pub fn standard(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(LicenseMetric::new(&config.license_target, &config.license_use_case))?;
        registry.register(RampUpTime)?;
        registry.register(BusFactor)?;
        registry.register(PerformanceClaims)?;
        registry.register(SizeScore)?;
        registry.register(DatasetAndCodeScore)?;
        registry.register(DatasetQuality)?;
        registry.register(CodeQuality)?;
        registry.register(Reproducibility)?;
        registry.register(Reviewedness)?;
        registry.register(TreeScore)?;
        registry.register(ReadmeRisk::from_config(config))?;
        Ok(registry)
    }

    /// Add a metric.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn register(&mut self, metric: impl Metric + 'static) -> Result<()> {
        self.register_arc(Arc::new(metric))
    }

    /// Add a metric that is already shared.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn register_arc(&mut self, metric: Arc<dyn Metric>) -> Result<()> {
        let name = metric.name();
        if self.by_name.contains_key(name) {
            bail!("a metric named '{name}' is already registered");
        }

        let _ = self.by_name.insert(name, self.metrics.len());
        self.metrics.push(metric);
        Ok(())
    }

    #[must_use]
    pub fn all(&self) -> &[Arc<dyn Metric>] {
        &self.metrics
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn Metric>> {
        self.by_name.get(name).and_then(|index| self.metrics.get(*index))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics.iter().map(|metric| metric.name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
