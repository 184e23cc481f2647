use crate::transforms::TransformSpec;
use log::{debug, info};
use std::collections::BTreeMap;

/// Thin wrapper over the `log` facade for run and chain summaries.
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self { target: "rficore" }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    /// Logs the per-kind composition of a chain at `info` and each stage at `debug`.
    pub fn record_chain(&self, label: &str, chain: &[TransformSpec]) {
        let counts = chain_composition(chain);
        let summary = counts
            .iter()
            .map(|(kind, count)| format!("{kind}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        info!(
            target: self.target,
            "{}: {} transforms ({})",
            label,
            chain.len(),
            summary
        );
        for (index, transform) in chain.iter().enumerate() {
            debug!(target: self.target, "{}[{:3}] {}", label, index, transform);
        }
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of transforms of each kind, ordered by kind name.
pub fn chain_composition(chain: &[TransformSpec]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for transform in chain {
        *counts.entry(transform.kind()).or_insert(0) += 1;
    }
    counts
}
