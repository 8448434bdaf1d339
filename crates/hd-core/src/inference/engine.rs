//! Exact inference by enumeration.
//!
//! Every World consistent with the evidence is evaluated once. The World
//! space is split into index-range shards, each shard accumulates its own
//! marginals, and the shard totals are merged in shard order so that the
//! result does not depend on how many threads ran them.

use std::ops::Range;

use hd_common::{Error, Result};
use hd_config::{InferenceConfig, NetworkParams};
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use super::accumulator::MarginalAccumulator;
use super::cancel::CancellationToken;
use crate::joint::world_probability;
use crate::pedigree::{Pedigree, Population};
use crate::report::{InferenceReport, Posteriors};
use crate::world::WorldSpace;

/// Worlds evaluated between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Drives enumeration, accumulation and normalization for one network.
#[derive(Debug, Clone)]
pub struct InferenceEngine<'a> {
    params: &'a NetworkParams,
    config: InferenceConfig,
    cancel: CancellationToken,
}

impl<'a> InferenceEngine<'a> {
    pub fn new(params: &'a NetworkParams, config: InferenceConfig) -> Self {
        Self {
            params,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Poll `token` during enumeration; a cancelled run returns `Cancelled`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Run inference and return the full report.
    pub fn run(&self, population: &Population) -> Result<InferenceReport> {
        let pedigree = self.prepare(population)?;
        let totals = self.accumulate(&pedigree)?;
        let people = totals.finish(&pedigree, self.config.precision)?;
        info!(
            people = pedigree.len(),
            worlds = totals.worlds(),
            evidence_likelihood = totals.evidence_mass(),
            "inference complete"
        );
        Ok(InferenceReport::new(
            totals.worlds(),
            totals.evidence_mass(),
            people,
        ))
    }

    /// Run inference and return only the per-person marginals.
    pub fn marginals(&self, population: &Population) -> Result<Posteriors> {
        self.run(population).map(|report| report.people)
    }

    fn prepare(&self, population: &Population) -> Result<Pedigree> {
        self.config.validate()?;
        self.params.validate()?;
        let pedigree = population.compile()?;
        check_population_size(pedigree.len(), self.config.max_population)?;
        Ok(pedigree)
    }

    /// Sum the joint probability of every consistent World into marginals.
    pub fn accumulate(&self, pedigree: &Pedigree) -> Result<MarginalAccumulator> {
        let space = WorldSpace::new(pedigree)?;
        let ranges = space.shard_ranges(self.config.shards);
        debug!(
            people = pedigree.len(),
            worlds = space.total(),
            shards = ranges.len(),
            parallel = self.config.parallel,
            "enumerating worlds"
        );

        let run_shard = |range: Range<u64>| self.run_shard(pedigree, &space, range);
        let shards: Vec<MarginalAccumulator> = if self.config.parallel {
            ranges.into_par_iter().map(run_shard).collect::<Result<_>>()?
        } else {
            ranges.into_iter().map(run_shard).collect::<Result<_>>()?
        };

        let mut totals = MarginalAccumulator::new(pedigree.len());
        for shard in &shards {
            totals.merge(shard);
        }
        Ok(totals)
    }

    fn run_shard(
        &self,
        pedigree: &Pedigree,
        space: &WorldSpace,
        range: Range<u64>,
    ) -> Result<MarginalAccumulator> {
        let start = range.start;
        let mut acc = MarginalAccumulator::new(pedigree.len());
        let mut cancelled = false;
        space.walk(range, |world| {
            if acc.worlds() % CANCEL_CHECK_INTERVAL == 0 && self.cancel.is_cancelled() {
                cancelled = true;
                return false;
            }
            acc.add(world, world_probability(pedigree, self.params, world));
            true
        });
        if cancelled {
            return Err(Error::Cancelled {
                worlds: acc.worlds(),
            });
        }
        trace!(
            start,
            worlds = acc.worlds(),
            mass = acc.evidence_mass(),
            "shard complete"
        );
        Ok(acc)
    }
}

/// Reject populations above the configured ceiling.
pub(crate) fn check_population_size(size: usize, limit: usize) -> Result<()> {
    if size > limit {
        return Err(Error::PopulationTooLarge { size, limit });
    }
    if size == limit {
        warn!(size, limit, "population is at the enumeration ceiling");
    }
    Ok(())
}

/// Per-person gene and trait marginals under default engine settings.
///
/// Each distribution is on the percent scale and rounded to one decimal.
pub fn calculate_probabilities(
    population: &Population,
    params: &NetworkParams,
) -> Result<Posteriors> {
    InferenceEngine::new(params, InferenceConfig::default()).marginals(population)
}

/// Full inference report under `config`.
pub fn infer(
    population: &Population,
    params: &NetworkParams,
    config: InferenceConfig,
) -> Result<InferenceReport> {
    InferenceEngine::new(params, config).run(population)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::Person;

    fn family() -> Population {
        Population::from_people([
            Person::child("Harry", "Lily", "James"),
            Person::founder("James").observed(true),
            Person::founder("Lily").observed(false),
        ])
        .unwrap()
    }

    #[test]
    fn empty_population_yields_empty_report() {
        let params = NetworkParams::default();
        let report = infer(&Population::new(), &params, InferenceConfig::default()).unwrap();
        assert!(report.people.is_empty());
        assert_eq!(report.worlds_enumerated, 1);
        assert_eq!(report.evidence_likelihood, 1.0);
    }

    #[test]
    fn enumerates_only_consistent_worlds() {
        let params = NetworkParams::default();
        let report = infer(&family(), &params, InferenceConfig::default()).unwrap();
        // Harry unobserved (6 states), James and Lily observed (3 each).
        assert_eq!(report.worlds_enumerated, 6 * 3 * 3);
        assert!(report.evidence_likelihood > 0.0 && report.evidence_likelihood < 1.0);
    }

    #[test]
    fn sequential_and_parallel_agree_exactly() {
        let params = NetworkParams::default();
        let parallel = InferenceConfig::exact();
        let sequential = InferenceConfig {
            parallel: false,
            ..InferenceConfig::exact()
        };
        let a = InferenceEngine::new(&params, parallel).marginals(&family()).unwrap();
        let b = InferenceEngine::new(&params, sequential).marginals(&family()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_population_over_ceiling() {
        let params = NetworkParams::default();
        let population =
            Population::from_people((0..4).map(|i| Person::founder(format!("P{i}")))).unwrap();
        let config = InferenceConfig {
            max_population: 3,
            ..InferenceConfig::default()
        };
        let err = infer(&population, &params, config).unwrap_err();
        assert!(matches!(
            err,
            Error::PopulationTooLarge { size: 4, limit: 3 }
        ));
    }

    #[test]
    fn cancelled_token_stops_the_run() {
        let params = NetworkParams::default();
        let token = CancellationToken::new();
        token.cancel();
        let err = InferenceEngine::new(&params, InferenceConfig::default())
            .with_cancellation(token)
            .run(&family())
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled { .. }));
    }

    #[test]
    fn invalid_params_are_rejected_before_enumeration() {
        let mut params = NetworkParams::default();
        params.gene_prior.zero = 2.0;
        let err = calculate_probabilities(&family(), &params).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }
}
